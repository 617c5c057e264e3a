//! product-video-core: Pure upload-and-generate controller (sans-IO).
//!
//! Holds the two image slots, the effect checkboxes and the generated
//! video, validates selected files, and describes the HTTP exchanges
//! with the video-generation service as plain data.
//!
//! This crate has **no I/O dependencies**. Requests are returned as
//! [`GenerateRequest`] values and responses are fed back as
//! [`HttpReply`] values; all browser interaction lives in
//! `product-video-io`.

pub mod api;
pub mod controller;
pub mod effects;
pub mod types;
pub mod validate;

pub use api::{
    ApiConfig, GenerateRequest, HealthError, HealthResponse, HttpReply, MultipartPart,
    parse_health, summarize_effects,
};
pub use controller::{Controller, ControllerError, FileSaver, Phase, VIDEO_FILENAME};
pub use effects::{Effect, EffectSelection, EffectToggles};
pub use types::{GeneratedVideo, ImageMime, ImageSlot, SelectedFile, SlotId};
pub use validate::{MAX_IMAGE_BYTES, SelectError};
