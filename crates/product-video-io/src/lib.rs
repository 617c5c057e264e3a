//! product-video-io: Browser I/O and Dioxus component library.
//!
//! Handles file uploads, object URLs for previews, `fetch` calls to the
//! generation service, Blob downloads and console logging, and provides
//! the UI components of the product-video web application.

pub mod blob;
pub mod components;
pub mod console;
pub mod download;
pub mod fetch;

pub use blob::ObjectUrl;
pub use components::{
    Connectivity, EffectsPanel, GenerateButton, HealthBadge, ImageSlotUpload, VideoPanel,
};
pub use download::BrowserSaver;
