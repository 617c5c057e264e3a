//! Dioxus UI components for product-video.
//!
//! Provides the per-slot upload zones, the effects checkbox panel, the
//! generate button with progress, the video preview/download panel,
//! and the backend health badge.

mod effects;
mod generate;
mod health;
mod upload;
mod video;

pub use effects::EffectsPanel;
pub use generate::GenerateButton;
pub use health::{Connectivity, HealthBadge};
pub use upload::ImageSlotUpload;
pub use video::VideoPanel;
