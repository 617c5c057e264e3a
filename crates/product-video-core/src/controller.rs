//! The upload-and-generate controller.
//!
//! [`Controller`] owns the two image slots, the effect checkboxes, the
//! generated video and the single in-flight request guard. It performs
//! no I/O: a generate action is split into [`Controller::begin_generate`],
//! which hands back a [`GenerateRequest`] for the transport, and
//! [`Controller::finish_generate`], which consumes the transport outcome.
//!
//! Every operation that fails also records its message in
//! [`Controller::error`] so the view can show it inline.

use std::fmt;
use std::rc::Rc;

use crate::api::{ApiConfig, GenerateRequest, HttpReply, MultipartPart};
use crate::effects::{Effect, EffectSelection, EffectToggles};
use crate::types::{GeneratedVideo, ImageSlot, SelectedFile, SlotId};
use crate::validate::{self, SelectError};

/// Filename the downloaded video is saved under.
pub const VIDEO_FILENAME: &str = "product_video_3d.mp4";

/// MIME type assumed for the video when the response does not say.
const DEFAULT_VIDEO_MIME: &str = "video/mp4";

/// Where the user is in the upload → generate → download flow.
///
/// Derived from the controller's fields rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No image selected yet.
    Idle,
    /// One of the two slots is filled.
    Selecting,
    /// Both slots are filled and nothing is in flight.
    ReadyToGenerate,
    /// A generate request is in flight.
    Generating,
    /// A video is available for preview and download.
    ReadyToDownload,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Selecting => "selecting",
            Self::ReadyToGenerate => "ready to generate",
            Self::Generating => "generating",
            Self::ReadyToDownload => "ready to download",
        })
    }
}

/// Errors reported by controller operations.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Select(#[from] SelectError),

    #[error("Please upload both images")]
    MissingImages,

    #[error("A video is already being generated")]
    AlreadyGenerating,

    #[error("No generation in progress")]
    NotGenerating,

    #[error("Failed to encode effects: {0}")]
    Encode(String),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    #[error("No video available to download")]
    NoVideo,

    #[error("Download failed: {0}")]
    Save(String),
}

/// Destination for a downloaded file.
///
/// The browser implementation clicks a temporary anchor; tests record
/// the call.
pub trait FileSaver {
    /// Save `bytes` under `filename`.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason if the save could not be started.
    fn save(&mut self, filename: &str, mime: &str, bytes: &[u8]) -> Result<(), String>;
}

/// State of one page session.
#[derive(Debug, Clone)]
pub struct Controller {
    api: ApiConfig,
    slots: [Option<ImageSlot>; 2],
    effects: EffectToggles,
    video: Option<GeneratedVideo>,
    in_flight: bool,
    revision: u64,
    error: Option<String>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

impl Controller {
    #[must_use]
    pub fn new(api: ApiConfig) -> Self {
        Self {
            api,
            slots: [None, None],
            effects: EffectToggles::default(),
            video: None,
            in_flight: false,
            revision: 0,
            error: None,
        }
    }

    #[must_use]
    pub const fn api(&self) -> &ApiConfig {
        &self.api
    }

    // --- Queries ---

    #[must_use]
    pub const fn slot(&self, slot: SlotId) -> Option<&ImageSlot> {
        self.slots[slot.index()].as_ref()
    }

    #[must_use]
    pub const fn video(&self) -> Option<&GeneratedVideo> {
        self.video.as_ref()
    }

    /// The message of the most recent failure, until cleared.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_generating(&self) -> bool {
        self.in_flight
    }

    /// Whether the generate control should be enabled.
    #[must_use]
    pub const fn can_generate(&self) -> bool {
        self.slots[0].is_some() && self.slots[1].is_some() && !self.in_flight
    }

    /// Whether the download control should be visible.
    #[must_use]
    pub const fn can_download(&self) -> bool {
        self.video.is_some()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.in_flight {
            return Phase::Generating;
        }
        let filled = self.slots.iter().filter(|s| s.is_some()).count();
        match (filled, self.video.is_some()) {
            (0, _) => Phase::Idle,
            (1, _) => Phase::Selecting,
            (_, true) => Phase::ReadyToDownload,
            (_, false) => Phase::ReadyToGenerate,
        }
    }

    // --- Selection ---

    /// Validate `file` and store it in `slot`.
    ///
    /// On failure the slot keeps its previous content.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Select`] if validation fails.
    pub fn select_image(&mut self, slot: SlotId, file: SelectedFile) -> Result<(), ControllerError> {
        match validate::validate(file) {
            Ok(image) => {
                self.slots[slot.index()] = Some(image);
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Entry point for drop events: selects the first dropped file.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NoFile`] for an empty list, otherwise as
    /// [`select_image`](Self::select_image).
    pub fn drag_and_drop(
        &mut self,
        slot: SlotId,
        files: Vec<SelectedFile>,
    ) -> Result<(), ControllerError> {
        match files.into_iter().next() {
            Some(file) => self.select_image(slot, file),
            None => Err(self.fail(SelectError::NoFile.into())),
        }
    }

    /// Record a failure that happened before a file reached the
    /// controller (e.g. the browser could not read it).
    pub fn reject_selection(&mut self, err: SelectError) -> ControllerError {
        self.fail(err.into())
    }

    // --- Effects ---

    /// Current checkbox states, for rendering.
    #[must_use]
    pub const fn effect_toggles(&self) -> EffectToggles {
        self.effects
    }

    #[must_use]
    pub const fn effect_enabled(&self, effect: Effect) -> bool {
        self.effects.is_enabled(effect)
    }

    pub const fn set_effect(&mut self, effect: Effect, enabled: bool) {
        self.effects.set(effect, enabled);
    }

    /// Snapshot the current checkbox states.
    #[must_use]
    pub fn collect_effects(&self) -> EffectSelection {
        self.effects.collect()
    }

    // --- Generation ---

    /// Start a generate action.
    ///
    /// Marks a request in flight and returns the request to send. The
    /// caller must report the outcome through
    /// [`finish_generate`](Self::finish_generate).
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::MissingImages`] unless both slots are
    /// filled, [`ControllerError::AlreadyGenerating`] while a request is
    /// in flight, and [`ControllerError::Encode`] if the effects cannot
    /// be serialized.
    pub fn begin_generate(&mut self) -> Result<GenerateRequest, ControllerError> {
        if self.in_flight {
            return Err(self.fail(ControllerError::AlreadyGenerating));
        }
        let parts: Option<Vec<MultipartPart>> = SlotId::ALL
            .into_iter()
            .map(|slot| {
                self.slot(slot).map(|image| MultipartPart {
                    field: slot.field_name(),
                    file_name: image.name.clone(),
                    mime: image.mime.as_str(),
                    bytes: Rc::clone(&image.bytes),
                })
            })
            .collect();
        let Some(parts) = parts else {
            return Err(self.fail(ControllerError::MissingImages));
        };

        let effects = self.collect_effects();
        let url = match self.api.generate_url(&effects) {
            Ok(url) => url,
            Err(e) => return Err(self.fail(ControllerError::Encode(e.to_string()))),
        };

        self.in_flight = true;
        self.error = None;
        Ok(GenerateRequest {
            url,
            effects,
            parts,
        })
    }

    /// Complete the in-flight generate action.
    ///
    /// `outcome` is the transport result: a reply, or the reason no
    /// reply arrived. On success the returned video replaces any
    /// previous one; on failure the previous video and previews stay.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotGenerating`] if nothing is in
    /// flight, [`ControllerError::Network`] for a transport failure and
    /// [`ControllerError::Http`] for a non-success status.
    pub fn finish_generate(
        &mut self,
        outcome: Result<HttpReply, String>,
    ) -> Result<&GeneratedVideo, ControllerError> {
        if !self.in_flight {
            return Err(self.fail(ControllerError::NotGenerating));
        }
        self.in_flight = false;

        let reply = match outcome {
            Ok(reply) => reply,
            Err(reason) => return Err(self.fail(ControllerError::Network(reason))),
        };

        if !reply.is_success() {
            let message = reply.error_message();
            return Err(self.fail(ControllerError::Http {
                status: reply.status,
                message,
            }));
        }

        self.revision += 1;
        self.error = None;
        let mime = reply
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VIDEO_MIME.to_owned());
        Ok(self.video.insert(GeneratedVideo {
            bytes: Rc::from(reply.body),
            mime,
            revision: self.revision,
        }))
    }

    // --- Download ---

    /// Save the generated video as [`VIDEO_FILENAME`].
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NoVideo`] without touching `saver` when
    /// no video has been generated, or [`ControllerError::Save`] if the
    /// saver fails.
    pub fn download(&mut self, saver: &mut impl FileSaver) -> Result<(), ControllerError> {
        let Some(video) = &self.video else {
            return Err(self.fail(ControllerError::NoVideo));
        };
        match saver.save(VIDEO_FILENAME, &video.mime, &video.bytes) {
            Ok(()) => Ok(()),
            Err(reason) => Err(self.fail(ControllerError::Save(reason))),
        }
    }

    /// Hide the current error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn fail(&mut self, err: ControllerError) -> ControllerError {
        self.error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::validate::fixtures::{jpeg_bytes, png_bytes};

    fn png(name: &str) -> SelectedFile {
        SelectedFile::new(name, "image/png", png_bytes())
    }

    fn ready() -> Controller {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        c.select_image(SlotId::Initial, png("start.png")).unwrap();
        c.select_image(
            SlotId::Final,
            SelectedFile::new("end.jpg", "image/jpeg", jpeg_bytes()),
        )
        .unwrap();
        c
    }

    #[test]
    fn phases_follow_slot_filling() {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        assert_eq!(c.phase(), Phase::Idle);
        c.select_image(SlotId::Final, png("end.png")).unwrap();
        assert_eq!(c.phase(), Phase::Selecting);
        assert!(!c.can_generate());
        c.select_image(SlotId::Initial, png("start.png")).unwrap();
        assert_eq!(c.phase(), Phase::ReadyToGenerate);
        assert!(c.can_generate());
    }

    #[test]
    fn rejected_selection_keeps_previous_slot() {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        c.select_image(SlotId::Initial, png("start.png")).unwrap();

        let err = c.select_image(
            SlotId::Initial,
            SelectedFile::new("anim.gif", "image/gif", b"GIF89a".to_vec()),
        );
        assert!(matches!(
            err,
            Err(ControllerError::Select(SelectError::UnsupportedType { .. }))
        ));
        assert_eq!(c.slot(SlotId::Initial).unwrap().name, "start.png");
        assert!(c.error().is_some_and(|m| m.contains("anim.gif")));
    }

    #[test]
    fn successful_selection_clears_error() {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        let _ = c.select_image(SlotId::Initial, SelectedFile::new("a.gif", "image/gif", vec![1]));
        assert!(c.error().is_some());
        c.select_image(SlotId::Initial, png("a.png")).unwrap();
        assert_eq!(c.error(), None);
    }

    #[test]
    fn reselection_replaces_slot() {
        let mut c = ready();
        c.select_image(SlotId::Initial, png("other.png")).unwrap();
        assert_eq!(c.slot(SlotId::Initial).unwrap().name, "other.png");
    }

    #[test]
    fn drop_uses_first_file() {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        c.drag_and_drop(SlotId::Initial, vec![png("first.png"), png("second.png")])
            .unwrap();
        assert_eq!(c.slot(SlotId::Initial).unwrap().name, "first.png");
    }

    #[test]
    fn empty_drop_is_an_error() {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        let err = c.drag_and_drop(SlotId::Final, Vec::new());
        assert_eq!(err, Err(ControllerError::Select(SelectError::NoFile)));
        assert_eq!(c.error(), Some("No file selected"));
        assert!(c.slot(SlotId::Final).is_none());
    }

    #[test]
    fn generate_requires_both_slots() {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        c.select_image(SlotId::Initial, png("start.png")).unwrap();
        assert_eq!(c.begin_generate(), Err(ControllerError::MissingImages));
        assert_eq!(c.error(), Some("Please upload both images"));
        assert!(!c.is_generating());
    }

    #[test]
    fn begin_generate_builds_multipart_request() {
        let mut c = ready();
        c.set_effect(Effect::Rotation, true);
        let req = c.begin_generate().unwrap();

        assert!(req.url.starts_with("http://test/generate-video?effects="));
        assert!(req.effects.is_enabled("rotation"));
        assert_eq!(req.parts.len(), 2);
        assert_eq!(req.parts[0].field, "initial_image");
        assert_eq!(req.parts[0].file_name, "start.png");
        assert_eq!(req.parts[0].mime, "image/png");
        assert_eq!(req.parts[1].field, "final_image");
        assert_eq!(req.parts[1].mime, "image/jpeg");
        assert_eq!(&*req.parts[1].bytes, jpeg_bytes().as_slice());
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut c = ready();
        c.begin_generate().unwrap();
        assert_eq!(c.phase(), Phase::Generating);
        assert!(!c.can_generate());
        assert_eq!(c.begin_generate(), Err(ControllerError::AlreadyGenerating));
        // The rejected second attempt must not end the first one.
        assert!(c.is_generating());
    }

    #[test]
    fn finish_without_begin_is_rejected() {
        let mut c = ready();
        let err = c.finish_generate(Ok(HttpReply::new(200, vec![1]))).unwrap_err();
        assert_eq!(err, ControllerError::NotGenerating);
        assert!(c.video().is_none());
    }

    #[test]
    fn success_stores_video_and_enables_download() {
        let mut c = ready();
        c.begin_generate().unwrap();
        let reply = HttpReply::new(200, vec![0, 0, 0, 0x18]).with_content_type("video/mp4");
        let video = c.finish_generate(Ok(reply)).unwrap();
        assert_eq!(video.revision, 1);
        assert_eq!(video.mime, "video/mp4");
        assert_eq!(c.phase(), Phase::ReadyToDownload);
        assert!(c.can_download());
        assert!(c.can_generate());
    }

    #[test]
    fn missing_content_type_defaults_to_mp4() {
        let mut c = ready();
        c.begin_generate().unwrap();
        let video = c.finish_generate(Ok(HttpReply::new(200, vec![1]))).unwrap();
        assert_eq!(video.mime, "video/mp4");
    }

    #[test]
    fn server_detail_is_shown() {
        let mut c = ready();
        c.begin_generate().unwrap();
        let reply = HttpReply::new(500, br#"{"detail":"server error"}"#.to_vec());
        let err = c.finish_generate(Ok(reply)).unwrap_err();
        assert_eq!(err.to_string(), "server error");
        assert_eq!(c.error(), Some("server error"));
        assert_eq!(c.phase(), Phase::ReadyToGenerate);
    }

    #[test]
    fn unparsable_error_body_shows_status() {
        let mut c = ready();
        c.begin_generate().unwrap();
        let err = c
            .finish_generate(Ok(HttpReply::new(500, b"oops".to_vec())))
            .unwrap_err();
        assert_eq!(
            err,
            ControllerError::Http {
                status: 500,
                message: "HTTP Error: 500".into()
            }
        );
        assert_eq!(c.error(), Some("HTTP Error: 500"));
    }

    #[test]
    fn network_failure_reenables_generate() {
        let mut c = ready();
        c.begin_generate().unwrap();
        let err = c.finish_generate(Err("Failed to fetch".into())).unwrap_err();
        assert_eq!(err.to_string(), "Network error: Failed to fetch");
        assert!(c.can_generate());
        assert!(c.slot(SlotId::Initial).is_some());
    }

    #[test]
    fn dismiss_error_clears_message() {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        let _ = c.begin_generate();
        assert!(c.error().is_some());
        c.dismiss_error();
        assert_eq!(c.error(), None);
    }

    #[test]
    fn reject_selection_records_read_failures() {
        let mut c = Controller::new(ApiConfig::new("http://test"));
        let err = c.reject_selection(SelectError::Read("NotReadableError".into()));
        assert_eq!(err.to_string(), "Failed to read file: NotReadableError");
        assert_eq!(c.error(), Some("Failed to read file: NotReadableError"));
    }
}
