//! Core data types: image slots, accepted image formats, and the
//! generated video.

use std::fmt;
use std::rc::Rc;

/// One of the two image upload positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    /// The start frame of the video.
    Initial,
    /// The end frame of the video.
    Final,
}

impl SlotId {
    /// Both slots in display order.
    pub const ALL: [Self; 2] = [Self::Initial, Self::Final];

    /// Multipart form field name the service expects for this slot.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Initial => "initial_image",
            Self::Final => "final_image",
        }
    }

    /// Human-readable label for the upload zone.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initial => "Start frame",
            Self::Final => "End frame",
        }
    }

    /// Stable identifier for DOM element ids.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Final => "final",
        }
    }

    /// Position of the slot in per-slot arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Initial => 0,
            Self::Final => 1,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMime {
    Jpeg,
    Png,
}

impl ImageMime {
    /// Parse a browser-reported MIME type.
    ///
    /// Parameters after `;` are ignored and matching is
    /// case-insensitive. `image/jpg` is accepted as an alias some
    /// platforms report for JPEG files.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("image/jpeg") || essence.eq_ignore_ascii_case("image/jpg")
        {
            Some(Self::Jpeg)
        } else if essence.eq_ignore_ascii_case("image/png") {
            Some(Self::Png)
        } else {
            None
        }
    }

    /// Infer the format from a filename extension.
    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else if ext.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else {
            None
        }
    }

    /// Canonical MIME type string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Map a format detected by the `image` crate to an accepted type.
    #[must_use]
    pub const fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file as handed over by the file picker or a drop event, before
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Filename as reported by the browser.
    pub name: String,
    /// MIME type as reported by the browser. Empty when unknown.
    pub mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }
}

/// A validated image held in one of the two slots.
///
/// Bytes are reference-counted so a request body and the preview can
/// share them without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    pub name: String,
    pub mime: ImageMime,
    pub bytes: Rc<[u8]>,
}

/// The video returned by the last successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVideo {
    pub bytes: Rc<[u8]>,
    /// MIME type from the response `Content-Type`, `video/mp4` when absent.
    pub mime: String,
    /// Increases with every successful generation so views can tell a
    /// replacement video from the one they already display.
    pub revision: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_parsing_ignores_parameters_and_case() {
        assert_eq!(ImageMime::from_mime("image/png"), Some(ImageMime::Png));
        assert_eq!(ImageMime::from_mime("IMAGE/JPEG"), Some(ImageMime::Jpeg));
        assert_eq!(
            ImageMime::from_mime("image/jpeg; charset=binary"),
            Some(ImageMime::Jpeg)
        );
        assert_eq!(ImageMime::from_mime("image/jpg"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::from_mime("image/gif"), None);
        assert_eq!(ImageMime::from_mime(""), None);
    }

    #[test]
    fn mime_from_filename_uses_extension() {
        assert_eq!(ImageMime::from_filename("a.JPG"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::from_filename("a.b.jpeg"), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::from_filename("shot.png"), Some(ImageMime::Png));
        assert_eq!(ImageMime::from_filename("shot.webp"), None);
        assert_eq!(ImageMime::from_filename("png"), None);
    }

    #[test]
    fn slot_field_names_match_service_contract() {
        assert_eq!(SlotId::Initial.field_name(), "initial_image");
        assert_eq!(SlotId::Final.field_name(), "final_image");
        assert_ne!(SlotId::Initial.index(), SlotId::Final.index());
    }

    #[test]
    fn only_jpeg_and_png_formats_map_to_accepted_types() {
        assert_eq!(
            ImageMime::from_image_format(image::ImageFormat::Jpeg),
            Some(ImageMime::Jpeg)
        );
        assert_eq!(
            ImageMime::from_image_format(image::ImageFormat::Png),
            Some(ImageMime::Png)
        );
        assert_eq!(ImageMime::from_image_format(image::ImageFormat::Gif), None);
    }
}
