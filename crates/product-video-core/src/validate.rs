//! Client-side validation of selected image files.
//!
//! Checks run in a fixed order: size, declared type, then content.
//! Size comes first so an oversize file is rejected with the same
//! error whether or not its type is acceptable.

use std::rc::Rc;

use crate::types::{ImageMime, ImageSlot, SelectedFile};

/// Largest accepted upload, in bytes (10 MiB).
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Reasons a selected file is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// The event carried no file.
    #[error("No file selected")]
    NoFile,

    /// The file exceeds [`MAX_IMAGE_BYTES`].
    #[error("File is too large ({size} bytes). Maximum size is 10MB")]
    TooLarge { size: usize },

    /// The declared type is not JPEG or PNG.
    #[error("Unsupported file type: {name}. Please select a JPEG or PNG image")]
    UnsupportedType { name: String },

    /// The file has no content.
    #[error("File is empty: {name}")]
    Empty { name: String },

    /// The bytes are neither JPEG nor PNG despite the declared type.
    #[error("File content is not a JPEG or PNG image ({mime}): {name}")]
    ContentMismatch { name: String, mime: ImageMime },

    /// The browser failed to read the file.
    #[error("Failed to read file: {0}")]
    Read(String),
}

/// Reject files over the size limit.
///
/// Exposed separately so callers can refuse a file from its reported
/// size before reading its bytes.
///
/// # Errors
///
/// Returns [`SelectError::TooLarge`] if `size` exceeds [`MAX_IMAGE_BYTES`].
pub const fn check_size(size: usize) -> Result<(), SelectError> {
    if size > MAX_IMAGE_BYTES {
        Err(SelectError::TooLarge { size })
    } else {
        Ok(())
    }
}

/// Resolve the accepted image type of a file.
///
/// Uses the browser-reported MIME type; falls back to the filename
/// extension only when the browser reported none.
///
/// # Errors
///
/// Returns [`SelectError::UnsupportedType`] for anything but JPEG/PNG.
pub fn resolve_mime(name: &str, mime: &str) -> Result<ImageMime, SelectError> {
    let resolved = if mime.trim().is_empty() {
        ImageMime::from_filename(name)
    } else {
        ImageMime::from_mime(mime)
    };
    resolved.ok_or_else(|| SelectError::UnsupportedType {
        name: name.to_owned(),
    })
}

/// Validate a selected file and turn it into an [`ImageSlot`].
///
/// The stored type is the one detected from the content, so a JPEG
/// saved under a `.png` name is accepted and uploaded as `image/jpeg`.
///
/// # Errors
///
/// Returns [`SelectError::TooLarge`], [`SelectError::UnsupportedType`],
/// [`SelectError::Empty`] or [`SelectError::ContentMismatch`], checked
/// in that order.
pub fn validate(file: SelectedFile) -> Result<ImageSlot, SelectError> {
    check_size(file.bytes.len())?;
    let mime = resolve_mime(&file.name, &file.mime)?;

    if file.bytes.is_empty() {
        return Err(SelectError::Empty { name: file.name });
    }

    let Some(detected) = image::guess_format(&file.bytes)
        .ok()
        .and_then(ImageMime::from_image_format)
    else {
        return Err(SelectError::ContentMismatch {
            name: file.name,
            mime,
        });
    };

    Ok(ImageSlot {
        name: file.name,
        mime: detected,
        bytes: Rc::from(file.bytes),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Smallest prefix `image::guess_format` recognises as PNG.
    pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
    /// JPEG SOI marker followed by an APP0 marker.
    pub const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];

    pub fn png_bytes() -> Vec<u8> {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(&[0; 32]);
        bytes
    }

    pub fn jpeg_bytes() -> Vec<u8> {
        let mut bytes = JPEG_MAGIC.to_vec();
        bytes.extend_from_slice(&[0; 32]);
        bytes
    }
}
