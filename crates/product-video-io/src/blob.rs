//! Blobs and object URLs for in-memory image and video bytes.
//!
//! [`ObjectUrl`] owns a `blob:` URL and revokes it when dropped, so a
//! preview that gets replaced releases the previous Blob.

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating a Blob or object URL.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for BlobError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Copy `bytes` into a new `Blob` with the given MIME type.
///
/// # Errors
///
/// Returns [`BlobError::JsError`] if `Blob` construction fails.
pub fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<web_sys::Blob, BlobError> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    Ok(web_sys::Blob::new_with_u8_array_sequence_and_options(
        &parts, &opts,
    )?)
}

/// A `blob:` URL that is revoked on drop.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Create an object URL referencing a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`BlobError::JsError`] if Blob or URL creation fails.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Result<Self, BlobError> {
        let blob = bytes_to_blob(bytes, mime_type)?;
        Ok(Self(web_sys::Url::create_object_url_with_blob(&blob)?))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        // Best-effort: the URL may already be gone with the document.
        let _ = web_sys::Url::revoke_object_url(&self.0);
    }
}
