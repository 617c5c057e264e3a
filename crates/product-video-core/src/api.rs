//! Contract with the video-generation service.
//!
//! Endpoints:
//! - `POST {base}/generate-video?effects=<url-encoded JSON>` with
//!   multipart fields `initial_image` and `final_image`. Success returns
//!   the video bytes; failure returns `{"detail": "..."}`.
//! - `GET {base}/effects`: the service's effect catalog (logged only).
//! - `GET {base}/health`: `{"service": "..."}`.
//!
//! Everything here is plain data; the transport lives in
//! `product-video-io`.

use std::rc::Rc;

use serde::Deserialize;

use crate::effects::EffectSelection;

/// Base URL used when `PRODUCT_VIDEO_API_URL` is not set at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Where the generation service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    /// Uses the `PRODUCT_VIDEO_API_URL` compile-time environment
    /// variable, or [`DEFAULT_API_URL`].
    fn default() -> Self {
        Self::new(option_env!("PRODUCT_VIDEO_API_URL").unwrap_or(DEFAULT_API_URL))
    }
}

impl ApiConfig {
    /// Create a config for the given base URL. Trailing slashes are dropped.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// URL of the generate endpoint with `effects` encoded as a query
    /// parameter.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the selection cannot be serialized.
    pub fn generate_url(&self, effects: &EffectSelection) -> Result<String, serde_json::Error> {
        let json = effects.to_json()?;
        Ok(format!(
            "{}/generate-video?effects={}",
            self.base_url,
            urlencoding::encode(&json)
        ))
    }

    #[must_use]
    pub fn effects_url(&self) -> String {
        format!("{}/effects", self.base_url)
    }

    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

/// One file field of the multipart request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub field: &'static str,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Rc<[u8]>,
}

/// A fully described generate request, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub url: String,
    /// The effect snapshot the URL was built from, kept for logging.
    pub effects: EffectSelection,
    pub parts: Vec<MultipartPart>,
}

/// A response as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpReply {
    #[must_use]
    pub const fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: None,
            body,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Message to show the user for a failed response.
    ///
    /// Prefers a string `detail` field from a JSON body; anything else
    /// yields `HTTP Error: <status>`.
    #[must_use]
    pub fn error_message(&self) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: String,
        }

        match serde_json::from_slice::<ErrorBody>(&self.body) {
            Ok(body) if !body.detail.is_empty() => body.detail,
            _ => format!("HTTP Error: {}", self.status),
        }
    }
}

/// Health endpoint payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub service: String,
}

/// Why the health check did not report a healthy service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HealthError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("backend health check returned HTTP {0}")]
    Status(u16),

    #[error("unexpected health response: {0}")]
    Malformed(String),
}

/// Interpret a health endpoint reply.
///
/// # Errors
///
/// Returns [`HealthError::Status`] for a non-2xx reply and
/// [`HealthError::Malformed`] when the body is not `{"service": ...}`.
pub fn parse_health(reply: &HttpReply) -> Result<HealthResponse, HealthError> {
    if !reply.is_success() {
        return Err(HealthError::Status(reply.status));
    }
    serde_json::from_slice(&reply.body).map_err(|e| HealthError::Malformed(e.to_string()))
}

/// Summarize an effects catalog reply for the console.
///
/// The catalog's shape is owned by the service, so it is only parsed as
/// generic JSON.
///
/// # Errors
///
/// Returns [`HealthError::Status`] for a non-2xx reply and
/// [`HealthError::Malformed`] when the body is not JSON.
pub fn summarize_effects(reply: &HttpReply) -> Result<String, HealthError> {
    if !reply.is_success() {
        return Err(HealthError::Status(reply.status));
    }
    let value: serde_json::Value =
        serde_json::from_slice(&reply.body).map_err(|e| HealthError::Malformed(e.to_string()))?;
    Ok(value.to_string())
}
