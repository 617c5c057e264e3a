//! HTTP calls to the generation service via `window.fetch`.
//!
//! Requests are described by `product-video-core`; this module only
//! moves bytes. A non-success status is still a successful fetch: the
//! controller decides what a status means.

use product_video_core::{
    ApiConfig, GenerateRequest, HealthError, HealthResponse, HttpReply, parse_health,
    summarize_effects,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::blob::{self, BlobError};

/// Errors that prevent a request from producing a response.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A browser API call returned an error or a required object was
    /// missing. `fetch` itself rejects with a `TypeError` when the
    /// server is unreachable.
    #[error("{0}")]
    JsError(String),
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        // Prefer the JS error message over the debug rendering.
        let message = value
            .dyn_ref::<js_sys::Error>()
            .map_or_else(|| format!("{value:?}"), |e| String::from(e.message()));
        Self::JsError(message)
    }
}

impl From<BlobError> for FetchError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::JsError(msg) => Self::JsError(msg),
        }
    }
}

/// Send the multipart generate request.
///
/// # Errors
///
/// Returns [`FetchError::JsError`] if the body cannot be built or no
/// response arrives.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn post_multipart(request: &GenerateRequest) -> Result<HttpReply, FetchError> {
    let form = web_sys::FormData::new()?;
    for part in &request.parts {
        let blob = blob::bytes_to_blob(&part.bytes, part.mime)?;
        form.append_with_blob_and_filename(part.field, &blob, &part.file_name)?;
    }

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    send(&request.url, &init).await
}

/// Send a `GET` request.
///
/// # Errors
///
/// Returns [`FetchError::JsError`] if no response arrives.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn get(url: &str) -> Result<HttpReply, FetchError> {
    let init = web_sys::RequestInit::new();
    init.set_method("GET");
    send(url, &init).await
}

/// Ping the service's health endpoint.
///
/// # Errors
///
/// Returns [`HealthError::Unreachable`] if no response arrives, or the
/// error from [`parse_health`].
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn check_health(api: &ApiConfig) -> Result<HealthResponse, HealthError> {
    let reply = get(&api.health_url())
        .await
        .map_err(|e| HealthError::Unreachable(e.to_string()))?;
    parse_health(&reply)
}

/// Fetch the service's effect catalog as compact JSON.
///
/// # Errors
///
/// Returns [`HealthError::Unreachable`] if no response arrives, or the
/// error from [`summarize_effects`].
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn list_effects(api: &ApiConfig) -> Result<String, HealthError> {
    let reply = get(&api.effects_url())
        .await
        .map_err(|e| HealthError::Unreachable(e.to_string()))?;
    summarize_effects(&reply)
}

#[allow(clippy::future_not_send)]
async fn send(url: &str, init: &web_sys::RequestInit) -> Result<HttpReply, FetchError> {
    let window =
        web_sys::window().ok_or_else(|| FetchError::JsError("no global window".into()))?;
    let request = web_sys::Request::new_with_str_and_init(url, init)?;

    let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()
        .map_err(|e| FetchError::JsError(format!("fetch did not return a Response: {e:?}")))?;

    let content_type = response.headers().get("content-type")?;
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let body = js_sys::Uint8Array::new(&buffer).to_vec();

    Ok(HttpReply {
        status: response.status(),
        content_type,
        body,
    })
}
