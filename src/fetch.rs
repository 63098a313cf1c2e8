//! Loading the official progress file over `fetch`.

use crate::config::PROGRESS_DATA_URL;
use crate::{parse_progress_payload, ProgressError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, RequestMode, Response};

/// Append a `v=<now>` query parameter so freshly committed data is never
/// served from a cache.
pub fn cache_busted_url(base: &str, now_ms: u64) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}v={}", base, sep, now_ms)
}

/// Fetch the progress file once and return its raw miles value.
///
/// Single attempt, no timeout and no retry. The caller decides on the
/// fallback.
pub async fn fetch_official_miles() -> Result<f64, ProgressError> {
    let window = web_sys::window()
        .ok_or_else(|| ProgressError::Unavailable("no window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_cache(RequestCache::NoStore);

    let url = cache_busted_url(PROGRESS_DATA_URL, js_sys::Date::now() as u64);
    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| ProgressError::Unavailable(format!("{:?}", e)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ProgressError::Unavailable(format!("{:?}", e)))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| ProgressError::Unavailable("fetch did not return a Response".to_string()))?;

    if !response.ok() {
        return Err(ProgressError::Status(response.status()));
    }

    let text_promise = response
        .text()
        .map_err(|e| ProgressError::Malformed(format!("{:?}", e)))?;
    let body = JsFuture::from(text_promise)
        .await
        .map_err(|e| ProgressError::Malformed(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| ProgressError::Malformed("body is not text".to_string()))?;

    parse_progress_payload(&body)
}
