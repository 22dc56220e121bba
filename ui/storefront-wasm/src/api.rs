//! HTTP client.
//!
//! Wraps `fetch` for same-origin requests to the storefront server. Cookies
//! ride along so session-bound endpoints (cart, wishlist) see the shopper.

use crate::dom;
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response};

/// Header Django's `request.headers.get("x-requested-with")` checks for.
pub const AJAX_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not build request: {0}")]
    Request(String),
    #[error("fetch error: {0}")]
    Network(String),
    #[error("HTTP {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("could not read response body: {0}")]
    Body(String),
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

fn describe(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Perform a request and return the body text of a 2xx response.
pub async fn send(url: &str, method: &str, headers: &[(&str, &str)]) -> Result<String, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_credentials(RequestCredentials::SameOrigin);

    let hdrs = Headers::new().map_err(|e| ApiError::Request(describe(e)))?;
    for (name, value) in headers {
        hdrs.set(name, value)
            .map_err(|e| ApiError::Request(describe(e)))?;
    }
    opts.set_headers(&hdrs);

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|e| ApiError::Request(describe(e)))?;

    let window = dom::window().ok_or_else(|| ApiError::Network("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(describe(e)))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Network("response is not a Response".into()))?;

    if !resp.ok() {
        return Err(ApiError::Status {
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }

    let text = JsFuture::from(resp.text().map_err(|e| ApiError::Body(describe(e)))?)
        .await
        .map_err(|e| ApiError::Body(describe(e)))?;

    Ok(text.as_string().unwrap_or_default())
}

/// GET `url` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let body = send(url, "GET", &[]).await?;
    Ok(serde_json::from_str(&body)?)
}

/// POST (no body) to `url` with extra headers and decode the JSON reply.
pub async fn post_json<T: DeserializeOwned>(
    url: &str,
    headers: &[(&str, &str)],
) -> Result<T, ApiError> {
    let body = send(url, "POST", headers).await?;
    Ok(serde_json::from_str(&body)?)
}

/// GET an HTML fragment.
pub async fn get_html(url: &str) -> Result<String, ApiError> {
    send(url, "GET", &[AJAX_HEADER]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reads_like_http() {
        let err = ApiError::Status {
            status: 404,
            status_text: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }

    #[test]
    fn decode_errors_convert() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
