//! Same-origin proxy to the backend API.
//!
//! `/api/pina/*` and `/pina/*` are both forwarded to
//! `{backend_url}/api/pina/*` with method, headers, query and body intact.
//! The tail is taken from the raw request path, so percent-escapes such as
//! `%2F` and `%3F` reach the backend unchanged.
//! Backend responses, including `Set-Cookie` and OAuth redirects, are handed
//! back unchanged so backend cookies land on this origin.

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{CONNECTION, CONTENT_LENGTH, HOST, TRANSFER_ENCODING};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::API_PREFIX;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
/// Older mount point of the same API.
const LEGACY_PREFIX: &str = "/pina";

/// Still-encoded path below whichever prefix the request came in on.
fn raw_tail(path: &str) -> &str {
    path.strip_prefix(API_PREFIX)
        .or_else(|| path.strip_prefix(LEGACY_PREFIX))
        .unwrap_or(path)
}

/// Backend URL for a proxied tail path and optional query string.
#[must_use]
pub fn target_url(backend_url: &str, tail: &str, query: Option<&str>) -> String {
    let mut url = format!("{backend_url}{API_PREFIX}/{}", tail.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// Drop headers that describe the hop rather than the message.
fn strip_hop_headers(headers: &mut HeaderMap) {
    for name in [HOST, CONNECTION, CONTENT_LENGTH, TRANSFER_ENCODING] {
        headers.remove(name);
    }
}

pub async fn forward(State(state): State<AppState>, req: Request) -> Response {
    let target = target_url(&state.config.backend_url, raw_tail(req.uri().path()), req.uri().query());
    let (parts, body) = req.into_parts();

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, %target, "proxy request body rejected");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let mut headers = parts.headers;
    strip_hop_headers(&mut headers);

    let upstream = match state.http.request(parts.method.clone(), &target).headers(headers).body(body).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, %target, "backend unreachable");
            return (StatusCode::BAD_GATEWAY, "backend unavailable").into_response();
        }
    };

    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_headers(&mut headers);
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, %target, "backend response body failed");
            return StatusCode::BAD_GATEWAY.into_response();
        }
    };
    tracing::debug!(method = %parts.method, %target, status = status.as_u16(), "proxied");

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
