//! Request handlers, organized by protocol.

pub mod http;
pub mod stream;
pub mod websocket;

use axum::http::{HeaderMap, header};

/// Extract a bearer token from the Authorization header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
