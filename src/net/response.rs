//! Buffered HTTP response model.
//!
//! A [`Response`] is the outcome of dispatching one request against one
//! server. It holds the method and resolved URL of the request that produced
//! it, the status code, the response headers and the raw body bytes.
//!
//! ## Notes
//! - The body is stored as raw `Vec<u8>`. For JSON, parse with
//!   `serde_json::from_slice::<T>(&resp.body)`.
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names and keeps every value of a repeated header in order.
//! - `request` is always set by the dispatcher. A response without one is
//!   rejected by every congruence check.
//!
use http::HeaderMap;

use crate::net::RequestInfo;

/// Simple structure for HTTP responses.
#[derive(Debug, Clone)]
pub struct Response {
    /// Request that produced this response.
    pub request: Option<RequestInfo>,

    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,

    /// Response headers as a case-insensitive map.
    pub headers: HeaderMap,

    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(request: RequestInfo, status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            request: Some(request),
            status,
            headers,
            body,
        }
    }
}
