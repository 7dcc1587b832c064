//! Minimal HTTP response model.
//!
//! This struct represents a **fully buffered** HTTP response returned by the
//! transport layer. The tracker does not parse response bodies; the endpoint
//! typically answers a hit with an empty `204` or a tiny acknowledgement, so
//! the raw bytes are kept for callers that want to inspect them.
//!
//! ## Notes
//! - `headers` is an `http::HeaderMap`, which is **case-insensitive** for
//!   header names.
//! - `status_text` is derived from the status code's canonical reason phrase
//!   and may be `"Unknown"` for non-standard codes.

use http::HeaderMap;

/// Simple structure for HTTP responses, as received and without any
/// transformation.
#[derive(Debug)]
pub struct Response {
    /// Final URL of the response (after redirects, if any).
    pub url: url::Url,

    /// Numeric HTTP status code (e.g., `200`, `404`).
    pub status: u16,

    /// Human-readable reason phrase (e.g., `"OK"`, `"Not Found"`).
    pub status_text: String,

    /// Response headers as a case-insensitive map.
    pub headers: HeaderMap,

    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
