//! Upstream origin responses.

use serde::{Deserialize, Serialize};

/// A fully read response from the origin.
///
/// Lives for a single request. Only the body survives, and only when the
/// status is a success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamResponse {
    /// HTTP status code returned by the origin
    pub status: u16,
    /// `Content-Type` header, if the origin sent a readable one
    pub content_type: Option<String>,
    /// Body decoded as text
    pub body: String,
}

impl UpstreamResponse {
    /// Creates a new upstream response.
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// Returns true for any 2xx status. Only these responses are cached.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}
