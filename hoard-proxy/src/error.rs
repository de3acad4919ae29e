//! Request failure handling.
//!
//! Store outages, unreachable origins and every other pipeline error reach
//! the client as the same bare 500. The error kind is only visible in logs.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use hoard_core::constants::{INTERNAL_ERROR_BODY, PLAIN_CONTENT_TYPE};
use hoard_core::error::HoardError;

/// Failure while handling one proxied request.
#[derive(Debug)]
pub struct ProxyError {
    source: HoardError,
}

impl ProxyError {
    /// The underlying pipeline error.
    pub fn inner(&self) -> &HoardError {
        &self.source
    }

    /// Consumes the wrapper, returning the pipeline error.
    pub fn into_inner(self) -> HoardError {
        self.source
    }
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.source, f)
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<HoardError> for ProxyError {
    fn from(source: HoardError) -> Self {
        Self { source }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.source.kind(), error = %self.source, "Request failed");

        let mut response = Response::new(Body::from(INTERNAL_ERROR_BODY));
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(PLAIN_CONTENT_TYPE),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_upstream_errors_collapse_to_same_response() {
        let errors = [
            HoardError::StoreUnavailable("connection refused".into()),
            HoardError::UpstreamUnreachable {
                url: "http://origin.test/".into(),
                reason: "dns".into(),
            },
            HoardError::InvalidUpstreamStatus(1000),
        ];

        for err in errors {
            let response = ProxyError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                response.headers().get("content-type").unwrap().to_str().unwrap(),
                "text/plain"
            );
            assert!(response.headers().get("x-cache").is_none());
        }
    }

    #[test]
    fn test_source_is_preserved() {
        let err = ProxyError::from(HoardError::StoreCommand("READONLY".into()));
        assert!(err.inner().is_store_error());
        assert!(err.to_string().contains("READONLY"));
    }
}
