//! Pipeline outcomes and how each one is written back to the client.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use hoard_core::constants::{CACHE_HIT, CACHE_MISS, CACHE_STATUS_HEADER, HTML_CONTENT_TYPE};
use hoard_core::types::UpstreamResponse;

/// Classified result of one pass through the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProxyOutcome {
    /// The store held a body for the key.
    Hit {
        /// Stored body, verbatim
        body: String,
    },
    /// The origin answered 2xx and the body was stored.
    Miss(UpstreamResponse),
    /// The origin answered with a non-2xx status. Nothing was stored.
    UpstreamError {
        /// Status returned by the origin
        status: StatusCode,
    },
}

impl ProxyOutcome {
    /// Value of the `x-cache` header for this outcome, if any.
    pub fn cache_status(&self) -> Option<&'static str> {
        match self {
            ProxyOutcome::Hit { .. } => Some(CACHE_HIT),
            ProxyOutcome::Miss(_) => Some(CACHE_MISS),
            ProxyOutcome::UpstreamError { .. } => None,
        }
    }
}

/// Static page returned for non-2xx origin responses. The origin's own error
/// body is never forwarded.
pub(crate) fn error_page(status: StatusCode) -> String {
    let code = status.as_u16();
    format!(
        "<html>\n  <head>\n    <title>Error</title>\n  </head>\n  <body>\n    \
         <h1>Error {code}</h1>\n    \
         <p>There was an error fetching the requested resource.</p>\n  \
         </body>\n</html>\n"
    )
}

impl IntoResponse for ProxyOutcome {
    fn into_response(self) -> Response {
        let cache_status = self.cache_status();

        let (status, content_type, body) = match self {
            // Content type is not stored with the body, so hits are always HTML.
            ProxyOutcome::Hit { body } => (
                StatusCode::OK,
                Some(HeaderValue::from_static(HTML_CONTENT_TYPE)),
                body,
            ),
            ProxyOutcome::Miss(upstream) => {
                let status =
                    StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::OK);
                let content_type = upstream
                    .content_type
                    .as_deref()
                    .and_then(|ct| HeaderValue::from_str(ct).ok());
                (status, content_type, upstream.body)
            }
            ProxyOutcome::UpstreamError { status } => (
                status,
                Some(HeaderValue::from_static(HTML_CONTENT_TYPE)),
                error_page(status),
            ),
        };

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        if let Some(content_type) = content_type {
            headers.insert(header::CONTENT_TYPE, content_type);
        }
        if let Some(cache_status) = cache_status {
            headers.insert(CACHE_STATUS_HEADER, HeaderValue::from_static(cache_status));
        }

        response
    }
}
