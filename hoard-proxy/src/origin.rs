//! Upstream origin client.
//!
//! Every fetch is a GET, whatever method the inbound request used.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

use hoard_core::error::{HoardError, Result};
use hoard_core::traits::Origin;
use hoard_core::types::{CacheKey, UpstreamResponse};

use crate::state::ProxyConfig;

/// HTTP origin reached through a pooled `reqwest` client.
pub struct HttpOrigin {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpOrigin {
    /// Creates a client for the origin named in `config`.
    ///
    /// No request deadline is set unless `upstream_timeout_seconds` is.
    pub fn new(config: &ProxyConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.upstream_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http_client = builder
            .build()
            .map_err(|e| HoardError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.origin.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl Origin for HttpOrigin {
    #[instrument(skip(self))]
    async fn fetch(&self, path_and_query: &str) -> Result<UpstreamResponse> {
        let url = CacheKey::new(path_and_query).upstream_url(&self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                HoardError::UpstreamTimeout { url: url.clone() }
            } else {
                HoardError::UpstreamBody(e.to_string())
            }
        })?;

        debug!(status, bytes = body.len(), "Fetched from origin");
        Ok(UpstreamResponse::new(status, content_type, body))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn request_error(url: &str, err: reqwest::Error) -> HoardError {
    if err.is_timeout() {
        HoardError::UpstreamTimeout { url: url.to_owned() }
    } else {
        HoardError::UpstreamUnreachable {
            url: url.to_owned(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn origin_for(base: &str) -> HttpOrigin {
        HttpOrigin::new(&ProxyConfig::new(base)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foo"))
            .and(query_param("x", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("hello", "text/plain"))
            .expect(1)
            .mount(&server)
            .await;

        let response = origin_for(&server.uri()).fetch("/foo?x=1").await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type.as_deref(), Some("text/plain"));
        assert_eq!(response.body, "hello");
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bad"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let response = origin_for(&server.uri()).fetch("/bad").await.unwrap();

        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_fetch_concatenates_base_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items"))
            .respond_with(ResponseTemplate::new(200).set_body_string("items"))
            .expect(1)
            .mount(&server)
            .await;

        let base = format!("{}/api", server.uri());
        let response = origin_for(&base).fetch("/items").await.unwrap();

        assert_eq!(response.body, "items");
    }

    #[tokio::test]
    async fn test_fetch_missing_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let response = origin_for(&server.uri()).fetch("/empty").await.unwrap();

        assert_eq!(response.status, 204);
        assert!(response.content_type.is_none());
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        // Port 9 (discard) is not listening in test environments.
        let result = origin_for("http://127.0.0.1:9").fetch("/anything").await;

        let err = result.unwrap_err();
        assert!(err.is_upstream_error());
        assert!(err.to_string().contains("http://127.0.0.1:9/anything"));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let config = ProxyConfig {
            upstream_timeout_seconds: Some(1),
            ..ProxyConfig::new(server.uri())
        };
        let result = HttpOrigin::new(&config).unwrap().fetch("/slow").await;

        assert!(matches!(result, Err(HoardError::UpstreamTimeout { .. })));
    }
}
