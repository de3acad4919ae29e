//! App state: configuration, cache store, origin.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use hoard_core::constants::{DEFAULT_CACHE_TTL_SECONDS, DEFAULT_ORIGIN, DEFAULT_PORT};
use hoard_core::traits::{CacheStore, Origin};

/// Per-process proxy configuration. Never changes after startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Port to listen on
    pub port: u16,
    /// Upstream base URL, concatenated with each request target
    pub origin: String,
    /// Flush the store and exit instead of serving
    pub flush_on_start: bool,
    /// TTL applied to every stored body
    pub cache_ttl_seconds: u64,
    /// Optional deadline for upstream fetches
    pub upstream_timeout_seconds: Option<u64>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            origin: DEFAULT_ORIGIN.into(),
            flush_on_start: false,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            upstream_timeout_seconds: None,
        }
    }
}

impl ProxyConfig {
    /// Default configuration pointed at `origin`.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Self::default()
        }
    }
}

/// Shared state handed to every request.
///
/// The store and origin are injected rather than created here, so one
/// connection pool serves all requests and tests can substitute either.
pub struct AppState {
    /// Runtime configuration
    pub config: ProxyConfig,
    /// Cache backend shared by all requests
    pub store: Arc<dyn CacheStore>,
    /// Upstream the cache misses are forwarded to
    pub origin: Arc<dyn Origin>,
}

impl AppState {
    /// Bundles the injected store and origin with the configuration.
    pub fn new(config: ProxyConfig, store: Arc<dyn CacheStore>, origin: Arc<dyn Origin>) -> Self {
        Self {
            config,
            store,
            origin,
        }
    }
}
