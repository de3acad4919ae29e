//! # hoard Proxy
//!
//! Transparent caching reverse proxy for a single upstream origin.
//!
//! Every request, whatever its method or path, runs through the same
//! cache-aside pipeline:
//!
//! 1. Derive the key from the raw request target (`/path?query`)
//! 2. Serve the stored body on a hit (`X-Cache: HIT`)
//! 3. Otherwise GET `{origin}{target}` from the upstream
//! 4. Store 2xx bodies for 60 seconds and return them (`X-Cache: MISS`)
//! 5. Return a static HTML error page for any other upstream status
//!
//! Failures anywhere in the pipeline become a plain `500 Internal Server Error`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use hoard_cache::RedisStore;
//! use hoard_proxy::{HttpOrigin, ProxyConfig, ProxyServer};
//!
//! let config = ProxyConfig::new("http://localhost:8080");
//! let store = Arc::new(RedisStore::connect("redis://127.0.0.1:6379").await?);
//! let origin = Arc::new(HttpOrigin::new(&config)?);
//! let server = ProxyServer::new(config, store, origin);
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod admin;
mod error;
mod handlers;
mod origin;
mod outcome;
mod routes;
mod state;

#[cfg(test)]
mod testing;

pub use admin::flush_cache;
pub use error::ProxyError;
pub use handlers::resolve;
pub use origin::HttpOrigin;
pub use outcome::ProxyOutcome;
pub use routes::create_router;
pub use state::{AppState, ProxyConfig};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use hoard_core::traits::{CacheStore, Origin};

/// Caching proxy server.
pub struct ProxyServer {
    state: Arc<AppState>,
}

impl ProxyServer {
    /// Creates a new server around an already connected store and origin.
    pub fn new(
        config: ProxyConfig,
        store: Arc<dyn CacheStore>,
        origin: Arc<dyn Origin>,
    ) -> Self {
        Self {
            state: Arc::new(AppState::new(config, store, origin)),
        }
    }

    /// Creates the router with request tracing.
    pub fn router(&self) -> Router {
        create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address until the process is stopped.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!(
            %addr,
            origin = %self.state.origin.base_url(),
            store = self.state.store.backend(),
            "hoard proxy listening"
        );

        axum::serve(listener, self.router()).await
    }
}
