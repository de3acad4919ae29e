//! Common traits for hoard.
//!
//! The proxy pipeline talks to the outside world through exactly two seams:
//! a key-value cache store and an upstream origin. Both are injected into the
//! request handler as trait objects so they can be swapped and tested.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FlushSummary, UpstreamResponse};

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for the shared key-value cache.
///
/// Implementations might use:
/// - Redis (for production, shared between instances)
/// - An in-process map (for development and tests)
///
/// Implementations own expiry. A value returned by [`CacheStore::get`] is
/// considered fresh; absence is the only staleness signal.
///
/// # Thread Safety
///
/// One instance is shared by every in-flight request, so implementations must
/// tolerate concurrent calls without external locking.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Looks up a key.
    ///
    /// A missing key is `Ok(None)`, never an error. Errors mean the store
    /// itself could not answer.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, replacing any existing entry and resetting its expiry.
    ///
    /// `ttl_seconds` must be greater than zero.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()>;

    /// Removes every entry regardless of key.
    async fn flush_all(&self) -> Result<FlushSummary>;

    /// Short backend name for logs ("redis", "memory").
    fn backend(&self) -> &'static str;
}

// ═══════════════════════════════════════════════════════════════════════════════
// ORIGIN TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for the authoritative upstream server.
#[async_trait]
pub trait Origin: Send + Sync {
    /// Issues a GET for `path_and_query` against the origin and reads the
    /// whole body as text.
    ///
    /// Any status code is a successful fetch; only transport failures are
    /// errors.
    async fn fetch(&self, path_and_query: &str) -> Result<UpstreamResponse>;

    /// The base URL requests are sent to.
    fn base_url(&self) -> &str;
}
