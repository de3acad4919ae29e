//! Test doubles shared by the handler, router and admin tests.

use async_trait::async_trait;

use hoard_cache::MemoryStore;
use hoard_core::error::{HoardError, Result};
use hoard_core::traits::CacheStore;
use hoard_core::types::FlushSummary;

/// Store that reports an outage for keys under `prefix` and delegates the
/// rest to a healthy in-memory store.
pub struct FailingStore {
    prefix: String,
    healthy: MemoryStore,
}

impl FailingStore {
    /// Every operation fails.
    pub fn everywhere() -> Self {
        Self::for_prefix("")
    }

    /// Only keys starting with `prefix` fail. `flush_all` always fails.
    pub fn for_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_owned(),
            healthy: MemoryStore::new(),
        }
    }

    fn outage() -> HoardError {
        HoardError::StoreUnavailable("connection refused".into())
    }
}

#[async_trait]
impl CacheStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if key.starts_with(&self.prefix) {
            return Err(Self::outage());
        }
        self.healthy.get(key).await
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        if key.starts_with(&self.prefix) {
            return Err(Self::outage());
        }
        self.healthy.set_with_ttl(key, value, ttl_seconds).await
    }

    async fn flush_all(&self) -> Result<FlushSummary> {
        Err(Self::outage())
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// Store whose reads work but whose writes fail.
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl ReadOnlyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
        }
    }
}

#[async_trait]
impl CacheStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set_with_ttl(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> Result<()> {
        Err(HoardError::StoreCommand(
            "READONLY You can't write against a read only replica.".into(),
        ))
    }

    async fn flush_all(&self) -> Result<FlushSummary> {
        self.inner.flush_all().await
    }

    fn backend(&self) -> &'static str {
        "read-only"
    }
}
