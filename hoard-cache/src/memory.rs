//! In-process TTL store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::debug;

use hoard_core::constants::DEFAULT_MEMORY_STORE_CAPACITY;
use hoard_core::error::{HoardError, Result};
use hoard_core::traits::CacheStore;
use hoard_core::types::FlushSummary;

/// Cached body with TTL.
#[derive(Clone)]
struct StoredBody {
    value: String,
    inserted_at: Instant,
    ttl: Duration,
}

impl StoredBody {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// Memory store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryStoreConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// Whether to drop expired entries before evicting live ones
    pub auto_cleanup: bool,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MEMORY_STORE_CAPACITY,
            auto_cleanup: true,
        }
    }
}

/// In-memory cache store.
///
/// Thread-safe and enforces TTL on read, so an expired entry is never
/// returned even before it is physically removed. Time is read from the tokio
/// clock. Keys are stored exactly as given.
///
/// State is local to the process: unlike [`RedisStore`](crate::RedisStore)
/// it is not shared between proxy instances and does not survive restarts.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredBody>>,
    config: MemoryStoreConfig,
}

impl MemoryStore {
    /// Creates a new store with default configuration.
    pub fn new() -> Self {
        Self::with_config(MemoryStoreConfig::default())
    }

    /// Creates a store with custom configuration.
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let entries = self.entries.read();
        entries.get(key).and_then(|e| {
            if e.is_expired() {
                None
            } else {
                Some(e.value.clone())
            }
        })
    }

    fn insert(&self, key: &str, value: &str, ttl: Duration) {
        let mut entries = self.entries.write();

        if !entries.contains_key(key) {
            if self.config.auto_cleanup && entries.len() >= self.config.max_entries {
                entries.retain(|_, e| !e.is_expired());
            }
            if entries.len() >= self.config.max_entries {
                if let Some(oldest_key) = entries
                    .iter()
                    .min_by_key(|(_, e)| e.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    entries.remove(&oldest_key);
                }
            }
        }

        entries.insert(
            key.to_owned(),
            StoredBody {
                value: value.to_owned(),
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Removes all expired entries.
    pub fn cleanup_expired(&self) {
        self.entries.write().retain(|_, e| !e.is_expired());
    }

    /// Returns the number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns store statistics.
    pub fn stats(&self) -> MemoryStoreStats {
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired()).count();
        MemoryStoreStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
            capacity: self.config.max_entries,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lookup(key))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        if ttl_seconds == 0 {
            return Err(HoardError::InvalidTtl(ttl_seconds));
        }
        self.insert(key, value, Duration::from_secs(ttl_seconds));
        Ok(())
    }

    async fn flush_all(&self) -> Result<FlushSummary> {
        let mut entries = self.entries.write();
        let removed = entries.len() as u64;
        entries.clear();
        debug!(removed, "Flushed memory store");
        Ok(FlushSummary::with_count(removed))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Memory store statistics.
#[derive(Clone, Debug)]
pub struct MemoryStoreStats {
    /// Entries currently held, expired or not
    pub total_entries: usize,
    /// Entries past their TTL that have not been evicted yet
    pub expired_entries: usize,
    /// Entries still within their TTL
    pub valid_entries: usize,
    /// Maximum number of entries before eviction
    pub capacity: usize,
}
