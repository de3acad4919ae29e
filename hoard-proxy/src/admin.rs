//! Administrative cache invalidation.
//!
//! Runs once at startup, before any listener is bound, and never alongside
//! request handling.

use tracing::{info, instrument};

use hoard_core::error::Result;
use hoard_core::traits::CacheStore;
use hoard_core::types::FlushSummary;

/// Removes every entry from `store`.
#[instrument(skip(store), fields(backend = store.backend()))]
pub async fn flush_cache(store: &dyn CacheStore) -> Result<FlushSummary> {
    let summary = store.flush_all().await?;
    info!(removed = ?summary.removed, "Cache flushed");
    Ok(summary)
}
