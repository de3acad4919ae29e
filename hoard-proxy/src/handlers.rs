//! The cache-aside request pipeline.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, State},
    http::{Method, StatusCode},
};
use tracing::{debug, info, instrument};

use hoard_core::error::{HoardError, Result};
use hoard_core::types::CacheKey;

use crate::error::ProxyError;
use crate::outcome::ProxyOutcome;
use crate::state::AppState;

/// Runs one key through lookup, fetch and population.
///
/// A store hit never contacts the origin. A 2xx origin response is written
/// to the store, and the write is awaited before returning. Any other status
/// leaves the store untouched. Errors are returned as they are; nothing is
/// retried and no stale data is served.
#[instrument(skip(state, key), fields(key = %key))]
pub async fn resolve(state: &AppState, key: &CacheKey) -> Result<ProxyOutcome> {
    if let Some(body) = state.store.get(key.as_str()).await? {
        debug!("Cache hit");
        return Ok(ProxyOutcome::Hit { body });
    }

    let upstream = state.origin.fetch(key.as_str()).await?;
    let status = StatusCode::from_u16(upstream.status)
        .map_err(|_| HoardError::InvalidUpstreamStatus(upstream.status))?;

    if upstream.is_success() {
        state
            .store
            .set_with_ttl(key.as_str(), &upstream.body, state.config.cache_ttl_seconds)
            .await?;
        debug!(status = upstream.status, "Cache miss, stored");
        Ok(ProxyOutcome::Miss(upstream))
    } else {
        info!(status = upstream.status, "Origin returned error status");
        Ok(ProxyOutcome::UpstreamError { status })
    }
}

/// Fallback handler: every method, every path.
///
/// The method is not part of the key and the origin is always sent a GET, so
/// a POST to `/x` is answered exactly like a GET to `/x`.
pub async fn proxy(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> std::result::Result<ProxyOutcome, ProxyError> {
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let key = CacheKey::from_target(target);

    if method != Method::GET {
        debug!(%method, %key, "Non-GET request handled as GET");
    }

    Ok(resolve(&state, &key).await?)
}
