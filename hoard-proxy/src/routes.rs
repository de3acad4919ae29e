//! Router configuration.

use std::sync::Arc;

use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Creates the proxy router.
///
/// There are no named routes: every method on every path falls through to
/// the caching pipeline.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(handlers::proxy)
        .with_state(state)
}
