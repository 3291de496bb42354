//! Route configuration.

use crate::api::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// Creates the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Service identity
        .route("/", get(handlers::service_info))
        // Health check
        .route("/health", get(handlers::health_check))
        // Operator configuration view
        .route("/config", get(handlers::show_config))
        // Filtered ticker data
        .route("/ticker/{asset}/{expiry}", get(handlers::get_ticker))
        .with_state(state)
}
