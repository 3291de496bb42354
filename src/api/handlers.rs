//! API request handlers.

use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{
    AllowListDocument, ConfigResponse, EndpointsInfo, HealthResponse, ServiceInfoResponse,
    TickerResponse,
};
use crate::state::AppState;

// ============================================================================
// Service Identity
// ============================================================================

/// Service identity endpoint.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service identity and allow-list count", body = ServiceInfoResponse)
    ),
    tag = "Service"
)]
pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfoResponse> {
    let allow_list = state.allow_list.status();

    Json(ServiceInfoResponse {
        service: "Options Ticker Tunnel API".to_string(),
        status: "running".to_string(),
        description: "Public API serving filtered options data".to_string(),
        available_combinations: allow_list.size,
        endpoints: EndpointsInfo {
            ticker: "/ticker/{asset}/{expiry}".to_string(),
            config: "/config".to_string(),
            health: "/health".to_string(),
        },
    })
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health snapshot", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(state.health.snapshot().await)
}

// ============================================================================
// Configuration
// ============================================================================

/// Operator-facing configuration view.
///
/// Enumerates the full allow-list; access control for this endpoint belongs
/// to the ingress layer in front of the service.
#[utoipa::path(
    get,
    path = "/config",
    responses(
        (status = 200, description = "Allow-list contents and store counters", body = ConfigResponse)
    ),
    tag = "Configuration"
)]
pub async fn show_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let allowed = state.allow_list.entries();

    let (database_status, database_stats) = match state.store.stats().await {
        Ok(stats) => ("connected".to_string(), Some(stats)),
        Err(_) => ("disconnected".to_string(), None),
    };

    Json(ConfigResponse {
        configuration: AllowListDocument { allowed },
        database_status,
        database_stats,
        last_updated: Utc::now().to_rfc3339(),
    })
}

// ============================================================================
// Ticker
// ============================================================================

/// Filtered options data for one asset/expiry pair.
#[utoipa::path(
    get,
    path = "/ticker/{asset}/{expiry}",
    params(
        ("asset" = String, Path, description = "Ticker symbol, exact match (e.g., BTC)"),
        ("expiry" = String, Path, description = "Expiry date token, exact match (e.g., 29DEC23)")
    ),
    responses(
        (status = 200, description = "Record set with summary statistics", body = TickerResponse),
        (status = 404, description = "Combination is not allow-listed"),
        (status = 503, description = "Backing store unavailable")
    ),
    tag = "Ticker"
)]
pub async fn get_ticker(
    State(state): State<Arc<AppState>>,
    Path((asset, expiry)): Path<(String, String)>,
) -> Result<Json<TickerResponse>, ApiError> {
    state.gateway.serve(&asset, &expiry).await.map(Json)
}
