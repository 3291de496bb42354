//! Error types for the REST API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::db::StoreError;


/// API error response body.
///
/// Every error leaves the service in this shape. The 404 body is identical
/// whether or not data for the rejected pair exists underneath, so responses
/// cannot be used to probe the private store.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error detail.
    pub detail: String,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Asset/expiry pair is not in the allow-list.
    #[error("Ticker/date combination {asset}/{expiry} is not available")]
    NotConfigured {
        /// Requested asset.
        asset: String,
        /// Requested expiry.
        expiry: String,
    },

    /// Backing store unreachable or timed out.
    #[error("Database connection failed")]
    StoreUnavailable(String),
}

impl ApiError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotConfigured { .. } => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal detail (store errors, panic context) never crosses the
        // boundary; only the Display message does.
        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::StoreUnavailable(err.to_string())
    }
}
