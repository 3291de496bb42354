//! Request orchestration: allow-list check, fetch, aggregate, envelope.

use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

use crate::aggregate::summarize;
use crate::allowlist::AllowListStore;
use crate::db::RecordStore;
use crate::error::ApiError;
use crate::models::TickerResponse;

/// Orchestrates one ticker request from validation to response envelope.
///
/// The allow-list is checked before the store is touched; a miss produces a
/// not-found response that is byte-identical whether or not records for the
/// pair exist underneath, so responses cannot be used to enumerate the
/// private store. Store failures map to service-unavailable, never to
/// not-found, and nothing in this path retries.
pub struct FilterGateway {
    allow_list: Arc<AllowListStore>,
    store: Arc<dyn RecordStore>,
}

impl FilterGateway {
    /// Creates a gateway over the given allow-list and record store.
    #[must_use]
    pub fn new(allow_list: Arc<AllowListStore>, store: Arc<dyn RecordStore>) -> Self {
        Self { allow_list, store }
    }

    /// Serves one asset/expiry request.
    ///
    /// # Errors
    /// `ApiError::NotConfigured` on an allow-list miss,
    /// `ApiError::StoreUnavailable` when the store cannot answer.
    pub async fn serve(&self, asset: &str, expiry: &str) -> Result<TickerResponse, ApiError> {
        if !self.allow_list.is_allowed(asset, expiry) {
            return Err(ApiError::NotConfigured {
                asset: asset.to_string(),
                expiry: expiry.to_string(),
            });
        }

        let fetched = self.store.fetch(asset, expiry).await?;
        if fetched.skipped > 0 {
            warn!(
                asset,
                expiry,
                skipped = fetched.skipped,
                "Skipped undecodable records during fetch"
            );
        }

        // An empty record set for an allowed pair is a valid 200, not a 404.
        let summary = summarize(&fetched.records);

        Ok(TickerResponse {
            asset: asset.to_string(),
            expiry: expiry.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            summary,
            options: fetched.records,
        })
    }
}
