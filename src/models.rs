//! Response models for the REST API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::allowlist::AllowListEntry;

/// Option contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

/// A single option contract snapshot as stored in the backing store.
///
/// Numeric fields default to `0.0` when missing or non-numeric in the stored
/// hash; the record itself is skipped only when its key cannot be decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContractRecord {
    /// Contract symbol (e.g., "BTC-29DEC23-50000-C").
    pub symbol: String,
    /// Strike price.
    pub strike_price: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// Last traded price.
    pub last_price: f64,
    /// Mark price.
    pub mark_price: f64,
    /// Underlying index price.
    pub underlying_price: f64,
    /// Delta.
    pub delta: f64,
    /// Gamma.
    pub gamma: f64,
    /// Theta.
    pub theta: f64,
    /// Vega.
    pub vega: f64,
    /// 24-hour traded volume.
    pub volume_24h: f64,
    /// Open interest.
    pub open_interest: f64,
    /// Data timestamp from the store (epoch seconds).
    pub timestamp: f64,
}

/// Aggregated statistics over one asset/expiry record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryStatistics {
    /// Total number of contracts.
    pub total_options: usize,
    /// Number of call contracts.
    pub call_options: usize,
    /// Number of put contracts.
    pub put_options: usize,
    /// Sum of 24-hour volumes.
    pub total_volume_24h: f64,
    /// Sum of open interest.
    pub total_open_interest: f64,
}

/// Response envelope for `/ticker/{asset}/{expiry}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TickerResponse {
    /// Requested asset.
    pub asset: String,
    /// Requested expiry token.
    pub expiry: String,
    /// Response generation time (RFC 3339), not data time.
    pub timestamp: String,
    /// Aggregated statistics.
    pub summary: SummaryStatistics,
    /// The matching contract records, ordered by strike then type.
    pub options: Vec<ContractRecord>,
}

/// Health snapshot returned by `/health`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "unhealthy".
    pub status: String,
    /// Whether the backing store answered a reachability probe.
    pub store_reachable: bool,
    /// Whether an allow-list has been successfully loaded at least once.
    pub allow_list_loaded: bool,
    /// Whether the last allow-list reload failed (serving last-known-good).
    pub allow_list_stale: bool,
    /// Number of allow-listed combinations.
    pub allow_list_size: usize,
    /// Snapshot generation time (RFC 3339).
    pub generated_at: String,
}

/// Endpoint map advertised by the root endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EndpointsInfo {
    /// Ticker endpoint template.
    pub ticker: String,
    /// Configuration endpoint.
    pub config: String,
    /// Health endpoint.
    pub health: String,
}

/// Service identity returned by `/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfoResponse {
    /// Service name.
    pub service: String,
    /// Service status.
    pub status: String,
    /// Human-readable description.
    pub description: String,
    /// Count of allow-listed asset/expiry combinations.
    pub available_combinations: usize,
    /// Available endpoints.
    pub endpoints: EndpointsInfo,
}

/// Store-derived counters shown on `/config`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StoreStats {
    /// Total number of stored contracts.
    pub total_options: usize,
    /// Contract counts keyed by asset.
    pub options_by_asset: BTreeMap<String, usize>,
}

/// Allow-list document as read from the external source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AllowListDocument {
    /// The allow-listed asset/expiry pairs, in file order.
    pub allowed: Vec<AllowListEntry>,
}

/// Operator-facing configuration view returned by `/config`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfigResponse {
    /// Current allow-list contents.
    pub configuration: AllowListDocument,
    /// Store status: "connected" or "disconnected".
    pub database_status: String,
    /// Store counters, absent when the store is unreachable.
    pub database_stats: Option<StoreStats>,
    /// Response generation time (RFC 3339).
    pub last_updated: String,
}
