//! Record store trait and key/record decoding.
//!
//! The backing store holds one hash per contract, keyed by
//! `option:{ASSET}-{EXPIRY}-{STRIKE}-{TYPE}[-{CURRENCY}]`. A fetch scans the
//! asset/expiry prefix and decodes each hash into a [`ContractRecord`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::models::{ContractRecord, OptionType, StoreStats};

/// Errors that can occur against the backing store.
///
/// Both variants mean the store could not answer; neither is ever conflated
/// with "zero matching records", which is a successful fetch.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store unreachable or a command failed.
    #[error("store unreachable: {0}")]
    Unavailable(String),

    /// Fetch exceeded the configured timeout.
    #[error("store fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// Result of a record fetch.
#[derive(Debug, Default)]
pub struct FetchedRecords {
    /// Decoded records, ordered by strike then option type.
    pub records: Vec<ContractRecord>,
    /// Records skipped because their key or hash could not be decoded.
    pub skipped: usize,
}

/// Read-only access to the contract record store.
///
/// Implementations can be Redis-backed or in-memory; both honor the same
/// key contract and decoding rules.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetches all records for an asset/expiry pair.
    ///
    /// An empty `records` vector with a reachable store is a valid outcome,
    /// distinct from `Err(StoreError)`.
    async fn fetch(&self, asset: &str, expiry: &str) -> Result<FetchedRecords, StoreError>;

    /// Lightweight reachability probe.
    async fn ping(&self) -> bool;

    /// Store-wide counters: total contracts and a per-asset breakdown.
    async fn stats(&self) -> Result<StoreStats, StoreError>;
}

/// Contract identity decoded from a store key.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedKey {
    /// Full symbol, i.e. the key without its prefix.
    pub symbol: String,
    /// Strike price component.
    pub strike_price: f64,
    /// Call or put, from the C/P component.
    pub option_type: OptionType,
}

/// Parses a store key of the form
/// `{prefix}:{ASSET}-{EXPIRY}-{STRIKE}-{TYPE}[-{CURRENCY}]`.
///
/// Returns `None` when the key does not follow the contract; such records
/// are skipped, never fatal.
pub(crate) fn parse_key(prefix: &str, key: &str) -> Option<ParsedKey> {
    let symbol = key.strip_prefix(prefix)?.strip_prefix(':')?;
    let parts: Vec<&str> = symbol.split('-').collect();
    if parts.len() != 4 && parts.len() != 5 {
        return None;
    }

    let strike_price: f64 = parts[2].parse().ok()?;
    let option_type = match parts[3] {
        "C" => OptionType::Call,
        "P" => OptionType::Put,
        _ => return None,
    };

    Some(ParsedKey {
        symbol: symbol.to_string(),
        strike_price,
        option_type,
    })
}

/// Decodes a stored hash into a [`ContractRecord`].
///
/// Numeric fields are coerced with a `0.0` default when missing or
/// non-numeric; the identity fields come from the parsed key.
pub(crate) fn decode_record(parsed: ParsedKey, fields: &HashMap<String, String>) -> ContractRecord {
    let num = |name: &str| -> f64 {
        fields
            .get(name)
            .and_then(|value| value.parse().ok())
            .unwrap_or(0.0)
    };

    ContractRecord {
        symbol: parsed.symbol,
        strike_price: parsed.strike_price,
        option_type: parsed.option_type,
        last_price: num("last_price"),
        mark_price: num("mark_price"),
        underlying_price: num("underlying_price"),
        delta: num("delta"),
        gamma: num("gamma"),
        theta: num("theta"),
        vega: num("vega"),
        volume_24h: num("volume_24h"),
        open_interest: num("open_interest"),
        timestamp: num("timestamp"),
    }
}

/// Sorts records by strike then option type for a stable envelope order.
pub(crate) fn sort_records(records: &mut [ContractRecord]) {
    records.sort_by(|a, b| {
        a.strike_price
            .total_cmp(&b.strike_price)
            .then(a.option_type.cmp(&b.option_type))
    });
}
