//! In-memory record store for tests and local development.
//!
//! Mirrors the Redis key space and decoding path exactly, including the
//! skip-and-count behavior for undecodable records, and can simulate an
//! outage so store-unavailable handling is testable without a Redis.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::db::store::{
    FetchedRecords, RecordStore, StoreError, decode_record, parse_key, sort_records,
};
use crate::models::StoreStats;

/// In-memory implementation of [`RecordStore`].
pub struct MemoryRecordStore {
    key_prefix: String,
    hashes: RwLock<BTreeMap<String, HashMap<String, String>>>,
    available: AtomicBool,
}

impl MemoryRecordStore {
    /// Creates an empty store with the default `option` key prefix.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_prefix: "option".to_string(),
            hashes: RwLock::new(BTreeMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Inserts a contract hash under `{prefix}:{symbol}`.
    pub fn insert_contract(&self, symbol: &str, fields: &[(&str, &str)]) {
        let key = format!("{}:{}", self.key_prefix, symbol);
        let fields = fields
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect();
        self.hashes.write().insert(key, fields);
    }

    /// Toggles simulated reachability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("simulated outage".to_string()))
        }
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn fetch(&self, asset: &str, expiry: &str) -> Result<FetchedRecords, StoreError> {
        self.ensure_available()?;

        let scan_prefix = format!("{}:{}-{}-", self.key_prefix, asset, expiry);
        let hashes = self.hashes.read();

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (key, fields) in hashes.iter() {
            if !key.starts_with(&scan_prefix) {
                continue;
            }
            let Some(parsed) = parse_key(&self.key_prefix, key) else {
                skipped += 1;
                continue;
            };
            if fields.is_empty() {
                skipped += 1;
                continue;
            }
            records.push(decode_record(parsed, fields));
        }

        sort_records(&mut records);
        Ok(FetchedRecords { records, skipped })
    }

    async fn ping(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        self.ensure_available()?;

        let hashes = self.hashes.read();
        let mut options_by_asset: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_options = 0usize;
        for key in hashes.keys() {
            let Some(parsed) = parse_key(&self.key_prefix, key) else {
                continue;
            };
            let asset = parsed.symbol.split('-').next().unwrap_or("").to_string();
            *options_by_asset.entry(asset).or_insert(0) += 1;
            total_options += 1;
        }

        Ok(StoreStats {
            total_options,
            options_by_asset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionType;

    #[tokio::test]
    async fn test_fetch_matches_only_requested_pair() {
        let store = MemoryRecordStore::new();
        store.insert_contract("BTC-29DEC23-50000-C", &[("volume_24h", "10")]);
        store.insert_contract("BTC-29DEC23-52000-P", &[("volume_24h", "20")]);
        store.insert_contract("BTC-5JAN24-50000-C", &[("volume_24h", "30")]);
        store.insert_contract("ETH-29DEC23-3200-C", &[("volume_24h", "40")]);

        let fetched = store.fetch("BTC", "29DEC23").await.unwrap();
        assert_eq!(fetched.records.len(), 2);
        assert_eq!(fetched.skipped, 0);
        assert!(fetched.records.iter().all(|r| r.symbol.starts_with("BTC-29DEC23-")));
    }

    #[tokio::test]
    async fn test_fetch_empty_is_ok_not_error() {
        let store = MemoryRecordStore::new();
        let fetched = store.fetch("BTC", "29DEC23").await.unwrap();
        assert!(fetched.records.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_is_distinct_from_empty() {
        let store = MemoryRecordStore::new();
        store.set_available(false);

        assert!(store.fetch("BTC", "29DEC23").await.is_err());
        assert!(!store.ping().await);

        store.set_available(true);
        assert!(store.fetch("BTC", "29DEC23").await.is_ok());
        assert!(store.ping().await);
    }

    #[tokio::test]
    async fn test_undecodable_record_is_skipped_and_counted() {
        let store = MemoryRecordStore::new();
        store.insert_contract("BTC-29DEC23-50000-C", &[("volume_24h", "10")]);
        store.insert_contract("BTC-29DEC23-junk-C", &[("volume_24h", "999")]);

        let fetched = store.fetch("BTC", "29DEC23").await.unwrap();
        assert_eq!(fetched.records.len(), 1);
        assert_eq!(fetched.skipped, 1);
    }

    #[tokio::test]
    async fn test_records_sorted_by_strike_then_type() {
        let store = MemoryRecordStore::new();
        store.insert_contract("BTC-29DEC23-52000-P", &[]);
        store.insert_contract("BTC-29DEC23-50000-P", &[("last_price", "1")]);
        store.insert_contract("BTC-29DEC23-50000-C", &[("last_price", "2")]);

        let fetched = store.fetch("BTC", "29DEC23").await.unwrap();
        // The empty hash is skipped; the rest come back sorted.
        assert_eq!(fetched.skipped, 1);
        assert_eq!(fetched.records[0].strike_price, 50000.0);
        assert_eq!(fetched.records[0].option_type, OptionType::Call);
        assert_eq!(fetched.records[1].option_type, OptionType::Put);
    }

    #[tokio::test]
    async fn test_stats_counts_per_asset() {
        let store = MemoryRecordStore::new();
        store.insert_contract("BTC-29DEC23-50000-C", &[("a", "1")]);
        store.insert_contract("BTC-5JAN24-50000-C", &[("a", "1")]);
        store.insert_contract("ETH-29DEC23-3200-P", &[("a", "1")]);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_options, 3);
        assert_eq!(stats.options_by_asset.get("BTC"), Some(&2));
        assert_eq!(stats.options_by_asset.get("ETH"), Some(&1));
    }
}
