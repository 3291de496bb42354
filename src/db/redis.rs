//! Redis-backed record store.
//!
//! Contract records live as Redis hashes, populated by an external ingestion
//! pipeline; this adapter only reads. The connection manager reconnects on
//! its own and is cloned per call, so no locking is needed on the serving
//! path. Every operation carries a bounded timeout that maps to the
//! store-unavailable outcome, never to a not-found.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::info;

use crate::config::StoreConfig;
use crate::db::store::{
    FetchedRecords, RecordStore, StoreError, decode_record, parse_key, sort_records,
};
use crate::models::StoreStats;

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Read-only Redis adapter for contract records.
pub struct RedisRecordStore {
    manager: ConnectionManager,
    key_prefix: String,
    timeout: Duration,
}

impl RedisRecordStore {
    /// Connects to Redis using the store configuration.
    ///
    /// # Errors
    /// Returns `StoreError::Unavailable` if the initial connection fails.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.url.as_str())?;
        let manager = client.get_connection_manager().await?;

        info!("Connected to options store at {}", config.url);

        Ok(Self {
            manager,
            key_prefix: config.key_prefix.clone(),
            timeout: Duration::from_millis(config.fetch_timeout_ms),
        })
    }

    /// Scan pattern for one asset/expiry pair.
    fn pair_pattern(&self, asset: &str, expiry: &str) -> String {
        format!("{}:{}-{}-*", self.key_prefix, asset, expiry)
    }

    /// Collects all keys matching a pattern.
    async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.manager.clone();
        let mut keys = Vec::new();
        let mut iter: redis::AsyncIter<String> = conn.scan_match(pattern).await?;
        while let Some(key) = iter.next_item().await {
            keys.push(key);
        }
        Ok(keys)
    }

    async fn fetch_inner(&self, asset: &str, expiry: &str) -> Result<FetchedRecords, StoreError> {
        let keys = self.scan_keys(&self.pair_pattern(asset, expiry)).await?;

        let mut conn = self.manager.clone();
        let mut records = Vec::with_capacity(keys.len());
        let mut skipped = 0usize;

        for key in keys {
            let Some(parsed) = parse_key(&self.key_prefix, &key) else {
                skipped += 1;
                continue;
            };

            let fields: HashMap<String, String> = match conn.hgetall(&key).await {
                Ok(fields) => fields,
                // Wrong-type keys are individual bad records; anything else
                // means the store stopped answering mid-fetch.
                Err(err) if err.kind() == redis::ErrorKind::TypeError => {
                    skipped += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            if fields.is_empty() {
                skipped += 1;
                continue;
            }

            records.push(decode_record(parsed, &fields));
        }

        sort_records(&mut records);
        Ok(FetchedRecords { records, skipped })
    }

    async fn stats_inner(&self) -> Result<StoreStats, StoreError> {
        let pattern = format!("{}:*", self.key_prefix);
        let keys = self.scan_keys(&pattern).await?;

        let mut options_by_asset: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_options = 0usize;
        for key in &keys {
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

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn fetch(&self, asset: &str, expiry: &str) -> Result<FetchedRecords, StoreError> {
        match tokio::time::timeout(self.timeout, self.fetch_inner(asset, expiry)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }

    async fn ping(&self) -> bool {
        let mut conn = self.manager.clone();
        let cmd = redis::cmd("PING");
        matches!(
            tokio::time::timeout(self.timeout, cmd.query_async::<_, String>(&mut conn)).await,
            Ok(Ok(_))
        )
    }

    async fn stats(&self) -> Result<StoreStats, StoreError> {
        match tokio::time::timeout(self.timeout, self.stats_inner()).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}
