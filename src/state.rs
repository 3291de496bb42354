//! Application state management.

use std::sync::Arc;
use std::time::Duration;

use crate::allowlist::AllowListStore;
use crate::config::Config;
use crate::db::{RecordStore, RedisRecordStore, StoreError};
use crate::gateway::FilterGateway;
use crate::health::HealthReporter;

/// Application state shared across all handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Hot-reloadable allow-list.
    pub allow_list: Arc<AllowListStore>,
    /// Backing record store.
    pub store: Arc<dyn RecordStore>,
    /// Request orchestrator.
    pub gateway: FilterGateway,
    /// Health snapshot source.
    pub health: HealthReporter,
}

impl AppState {
    /// Creates application state over an already-built record store.
    ///
    /// Used directly by tests with the in-memory store; `connect` wraps it
    /// for the Redis-backed binary.
    #[must_use]
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Self {
        let allow_list = Arc::new(AllowListStore::new(
            &config.allow_list.path,
            Duration::from_secs(config.allow_list.refresh_secs),
        ));

        let gateway = FilterGateway::new(Arc::clone(&allow_list), Arc::clone(&store));
        let health = HealthReporter::new(Arc::clone(&allow_list), Arc::clone(&store));

        Self {
            config,
            allow_list,
            store,
            gateway,
            health,
        }
    }

    /// Creates application state connected to the configured Redis store.
    ///
    /// # Errors
    /// Returns an error if the store connection cannot be established.
    pub async fn connect(config: Config) -> Result<Self, StoreError> {
        let store = RedisRecordStore::connect(&config.store).await?;
        Ok(Self::with_store(config, Arc::new(store)))
    }
}
