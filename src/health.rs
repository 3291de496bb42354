//! Health snapshot derivation.

use chrono::Utc;
use std::sync::Arc;

use crate::allowlist::AllowListStore;
use crate::db::RecordStore;
use crate::models::HealthResponse;

/// Derives a best-effort health snapshot from the allow-list and the store.
///
/// Never errors: a failed store probe shows up as `store_reachable: false`
/// rather than propagating. Reads do not mutate either collaborator beyond
/// the allow-list's own reload-on-read.
pub struct HealthReporter {
    allow_list: Arc<AllowListStore>,
    store: Arc<dyn RecordStore>,
}

impl HealthReporter {
    /// Creates a reporter over the given components.
    #[must_use]
    pub fn new(allow_list: Arc<AllowListStore>, store: Arc<dyn RecordStore>) -> Self {
        Self { allow_list, store }
    }

    /// Produces the current snapshot.
    pub async fn snapshot(&self) -> HealthResponse {
        let store_reachable = self.store.ping().await;
        let allow_list = self.allow_list.status();

        let healthy = store_reachable && allow_list.loaded && !allow_list.stale;

        HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            store_reachable,
            allow_list_loaded: allow_list.loaded,
            allow_list_stale: allow_list.stale,
            allow_list_size: allow_list.size,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRecordStore;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn reporter_with(
        allow_list_json: &str,
    ) -> (HealthReporter, Arc<MemoryRecordStore>, NamedTempFile) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(allow_list_json.as_bytes()).unwrap();
        file.flush().unwrap();

        let allow_list = Arc::new(AllowListStore::new(file.path(), Duration::ZERO));
        let store = Arc::new(MemoryRecordStore::new());
        let reporter =
            HealthReporter::new(allow_list, Arc::clone(&store) as Arc<dyn RecordStore>);
        (reporter, store, file)
    }

    #[tokio::test]
    async fn test_healthy_snapshot() {
        let (reporter, _store, _file) =
            reporter_with(r#"{"allowed": [{"asset": "BTC", "expiry": "29DEC23"}]}"#);

        let snapshot = reporter.snapshot().await;
        assert_eq!(snapshot.status, "healthy");
        assert!(snapshot.store_reachable);
        assert!(snapshot.allow_list_loaded);
        assert!(!snapshot.allow_list_stale);
        assert_eq!(snapshot.allow_list_size, 1);
        assert!(!snapshot.generated_at.is_empty());
    }

    #[tokio::test]
    async fn test_store_outage_degrades_without_erroring() {
        let (reporter, store, _file) = reporter_with(r#"{"allowed": []}"#);
        store.set_available(false);

        let snapshot = reporter.snapshot().await;
        assert_eq!(snapshot.status, "unhealthy");
        assert!(!snapshot.store_reachable);
    }

    #[tokio::test]
    async fn test_missing_allow_list_reports_unloaded() {
        let allow_list = Arc::new(AllowListStore::new(
            "/nonexistent/allowed_tickers.json",
            Duration::ZERO,
        ));
        let store = Arc::new(MemoryRecordStore::new());
        let reporter =
            HealthReporter::new(allow_list, store as Arc<dyn RecordStore>);

        let snapshot = reporter.snapshot().await;
        assert_eq!(snapshot.status, "unhealthy");
        assert!(!snapshot.allow_list_loaded);
        assert_eq!(snapshot.allow_list_size, 0);
    }
}
