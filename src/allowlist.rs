//! Allow-list of exposable asset/expiry combinations.
//!
//! The list lives in an operator-owned JSON file
//! (`{"allowed": [{"asset": "BTC", "expiry": "29DEC23"}, ...]}`) and is
//! re-read without a process restart: with `refresh_secs = 0` every lookup
//! re-reads the file, otherwise a snapshot is cached for that many seconds.
//! Readers always see a complete snapshot behind an atomically swapped `Arc`;
//! a reload never mutates a list in place.
//!
//! Reload failures fail closed: the last-known-good snapshot keeps serving
//! and the fault is visible only through health reporting. A malformed file
//! is never treated as empty (which would mass-deny) nor as a wildcard
//! (which would mass-allow).

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};
use utoipa::ToSchema;

/// One exposable asset/expiry combination.
///
/// Matching is raw exact string equality on both fields: case-sensitive,
/// whitespace-sensitive, no date parsing. Normalizing here could change
/// which pairs are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct AllowListEntry {
    /// Ticker symbol (e.g., "BTC").
    pub asset: String,
    /// Expiry date token (e.g., "29DEC23").
    pub expiry: String,
}

/// On-disk document shape.
#[derive(Debug, Default, Deserialize)]
struct AllowListFile {
    #[serde(default)]
    allowed: Vec<AllowListEntry>,
}

/// Load state as reported to the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowListStatus {
    /// A load has succeeded at least once.
    pub loaded: bool,
    /// The most recent reload failed; serving the last-known-good list.
    pub stale: bool,
    /// Number of entries in the current snapshot.
    pub size: usize,
}

/// Immutable view of the allow-list at one point in time.
#[derive(Debug)]
struct Snapshot {
    entries: Vec<AllowListEntry>,
    loaded: bool,
    stale: bool,
}

struct Cached {
    snapshot: Arc<Snapshot>,
    fetched_at: Instant,
}

/// Hot-reloadable allow-list store.
pub struct AllowListStore {
    path: PathBuf,
    refresh: Duration,
    cached: RwLock<Cached>,
}

impl AllowListStore {
    /// Creates a store backed by the given file, loading it immediately.
    ///
    /// A missing or malformed file at startup is not fatal: the store starts
    /// with an empty list and reports unloaded until a read succeeds.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P, refresh: Duration) -> Self {
        let path = path.as_ref().to_path_buf();
        let snapshot = match read_entries(&path) {
            Ok(entries) => {
                info!(
                    "Loaded allow-list from {} ({} entries)",
                    path.display(),
                    entries.len()
                );
                Snapshot {
                    entries,
                    loaded: true,
                    stale: false,
                }
            }
            Err(err) => {
                error!("Failed to load allow-list from {}: {}", path.display(), err);
                Snapshot {
                    entries: Vec::new(),
                    loaded: false,
                    stale: true,
                }
            }
        };

        Self {
            path,
            refresh,
            cached: RwLock::new(Cached {
                snapshot: Arc::new(snapshot),
                fetched_at: Instant::now(),
            }),
        }
    }

    /// Returns true if the asset/expiry pair is allow-listed.
    #[must_use]
    pub fn is_allowed(&self, asset: &str, expiry: &str) -> bool {
        self.current()
            .entries
            .iter()
            .any(|e| e.asset == asset && e.expiry == expiry)
    }

    /// Returns the current entries in display order.
    #[must_use]
    pub fn entries(&self) -> Vec<AllowListEntry> {
        self.current().entries.clone()
    }

    /// Returns the current load status for health reporting.
    #[must_use]
    pub fn status(&self) -> AllowListStatus {
        let snapshot = self.current();
        AllowListStatus {
            loaded: snapshot.loaded,
            stale: snapshot.stale,
            size: snapshot.entries.len(),
        }
    }

    /// Returns the current snapshot, reloading first if it has expired.
    fn current(&self) -> Arc<Snapshot> {
        {
            let cached = self.cached.read();
            if cached.fetched_at.elapsed() <= self.refresh {
                return Arc::clone(&cached.snapshot);
            }
        }
        self.reload()
    }

    /// Re-reads the source file and swaps in a fresh snapshot.
    fn reload(&self) -> Arc<Snapshot> {
        // File I/O happens outside the lock; concurrent reloads are
        // idempotent and last-write-wins on the swap.
        let result = read_entries(&self.path);

        let mut cached = self.cached.write();
        let snapshot = match result {
            Ok(entries) => Arc::new(Snapshot {
                entries,
                loaded: true,
                stale: false,
            }),
            Err(err) => {
                error!(
                    "Allow-list reload failed, keeping last-known-good list: {}",
                    err
                );
                Arc::new(Snapshot {
                    entries: cached.snapshot.entries.clone(),
                    loaded: cached.snapshot.loaded,
                    stale: true,
                })
            }
        };

        cached.snapshot = Arc::clone(&snapshot);
        cached.fetched_at = Instant::now();
        snapshot
    }
}

/// Reads and parses the allow-list file, collapsing duplicate entries while
/// preserving first-seen order.
fn read_entries(path: &Path) -> Result<Vec<AllowListEntry>, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let file: AllowListFile = serde_json::from_str(&content).map_err(|e| e.to_string())?;

    let mut seen = HashSet::new();
    let mut entries = file.allowed;
    entries.retain(|entry| seen.insert(entry.clone()));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_list(file: &NamedTempFile, content: &str) {
        let mut handle = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(file.path())
            .unwrap();
        handle.write_all(content.as_bytes()).unwrap();
    }

    fn store_with(content: &str) -> (AllowListStore, NamedTempFile) {
        let file = NamedTempFile::new().unwrap();
        write_list(&file, content);
        let store = AllowListStore::new(file.path(), Duration::ZERO);
        (store, file)
    }

    #[test]
    fn test_is_allowed_exact_match() {
        let (store, _file) =
            store_with(r#"{"allowed": [{"asset": "BTC", "expiry": "29DEC23"}]}"#);

        assert!(store.is_allowed("BTC", "29DEC23"));
        assert!(!store.is_allowed("ETH", "29DEC23"));
        assert!(!store.is_allowed("BTC", "30DEC23"));
    }

    #[test]
    fn test_matching_is_case_and_whitespace_sensitive() {
        let (store, _file) =
            store_with(r#"{"allowed": [{"asset": "BTC", "expiry": "29DEC23"}]}"#);

        assert!(!store.is_allowed("btc", "29DEC23"));
        assert!(!store.is_allowed("BTC ", "29DEC23"));
        assert!(!store.is_allowed("BTC", "29dec23"));
    }

    #[test]
    fn test_duplicates_collapse_preserving_order() {
        let (store, _file) = store_with(
            r#"{"allowed": [
                {"asset": "ETH", "expiry": "5SEP25"},
                {"asset": "BTC", "expiry": "29DEC23"},
                {"asset": "ETH", "expiry": "5SEP25"}
            ]}"#,
        );

        let entries = store.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].asset, "ETH");
        assert_eq!(entries[1].asset, "BTC");
    }

    #[test]
    fn test_change_visible_on_next_lookup() {
        let (store, file) = store_with(r#"{"allowed": []}"#);
        assert!(!store.is_allowed("BTC", "29DEC23"));

        write_list(&file, r#"{"allowed": [{"asset": "BTC", "expiry": "29DEC23"}]}"#);
        assert!(store.is_allowed("BTC", "29DEC23"));
    }

    #[test]
    fn test_malformed_reload_fails_closed() {
        let (store, file) =
            store_with(r#"{"allowed": [{"asset": "BTC", "expiry": "29DEC23"}]}"#);
        assert!(store.is_allowed("BTC", "29DEC23"));

        write_list(&file, "{not json");

        // Last-known-good list keeps serving.
        assert!(store.is_allowed("BTC", "29DEC23"));
        assert!(!store.is_allowed("ETH", "29DEC23"));

        let status = store.status();
        assert!(status.loaded);
        assert!(status.stale);
        assert_eq!(status.size, 1);
    }

    #[test]
    fn test_recovery_after_malformed_reload() {
        let (store, file) =
            store_with(r#"{"allowed": [{"asset": "BTC", "expiry": "29DEC23"}]}"#);

        write_list(&file, "{not json");
        assert!(store.status().stale);

        write_list(
            &file,
            r#"{"allowed": [{"asset": "ETH", "expiry": "5SEP25"}]}"#,
        );
        let status = store.status();
        assert!(!status.stale);
        assert!(store.is_allowed("ETH", "5SEP25"));
        assert!(!store.is_allowed("BTC", "29DEC23"));
    }

    #[test]
    fn test_missing_file_starts_empty_and_unloaded() {
        let store = AllowListStore::new("/nonexistent/allowed_tickers.json", Duration::ZERO);

        assert!(!store.is_allowed("BTC", "29DEC23"));
        let status = store.status();
        assert!(!status.loaded);
        assert!(status.stale);
        assert_eq!(status.size, 0);
    }

    #[test]
    fn test_nonzero_refresh_serves_cached_snapshot() {
        let file = NamedTempFile::new().unwrap();
        write_list(&file, r#"{"allowed": [{"asset": "BTC", "expiry": "29DEC23"}]}"#);
        let store = AllowListStore::new(file.path(), Duration::from_secs(3600));

        write_list(&file, r#"{"allowed": []}"#);

        // Within the refresh window the old snapshot still serves.
        assert!(store.is_allowed("BTC", "29DEC23"));
    }
}
