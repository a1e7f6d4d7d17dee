//! Snapshot storage interface and implementations
//!
//! This module defines the interface for persisting and restoring ledger
//! snapshots, with a JSON flat-file implementation and an in-memory one.

use crate::error::PredictorError;
use crate::ledger::snapshot::LedgerSnapshot;
use anyhow::Context;
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

/// Trait for snapshot storage operations
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore: Send + Sync {
    /// Read the stored snapshot
    ///
    /// Fails with `PredictorError::MissingSaveFile` when nothing has been
    /// saved yet and `PredictorError::MalformedData` when the stored data
    /// cannot be decoded.
    fn load(&self) -> crate::error::Result<LedgerSnapshot>;

    /// Overwrite the stored snapshot
    fn save(&self, snapshot: &LedgerSnapshot) -> crate::error::Result<()>;

    /// Human-readable location for reporting
    fn location(&self) -> String;
}

/// Snapshot stored as a single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> crate::error::Result<LedgerSnapshot> {
        if !self.path.exists() {
            return Err(PredictorError::MissingSaveFile {
                path: self.location(),
            }
            .into());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open save file at {}", self.path.display()))?;

        let snapshot: LedgerSnapshot = match serde_json::from_reader(BufReader::new(file)) {
            Ok(snapshot) => snapshot,
            Err(e) if e.is_io() => {
                return Err(e).with_context(|| {
                    format!("Failed to read save file at {}", self.path.display())
                });
            }
            Err(e) => {
                return Err(PredictorError::MalformedData {
                    reason: format!("{}: {}", self.path.display(), e),
                }
                .into());
            }
        };

        debug!("Read snapshot from {}", self.path.display());
        Ok(snapshot)
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> crate::error::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory {}", parent.display())
                })?;
            }
        }

        let mut file = AtomicWriteFile::open(&self.path).with_context(|| {
            format!("Failed to open atomic write file at {}", self.path.display())
        })?;

        serde_json::to_writer(&mut file, snapshot).context("Failed to serialize ledger")?;
        file.flush().context("Failed to write save file")?;
        file.commit().context("Failed to save ledger")?;

        info!("Saved ledger to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Snapshot kept in memory, for tests and embedding
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    snapshot: RwLock<Option<LedgerSnapshot>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset the stored snapshot
    pub fn with_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(Some(snapshot)),
        }
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> crate::error::Result<LedgerSnapshot> {
        let snapshot = self.snapshot.read().map_err(|_| {
            anyhow::anyhow!("Failed to acquire snapshot read lock")
        })?;

        snapshot.clone().ok_or_else(|| {
            PredictorError::MissingSaveFile {
                path: self.location(),
            }
            .into()
        })
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> crate::error::Result<()> {
        let mut stored = self.snapshot.write().map_err(|_| {
            anyhow::anyhow!("Failed to acquire snapshot write lock")
        })?;

        *stored = Some(snapshot.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MatchLedger;
    use crate::types::CompetitorId;
    use std::env;

    fn id(name: &str) -> CompetitorId {
        CompetitorId::new(name).unwrap()
    }

    fn sample_snapshot() -> LedgerSnapshot {
        let mut ledger = MatchLedger::new();
        ledger.record_match(&id("a"), &id("b")).unwrap();
        ledger.record_match(&id("b"), &id("c")).unwrap();
        ledger.snapshot()
    }

    fn temp_path(name: &str) -> PathBuf {
        let path = env::temp_dir().join(format!(
            "game_predictor_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_load_missing_file() {
        let store = JsonFileStore::new(temp_path("missing"));

        let err = store.load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PredictorError>(),
            Some(PredictorError::MissingSaveFile { .. })
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let store = JsonFileStore::new(&path);
        let snapshot = sample_snapshot();

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_save_overwrites() {
        let path = temp_path("overwrite");
        let store = JsonFileStore::new(&path);

        store.save(&sample_snapshot()).unwrap();
        store.save(&LedgerSnapshot::default()).unwrap();
        assert_eq!(store.load().unwrap(), LedgerSnapshot::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let path = temp_path("missing_key");
        std::fs::write(&path, r#"{"wins": {}, "losses": {}, "win_counts": {}}"#).unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PredictorError>(),
            Some(PredictorError::MalformedData { .. })
        ));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let path = temp_path("garbage");
        std::fs::write(&path, "not json at all").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PredictorError>(),
            Some(PredictorError::MalformedData { .. })
        ));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_reads_lowercase_names_as_canonical() {
        let path = temp_path("lowercase");
        std::fs::write(
            &path,
            r#"{"wins": {"a": ["b"]}, "losses": {"b": ["a"]},
                "match_counts": {"a": 1, "b": 1}, "win_counts": {"a": 1}}"#,
        )
        .unwrap();

        let snapshot = JsonFileStore::new(&path).load().unwrap();
        assert!(snapshot.wins[&id("A")].contains(&id("B")));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_in_memory_store() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().is_err());

        store.save(&sample_snapshot()).unwrap();
        assert_eq!(store.load().unwrap(), sample_snapshot());
        assert_eq!(store.location(), "memory");
    }
}
