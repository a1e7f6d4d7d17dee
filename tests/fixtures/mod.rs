//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use game_predictor::config::AppConfig;
use game_predictor::ledger::{InMemorySnapshotStore, JsonFileStore};
use game_predictor::types::{CompetitorId, ScoringMode};
use game_predictor::{GameSession, MatchLedger};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// Shorthand for a competitor id in tests
pub fn id(name: &str) -> CompetitorId {
    CompetitorId::new(name).unwrap()
}

/// Ledger built from `(winner, loser)` pairs in order
pub fn ledger_from(matches: &[(&str, &str)]) -> MatchLedger {
    let mut ledger = MatchLedger::new();
    for (winner, loser) in matches {
        ledger.record_match(&id(winner), &id(loser)).unwrap();
    }
    ledger
}

/// Default configuration with a fixed shuffle seed
pub fn seeded_config(mode: ScoringMode) -> AppConfig {
    let mut config = AppConfig::default();
    config.scoring.mode = mode;
    config.scoring.rng_seed = Some(42);
    config
}

/// Session backed by an in-memory store
pub fn memory_session(mode: ScoringMode) -> GameSession {
    GameSession::with_store(seeded_config(mode), Box::new(InMemorySnapshotStore::new())).unwrap()
}

/// Session saving to `path`
pub fn file_session(mode: ScoringMode, path: &Path) -> GameSession {
    GameSession::with_store(seeded_config(mode), Box::new(JsonFileStore::new(path)))
        .unwrap()
}

/// Temporary save file path that is removed when dropped
pub struct TempSaveFile {
    pub path: PathBuf,
}

impl TempSaveFile {
    pub fn new(name: &str) -> Self {
        let n = NEXT_FILE.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "game-predictor-it-{}-{}-{}.json",
            std::process::id(),
            name,
            n
        ));
        let _ = std::fs::remove_file(&path);
        Self { path }
    }
}

impl Drop for TempSaveFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
