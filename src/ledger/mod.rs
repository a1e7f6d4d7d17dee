//! Match history ledger
//!
//! This module holds the directed win/loss relation between competitors, the
//! aggregate match counts derived scores are computed from, and the snapshot
//! stores used to persist it.

pub mod book;
pub mod snapshot;
pub mod storage;

// Re-export commonly used types
pub use book::MatchLedger;
pub use snapshot::LedgerSnapshot;
pub use storage::{InMemorySnapshotStore, JsonFileStore, SnapshotStore};
