//! Game predictor - match ledger, transitive and Elo scoring, and predictions
//!
//! This crate records head-to-head results between named competitors,
//! derives strength scores from them, and predicts the winner of future
//! matchups through an interactive command loop.

pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod predictor;
pub mod scoring;
pub mod service;
pub mod types;

// Re-export commonly used types and traits
pub use error::{PredictorError, Result};
pub use types::*;

// Re-export key components
pub use ledger::{MatchLedger, SnapshotStore};
pub use scoring::{ScoringEngine, StrengthModel};
pub use service::GameSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
