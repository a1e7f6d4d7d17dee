//! Matchup prediction
//!
//! This module predicts the winner of a matchup from head-to-head history or
//! engine scores, and tracks how often those predictions turn out right.

pub mod accuracy;
pub mod matchup;

// Re-export commonly used types
pub use accuracy::PredictionAccuracy;
pub use matchup::predict;
