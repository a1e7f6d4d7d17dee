//! Competitor strength computations
//!
//! This module provides the two strength models used for prediction and
//! ranking: a depth-bounded transitive win-rate score and an Elo rating that
//! is updated live and reconciled from shuffled replays after a load.

pub mod elo;
pub mod engine;
pub mod model;
pub mod transitive;

// Re-export commonly used types
pub use elo::EloRatings;
pub use engine::{RankedCompetitor, ScoringEngine};
pub use model::StrengthModel;
pub use transitive::TransitiveScorer;
