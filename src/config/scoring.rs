//! Scoring engine configuration

use crate::error::PredictorError;
use crate::types::ScoringMode;
use serde::{Deserialize, Serialize};

/// Parameters for the transitive score and the Elo engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Strength value used when head-to-head history is silent
    pub mode: ScoringMode,
    /// Elo K-factor
    pub k_factor: f64,
    /// Elo rating for competitors with no recorded matches
    pub default_rating: f64,
    /// Number of shuffled replays averaged when reconciling Elo
    pub reconcile_runs: usize,
    /// Hops beyond the root the transitive score may recurse
    pub max_depth: usize,
    /// Weight of a competitor's own win rate; the rest goes to beaten opponents
    pub direct_weight: f64,
    /// Score of unranked, revisited, or too-deep competitors
    pub neutral_score: f64,
    /// Fixed seed for the reconciliation shuffle (entropy when unset)
    pub rng_seed: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoringMode::Elo,
            k_factor: 32.0,
            default_rating: 1500.0,
            reconcile_runs: 5,
            max_depth: 3,
            direct_weight: 0.7,
            neutral_score: 0.5,
            rng_seed: None,
        }
    }
}

impl ScoringConfig {
    /// Weight of the beaten-opponents component
    pub fn indirect_weight(&self) -> f64 {
        1.0 - self.direct_weight
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.k_factor.is_nan() || self.k_factor <= 0.0 {
            return Err(PredictorError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if !self.default_rating.is_finite() {
            return Err(PredictorError::ConfigurationError {
                message: "Default rating must be finite".to_string(),
            }
            .into());
        }

        if self.reconcile_runs == 0 {
            return Err(PredictorError::ConfigurationError {
                message: "Reconcile runs must be greater than 0".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.direct_weight) {
            return Err(PredictorError::ConfigurationError {
                message: "Direct weight must be between 0 and 1".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.neutral_score) {
            return Err(PredictorError::ConfigurationError {
                message: "Neutral score must be between 0 and 1".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
