//! Common types used throughout the game predictor

use crate::error::PredictorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical (upper-cased) competitor name
///
/// Every ledger, rating and prediction structure is keyed by this type, so two
/// names that differ only in case always refer to the same competitor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompetitorId(String);

impl CompetitorId {
    /// Normalize a raw token into a competitor id
    pub fn new(raw: &str) -> crate::error::Result<Self> {
        Ok(Self::try_from(raw.to_string())?)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CompetitorId {
    type Error = PredictorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(PredictorError::InvalidInput {
                reason: "Competitor name cannot be empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }
}

impl From<CompetitorId> for String {
    fn from(id: CompetitorId) -> Self {
        id.0
    }
}

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which strength value the engine compares when history gives no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Recursive blend of own win rate and beaten opponents' scores
    Transitive,
    /// Logistic Elo rating
    Elo,
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringMode::Transitive => write!(f, "transitive"),
            ScoringMode::Elo => write!(f, "elo"),
        }
    }
}

impl FromStr for ScoringMode {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transitive" => Ok(ScoringMode::Transitive),
            "elo" => Ok(ScoringMode::Elo),
            other => Err(PredictorError::ConfigurationError {
                message: format!("Unknown scoring mode: {}", other),
            }),
        }
    }
}

/// Win/loss tally for a single competitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub wins: u32,
    pub losses: u32,
}

impl CompetitorRecord {
    pub fn matches(&self) -> u32 {
        self.wins + self.losses
    }
}

impl fmt::Display for CompetitorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.wins, self.losses)
    }
}

/// Predicted result of a matchup
#[derive(Debug, Clone, PartialEq)]
pub enum PredictedOutcome {
    Winner(CompetitorId),
    Tie,
}

impl fmt::Display for PredictedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictedOutcome::Winner(id) => write!(f, "{}", id),
            PredictedOutcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Evidence a prediction was based on
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionBasis {
    /// The winner has beaten the other competitor before
    DirectHistory {
        winner: CompetitorId,
        loser: CompetitorId,
    },
    /// No head-to-head history; engine scores were compared
    Scores { first: f64, second: f64 },
}

/// Full prediction for `first` vs `second`
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub first: CompetitorId,
    pub second: CompetitorId,
    /// Records at the time of the prediction
    pub first_record: CompetitorRecord,
    pub second_record: CompetitorRecord,
    pub outcome: PredictedOutcome,
    pub basis: PredictionBasis,
}

impl Prediction {
    /// Record of `id` if it is one of the two competitors
    pub fn record_of(&self, id: &CompetitorId) -> CompetitorRecord {
        if id == &self.first {
            self.first_record
        } else if id == &self.second {
            self.second_record
        } else {
            CompetitorRecord::default()
        }
    }

    /// Predicted winner, `None` on a tie
    pub fn winner(&self) -> Option<&CompetitorId> {
        match &self.outcome {
            PredictedOutcome::Winner(id) => Some(id),
            PredictedOutcome::Tie => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        self.outcome == PredictedOutcome::Tie
    }
}
