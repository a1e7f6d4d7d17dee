//! Serializable form of the ledger
//!
//! The JSON layout is one object with the keys `wins`, `losses`,
//! `match_counts` and `win_counts`. Every key is required.

use crate::error::PredictorError;
use crate::types::CompetitorId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Keyed snapshot of the four ledger mappings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub wins: BTreeMap<CompetitorId, BTreeSet<CompetitorId>>,
    pub losses: BTreeMap<CompetitorId, BTreeSet<CompetitorId>>,
    pub match_counts: BTreeMap<CompetitorId, u32>,
    pub win_counts: BTreeMap<CompetitorId, u32>,
}

fn malformed(reason: String) -> anyhow::Error {
    PredictorError::MalformedData { reason }.into()
}

impl LedgerSnapshot {
    /// Check that the mappings describe a ledger that could have been recorded
    ///
    /// Empty sets and zero counts are accepted (older save files contain them
    /// for competitors that were only ever looked up).
    pub fn validate(&self) -> crate::error::Result<()> {
        for (winner, beaten) in &self.wins {
            for loser in beaten {
                if winner == loser {
                    return Err(malformed(format!("{} is recorded as beating itself", winner)));
                }
                let mirrored = self
                    .losses
                    .get(loser)
                    .is_some_and(|winners| winners.contains(winner));
                if !mirrored {
                    return Err(malformed(format!(
                        "{} beat {} but the loss is not recorded",
                        winner, loser
                    )));
                }
            }
        }

        for (loser, winners) in &self.losses {
            for winner in winners {
                let mirrored = self
                    .wins
                    .get(winner)
                    .is_some_and(|beaten| beaten.contains(loser));
                if !mirrored {
                    return Err(malformed(format!(
                        "{} lost to {} but the win is not recorded",
                        loser, winner
                    )));
                }
            }
        }

        for (id, &wins) in &self.win_counts {
            let matches = self.match_counts.get(id).copied().unwrap_or(0);
            if wins > matches {
                return Err(malformed(format!(
                    "{} has {} wins but only {} matches",
                    id, wins, matches
                )));
            }
        }

        for (id, beaten) in &self.wins {
            let wins = self.win_counts.get(id).copied().unwrap_or(0);
            if (wins as usize) < beaten.len() {
                return Err(malformed(format!(
                    "{} beat {} opponents but has {} wins",
                    id,
                    beaten.len(),
                    wins
                )));
            }
        }

        for (id, winners) in &self.losses {
            let matches = self.match_counts.get(id).copied().unwrap_or(0);
            let losses = matches.saturating_sub(self.win_counts.get(id).copied().unwrap_or(0));
            if (losses as usize) < winners.len() {
                return Err(malformed(format!(
                    "{} lost to {} opponents but has {} losses",
                    id,
                    winners.len(),
                    losses
                )));
            }
        }

        Ok(())
    }

    /// Drop empty sets and zero counts
    pub fn pruned(mut self) -> Self {
        self.wins.retain(|_, beaten| !beaten.is_empty());
        self.losses.retain(|_, winners| !winners.is_empty());
        self.match_counts.retain(|_, count| *count > 0);
        self.win_counts.retain(|_, count| *count > 0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> CompetitorId {
        CompetitorId::new(name).unwrap()
    }

    fn one_match() -> LedgerSnapshot {
        let mut snapshot = LedgerSnapshot::default();
        snapshot.wins.insert(id("A"), BTreeSet::from([id("B")]));
        snapshot.losses.insert(id("B"), BTreeSet::from([id("A")]));
        snapshot.match_counts.insert(id("A"), 1);
        snapshot.match_counts.insert(id("B"), 1);
        snapshot.win_counts.insert(id("A"), 1);
        snapshot
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(one_match().validate().is_ok());
    }

    #[test]
    fn test_json_layout() {
        let json = serde_json::to_value(one_match()).unwrap();
        assert_eq!(json["wins"]["A"], serde_json::json!(["B"]));
        assert_eq!(json["losses"]["B"], serde_json::json!(["A"]));
        assert_eq!(json["match_counts"]["B"], 1);
        assert_eq!(json["win_counts"]["A"], 1);
    }

    #[test]
    fn test_missing_key_rejected() {
        let result: Result<LedgerSnapshot, _> = serde_json::from_str(
            r#"{"wins": {}, "losses": {}, "match_counts": {}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_asymmetric_edges_rejected() {
        let mut snapshot = one_match();
        snapshot.losses.clear();
        assert!(snapshot.validate().is_err());

        let mut snapshot = one_match();
        snapshot.wins.clear();
        snapshot.win_counts.clear();
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_inconsistent_counts_rejected() {
        let mut snapshot = one_match();
        snapshot.win_counts.insert(id("A"), 2);
        assert!(snapshot.validate().is_err());

        let mut snapshot = one_match();
        snapshot.match_counts.insert(id("B"), 0);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_pruned_drops_placeholders() {
        let mut snapshot = one_match();
        snapshot.wins.insert(id("C"), BTreeSet::new());
        snapshot.match_counts.insert(id("C"), 0);
        snapshot.win_counts.insert(id("B"), 0);
        assert!(snapshot.validate().is_ok());

        assert_eq!(snapshot.pruned(), one_match());
    }
}
