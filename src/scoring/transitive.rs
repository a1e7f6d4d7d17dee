//! Transitive win-rate score
//!
//! A competitor's score blends its own win rate with the average score of
//! every competitor it has beaten, so wins over strong opponents count for
//! more than wins over weak ones. The recursion is a depth-first walk bounded
//! by a maximum depth; each branch carries its own copy of the competitors
//! already on its path, so a cycle ends at the first repeat while a different
//! path may still reach the same competitor.

use crate::config::ScoringConfig;
use crate::ledger::MatchLedger;
use crate::scoring::model::StrengthModel;
use crate::types::CompetitorId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct TransitiveScorer {
    max_depth: usize,
    direct_weight: f64,
    indirect_weight: f64,
    neutral_score: f64,
}

impl Default for TransitiveScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl TransitiveScorer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            direct_weight: config.direct_weight,
            indirect_weight: config.indirect_weight(),
            neutral_score: config.neutral_score,
        }
    }

    /// Score of `id`, always within `[0, 1]`
    pub fn score<'a>(&self, ledger: &'a MatchLedger, id: &'a CompetitorId) -> f64 {
        self.score_on_path(ledger, id, 0, BTreeSet::new())
    }

    fn score_on_path<'a>(
        &self,
        ledger: &'a MatchLedger,
        id: &'a CompetitorId,
        depth: usize,
        mut path: BTreeSet<&'a CompetitorId>,
    ) -> f64 {
        if depth > self.max_depth || path.contains(id) {
            return self.neutral_score;
        }

        let matches = ledger.match_count(id);
        if matches == 0 {
            return self.neutral_score;
        }

        let direct = f64::from(ledger.win_count(id)) / f64::from(matches);

        path.insert(id);
        let beaten = ledger.beaten_count(id);
        let indirect = if beaten == 0 {
            self.neutral_score
        } else {
            let total: f64 = ledger
                .wins_of(id)
                .map(|opponent| self.score_on_path(ledger, opponent, depth + 1, path.clone()))
                .sum();
            total / beaten as f64
        };

        self.direct_weight * direct + self.indirect_weight * indirect
    }
}

impl StrengthModel for TransitiveScorer {
    fn strength(&self, ledger: &MatchLedger, id: &CompetitorId) -> f64 {
        self.score(ledger, id)
    }

    fn neutral(&self) -> f64 {
        self.neutral_score
    }

    fn name(&self) -> &'static str {
        "transitive"
    }
}
