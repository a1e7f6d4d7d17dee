//! Scoring engine
//!
//! Owns both strength models and picks one according to the configured
//! scoring mode. The two modes are alternatives; their values are never
//! combined.

use crate::config::ScoringConfig;
use crate::ledger::MatchLedger;
use crate::scoring::elo::EloRatings;
use crate::scoring::model::StrengthModel;
use crate::scoring::transitive::TransitiveScorer;
use crate::types::{CompetitorId, CompetitorRecord, ScoringMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cmp::Ordering;
use tracing::info;

/// A competitor's position in the score listing
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCompetitor {
    pub id: CompetitorId,
    pub record: CompetitorRecord,
    pub score: f64,
}

#[derive(Debug)]
pub struct ScoringEngine {
    config: ScoringConfig,
    transitive: TransitiveScorer,
    elo: EloRatings,
    rng: StdRng,
}

impl ScoringEngine {
    /// Create a new engine from validated configuration
    pub fn new(config: ScoringConfig) -> crate::error::Result<Self> {
        config.validate()?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            transitive: TransitiveScorer::new(&config),
            elo: EloRatings::new(config.k_factor, config.default_rating),
            rng,
            config,
        })
    }

    pub fn mode(&self) -> ScoringMode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: ScoringMode) {
        self.config.mode = mode;
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The strength model selected by the current mode
    pub fn model(&self) -> &dyn StrengthModel {
        match self.config.mode {
            ScoringMode::Transitive => &self.transitive,
            ScoringMode::Elo => &self.elo,
        }
    }

    /// Strength of `id` under the current mode
    pub fn score(&self, ledger: &MatchLedger, id: &CompetitorId) -> f64 {
        self.model().strength(ledger, id)
    }

    pub fn transitive_score(&self, ledger: &MatchLedger, id: &CompetitorId) -> f64 {
        self.transitive.score(ledger, id)
    }

    pub fn elo_rating(&self, id: &CompetitorId) -> f64 {
        self.elo.rating(id)
    }

    /// Live update after a match has been recorded in the ledger
    pub fn record_match(&mut self, winner: &CompetitorId, loser: &CompetitorId) {
        self.elo.update(winner, loser);
    }

    /// Rebuild Elo from the ledger with shuffled replays
    pub fn reconcile(&mut self, ledger: &MatchLedger) {
        self.elo
            .reconcile(ledger, self.config.reconcile_runs, &mut self.rng);

        info!(
            "Calculated Elo scores averaged over {} shuffled runs ({} competitors)",
            self.config.reconcile_runs,
            self.elo.ratings().len()
        );
    }

    /// Every competitor with its score, strongest first
    ///
    /// Equal scores are listed in name order.
    pub fn rankings(&self, ledger: &MatchLedger) -> Vec<RankedCompetitor> {
        let mut ranked: Vec<RankedCompetitor> = ledger
            .competitors()
            .into_iter()
            .map(|id| RankedCompetitor {
                score: self.score(ledger, &id),
                record: ledger.record(&id),
                id,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> CompetitorId {
        CompetitorId::new(name).unwrap()
    }

    fn engine(mode: ScoringMode) -> ScoringEngine {
        ScoringEngine::new(ScoringConfig {
            mode,
            rng_seed: Some(9),
            ..ScoringConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScoringConfig {
            reconcile_runs: 0,
            ..ScoringConfig::default()
        };
        assert!(ScoringEngine::new(config).is_err());
    }

    #[test]
    fn test_mode_selects_model() {
        let mut ledger = MatchLedger::new();
        ledger.record_match(&id("a"), &id("b")).unwrap();

        let mut engine = engine(ScoringMode::Elo);
        engine.record_match(&id("a"), &id("b"));
        assert_eq!(engine.model().name(), "elo");
        assert!((engine.score(&ledger, &id("a")) - 1516.0).abs() < 1e-9);

        engine.set_mode(ScoringMode::Transitive);
        assert_eq!(engine.model().name(), "transitive");
        assert!((engine.score(&ledger, &id("a")) - (0.7 + 0.3 * 0.15)).abs() < 1e-9);
    }

    #[test]
    fn test_unseen_competitor_defaults() {
        let ledger = MatchLedger::new();
        let engine = engine(ScoringMode::Transitive);

        assert_eq!(engine.transitive_score(&ledger, &id("x")), 0.5);
        assert_eq!(engine.elo_rating(&id("x")), 1500.0);
    }

    #[test]
    fn test_rankings_sorted_descending() {
        let mut ledger = MatchLedger::new();
        let mut engine = engine(ScoringMode::Transitive);
        for (w, l) in [("a", "b"), ("b", "c"), ("a", "c")] {
            ledger.record_match(&id(w), &id(l)).unwrap();
            engine.record_match(&id(w), &id(l));
        }

        let ranked = engine.rankings(&ledger);
        let names: Vec<_> = ranked.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(ranked[0].record, CompetitorRecord { wins: 2, losses: 0 });
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rankings_ties_by_name() {
        let mut ledger = MatchLedger::new();
        ledger.record_match(&id("b"), &id("a")).unwrap();
        ledger.record_match(&id("a"), &id("b")).unwrap();

        let ranked = engine(ScoringMode::Transitive).rankings(&ledger);
        assert_eq!(ranked[0].id, id("A"));
        assert_eq!(ranked[1].id, id("B"));
    }

    #[test]
    fn test_reconcile_replaces_live_ratings() {
        let mut ledger = MatchLedger::new();
        let mut engine = engine(ScoringMode::Elo);
        for _ in 0..4 {
            ledger.record_match(&id("a"), &id("b")).unwrap();
            engine.record_match(&id("a"), &id("b"));
        }
        assert!(engine.elo_rating(&id("a")) > 1516.0);

        engine.reconcile(&ledger);
        assert!((engine.elo_rating(&id("a")) - 1516.0).abs() < 1e-9);
    }
}
