//! Elo ratings
//!
//! Ratings are updated live after every recorded match. The ledger does not
//! keep the order matches were played in and Elo is order-sensitive, so after
//! a load the ratings are rebuilt by replaying the win edges in several random
//! orders and averaging the results.

use crate::ledger::MatchLedger;
use crate::scoring::model::StrengthModel;
use crate::types::CompetitorId;
use rand::seq::SliceRandom;
use rand::Rng;
use skillratings::elo::{elo, EloConfig, EloRating};
use skillratings::Outcomes;
use std::collections::BTreeMap;
use tracing::debug;

/// Elo rating per competitor
#[derive(Debug, Clone)]
pub struct EloRatings {
    ratings: BTreeMap<CompetitorId, f64>,
    config: EloConfig,
    default_rating: f64,
}

impl Default for EloRatings {
    fn default() -> Self {
        Self::new(32.0, 1500.0)
    }
}

impl EloRatings {
    pub fn new(k_factor: f64, default_rating: f64) -> Self {
        Self {
            ratings: BTreeMap::new(),
            config: EloConfig { k: k_factor },
            default_rating,
        }
    }

    /// Current rating, or the default for competitors never rated
    pub fn rating(&self, id: &CompetitorId) -> f64 {
        self.ratings
            .get(id)
            .copied()
            .unwrap_or(self.default_rating)
    }

    /// Every stored rating
    pub fn ratings(&self) -> &BTreeMap<CompetitorId, f64> {
        &self.ratings
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k
    }

    /// Apply one result to the live ratings
    pub fn update(&mut self, winner: &CompetitorId, loser: &CompetitorId) {
        let before = (self.rating(winner), self.rating(loser));
        apply_result(
            &mut self.ratings,
            winner,
            loser,
            &self.config,
            self.default_rating,
        );

        debug!(
            "Elo update - {}: {:.1} -> {:.1}, {}: {:.1} -> {:.1}",
            winner,
            before.0,
            self.rating(winner),
            loser,
            before.1,
            self.rating(loser)
        );
    }

    /// Ratings produced by replaying `matches` in the given order from scratch
    pub fn replay(&self, matches: &[(CompetitorId, CompetitorId)]) -> BTreeMap<CompetitorId, f64> {
        let mut ratings = BTreeMap::new();
        for (winner, loser) in matches {
            apply_result(&mut ratings, winner, loser, &self.config, self.default_rating);
        }
        ratings
    }

    /// Rebuild every rating from the ledger's win edges
    ///
    /// The edges are shuffled and replayed `runs` times from a fresh baseline,
    /// and each competitor ends up with the mean of its ratings across runs.
    /// Each distinct edge is replayed once, however many times the pair met.
    pub fn reconcile<R: Rng + ?Sized>(&mut self, ledger: &MatchLedger, runs: usize, rng: &mut R) {
        let mut matches = ledger.win_edges();
        let runs = runs.max(1);

        let mut totals: BTreeMap<CompetitorId, f64> = BTreeMap::new();
        for _ in 0..runs {
            matches.shuffle(rng);
            for (id, rating) in self.replay(&matches) {
                *totals.entry(id).or_insert(0.0) += rating;
            }
        }

        self.ratings = totals
            .into_iter()
            .map(|(id, total)| (id, total / runs as f64))
            .collect();

        debug!(
            "Reconciled Elo - competitors: {}, edges: {}, runs: {}",
            self.ratings.len(),
            matches.len(),
            runs
        );
    }
}

fn apply_result(
    ratings: &mut BTreeMap<CompetitorId, f64>,
    winner: &CompetitorId,
    loser: &CompetitorId,
    config: &EloConfig,
    default_rating: f64,
) {
    let winner_rating = EloRating {
        rating: ratings.get(winner).copied().unwrap_or(default_rating),
    };
    let loser_rating = EloRating {
        rating: ratings.get(loser).copied().unwrap_or(default_rating),
    };

    let (new_winner, new_loser) = elo(&winner_rating, &loser_rating, &Outcomes::WIN, config);

    ratings.insert(winner.clone(), new_winner.rating);
    ratings.insert(loser.clone(), new_loser.rating);
}

impl StrengthModel for EloRatings {
    fn strength(&self, _ledger: &MatchLedger, id: &CompetitorId) -> f64 {
        self.rating(id)
    }

    fn neutral(&self) -> f64 {
        self.default_rating
    }

    fn name(&self) -> &'static str {
        "elo"
    }
}
