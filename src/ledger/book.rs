//! The match ledger
//!
//! Holds who has beaten whom and how often each competitor has played and
//! won. It is the source of truth every derived score is computed from and it
//! only ever grows during a session.

use crate::error::PredictorError;
use crate::ledger::snapshot::LedgerSnapshot;
use crate::types::{CompetitorId, CompetitorRecord};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Directed win/loss relation plus aggregate counts
///
/// `wins[a]` holds every competitor `a` has beaten at least once and
/// `losses[b]` every competitor that has beaten `b`; the two are kept
/// mirror images of each other. Repeat results between the same pair grow
/// the counts but not the sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchLedger {
    wins: BTreeMap<CompetitorId, BTreeSet<CompetitorId>>,
    losses: BTreeMap<CompetitorId, BTreeSet<CompetitorId>>,
    match_counts: BTreeMap<CompetitorId, u32>,
    win_counts: BTreeMap<CompetitorId, u32>,
}

impl MatchLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `winner` beat `loser`
    pub fn record_match(
        &mut self,
        winner: &CompetitorId,
        loser: &CompetitorId,
    ) -> crate::error::Result<()> {
        if winner == loser {
            return Err(PredictorError::InvalidInput {
                reason: format!("{} cannot play against itself", winner),
            }
            .into());
        }

        self.wins
            .entry(winner.clone())
            .or_default()
            .insert(loser.clone());
        self.losses
            .entry(loser.clone())
            .or_default()
            .insert(winner.clone());
        *self.match_counts.entry(winner.clone()).or_insert(0) += 1;
        *self.match_counts.entry(loser.clone()).or_insert(0) += 1;
        *self.win_counts.entry(winner.clone()).or_insert(0) += 1;

        debug!(
            "Recorded match - winner: {} ({}), loser: {} ({})",
            winner,
            self.record(winner),
            loser,
            self.record(loser)
        );

        Ok(())
    }

    /// Competitors `id` has beaten at least once
    pub fn wins_of(&self, id: &CompetitorId) -> impl Iterator<Item = &CompetitorId> + '_ {
        self.wins.get(id).into_iter().flatten()
    }

    /// Competitors that have beaten `id` at least once
    pub fn losses_of(&self, id: &CompetitorId) -> impl Iterator<Item = &CompetitorId> + '_ {
        self.losses.get(id).into_iter().flatten()
    }

    /// Number of distinct opponents `id` has beaten
    pub fn beaten_count(&self, id: &CompetitorId) -> usize {
        self.wins.get(id).map_or(0, BTreeSet::len)
    }

    /// Whether `a` has beaten `b` at least once
    pub fn has_beaten(&self, a: &CompetitorId, b: &CompetitorId) -> bool {
        self.wins.get(a).is_some_and(|beaten| beaten.contains(b))
    }

    pub fn match_count(&self, id: &CompetitorId) -> u32 {
        self.match_counts.get(id).copied().unwrap_or(0)
    }

    pub fn win_count(&self, id: &CompetitorId) -> u32 {
        self.win_counts.get(id).copied().unwrap_or(0)
    }

    pub fn loss_count(&self, id: &CompetitorId) -> u32 {
        self.match_count(id) - self.win_count(id)
    }

    /// Win/loss tally for `id`
    pub fn record(&self, id: &CompetitorId) -> CompetitorRecord {
        CompetitorRecord {
            wins: self.win_count(id),
            losses: self.loss_count(id),
        }
    }

    /// Every competitor that appears in the win/loss relation, in name order
    pub fn competitors(&self) -> Vec<CompetitorId> {
        self.wins
            .keys()
            .chain(self.losses.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// One `(winner, loser)` pair per distinct edge, in name order
    pub fn win_edges(&self) -> Vec<(CompetitorId, CompetitorId)> {
        self.wins
            .iter()
            .flat_map(|(winner, beaten)| {
                beaten
                    .iter()
                    .map(move |loser| (winner.clone(), loser.clone()))
            })
            .collect()
    }

    /// Total number of recorded matches
    pub fn total_matches(&self) -> u32 {
        self.win_counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.wins.is_empty()
    }

    /// Copy the four mappings out for persistence
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            wins: self.wins.clone(),
            losses: self.losses.clone(),
            match_counts: self.match_counts.clone(),
            win_counts: self.win_counts.clone(),
        }
    }

    /// Replace the whole ledger with `snapshot`
    ///
    /// The snapshot is validated first; on error the current state is kept.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) -> crate::error::Result<()> {
        snapshot.validate()?;
        let snapshot = snapshot.pruned();

        self.wins = snapshot.wins;
        self.losses = snapshot.losses;
        self.match_counts = snapshot.match_counts;
        self.win_counts = snapshot.win_counts;

        info!(
            "Ledger restored - competitors: {}, matches: {}",
            self.competitors().len(),
            self.total_matches()
        );

        Ok(())
    }
}
