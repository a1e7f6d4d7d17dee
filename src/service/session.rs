//! Game session
//!
//! A session owns the ledger, the scoring engine, the prediction accuracy
//! tracker and the snapshot store for one process. The command interpreter
//! holds it by `&mut`; nothing here is global.

use crate::config::AppConfig;
use crate::ledger::{JsonFileStore, MatchLedger, SnapshotStore};
use crate::predictor::{predict, PredictionAccuracy};
use crate::scoring::{RankedCompetitor, ScoringEngine};
use crate::types::{CompetitorId, CompetitorRecord, Prediction, ScoringMode};
use tracing::{debug, info};

/// Outcome of recording a match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    pub winner: CompetitorId,
    pub loser: CompetitorId,
    /// Prediction made before the result was recorded
    pub prediction: Option<Prediction>,
    /// Whether that prediction named the actual winner
    pub prediction_correct: Option<bool>,
    pub winner_record: CompetitorRecord,
    pub loser_record: CompetitorRecord,
}

/// Outcome of restoring the ledger from the store
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub location: String,
    pub competitors: usize,
    pub matches: u32,
    pub reconcile_runs: usize,
}

/// Score listing, abbreviated to both ends when there are many competitors
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreListing {
    pub mode: ScoringMode,
    pub total: usize,
    /// Strongest competitors (every competitor when not abbreviated)
    pub top: Vec<RankedCompetitor>,
    /// Weakest competitors, empty when not abbreviated
    pub bottom: Vec<RankedCompetitor>,
}

impl ScoreListing {
    pub fn is_abbreviated(&self) -> bool {
        !self.bottom.is_empty()
    }
}

pub struct GameSession {
    config: AppConfig,
    ledger: MatchLedger,
    engine: ScoringEngine,
    accuracy: Option<PredictionAccuracy>,
    store: Box<dyn SnapshotStore>,
}

impl GameSession {
    /// Create a session saving to the configured JSON file
    pub fn new(config: AppConfig) -> crate::error::Result<Self> {
        let store = JsonFileStore::new(config.storage.save_path.clone());
        Self::with_store(config, Box::new(store))
    }

    /// Create a session with an explicit snapshot store
    pub fn with_store(
        config: AppConfig,
        store: Box<dyn SnapshotStore>,
    ) -> crate::error::Result<Self> {
        let engine = ScoringEngine::new(config.scoring.clone())?;
        let accuracy = config
            .predictor
            .track_accuracy
            .then(|| PredictionAccuracy::new(config.predictor.rolling_window));

        info!(
            "Session ready - mode: {}, store: {}, accuracy tracking: {}",
            engine.mode(),
            store.location(),
            accuracy.is_some()
        );

        Ok(Self {
            config,
            ledger: MatchLedger::new(),
            engine,
            accuracy,
            store,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn accuracy(&self) -> Option<&PredictionAccuracy> {
        self.accuracy.as_ref()
    }

    /// Record that `winner` beat `loser`
    ///
    /// With accuracy tracking on, the matchup is predicted first and the
    /// prediction scored against the result before the ledger changes.
    pub fn record_win(
        &mut self,
        winner: &CompetitorId,
        loser: &CompetitorId,
    ) -> crate::error::Result<MatchReport> {
        let (prediction, prediction_correct) = match self.accuracy.as_mut() {
            Some(accuracy) => {
                let prediction = predict(&self.ledger, &self.engine, winner, loser)?;
                let correct = prediction.winner() == Some(winner);
                accuracy.record(correct);
                (Some(prediction), Some(correct))
            }
            None => (None, None),
        };

        self.ledger.record_match(winner, loser)?;
        self.engine.record_match(winner, loser);

        if let Some(correct) = prediction_correct {
            debug!("Prediction for {} vs {} was correct: {}", winner, loser, correct);
        }

        Ok(MatchReport {
            winner: winner.clone(),
            loser: loser.clone(),
            prediction,
            prediction_correct,
            winner_record: self.ledger.record(winner),
            loser_record: self.ledger.record(loser),
        })
    }

    /// Predict `first` vs `second` without touching the ledger
    pub fn predict(
        &self,
        first: &CompetitorId,
        second: &CompetitorId,
    ) -> crate::error::Result<Prediction> {
        predict(&self.ledger, &self.engine, first, second)
    }

    /// Current ranking of every known competitor
    pub fn scores(&self) -> ScoreListing {
        let mut ranked = self.engine.rankings(&self.ledger);
        let total = ranked.len();
        let limit = self.config.predictor.report_limit;
        let head = self.config.predictor.report_head;

        let bottom = if total > limit {
            let bottom = ranked.split_off(total - head);
            ranked.truncate(head);
            bottom
        } else {
            Vec::new()
        };

        ScoreListing {
            mode: self.engine.mode(),
            total,
            top: ranked,
            bottom,
        }
    }

    /// Persist the ledger, returning where it was written
    pub fn save(&self) -> crate::error::Result<String> {
        self.store.save(&self.ledger.snapshot())?;
        Ok(self.store.location())
    }

    /// Replace the ledger with the stored snapshot and rebuild Elo
    ///
    /// On any error the session is left as it was.
    pub fn load(&mut self) -> crate::error::Result<LoadReport> {
        let snapshot = self.store.load()?;
        self.ledger.restore(snapshot)?;
        self.engine.reconcile(&self.ledger);

        Ok(LoadReport {
            location: self.store.location(),
            competitors: self.ledger.competitors().len(),
            matches: self.ledger.total_matches(),
            reconcile_runs: self.engine.config().reconcile_runs,
        })
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("ledger", &self.ledger)
            .field("engine", &self.engine)
            .field("accuracy", &self.accuracy)
            .field("store", &self.store.location())
            .finish()
    }
}
