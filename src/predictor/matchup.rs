//! Predict the winner of a single matchup

use crate::error::PredictorError;
use crate::ledger::MatchLedger;
use crate::scoring::ScoringEngine;
use crate::types::{CompetitorId, PredictedOutcome, Prediction, PredictionBasis};
use tracing::debug;

/// Predict the winner of `first` vs `second`
///
/// Head-to-head history decides whenever it exists, regardless of scores.
/// Otherwise the higher engine score wins and equal scores are a tie. The
/// ledger is never modified.
pub fn predict(
    ledger: &MatchLedger,
    engine: &ScoringEngine,
    first: &CompetitorId,
    second: &CompetitorId,
) -> crate::error::Result<Prediction> {
    if first == second {
        return Err(PredictorError::InvalidInput {
            reason: format!("Cannot predict {} against itself", first),
        }
        .into());
    }

    let direct = if ledger.has_beaten(first, second) {
        Some((first, second))
    } else if ledger.has_beaten(second, first) {
        Some((second, first))
    } else {
        None
    };

    let prediction = match direct {
        Some((winner, loser)) => Prediction {
            first: first.clone(),
            second: second.clone(),
            first_record: ledger.record(first),
            second_record: ledger.record(second),
            outcome: PredictedOutcome::Winner(winner.clone()),
            basis: PredictionBasis::DirectHistory {
                winner: winner.clone(),
                loser: loser.clone(),
            },
        },
        None => {
            let first_score = engine.score(ledger, first);
            let second_score = engine.score(ledger, second);

            let outcome = if first_score == second_score {
                PredictedOutcome::Tie
            } else if first_score > second_score {
                PredictedOutcome::Winner(first.clone())
            } else {
                PredictedOutcome::Winner(second.clone())
            };

            Prediction {
                first: first.clone(),
                second: second.clone(),
                first_record: ledger.record(first),
                second_record: ledger.record(second),
                outcome,
                basis: PredictionBasis::Scores {
                    first: first_score,
                    second: second_score,
                },
            }
        }
    };

    debug!(
        "Prediction - {} vs {}: {} ({:?})",
        first, second, prediction.outcome, prediction.basis
    );

    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::types::ScoringMode;

    fn id(name: &str) -> CompetitorId {
        CompetitorId::new(name).unwrap()
    }

    fn setup(mode: ScoringMode, results: &[(&str, &str)]) -> (MatchLedger, ScoringEngine) {
        let mut ledger = MatchLedger::new();
        let mut engine = ScoringEngine::new(ScoringConfig {
            mode,
            rng_seed: Some(3),
            ..ScoringConfig::default()
        })
        .unwrap();
        for (winner, loser) in results {
            ledger.record_match(&id(winner), &id(loser)).unwrap();
            engine.record_match(&id(winner), &id(loser));
        }
        (ledger, engine)
    }

    #[test]
    fn test_direct_history_wins_over_scores() {
        // D is far stronger on paper but lost to A once
        let (ledger, engine) = setup(
            ScoringMode::Elo,
            &[("a", "d"), ("d", "b"), ("d", "c"), ("d", "e"), ("d", "f")],
        );
        assert!(engine.score(&ledger, &id("d")) > engine.score(&ledger, &id("a")));

        let prediction = predict(&ledger, &engine, &id("d"), &id("a")).unwrap();
        assert_eq!(prediction.winner(), Some(&id("A")));
        assert_eq!(
            prediction.basis,
            PredictionBasis::DirectHistory {
                winner: id("A"),
                loser: id("D"),
            }
        );

        let prediction = predict(&ledger, &engine, &id("a"), &id("d")).unwrap();
        assert_eq!(prediction.winner(), Some(&id("A")));
    }

    #[test]
    fn test_scores_decide_without_history() {
        let (ledger, engine) = setup(ScoringMode::Transitive, &[("a", "b"), ("b", "c")]);

        let prediction = predict(&ledger, &engine, &id("a"), &id("c")).unwrap();
        assert_eq!(prediction.winner(), Some(&id("A")));
        match prediction.basis {
            PredictionBasis::Scores { first, second } => {
                assert!(first > second);
                assert!((second - 0.15).abs() < 1e-9);
            }
            other => panic!("unexpected basis {:?}", other),
        }
    }

    #[test]
    fn test_unknown_competitors_tie() {
        let (ledger, engine) = setup(ScoringMode::Elo, &[("a", "b")]);

        let prediction = predict(&ledger, &engine, &id("x"), &id("y")).unwrap();
        assert!(prediction.is_tie());
        assert_eq!(prediction.outcome.to_string(), "Tie");
    }

    #[test]
    fn test_elo_mode_prediction() {
        let (ledger, engine) = setup(ScoringMode::Elo, &[("a", "b"), ("c", "d")]);

        // Equal records and equal ratings
        let prediction = predict(&ledger, &engine, &id("a"), &id("c")).unwrap();
        assert!(prediction.is_tie());

        let prediction = predict(&ledger, &engine, &id("b"), &id("c")).unwrap();
        assert_eq!(prediction.winner(), Some(&id("C")));
    }

    #[test]
    fn test_prediction_does_not_mutate_ledger() {
        let (ledger, engine) = setup(ScoringMode::Elo, &[("a", "b")]);
        let before = ledger.clone();

        predict(&ledger, &engine, &id("x"), &id("a")).unwrap();
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_self_prediction_rejected() {
        let (ledger, engine) = setup(ScoringMode::Elo, &[]);
        assert!(predict(&ledger, &engine, &id("a"), &id("a")).is_err());
    }
}
