//! Console rendering of session results

use crate::predictor::PredictionAccuracy;
use crate::scoring::RankedCompetitor;
use crate::service::{LoadReport, MatchReport, ScoreListing};
use crate::types::{CompetitorId, CompetitorRecord, Prediction, PredictionBasis};

pub const HELP: &str = "Commands:
  win A B      → A beats B (alias: w)
  predict A B  → predict winner between A and B (alias: p)
  scores       → show scores of all items
  save         → save match data to file
  load         → load match data from file
  help         → show this list
  quit         → exit program";

fn labelled(id: &CompetitorId, record: CompetitorRecord) -> String {
    format!("{} ({})", id, record)
}

fn percent(rate: Option<f64>) -> String {
    rate.map(|rate| format!("{:.1}%", rate * 100.0))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Why the prediction came out the way it did
pub fn explanation(prediction: &Prediction) -> Vec<String> {
    match &prediction.basis {
        PredictionBasis::DirectHistory { winner, loser } => vec![format!(
            "{} has directly beaten {} before.",
            labelled(winner, prediction.record_of(winner)),
            labelled(loser, prediction.record_of(loser))
        )],
        PredictionBasis::Scores { first, second } => vec![
            format!(
                "{} score: {:.3}",
                labelled(&prediction.first, prediction.first_record),
                first
            ),
            format!(
                "{} score: {:.3}",
                labelled(&prediction.second, prediction.second_record),
                second
            ),
        ],
    }
}

pub fn prediction(prediction: &Prediction) -> Vec<String> {
    let mut lines = explanation(prediction);
    lines.push(format!("Predicted winner: {}", prediction.outcome));
    lines
}

pub fn accuracy(accuracy: &PredictionAccuracy) -> Vec<String> {
    vec![
        format!(
            "Rolling accuracy (last {}): {}/{} = {}",
            accuracy.rolling_len(),
            accuracy.rolling_correct(),
            accuracy.rolling_len(),
            percent(accuracy.rolling_rate())
        ),
        format!(
            "All-time accuracy: {}/{} = {}",
            accuracy.lifetime_correct(),
            accuracy.lifetime_total(),
            percent(accuracy.lifetime_rate())
        ),
    ]
}

pub fn match_recorded(report: &MatchReport, tracker: Option<&PredictionAccuracy>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(prediction) = &report.prediction {
        lines.extend(explanation(prediction));
    }
    if let Some(correct) = report.prediction_correct {
        lines.push(format!(
            "Prediction was {}.",
            if correct { "correct" } else { "wrong" }
        ));
    }
    if let Some(tracker) = tracker {
        lines.extend(accuracy(tracker));
    }

    lines.push(format!(
        "Recorded: {} beat {}",
        labelled(&report.winner, report.winner_record),
        labelled(&report.loser, report.loser_record)
    ));
    lines
}

fn ranked_line(entry: &RankedCompetitor) -> String {
    format!("{}: {:.3}", labelled(&entry.id, entry.record), entry.score)
}

pub fn scores(listing: &ScoreListing) -> Vec<String> {
    if listing.total == 0 {
        return vec!["No matches recorded yet.".to_string()];
    }

    if !listing.is_abbreviated() {
        return listing.top.iter().map(ranked_line).collect();
    }

    let mut lines = vec![format!("Top {}:", listing.top.len())];
    lines.extend(listing.top.iter().map(ranked_line));
    lines.push("...".to_string());
    lines.push(format!("Bottom {}:", listing.bottom.len()));
    lines.extend(listing.bottom.iter().map(ranked_line));
    lines
}

pub fn loaded(report: &LoadReport) -> Vec<String> {
    vec![
        format!(
            "Loaded from {} ({} competitors, {} matches)",
            report.location, report.competitors, report.matches
        ),
        format!(
            "Calculated elo scores (averaged over {} shuffled runs)",
            report.reconcile_runs
        ),
    ]
}
