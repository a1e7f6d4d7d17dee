//! Command parsing

use crate::error::PredictorError;
use crate::types::CompetitorId;

/// A single interpreter command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `win A B` / `w A B`
    Win {
        winner: CompetitorId,
        loser: CompetitorId,
    },
    /// `predict A B` / `p A B`
    Predict {
        first: CompetitorId,
        second: CompetitorId,
    },
    Scores,
    Save,
    Load,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    ///
    /// Blank lines yield `Ok(None)`. The verb is case-insensitive; unknown
    /// verbs and wrong argument counts are `PredictorError::InvalidCommand`.
    pub fn parse(line: &str) -> crate::error::Result<Option<Command>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((verb, args)) = parts.split_first() else {
            return Ok(None);
        };

        let command = match (verb.to_lowercase().as_str(), args) {
            ("win" | "w", [winner, loser]) => Command::Win {
                winner: CompetitorId::new(winner)?,
                loser: CompetitorId::new(loser)?,
            },
            ("predict" | "p", [first, second]) => Command::Predict {
                first: CompetitorId::new(first)?,
                second: CompetitorId::new(second)?,
            },
            ("scores", []) => Command::Scores,
            ("save", []) => Command::Save,
            ("load", []) => Command::Load,
            ("help", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,
            _ => {
                return Err(PredictorError::InvalidCommand {
                    input: line.trim().to_string(),
                }
                .into())
            }
        };

        Ok(Some(command))
    }
}
