//! Interactive command loop
//!
//! The loop is generic over its output and reads either straight from a
//! `BufRead` or from a channel of input events, which is how the binary
//! delivers Ctrl-C. Recoverable errors are reported and the loop keeps
//! reading; only I/O failures on the console itself abort it.

use crate::cli::command::Command;
use crate::cli::report;
use crate::error::{PredictorError, Result};
use crate::service::GameSession;
use std::io::{BufRead, Write};
use std::sync::mpsc::{Receiver, Sender};
use tracing::{debug, error, info, warn};

const PROMPT: &str = "> ";

/// Whether the loop should keep reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Welcome text printed when the loop starts
pub fn banner() -> String {
    format!("Game predictor v{}\n{}", crate::VERSION, report::HELP)
}

/// Run one command against the session, writing its output to `out`
pub fn execute<W: Write>(
    session: &mut GameSession,
    command: Command,
    out: &mut W,
) -> Result<LoopControl> {
    debug!("Executing {:?}", command);

    match command {
        Command::Win { winner, loser } => {
            let match_report = session.record_win(&winner, &loser)?;
            write_lines(
                out,
                &report::match_recorded(&match_report, session.accuracy()),
            )?;
        }
        Command::Predict { first, second } => {
            let prediction = session.predict(&first, &second)?;
            write_lines(out, &report::prediction(&prediction))?;
        }
        Command::Scores => {
            let listing = session.scores();
            writeln!(out, "Scores ({}):", listing.mode)?;
            write_lines(out, &report::scores(&listing))?;
        }
        Command::Save => {
            let location = session.save()?;
            writeln!(out, "Saved to {}", location)?;
        }
        Command::Load => {
            let load_report = session.load()?;
            write_lines(out, &report::loaded(&load_report))?;
        }
        Command::Help => {
            writeln!(out, "{}", report::HELP)?;
        }
        Command::Quit => return Ok(LoopControl::Quit),
    }

    Ok(LoopControl::Continue)
}

/// Parse and execute a single input line, reporting any error to `out`
fn handle_line<W: Write>(
    session: &mut GameSession,
    line: &str,
    out: &mut W,
) -> Result<LoopControl> {
    let outcome = match Command::parse(line) {
        Ok(Some(command)) => execute(session, command, &mut *out),
        Ok(None) => Ok(LoopControl::Continue),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(control) => Ok(control),
        Err(e) => match e.downcast_ref::<PredictorError>() {
            Some(predictor_error) if predictor_error.is_recoverable() => {
                warn!("{}", predictor_error);
                writeln!(out, "{}", predictor_error)?;
                Ok(LoopControl::Continue)
            }
            _ => {
                error!("Command failed: {:#}", e);
                writeln!(out, "Error: {:#}", e)?;
                Ok(LoopControl::Continue)
            }
        },
    }
}

/// One unit of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Line(String),
    /// Ctrl-C from the signal handler
    Interrupted,
    /// End of input
    Closed,
}

/// Forward lines from `input` to `events` until the input ends or the
/// receiving loop has gone away
pub fn forward_lines<R: BufRead>(input: R, events: &Sender<InputEvent>) {
    for line in input.lines() {
        match line {
            Ok(line) => {
                if events.send(InputEvent::Line(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        }
    }
    let _ = events.send(InputEvent::Closed);
}

fn handle_event<W: Write>(
    session: &mut GameSession,
    event: InputEvent,
    out: &mut W,
) -> Result<LoopControl> {
    match event {
        InputEvent::Line(line) => handle_line(session, &line, out),
        InputEvent::Interrupted => {
            info!("Input interrupted");
            writeln!(out)?;
            Ok(LoopControl::Quit)
        }
        InputEvent::Closed => {
            writeln!(out)?;
            Ok(LoopControl::Quit)
        }
    }
}

/// Run the loop over events until `quit`, end of input or an interrupt
///
/// A disconnected channel counts as end of input.
pub fn run_events<W: Write>(
    session: &mut GameSession,
    events: &Receiver<InputEvent>,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", banner())?;

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let event = events.recv().unwrap_or(InputEvent::Closed);
        if handle_event(session, event, &mut output)? == LoopControl::Quit {
            break;
        }
    }

    writeln!(output, "Exiting.")?;
    info!("Command loop finished");
    Ok(())
}

/// Read commands directly from `input` until `quit` or end of input
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    mut input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", banner())?;

    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        let event = match input.read_line(&mut line)? {
            0 => InputEvent::Closed,
            _ => InputEvent::Line(line.clone()),
        };
        if handle_event(session, event, &mut output)? == LoopControl::Quit {
            break;
        }
    }

    writeln!(output, "Exiting.")?;
    info!("Command loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::ledger::InMemorySnapshotStore;
    use crate::types::CompetitorId;
    use std::io::Cursor;
    use std::sync::mpsc;

    fn session() -> GameSession {
        let mut config = AppConfig::default();
        config.scoring.rng_seed = Some(3);
        GameSession::with_store(config, Box::new(InMemorySnapshotStore::new())).unwrap()
    }

    fn run_script(session: &mut GameSession, script: &str) -> String {
        let mut output = Vec::new();
        run(session, Cursor::new(script.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_execute_quit() {
        let mut session = session();
        let mut out = Vec::new();
        assert_eq!(
            execute(&mut session, Command::Quit, &mut out).unwrap(),
            LoopControl::Quit
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_script_records_and_predicts() {
        let mut session = session();
        let output = run_script(&mut session, "win a b\n\np b a\nquit\nwin c d\n");

        assert!(output.starts_with("Game predictor v"));
        assert!(output.contains("Prediction was wrong."));
        assert!(output.contains("Recorded: A (1-0) beat B (0-1)"));
        assert!(output.contains("A (1-0) has directly beaten B (0-1) before."));
        assert!(output.contains("Predicted winner: A"));
        assert!(output.trim_end().ends_with("Exiting."));

        // Nothing after quit is processed
        assert!(session
            .ledger()
            .competitors()
            .iter()
            .all(|id| id.as_str() != "C"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let mut session = session();
        let output = run_script(&mut session, "fly away\nwin a a\nload\nwin a b\n");

        assert!(output.contains("Invalid command: fly away"));
        assert!(output.contains("No save file found at memory"));
        assert_eq!(
            session.ledger().match_count(&CompetitorId::new("a").unwrap()),
            1
        );
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut session = session();
        let output = run_script(&mut session, "scores");

        assert!(output.contains("Scores (elo):"));
        assert!(output.contains("No matches recorded yet."));
        assert!(output.trim_end().ends_with("Exiting."));
    }

    #[test]
    fn test_save_and_load_messages() {
        let mut session = session();
        let output = run_script(&mut session, "w a b\nsave\nload\n");

        assert!(output.contains("Saved to memory"));
        assert!(output.contains("Loaded from memory (2 competitors, 1 matches)"));
        assert!(output.contains("Calculated elo scores (averaged over 5 shuffled runs)"));
    }

    #[test]
    fn test_interrupt_stops_before_next_line() {
        let mut session = session();
        let (events, receiver) = mpsc::channel();
        events.send(InputEvent::Line("win a b".to_string())).unwrap();
        events.send(InputEvent::Interrupted).unwrap();
        events.send(InputEvent::Line("win c d".to_string())).unwrap();

        let mut output = Vec::new();
        run_events(&mut session, &receiver, &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(session.ledger().total_matches(), 1);
        assert!(output.ends_with("> \nExiting.\n"));
    }

    #[test]
    fn test_forwarded_lines_then_closed() {
        let mut session = session();
        let (events, receiver) = mpsc::channel();
        forward_lines(Cursor::new("w a b\nw b c\n"), &events);
        assert_eq!(receiver.try_recv().unwrap(), InputEvent::Line("w a b".to_string()));

        let mut output = Vec::new();
        run_events(&mut session, &receiver, &mut output).unwrap();

        assert_eq!(session.ledger().total_matches(), 1);
        assert!(String::from_utf8(output).unwrap().ends_with("Exiting.\n"));
    }

    #[test]
    fn test_dropped_sender_ends_loop() {
        let mut session = session();
        let (events, receiver) = mpsc::channel::<InputEvent>();
        drop(events);

        let mut output = Vec::new();
        run_events(&mut session, &receiver, &mut output).unwrap();
        assert!(String::from_utf8(output).unwrap().ends_with("Exiting.\n"));
    }
}
