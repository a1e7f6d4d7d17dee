//! Line-oriented command interpreter
//!
//! Parses user input into commands, runs them against a `GameSession` and
//! renders the results as console text.

pub mod command;
pub mod repl;
pub mod report;

pub use command::Command;
pub use repl::{execute, forward_lines, run, run_events, InputEvent, LoopControl};
