//! Service layer for the game predictor
//!
//! This module contains the session that owns all ledger, scoring and
//! accuracy state for one process.

pub mod session;

pub use session::{GameSession, LoadReport, MatchReport, ScoreListing};
