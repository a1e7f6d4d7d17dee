//! Configuration management for the game predictor
//!
//! This module handles configuration loading from environment variables and
//! TOML files, validation, and default values for the scoring engine.

pub mod app;
pub mod predictor;
pub mod scoring;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings, StorageSettings};
pub use predictor::PredictorConfig;
pub use scoring::ScoringConfig;
