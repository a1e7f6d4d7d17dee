//! Error types for the game predictor
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the application.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific prediction scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictorError {
    #[error("No save file found at {path}")]
    MissingSaveFile { path: String },

    #[error("Malformed save data: {reason}")]
    MalformedData { reason: String },

    #[error("Invalid command: {input}")]
    InvalidCommand { input: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl PredictorError {
    /// Whether the command loop should report this error and keep going
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PredictorError::ConfigurationError { .. })
    }
}
