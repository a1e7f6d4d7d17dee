//! Predictor and reporting configuration

use crate::error::PredictorError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Predict every recorded match and keep accuracy statistics
    pub track_accuracy: bool,
    /// Number of recent predictions in the rolling accuracy window
    pub rolling_window: usize,
    /// Above this many competitors the score listing is abbreviated
    pub report_limit: usize,
    /// Competitors shown at each end of an abbreviated listing
    pub report_head: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            track_accuracy: true,
            rolling_window: 20,
            report_limit: 20,
            report_head: 10,
        }
    }
}

impl PredictorConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.rolling_window == 0 {
            return Err(PredictorError::ConfigurationError {
                message: "Rolling window must be greater than 0".to_string(),
            }
            .into());
        }

        if self.report_head == 0 || self.report_head * 2 > self.report_limit {
            return Err(PredictorError::ConfigurationError {
                message: format!(
                    "Report head ({}) must be positive and at most half the report limit ({})",
                    self.report_head, self.report_limit
                ),
            }
            .into());
        }

        Ok(())
    }
}
