//! Main application configuration
//!
//! This module defines the primary configuration structures for the game
//! predictor, including environment variable loading, TOML files and
//! validation.

use crate::config::{PredictorConfig, ScoringConfig};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub storage: StorageSettings,
    pub scoring: ScoringConfig,
    pub predictor: PredictorConfig,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Name shown in the startup banner
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Save file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Path of the JSON save file
    pub save_path: PathBuf,
    /// Restore the save file before the first command
    pub load_on_start: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "game-predictor".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("game_data.json"),
            load_on_start: false,
        }
    }
}

/// Parse an override value, naming the variable on failure
fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {} value: {}", key, value))
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_overrides(|key| env::var(key).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Apply `PREDICTOR_*` style overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Storage settings
        if let Some(path) = lookup("PREDICTOR_SAVE_FILE") {
            self.storage.save_path = PathBuf::from(path);
        }
        if let Some(load) = lookup("PREDICTOR_LOAD_ON_START") {
            self.storage.load_on_start = parse_var("PREDICTOR_LOAD_ON_START", &load)?;
        }

        // Scoring settings
        if let Some(mode) = lookup("PREDICTOR_SCORING_MODE") {
            self.scoring.mode = mode
                .parse()
                .map_err(|_| anyhow!("Invalid PREDICTOR_SCORING_MODE value: {}", mode))?;
        }
        if let Some(k) = lookup("PREDICTOR_K_FACTOR") {
            self.scoring.k_factor = parse_var("PREDICTOR_K_FACTOR", &k)?;
        }
        if let Some(runs) = lookup("PREDICTOR_RECONCILE_RUNS") {
            self.scoring.reconcile_runs = parse_var("PREDICTOR_RECONCILE_RUNS", &runs)?;
        }
        if let Some(depth) = lookup("PREDICTOR_MAX_DEPTH") {
            self.scoring.max_depth = parse_var("PREDICTOR_MAX_DEPTH", &depth)?;
        }
        if let Some(seed) = lookup("PREDICTOR_RNG_SEED") {
            self.scoring.rng_seed = Some(parse_var("PREDICTOR_RNG_SEED", &seed)?);
        }

        // Predictor settings
        if let Some(track) = lookup("PREDICTOR_TRACK_ACCURACY") {
            self.predictor.track_accuracy = parse_var("PREDICTOR_TRACK_ACCURACY", &track)?;
        }
        if let Some(window) = lookup("PREDICTOR_ROLLING_WINDOW") {
            self.predictor.rolling_window = parse_var("PREDICTOR_ROLLING_WINDOW", &window)?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.storage.save_path.as_os_str().is_empty() {
        return Err(anyhow!("Save path cannot be empty"));
    }

    config.scoring.validate()?;
    config.predictor.validate()?;

    Ok(())
}
