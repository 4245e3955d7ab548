//! Front-end configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictac_engine::{GameMode, HistoryOrder, Player};
use tracing::{debug, info, instrument};

/// Settings for an interactive game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayConfig {
    /// Pause before the computer's move, in milliseconds.
    #[serde(default = "default_delay_ms")]
    computer_delay_ms: u64,

    /// Fixed seed for the computer opponent.
    #[serde(default)]
    seed: Option<u64>,

    /// Initial move-list order.
    #[serde(default)]
    history_order: HistoryOrder,

    /// Sign to preselect in the menu.
    #[serde(default)]
    sign: Option<Player>,

    /// Mode to preselect in the menu.
    #[serde(default)]
    mode: Option<GameMode>,
}

fn default_delay_ms() -> u64 {
    400
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            computer_delay_ms: default_delay_ms(),
            seed: None,
            history_order: HistoryOrder::default(),
            sign: None,
            mode: None,
        }
    }
}

impl PlayConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(delay_ms = config.computer_delay_ms, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, seed: Option<u64>, delay_ms: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(delay_ms) = delay_ms {
            self.computer_delay_ms = delay_ms;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
