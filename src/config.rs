//! Quiz configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_capitals::{RuleSet, SetupError};
use tracing::{debug, info, instrument};

/// Application configuration.
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Game rules (`[rules]` table).
    #[serde(default)]
    rules: RuleSet,

    /// Dataset file (JSON or TOML). Uses the built-in list when unset.
    #[serde(default)]
    dataset: Option<PathBuf>,

    /// Log file for the terminal UI.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Fallback tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

#[instrument]
fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_quiz.log")
}

#[instrument]
fn default_log_filter() -> String {
    "info,strictly_capitals=debug".to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            dataset: None,
            log_file: default_log_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl QuizConfig {
    /// Loads configuration from a TOML file and validates the rules.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.rules.validate()?;

        info!(rules = ?config.rules, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the dataset path when one is given.
    #[instrument(skip(self))]
    pub fn with_dataset(mut self, dataset: Option<PathBuf>) -> Self {
        if let Some(path) = dataset {
            debug!(path = %path.display(), "Overriding dataset");
            self.dataset = Some(path);
        }
        self
    }

    /// Overrides the log file when one is given.
    #[instrument(skip(self))]
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        if let Some(path) = log_file {
            self.log_file = path;
        }
        self
    }

    /// Renders the rules as a TOML `[rules]` table.
    #[instrument(skip(self))]
    pub fn rules_toml(&self) -> Result<String, ConfigError> {
        #[derive(Serialize)]
        struct RulesOnly<'a> {
            rules: &'a RuleSet,
        }

        toml::to_string_pretty(&RulesOnly { rules: &self.rules })
            .map_err(|e| ConfigError::new(format!("Failed to render rules: {}", e)))
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
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<SetupError> for ConfigError {
    #[track_caller]
    fn from(err: SetupError) -> Self {
        Self::new(err.message)
    }
}
