//! Dataset files: JSON arrays or TOML `[[facts]]` tables.

use serde::Deserialize;
use std::path::Path;
use strictly_capitals::{CapitalFact, Dataset};
use tracing::{debug, info, instrument};

use crate::{ConfigError, QuizConfig};

#[derive(Debug, Deserialize)]
struct TomlDataset {
    facts: Vec<CapitalFact>,
}

/// Loads and validates a dataset file, picking the format by extension.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Failed to read dataset: {}", e)))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    debug!(?extension, "Parsing dataset");

    let facts: Vec<CapitalFact> = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse JSON dataset: {}", e)))?,
        Some("toml") => {
            toml::from_str::<TomlDataset>(&content)
                .map_err(|e| ConfigError::new(format!("Failed to parse TOML dataset: {}", e)))?
                .facts
        }
        other => {
            return Err(ConfigError::new(format!(
                "Unsupported dataset format {:?} (expected .json or .toml)",
                other.unwrap_or("")
            )));
        }
    };

    let dataset = Dataset::new(facts)?;
    info!(facts = dataset.len(), "Dataset loaded");
    Ok(dataset)
}

/// The configured dataset, or the built-in list when none is set.
#[instrument(skip(config))]
pub fn resolve_dataset(config: &QuizConfig) -> Result<Dataset, ConfigError> {
    match config.dataset() {
        Some(path) => load_dataset(path),
        None => {
            debug!("Using built-in dataset");
            Ok(Dataset::builtin())
        }
    }
}
