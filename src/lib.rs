//! Strictly Quiz - guess the capital in the terminal.
//!
//! The game rules live in [`strictly_capitals`]; this crate adds the
//! configuration file, dataset loading, and the terminal front end.
//!
//! # Example
//!
//! ```no_run
//! use strictly_quiz::{App, QuizConfig, resolve_dataset, run_tui};
//! use strictly_capitals::RoundController;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = QuizConfig::load_or_default("strictly_quiz.toml")?;
//! let dataset = resolve_dataset(&config)?;
//! let controller = RoundController::new(dataset, *config.rules())?;
//! run_tui(App::new(controller))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod dataset;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, QuizConfig};

// Crate-level exports - Dataset files
pub use dataset::{load_dataset, resolve_dataset};

// Crate-level exports - Terminal UI
pub use tui::{Action, App, Focus, action_for, draw, run_tui};
