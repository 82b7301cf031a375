//! Command-line interface for strictly_quiz.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Quiz - guess the capital in your terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_quiz")]
#[command(about = "Guess-the-capital quiz with single and multiple selection", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it doesn't exist)
    #[arg(short, long, global = true, default_value = "strictly_quiz.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the quiz in the terminal
    Play {
        /// Dataset file (.json or .toml), overriding the config
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Seed for a reproducible question sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Log file, overriding the config
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Validate a dataset and list its facts
    Dataset {
        /// Dataset file (.json or .toml), overriding the config
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },

    /// Print the active ruleset as TOML
    Rules,
}
