//! Strictly Quiz - Unified CLI
//!
//! Guess-the-capital quiz with several modes of operation.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use strictly_capitals::RoundController;
use strictly_quiz::{App, QuizConfig, resolve_dataset, run_tui};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            dataset,
            seed,
            log_file,
        } => run_play(cli.config, dataset, seed, log_file),
        Command::Dataset { dataset } => run_dataset(cli.config, dataset),
        Command::Rules => run_rules(cli.config),
    }
}

/// Play the quiz in the terminal.
fn run_play(
    config_path: PathBuf,
    dataset: Option<PathBuf>,
    seed: Option<u64>,
    log_file: Option<PathBuf>,
) -> Result<()> {
    let config = QuizConfig::load_or_default(&config_path)?
        .with_dataset(dataset)
        .with_log_file(log_file);

    // Log to a file so output never lands on the game screen.
    let log = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log))
        .with_ansi(false)
        .try_init();

    info!(config = %config_path.display(), ?seed, "Starting game");

    let dataset = resolve_dataset(&config)?;
    let controller = match seed {
        Some(seed) => RoundController::seeded(dataset, *config.rules(), seed)?,
        None => RoundController::new(dataset, *config.rules())?,
    };

    run_tui(App::new(controller))
}

/// Validate a dataset and list its facts.
#[instrument(skip_all)]
fn run_dataset(config_path: PathBuf, dataset: Option<PathBuf>) -> Result<()> {
    let config = QuizConfig::load_or_default(&config_path)?.with_dataset(dataset);
    initialize_cli_tracing(&config);

    let dataset = resolve_dataset(&config)?;
    let ready = dataset.ensure_choices(config.rules().choice_count);

    for fact in dataset.facts() {
        println!("{:<24} {}", fact.country(), fact.capital());
    }
    println!(
        "\n{} facts, {} distinct capitals",
        dataset.len(),
        dataset.distinct_capitals().len()
    );
    ready?;
    println!("Dataset is playable with the current rules.");
    Ok(())
}

/// Print the active ruleset.
#[instrument(skip_all)]
fn run_rules(config_path: PathBuf) -> Result<()> {
    let config = QuizConfig::load_or_default(&config_path)?;
    initialize_cli_tracing(&config);

    print!("{}", config.rules_toml()?);
    Ok(())
}

fn initialize_cli_tracing(config: &QuizConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
