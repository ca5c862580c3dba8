//! ATM CLI - interactive teller machine on the console
//!
//! Usage:
//! ```bash
//! atm                                  # demo users user1/1234, user2/5678
//! atm --seed users.json                # custom seed users
//! atm --log-level info 2> atm.log      # logs go to stderr
//! ```

use anyhow::{Context, Result};
use atm_business::{AtmConfig, Directory, SessionController};
use atm_cli::Console;
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;

/// ATM - a single-user console teller machine over an in-memory ledger
#[derive(Parser)]
#[command(name = "atm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file with seed users (defaults to the two demo users)
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Log verbosity; logs are written to stderr
    #[arg(long, default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing (stderr, so logs never mix with the console protocol)
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level.to_tracing_level())
        .with_writer(io::stderr)
        .init();

    let config = match &cli.seed {
        Some(path) => AtmConfig::from_json_file(path)
            .with_context(|| format!("Failed to load seed users from {:?}", path))?,
        None => AtmConfig::default(),
    };
    let directory = Directory::from_config(&config).context("Failed to build user directory")?;
    tracing::info!(users = directory.len(), "ATM ready");

    let mut session = SessionController::new(directory);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock()).run(&mut session)?;

    tracing::info!("Input closed, shutting down");
    Ok(())
}
