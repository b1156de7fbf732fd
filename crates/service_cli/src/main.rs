//! Tailrisk CLI - Command Line Operations for Tail-Risk Estimation
//!
//! This is the operational entry point for the tailrisk workspace.
//!
//! # Commands
//!
//! - `tailrisk run --config <file>` - Run the scenarios of a TOML file
//! - `tailrisk run --preset <name>` - Run a built-in scenario table
//! - `tailrisk presets` - List the built-in scenario tables
//! - `tailrisk check` - Compare both estimators on the reference scenario
//!
//! # Configuration
//!
//! Settings are layered, highest priority first: command-line flags,
//! `TAILRISK_LOG_LEVEL` / `TAILRISK_PARALLEL`, the scenario file, defaults.
//! `RUST_LOG`, when set, replaces the configured log filter entirely.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};

/// Tailrisk VaR / CVaR estimation CLI
#[derive(Parser)]
#[command(name = "tailrisk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Scenario file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (off, trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run scenarios and print VaR, CVaR and Robbins-Monro estimates
    Run {
        /// Run a built-in study instead of the file's scenarios
        #[arg(short, long)]
        preset: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Evaluate scenarios in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// List the built-in scenario tables
    Presets,

    /// Check both estimators against the closed-form reference
    Check {
        /// Seed of the reference run
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn init_tracing(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let parallel = matches!(cli.command, Commands::Run { parallel: true, .. });
    let args = CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        parallel,
    };
    if let Some(path) = &args.config_file {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
    }
    let config = build_config(&args)?;

    init_tracing(config.log_level);
    debug!(log_level = %config.log_level, parallel = config.parallel, "configuration loaded");

    match cli.command {
        Commands::Run { preset, format, .. } => {
            commands::run::run(&config, preset.as_deref(), &format)
        }
        Commands::Presets => commands::presets::run(cli.verbose),
        Commands::Check { seed } => commands::check::run(seed),
    }
}
