//! CLI configuration management
//!
//! A scenario file, two environment variables and the command line are merged
//! into one [`CliConfig`]. Later sources win:
//!
//! 1. defaults
//! 2. scenario file (`--config`)
//! 3. `TAILRISK_LOG_LEVEL`, `TAILRISK_PARALLEL`
//! 4. command-line flags

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tailrisk_scenarios::scenario::ScenarioConfig;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level '{0}': expected off, trace, debug, info, warn or error")]
    InvalidLogLevel(String),

    #[error("Scenario file error: {0}")]
    FileError(String),

    #[error("Environment variable {name}: {reason}")]
    EnvError { name: &'static str, reason: String },
}

/// Parses a log level name, case-insensitively.
pub fn parse_log_level(name: &str) -> Result<LevelFilter, ConfigError> {
    name.trim()
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::InvalidLogLevel(name.to_string()))
}

fn log_level_from_str<'de, D>(deserializer: D) -> Result<LevelFilter, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    parse_log_level(&name).map_err(serde::de::Error::custom)
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::EnvError {
            name,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

/// Contents of a scenario file, after overrides
///
/// ```toml
/// log_level = "debug"
/// parallel = true
///
/// [[scenarios]]
/// name = "reference"
/// S0 = 100.0
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default tracing level when `RUST_LOG` is unset
    #[serde(deserialize_with = "log_level_from_str")]
    pub log_level: LevelFilter,
    /// Run scenario batches on the rayon pool
    pub parallel: bool,
    /// Scenarios declared in the file
    pub scenarios: Vec<ScenarioConfig>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::INFO,
            parallel: false,
            scenarios: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Parses a scenario file body
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::FileError(e.to_string()))
    }

    /// Reads and parses a scenario file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Applies the environment overrides
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(level) = std::env::var("TAILRISK_LOG_LEVEL") {
            self.log_level = parse_log_level(&level)?;
        }
        if let Ok(flag) = std::env::var("TAILRISK_PARALLEL") {
            self.parallel = parse_flag("TAILRISK_PARALLEL", &flag)?;
        }
        Ok(())
    }

    /// Applies the command-line overrides
    pub fn apply_args(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &args.log_level {
            self.log_level = parse_log_level(level)?;
        }
        self.parallel |= args.parallel;
        Ok(())
    }
}

/// Command-line values that take part in configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Scenario file
    pub config_file: Option<PathBuf>,
    /// `--log-level`
    pub log_level: Option<String>,
    /// `run --parallel`
    pub parallel: bool,
}

/// Merges defaults, file, environment and arguments
pub fn build_config(args: &CliArgs) -> Result<CliConfig, ConfigError> {
    let mut config = match &args.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    config.apply_env()?;
    config.apply_args(args)?;
    Ok(config)
}
