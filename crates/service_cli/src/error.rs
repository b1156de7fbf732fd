//! CLI error types

use tailrisk_core::types::RiskError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed { failed: usize, total: usize },

    #[error("Reference check failed: {0}")]
    CheckFailed(String),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use std::path::Path;

    #[test]
    fn test_unreadable_scenario_file_is_a_config_error() {
        let err: CliError = CliConfig::from_file(Path::new("/nonexistent/tailrisk.toml"))
            .unwrap_err()
            .into();
        assert!(matches!(err, CliError::Config(ConfigError::FileError(_))));
        assert!(err.to_string().contains("tailrisk.toml"));
    }
}
