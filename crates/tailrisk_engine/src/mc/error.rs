//! Error types for Monte Carlo sampling configuration.

use tailrisk_core::types::RiskError;
use thiserror::Error;

/// Configuration error for Monte Carlo sampling.
///
/// Raised while building a [`MonteCarloConfig`](super::MonteCarloConfig),
/// before any random number is drawn.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Sample count outside the valid range [1, 10_000_000].
    #[error("Invalid sample count {0}: must be in range [1, 10_000_000]")]
    InvalidSampleCount(usize),

    /// Step count outside the valid range [1, 10_000].
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),
}

impl From<ConfigError> for RiskError {
    fn from(err: ConfigError) -> Self {
        let name = match err {
            ConfigError::InvalidSampleCount(_) => "n_samples",
            ConfigError::InvalidStepCount(_) => "n_steps",
        };
        RiskError::invalid_parameter(name, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidSampleCount(0);
        assert!(err.to_string().contains("Invalid sample count 0"));

        let err = ConfigError::InvalidStepCount(20_000);
        assert!(err.to_string().contains("Invalid step count 20000"));
    }

    #[test]
    fn test_conversion_names_the_field() {
        match RiskError::from(ConfigError::InvalidSampleCount(0)) {
            RiskError::InvalidParameter { name, .. } => assert_eq!(name, "n_samples"),
            other => panic!("unexpected {:?}", other),
        }
        match RiskError::from(ConfigError::InvalidStepCount(0)) {
            RiskError::InvalidParameter { name, .. } => assert_eq!(name, "n_steps"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
