//! Error types for structured error handling.
//!
//! This module provides:
//! - `RiskError`: The error taxonomy shared by the simulators, the loss
//!   transforms, both quantile estimators and the scenario driver
//!
//! Layer-specific errors (for example `AnalyticalError` in `tailrisk_models`)
//! convert into `RiskError` with `From`, so `?` works across layers.

use thiserror::Error;

/// Categorised tail-risk errors.
///
/// # Variants
/// - `InvalidParameter`: Out-of-range model or algorithm parameter, detected eagerly
/// - `Domain`: Closed-form formula evaluated outside its domain (log/sqrt of a non-positive value)
/// - `EmptySample`: Empirical estimator called on a zero-length sample
/// - `InvalidInput`: Malformed data (for example NaN inside a loss sample)
///
/// Parameters are never clamped silently; every violation surfaces as one of
/// these variants and aborts the computation that raised it.
///
/// # Examples
/// ```
/// use tailrisk_core::types::RiskError;
///
/// let err = RiskError::invalid_parameter("volatility", "must be positive, got -0.2");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'volatility': must be positive, got -0.2"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RiskError {
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        reason: String,
    },

    /// Closed-form evaluation outside the function domain.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Estimator refused to work on an empty sample.
    #[error("Empty sample: at least one observation is required")]
    EmptySample,

    /// Malformed input data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RiskError {
    /// Shorthand for [`RiskError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for parameter validation failures.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns `true` for closed-form domain failures.
    pub fn is_domain_error(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, RiskError>;
