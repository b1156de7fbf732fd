//! Error types for closed-form pricing.
//!
//! This module provides:
//! - `AnalyticalError`: Inputs outside the domain of the Black-Scholes formula

use tailrisk_core::types::RiskError;
use thiserror::Error;

/// Closed-form pricing errors.
///
/// Every variant describes an input for which `ln(S/K)` or `σ√T` is
/// undefined or zero, so all of them map to [`RiskError::Domain`].
///
/// # Examples
/// ```
/// use tailrisk_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Non-positive spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Non-positive strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Non-positive volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Non-positive time to expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },
}

impl From<AnalyticalError> for RiskError {
    fn from(err: AnalyticalError) -> Self {
        RiskError::Domain(err.to_string())
    }
}
