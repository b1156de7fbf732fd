//! Closed-form pricing used to revalue option positions.
//!
//! This module provides:
//! - Zero-rate Black-Scholes call and put prices
//! - `AnalyticalError` for inputs outside the formula's domain
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: `BlackScholes<T>` works for `f32` and `f64`
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy in the tails

pub mod black_scholes;
pub mod error;

pub use black_scholes::{call_price, put_price, BlackScholes, OptionKind};
pub use error::AnalyticalError;
