//! Core error types.
//!
//! This module provides:
//! - `error`: The structured error taxonomy shared by every layer
//!
//! # Re-exports
//!
//! [`RiskError`] and the [`Result`] alias are re-exported at this level.

pub mod error;

pub use error::{Result, RiskError};
