//! # tailrisk_core: Mathematical Foundation for Tail-Risk Estimation
//!
//! ## Layer 1 (Foundation) Role
//!
//! tailrisk_core is the bottom layer of the workspace and provides:
//! - The shared error taxonomy: `RiskError` (`types::error`)
//! - Standard normal CDF, PDF and quantile function (`math::distributions`)
//! - Sample statistics and empirical distribution grids (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other tailrisk_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use tailrisk_core::math::distributions::{norm_cdf, norm_inv_cdf};
//! use tailrisk_core::math::statistics::sample_mean;
//!
//! let p = norm_cdf(1.959_963_985_f64);
//! assert!((p - 0.975).abs() < 1e-6);
//!
//! let z = norm_inv_cdf(0.975).unwrap();
//! assert!((z - 1.959_963_985).abs() < 1e-6);
//!
//! let mean = sample_mean(&[1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(mean, 2.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `RiskError` and the grid types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

pub use types::{Result, RiskError};
