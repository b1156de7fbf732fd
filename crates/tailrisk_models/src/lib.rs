//! # tailrisk_models (L2: Models)
//!
//! Model-side building blocks for tail-risk estimation.
//!
//! This crate provides:
//! - Validated GBM simulation parameters with exact terminal quantiles (`gbm`)
//! - Zero-rate Black-Scholes call and put prices (`analytical`)
//! - Loss transforms from terminal values to scalar losses (`loss`)
//!
//! ## Design Principles
//!
//! - **Validate at construction**: parameters are checked once, so the
//!   simulators that consume them are infallible
//! - **Enum-based loss transforms** for static dispatch
//! - **Layer errors convert upward**: `AnalyticalError` becomes `RiskError::Domain`
//!
//! ## Usage Examples
//!
//! ```rust
//! use tailrisk_models::analytical::OptionKind;
//! use tailrisk_models::gbm::SimulationParameters;
//! use tailrisk_models::loss::LossTransform;
//!
//! let params = SimulationParameters::new(100.0, 0.0, 0.2, 1.0).unwrap();
//! let position = LossTransform::vanilla(OptionKind::Call, 100.0, &params).unwrap();
//!
//! // Expiring worthless loses the premium paid
//! let loss = position.loss(&[95.0]).unwrap();
//! assert!(loss > 7.9 && loss < 8.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod gbm;
pub mod loss;
