//! # tailrisk_engine (L3: Engine)
//!
//! Sampling and estimation engine for tail-risk measures.
//!
//! This crate provides:
//! - Seeded random streams ([`rng::TailRng`])
//! - GBM terminal-value and path simulation, loss sampling ([`mc`])
//! - Empirical VaR / CVaR and the Robbins-Monro quantile solver ([`quantile`])
//!
//! ## Usage Examples
//!
//! ```rust
//! use tailrisk_engine::mc::{generate_loss_sample, LossModel, MonteCarloConfig};
//! use tailrisk_engine::quantile::{empirical, solve_fresh, RobbinsMonroConfig};
//! use tailrisk_engine::rng::TailRng;
//! use tailrisk_models::gbm::SimulationParameters;
//! use tailrisk_models::loss::LossTransform;
//!
//! let params = SimulationParameters::new(100.0, 0.0, 0.4, 1.0).unwrap();
//! let model = LossModel::new(params, LossTransform::threshold(100.0).unwrap());
//! let mut rng = TailRng::from_seed(42);
//!
//! let mc = MonteCarloConfig::builder().n_samples(5_000).build().unwrap();
//! let sample = generate_loss_sample(&model, &mc, &mut rng).unwrap();
//! let tail = empirical::estimate(&sample, 0.05).unwrap();
//! assert!(tail.cvar <= tail.var);
//!
//! let rm = RobbinsMonroConfig::builder()
//!     .alpha(0.05)
//!     .beta(50.0)
//!     .lambda(0.6)
//!     .n_iterations(5_000)
//!     .build()
//!     .unwrap();
//! let estimate = solve_fresh(rm, &model, &mut rng).unwrap();
//! assert_eq!(estimate.history().unwrap().len(), 5_001);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod quantile;
pub mod rng;
