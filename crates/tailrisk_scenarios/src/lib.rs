//! # tailrisk_scenarios (L4: Application)
//!
//! End-to-end tail-risk scenarios: one configuration in, one outcome out.
//!
//! This crate provides:
//! - `ScenarioConfig`: the named scenario parameters (S0, r, σ, T, B, α, β, λ,
//!   z0, Nmc), loadable from TOML or JSON through serde
//! - `run_scenario`: sample → empirical VaR/CVaR → Robbins-Monro VaR
//! - `ScenarioBatch`: many scenarios with per-scenario failure isolation,
//!   sequentially or on rayon
//! - `PresetStudy`: the threshold grid, the median convergence study and the
//!   option-position study as ready-made scenario tables
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         tailrisk_scenarios (L4)         │
//! ├─────────────────────────────────────────┤
//! │  scenario/  - Config, driver, batch,    │
//! │               preset studies            │
//! │  parallel/  - Rayon utilities           │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          tailrisk_engine (L3)           │
//! │  Sampling, empirical and RM estimators  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tailrisk_scenarios::scenario::{run_scenario, ScenarioConfig};
//!
//! let config = ScenarioConfig {
//!     n_samples: 2_000,
//!     ..ScenarioConfig::default()
//! };
//! let outcome = run_scenario(&config).unwrap();
//!
//! // P&L below the barrier B = 100: the 1% quantile is a large loss
//! assert!(outcome.var > 30.0);
//! assert!(outcome.cvar >= outcome.var);
//! assert_eq!(outcome.history.as_ref().map(Vec::len), Some(2_001));
//! ```

#![deny(missing_docs)]

pub mod parallel;
pub mod scenario;

pub use scenario::{
    run_scenario, BatchEntry, LossSpec, PresetStudy, ScenarioBatch, ScenarioConfig,
    ScenarioError, ScenarioOutcome,
};
