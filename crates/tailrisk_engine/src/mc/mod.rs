//! Monte Carlo loss sampling.
//!
//! # Architecture
//!
//! ```text
//! LossModel
//! ├── SimulationParameters  (validated GBM model)
//! ├── LossTransform         (terminal values -> loss)
//! └── Sampling
//!     ├── simulate_terminal_value()  one normal per value
//!     ├── simulate_path()            N normals per path
//!     └── generate_loss_sample()     Nmc observations -> LossSample
//! ```
//!
//! Randomness comes from an explicitly passed [`TailRng`](crate::rng::TailRng).

mod config;
mod error;
mod paths;
mod sample;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, MAX_SAMPLES, MAX_STEPS};
pub use error::ConfigError;
pub use paths::{simulate_path, simulate_paths, simulate_terminal_value, GbmPath};
pub use sample::{generate_loss_sample, probability_below, LossModel, LossSample};
