//! Quantile estimation: empirical (sorting) and Robbins-Monro (online).
//!
//! - [`empirical`]: VaR / CVaR from a materialised sample, floor index
//! - [`StepSizeSchedule`]: gains γₙ = β / (n+1)^λ
//! - [`RobbinsMonroSolver`]: stochastic approximation of the α-quantile with
//!   fresh-draw or bootstrap sampling
//!
//! Both estimators return signed quantiles of the loss variable. Reporting a
//! VaR as a positive magnitude (`-z`) is left to the caller.

pub mod empirical;
mod history;
mod robbins_monro;
mod schedule;

pub use empirical::TailEstimate;
pub use history::ConvergenceHistory;
pub use robbins_monro::{
    solve_bootstrap, solve_fresh, Bootstrap, DrawFn, LossSource, RobbinsMonroConfig,
    RobbinsMonroConfigBuilder, RobbinsMonroEstimate, RobbinsMonroSolver, SamplingMode,
};
pub use schedule::StepSizeSchedule;
