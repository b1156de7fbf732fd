//! Robbins-Monro stochastic approximation of a quantile.
//!
//! The α-quantile z* of a loss X solves `E[1{X ≤ z}] - α = 0`. The solver
//! walks towards it with one observation per iteration:
//!
//! ```text
//! ψₙ      = 1 if xₙ ≤ zₙ else 0
//! zₙ₊₁    = zₙ - γₙ·(ψₙ - α),   γₙ = β / (n+1)^λ
//! ```
//!
//! Iterates are never clipped and there is no increment-based stopping
//! rule: a run performs exactly `n_iterations` updates.

use tailrisk_core::types::{Result, RiskError};

use super::empirical::validate_alpha;
use super::history::ConvergenceHistory;
use super::schedule::StepSizeSchedule;
use crate::mc::LossModel;
use crate::rng::TailRng;

/// Where the solver's observations come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SamplingMode {
    /// Independent fresh draw from the loss model at every iteration.
    #[default]
    FreshDraw,
    /// Uniform resampling with replacement from one pre-generated sample.
    ///
    /// Biased towards the empirical quantile of that sample rather than the
    /// true quantile of the model.
    Bootstrap,
}

/// A stream of loss observations for the solver.
pub trait LossSource {
    /// Sampling policy this source implements.
    fn sampling_mode(&self) -> SamplingMode;

    /// Produces the next observation.
    ///
    /// # Errors
    /// Whatever the underlying model raises while drawing.
    fn next_loss(&mut self, rng: &mut TailRng) -> Result<f64>;
}

impl LossSource for &LossModel {
    fn sampling_mode(&self) -> SamplingMode {
        SamplingMode::FreshDraw
    }

    fn next_loss(&mut self, rng: &mut TailRng) -> Result<f64> {
        self.draw(rng)
    }
}

/// Fresh draws from an arbitrary closure, e.g. a known test distribution.
///
/// ```rust
/// use tailrisk_engine::quantile::{DrawFn, LossSource, SamplingMode};
/// use tailrisk_engine::rng::TailRng;
///
/// let mut source = DrawFn::new(|rng: &mut TailRng| Ok(rng.gen_normal()));
/// assert_eq!(source.sampling_mode(), SamplingMode::FreshDraw);
/// assert!(source.next_loss(&mut TailRng::from_seed(1)).unwrap().is_finite());
/// ```
pub struct DrawFn<F> {
    draw: F,
}

impl<F> DrawFn<F>
where
    F: FnMut(&mut TailRng) -> Result<f64>,
{
    /// Wraps a drawing closure.
    pub fn new(draw: F) -> Self {
        Self { draw }
    }
}

impl<F> LossSource for DrawFn<F>
where
    F: FnMut(&mut TailRng) -> Result<f64>,
{
    fn sampling_mode(&self) -> SamplingMode {
        SamplingMode::FreshDraw
    }

    fn next_loss(&mut self, rng: &mut TailRng) -> Result<f64> {
        (self.draw)(rng)
    }
}

/// Uniform resampling with replacement from a fixed sample.
#[derive(Debug, Clone, Copy)]
pub struct Bootstrap<'a> {
    sample: &'a [f64],
}

impl<'a> Bootstrap<'a> {
    /// Resamples from `sample`.
    ///
    /// # Errors
    /// `RiskError::EmptySample` for an empty sample.
    pub fn new(sample: &'a [f64]) -> Result<Self> {
        if sample.is_empty() {
            return Err(RiskError::EmptySample);
        }
        Ok(Self { sample })
    }
}

impl LossSource for Bootstrap<'_> {
    fn sampling_mode(&self) -> SamplingMode {
        SamplingMode::Bootstrap
    }

    fn next_loss(&mut self, rng: &mut TailRng) -> Result<f64> {
        Ok(self.sample[rng.gen_index(self.sample.len())])
    }
}

/// Validated Robbins-Monro configuration.
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::quantile::RobbinsMonroConfig;
///
/// let config = RobbinsMonroConfig::builder()
///     .alpha(0.01)
///     .beta(100.0)
///     .lambda(0.6)
///     .n_iterations(10_000)
///     .build()
///     .unwrap();
/// assert_eq!(config.initial_guess(), 0.0);
/// assert!(config.record_history());
///
/// assert!(RobbinsMonroConfig::builder().alpha(0.5).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RobbinsMonroConfig {
    alpha: f64,
    schedule: StepSizeSchedule,
    initial_guess: f64,
    n_iterations: usize,
    record_history: bool,
}

impl RobbinsMonroConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> RobbinsMonroConfigBuilder {
        RobbinsMonroConfigBuilder::default()
    }

    /// Target level α.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Gain schedule.
    #[inline]
    pub fn schedule(&self) -> StepSizeSchedule {
        self.schedule
    }

    /// Initial guess z₀.
    #[inline]
    pub fn initial_guess(&self) -> f64 {
        self.initial_guess
    }

    /// Iteration budget Nmc.
    #[inline]
    pub fn n_iterations(&self) -> usize {
        self.n_iterations
    }

    /// Whether iterates are recorded.
    #[inline]
    pub fn record_history(&self) -> bool {
        self.record_history
    }
}

/// Builder for [`RobbinsMonroConfig`].
///
/// Defaults: β = 1, λ = 0.9, z₀ = 0, history recorded. α and the
/// iteration budget must be set.
#[derive(Debug, Clone)]
pub struct RobbinsMonroConfigBuilder {
    alpha: Option<f64>,
    beta: f64,
    lambda: f64,
    initial_guess: f64,
    n_iterations: Option<usize>,
    record_history: bool,
}

impl Default for RobbinsMonroConfigBuilder {
    fn default() -> Self {
        Self {
            alpha: None,
            beta: 1.0,
            lambda: 0.9,
            initial_guess: 0.0,
            n_iterations: None,
            record_history: true,
        }
    }
}

impl RobbinsMonroConfigBuilder {
    /// Sets the target level α ∈ (0, 1).
    #[inline]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Sets the gain scale β > 0.
    #[inline]
    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the gain decay λ ∈ (0, 1).
    #[inline]
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets the initial guess z₀.
    #[inline]
    pub fn initial_guess(mut self, z0: f64) -> Self {
        self.initial_guess = z0;
        self
    }

    /// Sets the iteration budget Nmc ≥ 1.
    #[inline]
    pub fn n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = Some(n);
        self
    }

    /// Enables or disables history recording.
    #[inline]
    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` if α ∉ (0, 1), β ≤ 0, λ ∉ (0, 1),
    /// z₀ is not finite, or the iteration budget is unset or zero.
    pub fn build(self) -> Result<RobbinsMonroConfig> {
        let alpha = self
            .alpha
            .ok_or_else(|| RiskError::invalid_parameter("alpha", "must be specified"))?;
        validate_alpha(alpha)?;
        let schedule = StepSizeSchedule::new(self.beta, self.lambda)?;
        if !self.initial_guess.is_finite() {
            return Err(RiskError::invalid_parameter(
                "initial_guess",
                format!("must be finite, got {}", self.initial_guess),
            ));
        }
        let n_iterations = match self.n_iterations {
            Some(n) if n > 0 => n,
            _ => {
                return Err(RiskError::invalid_parameter(
                    "n_iterations",
                    "at least one iteration is required",
                ))
            }
        };

        Ok(RobbinsMonroConfig {
            alpha,
            schedule,
            initial_guess: self.initial_guess,
            n_iterations,
            record_history: self.record_history,
        })
    }
}

/// Final result of a Robbins-Monro run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RobbinsMonroEstimate {
    alpha: f64,
    quantile: f64,
    iterations: usize,
    sampling_mode: SamplingMode,
    history: Option<ConvergenceHistory>,
}

impl RobbinsMonroEstimate {
    /// Target level α.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Final iterate z*, the signed quantile estimate.
    #[inline]
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// VaR reported as a loss magnitude, `-z*`.
    #[inline]
    pub fn loss_magnitude(&self) -> f64 {
        -self.quantile
    }

    /// Number of updates performed.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Sampling policy of the run.
    #[inline]
    pub fn sampling_mode(&self) -> SamplingMode {
        self.sampling_mode
    }

    /// Recorded iterates, if recording was enabled.
    #[inline]
    pub fn history(&self) -> Option<&ConvergenceHistory> {
        self.history.as_ref()
    }

    /// Takes ownership of the recorded iterates.
    pub fn into_history(self) -> Option<ConvergenceHistory> {
        self.history
    }
}

/// Robbins-Monro solver state.
///
/// Owns the current iterate and its history. Drive it with [`run`](Self::run)
/// for a full budget, or call [`step`](Self::step) directly and stop whenever
/// the caller decides.
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::quantile::{RobbinsMonroConfig, RobbinsMonroSolver};
///
/// let config = RobbinsMonroConfig::builder()
///     .alpha(0.5)
///     .n_iterations(3)
///     .build()
///     .unwrap();
/// let mut solver = RobbinsMonroSolver::new(config);
///
/// // x = 1 > z = 0, so ψ = 0 and z moves up by γ₀·α = 0.5
/// assert_eq!(solver.step(1.0).unwrap(), 0.5);
/// assert_eq!(solver.history().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RobbinsMonroSolver {
    config: RobbinsMonroConfig,
    z: f64,
    iteration: usize,
    history: Option<ConvergenceHistory>,
}

impl RobbinsMonroSolver {
    /// Creates a solver positioned at the initial guess.
    pub fn new(config: RobbinsMonroConfig) -> Self {
        let history = config.record_history.then(|| {
            ConvergenceHistory::with_initial(config.initial_guess, config.n_iterations + 1)
        });
        Self {
            z: config.initial_guess,
            iteration: 0,
            history,
            config,
        }
    }

    /// Configuration in use.
    #[inline]
    pub fn config(&self) -> &RobbinsMonroConfig {
        &self.config
    }

    /// Current iterate zₙ.
    #[inline]
    pub fn current(&self) -> f64 {
        self.z
    }

    /// Updates performed so far.
    #[inline]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the iteration budget is exhausted.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.iteration >= self.config.n_iterations
    }

    /// Iterates recorded so far.
    #[inline]
    pub fn history(&self) -> Option<&ConvergenceHistory> {
        self.history.as_ref()
    }

    /// Applies one update with observation `x` and returns the new iterate.
    ///
    /// # Errors
    /// `RiskError::InvalidInput` if `x` is NaN; the state is left unchanged.
    pub fn step(&mut self, x: f64) -> Result<f64> {
        if x.is_nan() {
            return Err(RiskError::InvalidInput(format!(
                "NaN observation at iteration {}",
                self.iteration
            )));
        }
        let psi = if x <= self.z { 1.0 } else { 0.0 };
        let gamma = self.config.schedule.gamma(self.iteration);
        self.z -= gamma * (psi - self.config.alpha);
        self.iteration += 1;
        if let Some(history) = self.history.as_mut() {
            history.push(self.z);
        }
        Ok(self.z)
    }

    /// Runs the remaining budget against `source`.
    ///
    /// # Errors
    /// The first error raised by the source or by [`step`](Self::step).
    pub fn run<S: LossSource>(mut self, mut source: S, rng: &mut TailRng) -> Result<RobbinsMonroEstimate> {
        while !self.is_finished() {
            let x = source.next_loss(rng)?;
            self.step(x)?;
        }
        Ok(self.finish(source.sampling_mode()))
    }

    /// Stops the solver and returns its current state as an estimate.
    pub fn finish(self, sampling_mode: SamplingMode) -> RobbinsMonroEstimate {
        RobbinsMonroEstimate {
            alpha: self.config.alpha,
            quantile: self.z,
            iterations: self.iteration,
            sampling_mode,
            history: self.history,
        }
    }
}

/// Runs a full budget with independent draws from `model`.
///
/// # Errors
/// Any error raised while drawing.
pub fn solve_fresh(
    config: RobbinsMonroConfig,
    model: &LossModel,
    rng: &mut TailRng,
) -> Result<RobbinsMonroEstimate> {
    RobbinsMonroSolver::new(config).run(model, rng)
}

/// Runs a full budget by resampling `sample` with replacement.
///
/// # Errors
/// `RiskError::EmptySample` for an empty sample.
pub fn solve_bootstrap(
    config: RobbinsMonroConfig,
    sample: &[f64],
    rng: &mut TailRng,
) -> Result<RobbinsMonroEstimate> {
    RobbinsMonroSolver::new(config).run(Bootstrap::new(sample)?, rng)
}
