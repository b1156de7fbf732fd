//! Monte Carlo sampling configuration.

use super::error::ConfigError;

/// Maximum number of loss observations per sample.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Upper bound on the GBM discretisation of one path.
pub const MAX_STEPS: usize = 10_000;

/// Size of a loss sample: how many terminal values to draw and how finely
/// each path is stepped.
///
/// ```rust
/// use tailrisk_engine::mc::MonteCarloConfig;
///
/// // Nmc = 5000 ten-step paths
/// let sampling = MonteCarloConfig::builder()
///     .n_samples(5_000)
///     .n_steps(10)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!((sampling.n_samples(), sampling.n_steps()), (5_000, 10));
/// assert_eq!(sampling.seed(), Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MonteCarloConfig {
    n_samples: usize,
    n_steps: usize,
    seed: Option<u64>,
}

impl MonteCarloConfig {
    /// Starts a builder with no sample count set.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Number of loss observations (Nmc).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Number of time steps per simulated path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Seed the sample was requested with, if any.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Checks `1 <= n_samples <= MAX_SAMPLES` and `1 <= n_steps <= MAX_STEPS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_samples == 0 || self.n_samples > MAX_SAMPLES {
            return Err(ConfigError::InvalidSampleCount(self.n_samples));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// `n_samples` has no default and must be set; `n_steps` defaults to 1
/// (terminal values only).
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_samples: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of loss observations, in [1, 10_000_000].
    #[inline]
    pub fn n_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = Some(n_samples);
        self
    }

    /// Sets the number of time steps per path, in [1, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Records the seed the sample should be drawn with.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Finishes the builder. An unset sample count is reported as
    /// `InvalidSampleCount(0)`.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let config = MonteCarloConfig {
            n_samples: self.n_samples.unwrap_or(0),
            n_steps: self.n_steps.unwrap_or(1),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
