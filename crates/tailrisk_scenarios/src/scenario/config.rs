//! Scenario configuration.
//!
//! A [`ScenarioConfig`] is plain data: it deserialises from TOML or JSON and
//! is turned into validated engine objects on demand. Field aliases accept the
//! short names used in the literature (`S0`, `r`, `sigma`, `T`, `B`, `z0`,
//! `Nmc`, `I0`).

use serde::{Deserialize, Serialize};
use tailrisk_core::types::{Result, RiskError};
use tailrisk_engine::mc::{LossModel, MonteCarloConfig};
use tailrisk_engine::quantile::{RobbinsMonroConfig, SamplingMode};
use tailrisk_models::analytical::OptionKind;
use tailrisk_models::gbm::SimulationParameters;
use tailrisk_models::loss::{LossTransform, OptionBasket};

/// How a terminal value becomes the variable whose quantile is estimated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LossSpec {
    /// P&L against a barrier, `S_T - B`. Losses sit in the lower tail.
    Threshold {
        /// Barrier B.
        #[serde(alias = "B")]
        threshold: f64,
    },
    /// A single option held at its closed-form price,
    /// `V0 - max(payoff(S_T), 0)`. Losses sit in the upper tail.
    Vanilla {
        /// Call or put.
        option: OptionKind,
        /// Strike K.
        strike: f64,
    },
    /// I0 independent call/put combinations revalued at the horizon.
    Basket {
        /// Number of instruments I0.
        #[serde(alias = "I0")]
        instruments: usize,
        /// Common strike K.
        strike: f64,
        /// Call weight.
        call_weight: f64,
        /// Put weight.
        put_weight: f64,
    },
    /// Draws straight from N(0, 1), bypassing the price model.
    ///
    /// Used to study solver behaviour against a known quantile.
    StandardNormal,
}

impl LossSpec {
    /// Whether a large loss shows up as a low value of the variable.
    ///
    /// Such variables report VaR as `-z`; loss variables report `z` itself.
    pub fn is_profit_and_loss(&self) -> bool {
        matches!(self, Self::Threshold { .. } | Self::StandardNormal)
    }

    /// Short label for tables and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Threshold { .. } => "threshold",
            Self::Vanilla { .. } => "vanilla",
            Self::Basket { .. } => "basket",
            Self::StandardNormal => "standard_normal",
        }
    }
}

impl Default for LossSpec {
    fn default() -> Self {
        Self::Threshold { threshold: 100.0 }
    }
}

/// Full description of one scenario.
///
/// Missing fields take the values of the reference scenario
/// (S0 = 100, r = 0, σ = 0.4, T = 1, B = 100, α = 1%, β = 100, λ = 0.6,
/// z0 = 0, Nmc = 10 000).
///
/// # Examples
///
/// ```
/// use tailrisk_scenarios::scenario::{LossSpec, ScenarioConfig};
///
/// let config: ScenarioConfig = serde_json::from_str(
///     r#"{ "name": "short", "T": 0.0274, "alpha": 0.001,
///          "loss": { "kind": "threshold", "B": 50.0 } }"#,
/// ).unwrap();
/// assert_eq!(config.horizon, 0.0274);
/// assert_eq!(config.initial_value, 100.0);
/// assert_eq!(config.loss, LossSpec::Threshold { threshold: 50.0 });
/// config.validate().unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Label used in reports.
    pub name: String,
    /// Initial value S0.
    #[serde(alias = "S0")]
    pub initial_value: f64,
    /// Drift r.
    #[serde(alias = "r")]
    pub drift: f64,
    /// Volatility σ.
    #[serde(alias = "sigma")]
    pub volatility: f64,
    /// Horizon T in years.
    #[serde(alias = "T")]
    pub horizon: f64,
    /// Time steps per path; 1 samples the terminal value directly.
    pub n_steps: usize,
    /// Confidence level α.
    pub alpha: f64,
    /// Step-size scale β.
    pub beta: f64,
    /// Step-size exponent λ.
    pub lambda: f64,
    /// Initial guess z0.
    #[serde(alias = "z0")]
    pub initial_guess: f64,
    /// Sample size Nmc, also the Robbins-Monro budget.
    #[serde(alias = "Nmc")]
    pub n_samples: usize,
    /// Seed of the scenario's random stream.
    pub seed: u64,
    /// Robbins-Monro sampling policy.
    pub sampling: SamplingMode,
    /// Keep the full iterate history in the outcome.
    pub record_history: bool,
    /// Loss definition.
    pub loss: LossSpec,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "reference".to_string(),
            initial_value: 100.0,
            drift: 0.0,
            volatility: 0.4,
            horizon: 1.0,
            n_steps: 1,
            alpha: 0.01,
            beta: 100.0,
            lambda: 0.6,
            initial_guess: 0.0,
            n_samples: 10_000,
            seed: 42,
            sampling: SamplingMode::FreshDraw,
            record_history: true,
            loss: LossSpec::default(),
        }
    }
}

impl ScenarioConfig {
    /// Validated GBM parameters.
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` for non-positive S0, σ or T, a
    /// non-finite drift, or zero steps.
    pub fn simulation_parameters(&self) -> Result<SimulationParameters> {
        SimulationParameters::new(self.initial_value, self.drift, self.volatility, self.horizon)?
            .with_steps(self.n_steps)
    }

    /// Loss model for the price-driven loss kinds.
    ///
    /// # Errors
    /// - `RiskError::InvalidParameter` for invalid model or loss parameters
    /// - `RiskError::Domain` if the reference price cannot be computed
    /// - `RiskError::InvalidInput` for [`LossSpec::StandardNormal`], which
    ///   has no price model
    pub fn loss_model(&self) -> Result<LossModel> {
        let params = self.simulation_parameters()?;
        let transform = match &self.loss {
            LossSpec::Threshold { threshold } => LossTransform::threshold(*threshold)?,
            LossSpec::Vanilla { option, strike } => {
                LossTransform::vanilla(*option, *strike, &params)?
            }
            LossSpec::Basket {
                instruments,
                strike,
                call_weight,
                put_weight,
            } => LossTransform::OptionBasket(OptionBasket::new(
                *instruments,
                *strike,
                *call_weight,
                *put_weight,
                &params,
            )?),
            LossSpec::StandardNormal => {
                return Err(RiskError::InvalidInput(
                    "standard_normal losses are not driven by a price model".to_string(),
                ))
            }
        };
        Ok(LossModel::new(params, transform))
    }

    /// Robbins-Monro configuration (α, β, λ, z0, Nmc).
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` as raised by the builder.
    pub fn robbins_monro_config(&self) -> Result<RobbinsMonroConfig> {
        RobbinsMonroConfig::builder()
            .alpha(self.alpha)
            .beta(self.beta)
            .lambda(self.lambda)
            .initial_guess(self.initial_guess)
            .n_iterations(self.n_samples)
            .record_history(self.record_history)
            .build()
    }

    /// Monte Carlo configuration for the empirical sample.
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` for a zero or oversized sample.
    pub fn monte_carlo_config(&self) -> Result<MonteCarloConfig> {
        Ok(MonteCarloConfig::builder()
            .n_samples(self.n_samples)
            .n_steps(self.n_steps)
            .seed(self.seed)
            .build()?)
    }

    /// Checks every parameter without running anything.
    ///
    /// # Errors
    /// The first violation found, as [`RiskError`].
    pub fn validate(&self) -> Result<()> {
        self.robbins_monro_config()?;
        self.monte_carlo_config()?;
        match self.loss {
            LossSpec::StandardNormal => Ok(()),
            _ => self.loss_model().map(|_| ()),
        }
    }
}
