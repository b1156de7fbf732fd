//! Scenario driver: sample, estimate empirically, then run Robbins-Monro.

use serde::{Deserialize, Serialize};
use tailrisk_core::math::distributions::norm_inv_cdf;
use tailrisk_core::types::Result;
use tailrisk_engine::mc::{generate_loss_sample, LossModel, LossSample, MonteCarloConfig};
use tailrisk_engine::quantile::{
    empirical, solve_bootstrap, solve_fresh, DrawFn, RobbinsMonroConfig, RobbinsMonroEstimate,
    RobbinsMonroSolver, SamplingMode, TailEstimate,
};
use tailrisk_engine::rng::TailRng;
use tailrisk_models::loss::LossTransform;
use tracing::{debug, info_span};

use super::config::{LossSpec, ScenarioConfig};

/// Result of one scenario.
///
/// `var`, `cvar` and `rm_var` are oriented so that a larger number means a
/// larger loss: P&L variables (threshold, standard normal) report `-z`,
/// loss variables (vanilla, basket) report `z`. CVaR averages the adverse
/// side of the quantile: `-mean(sorted[..=k])` for P&L variables and
/// `mean(sorted[k..])` for loss variables, so `cvar >= var` for every kind.
/// The signed estimates are kept in `empirical` and `rm_quantile`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario label.
    pub name: String,
    /// Loss kind label.
    pub loss_kind: String,
    /// Confidence level α.
    pub alpha: f64,
    /// Sample size and Robbins-Monro budget.
    pub n_samples: usize,
    /// Signed empirical estimate.
    pub empirical: TailEstimate,
    /// Signed Robbins-Monro quantile z*.
    pub rm_quantile: f64,
    /// Empirical VaR.
    pub var: f64,
    /// Empirical CVaR.
    pub cvar: f64,
    /// Robbins-Monro VaR.
    pub rm_var: f64,
    /// Robbins-Monro sampling policy.
    pub sampling: SamplingMode,
    /// Iterates z₀ … z_Nmc when recording was enabled.
    pub history: Option<Vec<f64>>,
    /// Closed-form signed quantile, where one exists.
    pub reference_quantile: Option<f64>,
}

impl ScenarioOutcome {
    /// `|rm_var - var| / |var|`, or `None` when the empirical VaR is zero.
    pub fn relative_gap(&self) -> Option<f64> {
        if self.var == 0.0 {
            None
        } else {
            Some((self.rm_var - self.var).abs() / self.var.abs())
        }
    }
}

enum Target {
    Model(LossModel),
    StandardNormal,
}

impl Target {
    fn from_config(config: &ScenarioConfig) -> Result<Self> {
        match config.loss {
            LossSpec::StandardNormal => Ok(Self::StandardNormal),
            _ => config.loss_model().map(Self::Model),
        }
    }

    fn sample(&self, mc: &MonteCarloConfig, rng: &mut TailRng) -> Result<LossSample> {
        match self {
            Self::Model(model) => generate_loss_sample(model, mc, rng),
            Self::StandardNormal => {
                let mut values = vec![0.0; mc.n_samples()];
                rng.fill_normal(&mut values);
                LossSample::new(values)
            }
        }
    }

    fn solve_fresh(
        &self,
        config: RobbinsMonroConfig,
        rng: &mut TailRng,
    ) -> Result<RobbinsMonroEstimate> {
        match self {
            Self::Model(model) => solve_fresh(config, model, rng),
            Self::StandardNormal => RobbinsMonroSolver::new(config)
                .run(DrawFn::new(|rng: &mut TailRng| Ok(rng.gen_normal())), rng),
        }
    }

    fn reference_quantile(&self, alpha: f64) -> Result<Option<f64>> {
        match self {
            Self::Model(model) => match model.transform() {
                LossTransform::Threshold { threshold } => {
                    Ok(Some(model.params().terminal_quantile(alpha)? - threshold))
                }
                _ => Ok(None),
            },
            Self::StandardNormal => norm_inv_cdf(alpha).map(Some),
        }
    }
}

/// Runs one scenario on its own seeded stream.
///
/// Equivalent to [`run_scenario_with_rng`] with `TailRng::from_seed(config.seed)`.
///
/// # Errors
/// Any validation or sampling error of the scenario, as `RiskError`.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioOutcome> {
    let mut rng = TailRng::from_seed(config.seed);
    run_scenario_with_rng(config, &mut rng)
}

/// Runs one scenario with a caller-supplied generator.
///
/// Steps, all on `rng` in this order:
/// 1. draw Nmc losses and estimate VaR/CVaR by sorting
/// 2. run Nmc Robbins-Monro updates, either on fresh draws or by
///    resampling the sample from step 1
///
/// Every parameter is validated before the first draw.
///
/// # Errors
/// Any validation or sampling error of the scenario, as `RiskError`.
pub fn run_scenario_with_rng(
    config: &ScenarioConfig,
    rng: &mut TailRng,
) -> Result<ScenarioOutcome> {
    let span = info_span!("scenario", name = %config.name, alpha = config.alpha);
    let _enter = span.enter();

    let rm_config = config.robbins_monro_config()?;
    let mc_config = config.monte_carlo_config()?;
    let target = Target::from_config(config)?;

    let sample = target.sample(&mc_config, rng)?;
    let tail = empirical::estimate(&sample, config.alpha)?;
    debug!(
        n_samples = sample.len(),
        index = tail.index,
        var = tail.var,
        cvar = tail.cvar,
        "empirical estimate"
    );

    let estimate = match config.sampling {
        SamplingMode::FreshDraw => target.solve_fresh(rm_config, rng)?,
        SamplingMode::Bootstrap => solve_bootstrap(rm_config, sample.as_slice(), rng)?,
    };
    debug!(
        quantile = estimate.quantile(),
        iterations = estimate.iterations(),
        sampling = ?estimate.sampling_mode(),
        "robbins-monro finished"
    );

    let pnl = config.loss.is_profit_and_loss();
    let orient = |z: f64| if pnl { -z } else { z };
    let cvar = if pnl { -tail.cvar } else { tail.upper_mean };

    Ok(ScenarioOutcome {
        name: config.name.clone(),
        loss_kind: config.loss.label().to_string(),
        alpha: config.alpha,
        n_samples: config.n_samples,
        var: orient(tail.var),
        cvar,
        rm_var: orient(estimate.quantile()),
        empirical: tail,
        rm_quantile: estimate.quantile(),
        sampling: estimate.sampling_mode(),
        reference_quantile: target.reference_quantile(config.alpha)?,
        history: estimate
            .into_history()
            .map(|history| history.as_slice().to_vec()),
    })
}
