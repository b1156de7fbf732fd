//! Preset scenario tables.
//!
//! Ready-made studies:
//! - Threshold grid: B ∈ {100, 50, 36}, T ∈ {1, 10/365}, α ∈ {1%, 0.1%}
//! - Median convergence: z0 / β sensitivity of the solver at α = 1/2
//! - Option positions: a single call and a short call/put basket at
//!   α ∈ {97%, 99%, 99.99%}

use std::fmt;
use std::str::FromStr;

use tailrisk_core::types::RiskError;
use tailrisk_engine::quantile::SamplingMode;
use tailrisk_models::analytical::OptionKind;

use super::config::{LossSpec, ScenarioConfig};

/// Ten trading days in years.
pub const TEN_DAYS: f64 = 10.0 / 365.0;

/// Types of preset studies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetStudy {
    /// VaR of `S_T - B` over the barrier / horizon / level grid
    ThresholdGrid,
    /// Robbins-Monro on N(0, 1) at α = 1/2 for several (z0, β)
    MedianConvergence,
    /// Single call and I0 = 10 call/put basket at high confidence
    OptionPositions,
}

impl PresetStudy {
    /// Every preset, in display order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::ThresholdGrid,
            Self::MedianConvergence,
            Self::OptionPositions,
        ]
    }

    /// Get machine-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ThresholdGrid => "threshold-grid",
            Self::MedianConvergence => "median-convergence",
            Self::OptionPositions => "option-positions",
        }
    }

    /// Get description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ThresholdGrid => {
                "VaR of S_T - B for B in {100, 50, 36}, T in {1y, 10d}, alpha in {1%, 0.1%}"
            }
            Self::MedianConvergence => {
                "Robbins-Monro median of N(0,1) from several initial guesses and gains"
            }
            Self::OptionPositions => {
                "Single call and short 10-instrument call/put basket at 97%, 99% and 99.99%"
            }
        }
    }

    /// Scenario table of the study.
    pub fn scenarios(&self) -> Vec<ScenarioConfig> {
        match self {
            Self::ThresholdGrid => threshold_grid(),
            Self::MedianConvergence => median_convergence(),
            Self::OptionPositions => option_positions(),
        }
    }
}

impl fmt::Display for PresetStudy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PresetStudy {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|study| study.name() == s.to_lowercase())
            .ok_or_else(|| RiskError::InvalidInput(format!("unknown preset study: {}", s)))
    }
}

/// Gain scale matched to the spread of S_T.
fn scaled_beta(initial_value: f64, volatility: f64, horizon: f64) -> f64 {
    2.5 * initial_value * volatility * horizon.sqrt()
}

fn threshold_grid() -> Vec<ScenarioConfig> {
    let rows: [(f64, f64, f64); 7] = [
        (100.0, 1.0, 0.01),
        (100.0, 1.0, 0.001),
        (100.0, TEN_DAYS, 0.01),
        (100.0, TEN_DAYS, 0.001),
        (50.0, 1.0, 0.01),
        (50.0, 1.0, 0.001),
        (36.0, 1.0, 0.01),
    ];

    rows.iter()
        .map(|&(threshold, horizon, alpha)| {
            let base = ScenarioConfig::default();
            ScenarioConfig {
                name: format!(
                    "B={} T={} alpha={}",
                    threshold,
                    if horizon == 1.0 { "1y" } else { "10d" },
                    alpha
                ),
                horizon,
                alpha,
                beta: scaled_beta(base.initial_value, base.volatility, horizon),
                initial_guess: -10.0,
                loss: LossSpec::Threshold { threshold },
                ..base
            }
        })
        .collect()
}

fn median_convergence() -> Vec<ScenarioConfig> {
    let rows: [(f64, f64); 6] = [
        (1.0, 10.0),
        (1.0, 1.0),
        (0.1, 1.0),
        (1.0, 0.1),
        (1.0, 100.0),
        (1.0, 1000.0),
    ];

    rows.iter()
        .map(|&(initial_guess, beta)| ScenarioConfig {
            name: format!("median z0={} beta={}", initial_guess, beta),
            alpha: 0.5,
            beta,
            lambda: 0.9,
            initial_guess,
            loss: LossSpec::StandardNormal,
            ..ScenarioConfig::default()
        })
        .collect()
}

fn option_positions() -> Vec<ScenarioConfig> {
    let base = ScenarioConfig {
        volatility: 0.2,
        sampling: SamplingMode::Bootstrap,
        ..ScenarioConfig::default()
    };
    let positions = [
        (
            "call",
            10.0,
            LossSpec::Vanilla {
                option: OptionKind::Call,
                strike: 100.0,
            },
        ),
        (
            "basket",
            100.0,
            LossSpec::Basket {
                instruments: 10,
                strike: 100.0,
                call_weight: -10.0,
                put_weight: -5.0,
            },
        ),
    ];

    let mut scenarios = Vec::new();
    for (label, beta, loss) in positions.iter() {
        for alpha in [0.97, 0.99, 0.9999] {
            scenarios.push(ScenarioConfig {
                name: format!("{} alpha={}", label, alpha),
                alpha,
                beta: *beta,
                loss: loss.clone(),
                ..base.clone()
            });
        }
    }
    scenarios
}
