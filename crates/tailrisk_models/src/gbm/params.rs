use tailrisk_core::math::{norm_cdf, norm_inv_cdf};
use tailrisk_core::types::{Result, RiskError};

/// Validated GBM simulation parameters.
///
/// Immutable once constructed: every accessor is read-only and the only way
/// to obtain a different configuration is to build a new value, which runs
/// validation again.
///
/// # Examples
/// ```
/// use tailrisk_models::gbm::SimulationParameters;
///
/// let params = SimulationParameters::new(100.0, 0.0, 0.4, 1.0)
///     .unwrap()
///     .with_steps(252)
///     .unwrap();
/// assert_eq!(params.n_steps(), 252);
/// assert!((params.dt() - 1.0 / 252.0).abs() < 1e-15);
///
/// assert!(SimulationParameters::new(100.0, 0.0, 0.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationParameters {
    initial_value: f64,
    drift: f64,
    volatility: f64,
    horizon: f64,
    n_steps: usize,
}

fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RiskError::invalid_parameter(
            name,
            format!("must be positive and finite, got {}", value),
        ))
    }
}

impl SimulationParameters {
    /// Creates parameters for a single-step (terminal value) simulation.
    ///
    /// # Arguments
    /// * `initial_value` - S0, must be positive
    /// * `drift` - r, any finite value
    /// * `volatility` - σ, must be positive
    /// * `horizon` - T in years, must be positive
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` naming the offending field.
    pub fn new(initial_value: f64, drift: f64, volatility: f64, horizon: f64) -> Result<Self> {
        require_positive("initial_value", initial_value)?;
        if !drift.is_finite() {
            return Err(RiskError::invalid_parameter(
                "drift",
                format!("must be finite, got {}", drift),
            ));
        }
        require_positive("volatility", volatility)?;
        require_positive("horizon", horizon)?;

        Ok(Self {
            initial_value,
            drift,
            volatility,
            horizon,
            n_steps: 1,
        })
    }

    /// Returns a copy with `n_steps` discretisation steps.
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` if `n_steps == 0`.
    pub fn with_steps(self, n_steps: usize) -> Result<Self> {
        if n_steps == 0 {
            return Err(RiskError::invalid_parameter(
                "n_steps",
                "at least one step is required",
            ));
        }
        Ok(Self { n_steps, ..self })
    }

    /// Initial value S0.
    #[inline]
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Drift r.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Horizon T in years.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Number of path steps N.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Step size dt = T / N.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.horizon / self.n_steps as f64
    }

    /// Log-space drift over an interval: (r - σ²/2)·dt.
    #[inline]
    pub fn log_drift(&self, dt: f64) -> f64 {
        (self.drift - 0.5 * self.volatility * self.volatility) * dt
    }

    /// Diffusion scale over an interval: σ·√dt.
    #[inline]
    pub fn diffusion_scale(&self, dt: f64) -> f64 {
        self.volatility * dt.sqrt()
    }

    /// Maps a standard normal draw to the terminal value
    /// S0·exp((r - σ²/2)·T + σ·√T·z).
    #[inline]
    pub fn terminal_value_from_normal(&self, z: f64) -> f64 {
        let t = self.horizon;
        self.initial_value * (self.log_drift(t) + self.diffusion_scale(t) * z).exp()
    }

    /// E[S_T] = S0·e^(rT).
    pub fn expected_terminal_value(&self) -> f64 {
        self.initial_value * (self.drift * self.horizon).exp()
    }

    /// Exact α-quantile of S_T.
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` if α is not in (0, 1).
    pub fn terminal_quantile(&self, alpha: f64) -> Result<f64> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(RiskError::invalid_parameter(
                "alpha",
                format!("must lie in (0, 1), got {}", alpha),
            ));
        }
        Ok(self.terminal_value_from_normal(norm_inv_cdf(alpha)?))
    }

    /// Exact P[S_T < level].
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` if `level` is NaN.
    pub fn probability_below(&self, level: f64) -> Result<f64> {
        if level.is_nan() {
            return Err(RiskError::invalid_parameter("level", "must not be NaN"));
        }
        if level <= 0.0 {
            return Ok(0.0);
        }
        let t = self.horizon;
        let standardised =
            ((level / self.initial_value).ln() - self.log_drift(t)) / self.diffusion_scale(t);
        Ok(norm_cdf(standardised))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference() -> SimulationParameters {
        SimulationParameters::new(100.0, 0.0, 0.4, 1.0).unwrap()
    }

    #[test]
    fn test_construction_defaults_to_one_step() {
        let p = reference();
        assert_eq!(p.n_steps(), 1);
        assert_eq!(p.dt(), 1.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let cases = [
            (0.0, 0.0, 0.4, 1.0, "initial_value"),
            (100.0, f64::NAN, 0.4, 1.0, "drift"),
            (100.0, 0.0, -0.4, 1.0, "volatility"),
            (100.0, 0.0, 0.4, 0.0, "horizon"),
            (100.0, 0.0, 0.4, f64::INFINITY, "horizon"),
        ];
        for (s0, r, sigma, t, expected) in cases {
            match SimulationParameters::new(s0, r, sigma, t) {
                Err(RiskError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected InvalidParameter for {}, got {:?}", expected, other),
            }
        }
        assert!(reference().with_steps(0).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_terminal_quantile_reference_scenario() {
        // S0 = 100, σ = 0.4, T = 1: q_0.01 = 100·exp(-0.08 - 0.4·2.3263)
        let q = reference().terminal_quantile(0.01).unwrap();
        assert_relative_eq!(q, 36.402, epsilon = 1e-2);
        assert!(reference().terminal_quantile(1.0).is_err());
    }

    #[test]
    fn test_probability_below_inverts_quantile() {
        let p = reference();
        for alpha in [0.001, 0.01, 0.5, 0.9] {
            let q = p.terminal_quantile(alpha).unwrap();
            assert_relative_eq!(p.probability_below(q).unwrap(), alpha, epsilon = 1e-6);
        }
        assert_eq!(p.probability_below(0.0).unwrap(), 0.0);
        assert!(p.probability_below(f64::NAN).is_err());
    }

    #[test]
    fn test_log_terms() {
        let p = SimulationParameters::new(50.0, 0.05, 0.2, 2.0).unwrap();
        assert_relative_eq!(p.log_drift(1.0), 0.03, epsilon = 1e-15);
        assert_relative_eq!(p.diffusion_scale(4.0), 0.4, epsilon = 1e-15);
        assert_relative_eq!(p.terminal_value_from_normal(0.0), 50.0 * (0.06_f64).exp());
        assert_relative_eq!(p.expected_terminal_value(), 50.0 * (0.1_f64).exp());
    }
}
