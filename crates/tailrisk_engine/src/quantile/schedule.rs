//! Step-size schedule γₙ = β / (n+1)^λ.

use tailrisk_core::types::{Result, RiskError};

/// Decreasing gain sequence for the Robbins-Monro recursion.
///
/// Convergence theory asks for Σγₙ = ∞ and Σγₙ² < ∞, which holds for
/// λ ∈ (0.5, 1]. The schedule accepts any λ in (0, 1) and reports whether
/// the condition holds through
/// [`satisfies_robbins_monro_conditions`](Self::satisfies_robbins_monro_conditions)
/// rather than refusing the smaller exponents.
///
/// # Examples
/// ```
/// use tailrisk_engine::quantile::StepSizeSchedule;
///
/// let schedule = StepSizeSchedule::new(1.0, 0.9).unwrap();
/// assert_eq!(schedule.gamma(0), 1.0);
/// assert!((schedule.gamma(9) - 10f64.powf(-0.9)).abs() < 1e-15);
/// assert!(schedule.satisfies_robbins_monro_conditions());
///
/// assert!(StepSizeSchedule::new(1.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepSizeSchedule {
    beta: f64,
    lambda: f64,
}

impl StepSizeSchedule {
    /// Creates a schedule.
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` if β is not positive and finite, or λ
    /// is not in (0, 1).
    pub fn new(beta: f64, lambda: f64) -> Result<Self> {
        if !(beta.is_finite() && beta > 0.0) {
            return Err(RiskError::invalid_parameter(
                "beta",
                format!("must be positive and finite, got {}", beta),
            ));
        }
        if !(lambda > 0.0 && lambda < 1.0) {
            return Err(RiskError::invalid_parameter(
                "lambda",
                format!("must lie in (0, 1), got {}", lambda),
            ));
        }
        Ok(Self { beta, lambda })
    }

    /// Scale β.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Decay exponent λ.
    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Gain for iteration `n` (zero-based).
    #[inline]
    pub fn gamma(&self, n: usize) -> f64 {
        self.beta / ((n + 1) as f64).powf(self.lambda)
    }

    /// Whether Σγₙ = ∞ and Σγₙ² < ∞, i.e. λ > 1/2.
    #[inline]
    pub fn satisfies_robbins_monro_conditions(&self) -> bool {
        self.lambda > 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gains_are_positive_and_decreasing() {
        let s = StepSizeSchedule::new(2.0, 0.7).unwrap();
        let gains: Vec<f64> = (0..1000).map(|n| s.gamma(n)).collect();
        assert!(gains.iter().all(|&g| g > 0.0));
        assert!(gains.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(gains[0], 2.0);
    }

    #[test]
    fn test_invalid_lambda_rejected() {
        for lambda in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let err = StepSizeSchedule::new(1.0, lambda).unwrap_err();
            match err {
                RiskError::InvalidParameter { name, .. } => assert_eq!(name, "lambda"),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_beta_rejected() {
        for beta in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            assert!(StepSizeSchedule::new(beta, 0.9).unwrap_err().is_invalid_parameter());
        }
    }

    #[test]
    fn test_condition_report() {
        assert!(StepSizeSchedule::new(1.0, 0.51).unwrap().satisfies_robbins_monro_conditions());
        assert!(!StepSizeSchedule::new(1.0, 0.5).unwrap().satisfies_robbins_monro_conditions());
        assert!(!StepSizeSchedule::new(1.0, 0.3).unwrap().satisfies_robbins_monro_conditions());
    }
}
