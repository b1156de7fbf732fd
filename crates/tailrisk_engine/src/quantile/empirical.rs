//! Empirical VaR / CVaR by sorting.
//!
//! For a sample of size N and confidence level α:
//!
//! ```text
//! k    = floor(N·α), clamped to [0, N-1]
//! VaR  = sorted[k]
//! CVaR = mean(sorted[0..=k])
//! ```
//!
//! The mean of `sorted[k..]` is carried as well, for variables whose adverse
//! tail is the upper one.
//!
//! The index is truncated, never interpolated. For small N·α this biases the
//! quantile by up to one order statistic; callers who need a smoother
//! estimate should increase N.

use tailrisk_core::types::{Result, RiskError};

use crate::mc::LossSample;

/// Empirical lower-tail estimate at one confidence level.
///
/// `var` and `cvar` are signed quantiles of the loss variable;
/// `cvar <= var <= upper_mean` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TailEstimate {
    /// Confidence level α.
    pub alpha: f64,
    /// Order-statistic index k.
    pub index: usize,
    /// α-quantile `sorted[k]`.
    pub var: f64,
    /// Mean of the k + 1 smallest observations.
    pub cvar: f64,
    /// Mean of the observations from rank k upward.
    pub upper_mean: f64,
}

pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(RiskError::invalid_parameter(
            "alpha",
            format!("must lie in (0, 1), got {}", alpha),
        ))
    }
}

fn sorted_copy(sample: &[f64]) -> Result<Vec<f64>> {
    if sample.is_empty() {
        return Err(RiskError::EmptySample);
    }
    if let Some(index) = sample.iter().position(|v| v.is_nan()) {
        return Err(RiskError::InvalidInput(format!(
            "NaN loss at index {}",
            index
        )));
    }
    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

fn tail_from_sorted(sorted: &[f64], alpha: f64) -> TailEstimate {
    let n = sorted.len();
    let index = ((n as f64 * alpha).floor() as usize).min(n - 1);
    let mean = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;
    TailEstimate {
        alpha,
        index,
        var: sorted[index],
        cvar: mean(&sorted[..=index]),
        upper_mean: mean(&sorted[index..]),
    }
}

/// Estimates VaR and CVaR at level `alpha` from a loss sample.
///
/// The sample is not modified; the estimator sorts a private copy, so
/// repeated calls return identical results.
///
/// # Errors
/// - `RiskError::InvalidParameter` if α is not in (0, 1)
/// - `RiskError::EmptySample` for an empty sample
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::LossSample;
/// use tailrisk_engine::quantile::empirical;
///
/// let sample = LossSample::new((1..=10).map(f64::from).collect()).unwrap();
/// let est = empirical::estimate(&sample, 0.25).unwrap();
/// assert_eq!(est.index, 2);
/// assert_eq!(est.var, 3.0);
/// assert_eq!(est.cvar, 2.0);
/// assert_eq!(est.upper_mean, 6.5);
/// ```
pub fn estimate(sample: &LossSample, alpha: f64) -> Result<TailEstimate> {
    estimate_slice(sample.as_slice(), alpha)
}

/// Same as [`estimate`] for a raw slice.
///
/// # Errors
/// - `RiskError::InvalidParameter` if α is not in (0, 1)
/// - `RiskError::EmptySample` for an empty slice
/// - `RiskError::InvalidInput` if the slice contains NaN
pub fn estimate_slice(sample: &[f64], alpha: f64) -> Result<TailEstimate> {
    validate_alpha(alpha)?;
    let sorted = sorted_copy(sample)?;
    Ok(tail_from_sorted(&sorted, alpha))
}

/// Estimates several confidence levels from one sort of the sample.
///
/// Results are returned in the order of `alphas`.
///
/// # Errors
/// As [`estimate_slice`]; every α is validated before sorting.
pub fn estimate_many(sample: &[f64], alphas: &[f64]) -> Result<Vec<TailEstimate>> {
    for &alpha in alphas {
        validate_alpha(alpha)?;
    }
    let sorted = sorted_copy(sample)?;
    Ok(alphas
        .iter()
        .map(|&alpha| tail_from_sorted(&sorted, alpha))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_floor_index_without_interpolation() {
        let sample: Vec<f64> = (0..100).map(f64::from).collect();
        let est = estimate_slice(&sample, 0.015).unwrap();
        // floor(1.5) = 1
        assert_eq!(est.index, 1);
        assert_eq!(est.var, 1.0);
        assert_relative_eq!(est.cvar, 0.5);
        assert_relative_eq!(est.upper_mean, 50.0);
    }

    #[test]
    fn test_unsorted_input_is_not_modified() {
        let sample = vec![5.0, -3.0, 2.0, 8.0, 0.0];
        let copy = sample.clone();
        let est = estimate_slice(&sample, 0.2).unwrap();
        assert_eq!(sample, copy);
        assert_eq!(est.index, 1);
        assert_eq!(est.var, 0.0);
        assert_relative_eq!(est.cvar, -1.5);
    }

    #[test]
    fn test_boundaries_give_extremes() {
        let sample = [4.0, -7.0, 1.5, 9.0, 3.0];
        let low = estimate_slice(&sample, 1e-12).unwrap();
        assert_eq!(low.var, -7.0);
        assert_eq!(low.cvar, -7.0);
        assert_relative_eq!(low.upper_mean, 2.1);
        let high = estimate_slice(&sample, 1.0 - 1e-12).unwrap();
        assert_eq!(high.index, 4);
        assert_eq!(high.var, 9.0);
        assert_relative_eq!(high.cvar, 2.1);
        assert_eq!(high.upper_mean, 9.0);
    }

    #[test]
    fn test_single_observation() {
        let est = estimate_slice(&[42.0], 0.99).unwrap();
        assert_eq!(est.index, 0);
        assert_eq!(est.var, 42.0);
        assert_eq!(est.cvar, 42.0);
        assert_eq!(est.upper_mean, 42.0);
    }

    #[test]
    fn test_errors() {
        assert_eq!(estimate_slice(&[], 0.5), Err(RiskError::EmptySample));
        assert!(estimate_slice(&[1.0], 0.0).unwrap_err().is_invalid_parameter());
        assert!(estimate_slice(&[1.0], 1.0).unwrap_err().is_invalid_parameter());
        assert!(estimate_slice(&[1.0], f64::NAN).is_err());
        assert!(matches!(
            estimate_slice(&[1.0, f64::NAN], 0.5),
            Err(RiskError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_estimate_many_matches_individual_calls() {
        let sample: Vec<f64> = (0..1000).map(|i| ((i * 7919) % 1000) as f64).collect();
        let alphas = [0.97, 0.99, 0.9999, 0.1, 0.01];
        let many = estimate_many(&sample, &alphas).unwrap();
        for (est, &alpha) in many.iter().zip(alphas.iter()) {
            assert_eq!(*est, estimate_slice(&sample, alpha).unwrap());
        }
        assert!(estimate_many(&sample, &[0.5, 2.0]).is_err());
    }
}
