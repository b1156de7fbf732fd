//! Sample statistics over simulated observations.
//!
//! Moments, exceedance frequencies and the empirical CDF / density evaluated
//! on a regular grid. The grids carry exactly the data a plotting
//! collaborator needs; nothing here renders or writes files.

use crate::types::{Result, RiskError};

/// Values of an empirical distribution function on a regular grid.
///
/// `points[i] = lower + (upper - lower) * i / n_points`, so the grid covers
/// the half-open interval `[lower, upper)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionGrid {
    /// Grid abscissae.
    pub points: Vec<f64>,
    /// Function values at each abscissa.
    pub values: Vec<f64>,
}

impl DistributionGrid {
    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over `(point, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied().zip(self.values.iter().copied())
    }
}

/// Arithmetic mean of a sample.
///
/// # Errors
/// `RiskError::EmptySample` for an empty slice.
pub fn sample_mean(sample: &[f64]) -> Result<f64> {
    if sample.is_empty() {
        return Err(RiskError::EmptySample);
    }
    Ok(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Population variance (divides by `n`, not `n - 1`).
///
/// # Errors
/// `RiskError::EmptySample` for an empty slice.
pub fn sample_variance(sample: &[f64]) -> Result<f64> {
    let mean = sample_mean(sample)?;
    let sum_sq: f64 = sample.iter().map(|x| (x - mean) * (x - mean)).sum();
    Ok(sum_sq / sample.len() as f64)
}

/// Fraction of observations `<= x`.
///
/// # Errors
/// `RiskError::EmptySample` for an empty slice.
///
/// # Examples
/// ```
/// use tailrisk_core::math::statistics::probability_at_or_below;
///
/// let p = probability_at_or_below(&[1.0, 2.0, 3.0, 4.0], 2.0).unwrap();
/// assert_eq!(p, 0.5);
/// ```
pub fn probability_at_or_below(sample: &[f64], x: f64) -> Result<f64> {
    if sample.is_empty() {
        return Err(RiskError::EmptySample);
    }
    let count = sample.iter().filter(|&&v| v <= x).count();
    Ok(count as f64 / sample.len() as f64)
}

fn grid_points(lower: f64, upper: f64, n_points: usize) -> Result<Vec<f64>> {
    if n_points == 0 {
        return Err(RiskError::invalid_parameter(
            "n_points",
            "grid needs at least one point",
        ));
    }
    if !lower.is_finite() || !upper.is_finite() || upper <= lower {
        return Err(RiskError::invalid_parameter(
            "bounds",
            format!("need finite lower < upper, got [{}, {}]", lower, upper),
        ));
    }
    let width = upper - lower;
    Ok((0..n_points)
        .map(|i| lower + width * i as f64 / n_points as f64)
        .collect())
}

/// Empirical CDF `F(x) = #{X_j <= x} / n` on a regular grid over `[lower, upper)`.
///
/// # Errors
/// - `RiskError::EmptySample` for an empty sample
/// - `RiskError::InvalidParameter` for `n_points == 0` or `upper <= lower`
pub fn empirical_cdf(
    sample: &[f64],
    lower: f64,
    upper: f64,
    n_points: usize,
) -> Result<DistributionGrid> {
    if sample.is_empty() {
        return Err(RiskError::EmptySample);
    }
    let points = grid_points(lower, upper, n_points)?;

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;

    let values = points
        .iter()
        .map(|&x| sorted.partition_point(|&v| v <= x) as f64 / n)
        .collect();

    Ok(DistributionGrid { points, values })
}

/// Histogram density estimate on a regular grid over `[lower, upper)`.
///
/// Bin `i` counts observations in `(x_i, x_i + h]` with `h = (upper - lower) / n_points`
/// and normalises by `h * n`.
///
/// # Errors
/// - `RiskError::EmptySample` for an empty sample
/// - `RiskError::InvalidParameter` for `n_points == 0` or `upper <= lower`
pub fn empirical_density(
    sample: &[f64],
    lower: f64,
    upper: f64,
    n_points: usize,
) -> Result<DistributionGrid> {
    if sample.is_empty() {
        return Err(RiskError::EmptySample);
    }
    let points = grid_points(lower, upper, n_points)?;
    let bin_width = (upper - lower) / n_points as f64;

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);
    let norm = bin_width * sorted.len() as f64;

    let values = points
        .iter()
        .map(|&x| {
            let below_or_at_left = sorted.partition_point(|&v| v <= x);
            let below_or_at_right = sorted.partition_point(|&v| v <= x + bin_width);
            (below_or_at_right - below_or_at_left) as f64 / norm
        })
        .collect();

    Ok(DistributionGrid { points, values })
}
