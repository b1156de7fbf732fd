//! Standard normal distribution functions.
//!
//! This module provides:
//! - `erf`: The error function
//! - `norm_cdf`: Cumulative distribution function (CDF), computed through the error function
//! - `norm_pdf`: Probability density function (PDF)
//! - `norm_inv_cdf`: Quantile function (inverse CDF)
//!
//! `erf`, `norm_cdf` and `norm_pdf` are generic over `T: Float`.

use num_traits::Float;

use crate::types::{Result, RiskError};

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function approximation using Horner's method.
///
/// Uses the Abramowitz and Stegun approximation (formula 7.1.26) which provides
/// maximum error of 1.5e-7 for all x.
///
/// # Mathematical Definition
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let zero = T::zero();

    let abs_x = x.abs();

    // Abramowitz and Stegun constants (7.1.26)
    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    let two = T::from(2.0).unwrap();
    if x < zero {
        two - erfc_abs
    } else {
        erfc_abs
    }
}

/// Error function.
///
/// Odd by construction: `erf(-x) == -erf(x)` exactly, which keeps
/// put-call parity exact for the closed-form pricer built on top of it.
///
/// # Examples
/// ```
/// use tailrisk_core::math::distributions::erf;
///
/// assert!(erf(0.0_f64).abs() < 1e-8);
/// assert!((erf(1.0_f64) - 0.842_700_792_9).abs() < 1e-6);
/// assert_eq!(erf(-0.7_f64), -erf(0.7_f64));
/// ```
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    let one = T::one();
    let magnitude = one - erfc_approx(x.abs());
    if x < T::zero() {
        -magnitude
    } else {
        magnitude
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2)) = (1/2) * (1 + erf(x / sqrt(2)))
///
/// The tail mass `(1/2) * erfc(|x| / sqrt(2))` is evaluated once and the
/// upper half is taken as its complement.
///
/// # Accuracy
/// Absolute error below 1e-7 for all finite x (no relative bound in the far
/// tails); Φ(x) + Φ(-x) = 1 to rounding, including at x = 0.
///
/// # Examples
/// ```
/// use tailrisk_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();
    let tail = half * erfc_approx(x.abs() / sqrt_2);
    // sign bit, so that -0.0 takes the lower half
    if x.is_sign_negative() {
        tail
    } else {
        T::one() - tail
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use tailrisk_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

// Acklam's rational approximation coefficients.
const ACKLAM_A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const ACKLAM_B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const ACKLAM_C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const ACKLAM_D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const ACKLAM_P_LOW: f64 = 0.024_25;

/// Standard normal quantile function Φ⁻¹(p).
///
/// Acklam's rational approximation, relative error below 1.2e-9 over (0, 1).
/// Used for analytic reference quantiles of the GBM terminal value.
///
/// # Errors
/// `RiskError::InvalidParameter` when `p` is not strictly inside (0, 1).
///
/// # Examples
/// ```
/// use tailrisk_core::math::distributions::norm_inv_cdf;
///
/// let z = norm_inv_cdf(0.01).unwrap();
/// assert!((z + 2.326_347_874).abs() < 1e-7);
/// assert!(norm_inv_cdf(1.0).is_err());
/// ```
pub fn norm_inv_cdf(p: f64) -> Result<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(RiskError::invalid_parameter(
            "p",
            format!("probability must lie in (0, 1), got {}", p),
        ));
    }

    let (a, b, c, d) = (ACKLAM_A, ACKLAM_B, ACKLAM_C, ACKLAM_D);

    let tail = |q: f64| {
        (((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
            / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0)
    };

    let x = if p < ACKLAM_P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - ACKLAM_P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5]) * q
            / (((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    };

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry() {
        let test_values = [-3.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 3.0];
        for x in test_values {
            assert_abs_diff_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_norm_cdf_halves_sum_to_one_at_origin() {
        let upper = norm_cdf(0.0_f64);
        let lower = norm_cdf(-0.0_f64);
        assert_abs_diff_eq!(upper + lower, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(upper, 0.5, epsilon = 1e-8);
        assert!(lower <= upper);
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_extreme_values() {
        let upper = norm_cdf(8.0_f64);
        assert!(upper > 0.999999 && upper <= 1.0);
        let lower = norm_cdf(-8.0_f64);
        assert!((0.0..1e-6).contains(&lower));
    }

    #[test]
    fn test_erf_odd_and_bounded() {
        for x in [0.1_f64, 0.5, 1.0, 2.0, 4.0] {
            assert_eq!(erf(-x), -erf(x));
            assert!(erf(x) > 0.0 && erf(x) <= 1.0);
        }
        assert_abs_diff_eq!(erf(2.0_f64), 0.9953222650, epsilon = 1e-6);
    }

    #[test]
    fn test_norm_cdf_matches_erf_form() {
        for x in [-2.5_f64, -1.0, 0.3, 1.7] {
            let via_erf = 0.5 * (1.0 + erf(x / SQRT_2));
            assert_abs_diff_eq!(norm_cdf(x), via_erf, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), 0.3989422804014327, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(-1.0_f64), norm_pdf(1.0_f64), epsilon = 1e-15);
    }

    #[test]
    fn test_norm_inv_cdf_reference_values() {
        assert_abs_diff_eq!(norm_inv_cdf(0.5).unwrap(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(norm_inv_cdf(0.975).unwrap(), 1.959963985, epsilon = 1e-7);
        assert_abs_diff_eq!(norm_inv_cdf(0.01).unwrap(), -2.326347874, epsilon = 1e-7);
        assert_abs_diff_eq!(norm_inv_cdf(0.001).unwrap(), -3.090232306, epsilon = 1e-7);
        assert_abs_diff_eq!(norm_inv_cdf(0.9999).unwrap(), 3.719016485, epsilon = 1e-6);
    }

    #[test]
    fn test_norm_inv_cdf_round_trip_through_cdf() {
        for p in [0.001, 0.02, 0.3, 0.7, 0.99] {
            let x = norm_inv_cdf(p).unwrap();
            assert_abs_diff_eq!(norm_cdf(x), p, epsilon = 2e-7);
        }
    }

    #[test]
    fn test_norm_inv_cdf_rejects_boundaries() {
        assert!(norm_inv_cdf(0.0).unwrap_err().is_invalid_parameter());
        assert!(norm_inv_cdf(1.0).is_err());
        assert!(norm_inv_cdf(f64::NAN).is_err());
    }
}
