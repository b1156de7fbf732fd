//! Zero-rate Black-Scholes pricing for European options.
//!
//! Positions are revalued at the risk horizon without discounting, so the
//! rate is fixed at zero and the formulas reduce to:
//!
//! **Call Price**: C = S·N(d₁) - K·N(d₂)
//! **Put Price**: P = K·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + σ²T/2) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! N is evaluated through the error function
//! ([`tailrisk_core::math::norm_cdf`]).

use num_traits::Float;
use tailrisk_core::math::norm_cdf;

use super::error::AnalyticalError;

/// European option kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// Intrinsic value `max(S - K, 0)` or `max(K - S, 0)`.
    #[inline]
    pub fn payoff<T: Float>(self, spot: T, strike: T) -> T {
        let intrinsic = match self {
            OptionKind::Call => spot - strike,
            OptionKind::Put => strike - spot,
        };
        intrinsic.max(T::zero())
    }
}

fn as_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn is_positive<T: Float>(value: T) -> bool {
    value.is_finite() && value > T::zero()
}

/// Zero-rate Black-Scholes model.
///
/// # Examples
/// ```
/// use tailrisk_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0).unwrap();
/// let put = bs.price_put(100.0, 1.0).unwrap();
///
/// // Put-call parity at zero rate: C - P = S - K
/// assert!((call - put).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    spot: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new zero-rate Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or non-finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or non-finite
    pub fn new(spot: T, volatility: T) -> Result<Self, AnalyticalError> {
        if !is_positive(spot) {
            return Err(AnalyticalError::InvalidSpot {
                spot: as_f64(spot),
            });
        }
        if !is_positive(volatility) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: as_f64(volatility),
            });
        }
        Ok(Self { spot, volatility })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    fn check_contract(strike: T, expiry: T) -> Result<(), AnalyticalError> {
        if !is_positive(strike) {
            return Err(AnalyticalError::InvalidStrike {
                strike: as_f64(strike),
            });
        }
        if !is_positive(expiry) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: as_f64(expiry),
            });
        }
        Ok(())
    }

    /// d₁ = (ln(S/K) + σ²T/2) / (σ√T)
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive contract terms.
    pub fn d1(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        Self::check_contract(strike, expiry)?;
        let half = T::from(0.5).unwrap_or_else(T::zero);
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        Ok((log_moneyness + half * self.volatility * self.volatility * expiry) / vol_sqrt_t)
    }

    /// d₂ = d₁ - σ√T
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive contract terms.
    pub fn d2(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        Ok(self.d1(strike, expiry)? - self.volatility * expiry.sqrt())
    }

    /// European call price C = S·N(d₁) - K·N(d₂).
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive contract terms.
    pub fn price_call(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        let d1 = self.d1(strike, expiry)?;
        let d2 = d1 - self.volatility * expiry.sqrt();
        Ok(self.spot * norm_cdf(d1) - strike * norm_cdf(d2))
    }

    /// European put price P = K·N(-d₂) - S·N(-d₁).
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive contract terms.
    pub fn price_put(&self, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        let d1 = self.d1(strike, expiry)?;
        let d2 = d1 - self.volatility * expiry.sqrt();
        Ok(strike * norm_cdf(-d2) - self.spot * norm_cdf(-d1))
    }

    /// Price of the given option kind.
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive contract terms.
    pub fn price(&self, kind: OptionKind, strike: T, expiry: T) -> Result<T, AnalyticalError> {
        match kind {
            OptionKind::Call => self.price_call(strike, expiry),
            OptionKind::Put => self.price_put(strike, expiry),
        }
    }
}

/// Zero-rate call price `call(S, K, σ, T)`.
///
/// # Errors
/// `AnalyticalError` when S, K, σ or T is non-positive or non-finite.
///
/// # Examples
/// ```
/// use tailrisk_models::analytical::call_price;
///
/// let c = call_price(100.0, 100.0, 0.2, 1.0).unwrap();
/// assert!((c - 7.965_567_455).abs() < 1e-4);
/// assert!(call_price(0.0, 100.0, 0.2, 1.0).is_err());
/// ```
pub fn call_price(spot: f64, strike: f64, volatility: f64, expiry: f64) -> Result<f64, AnalyticalError> {
    BlackScholes::new(spot, volatility)?.price_call(strike, expiry)
}

/// Zero-rate put price `put(S, K, σ, T)`.
///
/// # Errors
/// `AnalyticalError` when S, K, σ or T is non-positive or non-finite.
pub fn put_price(spot: f64, strike: f64, volatility: f64, expiry: f64) -> Result<f64, AnalyticalError> {
    BlackScholes::new(spot, volatility)?.price_put(strike, expiry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_new_validates_inputs() {
        assert!(BlackScholes::new(100.0_f64, 0.2).is_ok());
        assert_eq!(
            BlackScholes::new(-1.0_f64, 0.2).unwrap_err(),
            AnalyticalError::InvalidSpot { spot: -1.0 }
        );
        assert_eq!(
            BlackScholes::new(100.0_f64, 0.0).unwrap_err(),
            AnalyticalError::InvalidVolatility { volatility: 0.0 }
        );
        assert!(BlackScholes::new(f64::INFINITY, 0.2).is_err());
        assert!(BlackScholes::new(100.0, f64::NAN).is_err());
    }

    #[test]
    fn test_contract_terms_validated() {
        let bs = BlackScholes::new(100.0_f64, 0.2).unwrap();
        assert!(matches!(
            bs.price_call(0.0, 1.0),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            bs.price_put(100.0, 0.0),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_atm_reference_price() {
        // Zero-rate ATM call: S·(2N(σ√T/2) - 1)
        let c = call_price(100.0, 100.0, 0.2, 1.0).unwrap();
        assert_relative_eq!(c, 7.965_567_455_405_804, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity() {
        let cases = [
            (100.0, 100.0, 0.2, 1.0),
            (80.0, 100.0, 0.4, 0.5),
            (130.0, 95.0, 0.15, 2.0),
            (36.0, 100.0, 0.4, 10.0 / 365.0),
        ];
        for (s, k, sigma, t) in cases {
            let c = call_price(s, k, sigma, t).unwrap();
            let p = put_price(s, k, sigma, t).unwrap();
            assert_abs_diff_eq!(c - p, s - k, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_prices_bounded_by_intrinsic_and_spot() {
        let bs = BlackScholes::new(110.0_f64, 0.3).unwrap();
        let c = bs.price_call(100.0, 1.0).unwrap();
        assert!(c >= OptionKind::Call.payoff(110.0, 100.0));
        assert!(c <= 110.0);
        let p = bs.price(OptionKind::Put, 100.0, 1.0).unwrap();
        assert!(p >= 0.0 && p <= 100.0);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = BlackScholes::new(100.0_f64, 0.25).unwrap();
        let d1 = bs.d1(105.0, 0.75).unwrap();
        let d2 = bs.d2(105.0, 0.75).unwrap();
        assert_relative_eq!(d1 - d2, 0.25 * 0.75_f64.sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn test_payoff() {
        assert_eq!(OptionKind::Call.payoff(120.0, 100.0), 20.0);
        assert_eq!(OptionKind::Call.payoff(80.0, 100.0), 0.0);
        assert_eq!(OptionKind::Put.payoff(80.0, 100.0), 20.0);
        assert_eq!(OptionKind::Put.payoff(120.0, 100.0), 0.0);
    }
}
