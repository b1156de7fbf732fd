//! Loss transforms: simulated terminal values to scalar losses.
//!
//! A [`LossTransform`] consumes [`LossTransform::dimension`] terminal values
//! per observation and produces one real-valued loss. The empirical estimator
//! and the Robbins-Monro solver both work on the resulting loss sample.
//!
//! | Variant | Loss |
//! |---------|------|
//! | `Threshold` | `S_T - B` |
//! | `VanillaPosition` | `V0 - max(payoff(S_T), 0)` |
//! | `OptionBasket` | `V0 - Σ (w_c·C(S_i) + w_p·P(S_i))` |

use tailrisk_core::types::{Result, RiskError};

use crate::analytical::{BlackScholes, OptionKind};
use crate::gbm::SimulationParameters;

/// A basket of identical option positions revalued in closed form.
///
/// Each of the `instruments` positions holds `call_weight` calls and
/// `put_weight` puts on its own independent underlying, all struck at
/// `strike` with `expiry` years to run at the revaluation date. Negative
/// weights are short positions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionBasket {
    instruments: usize,
    strike: f64,
    volatility: f64,
    expiry: f64,
    call_weight: f64,
    put_weight: f64,
    reference_value: f64,
}

impl OptionBasket {
    /// Builds a basket whose reference value is the closed-form price at S0,
    /// revalued with the volatility and horizon of `params`.
    ///
    /// # Errors
    /// - `RiskError::InvalidParameter` for zero instruments or non-finite weights
    /// - `RiskError::Domain` if the strike is not positive
    pub fn new(
        instruments: usize,
        strike: f64,
        call_weight: f64,
        put_weight: f64,
        params: &SimulationParameters,
    ) -> Result<Self> {
        if instruments == 0 {
            return Err(RiskError::invalid_parameter(
                "instruments",
                "basket needs at least one instrument",
            ));
        }
        if !call_weight.is_finite() || !put_weight.is_finite() {
            return Err(RiskError::invalid_parameter(
                "weights",
                format!("must be finite, got call {} put {}", call_weight, put_weight),
            ));
        }

        let mut basket = Self {
            instruments,
            strike,
            volatility: params.volatility(),
            expiry: params.horizon(),
            call_weight,
            put_weight,
            reference_value: 0.0,
        };
        basket.reference_value = instruments as f64 * basket.position_value(params.initial_value())?;
        Ok(basket)
    }

    /// Value of one position `w_c·C(S) + w_p·P(S)`.
    ///
    /// # Errors
    /// `RiskError::Domain` when the closed-form inputs are out of domain.
    pub fn position_value(&self, spot: f64) -> Result<f64> {
        let model = BlackScholes::new(spot, self.volatility)?;
        let call = model.price_call(self.strike, self.expiry)?;
        let put = model.price_put(self.strike, self.expiry)?;
        Ok(self.call_weight * call + self.put_weight * put)
    }

    /// Number of positions I0.
    pub fn instruments(&self) -> usize {
        self.instruments
    }

    /// Basket value at S0.
    pub fn reference_value(&self) -> f64 {
        self.reference_value
    }
}

/// Maps simulated terminal values to a scalar loss.
///
/// # Examples
/// ```
/// use tailrisk_models::loss::LossTransform;
///
/// let transform = LossTransform::threshold(100.0).unwrap();
/// assert_eq!(transform.dimension(), 1);
/// assert_eq!(transform.loss(&[80.0]).unwrap(), -20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LossTransform {
    /// `X = S_T - B`; its low quantiles are the losses of interest.
    Threshold {
        /// Threshold B
        threshold: f64,
    },
    /// `L = reference_value - max(payoff(S_T), 0)` for a single option.
    VanillaPosition {
        /// Call or put
        kind: OptionKind,
        /// Strike K
        strike: f64,
        /// Value of the position at inception
        reference_value: f64,
    },
    /// Basket of independent option positions.
    OptionBasket(OptionBasket),
}

impl LossTransform {
    /// Threshold transform `S_T - B`.
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` for a non-finite threshold.
    pub fn threshold(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(RiskError::invalid_parameter(
                "threshold",
                format!("must be finite, got {}", threshold),
            ));
        }
        Ok(Self::Threshold { threshold })
    }

    /// Single option position whose reference value is its zero-rate
    /// Black-Scholes price at S0 over the simulation horizon.
    ///
    /// # Errors
    /// `RiskError::Domain` if the strike is not positive.
    pub fn vanilla(kind: OptionKind, strike: f64, params: &SimulationParameters) -> Result<Self> {
        let model = BlackScholes::new(params.initial_value(), params.volatility())?;
        let reference_value = model.price(kind, strike, params.horizon())?;
        Ok(Self::VanillaPosition {
            kind,
            strike,
            reference_value,
        })
    }

    /// Single option position with an explicit reference value.
    ///
    /// # Errors
    /// `RiskError::InvalidParameter` for a non-positive strike or a
    /// non-finite reference value.
    pub fn vanilla_with_reference(kind: OptionKind, strike: f64, reference_value: f64) -> Result<Self> {
        if !(strike.is_finite() && strike > 0.0) {
            return Err(RiskError::invalid_parameter(
                "strike",
                format!("must be positive, got {}", strike),
            ));
        }
        if !reference_value.is_finite() {
            return Err(RiskError::invalid_parameter(
                "reference_value",
                format!("must be finite, got {}", reference_value),
            ));
        }
        Ok(Self::VanillaPosition {
            kind,
            strike,
            reference_value,
        })
    }

    /// Terminal values consumed per loss observation.
    pub fn dimension(&self) -> usize {
        match self {
            Self::Threshold { .. } | Self::VanillaPosition { .. } => 1,
            Self::OptionBasket(basket) => basket.instruments,
        }
    }

    /// Loss for one observation.
    ///
    /// # Errors
    /// - `RiskError::InvalidInput` if `values.len() != self.dimension()`
    /// - `RiskError::Domain` if a basket revaluation leaves the pricing domain
    pub fn loss(&self, values: &[f64]) -> Result<f64> {
        if values.len() != self.dimension() {
            return Err(RiskError::InvalidInput(format!(
                "expected {} terminal values, got {}",
                self.dimension(),
                values.len()
            )));
        }

        match self {
            Self::Threshold { threshold } => Ok(values[0] - threshold),
            Self::VanillaPosition {
                kind,
                strike,
                reference_value,
            } => Ok(reference_value - kind.payoff(values[0], *strike)),
            Self::OptionBasket(basket) => {
                let mut value = 0.0;
                for &spot in values {
                    value += basket.position_value(spot)?;
                }
                Ok(basket.reference_value - value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::{call_price, put_price};
    use approx::assert_relative_eq;

    fn params() -> SimulationParameters {
        SimulationParameters::new(100.0, 0.0, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_threshold_loss() {
        let t = LossTransform::threshold(50.0).unwrap();
        assert_eq!(t.loss(&[36.0]).unwrap(), -14.0);
        assert_eq!(t.loss(&[150.0]).unwrap(), 100.0);
        assert!(LossTransform::threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_vanilla_reference_is_black_scholes_price() {
        let t = LossTransform::vanilla(OptionKind::Call, 100.0, &params()).unwrap();
        let v0 = call_price(100.0, 100.0, 0.2, 1.0).unwrap();
        match &t {
            LossTransform::VanillaPosition {
                reference_value, ..
            } => assert_relative_eq!(*reference_value, v0, epsilon = 1e-12),
            other => panic!("unexpected variant {:?}", other),
        }
        // Out of the money: the whole premium is lost
        assert_relative_eq!(t.loss(&[90.0]).unwrap(), v0, epsilon = 1e-12);
        assert_relative_eq!(t.loss(&[120.0]).unwrap(), v0 - 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vanilla_rejects_bad_strike() {
        assert!(LossTransform::vanilla(OptionKind::Put, 0.0, &params())
            .unwrap_err()
            .is_domain_error());
        assert!(LossTransform::vanilla_with_reference(OptionKind::Put, -1.0, 5.0).is_err());
    }

    #[test]
    fn test_basket_at_inception_has_zero_loss() {
        let basket = OptionBasket::new(10, 100.0, -10.0, -5.0, &params()).unwrap();
        let expected = 10.0
            * (-10.0 * call_price(100.0, 100.0, 0.2, 1.0).unwrap()
                - 5.0 * put_price(100.0, 100.0, 0.2, 1.0).unwrap());
        assert_relative_eq!(basket.reference_value(), expected, epsilon = 1e-9);

        let t = LossTransform::OptionBasket(basket);
        assert_eq!(t.dimension(), 10);
        assert_relative_eq!(t.loss(&[100.0; 10]).unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_short_call_basket_loses_when_spot_rises() {
        let basket = OptionBasket::new(2, 100.0, -1.0, 0.0, &params()).unwrap();
        let t = LossTransform::OptionBasket(basket);
        assert!(t.loss(&[130.0, 130.0]).unwrap() > 0.0);
        assert!(t.loss(&[70.0, 70.0]).unwrap() < 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_invalid_input() {
        let t = LossTransform::threshold(100.0).unwrap();
        assert!(matches!(t.loss(&[1.0, 2.0]), Err(RiskError::InvalidInput(_))));
        let basket = LossTransform::OptionBasket(
            OptionBasket::new(3, 100.0, 1.0, 1.0, &params()).unwrap(),
        );
        assert!(matches!(basket.loss(&[100.0]), Err(RiskError::InvalidInput(_))));
    }

    #[test]
    fn test_basket_validation() {
        assert!(OptionBasket::new(0, 100.0, 1.0, 1.0, &params())
            .unwrap_err()
            .is_invalid_parameter());
        assert!(OptionBasket::new(1, 100.0, f64::INFINITY, 1.0, &params()).is_err());
        assert!(OptionBasket::new(1, -5.0, 1.0, 1.0, &params())
            .unwrap_err()
            .is_domain_error());
    }
}
