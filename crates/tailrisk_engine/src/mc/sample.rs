//! Loss sampling: simulated terminal values pushed through a loss transform.

use tailrisk_core::math::statistics;
use tailrisk_core::types::{Result, RiskError};
use tailrisk_models::gbm::SimulationParameters;
use tailrisk_models::loss::LossTransform;

use super::config::MonteCarloConfig;
use super::paths::{simulate_path, simulate_terminal_value};
use crate::rng::TailRng;

/// A GBM model paired with the loss transform applied to its terminal values.
///
/// One observation consumes `transform.dimension()` independent terminal
/// values, so a basket of I0 positions draws I0 underlyings per loss.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LossModel {
    params: SimulationParameters,
    transform: LossTransform,
}

impl LossModel {
    /// Pairs validated parameters with a loss transform.
    pub fn new(params: SimulationParameters, transform: LossTransform) -> Self {
        Self { params, transform }
    }

    /// Simulation parameters.
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Loss transform.
    pub fn transform(&self) -> &LossTransform {
        &self.transform
    }

    fn terminal_value(&self, rng: &mut TailRng) -> f64 {
        if self.params.n_steps() == 1 {
            simulate_terminal_value(&self.params, rng)
        } else {
            simulate_path(&self.params, rng).terminal()
        }
    }

    fn draw_into(&self, rng: &mut TailRng, scratch: &mut Vec<f64>) -> Result<f64> {
        scratch.clear();
        for _ in 0..self.transform.dimension() {
            scratch.push(self.terminal_value(rng));
        }
        self.transform.loss(scratch)
    }

    /// Draws one fresh loss observation.
    ///
    /// # Errors
    /// `RiskError::Domain` if a closed-form revaluation fails.
    pub fn draw(&self, rng: &mut TailRng) -> Result<f64> {
        let mut scratch = Vec::with_capacity(self.transform.dimension());
        self.draw_into(rng, &mut scratch)
    }
}

/// An immutable sample of losses.
///
/// Produced once and then only read: both estimators borrow it as a slice.
/// NaN values are rejected at construction, so every consumer can rely on
/// a total order.
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::LossSample;
///
/// let sample = LossSample::new(vec![3.0, -1.0, 2.0]).unwrap();
/// assert_eq!(sample.len(), 3);
/// assert_eq!(sample.as_slice()[1], -1.0);
/// assert!(LossSample::new(vec![1.0, f64::NAN]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LossSample {
    values: Vec<f64>,
}

impl LossSample {
    /// Wraps raw losses.
    ///
    /// # Errors
    /// `RiskError::InvalidInput` if any value is NaN.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some(index) = values.iter().position(|v| v.is_nan()) {
            return Err(RiskError::InvalidInput(format!(
                "NaN loss at index {}",
                index
            )));
        }
        Ok(Self { values })
    }

    /// Read-only view of the losses, in generation order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sample holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample mean.
    ///
    /// # Errors
    /// `RiskError::EmptySample` for an empty sample.
    pub fn mean(&self) -> Result<f64> {
        statistics::sample_mean(&self.values)
    }

    /// Population variance.
    ///
    /// # Errors
    /// `RiskError::EmptySample` for an empty sample.
    pub fn variance(&self) -> Result<f64> {
        statistics::sample_variance(&self.values)
    }

    /// Fraction of losses `<= x`.
    ///
    /// # Errors
    /// `RiskError::EmptySample` for an empty sample.
    pub fn probability_at_or_below(&self, x: f64) -> Result<f64> {
        statistics::probability_at_or_below(&self.values, x)
    }
}

impl AsRef<[f64]> for LossSample {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Generates `config.n_samples()` losses from `model`.
///
/// Observations are drawn sequentially from `rng`, so the sample is a pure
/// function of the generator state.
///
/// # Errors
/// - `RiskError::Domain` if a closed-form revaluation fails
/// - `RiskError::InvalidInput` if the transform produces NaN
pub fn generate_loss_sample(
    model: &LossModel,
    config: &MonteCarloConfig,
    rng: &mut TailRng,
) -> Result<LossSample> {
    let mut scratch = Vec::with_capacity(model.transform.dimension());
    let mut values = Vec::with_capacity(config.n_samples());
    for _ in 0..config.n_samples() {
        values.push(model.draw_into(rng, &mut scratch)?);
    }
    LossSample::new(values)
}

/// Monte Carlo estimate of `P[S_T < level]`.
///
/// # Errors
/// `RiskError::InvalidParameter` if `n_samples == 0` or `level` is NaN.
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::probability_below;
/// use tailrisk_engine::rng::TailRng;
/// use tailrisk_models::gbm::SimulationParameters;
///
/// let params = SimulationParameters::new(100.0, 0.0, 0.4, 1.0).unwrap();
/// let p = probability_below(&params, 100.0, 20_000, &mut TailRng::from_seed(1)).unwrap();
/// let exact = params.probability_below(100.0).unwrap();
/// assert!((p - exact).abs() < 0.02);
/// ```
pub fn probability_below(
    params: &SimulationParameters,
    level: f64,
    n_samples: usize,
    rng: &mut TailRng,
) -> Result<f64> {
    if n_samples == 0 {
        return Err(RiskError::invalid_parameter(
            "n_samples",
            "at least one draw is required",
        ));
    }
    if level.is_nan() {
        return Err(RiskError::invalid_parameter("level", "must not be NaN"));
    }
    let hits = (0..n_samples)
        .filter(|_| simulate_terminal_value(params, rng) < level)
        .count();
    Ok(hits as f64 / n_samples as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tailrisk_models::loss::OptionBasket;

    fn params() -> SimulationParameters {
        SimulationParameters::new(100.0, 0.0, 0.4, 1.0).unwrap()
    }

    fn config(n: usize) -> MonteCarloConfig {
        MonteCarloConfig::builder().n_samples(n).build().unwrap()
    }

    #[test]
    fn test_threshold_sample_is_shifted_terminal_values() {
        let model = LossModel::new(params(), LossTransform::threshold(100.0).unwrap());
        let sample = generate_loss_sample(&model, &config(50), &mut TailRng::from_seed(4)).unwrap();

        let mut rng = TailRng::from_seed(4);
        for &loss in sample.as_slice() {
            let s_t = simulate_terminal_value(&params(), &mut rng);
            assert_relative_eq!(loss, s_t - 100.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_same_seed_same_sample() {
        let model = LossModel::new(params(), LossTransform::threshold(50.0).unwrap());
        let a = generate_loss_sample(&model, &config(200), &mut TailRng::from_seed(8)).unwrap();
        let b = generate_loss_sample(&model, &config(200), &mut TailRng::from_seed(8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_basket_draw_consumes_one_normal_per_instrument() {
        let basket = OptionBasket::new(4, 100.0, 1.0, 0.0, &params()).unwrap();
        let model = LossModel::new(params(), LossTransform::OptionBasket(basket));
        let mut rng = TailRng::from_seed(31);
        let mut shadow = TailRng::from_seed(31);
        model.draw(&mut rng).unwrap();
        for _ in 0..4 {
            shadow.gen_normal();
        }
        assert_eq!(rng.gen_normal(), shadow.gen_normal());
    }

    #[test]
    fn test_multi_step_model_uses_paths() {
        let stepped = params().with_steps(10).unwrap();
        let model = LossModel::new(stepped, LossTransform::threshold(100.0).unwrap());
        let sample = generate_loss_sample(&model, &config(20_000), &mut TailRng::from_seed(2)).unwrap();
        // E[S_T - B] = 0 at zero drift; sd ≈ 42, standard error ≈ 0.3
        assert!(sample.mean().unwrap().abs() < 1.5);
    }

    #[test]
    fn test_sample_statistics() {
        let sample = LossSample::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(sample.mean().unwrap(), 2.5);
        assert_eq!(sample.variance().unwrap(), 1.25);
        assert_eq!(sample.probability_at_or_below(2.0).unwrap(), 0.5);
        assert!(!sample.is_empty());
        assert_eq!(LossSample::new(vec![]).unwrap().mean(), Err(RiskError::EmptySample));
    }

    #[test]
    fn test_probability_below_validation() {
        let mut rng = TailRng::from_seed(0);
        assert!(probability_below(&params(), 100.0, 0, &mut rng).is_err());
        assert!(probability_below(&params(), f64::NAN, 10, &mut rng).is_err());
        assert_eq!(probability_below(&params(), 0.0, 100, &mut rng).unwrap(), 0.0);
    }
}
