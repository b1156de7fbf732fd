//! GBM terminal-value and path simulation.
//!
//! Both simulators use the exact log-space solution:
//! ```text
//! S(t+dt) = S(t) × exp((r - 0.5σ²)dt + σ√dt × Z)
//! ```
//! so a single step over `[0, T]` is exact and there is no discretisation
//! bias at any step count.
//!
//! Parameters are validated when [`SimulationParameters`] is built, which
//! leaves these functions infallible.

use tailrisk_models::gbm::SimulationParameters;

use crate::rng::TailRng;

/// One simulated GBM path: `n_steps + 1` points from t = 0 to t = T.
///
/// `values[0]` is S0 and `times[k] = k·dt`, with the last time pinned to T.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GbmPath {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl GbmPath {
    /// Observation times t₀ … t_N.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Simulated values S₀ … S_N.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at the horizon.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.values.last().copied().unwrap_or(f64::NAN)
    }

    /// Number of points (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a simulated path; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(time, value)` points.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }
}

/// Draws one terminal value `S0·exp((r − σ²/2)·T + σ·√T·Z)`.
///
/// Consumes exactly one normal variate from `rng`.
///
/// # Examples
///
/// ```rust
/// use tailrisk_engine::mc::simulate_terminal_value;
/// use tailrisk_engine::rng::TailRng;
/// use tailrisk_models::gbm::SimulationParameters;
///
/// let params = SimulationParameters::new(100.0, 0.0, 0.4, 1.0).unwrap();
/// let mut rng = TailRng::from_seed(42);
/// let s_t = simulate_terminal_value(&params, &mut rng);
/// assert!(s_t > 0.0);
/// ```
#[inline]
pub fn simulate_terminal_value(params: &SimulationParameters, rng: &mut TailRng) -> f64 {
    params.terminal_value_from_normal(rng.gen_normal())
}

/// Simulates a full path with `params.n_steps()` steps of size `T / N`.
///
/// Consumes exactly `N` normal variates from `rng`.
///
/// # Algorithm
///
/// 1. Precompute `drift_dt = (r - 0.5σ²)dt` and `vol_sqrt_dt = σ√dt`
/// 2. Set S[0] = S0
/// 3. For each step, S[k+1] = S[k] × exp(drift_dt + vol_sqrt_dt × Z)
pub fn simulate_path(params: &SimulationParameters, rng: &mut TailRng) -> GbmPath {
    let n_steps = params.n_steps();
    let dt = params.dt();
    let drift_dt = params.log_drift(dt);
    let vol_sqrt_dt = params.diffusion_scale(dt);

    let mut times = Vec::with_capacity(n_steps + 1);
    let mut values = Vec::with_capacity(n_steps + 1);

    let mut s = params.initial_value();
    times.push(0.0);
    values.push(s);

    for k in 1..=n_steps {
        s *= (drift_dt + vol_sqrt_dt * rng.gen_normal()).exp();
        let t = if k == n_steps {
            params.horizon()
        } else {
            k as f64 * dt
        };
        times.push(t);
        values.push(s);
    }

    GbmPath { times, values }
}

/// Simulates `n_paths` independent paths, in draw order.
pub fn simulate_paths(
    params: &SimulationParameters,
    n_paths: usize,
    rng: &mut TailRng,
) -> Vec<GbmPath> {
    (0..n_paths).map(|_| simulate_path(params, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(n_steps: usize) -> SimulationParameters {
        SimulationParameters::new(100.0, 0.05, 0.2, 1.0)
            .unwrap()
            .with_steps(n_steps)
            .unwrap()
    }

    #[test]
    fn test_terminal_value_consumes_one_normal() {
        let p = params(1);
        let mut rng = TailRng::from_seed(5);
        let mut shadow = TailRng::from_seed(5);
        let s_t = simulate_terminal_value(&p, &mut rng);
        let z = shadow.gen_normal();
        assert_relative_eq!(s_t, p.terminal_value_from_normal(z), epsilon = 1e-12);
        assert_eq!(rng.gen_normal(), shadow.gen_normal());
    }

    #[test]
    fn test_path_shape_and_times() {
        let p = params(12);
        let mut rng = TailRng::from_seed(9);
        let path = simulate_path(&p, &mut rng);
        assert_eq!(path.len(), 13);
        assert_eq!(path.times()[0], 0.0);
        assert_eq!(path.values()[0], 100.0);
        assert_eq!(*path.times().last().unwrap(), 1.0);
        assert!(path.times().windows(2).all(|w| w[0] < w[1]));
        assert!(path.values().iter().all(|&v| v > 0.0));
        assert_eq!(path.terminal(), path.values()[12]);
    }

    #[test]
    fn test_path_consumes_n_normals() {
        let p = params(7);
        let mut rng = TailRng::from_seed(21);
        let mut shadow = TailRng::from_seed(21);
        let _ = simulate_path(&p, &mut rng);
        for _ in 0..7 {
            shadow.gen_normal();
        }
        assert_eq!(rng.gen_normal(), shadow.gen_normal());
    }

    #[test]
    fn test_single_step_path_matches_terminal_draw() {
        let p = params(1);
        let path = simulate_path(&p, &mut TailRng::from_seed(77));
        let s_t = simulate_terminal_value(&p, &mut TailRng::from_seed(77));
        assert_relative_eq!(path.terminal(), s_t, epsilon = 1e-12);
    }

    #[test]
    fn test_terminal_mean_is_forward() {
        let p = params(1);
        let mut rng = TailRng::from_seed(123);
        let n = 100_000;
        let mean = (0..n)
            .map(|_| simulate_terminal_value(&p, &mut rng))
            .sum::<f64>()
            / n as f64;
        // sd(S_T) ≈ 21, so the standard error is ≈ 0.07
        assert!((mean - p.expected_terminal_value()).abs() < 0.4);
    }

    #[test]
    fn test_simulate_paths_count() {
        let p = params(4);
        let paths = simulate_paths(&p, 3, &mut TailRng::from_seed(0));
        assert_eq!(paths.len(), 3);
        assert_ne!(paths[0], paths[1]);
    }
}
