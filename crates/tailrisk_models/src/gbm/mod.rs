//! Geometric Brownian Motion model parameters.
//!
//! ```text
//! dS = r * S * dt + sigma * S * dW
//! ```
//!
//! Simulation uses the exact log-space solution
//! `S(t+dt) = S(t) * exp((r - 0.5*sigma^2)*dt + sigma*sqrt(dt)*Z)`;
//! the simulators themselves live in `tailrisk_engine::mc`.

mod params;

pub use params::SimulationParameters;
