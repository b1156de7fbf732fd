//! # Random Number Generation
//!
//! Seeded random sources for the samplers and the stochastic-approximation
//! solver. Randomness is always injected as `&mut TailRng`; nothing in the
//! workspace reads a global generator.
//!
//! - **Reproducibility**: the same seed yields the same sequence
//! - **Independent streams**: [`TailRng::stream`] derives one generator per
//!   scenario or worker from a base seed
//! - **Zero-allocation batches** via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use tailrisk_engine::rng::TailRng;
//!
//! let mut rng = TailRng::from_seed(12345);
//! let u = rng.gen_uniform();
//! let z = rng.gen_normal();
//! assert!((0.0..1.0).contains(&u));
//! assert!(z.is_finite());
//!
//! let mut worker = TailRng::stream(12345, 3);
//! let mut buffer = vec![0.0; 1000];
//! worker.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::TailRng;
