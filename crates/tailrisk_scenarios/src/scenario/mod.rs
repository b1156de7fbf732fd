//! Scenario definition and execution.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                Scenario Driver               │
//! ├──────────────────────────────────────────────┤
//! │  ScenarioConfig  - Named parameters (serde)  │
//! │  run_scenario    - Empirical + RM estimates  │
//! │  ScenarioBatch   - Isolated batch execution  │
//! │  PresetStudy     - Ready-made tables         │
//! └──────────────────────────────────────────────┘
//! ```

mod batch;
mod config;
mod driver;
mod presets;

pub use batch::{BatchEntry, ScenarioBatch, ScenarioError};
pub use config::{LossSpec, ScenarioConfig};
pub use driver::{run_scenario, run_scenario_with_rng, ScenarioOutcome};
pub use presets::{PresetStudy, TEN_DAYS};
