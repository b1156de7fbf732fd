//! Batch evaluation of scenarios with per-scenario failure isolation.

use serde::Serialize;
use tailrisk_core::types::RiskError;
use tailrisk_engine::rng::TailRng;
use thiserror::Error;
use tracing::{info, warn};

use super::config::ScenarioConfig;
use super::driver::{run_scenario_with_rng, ScenarioOutcome};
use crate::parallel::{parallel_map_indexed, ParallelConfig};

/// A scenario that failed inside a batch.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("scenario '{name}' failed: {source}")]
pub struct ScenarioError {
    /// Label of the failing scenario.
    pub name: String,
    /// Underlying error.
    #[source]
    pub source: RiskError,
}

/// One row of a batch result.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Scenario label.
    pub name: String,
    /// Outcome, or the error that stopped this scenario alone.
    pub result: Result<ScenarioOutcome, ScenarioError>,
}

impl BatchEntry {
    /// Whether the scenario completed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// An ordered collection of scenarios.
///
/// Scenario `i` always runs on `TailRng::stream(config.seed, i)`, so a batch
/// produces identical numbers sequentially and in parallel. Reordering the
/// scenarios changes their streams and therefore their numbers.
///
/// # Examples
///
/// ```
/// use tailrisk_scenarios::scenario::{ScenarioBatch, ScenarioConfig};
///
/// let ok = ScenarioConfig { n_samples: 500, ..ScenarioConfig::default() };
/// let broken = ScenarioConfig { volatility: -1.0, ..ok.clone() };
///
/// let entries = ScenarioBatch::new(vec![ok, broken]).run_sequential();
/// assert!(entries[0].is_ok());
/// assert!(!entries[1].is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioBatch {
    scenarios: Vec<ScenarioConfig>,
    parallel: ParallelConfig,
}

impl ScenarioBatch {
    /// Creates a batch.
    pub fn new(scenarios: Vec<ScenarioConfig>) -> Self {
        Self {
            scenarios,
            parallel: ParallelConfig::default(),
        }
    }

    /// Overrides the parallel execution policy.
    pub fn with_parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Appends a scenario.
    pub fn push(&mut self, scenario: ScenarioConfig) {
        self.scenarios.push(scenario);
    }

    /// Scenarios in run order.
    pub fn scenarios(&self) -> &[ScenarioConfig] {
        &self.scenarios
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Runs every scenario on the calling thread.
    pub fn run_sequential(&self) -> Vec<BatchEntry> {
        info!(scenarios = self.len(), "running batch sequentially");
        self.scenarios
            .iter()
            .enumerate()
            .map(|(index, config)| run_entry(index, config))
            .collect()
    }

    /// Runs the scenarios on the rayon pool.
    ///
    /// Falls back to [`run_sequential`](Self::run_sequential) below the
    /// parallel threshold. Results come back in input order and match the
    /// sequential run exactly.
    pub fn run_parallel(&self) -> Vec<BatchEntry> {
        if !self.parallel.should_parallelize(self.len()) {
            return self.run_sequential();
        }
        info!(scenarios = self.len(), "running batch in parallel");
        parallel_map_indexed(&self.scenarios, run_entry)
    }
}

fn run_entry(index: usize, config: &ScenarioConfig) -> BatchEntry {
    let mut rng = TailRng::stream(config.seed, index as u64);
    let result = run_scenario_with_rng(config, &mut rng).map_err(|source| {
        warn!(scenario = %config.name, error = %source, "scenario failed");
        ScenarioError {
            name: config.name.clone(),
            source,
        }
    });
    BatchEntry {
        name: config.name.clone(),
        result,
    }
}
