//! Check command implementation
//!
//! Runs the reference scenario and compares both estimators with each other
//! and with the closed-form quantile.

use tailrisk_scenarios::scenario::{run_scenario, ScenarioConfig};
use tracing::info;

use crate::{CliError, Result};

/// Maximum relative gap between the empirical and Robbins-Monro VaR.
const MAX_ESTIMATOR_GAP: f64 = 0.10;

/// Maximum relative gap between the empirical and closed-form VaR.
const MAX_REFERENCE_GAP: f64 = 0.05;

/// Run the check command
pub fn run(seed: u64) -> Result<()> {
    let config = ScenarioConfig {
        seed,
        record_history: false,
        ..ScenarioConfig::default()
    };
    info!("Checking reference scenario with seed {}", seed);
    let outcome = run_scenario(&config)?;

    let gap = outcome
        .relative_gap()
        .ok_or_else(|| CliError::CheckFailed("empirical VaR is zero".to_string()))?;
    let reference = outcome
        .reference_quantile
        .map(|q| -q)
        .ok_or_else(|| CliError::CheckFailed("no closed-form quantile".to_string()))?;
    let reference_gap = (outcome.var - reference).abs() / reference.abs();

    println!("Reference scenario (S0=100, sigma=0.4, T=1, B=100, alpha=1%)");
    println!("  closed-form VaR : {:>10.4}", reference);
    println!("  empirical VaR   : {:>10.4}", outcome.var);
    println!("  empirical CVaR  : {:>10.4}", outcome.cvar);
    println!("  Robbins-Monro   : {:>10.4}", outcome.rm_var);
    println!("  estimator gap   : {:>9.2}%", 100.0 * gap);
    println!("  reference gap   : {:>9.2}%", 100.0 * reference_gap);

    if gap > MAX_ESTIMATOR_GAP {
        return Err(CliError::CheckFailed(format!(
            "estimators differ by {:.2}%",
            100.0 * gap
        )));
    }
    if reference_gap > MAX_REFERENCE_GAP {
        return Err(CliError::CheckFailed(format!(
            "empirical VaR is {:.2}% away from the closed form",
            100.0 * reference_gap
        )));
    }

    println!("OK");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_check_passes() {
        run(42).unwrap();
    }
}
