//! Run command implementation
//!
//! Evaluates the scenarios of a file, or a preset study, and prints the
//! estimates.

use tailrisk_scenarios::scenario::{PresetStudy, ScenarioBatch};
use tracing::info;

use crate::config::CliConfig;
use crate::output::{self, OutputFormat};
use crate::{CliError, Result};

/// Run the run command
pub fn run(config: &CliConfig, preset: Option<&str>, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;

    let scenarios = match preset {
        Some(name) => {
            let study: PresetStudy = name.parse()?;
            info!("Running preset study: {}", study);
            study.scenarios()
        }
        None => config.scenarios.clone(),
    };
    if scenarios.is_empty() {
        return Err(CliError::InvalidArgument(
            "no scenarios to run: pass --config <file> with [[scenarios]] or --preset <name>"
                .to_string(),
        ));
    }

    info!("Starting {} scenario(s)...", scenarios.len());
    let batch = ScenarioBatch::new(scenarios);
    let entries = if config.parallel {
        batch.run_parallel()
    } else {
        batch.run_sequential()
    };

    match format {
        OutputFormat::Table => print!("{}", output::to_table(&entries)),
        OutputFormat::Json => println!("{}", output::to_json(&entries)?),
    }

    let failed = entries.iter().filter(|entry| !entry.is_ok()).count();
    if failed > 0 {
        return Err(CliError::ScenariosFailed {
            failed,
            total: entries.len(),
        });
    }

    info!("Run complete");
    Ok(())
}
