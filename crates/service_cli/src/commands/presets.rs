//! Presets command implementation
//!
//! Lists the built-in scenario tables.

use tailrisk_scenarios::scenario::PresetStudy;

use crate::Result;

/// Run the presets command
pub fn run(verbose: bool) -> Result<()> {
    println!("Available preset studies (run with `tailrisk run --preset <name>`):");
    println!();
    for study in PresetStudy::all() {
        let scenarios = study.scenarios();
        println!("  {:<20} {:>2} scenarios  {}", study.name(), scenarios.len(), study.description());
        if verbose {
            for config in &scenarios {
                println!("      - {}", config.name);
            }
        }
    }
    Ok(())
}
