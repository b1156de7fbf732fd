//! Result rendering (table and JSON)

use serde::Serialize;
use tailrisk_scenarios::scenario::{BatchEntry, ScenarioOutcome};

use crate::{CliError, Result};

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a ScenarioOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Render batch entries as pretty JSON
pub fn to_json(entries: &[BatchEntry]) -> Result<String> {
    let rows: Vec<JsonEntry<'_>> = entries
        .iter()
        .map(|entry| match &entry.result {
            Ok(outcome) => JsonEntry {
                name: &entry.name,
                outcome: Some(outcome),
                error: None,
            },
            Err(err) => JsonEntry {
                name: &entry.name,
                outcome: None,
                error: Some(err.source.to_string()),
            },
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}

/// Render batch entries as a box-drawn table
pub fn to_table(entries: &[BatchEntry]) -> String {
    let mut out = String::new();
    out.push_str("┌──────────────────────────┬──────────┬────────────┬────────────┬────────────┬─────────┐\n");
    out.push_str("│ Scenario                 │ alpha    │ VaR        │ CVaR       │ RM VaR     │ gap     │\n");
    out.push_str("├──────────────────────────┼──────────┼────────────┼────────────┼────────────┼─────────┤\n");
    for entry in entries {
        let name = truncate(&entry.name, 24);
        match &entry.result {
            Ok(o) => {
                let gap = o
                    .relative_gap()
                    .map(|g| format!("{:.2}%", 100.0 * g))
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(
                    "│ {:<24} │ {:<8} │ {:>10.4} │ {:>10.4} │ {:>10.4} │ {:>7} │\n",
                    name, o.alpha, o.var, o.cvar, o.rm_var, gap
                ));
            }
            Err(err) => {
                let message = truncate(&err.source.to_string(), 49);
                out.push_str(&format!("│ {:<24} │ FAILED: {:<49} │\n", name, message));
            }
        }
    }
    out.push_str("└──────────────────────────┴──────────┴────────────┴────────────┴────────────┴─────────┘\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailrisk_scenarios::scenario::{ScenarioBatch, ScenarioConfig};

    fn entries() -> Vec<BatchEntry> {
        let ok = ScenarioConfig {
            n_samples: 300,
            ..ScenarioConfig::default()
        };
        let bad = ScenarioConfig {
            name: "bad".to_string(),
            alpha: 2.0,
            ..ok.clone()
        };
        ScenarioBatch::new(vec![ok, bad]).run_sequential()
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_table_lists_failures() {
        let table = to_table(&entries());
        assert!(table.contains("reference"));
        assert!(table.contains("FAILED"));
        assert_eq!(table.lines().count(), 6);
    }

    #[test]
    fn test_json_separates_outcomes_and_errors() {
        let json = to_json(&entries()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["outcome"]["var"].is_number());
        assert!(value[0].get("error").is_none());
        assert!(value[1]["error"].as_str().unwrap().contains("alpha"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
