//! End-to-end checks of the scenario driver against closed-form references.

use approx::assert_abs_diff_eq;
use tailrisk_engine::quantile::SamplingMode;
use tailrisk_scenarios::scenario::{
    run_scenario, LossSpec, PresetStudy, ScenarioBatch, ScenarioConfig, ScenarioOutcome,
};

/// S0 = 100, r = 0, σ = 0.4, T = 1, B = 100, α = 1%: q(S_T) ≈ 36.40.
const REFERENCE_VAR: f64 = 63.5977;

fn reference(seed: u64) -> ScenarioOutcome {
    run_scenario(&ScenarioConfig {
        seed,
        ..ScenarioConfig::default()
    })
    .unwrap()
}

#[test]
fn test_reference_scenario_estimators_agree() {
    for seed in [1, 42, 2024] {
        let outcome = reference(seed);
        let gap = outcome.relative_gap().unwrap();
        assert!(
            gap < 0.10,
            "seed {}: empirical {} vs Robbins-Monro {}",
            seed,
            outcome.var,
            outcome.rm_var
        );
    }
}

#[test]
fn test_reference_scenario_near_closed_form() {
    let outcome = reference(42);
    assert_abs_diff_eq!(
        outcome.reference_quantile.unwrap(),
        -REFERENCE_VAR,
        epsilon = 1e-3
    );
    assert_abs_diff_eq!(outcome.var, REFERENCE_VAR, epsilon = 3.0);
    assert_abs_diff_eq!(outcome.rm_var, REFERENCE_VAR, epsilon = 5.0);
    // expected shortfall goes deeper than the quantile, but not below -S0
    assert!(outcome.cvar > outcome.var);
    assert!(outcome.cvar < 100.0);
}

#[test]
fn test_bootstrap_tracks_its_own_sample() {
    let outcome = run_scenario(&ScenarioConfig {
        sampling: SamplingMode::Bootstrap,
        ..ScenarioConfig::default()
    })
    .unwrap();
    assert!(outcome.relative_gap().unwrap() < 0.10);
}

#[test]
fn test_multi_step_paths_match_single_step() {
    let single = reference(7);
    let stepped = run_scenario(&ScenarioConfig {
        seed: 7,
        n_steps: 12,
        ..ScenarioConfig::default()
    })
    .unwrap();
    // different draws, same distribution
    assert_abs_diff_eq!(stepped.var, single.var, epsilon = 3.0);
}

#[test]
fn test_scenario_from_toml_with_short_names() {
    let config: ScenarioConfig = toml::from_str(
        r#"
        name = "ten days"
        S0 = 100.0
        sigma = 0.4
        T = 0.0273972602739726
        alpha = 0.001
        beta = 16.5
        z0 = -10.0
        Nmc = 5000
        sampling = "bootstrap"

        [loss]
        kind = "threshold"
        B = 100.0
        "#,
    )
    .unwrap();

    assert_eq!(config.n_samples, 5_000);
    assert_eq!(config.initial_guess, -10.0);
    assert_eq!(config.sampling, SamplingMode::Bootstrap);
    assert_eq!(config.lambda, 0.6);

    let outcome = run_scenario(&config).unwrap();
    assert_eq!(outcome.history.unwrap().len(), 5_001);
    // ten-day 0.1% quantile of S_T sits near 81.32
    assert_abs_diff_eq!(outcome.reference_quantile.unwrap(), -18.681, epsilon = 1e-2);
}

#[test]
fn test_option_study_losses_are_bounded_by_premium() {
    let entries = ScenarioBatch::new(PresetStudy::OptionPositions.scenarios()).run_parallel();
    assert_eq!(entries.len(), 6);

    for entry in &entries {
        let outcome = entry.result.as_ref().unwrap();
        assert_eq!(outcome.sampling, SamplingMode::Bootstrap);
        assert!(outcome.cvar >= outcome.var, "{}", outcome.name);
    }

    // the long call loses at most its premium, lost whenever it expires worthless
    let call = entries[0].result.as_ref().unwrap();
    assert_eq!(call.loss_kind, "vanilla");
    assert_abs_diff_eq!(call.var, 7.9656, epsilon = 1e-3);
}

#[test]
fn test_outcome_serialises_to_json() {
    let outcome = run_scenario(&ScenarioConfig {
        n_samples: 200,
        record_history: false,
        loss: LossSpec::StandardNormal,
        alpha: 0.5,
        ..ScenarioConfig::default()
    })
    .unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"loss_kind\":\"standard_normal\""));
    assert!(json.contains("\"sampling\":\"fresh_draw\""));
    let back: ScenarioOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(back.name, outcome.name);
    assert_eq!(back.empirical, outcome.empirical);
}
