//! Tests for the Monte Carlo engine
//!
//! These tests verify:
//! - Identical seeds give identical results
//! - The summary and bands cover the post-independence months
//! - The deterministic projection falls inside the trial distribution
//! - Dynamic reduction never lowers the success rate
//! - A household that never reaches independence gets an empty summary

use super::{flat_builder, init_logging};
use crate::config::{AssetAllocation, DynamicReduction, SimulationBuilder};
use crate::model::{HouseholdInputs, ReturnModel};
use crate::simulation::{monte_carlo_simulate, simulate};

fn retiree(stocks: f64, monthly_expense: f64) -> HouseholdInputs {
    HouseholdInputs {
        stocks,
        monthly_expense,
        ..Default::default()
    }
}

fn mc_builder(iterations: usize, seed: u64) -> SimulationBuilder {
    flat_builder(0.05)
        .iterations(iterations)
        .seed(seed)
        .return_model(
            ReturnModel::Simple {
                mean_reversion_speed: 0.0,
            },
            0.15,
        )
}

// ============================================================================
// Determinism
// ============================================================================

/// Test the same seed reproduces every trial
#[test]
fn test_same_seed_same_results() {
    init_logging();
    let config = mc_builder(150, 42).build().unwrap();
    let inputs = retiree(80_000_000.0, 200_000.0);

    let first = monte_carlo_simulate(&config, &inputs, "standard").unwrap();
    let second = monte_carlo_simulate(&config, &inputs, "standard").unwrap();

    assert_eq!(first.final_assets, second.final_assets);
    assert_eq!(first.success_rate, second.success_rate);
    assert_eq!(first.bands, second.bands);
}

/// Test different seeds give different trials
#[test]
fn test_different_seed_changes_results() {
    let inputs = retiree(80_000_000.0, 200_000.0);
    let a = monte_carlo_simulate(&mc_builder(50, 1).build().unwrap(), &inputs, "standard")
        .unwrap();
    let b = monte_carlo_simulate(&mc_builder(50, 2).build().unwrap(), &inputs, "standard")
        .unwrap();

    assert_ne!(a.final_assets, b.final_assets);
}

// ============================================================================
// Summary shape
// ============================================================================

/// Test one result per trial and bands starting after the independence month
#[test]
fn test_summary_covers_post_independence_months() {
    let config = mc_builder(120, 7).build().unwrap();
    let inputs = retiree(80_000_000.0, 200_000.0);
    let summary = monte_carlo_simulate(&config, &inputs, "standard").unwrap();

    let fire_month = summary.fire_month.unwrap();
    assert_eq!(summary.iterations, 120);
    assert_eq!(summary.completed_trials(), 120);
    assert!(summary.failed_trials.is_empty());
    assert!((0.0..=1.0).contains(&summary.success_rate));

    let total = config.horizon.total_months();
    assert_eq!(summary.bands.start_month, fire_month + 1);
    assert_eq!(summary.bands.len(), total - fire_month);

    assert!(summary.percentile_10 <= summary.median_final_assets);
    assert!(summary.median_final_assets <= summary.percentile_90);
    for i in 0..summary.bands.len() {
        let b = &summary.bands;
        assert!(b.p025[i] <= b.p16[i] && b.p16[i] <= b.p50[i]);
        assert!(b.p50[i] <= b.p84[i] && b.p84[i] <= b.p975[i]);
    }
}

/// Test trajectories can be dropped without affecting the terminal statistics
#[test]
fn test_without_trajectories() {
    let inputs = retiree(80_000_000.0, 200_000.0);
    let with = monte_carlo_simulate(&mc_builder(60, 3).build().unwrap(), &inputs, "standard")
        .unwrap();

    let mut config = mc_builder(60, 3).build().unwrap();
    config.monte_carlo.keep_trajectories = false;
    let without = monte_carlo_simulate(&config, &inputs, "standard").unwrap();

    assert!(without.bands.is_empty());
    assert_eq!(with.final_assets, without.final_assets);
}

// ============================================================================
// Statistical behavior
// ============================================================================

/// Test the deterministic terminal wealth lies between the 10th and 90th percentiles
#[test]
fn test_deterministic_within_trial_range() {
    let config = mc_builder(400, 11).build().unwrap();
    let inputs = retiree(80_000_000.0, 200_000.0);

    let deterministic = simulate(&config, &inputs, "standard").unwrap().final_assets();
    let summary = monte_carlo_simulate(&config, &inputs, "standard").unwrap();

    assert!(
        summary.percentile_10 <= deterministic && deterministic <= summary.percentile_90,
        "deterministic {deterministic:.0} outside [{:.0}, {:.0}]",
        summary.percentile_10,
        summary.percentile_90
    );
}

/// Test the convergence check when independence follows years of saving
#[test]
fn test_deterministic_within_trial_range_after_accumulation() {
    let config = mc_builder(400, 17)
        .allocation(AssetAllocation::default())
        .build()
        .unwrap();
    let inputs = HouseholdInputs {
        cash: 2_000_000.0,
        stocks: 5_000_000.0,
        monthly_income: 600_000.0,
        monthly_expense: 300_000.0,
        ..Default::default()
    };

    let projection = simulate(&config, &inputs, "standard").unwrap();
    let fire_month = projection.fire_month.expect("a 50% saver should reach independence");
    assert!(fire_month > 12, "independence at {fire_month}");
    let snapshot = &projection.records[fire_month].ledger;
    assert!(snapshot.nisa_balance > 0.0, "savings should have been invested");

    let deterministic = projection.final_assets();
    let summary = monte_carlo_simulate(&config, &inputs, "standard").unwrap();

    assert_eq!(summary.fire_month, Some(fire_month));
    assert!(
        summary.percentile_10 <= deterministic && deterministic <= summary.percentile_90,
        "deterministic {deterministic:.0} outside [{:.0}, {:.0}]",
        summary.percentile_10,
        summary.percentile_90
    );
}

/// Test zero volatility reproduces the deterministic projection
#[test]
fn test_zero_volatility_matches_projection() {
    let config = flat_builder(0.05)
        .iterations(5)
        .return_model(
            ReturnModel::Simple {
                mean_reversion_speed: 0.0,
            },
            0.0,
        )
        .build()
        .unwrap();
    let inputs = retiree(80_000_000.0, 200_000.0);

    let deterministic = simulate(&config, &inputs, "standard").unwrap().final_assets();
    let summary = monte_carlo_simulate(&config, &inputs, "standard").unwrap();

    assert_eq!(summary.success_rate, 1.0);
    for value in &summary.final_assets {
        assert!(
            ((value - deterministic) / deterministic).abs() < 1e-6,
            "trial {value:.0} vs projection {deterministic:.0}"
        );
    }
}

/// Test cutting spending in drawdowns never lowers the success rate
#[test]
fn test_dynamic_reduction_improves_success() {
    init_logging();
    let inputs = retiree(60_000_000.0, 250_000.0);

    let fixed = mc_builder(300, 5).manual_annual_expense(3_000_000.0).build().unwrap();
    let flexible = mc_builder(300, 5)
        .manual_annual_expense(3_000_000.0)
        .dynamic_reduction(DynamicReduction::default())
        .build()
        .unwrap();

    let fixed = monte_carlo_simulate(&fixed, &inputs, "standard").unwrap();
    let flexible = monte_carlo_simulate(&flexible, &inputs, "standard").unwrap();

    assert_eq!(fixed.fire_month, flexible.fire_month);
    assert!(fixed.success_rate < 1.0, "expected some failing trials");
    assert!(
        flexible.success_rate >= fixed.success_rate,
        "reduction {:.3} vs fixed {:.3}",
        flexible.success_rate,
        fixed.success_rate
    );
    assert!(flexible.mean_final_assets >= fixed.mean_final_assets);
}

/// Test the enhanced model runs end to end
#[test]
fn test_enhanced_model_trials() {
    let config = flat_builder(0.05)
        .iterations(50)
        .seed(9)
        .return_model(ReturnModel::Enhanced(Default::default()), 0.15)
        .build()
        .unwrap();
    let summary = monte_carlo_simulate(&config, &retiree(80_000_000.0, 200_000.0), "standard")
        .unwrap();

    assert_eq!(summary.completed_trials(), 50);
    assert!(summary.failed_trials.is_empty());
    assert!(summary.success_rate > 0.5);
}

// ============================================================================
// Not achieved
// ============================================================================

/// Test no trials run when independence is never reached
#[test]
fn test_not_achieved_summary() {
    init_logging();
    let config = mc_builder(100, 0).build().unwrap();
    let summary =
        monte_carlo_simulate(&config, &retiree(1_000_000.0, 300_000.0), "standard").unwrap();

    assert_eq!(summary.fire_month, None);
    assert_eq!(summary.iterations, 100);
    assert_eq!(summary.success_rate, 0.0);
    assert_eq!(summary.completed_trials(), 0);
    assert!(summary.bands.is_empty());
}
