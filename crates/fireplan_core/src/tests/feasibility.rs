//! Tests for the retirement feasibility check
//!
//! These tests verify:
//! - A household whose returns cover its spending can retire immediately
//! - Insufficient assets fail the check
//! - Assets already at the bankruptcy threshold fail without replaying
//! - No remaining months means the check passes for a solvent household
//! - The replay always reaches the last month of the horizon

use super::flat_builder;
use crate::cashflow::HouseholdModel;
use crate::feasibility::{can_retire_now, replay_retirement, simulate_post_fire_assets};
use crate::model::HouseholdInputs;
use crate::stepper::RunEnd;

fn inputs(stocks: f64, monthly_expense: f64) -> HouseholdInputs {
    HouseholdInputs {
        stocks,
        monthly_expense,
        ..Default::default()
    }
}

/// Test 50M at 5% covers 2.4M a year from age 35 to 90
#[test]
fn test_sufficient_assets_can_retire() {
    let config = flat_builder(0.05).build().unwrap();
    let inputs = inputs(50_000_000.0, 200_000.0);
    let model = HouseholdModel::new(&config, config.scenarios.standard, &inputs);
    let ledger = inputs.opening_ledger(2025);

    assert!(can_retire_now(&model, &ledger, 1));

    let terminal = simulate_post_fire_assets(&model, &ledger, 1);
    assert!(
        terminal > 50_000_000.0,
        "Returns exceed spending, so assets should grow: got {terminal:.0}"
    );
}

/// Test assets that last about twenty years fail a 55-year horizon
#[test]
fn test_insufficient_assets_cannot_retire() {
    let config = flat_builder(0.05).build().unwrap();
    let inputs = inputs(30_000_000.0, 250_000.0);
    let model = HouseholdModel::new(&config, config.scenarios.standard, &inputs);
    let ledger = inputs.opening_ledger(2025);

    assert!(!can_retire_now(&model, &ledger, 1));
    assert_eq!(simulate_post_fire_assets(&model, &ledger, 1), 0.0);

    match replay_retirement(&model, &ledger, 1) {
        Some(RunEnd::Depleted { month }) => {
            assert!(month > 1 && month < 660, "depleted at {month}");
        }
        other => panic!("Expected depletion, got {other:?}"),
    }
}

/// Test a ledger at the threshold fails at the check month
#[test]
fn test_assets_at_threshold_fail_immediately() {
    let config = flat_builder(0.05).build().unwrap();
    let inputs = inputs(5_000_000.0, 0.0);
    let model = HouseholdModel::new(&config, config.scenarios.standard, &inputs);
    let ledger = inputs.opening_ledger(2025);

    assert_eq!(
        replay_retirement(&model, &ledger, 12),
        Some(RunEnd::Depleted { month: 12 })
    );
    assert!(!can_retire_now(&model, &ledger, 12));
}

/// Test the check passes with no months left unless assets are already depleted
#[test]
fn test_no_remaining_months() {
    let config = flat_builder(0.05).build().unwrap();
    let inputs = inputs(10_000_000.0, 500_000.0);
    let model = HouseholdModel::new(&config, config.scenarios.standard, &inputs);
    let ledger = inputs.opening_ledger(2025);
    let last = config.horizon.total_months();

    assert_eq!(replay_retirement(&model, &ledger, last), None);
    assert!(can_retire_now(&model, &ledger, last));
    assert_eq!(simulate_post_fire_assets(&model, &ledger, last), 10_000_000.0);

    let broke = HouseholdInputs::default().opening_ledger(2025);
    assert!(!can_retire_now(&model, &broke, last));
}

/// Test the bankruptcy threshold decides between success and failure
#[test]
fn test_threshold_changes_outcome() {
    // 20M at 0% paying 100k a month lasts 200 months
    let inputs = inputs(20_000_000.0, 100_000.0);

    let strict = flat_builder(0.0)
        .ages(70.0, 85.0)
        .bankruptcy_threshold(5_000_000.0)
        .build()
        .unwrap();
    let model = HouseholdModel::new(&strict, strict.scenarios.standard, &inputs);
    assert!(!can_retire_now(&model, &inputs.opening_ledger(2025), 1));

    let lenient = flat_builder(0.0)
        .ages(70.0, 85.0)
        .bankruptcy_threshold(0.0)
        .build()
        .unwrap();
    let model = HouseholdModel::new(&lenient, lenient.scenarios.standard, &inputs);
    assert!(can_retire_now(&model, &inputs.opening_ledger(2025), 1));
}

/// Test every month replays through the final month of the horizon
#[test]
fn test_replay_reaches_final_month() {
    let config = flat_builder(0.0).bankruptcy_threshold(0.0).build().unwrap();
    let total = config.horizon.total_months();
    assert_eq!(total, 660);
    for month in 0..=total {
        assert_eq!(config.horizon.remaining_months(month), total - month, "month {month}");
    }
    assert_eq!(config.horizon.remaining_months(total + 5), 0);

    // 466 months of 100k remain from month 194; 50k short runs out in the last one
    let inputs = inputs(46_550_000.0, 100_000.0);
    let model = HouseholdModel::new(&config, config.scenarios.standard, &inputs);
    let ledger = inputs.opening_ledger(2041);

    assert_eq!(
        replay_retirement(&model, &ledger, 194),
        Some(RunEnd::Depleted { month: 659 })
    );
}
