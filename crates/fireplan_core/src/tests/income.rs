//! Tests for household income
//!
//! These tests verify:
//! - Labor income with and without growth, and its end at independence
//! - Employee pension accrual frozen at the independence date
//! - Child allowance by age and birth order
//! - Side income stopping once a pension is paid

use super::flat_builder;
use crate::cashflow::{
    HouseholdModel, WorkStatus, employee_pension_amount, national_pension_amount,
};
use crate::config::{
    ChildAllowance, DynamicReduction, PensionKind, PensionPlan, PensionSettings, Scenario,
    SimulationBuilder, SimulationConfig,
};
use crate::model::HouseholdInputs;

fn model(config: &SimulationConfig) -> HouseholdModel<'_> {
    HouseholdModel::new(config, config.scenarios.standard, &HouseholdInputs::default())
}

fn employee_plan(year: i16) -> PensionSettings {
    PensionSettings {
        start_age: 65.0,
        plans: vec![PensionPlan {
            member: "earner".to_string(),
            birthdate: jiff::civil::date(year, 1, 1),
            kind: PensionKind::Employee {
                avg_monthly_salary: 400_000.0,
                work_start_age: 22.0,
                retirement_age: 65.0,
                national_contribution_years: 40.0,
            },
        }],
    }
}

// ============================================================================
// Labor income
// ============================================================================

/// Test configured earners are summed and only growing earners grow
#[test]
fn test_earners_with_growth() {
    let config = SimulationBuilder::new()
        .start(2025, 1, 1)
        .ages(35.0, 90.0)
        .uniform_scenarios(Scenario {
            annual_return_rate: 0.05,
            income_growth_rate: 0.02,
            ..Default::default()
        })
        .earner("salaried", 400_000.0, true)
        .earner("contract", 100_000.0, false)
        .build()
        .unwrap();
    let model = model(&config);

    let ctx = model.month(12);
    let labor = model.labor_income(&ctx, WorkStatus::Working);
    let expected = 400_000.0 * 1.02 + 100_000.0;
    assert!(
        (labor - expected).abs() < 1e-6,
        "Expected {expected:.2}, got {labor:.2}"
    );

    let retired = WorkStatus::Retired { since_years: 0.5 };
    assert_eq!(model.labor_income(&ctx, retired), 0.0);
}

/// Test the caller's income is used when no earners are configured
#[test]
fn test_single_earner_fallback() {
    let config = flat_builder(0.05).build().unwrap();
    let inputs = HouseholdInputs {
        monthly_income: 550_000.0,
        ..Default::default()
    };
    let model = HouseholdModel::new(&config, config.scenarios.standard, &inputs);

    assert_eq!(model.labor_income(&model.month(60), WorkStatus::Working), 550_000.0);
}

// ============================================================================
// Pension
// ============================================================================

/// Test pension is paid only from the receipt age
#[test]
fn test_pension_starts_at_receipt_age() {
    let config = flat_builder(0.05)
        .adult("earner", 1970, 1, 1)
        .pension(employee_plan(1970))
        .build()
        .unwrap();
    let model = model(&config);

    assert_eq!(model.pension_income(&model.month(0), WorkStatus::Working), 0.0);
    // 2035-02: 65.08
    assert!(model.pension_income(&model.month(121), WorkStatus::Working) > 0.0);
}

/// Test employee pension accrual stops at the independence date
#[test]
fn test_employee_pension_frozen_at_independence() {
    let config = flat_builder(0.05)
        .adult("earner", 1970, 1, 1)
        .pension(employee_plan(1970))
        .build()
        .unwrap();
    let model = model(&config);
    let ctx = model.month(121);

    let worked = model.pension_income(&ctx, WorkStatus::Working);
    let expected_worked = employee_pension_amount(400_000.0, 43 * 12) + 816_000.0;
    assert!(
        (worked - expected_worked).abs() < 1e-6,
        "Expected {expected_worked:.2}, got {worked:.2}"
    );

    // independent at the start, age 55: 33 years of accrual
    let retired = model.pension_income(&ctx, WorkStatus::Retired { since_years: 0.0 });
    let expected_retired = employee_pension_amount(400_000.0, 33 * 12) + 816_000.0;
    assert!(
        (retired - expected_retired).abs() < 1e-6,
        "Expected {expected_retired:.2}, got {retired:.2}"
    );
    assert!(retired < worked);
}

/// Test the flat-rate pension scales with contribution years
#[test]
fn test_national_pension_amount() {
    assert_eq!(national_pension_amount(40.0), 816_000.0);
    assert_eq!(national_pension_amount(20.0), 408_000.0);
    assert_eq!(national_pension_amount(55.0), 816_000.0);
}

// ============================================================================
// Child allowance
// ============================================================================

/// Test allowance amounts by age and birth order
#[test]
fn test_child_allowance_by_age_and_order() {
    let config = flat_builder(0.05)
        .child("younger", 2024, 6, 1)
        .child("elder", 2020, 1, 1)
        .child("expected", 2026, 5, 1)
        .child_allowance(ChildAllowance::default())
        .build()
        .unwrap();
    let model = model(&config);

    // elder 5 years old, younger under 3 as a later child, third not born
    let annual = model.child_allowance(&model.month(0));
    assert!(
        (annual - (10_000.0 + 20_000.0) * 12.0).abs() < 1e-6,
        "got {annual}"
    );

    // 2046-01: every child is 18 or older
    assert_eq!(model.child_allowance(&model.month(252)), 0.0);
}

/// Test a first child under 3 receives the first-child amount
#[test]
fn test_first_child_under_three() {
    let config = flat_builder(0.05)
        .child("only", 2024, 6, 1)
        .child_allowance(ChildAllowance::default())
        .build()
        .unwrap();
    let model = model(&config);

    assert!((model.child_allowance(&model.month(0)) - 180_000.0).abs() < 1e-6);
}

// ============================================================================
// Side income
// ============================================================================

/// Test side income is paid after independence until a pension starts
#[test]
fn test_side_income_stops_with_pension() {
    let config = flat_builder(0.05).side_income(100_000.0).build().unwrap();
    let model = model(&config);
    let retired = WorkStatus::Retired { since_years: 0.0 };

    assert_eq!(model.side_income(WorkStatus::Working, 0.0, 0), 0.0);
    assert_eq!(model.side_income(retired, 0.0, 0), 100_000.0);
    assert_eq!(model.side_income(retired, 1.0, 0), 0.0);
}

/// Test a drawdown level adds its income boost
#[test]
fn test_side_income_boost_by_level() {
    let config = flat_builder(0.05)
        .side_income(100_000.0)
        .dynamic_reduction(DynamicReduction {
            income_boost: [50_000.0, 100_000.0, 150_000.0],
            ..Default::default()
        })
        .build()
        .unwrap();
    let model = model(&config);
    let retired = WorkStatus::Retired { since_years: 0.0 };

    assert_eq!(model.side_income(retired, 0.0, 0), 100_000.0);
    assert_eq!(model.side_income(retired, 0.0, 2), 200_000.0);
    assert_eq!(model.side_income(retired, 0.0, 3), 250_000.0);
}
