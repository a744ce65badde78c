//! Tests for YAML configuration loading
//!
//! These tests verify:
//! - A complete document converts into the engine configuration
//! - Documented defaults fill omitted keys
//! - Missing scenarios, fields and bad references fail at load time
//! - A loaded configuration runs end to end
//! - A document written back out loads to the same configuration

use crate::config::{PensionKind, SimulationConfig, Toggle};
use crate::data::{ConfigData, to_simulation_config};
use crate::error::ConfigError;
use crate::model::{HouseholdInputs, LifeStage, ReturnModel};
use crate::simulation::simulate;

const FULL_CONFIG: &str = r#"
simulation:
  start_date: "2025-04-01"
  start_age: 35
  life_expectancy: 90
  bankruptcy_threshold: 5000000
  post_fire_income: 80000

scenarios:
  standard:
    annual_return_rate: 0.05
    inflation_rate: 0.01
    income_growth_rate: 0.01
    expense_growth_rate: 0.01
  optimistic:
    annual_return_rate: 0.07
    inflation_rate: 0.01
    income_growth_rate: 0.02
    expense_growth_rate: 0.01
  pessimistic:
    annual_return_rate: 0.03
    inflation_rate: 0.02
    income_growth_rate: 0.0
    expense_growth_rate: 0.02
  stagflation:
    annual_return_rate: 0.01
    inflation_rate: 0.04
    income_growth_rate: 0.0
    expense_growth_rate: 0.04

household:
  adults:
    - name: alex
      birthdate: "1990-05-10"
    - name: sam
      birthdate: "1991-08-20"
  earners:
    - name: alex
      monthly_income: 450000
    - name: sam
      monthly_income: 150000
      apply_growth: false
  children:
    - name: second
      birthdate: "2025-09-01"
    - name: first
      birthdate: "2022-02-26"
      elementary: private

expenses:
  base_expense_by_stage:
    young_child: 3000000
    elementary: 3200000
    junior_high: 3400000
    high_school: 3600000
    university: 3800000
    empty_nest: 2800000
  additional_child_expense_by_stage:
    young_child: 400000
    elementary: 500000
  dynamic_reduction:
    enabled: true
    thresholds:
      level_1: -0.10
    reduction_rates:
      level_1: 0.3
      level_2: 0.6
      level_3: 0.9

education:
  enabled: true
  costs:
    nursery:
      public: 300000
    kindergarten:
      public: 200000
    elementary:
      public: 350000
      private: 1600000
    junior_high:
      public: 500000
    high:
      public: 450000
    university:
      national: 800000

pension:
  enabled: true
  start_age: 65
  plans:
    - member: alex
      type: employee
      avg_monthly_salary: 450000
      work_start_age: 23
    - member: sam
      type: national
      contribution_years: 30

child_allowance:
  enabled: true

social_insurance:
  enabled: true
  health_insurance:
    members: 2

mortgage:
  enabled: true
  monthly_payment: 120000
  end_date: "2055-03-01"

house_maintenance:
  enabled: true
  items:
    - name: exterior
      first_year: 2035
      frequency_years: 15
      cost: 2000000

workation:
  enabled: true
  annual_cost: 600000

asset_allocation:
  enabled: true
  cash_buffer_months: 6
  nisa_annual_limit: 3600000

monte_carlo:
  iterations: 500
  return_std_dev: 0.18
  seed: 42
  enhanced_model:
    enabled: true
    garch_alpha: 0.1

fire:
  safety_buffer: 1.3
"#;

fn load(yaml: &str) -> Result<SimulationConfig, ConfigError> {
    SimulationConfig::from_yaml(yaml)
}

// ============================================================================
// Complete document
// ============================================================================

/// Test every section of a complete document is converted
#[test]
fn test_full_document() {
    let config = load(FULL_CONFIG).unwrap();

    assert_eq!(config.start_date, jiff::civil::date(2025, 4, 1));
    assert_eq!(config.horizon.total_months(), 660);
    assert_eq!(config.side_income_monthly, 80_000.0);
    assert_eq!(config.scenarios.pessimistic.annual_return_rate, 0.03);
    assert!(config.scenario("stagflation").is_ok());

    let household = &config.household;
    assert_eq!(household.adults.len(), 2);
    assert!(!household.earners[1].apply_growth);
    assert_eq!(household.children[0].name, "first");
    assert_eq!(household.children[0].schools.elementary, "private");
    assert_eq!(household.children[1].schools.nursery, "none");

    let expenses = &config.expenses;
    let base = expenses.base_by_stage.as_ref().unwrap();
    assert_eq!(*base.get(LifeStage::EmptyNest), 2_800_000.0);
    assert_eq!(*expenses.additional_child_by_stage.get(LifeStage::Elementary), 500_000.0);
    assert_eq!(*expenses.additional_child_by_stage.get(LifeStage::University), 0.0);

    let Toggle::Enabled(reduction) = &expenses.dynamic_reduction else {
        panic!("dynamic reduction should be enabled");
    };
    assert_eq!(reduction.thresholds.level_1, -0.10);
    assert_eq!(reduction.thresholds.level_2, -0.30);
    assert_eq!(reduction.cuts, [0.3, 0.6, 0.9]);

    let Toggle::Enabled(pension) = &config.pension else {
        panic!("pension should be enabled");
    };
    assert_eq!(pension.plans[0].birthdate, jiff::civil::date(1990, 5, 10));
    assert!(matches!(
        pension.plans[0].kind,
        PensionKind::Employee {
            retirement_age,
            national_contribution_years,
            ..
        } if retirement_age == 65.0 && national_contribution_years == 40.0
    ));
    assert!(matches!(
        pension.plans[1].kind,
        PensionKind::National { contribution_years } if contribution_years == 30.0
    ));

    let Toggle::Enabled(workation) = &config.workation else {
        panic!("workation should be enabled");
    };
    assert_eq!(workation.child_index, 1);
    assert_eq!(workation.start_age, 18.0);

    assert_eq!(config.monte_carlo.iterations, 500);
    assert_eq!(config.monte_carlo.seed, 42);
    let ReturnModel::Enhanced(garch) = &config.monte_carlo.model else {
        panic!("enhanced model should be selected");
    };
    assert_eq!(garch.alpha, 0.1);
    assert_eq!(garch.beta, 0.80);

    assert_eq!(config.target.safety_buffer, 1.3);
    assert_eq!(config.target.tolerance, 100_000.0);
}

/// Test a loaded configuration projects end to end
#[test]
fn test_full_document_simulates() {
    let config = load(FULL_CONFIG).unwrap();
    let inputs = HouseholdInputs {
        cash: 3_000_000.0,
        stocks: 20_000_000.0,
        nisa_balance: 4_000_000.0,
        nisa_cost_basis: 3_000_000.0,
        ..Default::default()
    };

    let result = simulate(&config, &inputs, "standard").unwrap();
    assert!(!result.records.is_empty());
    assert!(result.records[0].income.labor > 0.0);
    assert!(result.records[0].expense.mortgage > 0.0);
}

/// Test a parsed document survives being written back to YAML
#[test]
fn test_document_round_trip() {
    let data = ConfigData::from_yaml(FULL_CONFIG).unwrap();
    let written = data.to_yaml().unwrap();
    let reloaded = ConfigData::from_yaml(&written).unwrap();

    assert_eq!(
        to_simulation_config(&reloaded).unwrap(),
        to_simulation_config(&data).unwrap()
    );
    assert_eq!(reloaded.household.children.len(), 2);
    assert_eq!(reloaded.scenarios.len(), 4);
}

/// Test sections left out of the document stay disabled
#[test]
fn test_minimal_document_defaults() {
    let yaml = r#"
simulation:
  start_date: "2025-01-01"
scenarios:
  standard: {annual_return_rate: 0.05, inflation_rate: 0.01, income_growth_rate: 0.0, expense_growth_rate: 0.0}
  optimistic: {annual_return_rate: 0.06, inflation_rate: 0.01, income_growth_rate: 0.0, expense_growth_rate: 0.0}
  pessimistic: {annual_return_rate: 0.04, inflation_rate: 0.01, income_growth_rate: 0.0, expense_growth_rate: 0.0}
"#;
    let config = load(yaml).unwrap();

    assert_eq!(config.horizon.start_age, 35.0);
    assert_eq!(config.horizon.life_expectancy, 90.0);
    assert_eq!(config.horizon.bankruptcy_threshold, 5_000_000.0);
    assert!(!config.education.is_enabled());
    assert!(!config.pension.is_enabled());
    assert!(!config.allocation.is_enabled());
    assert!(!config.expenses.dynamic_reduction.is_enabled());
    assert_eq!(config.monte_carlo.iterations, 1000);
    assert!(matches!(
        config.monte_carlo.model,
        ReturnModel::Simple { mean_reversion_speed } if mean_reversion_speed == 0.0
    ));
}

// ============================================================================
// Errors
// ============================================================================

/// Test a missing required scenario is reported by name
#[test]
fn test_missing_scenario() {
    let yaml = FULL_CONFIG.replace("  pessimistic:", "  downside:");
    let err = load(&yaml).unwrap_err();
    assert!(matches!(err, ConfigError::MissingScenario("pessimistic")));
}

/// Test a missing start date is a missing field
#[test]
fn test_missing_start_date() {
    let yaml = FULL_CONFIG.replace("  start_date: \"2025-04-01\"\n", "");
    let err = load(&yaml).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingField {
            section: "simulation",
            field: "start_date"
        }
    ));
}

/// Test an unparseable date names the offending field
#[test]
fn test_invalid_date() {
    let yaml = FULL_CONFIG.replace("2055-03-01", "2055-13-01");
    let err = load(&yaml).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidDate { field: "mortgage.end_date", .. }
    ));
}

/// Test a school type without a cost entry is rejected
#[test]
fn test_unknown_school_type() {
    let yaml = FULL_CONFIG.replace("elementary: private", "elementary: international");
    let err = load(&yaml).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownSchoolType { stage: "elementary", ref kind } if kind == "international"
    ));
}

/// Test pension plans must name a household adult and a known type
#[test]
fn test_pension_references() {
    let unknown_member = FULL_CONFIG.replace("- member: sam", "- member: kim");
    assert!(matches!(
        load(&unknown_member).unwrap_err(),
        ConfigError::UnknownMember(ref name) if name == "kim"
    ));

    let unknown_type = FULL_CONFIG.replace("type: national", "type: corporate");
    assert!(matches!(
        load(&unknown_type).unwrap_err(),
        ConfigError::UnknownPensionType(ref kind) if kind == "corporate"
    ));
}

/// Test enabled category budgets must cover every stage
#[test]
fn test_category_budgets_require_every_stage() {
    let yaml = FULL_CONFIG.replace(
        "  dynamic_reduction:\n",
        "  categories:\n    enabled: true\n    stages:\n      young_child:\n        - {name: food, annual_amount: 1200000}\n  dynamic_reduction:\n",
    );
    let err = load(&yaml).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingField {
            section: "expenses.categories",
            ..
        }
    ));
}

/// Test out-of-range values fail validation
#[test]
fn test_invalid_values_rejected() {
    let yaml = FULL_CONFIG.replace("iterations: 500", "iterations: 0");
    assert!(matches!(
        load(&yaml).unwrap_err(),
        ConfigError::InvalidValue { field: "monte_carlo.iterations", .. }
    ));

    let yaml = FULL_CONFIG.replace("garch_alpha: 0.1", "garch_alpha: 0.3");
    assert!(matches!(
        load(&yaml).unwrap_err(),
        ConfigError::InvalidValue { field: "garch_beta", .. }
    ));
}

/// Test malformed YAML surfaces as a parse error
#[test]
fn test_malformed_yaml() {
    let err = ConfigData::from_yaml("simulation: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
