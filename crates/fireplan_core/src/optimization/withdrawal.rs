//! Pooled-balance withdrawal simulation and related rules of thumb

use crate::cashflow::HouseholdModel;
use crate::config::{Scenario, SimulationConfig};
use crate::model::HouseholdLedger;
use crate::stepper::{MonthStepper, Regime, ReturnSource, run_months};

/// Upper bound on the depletion search
const MAX_DEPLETION_YEARS: u32 = 200;

/// Terminal balance of `capital` paying `annual_expense` (growing with
/// inflation) for `years` at the scenario's fixed return.
///
/// The balance is one untaxed pool. Returns 0 once it falls to the
/// bankruptcy threshold.
#[must_use]
pub fn withdrawal_simulation(
    config: &SimulationConfig,
    scenario: Scenario,
    capital: f64,
    annual_expense: f64,
    years: f64,
) -> f64 {
    let model = HouseholdModel::withdrawal(config, scenario, annual_expense);
    let stepper = MonthStepper::new(
        &model,
        Regime::Withdrawal {
            household_cashflows: config.target.include_household_cashflows,
        },
    );
    let mut ledger = HouseholdLedger {
        stocks: capital,
        stocks_cost_basis: capital,
        year: config.start_date.year(),
        ..Default::default()
    };
    let months = (years * 12.0).max(0.0) as usize;

    run_months(
        &stepper,
        &mut ledger,
        0,
        months,
        ReturnSource::Fixed(scenario.monthly_return()),
        config.horizon.bankruptcy_threshold,
        |_| 0,
        |_, _| {},
    )
    .final_assets()
}

/// Annual expense as a share of assets; zero without assets
#[must_use]
pub fn withdrawal_rate(annual_expense: f64, assets: f64) -> f64 {
    if assets <= 0.0 {
        return 0.0;
    }
    annual_expense / assets
}

/// Years until `assets` run out paying an inflating `annual_expense`.
///
/// Each year the expense is withdrawn, then the remainder earns
/// `annual_return`. The final partial year is fractional. `None` when the
/// assets last beyond 200 years.
#[must_use]
pub fn years_to_depletion(
    assets: f64,
    annual_expense: f64,
    annual_return: f64,
    inflation_rate: f64,
) -> Option<f64> {
    if assets <= 0.0 {
        return Some(0.0);
    }

    let mut balance = assets;
    let mut expense = annual_expense;
    for year in 0..MAX_DEPLETION_YEARS {
        if expense > 0.0 && balance < expense {
            return Some(f64::from(year) + balance / expense);
        }
        balance = (balance - expense) * (1.0 + annual_return);
        expense *= 1.0 + inflation_rate;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withdrawal_rate() {
        assert_eq!(withdrawal_rate(3_000_000.0, 0.0), 0.0);
        assert!((withdrawal_rate(3_000_000.0, 75_000_000.0) - 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_depletion_without_growth() {
        let years = years_to_depletion(10_000_000.0, 2_000_000.0, 0.0, 0.0).unwrap();
        assert!((years - 5.0).abs() < 1e-9, "years {years}");

        let partial = years_to_depletion(5_000_000.0, 2_000_000.0, 0.0, 0.0).unwrap();
        assert!((partial - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_sustainable_assets_never_deplete() {
        assert_eq!(years_to_depletion(100_000_000.0, 2_000_000.0, 0.05, 0.0), None);
        assert_eq!(years_to_depletion(0.0, 1.0, 0.05, 0.0), Some(0.0));
    }
}
