//! Retirement feasibility check
//!
//! Answers "could the household stop working this month?" by replaying the
//! rest of the lifetime under the scenario's fixed monthly return. Any month
//! ending with total assets at or below the bankruptcy threshold is a
//! failure.

use crate::cashflow::HouseholdModel;
use crate::model::HouseholdLedger;
use crate::stepper::{MonthStepper, Regime, ReturnSource, RunEnd, run_months};

/// Replay the retired household from the end of `month` to life expectancy.
///
/// A ledger already at the bankruptcy threshold fails at `month`. Otherwise
/// returns `None` when no months remain.
#[must_use]
pub fn replay_retirement(
    model: &HouseholdModel<'_>,
    ledger: &HouseholdLedger,
    month: usize,
) -> Option<RunEnd> {
    let horizon = &model.config().horizon;
    let floor = horizon.bankruptcy_threshold;
    if ledger.total_assets() <= floor {
        return Some(RunEnd::Depleted { month });
    }

    let remaining = horizon.remaining_months(month);
    if remaining == 0 {
        return None;
    }
    let years = month as f64 / 12.0;
    let mut ledger = *ledger;

    let stepper = MonthStepper::new(model, Regime::Retired { since_years: years });
    Some(run_months(
        &stepper,
        &mut ledger,
        month,
        remaining,
        ReturnSource::Fixed(model.scenario().monthly_return()),
        floor,
        |_| 0,
        |_, _| {},
    ))
}

/// Whether retiring at `month` with `ledger` stays above the bankruptcy
/// threshold through life expectancy
#[must_use]
pub fn can_retire_now(model: &HouseholdModel<'_>, ledger: &HouseholdLedger, month: usize) -> bool {
    replay_retirement(model, ledger, month).is_none_or(|end| end.survived())
}

/// Terminal total assets when retiring at `month`, zero on depletion.
///
/// With no months remaining the current total is returned.
#[must_use]
pub fn simulate_post_fire_assets(
    model: &HouseholdModel<'_>,
    ledger: &HouseholdLedger,
    month: usize,
) -> f64 {
    replay_retirement(model, ledger, month).map_or(ledger.total_assets(), |end| end.final_assets())
}
