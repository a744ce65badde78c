//! Target-capital solver
//!
//! For each required scenario, bisects for the smallest starting capital in
//! `[10, 100]` times the annual expense whose withdrawal simulation stays
//! above the bankruptcy threshold until life expectancy. The most expensive
//! scenario, scaled by the safety buffer, is the recommended target.
//!
//! # Example
//!
//! ```ignore
//! use fireplan_core::optimization::calculate_target_capital;
//!
//! let result = calculate_target_capital(&config, 3_000_000.0, 40_000_000.0);
//! println!("target: {:.0} ({:.0}% there)", result.recommended_target, result.progress * 100.0);
//! ```

mod binary_search;
mod result;
mod withdrawal;

pub use binary_search::{BisectionOutcome, bisect_minimum};
pub use result::{ScenarioTarget, TargetCapitalResult, TerminationReason};
pub use withdrawal::{withdrawal_rate, withdrawal_simulation, years_to_depletion};

use crate::config::{Scenario, SimulationConfig};

/// Search bracket in multiples of the annual expense
const LOWER_MULTIPLE: f64 = 10.0;
const UPPER_MULTIPLE: f64 = 100.0;

/// Withdrawal rate behind the rule-of-thumb target
const RULE_OF_4_RATE: f64 = 0.04;

/// Minimum capital that survives `years` of withdrawals under `scenario`
#[must_use]
pub fn minimum_capital(
    config: &SimulationConfig,
    scenario: Scenario,
    annual_expense: f64,
    years: f64,
) -> BisectionOutcome {
    let target = &config.target;
    bisect_minimum(
        annual_expense * LOWER_MULTIPLE,
        annual_expense * UPPER_MULTIPLE,
        target.tolerance,
        target.max_iterations,
        |capital| withdrawal_simulation(config, scenario, capital, annual_expense, years) > 0.0,
    )
}

/// Recommended capital target for `annual_expense` and progress of
/// `current_assets` toward it
#[must_use]
pub fn calculate_target_capital(
    config: &SimulationConfig,
    annual_expense: f64,
    current_assets: f64,
) -> TargetCapitalResult {
    let years = config.horizon.years();
    let safety_buffer = config.target.safety_buffer;

    let scenarios: Vec<ScenarioTarget> = config
        .scenarios
        .named()
        .into_iter()
        .map(|(name, scenario)| {
            let outcome = minimum_capital(config, *scenario, annual_expense, years);
            if !outcome.converged() {
                tracing::warn!(
                    scenario = name,
                    reason = ?outcome.termination_reason,
                    value = outcome.value,
                    "target capital search did not converge"
                );
            }
            ScenarioTarget {
                scenario: name.to_string(),
                minimum_capital: outcome.value,
                iterations: outcome.iterations,
                termination_reason: outcome.termination_reason,
            }
        })
        .collect();

    let worst = scenarios
        .iter()
        .map(|s| s.minimum_capital)
        .fold(0.0, f64::max);
    let recommended_target = worst * safety_buffer;
    let progress = if recommended_target > 0.0 {
        current_assets / recommended_target
    } else {
        0.0
    };

    tracing::info!(
        annual_expense,
        recommended_target,
        progress,
        "target capital computed"
    );

    TargetCapitalResult {
        annual_expense,
        retirement_years: years,
        recommended_target,
        safety_buffer,
        scenarios,
        rule_of_4_target: annual_expense / RULE_OF_4_RATE,
        current_assets,
        progress,
        shortfall: (recommended_target - current_assets).max(0.0),
    }
}
