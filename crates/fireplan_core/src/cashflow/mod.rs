//! Expense/Income Model
//!
//! Pure functions of elapsed simulation time and the configuration. A
//! [`HouseholdModel`] binds one scenario and the caller's household inputs;
//! every amount is derived from a [`MonthContext`] so the calendar is never
//! read from the wall clock.
//!
//! Annual amounts are converted to monthly ones in [`HouseholdModel::expenses`]
//! and [`HouseholdModel::income`], which produce the breakdowns stored in each
//! [`crate::model::MonthlyRecord`].

use jiff::civil::Date;

use crate::config::{Scenario, SimulationConfig};
use crate::date_math::{add_months, age_on};
use crate::model::HouseholdInputs;

pub mod drawdown;
mod expenses;
mod income;

pub use drawdown::{
    DrawdownTracker, ReductionBreakdown, apply_dynamic_reduction, drawdown_from_peak,
    drawdown_level, level_for_drawdown,
};
pub use expenses::{BaseExpense, CategoryAmount};
pub use income::{employee_pension_amount, national_pension_amount};

/// Whether labor income is still earned in a month
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkStatus {
    Working,
    /// Independent since `since_years` of simulation time; employer pension
    /// accrual is frozen at that point.
    Retired { since_years: f64 },
}

impl WorkStatus {
    #[must_use]
    pub fn is_retired(self) -> bool {
        matches!(self, WorkStatus::Retired { .. })
    }
}

/// Position of one simulated month on the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthContext {
    /// Month index from the simulation start
    pub month: usize,
    /// Elapsed years, `month / 12`
    pub years: f64,
    pub date: Date,
}

impl MonthContext {
    #[must_use]
    pub fn new(start: Date, month: usize) -> Self {
        Self {
            month,
            years: month as f64 / 12.0,
            date: add_months(start, month as i32),
        }
    }

    /// Fractional age on this month's date
    #[must_use]
    pub fn age_of(&self, birthdate: Date) -> f64 {
        age_on(birthdate, self.date)
    }
}

/// Flat annual expense used when no life-stage table is configured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseFallback {
    /// Annual amount at month 0
    pub annual: f64,
    /// Yearly compounding applied to `annual`
    pub growth_rate: f64,
}

impl ExpenseFallback {
    #[must_use]
    pub fn annual_at(&self, years: f64) -> f64 {
        self.annual * (1.0 + self.growth_rate).powf(years)
    }
}

/// Household cash flows for one scenario
#[derive(Debug, Clone, Copy)]
pub struct HouseholdModel<'a> {
    config: &'a SimulationConfig,
    scenario: Scenario,
    fallback: ExpenseFallback,
    /// Single-earner labor income used when no earners are configured
    monthly_income: f64,
}

impl<'a> HouseholdModel<'a> {
    /// Model driven by the caller's current income and expense
    #[must_use]
    pub fn new(config: &'a SimulationConfig, scenario: Scenario, inputs: &HouseholdInputs) -> Self {
        Self {
            config,
            scenario,
            fallback: ExpenseFallback {
                annual: inputs.monthly_expense * 12.0,
                growth_rate: scenario.expense_growth_rate,
            },
            monthly_income: inputs.monthly_income,
        }
    }

    /// Model for the withdrawal simulation: a fixed annual expense growing
    /// with inflation and no labor income.
    #[must_use]
    pub fn withdrawal(config: &'a SimulationConfig, scenario: Scenario, annual_expense: f64) -> Self {
        Self {
            config,
            scenario,
            fallback: ExpenseFallback {
                annual: annual_expense,
                growth_rate: scenario.inflation_rate,
            },
            monthly_income: 0.0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &'a SimulationConfig {
        self.config
    }

    #[must_use]
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    #[must_use]
    pub fn fallback(&self) -> ExpenseFallback {
        self.fallback
    }

    #[must_use]
    pub fn month(&self, month: usize) -> MonthContext {
        MonthContext::new(self.config.start_date, month)
    }
}
