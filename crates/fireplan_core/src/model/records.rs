//! Per-month output records

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ledger::HouseholdLedger;

/// Monthly income by source
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub labor: f64,
    pub pension: f64,
    pub child_allowance: f64,
    /// Post-independence side income, including any drawdown boost
    pub side_income: f64,
}

impl IncomeBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.labor + self.pension + self.child_allowance + self.side_income
    }
}

/// Monthly expense by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseBreakdown {
    /// Life-stage living expense after any drawdown reduction
    pub base: f64,
    pub education: f64,
    pub mortgage: f64,
    pub maintenance: f64,
    /// Travel-style discretionary spending
    pub workation: f64,
    pub national_pension_premium: f64,
    pub health_insurance_premium: f64,
}

impl ExpenseBreakdown {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.base
            + self.education
            + self.mortgage
            + self.maintenance
            + self.workation
            + self.national_pension_premium
            + self.health_insurance_premium
    }
}

/// One simulated month. Created once by the projection and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub date: Date,
    pub month: usize,
    /// Ledger at the end of the month
    pub ledger: HouseholdLedger,
    pub income: IncomeBreakdown,
    pub expense: ExpenseBreakdown,
    pub net_cash_flow: f64,
    pub investment_return: f64,
    pub auto_invested: f64,
    /// Portion of `auto_invested` that went into the tax-advantaged balance
    pub nisa_contribution: f64,
    pub capital_gains_tax: f64,
    /// Expense left unpaid because cash and holdings ran out
    pub shortfall: f64,
    pub drawdown_level: u8,
    pub fire_achieved: bool,
    pub fire_month: Option<usize>,
}

impl MonthlyRecord {
    #[must_use]
    pub fn total_assets(&self) -> f64 {
        self.ledger.total_assets()
    }
}
