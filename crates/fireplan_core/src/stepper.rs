//! The single monthly step shared by the projection, the feasibility check,
//! Monte Carlo trials and the withdrawal simulation.
//!
//! Callers differ only in the [`Regime`] (which income and expense rules
//! apply) and the [`ReturnSource`] (fixed scenario rate or a generated path).
//!
//! Month order: roll the calendar year, collect income, pay expenses from
//! cash and sell holdings for any shortage, apply the market return, then top
//! up the cash floor after independence or invest surplus before it.

use crate::cashflow::{HouseholdModel, MonthContext, WorkStatus};
use crate::config::AssetAllocation;
use crate::liquidation::{SalePolicy, auto_invest_surplus, maintain_minimum_cash, pay_expense};
use crate::model::{ExpenseBreakdown, HouseholdLedger, IncomeBreakdown};

/// Income and expense rules for a month
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regime {
    /// Labor income; surplus cash is auto-invested
    Accumulating,
    /// No labor income; social insurance is due and the cash floor is kept
    Retired { since_years: f64 },
    /// Pooled balance paying an inflating expense with untaxed sales.
    /// Household income and expenses apply only when requested.
    Withdrawal { household_cashflows: bool },
}

impl Regime {
    #[must_use]
    pub fn work_status(self) -> WorkStatus {
        match self {
            Regime::Accumulating => WorkStatus::Working,
            Regime::Retired { since_years } => WorkStatus::Retired { since_years },
            Regime::Withdrawal { .. } => WorkStatus::Retired { since_years: 0.0 },
        }
    }
}

/// Where each month's stock return comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReturnSource<'a> {
    /// Same monthly rate every month
    Fixed(f64),
    /// One rate per step, starting at the first month of the run
    Path(&'a [f64]),
}

impl ReturnSource<'_> {
    /// Rate for the `offset`-th month of a run. A path that is too short
    /// yields no return.
    #[must_use]
    pub fn rate(&self, offset: usize) -> f64 {
        match self {
            ReturnSource::Fixed(rate) => *rate,
            ReturnSource::Path(path) => path.get(offset).copied().unwrap_or(0.0),
        }
    }
}

/// Flows of one stepped month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthOutcome {
    pub ctx: MonthContext,
    pub income: IncomeBreakdown,
    pub expense: ExpenseBreakdown,
    pub investment_return: f64,
    pub auto_invested: f64,
    pub nisa_contribution: f64,
    pub capital_gains_tax: f64,
    pub shortfall: f64,
}

impl MonthOutcome {
    #[must_use]
    pub fn net_cash_flow(&self) -> f64 {
        self.income.total() - self.expense.total()
    }
}

/// Advances a ledger one month at a time under a fixed regime
#[derive(Debug, Clone, Copy)]
pub struct MonthStepper<'m, 'c> {
    model: &'m HouseholdModel<'c>,
    regime: Regime,
    sale: SalePolicy,
    allocation: Option<&'c AssetAllocation>,
}

impl<'m, 'c> MonthStepper<'m, 'c> {
    #[must_use]
    pub fn new(model: &'m HouseholdModel<'c>, regime: Regime) -> Self {
        let config = model.config();
        let (sale, allocation) = match regime {
            Regime::Withdrawal { .. } => (SalePolicy::Plain, None),
            _ => (
                SalePolicy::for_allocation(&config.allocation),
                config.allocation.enabled(),
            ),
        };
        Self {
            model,
            regime,
            sale,
            allocation,
        }
    }

    #[must_use]
    pub fn regime(&self) -> Regime {
        self.regime
    }

    #[must_use]
    pub fn model(&self) -> &'m HouseholdModel<'c> {
        self.model
    }

    fn flows(
        &self,
        ctx: &MonthContext,
        ledger: &HouseholdLedger,
        drawdown_level: u8,
    ) -> (IncomeBreakdown, ExpenseBreakdown) {
        let status = self.regime.work_status();
        match self.regime {
            Regime::Withdrawal {
                household_cashflows: false,
            } => (IncomeBreakdown::default(), self.model.pooled_expense(ctx)),
            _ => (
                self.model.income(ctx, status, drawdown_level),
                self.model
                    .expenses(ctx, status, ledger.prev_year_capital_gains, drawdown_level),
            ),
        }
    }

    /// Step absolute month `month` with stock return `rate`.
    ///
    /// `drawdown_level` is the level observed at the end of the previous
    /// month; pass 0 to run without dynamic reduction.
    pub fn step(
        &self,
        ledger: &mut HouseholdLedger,
        month: usize,
        rate: f64,
        drawdown_level: u8,
    ) -> MonthOutcome {
        let ctx = self.model.month(month);
        ledger.roll_year(ctx.date.year());

        let (income, expense) = self.flows(&ctx, ledger, drawdown_level);
        let monthly_expense = expense.total();

        ledger.cash += income.total();
        let payment = pay_expense(ledger, monthly_expense, self.sale);
        let mut capital_gains_tax = payment.sale.tax;

        let investment_return = ledger.stocks * rate;
        ledger.stocks += investment_return;
        ledger.nisa_balance += ledger.nisa_balance * rate;

        let mut auto_invested = 0.0;
        let mut nisa_contribution = 0.0;
        if let Some(allocation) = self.allocation {
            match self.regime {
                Regime::Retired { .. } => {
                    let top_up =
                        maintain_minimum_cash(ledger, allocation.min_cash_balance, self.sale);
                    capital_gains_tax += top_up.tax;
                }
                Regime::Accumulating => {
                    let invested = auto_invest_surplus(ledger, monthly_expense, allocation);
                    auto_invested = invested.invested;
                    nisa_contribution = invested.nisa;
                }
                Regime::Withdrawal { .. } => {}
            }
        }

        ledger.normalize();

        MonthOutcome {
            ctx,
            income,
            expense,
            investment_return,
            auto_invested,
            nisa_contribution,
            capital_gains_tax,
            shortfall: payment.shortfall,
        }
    }
}

/// How a multi-month run ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunEnd {
    /// Every month was stepped; carries the final total assets
    Completed { final_assets: f64 },
    /// Total assets fell to or below the floor at the end of `month`
    Depleted { month: usize },
}

impl RunEnd {
    /// Final total assets, zero after depletion
    #[must_use]
    pub fn final_assets(&self) -> f64 {
        match self {
            RunEnd::Completed { final_assets } => *final_assets,
            RunEnd::Depleted { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn survived(&self) -> bool {
        matches!(self, RunEnd::Completed { .. })
    }
}

/// Step `months` absolute months from `first_month`, stopping at the
/// bankruptcy `floor`.
///
/// `level_for` maps the previous month-end total assets to the drawdown level
/// used for the next month. `on_month` sees every stepped month, including
/// the one that breaches the floor.
#[allow(clippy::too_many_arguments)]
pub fn run_months(
    stepper: &MonthStepper<'_, '_>,
    ledger: &mut HouseholdLedger,
    first_month: usize,
    months: usize,
    returns: ReturnSource<'_>,
    floor: f64,
    mut level_for: impl FnMut(f64) -> u8,
    mut on_month: impl FnMut(&HouseholdLedger, &MonthOutcome),
) -> RunEnd {
    let mut level = level_for(ledger.total_assets());
    for offset in 0..months {
        let month = first_month + offset;
        let outcome = stepper.step(ledger, month, returns.rate(offset), level);
        on_month(ledger, &outcome);

        let total = ledger.total_assets();
        if total <= floor {
            return RunEnd::Depleted { month };
        }
        level = level_for(total);
    }
    RunEnd::Completed {
        final_assets: ledger.total_assets(),
    }
}
