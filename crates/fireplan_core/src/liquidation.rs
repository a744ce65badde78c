//! Tax-aware liquidation and surplus auto-investment
//!
//! Sales draw on the tax-advantaged (NISA) sub-balance first. Taxable
//! holdings are sold at their average cost basis and grossed up so the
//! requested amount remains after capital gains tax.
//!
//! The two callers route proceeds differently:
//! - [`pay_expense`] settles the tax-advantaged proceeds directly against
//!   the expense and passes only the taxable net proceeds through cash.
//! - [`maintain_minimum_cash`] credits every sale proceed to cash.

use crate::config::{AssetAllocation, Toggle};
use crate::model::HouseholdLedger;
use crate::taxes::{capital_gains_tax, gross_up_sale};

/// How holdings are sold
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SalePolicy {
    /// Untaxed sale from the pooled holding
    Plain,
    /// Tax-advantaged balance first, then taxable holdings net of tax
    TaxAware { capital_gains_tax_rate: f64 },
}

impl SalePolicy {
    /// Tax-aware when an asset allocation policy is configured
    #[must_use]
    pub fn for_allocation(allocation: &Toggle<AssetAllocation>) -> Self {
        match allocation {
            Toggle::Enabled(a) => SalePolicy::TaxAware {
                capital_gains_tax_rate: a.capital_gains_tax_rate,
            },
            Toggle::Disabled => SalePolicy::Plain,
        }
    }
}

/// Result of one sale
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SaleOutcome {
    /// Sold from the tax-advantaged sub-balance, untaxed
    pub nisa_sold: f64,
    /// Taxable sale proceeds after tax. Under [`SalePolicy::Plain`] this is
    /// the whole sale.
    pub cash_from_taxable: f64,
    pub capital_gain: f64,
    pub tax: f64,
    /// Gross amount removed from the stock holding
    pub total_sold: f64,
}

impl SaleOutcome {
    /// Net amount the sale made available
    #[must_use]
    pub fn net_proceeds(&self) -> f64 {
        self.nisa_sold + self.cash_from_taxable
    }
}

/// Sell holdings to raise `shortage`.
///
/// The ledger is debited but no proceeds are credited; the caller decides
/// where they go. When holdings run out the sale is partial.
pub fn cover_shortfall(
    ledger: &mut HouseholdLedger,
    shortage: f64,
    policy: SalePolicy,
) -> SaleOutcome {
    if shortage <= 0.0 || ledger.stocks <= 0.0 {
        return SaleOutcome::default();
    }

    let outcome = match policy {
        SalePolicy::Plain => plain_sale(ledger, shortage),
        SalePolicy::TaxAware {
            capital_gains_tax_rate,
        } => tax_aware_sale(ledger, shortage, capital_gains_tax_rate),
    };
    ledger.normalize();
    outcome
}

fn plain_sale(ledger: &mut HouseholdLedger, shortage: f64) -> SaleOutcome {
    let sold = shortage.min(ledger.stocks);
    let cost_share = ledger.stocks_cost_basis * sold / ledger.stocks;
    ledger.stocks -= sold;
    ledger.stocks_cost_basis -= cost_share;

    SaleOutcome {
        cash_from_taxable: sold,
        total_sold: sold,
        ..Default::default()
    }
}

fn tax_aware_sale(ledger: &mut HouseholdLedger, shortage: f64, rate: f64) -> SaleOutcome {
    let mut outcome = SaleOutcome::default();
    let mut remaining = shortage;

    if ledger.nisa_balance > 0.0 {
        let sold = remaining.min(ledger.nisa_balance);
        let cost_share = ledger.nisa_cost_basis * sold / ledger.nisa_balance;

        ledger.nisa_balance -= sold;
        ledger.nisa_cost_basis -= cost_share;
        ledger.stocks -= sold;
        ledger.stocks_cost_basis -= cost_share;

        outcome.nisa_sold = sold;
        remaining -= sold;
    }

    let taxable = ledger.taxable_stocks();
    if remaining > 0.0 && taxable > 0.0 {
        let avg_cost = ledger.taxable_cost_basis() / taxable;
        let sold = gross_up_sale(remaining, rate, avg_cost).min(taxable);
        let sale_cost = sold * avg_cost;
        let gain = (sold - sale_cost).max(0.0);
        let tax = capital_gains_tax(gain, rate);

        ledger.stocks -= sold;
        ledger.stocks_cost_basis -= sale_cost;

        outcome.cash_from_taxable = sold - tax;
        outcome.capital_gain = gain;
        outcome.tax = tax;
        outcome.total_sold += sold;
    }

    outcome.total_sold += outcome.nisa_sold;
    outcome
}

/// How a month's expense was settled
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpensePayment {
    pub sale: SaleOutcome,
    /// Expense left unpaid after cash and holdings ran out
    pub shortfall: f64,
}

/// Pay `amount` from cash, selling holdings for the part cash cannot cover.
///
/// Realized gains are added to this year's total.
pub fn pay_expense(ledger: &mut HouseholdLedger, amount: f64, policy: SalePolicy) -> ExpensePayment {
    if ledger.cash >= amount {
        ledger.cash -= amount;
        return ExpensePayment::default();
    }

    let shortage = amount - ledger.cash;
    ledger.cash = 0.0;

    let sale = cover_shortfall(ledger, shortage, policy);
    ledger.capital_gains_this_year += sale.capital_gain;

    let unpaid = shortage - sale.nisa_sold;
    ledger.cash += sale.cash_from_taxable;
    let settled = ledger.cash.min(unpaid);
    ledger.cash -= settled;

    ExpensePayment {
        sale,
        shortfall: (unpaid - settled).max(0.0),
    }
}

/// Refill cash to `min_balance` from holdings.
///
/// Does nothing while cash is at the floor or no holdings remain.
pub fn maintain_minimum_cash(
    ledger: &mut HouseholdLedger,
    min_balance: f64,
    policy: SalePolicy,
) -> SaleOutcome {
    if ledger.cash >= min_balance || ledger.stocks <= 0.0 {
        return SaleOutcome::default();
    }

    let sale = cover_shortfall(ledger, min_balance - ledger.cash, policy);
    ledger.cash += sale.net_proceeds();
    ledger.capital_gains_this_year += sale.capital_gain;
    sale
}

/// Cash moved into holdings by [`auto_invest_surplus`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AutoInvestment {
    pub invested: f64,
    /// Portion of `invested` that went into the tax-advantaged balance
    pub nisa: f64,
}

/// Cash the household keeps before investing anything
#[must_use]
pub fn required_cash_buffer(monthly_expense: f64, allocation: &AssetAllocation) -> f64 {
    (monthly_expense * allocation.cash_buffer_months).max(allocation.min_cash_balance)
}

/// Invest cash above the required buffer.
///
/// Triggers only once cash exceeds the buffer times the threshold multiplier.
/// The surplus fills the remaining annual tax-advantaged allowance first and
/// the rest goes to taxable holdings when `invest_beyond_nisa` is set. Cash
/// never drops below the buffer.
pub fn auto_invest_surplus(
    ledger: &mut HouseholdLedger,
    monthly_expense: f64,
    allocation: &AssetAllocation,
) -> AutoInvestment {
    let required = required_cash_buffer(monthly_expense, allocation);
    if ledger.cash <= required * allocation.auto_invest_threshold {
        return AutoInvestment::default();
    }

    // a threshold below 1 can trigger while cash is still under the buffer
    let surplus = ledger.cash - required;
    if surplus <= 0.0 {
        return AutoInvestment::default();
    }
    let allowance = (allocation.nisa_annual_limit() - ledger.nisa_used_this_year).max(0.0);
    let nisa = surplus.min(allowance);
    let taxable = if allocation.invest_beyond_nisa {
        surplus - nisa
    } else {
        0.0
    };
    let invested = nisa + taxable;

    ledger.cash -= invested;
    ledger.stocks += invested;
    ledger.stocks_cost_basis += invested;
    ledger.nisa_balance += nisa;
    ledger.nisa_cost_basis += nisa;
    ledger.nisa_used_this_year += nisa;

    AutoInvestment { invested, nisa }
}
