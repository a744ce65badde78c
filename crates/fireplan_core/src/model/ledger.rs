use serde::{Deserialize, Serialize};

/// Household balances threaded through every simulated month.
///
/// `stocks` is the whole stock holding; the tax-advantaged (NISA) balance
/// is a sub-portion of it with its own cost basis. The difference is the
/// taxable holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdLedger {
    pub cash: f64,
    pub stocks: f64,
    pub stocks_cost_basis: f64,
    pub nisa_balance: f64,
    pub nisa_cost_basis: f64,
    /// Calendar year the counters below belong to
    pub year: i16,
    pub nisa_used_this_year: f64,
    pub capital_gains_this_year: f64,
    /// Feeds the income-based health insurance premium
    pub prev_year_capital_gains: f64,
}

impl HouseholdLedger {
    #[must_use]
    pub fn total_assets(&self) -> f64 {
        self.cash + self.stocks
    }

    #[must_use]
    pub fn taxable_stocks(&self) -> f64 {
        (self.stocks - self.nisa_balance).max(0.0)
    }

    #[must_use]
    pub fn taxable_cost_basis(&self) -> f64 {
        (self.stocks_cost_basis - self.nisa_cost_basis).max(0.0)
    }

    /// Move to `year`, resetting the annual allowance and shifting realized
    /// gains into last year's bucket. Returns true when the year changed.
    pub fn roll_year(&mut self, year: i16) -> bool {
        if year == self.year {
            return false;
        }
        self.year = year;
        self.nisa_used_this_year = 0.0;
        self.prev_year_capital_gains = self.capital_gains_this_year;
        self.capital_gains_this_year = 0.0;
        true
    }

    /// Clamp every balance at zero and keep the tax-advantaged sub-balance
    /// inside the stock holding.
    pub fn normalize(&mut self) {
        self.cash = self.cash.max(0.0);
        self.stocks = self.stocks.max(0.0);
        self.stocks_cost_basis = self.stocks_cost_basis.max(0.0);
        self.nisa_balance = self.nisa_balance.clamp(0.0, self.stocks);
        self.nisa_cost_basis = self.nisa_cost_basis.clamp(0.0, self.stocks_cost_basis);
    }
}

/// Starting balances and household cash flows supplied by the caller.
///
/// Balances come from external data ingestion. The NISA fields are only
/// needed when resuming mid-plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdInputs {
    pub cash: f64,
    pub stocks: f64,
    /// Defaults to the current stock value when unknown
    pub stocks_cost_basis: Option<f64>,
    pub nisa_balance: f64,
    pub nisa_cost_basis: f64,
    /// Monthly labor income at the start of the run
    pub monthly_income: f64,
    /// Monthly expense used when no life-stage table is configured
    pub monthly_expense: f64,
}

impl HouseholdInputs {
    /// Opening ledger for a run starting in `year`
    #[must_use]
    pub fn opening_ledger(&self, year: i16) -> HouseholdLedger {
        let mut ledger = HouseholdLedger {
            cash: self.cash,
            stocks: self.stocks,
            stocks_cost_basis: self.stocks_cost_basis.unwrap_or(self.stocks),
            nisa_balance: self.nisa_balance,
            nisa_cost_basis: self.nisa_cost_basis,
            year,
            ..Default::default()
        };
        ledger.normalize();
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_year_shifts_gains() {
        let mut ledger = HouseholdLedger {
            year: 2025,
            nisa_used_this_year: 1_200_000.0,
            capital_gains_this_year: 300_000.0,
            prev_year_capital_gains: 50_000.0,
            ..Default::default()
        };

        assert!(!ledger.roll_year(2025));
        assert_eq!(ledger.capital_gains_this_year, 300_000.0);

        assert!(ledger.roll_year(2026));
        assert_eq!(ledger.nisa_used_this_year, 0.0);
        assert_eq!(ledger.capital_gains_this_year, 0.0);
        assert_eq!(ledger.prev_year_capital_gains, 300_000.0);
    }

    #[test]
    fn test_opening_ledger_defaults_cost_basis() {
        let inputs = HouseholdInputs {
            cash: 1_000_000.0,
            stocks: 8_000_000.0,
            nisa_balance: 10_000_000.0,
            nisa_cost_basis: 9_000_000.0,
            ..Default::default()
        };
        let ledger = inputs.opening_ledger(2025);
        assert_eq!(ledger.stocks_cost_basis, 8_000_000.0);
        // sub-balance is clamped into the holding
        assert_eq!(ledger.nisa_balance, 8_000_000.0);
        assert_eq!(ledger.nisa_cost_basis, 8_000_000.0);
    }
}
