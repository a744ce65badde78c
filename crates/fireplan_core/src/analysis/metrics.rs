//! Derived metrics over a projection

use crate::model::{MonthlyRecord, SimulationResult};

/// Share of income saved. Zero when there is no income.
#[must_use]
pub fn savings_rate(income: f64, expense: f64) -> f64 {
    if income <= 0.0 {
        return 0.0;
    }
    (income - expense) / income
}

/// Largest peak-to-trough decline of total assets, as a positive fraction
#[must_use]
pub fn compute_max_drawdown(result: &SimulationResult) -> f64 {
    let Some(first) = result.records.first() else {
        return 0.0;
    };

    let mut peak = first.total_assets();
    let mut max_drawdown = 0.0;
    for total in result.records.iter().map(MonthlyRecord::total_assets) {
        if total > peak {
            peak = total;
        }
        if peak > 0.0 {
            max_drawdown = f64::max(max_drawdown, (peak - total) / peak);
        }
    }
    max_drawdown
}

/// Annual totals of a projection, one row per calendar year
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i16,
    pub income: f64,
    pub expense: f64,
    pub savings_rate: f64,
    pub nisa_contribution: f64,
    pub capital_gains_tax: f64,
    /// Total assets at the last simulated month of the year
    pub closing_assets: f64,
}

/// Group monthly records by calendar year
#[must_use]
pub fn yearly_summary(records: &[MonthlyRecord]) -> Vec<YearSummary> {
    let mut years: Vec<YearSummary> = Vec::new();
    for record in records {
        let year = record.date.year();
        if years.last().is_none_or(|row| row.year != year) {
            years.push(YearSummary {
                year,
                income: 0.0,
                expense: 0.0,
                savings_rate: 0.0,
                nisa_contribution: 0.0,
                capital_gains_tax: 0.0,
                closing_assets: 0.0,
            });
        }
        let Some(row) = years.last_mut() else {
            continue;
        };
        row.income += record.income.total();
        row.expense += record.expense.total();
        row.nisa_contribution += record.nisa_contribution;
        row.capital_gains_tax += record.capital_gains_tax;
        row.closing_assets = record.total_assets();
    }

    for row in &mut years {
        row.savings_rate = savings_rate(row.income, row.expense);
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_savings_rate_without_income() {
        assert_eq!(savings_rate(0.0, 100_000.0), 0.0);
        assert_eq!(savings_rate(-10.0, 0.0), 0.0);
        assert!((savings_rate(500_000.0, 300_000.0) - 0.4).abs() < 1e-12);
    }
}
