//! Tax and premium formulas
//!
//! Flat separate taxation of realized capital gains and the income-based
//! national health insurance premium.

use crate::config::HealthInsurance;

/// Tax on a realized gain; losses are not taxed
#[must_use]
pub fn capital_gains_tax(gain: f64, rate: f64) -> f64 {
    gain.max(0.0) * rate
}

/// Gross sale needed from a holding whose cost basis is `cost_ratio` of its
/// value so that `net` remains after capital gains tax.
#[must_use]
pub fn gross_up_sale(net: f64, rate: f64, cost_ratio: f64) -> f64 {
    let effective_rate = rate * (1.0 - cost_ratio).max(0.0);
    if effective_rate < 1.0 {
        net / (1.0 - effective_rate)
    } else {
        net
    }
}

/// Annual national health insurance premium for `annual_income`
///
/// Income share above the basic deduction, plus the per-member and
/// per-household flat shares, capped at the maximum premium.
#[must_use]
pub fn health_insurance_premium(params: &HealthInsurance, annual_income: f64) -> f64 {
    let income_share = (annual_income - params.basic_deduction).max(0.0) * params.income_rate;
    let flat_share = params.per_person * f64::from(params.members) + params.per_household;
    (income_share + flat_share).min(params.max_premium)
}
