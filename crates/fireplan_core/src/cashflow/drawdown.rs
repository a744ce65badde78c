//! Drawdown levels and dynamic expense reduction
//!
//! The drawdown is the current total assets relative to the peak seen so far.
//! Crossing the configured thresholds raises the level (0 normal, 1 caution,
//! 2 severe, 3 crisis), and each level cuts the discretionary share of the
//! base expense by its configured percentage. The essential share never
//! changes.

use crate::config::{CategoryKind, DrawdownThresholds, DynamicReduction};

use super::expenses::{BaseExpense, CategoryAmount};

/// Fractional decline from `peak`; zero when the peak is not positive
#[must_use]
pub fn drawdown_from_peak(current: f64, peak: f64) -> f64 {
    if peak <= 0.0 {
        return 0.0;
    }
    current / peak - 1.0
}

#[must_use]
pub fn level_for_drawdown(drawdown: f64, thresholds: &DrawdownThresholds) -> u8 {
    if drawdown <= thresholds.level_3 {
        3
    } else if drawdown <= thresholds.level_2 {
        2
    } else if drawdown <= thresholds.level_1 {
        1
    } else {
        0
    }
}

/// Drawdown and level of `current` against the highest value in
/// `peak_history`. An empty history treats `current` as the peak.
#[must_use]
pub fn drawdown_level(
    current: f64,
    peak_history: &[f64],
    thresholds: &DrawdownThresholds,
) -> (f64, u8) {
    let peak = peak_history.iter().copied().reduce(f64::max).unwrap_or(current);
    let drawdown = drawdown_from_peak(current, peak);
    (drawdown, level_for_drawdown(drawdown, thresholds))
}

/// Base expense split after a reduction. Amounts are annual.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionBreakdown<'a> {
    pub essential: f64,
    pub discretionary_original: f64,
    pub discretionary: f64,
    /// Cut applied to the discretionary share
    pub reduction_rate: f64,
    pub amount_saved: f64,
    /// Category budgets after the cut; empty without category budgets
    pub categories_after: Vec<CategoryAmount<'a>>,
}

impl ReductionBreakdown<'_> {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.essential + self.discretionary
    }
}

/// Cut the discretionary share of `base` for `level`.
///
/// With category budgets the discretionary share is the sum of the
/// discretionary categories; otherwise it is the stage's configured ratio of
/// the whole base expense.
#[must_use]
pub fn apply_dynamic_reduction<'a>(
    base: &BaseExpense<'a>,
    reduction: &DynamicReduction,
    level: u8,
) -> ReductionBreakdown<'a> {
    let rate = reduction.cut_for(level);
    let discretionary_original = if base.has_categories() {
        base.discretionary_categories()
    } else {
        base.annual * reduction.discretionary_ratio.get(base.stage)
    };
    let discretionary = discretionary_original * (1.0 - rate);

    let categories_after = base
        .categories
        .iter()
        .map(|b| CategoryAmount {
            name: &b.name,
            kind: b.kind,
            amount: match b.kind {
                CategoryKind::Essential => b.annual_amount,
                CategoryKind::Discretionary => b.annual_amount * (1.0 - rate),
            },
        })
        .collect();

    ReductionBreakdown {
        essential: base.annual - discretionary_original,
        discretionary_original,
        discretionary,
        reduction_rate: rate,
        amount_saved: discretionary_original - discretionary,
        categories_after,
    }
}

/// Running peak and current level over a trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawdownTracker {
    thresholds: DrawdownThresholds,
    peak: f64,
    drawdown: f64,
    level: u8,
}

impl DrawdownTracker {
    #[must_use]
    pub fn new(thresholds: DrawdownThresholds) -> Self {
        Self {
            thresholds,
            peak: f64::NEG_INFINITY,
            drawdown: 0.0,
            level: 0,
        }
    }

    /// Record month-end total assets and return the resulting level
    pub fn observe(&mut self, total_assets: f64) -> u8 {
        self.peak = self.peak.max(total_assets);
        self.drawdown = drawdown_from_peak(total_assets, self.peak);
        self.level = level_for_drawdown(self.drawdown, &self.thresholds);
        self.level
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn drawdown(&self) -> f64 {
        self.drawdown
    }

    #[must_use]
    pub fn peak(&self) -> f64 {
        self.peak
    }
}
