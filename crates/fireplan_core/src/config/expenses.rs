use crate::model::StageTable;

use super::Toggle;

/// Base living expense configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseSettings {
    /// Pinned annual expense; bypasses all stage logic
    pub manual_annual_expense: Option<f64>,
    /// Annual expense per life stage. Absent means the flat fallback expense.
    pub base_by_stage: Option<StageTable<f64>>,
    /// Annual surcharge per additional born child
    pub additional_child_by_stage: StageTable<f64>,
    pub categories: Toggle<CategoryBudgets>,
    pub dynamic_reduction: Toggle<DynamicReduction>,
}

impl ExpenseSettings {
    /// Level boundaries in force; the defaults when reduction is disabled
    #[must_use]
    pub fn drawdown_thresholds(&self) -> DrawdownThresholds {
        self.dynamic_reduction
            .enabled()
            .map_or_else(DrawdownThresholds::default, |r| r.thresholds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Essential,
    Discretionary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudget {
    pub name: String,
    pub annual_amount: f64,
    pub kind: CategoryKind,
}

/// Annual category budgets per life stage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBudgets {
    pub by_stage: StageTable<Vec<CategoryBudget>>,
}

/// Drawdown level boundaries, each a negative fraction of the peak
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawdownThresholds {
    pub level_1: f64,
    pub level_2: f64,
    pub level_3: f64,
}

impl Default for DrawdownThresholds {
    fn default() -> Self {
        Self {
            level_1: -0.15,
            level_2: -0.30,
            level_3: -0.50,
        }
    }
}

/// Drawdown-triggered cuts to the discretionary share of base expense
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicReduction {
    pub thresholds: DrawdownThresholds,
    /// Discretionary cut for levels 1, 2 and 3
    pub cuts: [f64; 3],
    /// Discretionary share of the stage expense when no category budgets exist
    pub discretionary_ratio: StageTable<f64>,
    /// Extra monthly side income for levels 1, 2 and 3
    pub income_boost: [f64; 3],
}

impl Default for DynamicReduction {
    fn default() -> Self {
        Self {
            thresholds: DrawdownThresholds::default(),
            cuts: [0.5, 0.8, 1.0],
            discretionary_ratio: StageTable {
                young_child: 0.25,
                elementary: 0.28,
                junior_high: 0.28,
                high_school: 0.30,
                university: 0.32,
                empty_nest: 0.40,
            },
            income_boost: [0.0; 3],
        }
    }
}

impl DynamicReduction {
    /// Cut applied at `level` (0 means none)
    #[must_use]
    pub fn cut_for(&self, level: u8) -> f64 {
        match level {
            0 => 0.0,
            l => self.cuts[(l.min(3) - 1) as usize],
        }
    }

    #[must_use]
    pub fn income_boost_for(&self, level: u8) -> f64 {
        match level {
            0 => 0.0,
            l => self.income_boost[(l.min(3) - 1) as usize],
        }
    }
}
