//! Monthly household expenses

use crate::config::{CategoryBudget, CategoryKind, EducationCosts, SchoolChoices, Toggle};
use crate::model::{ExpenseBreakdown, LifeStage};
use crate::taxes::health_insurance_premium;

use super::drawdown::apply_dynamic_reduction;
use super::{HouseholdModel, MonthContext, WorkStatus};

/// A category budget after any reduction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryAmount<'a> {
    pub name: &'a str,
    pub kind: CategoryKind,
    /// Annual amount
    pub amount: f64,
}

/// Annual base living expense for one month of the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseExpense<'a> {
    pub stage: LifeStage,
    /// Annual amount including additional-child surcharges
    pub annual: f64,
    /// Budgets behind `annual`; empty unless category budgets are configured
    pub categories: &'a [CategoryBudget],
}

impl BaseExpense<'_> {
    #[must_use]
    pub fn has_categories(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Annual sum of the discretionary categories
    #[must_use]
    pub fn discretionary_categories(&self) -> f64 {
        self.categories
            .iter()
            .filter(|b| b.kind == CategoryKind::Discretionary)
            .map(|b| b.annual_amount)
            .sum()
    }
}

/// Annual cost of the school a child of `age` attends
fn school_cost(costs: &EducationCosts, schools: &SchoolChoices, age: f64) -> f64 {
    let (table, kind) = if age < 0.0 {
        return 0.0;
    } else if age < 3.0 {
        (&costs.nursery, &schools.nursery)
    } else if age < 6.0 {
        (&costs.kindergarten, &schools.kindergarten)
    } else if age < 12.0 {
        (&costs.elementary, &schools.elementary)
    } else if age < 15.0 {
        (&costs.junior_high, &schools.junior_high)
    } else if age < 18.0 {
        (&costs.high, &schools.high)
    } else if age < 22.0 {
        (&costs.university, &schools.university)
    } else {
        return 0.0;
    };

    if kind == "none" {
        return 0.0;
    }
    table.get(kind.as_str()).copied().unwrap_or(0.0)
}

impl<'a> HouseholdModel<'a> {
    /// Household stage from the eldest child's age. A child not yet born
    /// counts as a young child.
    #[must_use]
    pub fn life_stage(&self, ctx: &MonthContext) -> LifeStage {
        let eldest = self.config.household.children.first();
        LifeStage::from_child_age(eldest.map(|c| ctx.age_of(c.birthdate)))
    }

    /// Annual surcharge for every additional child already born, each at
    /// its own stage
    #[must_use]
    pub fn additional_child_surcharge(&self, ctx: &MonthContext) -> f64 {
        let table = &self.config.expenses.additional_child_by_stage;
        self.config
            .household
            .children
            .iter()
            .skip(1)
            .map(|c| ctx.age_of(c.birthdate))
            .filter(|age| *age >= 0.0)
            .map(|age| *table.get(LifeStage::from_child_age(Some(age))))
            .sum()
    }

    /// Annual base living expense before any drawdown reduction
    #[must_use]
    pub fn base_expense(&self, ctx: &MonthContext) -> BaseExpense<'a> {
        let config = self.config;
        let stage = self.life_stage(ctx);
        let expenses = &config.expenses;

        if let Some(manual) = expenses.manual_annual_expense {
            return BaseExpense {
                stage,
                annual: manual,
                categories: &[],
            };
        }

        let (annual, categories) = match (&expenses.categories, &expenses.base_by_stage) {
            (Toggle::Enabled(budgets), _) => {
                let stage_budgets = budgets.by_stage.get(stage);
                let total = stage_budgets.iter().map(|b| b.annual_amount).sum();
                (total, stage_budgets.as_slice())
            }
            (Toggle::Disabled, Some(table)) => (*table.get(stage), &[][..]),
            (Toggle::Disabled, None) => (self.fallback.annual_at(ctx.years), &[][..]),
        };

        BaseExpense {
            stage,
            annual: annual + self.additional_child_surcharge(ctx),
            categories,
        }
    }

    /// Annual education cost over all children
    #[must_use]
    pub fn education_expense(&self, ctx: &MonthContext) -> f64 {
        let Toggle::Enabled(costs) = &self.config.education else {
            return 0.0;
        };
        self.config
            .household
            .children
            .iter()
            .map(|c| school_cost(costs, &c.schools, ctx.age_of(c.birthdate)))
            .sum()
    }

    /// Monthly mortgage payment, due through the end date
    #[must_use]
    pub fn mortgage_payment(&self, ctx: &MonthContext) -> f64 {
        match &self.config.mortgage {
            Toggle::Enabled(m) if ctx.date <= m.end_date => m.monthly_payment,
            _ => 0.0,
        }
    }

    /// Annual maintenance cost of the items due in this calendar year
    #[must_use]
    pub fn maintenance_cost(&self, ctx: &MonthContext) -> f64 {
        let Toggle::Enabled(maintenance) = &self.config.maintenance else {
            return 0.0;
        };
        let year = ctx.date.year();
        maintenance
            .items
            .iter()
            .filter(|item| {
                year >= item.first_year
                    && (year - item.first_year) as u32 % item.frequency_years == 0
            })
            .map(|item| item.cost)
            .sum()
    }

    /// Annual workation cost once the configured child is old enough
    #[must_use]
    pub fn workation_cost(&self, ctx: &MonthContext) -> f64 {
        let Toggle::Enabled(w) = &self.config.workation else {
            return 0.0;
        };
        match self.config.household.children.get(w.child_index) {
            Some(child) if ctx.age_of(child.birthdate) >= w.start_age => w.annual_cost,
            _ => 0.0,
        }
    }

    /// Annual national pension premium, paid after independence by every
    /// adult aged 20 to 59
    #[must_use]
    pub fn national_pension_premium(&self, ctx: &MonthContext, status: WorkStatus) -> f64 {
        let Toggle::Enabled(si) = &self.config.social_insurance else {
            return 0.0;
        };
        if !status.is_retired() {
            return 0.0;
        }
        let contributors = self
            .config
            .household
            .adults
            .iter()
            .map(|a| ctx.age_of(a.birthdate))
            .filter(|age| (20.0..60.0).contains(age))
            .count();
        contributors as f64 * si.national_pension_monthly * 12.0
    }

    /// Annual health insurance premium after independence, assessed on side
    /// income and last year's realized gains
    #[must_use]
    pub fn health_insurance(&self, status: WorkStatus, prev_year_capital_gains: f64) -> f64 {
        let Toggle::Enabled(si) = &self.config.social_insurance else {
            return 0.0;
        };
        if !status.is_retired() {
            return 0.0;
        }
        let income = self.config.side_income_monthly * 12.0 + prev_year_capital_gains;
        health_insurance_premium(&si.health, income)
    }

    /// Monthly expenses by category.
    ///
    /// A non-zero `drawdown_level` cuts the discretionary share of the base
    /// expense when dynamic reduction is enabled.
    #[must_use]
    pub fn expenses(
        &self,
        ctx: &MonthContext,
        status: WorkStatus,
        prev_year_capital_gains: f64,
        drawdown_level: u8,
    ) -> ExpenseBreakdown {
        let base = self.base_expense(ctx);
        let base_annual = match &self.config.expenses.dynamic_reduction {
            Toggle::Enabled(reduction) if drawdown_level > 0 => {
                apply_dynamic_reduction(&base, reduction, drawdown_level).total()
            }
            _ => base.annual,
        };

        ExpenseBreakdown {
            base: base_annual / 12.0,
            education: self.education_expense(ctx) / 12.0,
            mortgage: self.mortgage_payment(ctx),
            maintenance: self.maintenance_cost(ctx) / 12.0,
            workation: self.workation_cost(ctx) / 12.0,
            national_pension_premium: self.national_pension_premium(ctx, status) / 12.0,
            health_insurance_premium: self.health_insurance(status, prev_year_capital_gains)
                / 12.0,
        }
    }

    /// Pooled withdrawal expense: the fallback amount only
    #[must_use]
    pub fn pooled_expense(&self, ctx: &MonthContext) -> ExpenseBreakdown {
        ExpenseBreakdown {
            base: self.fallback.annual_at(ctx.years) / 12.0,
            ..Default::default()
        }
    }
}
