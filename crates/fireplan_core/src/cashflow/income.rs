//! Monthly household income

use crate::config::{
    EMPLOYEE_PENSION_MULTIPLIER, MAX_CONTRIBUTION_YEARS, NATIONAL_PENSION_FULL_AMOUNT,
    PensionKind, PensionPlan, Toggle,
};
use crate::date_math::age_at;
use crate::model::IncomeBreakdown;

use super::{HouseholdModel, MonthContext, WorkStatus};

/// Annual flat-rate national pension for a contribution record
#[must_use]
pub fn national_pension_amount(contribution_years: f64) -> f64 {
    NATIONAL_PENSION_FULL_AMOUNT * contribution_years.clamp(0.0, MAX_CONTRIBUTION_YEARS)
        / MAX_CONTRIBUTION_YEARS
}

/// Annual earnings-related employee pension
#[must_use]
pub fn employee_pension_amount(avg_monthly_salary: f64, contribution_months: u32) -> f64 {
    avg_monthly_salary * f64::from(contribution_months) * EMPLOYEE_PENSION_MULTIPLIER
}

impl HouseholdModel<'_> {
    /// Monthly labor income; zero after independence
    #[must_use]
    pub fn labor_income(&self, ctx: &MonthContext, status: WorkStatus) -> f64 {
        if status.is_retired() {
            return 0.0;
        }
        let growth = (1.0 + self.scenario.income_growth_rate).powf(ctx.years);
        let earners = &self.config.household.earners;
        if earners.is_empty() {
            return self.monthly_income * growth;
        }
        earners
            .iter()
            .map(|e| {
                if e.apply_growth {
                    e.monthly_income * growth
                } else {
                    e.monthly_income
                }
            })
            .sum()
    }

    fn plan_amount(&self, plan: &PensionPlan, age: f64, status: WorkStatus) -> f64 {
        match plan.kind {
            PensionKind::Employee {
                avg_monthly_salary,
                work_start_age,
                retirement_age,
                national_contribution_years,
            } => {
                let end_age = match status {
                    WorkStatus::Retired { since_years } => {
                        age_at(plan.birthdate, self.config.start_date, since_years)
                    }
                    WorkStatus::Working => age.min(retirement_age),
                };
                let months = ((end_age - work_start_age).max(0.0) * 12.0).floor() as u32;
                employee_pension_amount(avg_monthly_salary, months)
                    + national_pension_amount(national_contribution_years)
            }
            PensionKind::National { contribution_years } => {
                national_pension_amount(contribution_years)
            }
            PensionKind::Fixed { annual_amount } => annual_amount,
        }
    }

    /// Annual pension over all members who reached the receipt age
    #[must_use]
    pub fn pension_income(&self, ctx: &MonthContext, status: WorkStatus) -> f64 {
        let Toggle::Enabled(pension) = &self.config.pension else {
            return 0.0;
        };
        pension
            .plans
            .iter()
            .filter_map(|plan| {
                let age = ctx.age_of(plan.birthdate);
                (age >= pension.start_age).then(|| self.plan_amount(plan, age, status))
            })
            .sum()
    }

    /// Annual child allowance over all born children
    #[must_use]
    pub fn child_allowance(&self, ctx: &MonthContext) -> f64 {
        let Toggle::Enabled(allowance) = &self.config.child_allowance else {
            return 0.0;
        };
        let monthly: f64 = self
            .config
            .household
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| {
                let age = ctx.age_of(child.birthdate);
                if age < 0.0 || age >= 18.0 {
                    0.0
                } else if age < 3.0 {
                    if i == 0 {
                        allowance.first_child_under_3
                    } else {
                        allowance.later_child_under_3
                    }
                } else {
                    allowance.age_3_to_17
                }
            })
            .sum();
        monthly * 12.0
    }

    /// Monthly side income after independence. Stops once a pension is paid;
    /// a drawdown level adds its configured boost.
    #[must_use]
    pub fn side_income(&self, status: WorkStatus, monthly_pension: f64, drawdown_level: u8) -> f64 {
        if !status.is_retired() || monthly_pension > 0.0 {
            return 0.0;
        }
        let boost = self
            .config
            .expenses
            .dynamic_reduction
            .enabled()
            .map_or(0.0, |r| r.income_boost_for(drawdown_level));
        self.config.side_income_monthly + boost
    }

    /// Monthly income by source
    #[must_use]
    pub fn income(&self, ctx: &MonthContext, status: WorkStatus, drawdown_level: u8) -> IncomeBreakdown {
        let pension = self.pension_income(ctx, status) / 12.0;
        IncomeBreakdown {
            labor: self.labor_income(ctx, status),
            pension,
            child_allowance: self.child_allowance(ctx) / 12.0,
            side_income: self.side_income(status, pension, drawdown_level),
        }
    }
}
