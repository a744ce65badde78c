//! Eager validation run once when a configuration is built

use rustc_hash::FxHashMap;

use super::{
    EducationCosts, ExpenseSettings, PensionKind, Scenario, SimulationConfig, Toggle,
};
use crate::error::ConfigError;
use crate::model::ReturnModel;

fn finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be a finite number",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if finite(field, value)? < 0.0 {
        return Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must not be negative",
        });
    }
    Ok(value)
}

fn fraction(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !(0.0..=1.0).contains(&finite(field, value)?) {
        return Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be between 0 and 1",
        });
    }
    Ok(value)
}

fn rate(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if finite(field, value)? <= -1.0 {
        return Err(ConfigError::InvalidValue {
            field,
            value,
            reason: "must be greater than -100%",
        });
    }
    Ok(value)
}

fn validate_scenario(s: &Scenario) -> Result<(), ConfigError> {
    rate("annual_return_rate", s.annual_return_rate)?;
    rate("inflation_rate", s.inflation_rate)?;
    rate("income_growth_rate", s.income_growth_rate)?;
    rate("expense_growth_rate", s.expense_growth_rate)?;
    Ok(())
}

fn school_cost_exists(
    table: &FxHashMap<String, f64>,
    stage: &'static str,
    kind: &str,
) -> Result<(), ConfigError> {
    if kind == "none" || table.contains_key(kind) {
        Ok(())
    } else {
        Err(ConfigError::UnknownSchoolType {
            stage,
            kind: kind.to_string(),
        })
    }
}

fn validate_expenses(expenses: &ExpenseSettings) -> Result<(), ConfigError> {
    if let Some(manual) = expenses.manual_annual_expense {
        non_negative("manual_annual_expense", manual)?;
    }
    if let Some(table) = &expenses.base_by_stage {
        for (_, v) in table.iter() {
            non_negative("base_expense_by_stage", *v)?;
        }
    }
    for (_, v) in expenses.additional_child_by_stage.iter() {
        non_negative("additional_child_expense_by_stage", *v)?;
    }
    if let Toggle::Enabled(categories) = &expenses.categories {
        for (_, budgets) in categories.by_stage.iter() {
            for b in budgets {
                non_negative("expense_categories.annual_amount", b.annual_amount)?;
            }
        }
    }
    if let Toggle::Enabled(reduction) = &expenses.dynamic_reduction {
        let t = reduction.thresholds;
        for v in [t.level_1, t.level_2, t.level_3] {
            if !(-1.0..0.0).contains(&finite("drawdown_thresholds", v)?) {
                return Err(ConfigError::InvalidValue {
                    field: "drawdown_thresholds",
                    value: v,
                    reason: "must lie in [-1, 0)",
                });
            }
        }
        if !(t.level_1 > t.level_2 && t.level_2 > t.level_3) {
            return Err(ConfigError::InvalidValue {
                field: "drawdown_thresholds",
                value: t.level_2,
                reason: "levels must be strictly descending",
            });
        }
        for cut in reduction.cuts {
            fraction("reduction_rates", cut)?;
        }
        for (_, ratio) in reduction.discretionary_ratio.iter() {
            fraction("discretionary_ratio_by_stage", *ratio)?;
        }
        for boost in reduction.income_boost {
            non_negative("income_boost", boost)?;
        }
    }
    Ok(())
}

fn validate_education(config: &SimulationConfig, costs: &EducationCosts) -> Result<(), ConfigError> {
    for child in &config.household.children {
        let s = &child.schools;
        school_cost_exists(&costs.nursery, "nursery", &s.nursery)?;
        school_cost_exists(&costs.kindergarten, "kindergarten", &s.kindergarten)?;
        school_cost_exists(&costs.elementary, "elementary", &s.elementary)?;
        school_cost_exists(&costs.junior_high, "junior_high", &s.junior_high)?;
        school_cost_exists(&costs.high, "high", &s.high)?;
        school_cost_exists(&costs.university, "university", &s.university)?;
    }
    Ok(())
}

impl SimulationConfig {
    /// Check every invariant the engine relies on.
    ///
    /// Called by the builder and the YAML conversion; a config that passes
    /// never causes a lookup failure inside a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = &self.horizon;
        non_negative("start_age", h.start_age)?;
        if finite("life_expectancy", h.life_expectancy)? <= h.start_age {
            return Err(ConfigError::InvalidValue {
                field: "life_expectancy",
                value: h.life_expectancy,
                reason: "must exceed the starting age",
            });
        }
        non_negative("bankruptcy_threshold", h.bankruptcy_threshold)?;

        for (_, scenario) in self.scenarios.named() {
            validate_scenario(scenario)?;
        }
        for scenario in self.scenarios.extra.values() {
            validate_scenario(scenario)?;
        }

        validate_expenses(&self.expenses)?;

        for earner in &self.household.earners {
            non_negative("earners.monthly_income", earner.monthly_income)?;
        }

        if let Toggle::Enabled(costs) = &self.education {
            validate_education(self, costs)?;
        }

        if let Toggle::Enabled(pension) = &self.pension {
            non_negative("pension.start_age", pension.start_age)?;
            for plan in &pension.plans {
                match plan.kind {
                    PensionKind::Employee {
                        avg_monthly_salary,
                        national_contribution_years,
                        ..
                    } => {
                        non_negative("avg_monthly_salary", avg_monthly_salary)?;
                        non_negative("contribution_years", national_contribution_years)?;
                    }
                    PensionKind::National { contribution_years } => {
                        non_negative("contribution_years", contribution_years)?;
                    }
                    PensionKind::Fixed { annual_amount } => {
                        non_negative("annual_amount", annual_amount)?;
                    }
                }
            }
        }

        if let Toggle::Enabled(maintenance) = &self.maintenance {
            for item in &maintenance.items {
                if item.frequency_years == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "house_maintenance.frequency_years",
                        value: 0.0,
                        reason: "must be at least one year",
                    });
                }
                non_negative("house_maintenance.cost", item.cost)?;
            }
        }

        non_negative("post_fire_income", self.side_income_monthly)?;

        if let Toggle::Enabled(allocation) = &self.allocation {
            non_negative("cash_buffer_months", allocation.cash_buffer_months)?;
            non_negative("auto_invest_threshold", allocation.auto_invest_threshold)?;
            non_negative("min_cash_balance", allocation.min_cash_balance)?;
            fraction("capital_gains_tax_rate", allocation.capital_gains_tax_rate)?;
            if allocation.capital_gains_tax_rate >= 1.0 {
                return Err(ConfigError::InvalidValue {
                    field: "capital_gains_tax_rate",
                    value: allocation.capital_gains_tax_rate,
                    reason: "must be below 100%",
                });
            }
            non_negative("nisa_annual_limit", allocation.nisa_annual_limit())?;
        }

        let mc = &self.monte_carlo;
        if mc.iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "monte_carlo.iterations",
                value: 0.0,
                reason: "must be at least one",
            });
        }
        non_negative("monte_carlo.return_std_dev", mc.return_std_dev)?;
        match &mc.model {
            ReturnModel::Simple {
                mean_reversion_speed,
            } => {
                fraction("mean_reversion_speed", *mean_reversion_speed)?;
            }
            ReturnModel::Enhanced(g) => {
                if let Some(omega) = g.omega {
                    non_negative("garch_omega", omega)?;
                }
                fraction("garch_alpha", g.alpha)?;
                fraction("garch_beta", g.beta)?;
                if g.alpha + g.beta >= 1.0 {
                    return Err(ConfigError::InvalidValue {
                        field: "garch_beta",
                        value: g.alpha + g.beta,
                        reason: "alpha + beta must be below 1 for a stationary variance",
                    });
                }
                non_negative("volatility_floor", g.volatility_floor)?;
                if finite("volatility_ceiling", g.volatility_ceiling)? < g.volatility_floor {
                    return Err(ConfigError::InvalidValue {
                        field: "volatility_ceiling",
                        value: g.volatility_ceiling,
                        reason: "must not be below the volatility floor",
                    });
                }
                fraction("mr_speed_crash", g.mr_speed_crash)?;
                fraction("mr_speed_normal", g.mr_speed_normal)?;
                fraction("mr_speed_bubble", g.mr_speed_bubble)?;
            }
        }

        let t = &self.target;
        if finite("safety_buffer", t.safety_buffer)? < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "safety_buffer",
                value: t.safety_buffer,
                reason: "must be at least 1",
            });
        }
        if finite("tolerance", t.tolerance)? <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "tolerance",
                value: t.tolerance,
                reason: "must be positive",
            });
        }

        Ok(())
    }
}
