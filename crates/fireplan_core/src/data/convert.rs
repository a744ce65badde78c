//! Conversion from the YAML schema to the engine configuration

use std::collections::HashMap;

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use super::{
    AllocationData, ChildData, ConfigData, DynamicReductionData, EducationData,
    EnhancedModelData, LevelValuesData, PensionData, ScenarioData, StageValuesData,
};
use crate::config::{
    Adult, AssetAllocation, CategoryBudget, CategoryBudgets, CategoryKind, Child,
    ChildAllowance, DrawdownThresholds, DynamicReduction, Earner, EducationCosts, ExpenseSettings,
    HealthInsurance, HorizonSettings, Household, MAX_CONTRIBUTION_YEARS, Maintenance,
    MaintenanceItem, MonteCarloSettings, Mortgage, NisaSettings, OPTIMISTIC, PESSIMISTIC,
    PensionKind, PensionPlan, PensionSettings, STANDARD, Scenario, ScenarioTable, SchoolChoices,
    SimulationConfig, SocialInsurance, TargetSettings, Toggle, Workation,
};
use crate::error::ConfigError;
use crate::model::{GarchParams, LifeStage, ReturnModel, StageTable};

fn parse_date(field: &'static str, value: &str) -> Result<Date, ConfigError> {
    value.parse::<Date>().map_err(|_| ConfigError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn require<T>(value: Option<T>, section: &'static str, field: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingField { section, field })
}

/// Convert the YAML document into a validated [`SimulationConfig`]
pub fn to_simulation_config(data: &ConfigData) -> Result<SimulationConfig, ConfigError> {
    let sim = &data.simulation;
    let start_date = parse_date(
        "simulation.start_date",
        require(sim.start_date.as_deref(), "simulation", "start_date")?,
    )?;

    let defaults = HorizonSettings::default();
    let horizon = HorizonSettings {
        start_age: sim.start_age.unwrap_or(defaults.start_age),
        life_expectancy: sim.life_expectancy.unwrap_or(defaults.life_expectancy),
        bankruptcy_threshold: sim
            .bankruptcy_threshold
            .unwrap_or(defaults.bankruptcy_threshold),
    };

    let household = convert_household(data)?;

    let config = SimulationConfig {
        start_date,
        horizon,
        scenarios: convert_scenarios(&data.scenarios)?,
        expenses: convert_expenses(data)?,
        education: convert_education(&data.education),
        pension: convert_pension(&data.pension, &household)?,
        child_allowance: convert_child_allowance(data),
        social_insurance: convert_social_insurance(data),
        mortgage: convert_mortgage(data)?,
        maintenance: convert_maintenance(data),
        workation: convert_workation(data)?,
        side_income_monthly: sim.post_fire_income.unwrap_or(0.0),
        allocation: convert_allocation(&data.asset_allocation),
        monte_carlo: convert_monte_carlo(data),
        target: convert_target(data),
        household,
    };

    config.validate()?;
    Ok(config)
}

fn convert_scenario(data: &ScenarioData) -> Result<Scenario, ConfigError> {
    Ok(Scenario {
        annual_return_rate: require(data.annual_return_rate, "scenarios", "annual_return_rate")?,
        inflation_rate: require(data.inflation_rate, "scenarios", "inflation_rate")?,
        income_growth_rate: require(data.income_growth_rate, "scenarios", "income_growth_rate")?,
        expense_growth_rate: require(
            data.expense_growth_rate,
            "scenarios",
            "expense_growth_rate",
        )?,
    })
}

fn convert_scenarios(data: &HashMap<String, ScenarioData>) -> Result<ScenarioTable, ConfigError> {
    let get = |name: &'static str| {
        data.get(name)
            .ok_or(ConfigError::MissingScenario(name))
            .and_then(convert_scenario)
    };
    let mut table = ScenarioTable::new(get(STANDARD)?, get(OPTIMISTIC)?, get(PESSIMISTIC)?);

    let mut extra = FxHashMap::default();
    for (name, scenario) in data {
        if ![STANDARD, OPTIMISTIC, PESSIMISTIC].contains(&name.as_str()) {
            extra.insert(name.clone(), convert_scenario(scenario)?);
        }
    }
    table.extra = extra;
    Ok(table)
}

fn convert_child(child: &ChildData) -> Result<Child, ConfigError> {
    let defaults = SchoolChoices::default();
    let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);
    Ok(Child {
        name: child.name.clone(),
        birthdate: parse_date("household.children.birthdate", &child.birthdate)?,
        schools: SchoolChoices {
            nursery: pick(&child.nursery, defaults.nursery),
            kindergarten: pick(&child.kindergarten, defaults.kindergarten),
            elementary: pick(&child.elementary, defaults.elementary),
            junior_high: pick(&child.junior_high, defaults.junior_high),
            high: pick(&child.high, defaults.high),
            university: pick(&child.university, defaults.university),
        },
    })
}

fn convert_household(data: &ConfigData) -> Result<Household, ConfigError> {
    let adults = data
        .household
        .adults
        .iter()
        .map(|a| {
            Ok(Adult {
                name: a.name.clone(),
                birthdate: parse_date("household.adults.birthdate", &a.birthdate)?,
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    let earners = data
        .household
        .earners
        .iter()
        .map(|e| Earner {
            name: e.name.clone(),
            monthly_income: e.monthly_income,
            apply_growth: e.apply_growth,
        })
        .collect();

    let mut children = data
        .household
        .children
        .iter()
        .map(convert_child)
        .collect::<Result<Vec<_>, _>>()?;
    // eldest first
    children.sort_by_key(|c| c.birthdate);

    Ok(Household {
        adults,
        earners,
        children,
    })
}

fn stage_values(
    data: &StageValuesData,
    section: &'static str,
) -> Result<StageTable<f64>, ConfigError> {
    StageTable::try_from_fn(|stage| {
        let value = match stage {
            LifeStage::YoungChild => data.young_child,
            LifeStage::Elementary => data.elementary,
            LifeStage::JuniorHigh => data.junior_high,
            LifeStage::HighSchool => data.high_school,
            LifeStage::University => data.university,
            LifeStage::EmptyNest => data.empty_nest,
        };
        require(value, section, stage.as_str())
    })
}

fn level_values(data: &LevelValuesData, defaults: [f64; 3]) -> [f64; 3] {
    [
        data.level_1.unwrap_or(defaults[0]),
        data.level_2.unwrap_or(defaults[1]),
        data.level_3.unwrap_or(defaults[2]),
    ]
}

fn convert_dynamic_reduction(
    data: &DynamicReductionData,
) -> Result<Toggle<DynamicReduction>, ConfigError> {
    if !data.enabled {
        return Ok(Toggle::Disabled);
    }
    let defaults = DynamicReduction::default();
    let t = defaults.thresholds;
    let thresholds = data.thresholds.as_ref().map_or(t, |d| {
        let [level_1, level_2, level_3] = level_values(d, [t.level_1, t.level_2, t.level_3]);
        DrawdownThresholds {
            level_1,
            level_2,
            level_3,
        }
    });
    let cuts = data
        .reduction_rates
        .as_ref()
        .map_or(defaults.cuts, |d| level_values(d, defaults.cuts));
    let income_boost = data
        .income_boost
        .as_ref()
        .map_or(defaults.income_boost, |d| level_values(d, defaults.income_boost));
    let discretionary_ratio = match &data.discretionary_ratio_by_stage {
        Some(d) => stage_values(d, "discretionary_ratio_by_stage")?,
        None => defaults.discretionary_ratio,
    };

    Ok(Toggle::Enabled(DynamicReduction {
        thresholds,
        cuts,
        discretionary_ratio,
        income_boost,
    }))
}

fn convert_expenses(data: &ConfigData) -> Result<ExpenseSettings, ConfigError> {
    let e = &data.expenses;

    let base_by_stage = e
        .base_expense_by_stage
        .as_ref()
        .map(|d| stage_values(d, "base_expense_by_stage"))
        .transpose()?;
    // a partial surcharge table only charges the stages it names
    let additional_child_by_stage = e
        .additional_child_expense_by_stage
        .as_ref()
        .map(|d| {
            StageTable::from_fn(|stage| {
                let v = match stage {
                    LifeStage::YoungChild => d.young_child,
                    LifeStage::Elementary => d.elementary,
                    LifeStage::JuniorHigh => d.junior_high,
                    LifeStage::HighSchool => d.high_school,
                    LifeStage::University => d.university,
                    LifeStage::EmptyNest => d.empty_nest,
                };
                v.unwrap_or(0.0)
            })
        })
        .unwrap_or_default();

    let categories = if e.categories.enabled {
        let by_stage = StageTable::try_from_fn(|stage| {
            let budgets = e
                .categories
                .stages
                .get(stage.as_str())
                .ok_or(ConfigError::MissingField {
                    section: "expenses.categories",
                    field: stage.as_str(),
                })?;
            Ok::<_, ConfigError>(
                budgets
                    .iter()
                    .map(|c| CategoryBudget {
                        name: c.name.clone(),
                        annual_amount: c.annual_amount,
                        kind: if c.discretionary {
                            CategoryKind::Discretionary
                        } else {
                            CategoryKind::Essential
                        },
                    })
                    .collect(),
            )
        })?;
        Toggle::Enabled(CategoryBudgets { by_stage })
    } else {
        Toggle::Disabled
    };

    Ok(ExpenseSettings {
        manual_annual_expense: e.manual_annual_expense,
        base_by_stage,
        additional_child_by_stage,
        categories,
        dynamic_reduction: convert_dynamic_reduction(&e.dynamic_reduction)?,
    })
}

fn convert_education(data: &EducationData) -> Toggle<EducationCosts> {
    if !data.enabled {
        return Toggle::Disabled;
    }
    let to_fx = |m: &HashMap<String, f64>| -> FxHashMap<String, f64> {
        m.iter().map(|(k, v)| (k.clone(), *v)).collect()
    };
    let c = &data.costs;
    Toggle::Enabled(EducationCosts {
        nursery: to_fx(&c.nursery),
        kindergarten: to_fx(&c.kindergarten),
        elementary: to_fx(&c.elementary),
        junior_high: to_fx(&c.junior_high),
        high: to_fx(&c.high),
        university: to_fx(&c.university),
    })
}

fn convert_pension(
    data: &PensionData,
    household: &Household,
) -> Result<Toggle<PensionSettings>, ConfigError> {
    if !data.enabled {
        return Ok(Toggle::Disabled);
    }
    let mut plans = Vec::with_capacity(data.plans.len());
    for plan in &data.plans {
        let birthdate = household
            .adults
            .iter()
            .find(|a| a.name == plan.member)
            .map(|a| a.birthdate)
            .ok_or_else(|| ConfigError::UnknownMember(plan.member.clone()))?;
        let years = plan.contribution_years.unwrap_or(MAX_CONTRIBUTION_YEARS);
        let kind = match plan.kind.as_str() {
            "employee" => PensionKind::Employee {
                avg_monthly_salary: require(
                    plan.avg_monthly_salary,
                    "pension.plans",
                    "avg_monthly_salary",
                )?,
                work_start_age: plan.work_start_age.unwrap_or(23.0),
                retirement_age: plan.retirement_age.unwrap_or(65.0),
                national_contribution_years: years,
            },
            "national" => PensionKind::National {
                contribution_years: years,
            },
            "fixed" => PensionKind::Fixed {
                annual_amount: require(plan.annual_amount, "pension.plans", "annual_amount")?,
            },
            other => return Err(ConfigError::UnknownPensionType(other.to_string())),
        };
        plans.push(PensionPlan {
            member: plan.member.clone(),
            birthdate,
            kind,
        });
    }
    Ok(Toggle::Enabled(PensionSettings {
        start_age: data.start_age.unwrap_or(65.0),
        plans,
    }))
}

fn convert_child_allowance(data: &ConfigData) -> Toggle<ChildAllowance> {
    let c = &data.child_allowance;
    if !c.enabled {
        return Toggle::Disabled;
    }
    let d = ChildAllowance::default();
    Toggle::Enabled(ChildAllowance {
        first_child_under_3: c.first_child_under_3.unwrap_or(d.first_child_under_3),
        later_child_under_3: c.later_child_under_3.unwrap_or(d.later_child_under_3),
        age_3_to_17: c.age_3_to_17.unwrap_or(d.age_3_to_17),
    })
}

fn convert_social_insurance(data: &ConfigData) -> Toggle<SocialInsurance> {
    let s = &data.social_insurance;
    if !s.enabled {
        return Toggle::Disabled;
    }
    let d = SocialInsurance::default();
    let h = &s.health_insurance;
    Toggle::Enabled(SocialInsurance {
        national_pension_monthly: s
            .national_pension_monthly
            .unwrap_or(d.national_pension_monthly),
        health: HealthInsurance {
            income_rate: h.income_rate.unwrap_or(d.health.income_rate),
            basic_deduction: h.basic_deduction.unwrap_or(d.health.basic_deduction),
            per_person: h.per_person.unwrap_or(d.health.per_person),
            per_household: h.per_household.unwrap_or(d.health.per_household),
            max_premium: h.max_premium.unwrap_or(d.health.max_premium),
            members: h.members.unwrap_or(d.health.members),
        },
    })
}

fn convert_mortgage(data: &ConfigData) -> Result<Toggle<Mortgage>, ConfigError> {
    let m = &data.mortgage;
    if !m.enabled {
        return Ok(Toggle::Disabled);
    }
    Ok(Toggle::Enabled(Mortgage {
        monthly_payment: require(m.monthly_payment, "mortgage", "monthly_payment")?,
        end_date: parse_date(
            "mortgage.end_date",
            require(m.end_date.as_deref(), "mortgage", "end_date")?,
        )?,
    }))
}

fn convert_maintenance(data: &ConfigData) -> Toggle<Maintenance> {
    let m = &data.house_maintenance;
    if !m.enabled {
        return Toggle::Disabled;
    }
    Toggle::Enabled(Maintenance {
        items: m
            .items
            .iter()
            .map(|i| MaintenanceItem {
                name: i.name.clone(),
                first_year: i.first_year,
                frequency_years: i.frequency_years,
                cost: i.cost,
            })
            .collect(),
    })
}

fn convert_workation(data: &ConfigData) -> Result<Toggle<Workation>, ConfigError> {
    let w = &data.workation;
    if !w.enabled {
        return Ok(Toggle::Disabled);
    }
    Ok(Toggle::Enabled(Workation {
        annual_cost: require(w.annual_cost, "workation", "annual_cost")?,
        child_index: w.start_child_index.unwrap_or(1),
        start_age: w.start_child_age.unwrap_or(18.0),
    }))
}

fn convert_allocation(data: &AllocationData) -> Toggle<AssetAllocation> {
    if !data.enabled {
        return Toggle::Disabled;
    }
    let d = AssetAllocation::default();
    let nisa = if data.nisa_enabled.unwrap_or(true) {
        Toggle::Enabled(NisaSettings {
            annual_limit: data
                .nisa_annual_limit
                .unwrap_or(NisaSettings::default().annual_limit),
        })
    } else {
        Toggle::Disabled
    };
    Toggle::Enabled(AssetAllocation {
        cash_buffer_months: data.cash_buffer_months.unwrap_or(d.cash_buffer_months),
        auto_invest_threshold: data.auto_invest_threshold.unwrap_or(d.auto_invest_threshold),
        nisa,
        invest_beyond_nisa: data.invest_beyond_nisa.unwrap_or(d.invest_beyond_nisa),
        min_cash_balance: data.min_cash_balance.unwrap_or(d.min_cash_balance),
        capital_gains_tax_rate: data
            .capital_gains_tax_rate
            .unwrap_or(d.capital_gains_tax_rate),
    })
}

fn convert_enhanced(data: &EnhancedModelData) -> GarchParams {
    let d = GarchParams::default();
    GarchParams {
        omega: data.garch_omega.or(d.omega),
        alpha: data.garch_alpha.unwrap_or(d.alpha),
        beta: data.garch_beta.unwrap_or(d.beta),
        volatility_floor: data.volatility_floor.unwrap_or(d.volatility_floor),
        volatility_ceiling: data.volatility_ceiling.unwrap_or(d.volatility_ceiling),
        mean_reversion_window: data.mean_reversion_window.unwrap_or(d.mean_reversion_window),
        mr_speed_crash: data.mr_speed_crash.unwrap_or(d.mr_speed_crash),
        mr_speed_normal: data.mr_speed_normal.unwrap_or(d.mr_speed_normal),
        mr_speed_bubble: data.mr_speed_bubble.unwrap_or(d.mr_speed_bubble),
        crash_threshold: data.crash_threshold.unwrap_or(d.crash_threshold),
        bubble_threshold: data.bubble_threshold.unwrap_or(d.bubble_threshold),
    }
}

fn convert_monte_carlo(data: &ConfigData) -> MonteCarloSettings {
    let mc = &data.monte_carlo;
    let d = MonteCarloSettings::default();
    let model = if mc.enhanced_model.enabled {
        ReturnModel::Enhanced(convert_enhanced(&mc.enhanced_model))
    } else {
        ReturnModel::Simple {
            mean_reversion_speed: mc.mean_reversion_speed.unwrap_or(0.0),
        }
    };
    MonteCarloSettings {
        iterations: mc.iterations.unwrap_or(d.iterations),
        return_std_dev: mc.return_std_dev.unwrap_or(d.return_std_dev),
        model,
        seed: mc.seed.unwrap_or(d.seed),
        keep_trajectories: mc.keep_trajectories.unwrap_or(d.keep_trajectories),
    }
}

fn convert_target(data: &ConfigData) -> TargetSettings {
    let f = &data.fire;
    let d = TargetSettings::default();
    TargetSettings {
        safety_buffer: f.safety_buffer.unwrap_or(d.safety_buffer),
        tolerance: f.tolerance.unwrap_or(d.tolerance),
        max_iterations: f.max_iterations.unwrap_or(d.max_iterations),
        include_household_cashflows: f
            .include_household_cashflows
            .unwrap_or(d.include_household_cashflows),
    }
}
