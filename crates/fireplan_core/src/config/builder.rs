//! Simulation Builder
//!
//! Fluent construction of a [`SimulationConfig`]. Sections that are never
//! mentioned stay disabled; `build()` runs the same validation as the YAML
//! loader.
//!
//! # Example
//!
//! ```ignore
//! use fireplan_core::config::{SimulationBuilder, Scenario};
//!
//! let config = SimulationBuilder::new()
//!     .start(2025, 4, 1)
//!     .ages(35.0, 90.0)
//!     .uniform_scenarios(Scenario { annual_return_rate: 0.05, ..Default::default() })
//!     .adult("parent", 1990, 5, 10)
//!     .child("first", 2022, 2, 26)
//!     .side_income(80_000.0)
//!     .build()?;
//! ```

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use super::{
    Adult, AssetAllocation, CategoryBudgets, Child, ChildAllowance, DynamicReduction, Earner,
    EducationCosts, ExpenseSettings, HorizonSettings, Household, Maintenance, MaintenanceItem,
    MonteCarloSettings, Mortgage, OPTIMISTIC, PESSIMISTIC, PensionSettings, STANDARD, Scenario,
    ScenarioTable, SchoolChoices, SimulationConfig, SocialInsurance, TargetSettings, Toggle,
    Workation,
};
use crate::error::ConfigError;
use crate::model::{ReturnModel, StageTable};

/// Builder for [`SimulationConfig`]
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    start_date: Option<Date>,
    horizon: HorizonSettings,
    scenarios: FxHashMap<String, Scenario>,
    household: Household,
    expenses: ExpenseSettings,
    education: Toggle<EducationCosts>,
    pension: Toggle<PensionSettings>,
    child_allowance: Toggle<ChildAllowance>,
    social_insurance: Toggle<SocialInsurance>,
    mortgage: Toggle<Mortgage>,
    maintenance: Toggle<Maintenance>,
    workation: Toggle<Workation>,
    side_income_monthly: f64,
    allocation: Toggle<AssetAllocation>,
    monte_carlo: MonteCarloSettings,
    target: TargetSettings,
}

impl SimulationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Timeline
    // ------------------------------------------------------------------

    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    #[must_use]
    pub fn start(self, year: i16, month: i8, day: i8) -> Self {
        self.start_date(jiff::civil::date(year, month, day))
    }

    /// Starting age and life expectancy
    #[must_use]
    pub fn ages(mut self, start_age: f64, life_expectancy: f64) -> Self {
        self.horizon.start_age = start_age;
        self.horizon.life_expectancy = life_expectancy;
        self
    }

    #[must_use]
    pub fn bankruptcy_threshold(mut self, threshold: f64) -> Self {
        self.horizon.bankruptcy_threshold = threshold;
        self
    }

    // ------------------------------------------------------------------
    // Scenarios
    // ------------------------------------------------------------------

    #[must_use]
    pub fn scenario(mut self, name: impl Into<String>, scenario: Scenario) -> Self {
        self.scenarios.insert(name.into(), scenario);
        self
    }

    #[must_use]
    pub fn scenario_rates(
        self,
        name: impl Into<String>,
        annual_return_rate: f64,
        inflation_rate: f64,
        income_growth_rate: f64,
        expense_growth_rate: f64,
    ) -> Self {
        self.scenario(
            name,
            Scenario {
                annual_return_rate,
                inflation_rate,
                income_growth_rate,
                expense_growth_rate,
            },
        )
    }

    /// Use the same assumptions for standard, optimistic and pessimistic
    #[must_use]
    pub fn uniform_scenarios(self, scenario: Scenario) -> Self {
        self.scenario(STANDARD, scenario)
            .scenario(OPTIMISTIC, scenario)
            .scenario(PESSIMISTIC, scenario)
    }

    // ------------------------------------------------------------------
    // Household
    // ------------------------------------------------------------------

    #[must_use]
    pub fn adult(mut self, name: impl Into<String>, year: i16, month: i8, day: i8) -> Self {
        self.household.adults.push(Adult {
            name: name.into(),
            birthdate: jiff::civil::date(year, month, day),
        });
        self
    }

    #[must_use]
    pub fn earner(
        mut self,
        name: impl Into<String>,
        monthly_income: f64,
        apply_growth: bool,
    ) -> Self {
        self.household.earners.push(Earner {
            name: name.into(),
            monthly_income,
            apply_growth,
        });
        self
    }

    /// Add a child with default school choices. `build()` orders children eldest first.
    #[must_use]
    pub fn child(self, name: impl Into<String>, year: i16, month: i8, day: i8) -> Self {
        self.child_with_schools(
            name,
            jiff::civil::date(year, month, day),
            SchoolChoices::default(),
        )
    }

    #[must_use]
    pub fn child_with_schools(
        mut self,
        name: impl Into<String>,
        birthdate: Date,
        schools: SchoolChoices,
    ) -> Self {
        self.household.children.push(Child {
            name: name.into(),
            birthdate,
            schools,
        });
        self
    }

    // ------------------------------------------------------------------
    // Expenses
    // ------------------------------------------------------------------

    #[must_use]
    pub fn manual_annual_expense(mut self, annual: f64) -> Self {
        self.expenses.manual_annual_expense = Some(annual);
        self
    }

    #[must_use]
    pub fn stage_expenses(mut self, table: StageTable<f64>) -> Self {
        self.expenses.base_by_stage = Some(table);
        self
    }

    #[must_use]
    pub fn additional_child_expenses(mut self, table: StageTable<f64>) -> Self {
        self.expenses.additional_child_by_stage = table;
        self
    }

    #[must_use]
    pub fn category_budgets(mut self, budgets: CategoryBudgets) -> Self {
        self.expenses.categories = Toggle::Enabled(budgets);
        self
    }

    #[must_use]
    pub fn dynamic_reduction(mut self, reduction: DynamicReduction) -> Self {
        self.expenses.dynamic_reduction = Toggle::Enabled(reduction);
        self
    }

    #[must_use]
    pub fn education(mut self, costs: EducationCosts) -> Self {
        self.education = Toggle::Enabled(costs);
        self
    }

    #[must_use]
    pub fn mortgage(mut self, monthly_payment: f64, end_date: Date) -> Self {
        self.mortgage = Toggle::Enabled(Mortgage {
            monthly_payment,
            end_date,
        });
        self
    }

    #[must_use]
    pub fn maintenance(mut self, items: Vec<MaintenanceItem>) -> Self {
        self.maintenance = Toggle::Enabled(Maintenance { items });
        self
    }

    #[must_use]
    pub fn workation(mut self, workation: Workation) -> Self {
        self.workation = Toggle::Enabled(workation);
        self
    }

    #[must_use]
    pub fn social_insurance(mut self, insurance: SocialInsurance) -> Self {
        self.social_insurance = Toggle::Enabled(insurance);
        self
    }

    // ------------------------------------------------------------------
    // Income
    // ------------------------------------------------------------------

    #[must_use]
    pub fn pension(mut self, pension: PensionSettings) -> Self {
        self.pension = Toggle::Enabled(pension);
        self
    }

    #[must_use]
    pub fn child_allowance(mut self, allowance: ChildAllowance) -> Self {
        self.child_allowance = Toggle::Enabled(allowance);
        self
    }

    /// Monthly side income after independence
    #[must_use]
    pub fn side_income(mut self, monthly: f64) -> Self {
        self.side_income_monthly = monthly;
        self
    }

    // ------------------------------------------------------------------
    // Policies
    // ------------------------------------------------------------------

    #[must_use]
    pub fn allocation(mut self, allocation: AssetAllocation) -> Self {
        self.allocation = Toggle::Enabled(allocation);
        self
    }

    #[must_use]
    pub fn monte_carlo(mut self, settings: MonteCarloSettings) -> Self {
        self.monte_carlo = settings;
        self
    }

    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.monte_carlo.iterations = iterations;
        self
    }

    #[must_use]
    pub fn return_model(mut self, model: ReturnModel, annual_std_dev: f64) -> Self {
        self.monte_carlo.model = model;
        self.monte_carlo.return_std_dev = annual_std_dev;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.monte_carlo.seed = seed;
        self
    }

    #[must_use]
    pub fn target(mut self, target: TargetSettings) -> Self {
        self.target = target;
        self
    }

    /// Assemble and validate the configuration
    pub fn build(mut self) -> Result<SimulationConfig, ConfigError> {
        let start_date = self.start_date.ok_or(ConfigError::MissingField {
            section: "simulation",
            field: "start_date",
        })?;

        let mut take = |name: &'static str| {
            self.scenarios
                .remove(name)
                .ok_or(ConfigError::MissingScenario(name))
        };
        let standard = take(STANDARD)?;
        let optimistic = take(OPTIMISTIC)?;
        let pessimistic = take(PESSIMISTIC)?;

        let mut scenarios = ScenarioTable::new(standard, optimistic, pessimistic);
        scenarios.extra = self.scenarios;

        self.household.children.sort_by_key(|c| c.birthdate);

        let config = SimulationConfig {
            start_date,
            horizon: self.horizon,
            scenarios,
            household: self.household,
            expenses: self.expenses,
            education: self.education,
            pension: self.pension,
            child_allowance: self.child_allowance,
            social_insurance: self.social_insurance,
            mortgage: self.mortgage,
            maintenance: self.maintenance,
            workation: self.workation,
            side_income_monthly: self.side_income_monthly,
            allocation: self.allocation,
            monte_carlo: self.monte_carlo,
            target: self.target,
        };
        config.validate()?;
        Ok(config)
    }
}
