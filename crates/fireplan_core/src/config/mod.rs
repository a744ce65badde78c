//! Simulation configuration
//!
//! `SimulationConfig` is an immutable, validated tree built once per run,
//! either from YAML through [`crate::data`] or programmatically with
//! [`SimulationBuilder`]. Optional subsystems are [`Toggle`] sections, so the
//! engine never looks up keys or falls back to defaults at call sites.
//!
//! # Builder DSL
//!
//! ```ignore
//! use fireplan_core::config::SimulationBuilder;
//!
//! let config = SimulationBuilder::new()
//!     .start(2025, 4, 1)
//!     .ages(35.0, 90.0)
//!     .scenario_rates("standard", 0.05, 0.01, 0.01, 0.01)
//!     .scenario_rates("optimistic", 0.07, 0.01, 0.01, 0.01)
//!     .scenario_rates("pessimistic", 0.03, 0.02, 0.0, 0.02)
//!     .child("first", 2022, 2, 26)
//!     .build()?;
//! ```

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::error::ConfigError;

pub mod builder;
mod expenses;
mod household;
mod policy;
mod validate;

pub use builder::SimulationBuilder;
pub use expenses::{
    CategoryBudget, CategoryBudgets, CategoryKind, DrawdownThresholds, DynamicReduction,
    ExpenseSettings,
};
pub use household::{
    Adult, Child, ChildAllowance, EMPLOYEE_PENSION_MULTIPLIER, Earner, EducationCosts,
    HealthInsurance,
    Household, MAX_CONTRIBUTION_YEARS, Maintenance, MaintenanceItem, Mortgage,
    NATIONAL_PENSION_FULL_AMOUNT, PensionKind, PensionPlan, PensionSettings, SchoolChoices,
    SocialInsurance, Workation,
};
pub use policy::{
    AssetAllocation, DEFAULT_CAPITAL_GAINS_TAX_RATE, MonteCarloSettings, NisaSettings,
    TargetSettings,
};

pub const STANDARD: &str = "standard";
pub const OPTIMISTIC: &str = "optimistic";
pub const PESSIMISTIC: &str = "pessimistic";

/// Remaining assets at or below this are treated as depleted
pub const DEFAULT_BANKRUPTCY_THRESHOLD: f64 = 5_000_000.0;
pub const DEFAULT_START_AGE: f64 = 35.0;
pub const DEFAULT_LIFE_EXPECTANCY: f64 = 90.0;

/// An optional subsystem: either switched off or carrying its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Toggle<T> {
    Disabled,
    Enabled(T),
}

impl<T> Default for Toggle<T> {
    fn default() -> Self {
        Toggle::Disabled
    }
}

impl<T> Toggle<T> {
    #[must_use]
    pub fn enabled(&self) -> Option<&T> {
        match self {
            Toggle::Enabled(params) => Some(params),
            Toggle::Disabled => None,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        matches!(self, Toggle::Enabled(_))
    }
}

impl<T> From<Option<T>> for Toggle<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Toggle::Disabled, Toggle::Enabled)
    }
}

/// Fixed annual market and growth assumptions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scenario {
    pub annual_return_rate: f64,
    pub inflation_rate: f64,
    pub income_growth_rate: f64,
    pub expense_growth_rate: f64,
}

impl Scenario {
    /// Monthly rate compounding to the annual return
    #[must_use]
    pub fn monthly_return(&self) -> f64 {
        (1.0 + self.annual_return_rate).powf(1.0 / 12.0) - 1.0
    }
}

/// Named scenarios. The three standard names always exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioTable {
    pub standard: Scenario,
    pub optimistic: Scenario,
    pub pessimistic: Scenario,
    pub extra: FxHashMap<String, Scenario>,
}

impl ScenarioTable {
    #[must_use]
    pub fn new(standard: Scenario, optimistic: Scenario, pessimistic: Scenario) -> Self {
        Self {
            standard,
            optimistic,
            pessimistic,
            extra: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Scenario, ConfigError> {
        match name {
            STANDARD => Ok(&self.standard),
            OPTIMISTIC => Ok(&self.optimistic),
            PESSIMISTIC => Ok(&self.pessimistic),
            other => self
                .extra
                .get(other)
                .ok_or_else(|| ConfigError::UnknownScenario(other.to_string())),
        }
    }

    /// The three required scenarios in a stable order
    #[must_use]
    pub fn named(&self) -> [(&'static str, &Scenario); 3] {
        [
            (STANDARD, &self.standard),
            (OPTIMISTIC, &self.optimistic),
            (PESSIMISTIC, &self.pessimistic),
        ]
    }
}

/// Horizon and depletion floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonSettings {
    pub start_age: f64,
    pub life_expectancy: f64,
    pub bankruptcy_threshold: f64,
}

impl Default for HorizonSettings {
    fn default() -> Self {
        Self {
            start_age: DEFAULT_START_AGE,
            life_expectancy: DEFAULT_LIFE_EXPECTANCY,
            bankruptcy_threshold: DEFAULT_BANKRUPTCY_THRESHOLD,
        }
    }
}

impl HorizonSettings {
    #[must_use]
    pub fn years(&self) -> f64 {
        (self.life_expectancy - self.start_age).max(0.0)
    }

    /// Index of the last simulated month
    #[must_use]
    pub fn total_months(&self) -> usize {
        (self.years() * 12.0) as usize
    }

    /// Whole months left when retiring at `month`
    #[must_use]
    pub fn remaining_months(&self, month: usize) -> usize {
        self.total_months().saturating_sub(month)
    }
}

/// Complete, validated simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Simulation epoch; month 0 falls on this date
    pub start_date: Date,
    pub horizon: HorizonSettings,
    pub scenarios: ScenarioTable,
    pub household: Household,
    pub expenses: ExpenseSettings,
    pub education: Toggle<EducationCosts>,
    pub pension: Toggle<PensionSettings>,
    pub child_allowance: Toggle<ChildAllowance>,
    pub social_insurance: Toggle<SocialInsurance>,
    pub mortgage: Toggle<Mortgage>,
    pub maintenance: Toggle<Maintenance>,
    pub workation: Toggle<Workation>,
    /// Monthly side income after independence, until the pension starts
    pub side_income_monthly: f64,
    pub allocation: Toggle<AssetAllocation>,
    pub monte_carlo: MonteCarloSettings,
    pub target: TargetSettings,
}

impl SimulationConfig {
    #[must_use]
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    /// Look up a scenario by name
    pub fn scenario(&self, name: &str) -> Result<&Scenario, ConfigError> {
        self.scenarios.get(name)
    }
}
