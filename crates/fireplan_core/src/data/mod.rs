//! Human-readable YAML configuration
//!
//! The structs here mirror the YAML document one-to-one. Every key is
//! optional at this layer; [`convert::to_simulation_config`] decides what is
//! required, applies documented defaults and produces the validated engine
//! configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::ConfigError;

pub mod convert;

pub use convert::to_simulation_config;

/// Root of the YAML document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigData {
    #[serde(default)]
    pub simulation: SimulationData,
    /// Scenario name to assumptions; must contain standard, optimistic and pessimistic
    #[serde(default)]
    pub scenarios: HashMap<String, ScenarioData>,
    #[serde(default)]
    pub household: HouseholdData,
    #[serde(default)]
    pub expenses: ExpensesData,
    #[serde(default)]
    pub education: EducationData,
    #[serde(default)]
    pub pension: PensionData,
    #[serde(default)]
    pub child_allowance: ChildAllowanceData,
    #[serde(default)]
    pub social_insurance: SocialInsuranceData,
    #[serde(default)]
    pub mortgage: MortgageData,
    #[serde(default)]
    pub house_maintenance: MaintenanceData,
    #[serde(default)]
    pub workation: WorkationData,
    #[serde(default)]
    pub asset_allocation: AllocationData,
    #[serde(default)]
    pub monte_carlo: MonteCarloData,
    #[serde(default)]
    pub fire: FireData,
}

impl ConfigData {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }
}

impl SimulationConfig {
    /// Parse and validate a YAML configuration document
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        to_simulation_config(&ConfigData::from_yaml(yaml)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationData {
    /// ISO date (YYYY-MM-DD) of month 0
    pub start_date: Option<String>,
    pub start_age: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub bankruptcy_threshold: Option<f64>,
    /// Monthly side income after independence
    pub post_fire_income: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioData {
    pub annual_return_rate: Option<f64>,
    pub inflation_rate: Option<f64>,
    pub income_growth_rate: Option<f64>,
    pub expense_growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseholdData {
    #[serde(default)]
    pub adults: Vec<AdultData>,
    #[serde(default)]
    pub earners: Vec<EarnerData>,
    #[serde(default)]
    pub children: Vec<ChildData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarnerData {
    pub name: String,
    pub monthly_income: f64,
    #[serde(default = "default_true")]
    pub apply_growth: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdultData {
    pub name: String,
    pub birthdate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildData {
    pub name: String,
    pub birthdate: String,
    pub nursery: Option<String>,
    pub kindergarten: Option<String>,
    pub elementary: Option<String>,
    pub junior_high: Option<String>,
    pub high: Option<String>,
    pub university: Option<String>,
}

/// Per-stage values keyed by stage name (young_child, elementary, ...)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageValuesData {
    pub young_child: Option<f64>,
    pub elementary: Option<f64>,
    pub junior_high: Option<f64>,
    pub high_school: Option<f64>,
    pub university: Option<f64>,
    pub empty_nest: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpensesData {
    pub manual_annual_expense: Option<f64>,
    pub base_expense_by_stage: Option<StageValuesData>,
    pub additional_child_expense_by_stage: Option<StageValuesData>,
    #[serde(default)]
    pub categories: CategoriesData,
    #[serde(default)]
    pub dynamic_reduction: DynamicReductionData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesData {
    #[serde(default)]
    pub enabled: bool,
    /// Stage name to its category budgets
    #[serde(default)]
    pub stages: HashMap<String, Vec<CategoryData>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryData {
    pub name: String,
    pub annual_amount: f64,
    #[serde(default)]
    pub discretionary: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelValuesData {
    pub level_1: Option<f64>,
    pub level_2: Option<f64>,
    pub level_3: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamicReductionData {
    #[serde(default)]
    pub enabled: bool,
    pub thresholds: Option<LevelValuesData>,
    pub reduction_rates: Option<LevelValuesData>,
    pub discretionary_ratio_by_stage: Option<StageValuesData>,
    pub income_boost: Option<LevelValuesData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationData {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub costs: EducationCostsData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationCostsData {
    #[serde(default)]
    pub nursery: HashMap<String, f64>,
    #[serde(default)]
    pub kindergarten: HashMap<String, f64>,
    #[serde(default)]
    pub elementary: HashMap<String, f64>,
    #[serde(default)]
    pub junior_high: HashMap<String, f64>,
    #[serde(default)]
    pub high: HashMap<String, f64>,
    #[serde(default)]
    pub university: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PensionData {
    #[serde(default)]
    pub enabled: bool,
    pub start_age: Option<f64>,
    #[serde(default)]
    pub plans: Vec<PensionPlanData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PensionPlanData {
    /// Name of a household adult
    pub member: String,
    /// `employee`, `national` or `fixed`
    #[serde(rename = "type")]
    pub kind: String,
    pub avg_monthly_salary: Option<f64>,
    pub work_start_age: Option<f64>,
    pub retirement_age: Option<f64>,
    pub contribution_years: Option<f64>,
    pub annual_amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildAllowanceData {
    #[serde(default)]
    pub enabled: bool,
    pub first_child_under_3: Option<f64>,
    pub later_child_under_3: Option<f64>,
    pub age_3_to_17: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialInsuranceData {
    #[serde(default)]
    pub enabled: bool,
    pub national_pension_monthly: Option<f64>,
    #[serde(default)]
    pub health_insurance: HealthInsuranceData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthInsuranceData {
    pub income_rate: Option<f64>,
    pub basic_deduction: Option<f64>,
    pub per_person: Option<f64>,
    pub per_household: Option<f64>,
    pub max_premium: Option<f64>,
    pub members: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MortgageData {
    #[serde(default)]
    pub enabled: bool,
    pub monthly_payment: Option<f64>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceData {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub items: Vec<MaintenanceItemData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceItemData {
    pub name: String,
    pub first_year: i16,
    pub frequency_years: u32,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkationData {
    #[serde(default)]
    pub enabled: bool,
    pub annual_cost: Option<f64>,
    pub start_child_index: Option<usize>,
    pub start_child_age: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationData {
    #[serde(default)]
    pub enabled: bool,
    pub cash_buffer_months: Option<f64>,
    pub auto_invest_threshold: Option<f64>,
    pub nisa_enabled: Option<bool>,
    pub nisa_annual_limit: Option<f64>,
    pub invest_beyond_nisa: Option<bool>,
    pub min_cash_balance: Option<f64>,
    pub capital_gains_tax_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonteCarloData {
    pub iterations: Option<usize>,
    pub return_std_dev: Option<f64>,
    pub mean_reversion_speed: Option<f64>,
    pub seed: Option<u64>,
    pub keep_trajectories: Option<bool>,
    #[serde(default)]
    pub enhanced_model: EnhancedModelData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhancedModelData {
    #[serde(default)]
    pub enabled: bool,
    pub garch_omega: Option<f64>,
    pub garch_alpha: Option<f64>,
    pub garch_beta: Option<f64>,
    pub volatility_floor: Option<f64>,
    pub volatility_ceiling: Option<f64>,
    pub mean_reversion_window: Option<usize>,
    pub mr_speed_crash: Option<f64>,
    pub mr_speed_normal: Option<f64>,
    pub mr_speed_bubble: Option<f64>,
    pub crash_threshold: Option<f64>,
    pub bubble_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireData {
    pub safety_buffer: Option<f64>,
    pub tolerance: Option<f64>,
    pub max_iterations: Option<usize>,
    pub include_household_cashflows: Option<bool>,
}
