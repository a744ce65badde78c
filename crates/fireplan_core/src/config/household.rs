//! Household roster and the optional cash-flow subsystems tied to it

use jiff::civil::Date;
use rustc_hash::FxHashMap;

/// Flat-rate national pension for a full 40-year record (annual)
pub const NATIONAL_PENSION_FULL_AMOUNT: f64 = 816_000.0;
/// Employee pension accrual per salary-month
pub const EMPLOYEE_PENSION_MULTIPLIER: f64 = 0.005481;
pub const MAX_CONTRIBUTION_YEARS: f64 = 40.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Household {
    pub adults: Vec<Adult>,
    /// Labor income per earner. Empty means the single monthly income input.
    pub earners: Vec<Earner>,
    /// In birth order; the first entry is the eldest
    pub children: Vec<Child>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Adult {
    pub name: String,
    pub birthdate: Date,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Earner {
    pub name: String,
    pub monthly_income: f64,
    /// Whether the scenario's income growth applies (false for flat self-employed income)
    pub apply_growth: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub name: String,
    pub birthdate: Date,
    pub schools: SchoolChoices,
}

/// School type per education stage. `"none"` at nursery age costs nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SchoolChoices {
    pub nursery: String,
    pub kindergarten: String,
    pub elementary: String,
    pub junior_high: String,
    pub high: String,
    pub university: String,
}

impl Default for SchoolChoices {
    fn default() -> Self {
        Self {
            nursery: "none".to_string(),
            kindergarten: "public".to_string(),
            elementary: "public".to_string(),
            junior_high: "public".to_string(),
            high: "public".to_string(),
            university: "national".to_string(),
        }
    }
}

/// Annual education cost per school type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EducationCosts {
    pub nursery: FxHashMap<String, f64>,
    pub kindergarten: FxHashMap<String, f64>,
    pub elementary: FxHashMap<String, f64>,
    pub junior_high: FxHashMap<String, f64>,
    pub high: FxHashMap<String, f64>,
    pub university: FxHashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PensionSettings {
    /// Minimum receipt age
    pub start_age: f64,
    pub plans: Vec<PensionPlan>,
}

impl Default for PensionSettings {
    fn default() -> Self {
        Self {
            start_age: 65.0,
            plans: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PensionPlan {
    pub member: String,
    pub birthdate: Date,
    pub kind: PensionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PensionKind {
    /// Employer pension plus the national component
    Employee {
        avg_monthly_salary: f64,
        work_start_age: f64,
        /// Accrual stops at this age when still working
        retirement_age: f64,
        national_contribution_years: f64,
    },
    National { contribution_years: f64 },
    /// A fixed annual amount
    Fixed { annual_amount: f64 },
}

/// Monthly child allowance per child
#[derive(Debug, Clone, PartialEq)]
pub struct ChildAllowance {
    pub first_child_under_3: f64,
    pub later_child_under_3: f64,
    pub age_3_to_17: f64,
}

impl Default for ChildAllowance {
    fn default() -> Self {
        Self {
            first_child_under_3: 15_000.0,
            later_child_under_3: 20_000.0,
            age_3_to_17: 10_000.0,
        }
    }
}

/// Premiums paid only after independence
#[derive(Debug, Clone, PartialEq)]
pub struct SocialInsurance {
    /// Monthly national pension premium per adult aged 20 to 59
    pub national_pension_monthly: f64,
    pub health: HealthInsurance,
}

impl Default for SocialInsurance {
    fn default() -> Self {
        Self {
            national_pension_monthly: 16_980.0,
            health: HealthInsurance::default(),
        }
    }
}

/// Income-based national health insurance
#[derive(Debug, Clone, PartialEq)]
pub struct HealthInsurance {
    pub income_rate: f64,
    pub basic_deduction: f64,
    pub per_person: f64,
    pub per_household: f64,
    pub max_premium: f64,
    pub members: u32,
}

impl Default for HealthInsurance {
    fn default() -> Self {
        Self {
            income_rate: 0.11,
            basic_deduction: 430_000.0,
            per_person: 50_000.0,
            per_household: 30_000.0,
            max_premium: 1_060_000.0,
            members: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mortgage {
    pub monthly_payment: f64,
    /// Last month with a payment
    pub end_date: Date,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Maintenance {
    pub items: Vec<MaintenanceItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceItem {
    pub name: String,
    pub first_year: i16,
    pub frequency_years: u32,
    pub cost: f64,
}

/// Travel-style discretionary spending that starts once a child is grown
#[derive(Debug, Clone, PartialEq)]
pub struct Workation {
    pub annual_cost: f64,
    pub child_index: usize,
    pub start_age: f64,
}
