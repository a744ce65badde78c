use crate::model::ReturnModel;

/// Capital gains tax on taxable stock sales
pub const DEFAULT_CAPITAL_GAINS_TAX_RATE: f64 = 0.20315;

/// Cash buffer, auto-investment and tax policy
#[derive(Debug, Clone, PartialEq)]
pub struct AssetAllocation {
    /// Months of expense to hold as cash
    pub cash_buffer_months: f64,
    /// Invest only when cash exceeds the required buffer times this
    pub auto_invest_threshold: f64,
    pub nisa: super::Toggle<NisaSettings>,
    /// Invest surplus into taxable holdings once the allowance is used
    pub invest_beyond_nisa: bool,
    pub min_cash_balance: f64,
    pub capital_gains_tax_rate: f64,
}

impl Default for AssetAllocation {
    fn default() -> Self {
        Self {
            cash_buffer_months: 6.0,
            auto_invest_threshold: 1.5,
            nisa: super::Toggle::Enabled(NisaSettings::default()),
            invest_beyond_nisa: true,
            min_cash_balance: 1_000_000.0,
            capital_gains_tax_rate: DEFAULT_CAPITAL_GAINS_TAX_RATE,
        }
    }
}

impl AssetAllocation {
    /// Annual tax-advantaged allowance, zero when the account is disabled
    #[must_use]
    pub fn nisa_annual_limit(&self) -> f64 {
        self.nisa.enabled().map_or(0.0, |n| n.annual_limit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NisaSettings {
    pub annual_limit: f64,
}

impl Default for NisaSettings {
    fn default() -> Self {
        Self {
            annual_limit: 3_600_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloSettings {
    pub iterations: usize,
    /// Annual standard deviation of returns
    pub return_std_dev: f64,
    pub model: ReturnModel,
    /// Trial `i` is seeded with `seed + i`
    pub seed: u64,
    /// Keep each trial's monthly trajectory for the percentile bands
    pub keep_trajectories: bool,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            iterations: 1000,
            return_std_dev: 0.15,
            model: ReturnModel::default(),
            seed: 0,
            keep_trajectories: true,
        }
    }
}

/// Target-capital search settings
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSettings {
    pub safety_buffer: f64,
    /// Stop once the bracket is narrower than this many yen
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Include pension, allowances and household expenses in the withdrawal simulation
    pub include_household_cashflows: bool,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            safety_buffer: 1.2,
            tolerance: 100_000.0,
            max_iterations: 100,
            include_household_cashflows: false,
        }
    }
}
