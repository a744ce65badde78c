//! Return model parameters
//!
//! Parameters only; sampling lives in [`crate::returns`].

use serde::{Deserialize, Serialize};

/// Conditional-volatility model with asymmetric mean reversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GarchParams {
    /// Constant term of the variance recursion. `None` derives it from the
    /// target variance so the long-run variance matches the scenario.
    pub omega: Option<f64>,
    pub alpha: f64,
    pub beta: f64,
    /// Monthly volatility floor
    pub volatility_floor: f64,
    /// Monthly volatility ceiling
    pub volatility_ceiling: f64,
    /// Months in the trailing trend window
    pub mean_reversion_window: usize,
    /// Reversion speed when the trailing return is below `crash_threshold`
    pub mr_speed_crash: f64,
    pub mr_speed_normal: f64,
    /// Reversion speed when the trailing return is above `bubble_threshold`
    pub mr_speed_bubble: f64,
    pub crash_threshold: f64,
    pub bubble_threshold: f64,
}

impl Default for GarchParams {
    fn default() -> Self {
        Self {
            omega: None,
            alpha: 0.15,
            beta: 0.80,
            volatility_floor: 0.008,
            volatility_ceiling: 0.035,
            mean_reversion_window: 12,
            mr_speed_crash: 0.15,
            mr_speed_normal: 0.30,
            mr_speed_bubble: 0.10,
            crash_threshold: -0.15,
            bubble_threshold: 0.15,
        }
    }
}

/// How monthly returns are drawn for Monte Carlo trials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReturnModel {
    /// Independent lognormal draws, optionally with AR(1) reversion in log space
    Simple { mean_reversion_speed: f64 },
    Enhanced(GarchParams),
}

impl Default for ReturnModel {
    fn default() -> Self {
        ReturnModel::Simple {
            mean_reversion_speed: 0.0,
        }
    }
}

/// Annual arithmetic targets the generated monthly returns must reproduce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualReturnTarget {
    pub mean: f64,
    pub std_dev: f64,
}

impl AnnualReturnTarget {
    /// Monthly arithmetic mean compounding to the annual mean
    #[must_use]
    pub fn monthly_mean(&self) -> f64 {
        (1.0 + self.mean).powf(1.0 / 12.0) - 1.0
    }

    #[must_use]
    pub fn monthly_std_dev(&self) -> f64 {
        self.std_dev / 12f64.sqrt()
    }

    /// Normal parameters `(mu, sigma)` of the monthly log gross return whose
    /// lognormal moments match the monthly mean and standard deviation.
    #[must_use]
    pub fn log_params(&self) -> (f64, f64) {
        let gross = 1.0 + self.monthly_mean();
        let s = self.monthly_std_dev();
        let var = (1.0 + (s * s) / (gross * gross)).ln();
        (gross.ln() - var / 2.0, var.sqrt())
    }
}
