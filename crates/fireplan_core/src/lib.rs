//! Financial independence simulation engine
//!
//! Projects a Japanese household's assets month by month until life
//! expectancy and finds the first month the household could stop earning
//! labor income for good. It supports:
//! - Life-stage living expenses, education, mortgage, maintenance and
//!   social insurance costs
//! - Employee and national pension income, child allowance and side income
//! - Cash, taxable stocks and a NISA-style tax-advantaged balance with
//!   tax-aware liquidation and surplus auto-investment
//! - Drawdown-triggered cuts to discretionary spending
//! - Monte Carlo trials with lognormal or GARCH-style returns
//! - A bisection solver for the capital needed to retire
//!
//! # Example
//!
//! ```ignore
//! use fireplan_core::config::SimulationConfig;
//! use fireplan_core::model::HouseholdInputs;
//! use fireplan_core::simulation::{monte_carlo_simulate, simulate};
//!
//! let config = SimulationConfig::from_yaml(&std::fs::read_to_string("config.yaml")?)?;
//! let inputs = HouseholdInputs {
//!     cash: 5_000_000.0,
//!     stocks: 30_000_000.0,
//!     monthly_income: 600_000.0,
//!     monthly_expense: 350_000.0,
//!     ..Default::default()
//! };
//!
//! let projection = simulate(&config, &inputs, "standard")?;
//! println!("independence at {:?}", projection.fire_date());
//!
//! let forecast = monte_carlo_simulate(&config, &inputs, "standard")?;
//! println!("success rate {:.1}%", forecast.success_rate * 100.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod cashflow;
pub mod date_math;
pub mod error;
pub mod feasibility;
pub mod liquidation;
pub mod metrics;
pub mod optimization;
pub mod returns;
pub mod simulation;
pub mod simulation_state;
pub mod stepper;
pub mod taxes;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod data;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{SimulationBuilder, SimulationConfig};
pub use error::{ConfigError, MarketError, Result, SimulationError};
pub use model::{HouseholdInputs, MonteCarloSummary, SimulationResult};
pub use optimization::{TargetCapitalResult, calculate_target_capital};
pub use simulation::{monte_carlo_simulate, simulate};
