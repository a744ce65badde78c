//! Integration tests for the fireplan simulation engine
//!
//! Tests are organized by topic:
//! - `config_yaml` - YAML loading, defaults and configuration errors
//! - `expenses` - Life stages, education, housing and social insurance costs
//! - `income` - Labor, pension, child allowance and side income
//! - `drawdown` - Drawdown levels and dynamic expense reduction
//! - `feasibility` - The "can retire now" check
//! - `projection` - Deterministic monthly projection and ledger invariants
//! - `monte_carlo` - Trial determinism, summaries and percentile bands
//! - `returns` - Statistical properties of the return generators
//! - `target_capital` - Minimum capital search and recommended target

mod config_yaml;
mod feasibility;
mod income;
mod monte_carlo;

use crate::config::{Scenario, SimulationBuilder};

/// Builder for a childless household with the same assumptions in every
/// scenario and everything optional switched off
pub(crate) fn flat_builder(annual_return_rate: f64) -> SimulationBuilder {
    SimulationBuilder::new()
        .start(2025, 1, 1)
        .ages(35.0, 90.0)
        .uniform_scenarios(Scenario {
            annual_return_rate,
            ..Default::default()
        })
}

/// Route engine logs to the test output. Filter with `RUST_LOG`.
pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
