//! Post-processing of simulation output.
//!
//! Percentiles and percentile bands for the Monte Carlo summary, plus
//! projection metrics (savings rate, maximum drawdown, yearly totals) for
//! reporting layers.

mod metrics;
mod statistics;

pub use metrics::{YearSummary, compute_max_drawdown, savings_rate, yearly_summary};
pub use statistics::{mean, percentile, percentile_bands, sorted};
