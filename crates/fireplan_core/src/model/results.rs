//! Simulation results
//!
//! Output types of the deterministic projection and the Monte Carlo engine.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::ledger::HouseholdLedger;
use super::records::MonthlyRecord;

/// Output of one deterministic projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario: String,
    pub records: Vec<MonthlyRecord>,
    /// First month the feasibility check succeeded, if any
    pub fire_month: Option<usize>,
}

impl SimulationResult {
    #[must_use]
    pub fn fire_date(&self) -> Option<Date> {
        let month = self.fire_month?;
        self.records.get(month).map(|r| r.date)
    }

    #[must_use]
    pub fn fire_record(&self) -> Option<&MonthlyRecord> {
        self.records.get(self.fire_month?)
    }

    #[must_use]
    pub fn final_assets(&self) -> f64 {
        self.records.last().map_or(0.0, MonthlyRecord::total_assets)
    }

    /// Whether the trajectory was cut short by the bankruptcy floor
    #[must_use]
    pub fn ended_early(&self, horizon_months: usize) -> bool {
        self.records.len() < horizon_months + 1
    }
}

/// Ledger and timing at the independence month, the starting point of every trial
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireSnapshot {
    pub month: usize,
    pub date: Date,
    pub ledger: HouseholdLedger,
}

/// One Monte Carlo trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    pub trial: usize,
    /// Zero when the trial breached the bankruptcy floor
    pub final_assets: f64,
    pub success: bool,
    /// Month (relative to independence) at which the floor was breached
    pub depleted_at: Option<usize>,
    /// Total assets per post-independence month, zero-filled after depletion
    pub trajectory: Option<Vec<f64>>,
}

/// A trial whose computation failed; excluded from the statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialFailure {
    pub trial: usize,
    pub reason: String,
}

/// Per-month percentile bands across trials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentileBands {
    /// Absolute month index of the first band entry
    pub start_month: usize,
    pub p025: Vec<f64>,
    pub p16: Vec<f64>,
    pub p50: Vec<f64>,
    pub p84: Vec<f64>,
    pub p975: Vec<f64>,
}

impl PercentileBands {
    #[must_use]
    pub fn len(&self) -> usize {
        self.p50.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.p50.is_empty()
    }
}

/// Aggregated Monte Carlo outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub iterations: usize,
    pub fire_month: Option<usize>,
    pub success_rate: f64,
    pub mean_final_assets: f64,
    pub median_final_assets: f64,
    pub percentile_10: f64,
    pub percentile_90: f64,
    /// Terminal wealth of each completed trial, in trial order
    pub final_assets: Vec<f64>,
    pub bands: PercentileBands,
    pub failed_trials: Vec<TrialFailure>,
}

impl MonteCarloSummary {
    /// Summary for a household that never reaches independence
    #[must_use]
    pub fn not_achieved(iterations: usize) -> Self {
        Self {
            iterations,
            fire_month: None,
            success_rate: 0.0,
            mean_final_assets: 0.0,
            median_final_assets: 0.0,
            percentile_10: 0.0,
            percentile_90: 0.0,
            final_assets: Vec::new(),
            bands: PercentileBands::default(),
            failed_trials: Vec::new(),
        }
    }

    #[must_use]
    pub fn completed_trials(&self) -> usize {
        self.final_assets.len()
    }
}
