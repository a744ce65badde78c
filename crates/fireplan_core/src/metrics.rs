//! Simulation metrics collection for profiling
//!
//! The feasibility check replays the remaining lifetime every month until
//! it succeeds, so the replayed month count dominates the cost of a
//! projection.

/// Counters collected during one projection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationMetrics {
    /// Months stepped by the projection itself
    pub months_stepped: u64,
    /// Feasibility checks performed
    pub feasibility_checks: u64,
    /// Months stepped inside feasibility replays
    pub feasibility_months: u64,
}

impl SimulationMetrics {
    /// Create empty metrics
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_month(&mut self) {
        self.months_stepped += 1;
    }

    /// Record a feasibility check that replayed `months` months
    pub fn record_feasibility_check(&mut self, months: u64) {
        self.feasibility_checks += 1;
        self.feasibility_months += months;
    }

    /// Total months stepped, including feasibility replays
    #[must_use]
    pub fn total_months(&self) -> u64 {
        self.months_stepped + self.feasibility_months
    }

    /// Average replay length per feasibility check
    #[must_use]
    pub fn avg_replay_months(&self) -> f64 {
        if self.feasibility_checks == 0 {
            0.0
        } else {
            self.feasibility_months as f64 / self.feasibility_checks as f64
        }
    }
}
