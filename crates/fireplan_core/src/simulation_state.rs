use jiff::civil::Date;

use crate::cashflow::{DrawdownTracker, WorkStatus};
use crate::config::SimulationConfig;
use crate::model::{HouseholdInputs, HouseholdLedger, MonthlyRecord};
use crate::stepper::Regime;

/// Runtime state of one deterministic projection
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub timeline: SimTimeline,
    pub ledger: HouseholdLedger,
    /// Peak and level of month-end total assets; reported, not applied
    pub drawdown: DrawdownTracker,
    pub history: SimHistory,
}

#[derive(Debug, Clone, Copy)]
pub struct SimTimeline {
    pub start_date: Date,
    /// Index of the last month to simulate
    pub total_months: usize,
    pub current_month: usize,
    /// First month the feasibility check succeeded
    pub fire_month: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct SimHistory {
    /// One record per simulated month, in order
    pub records: Vec<MonthlyRecord>,
}

impl SimulationState {
    pub fn from_inputs(config: &SimulationConfig, inputs: &HouseholdInputs) -> Self {
        let total_months = config.horizon.total_months();
        Self {
            timeline: SimTimeline {
                start_date: config.start_date,
                total_months,
                current_month: 0,
                fire_month: None,
            },
            ledger: inputs.opening_ledger(config.start_date.year()),
            drawdown: DrawdownTracker::new(config.expenses.drawdown_thresholds()),
            history: SimHistory {
                records: Vec::with_capacity(total_months + 1),
            },
        }
    }

    #[must_use]
    pub fn is_independent(&self) -> bool {
        self.timeline.fire_month.is_some()
    }

    /// Income/expense regime for the current month
    #[must_use]
    pub fn regime(&self) -> Regime {
        match self.timeline.fire_month {
            Some(month) => Regime::Retired {
                since_years: month as f64 / 12.0,
            },
            None => Regime::Accumulating,
        }
    }

    #[must_use]
    pub fn work_status(&self) -> WorkStatus {
        self.regime().work_status()
    }

    /// Mark the current month as the independence month. Only the first call
    /// has an effect.
    pub fn mark_independent(&mut self) {
        if self.timeline.fire_month.is_none() {
            self.timeline.fire_month = Some(self.timeline.current_month);
        }
    }
}
