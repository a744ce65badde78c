//! Target-capital result types

use serde::{Deserialize, Serialize};

/// Why a search stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Bracket narrowed below the tolerance
    Converged,
    MaxIterationsReached,
    /// Even the upper bound fails; the bound is reported as-is
    UpperBoundInfeasible,
}

/// Minimum sustainable capital under one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTarget {
    pub scenario: String,
    pub minimum_capital: f64,
    pub iterations: usize,
    pub termination_reason: TerminationReason,
}

impl ScenarioTarget {
    #[must_use]
    pub fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::Converged
    }
}

/// Recommended capital target and the household's progress toward it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCapitalResult {
    pub annual_expense: f64,
    /// Years from the start age to life expectancy
    pub retirement_years: f64,
    /// Worst scenario minimum times the safety buffer
    pub recommended_target: f64,
    pub safety_buffer: f64,
    /// Standard, optimistic and pessimistic, in that order
    pub scenarios: Vec<ScenarioTarget>,
    /// Annual expense / 4%, for comparison
    pub rule_of_4_target: f64,
    pub current_assets: f64,
    /// `current_assets / recommended_target`, zero without a positive target
    pub progress: f64,
    pub shortfall: f64,
}

impl TargetCapitalResult {
    #[must_use]
    pub fn scenario(&self, name: &str) -> Option<&ScenarioTarget> {
        self.scenarios.iter().find(|s| s.scenario == name)
    }

    /// Scenario with the largest minimum capital
    #[must_use]
    pub fn worst_scenario(&self) -> Option<&ScenarioTarget> {
        self.scenarios
            .iter()
            .max_by(|a, b| a.minimum_capital.total_cmp(&b.minimum_capital))
    }

    #[must_use]
    pub fn is_achieved(&self) -> bool {
        self.shortfall <= 0.0
    }
}
