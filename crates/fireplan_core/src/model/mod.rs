mod ledger;
mod life_stage;
mod market;
mod records;
mod results;

pub use ledger::{HouseholdInputs, HouseholdLedger};
pub use life_stage::{LifeStage, StageTable};
pub use market::{AnnualReturnTarget, GarchParams, ReturnModel};
pub use records::{ExpenseBreakdown, IncomeBreakdown, MonthlyRecord};
pub use results::{
    FireSnapshot, MonteCarloSummary, PercentileBands, SimulationResult, TrialFailure, TrialResult,
};
