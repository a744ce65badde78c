use rand::SeedableRng;
use rand::rngs::SmallRng;
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::analysis::{mean, percentile, percentile_bands, sorted};
use crate::cashflow::{DrawdownTracker, HouseholdModel};
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::feasibility::can_retire_now;
use crate::metrics::SimulationMetrics;
use crate::model::{
    AnnualReturnTarget, FireSnapshot, HouseholdInputs, MonteCarloSummary, MonthlyRecord,
    SimulationResult, TrialFailure, TrialResult,
};
use crate::returns::generate_returns;
use crate::simulation_state::SimulationState;
use crate::stepper::{MonthStepper, Regime, ReturnSource, RunEnd, run_months};

/// Deterministic monthly projection under a named scenario
pub fn simulate(
    config: &SimulationConfig,
    inputs: &HouseholdInputs,
    scenario: &str,
) -> Result<SimulationResult> {
    simulate_with_metrics(config, inputs, scenario).map(|(result, _)| result)
}

/// [`simulate`] plus the work counters of the run
pub fn simulate_with_metrics(
    config: &SimulationConfig,
    inputs: &HouseholdInputs,
    scenario: &str,
) -> Result<(SimulationResult, SimulationMetrics)> {
    let model = HouseholdModel::new(config, *config.scenario(scenario)?, inputs);
    let mut metrics = SimulationMetrics::new();
    let state = project(&model, inputs, &mut metrics);

    Ok((
        SimulationResult {
            scenario: scenario.to_string(),
            fire_month: state.timeline.fire_month,
            records: state.history.records,
        },
        metrics,
    ))
}

/// Projections for the standard, optimistic and pessimistic scenarios
pub fn simulate_all_scenarios(
    config: &SimulationConfig,
    inputs: &HouseholdInputs,
) -> Result<Vec<SimulationResult>> {
    config
        .scenarios
        .named()
        .into_iter()
        .map(|(name, _)| simulate(config, inputs, name))
        .collect()
}

fn project(
    model: &HouseholdModel<'_>,
    inputs: &HouseholdInputs,
    metrics: &mut SimulationMetrics,
) -> SimulationState {
    let config = model.config();
    let mut state = SimulationState::from_inputs(config, inputs);
    let rate = model.scenario().monthly_return();
    let floor = config.horizon.bankruptcy_threshold;

    tracing::info!(
        months = state.timeline.total_months + 1,
        monthly_return = rate,
        "starting projection"
    );

    for month in 0..=state.timeline.total_months {
        state.timeline.current_month = month;
        let stepper = MonthStepper::new(model, state.regime());
        let outcome = stepper.step(&mut state.ledger, month, rate, 0);
        metrics.record_month();

        if !state.is_independent() && month > 0 {
            let replayed = config.horizon.remaining_months(month);
            metrics.record_feasibility_check(replayed as u64);
            if can_retire_now(model, &state.ledger, month) {
                state.mark_independent();
                tracing::info!(
                    fire_month = month,
                    date = %outcome.ctx.date,
                    total_assets = state.ledger.total_assets(),
                    "financial independence reached"
                );
            }
        }

        let total = state.ledger.total_assets();
        let level = state.drawdown.observe(total);
        state.history.records.push(MonthlyRecord {
            date: outcome.ctx.date,
            month,
            ledger: state.ledger,
            income: outcome.income,
            expense: outcome.expense,
            net_cash_flow: outcome.net_cash_flow(),
            investment_return: outcome.investment_return,
            auto_invested: outcome.auto_invested,
            nisa_contribution: outcome.nisa_contribution,
            capital_gains_tax: outcome.capital_gains_tax,
            shortfall: outcome.shortfall,
            drawdown_level: level,
            fire_achieved: state.is_independent(),
            fire_month: state.timeline.fire_month,
        });

        if state.is_independent() && total <= floor {
            tracing::info!(month, total_assets = total, "assets depleted");
            break;
        }
    }

    tracing::info!(
        fire_month = ?state.timeline.fire_month,
        final_assets = state.ledger.total_assets(),
        "projection complete"
    );
    state
}

/// Everything a trial needs besides its index
struct TrialPlan<'a, 'c> {
    model: &'a HouseholdModel<'c>,
    snapshot: FireSnapshot,
    months: usize,
    target: AnnualReturnTarget,
}

fn run_trial(plan: &TrialPlan<'_, '_>, trial: usize) -> Result<TrialResult> {
    let config = plan.model.config();
    let settings = &config.monte_carlo;
    let mut rng = SmallRng::seed_from_u64(settings.seed.wrapping_add(trial as u64));
    let path = generate_returns(&settings.model, plan.target, plan.months, &mut rng)?;

    let fire_month = plan.snapshot.month;
    let stepper = MonthStepper::new(
        plan.model,
        Regime::Retired {
            since_years: fire_month as f64 / 12.0,
        },
    );
    let mut ledger = plan.snapshot.ledger;
    let mut tracker = DrawdownTracker::new(config.expenses.drawdown_thresholds());
    let mut trajectory = settings
        .keep_trajectories
        .then(|| Vec::with_capacity(plan.months));

    let end = run_months(
        &stepper,
        &mut ledger,
        fire_month + 1,
        plan.months,
        ReturnSource::Path(&path),
        config.horizon.bankruptcy_threshold,
        |total| tracker.observe(total),
        |ledger, _| {
            if let Some(t) = trajectory.as_mut() {
                t.push(ledger.total_assets());
            }
        },
    );

    let depleted_at = match end {
        RunEnd::Depleted { month } => {
            let offset = month - fire_month;
            if let Some(t) = trajectory.as_mut() {
                t.truncate(offset - 1);
                t.resize(plan.months, 0.0);
            }
            Some(offset)
        }
        RunEnd::Completed { .. } => None,
    };
    let final_assets = end.final_assets();

    Ok(TrialResult {
        trial,
        final_assets,
        success: final_assets > 0.0,
        depleted_at,
        trajectory,
    })
}

/// Monte Carlo forecast of the post-independence period.
///
/// Runs the deterministic projection to find the independence month, then
/// replays the remaining months once per trial with random returns. Trial
/// `i` is seeded with `seed + i`, so results do not depend on scheduling.
/// A trial that fails is logged and listed in `failed_trials` without
/// affecting the others.
pub fn monte_carlo_simulate(
    config: &SimulationConfig,
    inputs: &HouseholdInputs,
    scenario: &str,
) -> Result<MonteCarloSummary> {
    const MAX_BATCH_SIZE: usize = 100;

    let scenario_params = *config.scenario(scenario)?;
    let model = HouseholdModel::new(config, scenario_params, inputs);
    let settings = &config.monte_carlo;
    let iterations = settings.iterations;

    let state = project(&model, inputs, &mut SimulationMetrics::new());
    let Some(fire_month) = state.timeline.fire_month else {
        tracing::info!(scenario, "independence not reached; skipping trials");
        return Ok(MonteCarloSummary::not_achieved(iterations));
    };
    let Some(fire_record) = state.history.records.get(fire_month) else {
        return Ok(MonteCarloSummary::not_achieved(iterations));
    };

    let plan = TrialPlan {
        model: &model,
        snapshot: FireSnapshot {
            month: fire_month,
            date: fire_record.date,
            ledger: fire_record.ledger,
        },
        months: state.timeline.total_months.saturating_sub(fire_month),
        target: AnnualReturnTarget {
            mean: scenario_params.annual_return_rate,
            std_dev: settings.return_std_dev,
        },
    };

    tracing::info!(
        scenario,
        iterations,
        seed = settings.seed,
        fire_month,
        months = plan.months,
        "starting monte carlo"
    );

    let num_batches = iterations.div_ceil(MAX_BATCH_SIZE);
    let run_batch = |batch: usize| -> Vec<std::result::Result<TrialResult, TrialFailure>> {
        let start = batch * MAX_BATCH_SIZE;
        let end = (start + MAX_BATCH_SIZE).min(iterations);
        (start..end)
            .map(|trial| {
                run_trial(&plan, trial).map_err(|e: SimulationError| TrialFailure {
                    trial,
                    reason: e.to_string(),
                })
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<_> = (0..num_batches).into_par_iter().flat_map(run_batch).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<_> = (0..num_batches).flat_map(run_batch).collect();

    let mut trials = Vec::with_capacity(outcomes.len());
    let mut failed_trials = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(trial) => trials.push(trial),
            Err(failure) => {
                tracing::warn!(trial = failure.trial, reason = %failure.reason, "trial failed");
                failed_trials.push(failure);
            }
        }
    }

    let summary = summarize(iterations, fire_month, trials, failed_trials);
    tracing::info!(
        scenario,
        success_rate = summary.success_rate,
        median_final_assets = summary.median_final_assets,
        failed = summary.failed_trials.len(),
        "monte carlo complete"
    );
    Ok(summary)
}

fn summarize(
    iterations: usize,
    fire_month: usize,
    trials: Vec<TrialResult>,
    failed_trials: Vec<TrialFailure>,
) -> MonteCarloSummary {
    let final_assets: Vec<f64> = trials.iter().map(|t| t.final_assets).collect();
    let ordered = sorted(&final_assets);
    let successes = trials.iter().filter(|t| t.success).count();
    let success_rate = if trials.is_empty() {
        0.0
    } else {
        successes as f64 / trials.len() as f64
    };

    let trajectories: Vec<Vec<f64>> = trials.into_iter().filter_map(|t| t.trajectory).collect();

    MonteCarloSummary {
        iterations,
        fire_month: Some(fire_month),
        success_rate,
        mean_final_assets: mean(&final_assets),
        median_final_assets: percentile(&ordered, 0.5),
        percentile_10: percentile(&ordered, 0.1),
        percentile_90: percentile(&ordered, 0.9),
        final_assets,
        bands: percentile_bands(&trajectories, fire_month + 1),
        failed_trials,
    }
}
