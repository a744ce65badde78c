//! Monthly return generation for Monte Carlo trials
//!
//! Both models work on the monthly log gross return `x`, with the simple
//! return `exp(x) - 1` always above -100%. The lognormal parameters come from
//! [`AnnualReturnTarget::log_params`] so the arithmetic annual mean and
//! standard deviation match the configured targets.
//!
//! - [`ReturnModel::Simple`] draws `x` independently, with optional AR(1)
//!   reversion toward the mean.
//! - [`ReturnModel::Enhanced`] scales each shock by a GARCH(1,1) conditional
//!   volatility and pulls the drift toward the long-run mean at a speed that
//!   depends on the trailing cumulative return (slow after crashes, fast
//!   after bubbles).

use std::collections::VecDeque;

use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::error::MarketError;
use crate::model::{AnnualReturnTarget, GarchParams, ReturnModel};

/// Generate `months` monthly simple returns
pub fn generate_returns<R: Rng + ?Sized>(
    model: &ReturnModel,
    target: AnnualReturnTarget,
    months: usize,
    rng: &mut R,
) -> Result<Vec<f64>, MarketError> {
    let (mu, sigma) = target.log_params();
    let draw = Normal::new(mu, sigma).map_err(|_| MarketError::InvalidDistributionParameters {
        model: "lognormal return",
        mean: target.mean,
        std_dev: target.std_dev,
        reason: "std_dev must be non-negative and finite",
    })?;

    let log_returns = match model {
        ReturnModel::Simple {
            mean_reversion_speed,
        } => simple_path(draw, mu, *mean_reversion_speed, months, rng),
        ReturnModel::Enhanced(params) => enhanced_path(params, mu, sigma, months, rng)?,
    };

    log_returns
        .into_iter()
        .enumerate()
        .map(|(month, x)| {
            let r = x.exp_m1();
            if r.is_finite() {
                Ok(r)
            } else {
                Err(MarketError::NonFiniteReturn { month })
            }
        })
        .collect()
}

fn simple_path<R: Rng + ?Sized>(
    draw: Normal<f64>,
    mu: f64,
    speed: f64,
    months: usize,
    rng: &mut R,
) -> Vec<f64> {
    let mut prev = mu;
    (0..months)
        .map(|_| {
            let x = draw.sample(rng) - speed * (prev - mu);
            prev = x;
            x
        })
        .collect()
}

/// Reversion speed for a trailing cumulative return
fn reversion_speed(params: &GarchParams, trailing_return: f64) -> f64 {
    if trailing_return < params.crash_threshold {
        params.mr_speed_crash
    } else if trailing_return > params.bubble_threshold {
        params.mr_speed_bubble
    } else {
        params.mr_speed_normal
    }
}

fn enhanced_path<R: Rng + ?Sized>(
    params: &GarchParams,
    mu: f64,
    sigma: f64,
    months: usize,
    rng: &mut R,
) -> Result<Vec<f64>, MarketError> {
    // clamp() panics on an inverted or NaN range
    if !(params.volatility_floor <= params.volatility_ceiling) {
        return Err(MarketError::InvalidDistributionParameters {
            model: "GARCH volatility",
            mean: params.volatility_floor,
            std_dev: params.volatility_ceiling,
            reason: "volatility floor must not exceed the ceiling",
        });
    }

    let target_var = sigma * sigma;
    let omega = params
        .omega
        .unwrap_or(target_var * (1.0 - params.alpha - params.beta));

    let mut variance = target_var;
    let mut prev_shock = 0.0;
    let mut window: VecDeque<f64> = VecDeque::with_capacity(params.mean_reversion_window);
    let mut path = Vec::with_capacity(months);

    for t in 0..months {
        if t > 0 {
            variance = omega + params.alpha * prev_shock * prev_shock + params.beta * variance;
        }
        let vol = variance
            .max(0.0)
            .sqrt()
            .clamp(params.volatility_floor, params.volatility_ceiling);
        variance = vol * vol;

        let drift = if window.is_empty() {
            mu
        } else {
            let sum: f64 = window.iter().sum();
            let avg = sum / window.len() as f64;
            let speed = reversion_speed(params, sum.exp_m1());
            mu - speed * (avg - mu)
        };

        let z: f64 = rng.sample(StandardNormal);
        let shock = vol * z;
        let x = drift + shock;
        prev_shock = shock;

        if params.mean_reversion_window > 0 {
            if window.len() == params.mean_reversion_window {
                window.pop_front();
            }
            window.push_back(x);
        }
        path.push(x);
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn target() -> AnnualReturnTarget {
        AnnualReturnTarget {
            mean: 0.05,
            std_dev: 0.15,
        }
    }

    #[test]
    fn test_same_seed_same_path() {
        let model = ReturnModel::Enhanced(GarchParams::default());
        let a = generate_returns(&model, target(), 240, &mut SmallRng::seed_from_u64(7)).unwrap();
        let b = generate_returns(&model, target(), 240, &mut SmallRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 240);
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let flat = AnnualReturnTarget {
            mean: 0.05,
            std_dev: 0.0,
        };
        let returns = generate_returns(
            &ReturnModel::default(),
            flat,
            24,
            &mut SmallRng::seed_from_u64(1),
        )
        .unwrap();
        let expected = flat.monthly_mean();
        assert!(returns.iter().all(|r| (r - expected).abs() < 1e-12));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let bad = AnnualReturnTarget {
            mean: 0.05,
            std_dev: f64::NAN,
        };
        let err = generate_returns(
            &ReturnModel::default(),
            bad,
            12,
            &mut SmallRng::seed_from_u64(1),
        );
        assert!(matches!(
            err,
            Err(MarketError::InvalidDistributionParameters { .. })
        ));

        let inverted = ReturnModel::Enhanced(GarchParams {
            volatility_floor: 0.05,
            volatility_ceiling: 0.01,
            ..Default::default()
        });
        assert!(generate_returns(&inverted, target(), 12, &mut SmallRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_reversion_speed_is_asymmetric() {
        let params = GarchParams::default();
        assert_eq!(reversion_speed(&params, -0.30), params.mr_speed_crash);
        assert_eq!(reversion_speed(&params, 0.30), params.mr_speed_bubble);
        assert_eq!(reversion_speed(&params, 0.02), params.mr_speed_normal);
    }
}
