//! Bisection for the smallest value satisfying a monotonic predicate
//!
//! Used to find the minimum starting capital that survives a withdrawal
//! simulation: more capital never makes survival less likely.

use super::result::TerminationReason;

/// Outcome of [`bisect_minimum`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BisectionOutcome {
    /// Smallest value known to satisfy the predicate (the upper bracket)
    pub value: f64,
    pub iterations: usize,
    pub termination_reason: TerminationReason,
}

impl BisectionOutcome {
    #[must_use]
    pub fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::Converged
    }
}

/// Narrow `[low, high]` until it is at most `tolerance` wide or
/// `max_iterations` is reached. The upper bound is returned in every case;
/// when `high` itself fails the predicate it is returned unchanged.
pub fn bisect_minimum(
    low: f64,
    high: f64,
    tolerance: f64,
    max_iterations: usize,
    mut satisfies: impl FnMut(f64) -> bool,
) -> BisectionOutcome {
    if !satisfies(high) {
        return BisectionOutcome {
            value: high,
            iterations: 0,
            termination_reason: TerminationReason::UpperBoundInfeasible,
        };
    }

    let mut low = low;
    let mut high = high;
    let mut iterations = 0;

    while high - low > tolerance && iterations < max_iterations {
        iterations += 1;
        let mid = f64::midpoint(low, high);
        let ok = satisfies(mid);
        tracing::debug!(iteration = iterations, mid, ok, "bisection step");
        if ok {
            high = mid;
        } else {
            low = mid;
        }
    }

    let termination_reason = if high - low <= tolerance {
        TerminationReason::Converged
    } else {
        TerminationReason::MaxIterationsReached
    };

    BisectionOutcome {
        value: high,
        iterations,
        termination_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_threshold_within_tolerance() {
        let outcome = bisect_minimum(0.0, 1000.0, 0.5, 100, |x| x >= 637.25);
        assert!(outcome.converged());
        assert!(outcome.value >= 637.25 && outcome.value - 637.25 <= 0.5);
    }

    #[test]
    fn test_iteration_cap_returns_upper_bound() {
        let outcome = bisect_minimum(0.0, 1000.0, 1e-9, 3, |x| x >= 100.0);
        assert_eq!(outcome.iterations, 3);
        assert_eq!(outcome.termination_reason, TerminationReason::MaxIterationsReached);
        // 1000 -> 500 -> 250 -> 125
        assert_eq!(outcome.value, 125.0);
    }

    #[test]
    fn test_infeasible_upper_bound() {
        let outcome = bisect_minimum(0.0, 1000.0, 1.0, 100, |_| false);
        assert_eq!(outcome.value, 1000.0);
        assert!(!outcome.converged());
    }
}
