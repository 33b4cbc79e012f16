//! Model-based reward reconstruction
//!
//! The scheduler optimizes a weighted cost `α·power + β·delay − δ·pdr`
//! and reports its negation as the observed reward, so more negative
//! means worse and values closer to zero mean better. The estimator here
//! recombines modeled metric values under the same contract, which makes
//! estimated and observed rewards directly comparable on one axis.

use sdwsn_stats::cubic::Cubic;
use serde::{Deserialize, Serialize};

/// Run-level weighting coefficients, read from the observation table.
///
/// Mixing weights from different runs in one estimate is a caller error;
/// the estimator does not detect it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RewardWeights {
    pub alpha: f64,
    pub beta: f64,
    pub delta: f64,
}

/// Estimates the reward at `x` from per-metric models.
///
/// Computes `-(α·power(x) + β·delay(x) − δ·pdr(x))`. Pure function; the
/// models are whatever the caller chose (fixed baseline or refitted).
///
/// # Examples
///
/// ```
/// use sdwsn_analysis::{models, reward::{RewardWeights, estimate_reward}};
///
/// let weights = RewardWeights { alpha: 0.8, beta: 0.1, delta: 0.1 };
/// let estimate = estimate_reward(
///     20.0,
///     weights,
///     &models::POWER_MODEL,
///     &models::DELAY_MODEL,
///     &models::PDR_MODEL,
/// );
/// assert!(estimate < 0.0);
/// ```
#[must_use]
pub fn estimate_reward(
    x: f64,
    weights: RewardWeights,
    power: &Cubic,
    delay: &Cubic,
    pdr: &Cubic,
) -> f64 {
    -(weights.alpha * power.eval(x) + weights.beta * delay.eval(x)
        - weights.delta * pdr.eval(x))
}

/// Vectorized [`estimate_reward`] over an ordered sequence of x values,
/// preserving input order.
#[must_use]
pub fn estimate_reward_many(
    xs: &[f64],
    weights: RewardWeights,
    power: &Cubic,
    delay: &Cubic,
    pdr: &Cubic,
) -> Vec<f64> {
    xs.iter()
        .map(|&x| estimate_reward(x, weights, power, delay, pdr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DELAY_MODEL, PDR_MODEL, POWER_MODEL};

    const WEIGHTS: RewardWeights = RewardWeights {
        alpha: 0.8,
        beta: 0.1,
        delta: 0.1,
    };

    #[test]
    fn matches_the_weighted_cost_formula() {
        let x = 25.0;
        let expected = -(WEIGHTS.alpha * POWER_MODEL.eval(x) + WEIGHTS.beta * DELAY_MODEL.eval(x)
            - WEIGHTS.delta * PDR_MODEL.eval(x));
        let actual = estimate_reward(x, WEIGHTS, &POWER_MODEL, &DELAY_MODEL, &PDR_MODEL);
        assert_eq!(actual, expected);
    }

    #[test]
    fn better_pdr_improves_the_estimate() {
        let x = 20.0;
        let baseline = estimate_reward(x, WEIGHTS, &POWER_MODEL, &DELAY_MODEL, &PDR_MODEL);

        let better_pdr = Cubic::new(
            PDR_MODEL.a,
            PDR_MODEL.b,
            PDR_MODEL.c,
            PDR_MODEL.d + 0.02,
        );
        let improved = estimate_reward(x, WEIGHTS, &POWER_MODEL, &DELAY_MODEL, &better_pdr);

        // Raising delivery while holding power and delay fixed moves the
        // (negative) estimate strictly toward zero.
        assert!(improved > baseline);
        assert!(improved.abs() < baseline.abs());
    }

    #[test]
    fn vectorized_estimation_preserves_order() {
        let xs = [30.0, 10.0, 20.0];
        let many = estimate_reward_many(&xs, WEIGHTS, &POWER_MODEL, &DELAY_MODEL, &PDR_MODEL);
        let singles: Vec<f64> = xs
            .iter()
            .map(|&x| estimate_reward(x, WEIGHTS, &POWER_MODEL, &DELAY_MODEL, &PDR_MODEL))
            .collect();
        assert_eq!(many, singles);
    }
}
