//! Least-squares cubic fitting with a bounded, damped optimizer.
//!
//! The model `f(x) = a·x + b·x² + c·x³ + d` is linear in its coefficients,
//! so the sum-of-squared-residuals objective is minimized over the fixed
//! basis `[x, x², x³, 1]`. The solver uses Levenberg–Marquardt damping on
//! the normal equations: a damped step that reduces the residual is
//! accepted and the damping relaxed; a step that does not is rejected and
//! the damping raised. The iteration budget is a hard bound — the fit
//! always returns a definite success or failure.
//!
//! # Examples
//!
//! ```
//! use sdwsn_stats::fit::fit_cubic;
//!
//! let points: Vec<(f64, f64)> = [10.0, 20.0, 30.0, 40.0, 50.0]
//!     .iter()
//!     .map(|&x| (x, 0.5 * x + 3.0))
//!     .collect();
//!
//! let model = fit_cubic(&points).unwrap();
//! assert!((model.a - 0.5).abs() < 1e-6);
//! assert!((model.d - 3.0).abs() < 1e-6);
//! ```

use crate::cubic::Cubic;

/// Iteration budget for the damped least-squares loop.
pub const MAX_ITERATIONS: usize = 60;

/// Relative step size below which the solver is considered converged.
const STEP_TOLERANCE: f64 = 1e-10;

const INITIAL_DAMPING: f64 = 1e-3;
const MIN_DAMPING: f64 = 1e-12;

/// Errors from [`fit_cubic`].
///
/// Both variants are recoverable from the caller's point of view: the
/// expected fallback is to keep using a fixed calibration model instead of
/// the recalibrated one.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
pub enum FitError {
    /// A cubic has four free coefficients; fewer distinct x values leave
    /// the system underdetermined.
    #[display("cubic fit needs at least 4 distinct x values, got {distinct}")]
    InsufficientData { distinct: usize },
    /// The optimizer exhausted its iteration budget without converging.
    #[display("cubic fit did not converge within {iterations} iterations")]
    Divergence { iterations: usize },
}

/// Fits a cubic model to `(x, y)` pairs by minimizing the sum of squared
/// residuals.
///
/// # Errors
///
/// - [`FitError::InsufficientData`] if fewer than 4 distinct x values are
///   supplied. This is checked up front; a degenerate fit is never
///   silently returned.
/// - [`FitError::Divergence`] if the optimizer does not converge within
///   [`MAX_ITERATIONS`].
pub fn fit_cubic(points: &[(f64, f64)]) -> Result<Cubic, FitError> {
    let distinct = count_distinct_x(points);
    if distinct < 4 {
        return Err(FitError::InsufficientData { distinct });
    }

    // The normal matrix and right-hand side are fixed for a model that is
    // linear in its coefficients; accumulate them once.
    let mut normal = [[0.0_f64; 4]; 4];
    let mut rhs = [0.0_f64; 4];
    for &(x, y) in points {
        let basis = [x, x * x, x * x * x, 1.0];
        for i in 0..4 {
            rhs[i] += basis[i] * y;
            for j in 0..4 {
                normal[i][j] += basis[i] * basis[j];
            }
        }
    }

    let mut beta = [0.0_f64; 4];
    let mut residual = sum_squared_residuals(points, &beta);
    let mut damping = INITIAL_DAMPING;

    for _ in 0..MAX_ITERATIONS {
        let mut damped = normal;
        for i in 0..4 {
            // Marquardt scaling: damp relative to the diagonal magnitude.
            damped[i][i] += damping * normal[i][i].max(1.0);
        }

        let mut gradient = [0.0_f64; 4];
        for i in 0..4 {
            let reconstructed: f64 = (0..4).map(|j| normal[i][j] * beta[j]).sum();
            gradient[i] = rhs[i] - reconstructed;
        }

        let Some(step) = solve4(&damped, &gradient) else {
            damping *= 10.0;
            continue;
        };

        let candidate = [
            beta[0] + step[0],
            beta[1] + step[1],
            beta[2] + step[2],
            beta[3] + step[3],
        ];
        let candidate_residual = sum_squared_residuals(points, &candidate);

        if candidate_residual.is_finite() && candidate_residual <= residual {
            let step_size = step
                .iter()
                .zip(&beta)
                .map(|(s, b)| s.abs() / (1.0 + b.abs()))
                .fold(0.0_f64, f64::max);
            beta = candidate;
            residual = candidate_residual;
            damping = (damping / 10.0).max(MIN_DAMPING);
            if step_size < STEP_TOLERANCE {
                return Ok(Cubic::new(beta[0], beta[1], beta[2], beta[3]));
            }
        } else {
            damping *= 10.0;
        }
    }

    Err(FitError::Divergence {
        iterations: MAX_ITERATIONS,
    })
}

fn count_distinct_x(points: &[(f64, f64)]) -> usize {
    let mut xs: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    xs.len()
}

fn sum_squared_residuals(points: &[(f64, f64)], beta: &[f64; 4]) -> f64 {
    let model = Cubic::new(beta[0], beta[1], beta[2], beta[3]);
    points
        .iter()
        .map(|&(x, y)| {
            let r = y - model.eval(x);
            r * r
        })
        .sum()
}

/// Solves a 4×4 linear system by Gaussian elimination with partial
/// pivoting. Returns `None` for singular or non-finite systems.
fn solve4(matrix: &[[f64; 4]; 4], rhs: &[f64; 4]) -> Option<[f64; 4]> {
    let mut m = *matrix;
    let mut b = *rhs;

    for col in 0..4 {
        let pivot_row = (col..4).max_by(|&p, &q| m[p][col].abs().total_cmp(&m[q][col].abs()))?;
        let pivot = m[pivot_row][col];
        if !pivot.is_finite() || pivot.abs() < 1e-300 {
            return None;
        }
        m.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..4 {
            let factor = m[row][col] / m[col][col];
            for k in col..4 {
                m[row][k] -= factor * m[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0_f64; 4];
    for row in (0..4).rev() {
        let tail: f64 = ((row + 1)..4).map(|k| m[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / m[row][row];
        if !x[row].is_finite() {
            return None;
        }
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_cubic() {
        let truth = Cubic::new(-3.0e-3, 5.0e-5, -3.0e-7, 0.29);
        let points: Vec<(f64, f64)> = [5.0, 10.0, 15.0, 20.0, 25.0, 30.0]
            .iter()
            .map(|&x| (x, truth.eval(x)))
            .collect();

        let fitted = fit_cubic(&points).unwrap();
        assert!((fitted.a - truth.a).abs() < 1e-6);
        assert!((fitted.b - truth.b).abs() < 1e-6);
        assert!((fitted.c - truth.c).abs() < 1e-6);
        assert!((fitted.d - truth.d).abs() < 1e-6);
    }

    #[test]
    fn three_distinct_x_values_are_rejected() {
        // Five points but only three distinct x values.
        let points = [
            (10.0, 1.0),
            (10.0, 1.1),
            (20.0, 2.0),
            (20.0, 2.1),
            (30.0, 3.0),
        ];
        match fit_cubic(&points) {
            Err(FitError::InsufficientData { distinct }) => assert_eq!(distinct, 3),
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_design_reports_divergence() {
        // x^3 overflows to infinity, so every damped solve fails and the
        // iteration budget runs out.
        let points = [
            (1.0e120, 1.0),
            (2.0e120, 2.0),
            (3.0e120, 3.0),
            (4.0e120, 4.0),
        ];
        match fit_cubic(&points) {
            Err(FitError::Divergence { iterations }) => assert_eq!(iterations, MAX_ITERATIONS),
            other => panic!("expected Divergence, got {other:?}"),
        }
    }

    #[test]
    fn fits_noisy_data_close_to_truth() {
        let truth = Cubic::new(0.35, -4.2e-3, 2.3e-5, 8.05);
        // Deterministic +/- perturbation, well under the signal scale.
        let points: Vec<(f64, f64)> = (1..=10)
            .map(|i| {
                let x = f64::from(i) * 6.0;
                let noise = if i % 2 == 0 { 1.0e-3 } else { -1.0e-3 };
                (x, truth.eval(x) + noise)
            })
            .collect();

        let fitted = fit_cubic(&points).unwrap();
        for x in [10.0, 25.0, 40.0, 55.0] {
            assert!((fitted.eval(x) - truth.eval(x)).abs() < 1.0e-2);
        }
    }
}
