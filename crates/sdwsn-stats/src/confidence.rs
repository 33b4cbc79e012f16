/// Z-score for a two-sided 95% confidence interval under the normal
/// approximation. No small-sample correction is applied.
pub const Z_95: f64 = 1.96;

/// Confidence-bounded summary statistics for one set of values.
///
/// The interval bounds use the normal approximation
/// `mean ± 1.96·std / √count` with the sample standard deviation
/// (divisor `count − 1`).
///
/// # Single-sample groups
///
/// A single value carries no dispersion information. Rather than letting
/// `0 / 0` propagate NaN through the interval, a one-value set is defined
/// to have `std_dev == 0.0` and both bounds equal to the mean.
///
/// # Examples
///
/// ```
/// use sdwsn_stats::confidence::ConfidenceStats;
///
/// let stats = ConfidenceStats::from_values(&[0.24, 0.25]).unwrap();
/// assert_eq!(stats.count, 2);
/// assert!(stats.ci_low < stats.mean && stats.mean < stats.ci_high);
///
/// let degenerate = ConfidenceStats::from_values(&[0.22]).unwrap();
/// assert_eq!(degenerate.std_dev, 0.0);
/// assert_eq!(degenerate.ci_low, degenerate.mean);
/// assert_eq!(degenerate.ci_high, degenerate.mean);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceStats {
    /// Arithmetic mean of the values.
    pub mean: f64,
    /// Number of values summarized.
    pub count: usize,
    /// Sample standard deviation (divisor `count − 1`); `0.0` for a
    /// single value.
    pub std_dev: f64,
    /// Lower bound of the 95% confidence interval.
    pub ci_low: f64,
    /// Upper bound of the 95% confidence interval.
    pub ci_high: f64,
}

impl ConfidenceStats {
    /// Computes confidence statistics for a set of values.
    ///
    /// Returns `None` if `values` is empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let count = values.len();
        if count == 0 {
            return None;
        }

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;

        if count == 1 {
            return Some(Self {
                mean,
                count,
                std_dev: 0.0,
                ci_low: mean,
                ci_high: mean,
            });
        }

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let std_dev = variance.sqrt();
        let margin = Z_95 * std_dev / n.sqrt();

        Some(Self {
            mean,
            count,
            std_dev,
            ci_low: mean - margin,
            ci_high: mean + margin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_none() {
        assert!(ConfidenceStats::from_values(&[]).is_none());
    }

    #[test]
    fn single_value_collapses_interval_to_mean() {
        let stats = ConfidenceStats::from_values(&[0.22]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 0.22);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.ci_low, 0.22);
        assert_eq!(stats.ci_high, 0.22);
    }

    #[test]
    fn zero_variance_collapses_interval_to_mean() {
        let stats = ConfidenceStats::from_values(&[1.5, 1.5, 1.5]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.ci_low, stats.mean);
        assert_eq!(stats.ci_high, stats.mean);
    }

    #[test]
    fn interval_matches_normal_approximation() {
        // mean 2, sample std 1, n = 4 => margin = 1.96 / 2
        let stats = ConfidenceStats::from_values(&[1.0, 2.0, 2.0, 3.0]).unwrap();
        assert!((stats.mean - 2.0).abs() < 1e-12);
        let expected_std = (2.0f64 / 3.0).sqrt();
        assert!((stats.std_dev - expected_std).abs() < 1e-12);
        let margin = Z_95 * expected_std / 2.0;
        assert!((stats.ci_low - (2.0 - margin)).abs() < 1e-12);
        assert!((stats.ci_high - (2.0 + margin)).abs() < 1e-12);
    }
}
