//! Grouped aggregation with confidence intervals
//!
//! For a chosen independent column (typically the slotframe size), this
//! module computes per-group mean, sample count, standard deviation, and a
//! 95% confidence interval for any dependent column. Groups come back
//! sorted ascending by key so downstream plotting and fitting see a
//! deterministic order.
//!
//! The aggregation is a pure function of the table: calling it twice on
//! the same table yields identical output and never mutates the input.

use std::{cmp::Ordering, collections::BTreeMap};

use sdwsn_stats::confidence::ConfidenceStats;
use serde::Serialize;

use crate::observation::{Column, ObservationTable};

/// Summary statistics for one group of a grouped aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupStats {
    /// Distinct value of the grouping column.
    pub key: f64,
    /// Mean of the metric within the group.
    pub mean: f64,
    /// Number of rows in the group (at least 1).
    pub count: usize,
    /// Sample standard deviation; `0.0` for single-row groups.
    pub std_dev: f64,
    /// Lower CI95 bound; equals `mean` for single-row groups.
    pub ci_low: f64,
    /// Upper CI95 bound; equals `mean` for single-row groups.
    pub ci_high: f64,
}

/// Errors from [`aggregate`].
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
pub enum AggregateError {
    /// The input table has no rows to aggregate.
    #[display("observation table has no rows to aggregate")]
    EmptyTable,
}

/// Groups `metric` by the distinct values of `group_by` and summarizes
/// each group.
///
/// The output is sorted strictly ascending by group key with no duplicate
/// keys. Single-row groups are a defined boundary value, not an error:
/// their standard deviation is zero and both interval bounds equal the
/// mean.
///
/// # Errors
///
/// [`AggregateError::EmptyTable`] if the table has no rows.
pub fn aggregate(
    table: &ObservationTable,
    group_by: Column,
    metric: Column,
) -> Result<Vec<GroupStats>, AggregateError> {
    if table.is_empty() {
        return Err(AggregateError::EmptyTable);
    }

    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();
    for obs in &table.observations {
        groups
            .entry(GroupKey(group_by.value(obs)))
            .or_default()
            .push(metric.value(obs));
    }

    Ok(groups
        .into_iter()
        .map(|(GroupKey(key), values)| {
            let stats = ConfidenceStats::from_values(&values)
                .expect("every group holds at least one value");
            GroupStats {
                key,
                mean: stats.mean,
                count: stats.count,
                std_dev: stats.std_dev,
                ci_low: stats.ci_low,
                ci_high: stats.ci_high,
            }
        })
        .collect())
}

/// Total-order wrapper so f64 group keys can live in a `BTreeMap`.
#[derive(Debug, Clone, Copy)]
struct GroupKey(f64);

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::Observation;

    fn obs(timestamp: u64, sf: u32, power: f64) -> Observation {
        Observation {
            timestamp,
            current_sf_len: sf,
            power_avg: power,
            delay_avg: 11.0,
            pdr_mean: 0.95,
            reward: -1.4,
            alpha: 0.8,
            beta: 0.1,
            delta: 0.1,
            last_ts_in_schedule: i64::from(sf) - 1,
        }
    }

    fn sample_table() -> ObservationTable {
        // Deliberately out of key order to exercise the sort.
        ObservationTable::from_observations(vec![
            obs(0, 20, 0.24),
            obs(1, 10, 0.26),
            obs(2, 30, 0.22),
            obs(3, 10, 0.27),
            obs(4, 20, 0.25),
        ])
    }

    #[test]
    fn groups_sorted_ascending_without_duplicates() {
        let groups = aggregate(&sample_table(), Column::SlotframeSize, Column::PowerAvg).unwrap();
        let keys: Vec<f64> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![10.0, 20.0, 30.0]);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn five_row_power_scenario() {
        let groups = aggregate(&sample_table(), Column::SlotframeSize, Column::PowerAvg).unwrap();
        assert_eq!(groups.len(), 3);

        let counts: Vec<usize> = groups.iter().map(|g| g.count).collect();
        assert_eq!(counts, vec![2, 2, 1]);

        assert!((groups[0].mean - 0.265).abs() < 1e-12);

        // The count-1 group degenerates to the mean, without NaN.
        let single = groups[2];
        assert_eq!(single.std_dev, 0.0);
        assert_eq!(single.ci_low, 0.22);
        assert_eq!(single.ci_high, 0.22);
    }

    #[test]
    fn zero_variance_group_collapses_interval() {
        let table = ObservationTable::from_observations(vec![
            obs(0, 10, 0.25),
            obs(1, 10, 0.25),
            obs(2, 10, 0.25),
        ]);
        let groups = aggregate(&table, Column::SlotframeSize, Column::PowerAvg).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].ci_low, groups[0].mean);
        assert_eq!(groups[0].ci_high, groups[0].mean);
    }

    #[test]
    fn aggregation_is_idempotent_and_does_not_mutate() {
        let table = sample_table();
        let before = table.clone();

        let first = aggregate(&table, Column::SlotframeSize, Column::PowerAvg).unwrap();
        let second = aggregate(&table, Column::SlotframeSize, Column::PowerAvg).unwrap();

        assert_eq!(first, second);
        assert_eq!(table, before);
    }

    #[test]
    fn empty_table_is_an_error() {
        let table = ObservationTable::from_observations(vec![]);
        assert!(matches!(
            aggregate(&table, Column::SlotframeSize, Column::PowerAvg),
            Err(AggregateError::EmptyTable)
        ));
    }
}
