//! Series export for the rendering collaborator
//!
//! The renderer consumes finished `(x, y, low, high)` tuples and some
//! run-identifying metadata; it never sees tables, models, or group
//! statistics. This module is that boundary: everything leaving the core
//! goes through [`Series`] and [`RunMetadata`], and no computational code
//! takes a rendering object in return.

use sdwsn_stats::cubic::Cubic;
use serde::Serialize;

use crate::{
    aggregate::GroupStats,
    observation::{Column, ObservationTable},
};

/// One renderable curve: four equal-length sequences aligned by index.
///
/// For series without a confidence band (model curves, timelines), `low`
/// and `high` mirror `y` so consumers can treat every series uniformly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl Series {
    /// Packages a grouped aggregation as a confidence-banded curve.
    #[must_use]
    pub fn from_group_stats(groups: &[GroupStats]) -> Self {
        Self {
            x: groups.iter().map(|g| g.key).collect(),
            y: groups.iter().map(|g| g.mean).collect(),
            low: groups.iter().map(|g| g.ci_low).collect(),
            high: groups.iter().map(|g| g.ci_high).collect(),
        }
    }

    /// Evaluates a model over `xs` and packages the result, preserving
    /// input order.
    #[must_use]
    pub fn from_model(model: &Cubic, xs: &[f64]) -> Self {
        let y = model.eval_many(xs);
        Self::from_values(xs.to_vec(), y)
    }

    /// Packages plain `(x, y)` sequences as a band-less series.
    ///
    /// # Panics
    ///
    /// Panics if `x` and `y` differ in length.
    #[must_use]
    pub fn from_values(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "series sequences must align by index");
        Self {
            low: y.clone(),
            high: y.clone(),
            x,
            y,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Run-identifying metadata handed to the renderer next to the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunMetadata {
    pub alpha: f64,
    pub beta: f64,
    pub delta: f64,
    pub last_ts_in_schedule: i64,
}

impl RunMetadata {
    /// Reads the run constants from a table: weights from the first row,
    /// the schedule high-water mark from the last.
    ///
    /// Returns `None` for an empty table.
    #[must_use]
    pub fn from_table(table: &ObservationTable) -> Option<Self> {
        let first = table.observations.first()?;
        let last = table.observations.last()?;
        Some(Self {
            alpha: first.alpha,
            beta: first.beta,
            delta: first.delta,
            last_ts_in_schedule: last.last_ts_in_schedule,
        })
    }
}

/// Per-cycle timeline of one metric (x = cycle index in temporal order).
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn metric_timeline(table: &ObservationTable, metric: Column) -> Series {
    let x = (0..table.len()).map(|i| i as f64).collect();
    let y = table
        .observations
        .iter()
        .map(|obs| metric.value(obs))
        .collect();
    Series::from_values(x, y)
}

/// Per-cycle running total of the observed reward, negated for
/// presentation.
///
/// The observed column keeps the simulator's more-negative-is-better
/// convention; the negation to a rising-is-better curve happens here,
/// once, and nowhere else.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn cumulative_reward(table: &ObservationTable) -> Series {
    let x = (0..table.len()).map(|i| i as f64).collect();
    let mut total = 0.0;
    let y = table
        .observations
        .iter()
        .map(|obs| {
            total += -obs.reward;
            total
        })
        .collect();
    Series::from_values(x, y)
}
