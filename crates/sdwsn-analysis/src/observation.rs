//! Observation records and table loading
//!
//! The observation persistence layer hands over one key-value record per
//! simulation cycle. This module adapts that ordered collection into a
//! typed [`ObservationTable`], the immutable input every downstream
//! component works on.
//!
//! # Loading contract
//!
//! - Every column of [`Observation`] must be present in every record;
//!   a missing column fails with [`LoadError::MissingColumn`].
//! - Values are coerced (numeric strings parse to numbers) but never
//!   otherwise transformed; an unparseable value fails with
//!   [`LoadError::InvalidValue`].
//! - The input records are read, never mutated; the table owns its copy.
//!
//! # Warm-up convention
//!
//! The first row of a run is a warm-up artifact of the simulation and is
//! conventionally dropped before aggregation. The drop is a data-cleaning
//! policy owned by the caller via [`ObservationTable::without_warmup`],
//! not something the aggregator does behind the caller's back.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::reward::RewardWeights;

/// One simulation cycle sample, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Observation {
    /// Ordinal cycle timestamp, increasing within a run.
    pub timestamp: u64,
    /// Slotframe size in force during the cycle (positive).
    pub current_sf_len: u32,
    /// Average network power draw (mW).
    pub power_avg: f64,
    /// Average end-to-end delay (ms).
    pub delay_avg: f64,
    /// Mean packet delivery ratio.
    pub pdr_mean: f64,
    /// Scalar reward; more negative is better.
    pub reward: f64,
    /// Power weight, constant within one run.
    pub alpha: f64,
    /// Delay weight, constant within one run.
    pub beta: f64,
    /// PDR weight, constant within one run.
    pub delta: f64,
    /// Last occupied timeslot in the active schedule.
    pub last_ts_in_schedule: i64,
}

/// Ordered sequence of observations from a single run.
///
/// Insertion order is temporal order. The run-level weight constants
/// (α/β/δ) are shared by every row and exposed through
/// [`weights`](Self::weights).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObservationTable {
    pub observations: Vec<Observation>,
}

/// Errors raised while adapting raw records into an [`ObservationTable`].
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    /// A required column is absent from a record.
    #[display("observation record {index} is missing column '{column}'")]
    MissingColumn { index: usize, column: &'static str },
    /// A column is present but its value cannot be coerced.
    #[display("observation record {index} has invalid value {value} for column '{column}'")]
    InvalidValue {
        index: usize,
        column: &'static str,
        value: String,
    },
}

impl ObservationTable {
    /// Adapts an ordered collection of key-value records into a table.
    ///
    /// # Errors
    ///
    /// [`LoadError::MissingColumn`] if a record lacks a required column;
    /// [`LoadError::InvalidValue`] if a value cannot be coerced to the
    /// column's type.
    pub fn from_records(records: &[Map<String, Value>]) -> Result<Self, LoadError> {
        let observations = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Ok(Observation {
                    timestamp: unsigned_field(record, index, "timestamp")?,
                    current_sf_len: slotframe_field(record, index)?,
                    power_avg: real_field(record, index, "power_avg")?,
                    delay_avg: real_field(record, index, "delay_avg")?,
                    pdr_mean: real_field(record, index, "pdr_mean")?,
                    reward: real_field(record, index, "reward")?,
                    alpha: real_field(record, index, "alpha")?,
                    beta: real_field(record, index, "beta")?,
                    delta: real_field(record, index, "delta")?,
                    last_ts_in_schedule: integer_field(record, index, "last_ts_in_schedule")?,
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;
        Ok(Self { observations })
    }

    /// Wraps already-typed observations in a table.
    #[must_use]
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Returns a copy of the table with the warm-up row (row 0) dropped.
    #[must_use]
    pub fn without_warmup(&self) -> Self {
        Self {
            observations: self.observations.iter().skip(1).cloned().collect(),
        }
    }

    /// The run-level α/β/δ weights, read from the first row.
    ///
    /// Returns `None` for an empty table.
    #[must_use]
    pub fn weights(&self) -> Option<RewardWeights> {
        self.observations.first().map(|obs| RewardWeights {
            alpha: obs.alpha,
            beta: obs.beta,
            delta: obs.delta,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// A numeric column of the observation table.
///
/// Names follow the persistence layer's column names, so the CLI can take
/// them verbatim on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Timestamp,
    SlotframeSize,
    PowerAvg,
    DelayAvg,
    PdrMean,
    Reward,
    Alpha,
    Beta,
    Delta,
    LastTsInSchedule,
}

impl Column {
    pub const ALL: [Self; 10] = [
        Self::Timestamp,
        Self::SlotframeSize,
        Self::PowerAvg,
        Self::DelayAvg,
        Self::PdrMean,
        Self::Reward,
        Self::Alpha,
        Self::Beta,
        Self::Delta,
        Self::LastTsInSchedule,
    ];

    /// The persistence-layer name of the column.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::SlotframeSize => "current_sf_len",
            Self::PowerAvg => "power_avg",
            Self::DelayAvg => "delay_avg",
            Self::PdrMean => "pdr_mean",
            Self::Reward => "reward",
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Delta => "delta",
            Self::LastTsInSchedule => "last_ts_in_schedule",
        }
    }

    /// Reads this column's value from an observation as a real number.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn value(self, obs: &Observation) -> f64 {
        match self {
            Self::Timestamp => obs.timestamp as f64,
            Self::SlotframeSize => f64::from(obs.current_sf_len),
            Self::PowerAvg => obs.power_avg,
            Self::DelayAvg => obs.delay_avg,
            Self::PdrMean => obs.pdr_mean,
            Self::Reward => obs.reward,
            Self::Alpha => obs.alpha,
            Self::Beta => obs.beta,
            Self::Delta => obs.delta,
            Self::LastTsInSchedule => obs.last_ts_in_schedule as f64,
        }
    }
}

/// Error for [`Column::from_str`] on an unknown column name.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("unknown observation column '{name}'")]
pub struct ParseColumnError {
    pub name: String,
}

impl FromStr for Column {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|column| column.name() == s)
            .ok_or_else(|| ParseColumnError {
                name: s.to_string(),
            })
    }
}

fn field<'a>(
    record: &'a Map<String, Value>,
    index: usize,
    column: &'static str,
) -> Result<&'a Value, LoadError> {
    record
        .get(column)
        .ok_or(LoadError::MissingColumn { index, column })
}

fn invalid(index: usize, column: &'static str, value: &Value) -> LoadError {
    LoadError::InvalidValue {
        index,
        column,
        value: value.to_string(),
    }
}

fn real_field(
    record: &Map<String, Value>,
    index: usize,
    column: &'static str,
) -> Result<f64, LoadError> {
    let value = field(record, index, column)?;
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(index, column, value)),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| invalid(index, column, value)),
        _ => Err(invalid(index, column, value)),
    }
}

#[expect(clippy::cast_possible_truncation)]
fn integer_field(
    record: &Map<String, Value>,
    index: usize,
    column: &'static str,
) -> Result<i64, LoadError> {
    let value = field(record, index, column)?;
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                // Exports sometimes widen integers to floats; accept exact ones.
                n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
            })
            .ok_or_else(|| invalid(index, column, value)),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| invalid(index, column, value)),
        _ => Err(invalid(index, column, value)),
    }
}

fn unsigned_field(
    record: &Map<String, Value>,
    index: usize,
    column: &'static str,
) -> Result<u64, LoadError> {
    let value = field(record, index, column)?;
    u64::try_from(integer_field(record, index, column)?)
        .map_err(|_| invalid(index, column, value))
}

fn slotframe_field(record: &Map<String, Value>, index: usize) -> Result<u32, LoadError> {
    let column = "current_sf_len";
    let value = field(record, index, column)?;
    let raw = integer_field(record, index, column)?;
    u32::try_from(raw)
        .ok()
        .filter(|&sf| sf > 0)
        .ok_or_else(|| invalid(index, column, value))
}
