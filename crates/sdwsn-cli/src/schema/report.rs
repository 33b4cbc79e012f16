use chrono::{DateTime, Utc};
use sdwsn_analysis::{
    aggregate::GroupStats,
    series::{RunMetadata, Series},
};
use sdwsn_stats::cubic::Cubic;
use serde::Serialize;

/// Grouped-analysis artifact: one confidence-banded curve and one model
/// curve per metric, plus the observed and reconstructed reward.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub metadata: RunMetadata,
    /// Column the curves are grouped over (the independent variable).
    pub group_by: String,
    pub metrics: Vec<MetricReport>,
    pub observed_reward: Series,
    pub estimated_reward: Series,
}

/// One dependent metric's aggregated and modeled curves.
#[derive(Debug, Clone, Serialize)]
pub struct MetricReport {
    pub metric: String,
    pub model_source: ModelSource,
    pub model: CubicCoefficients,
    /// Per-group statistics backing the observed curve (counts, std).
    pub groups: Vec<GroupStats>,
    pub observed: Series,
    pub modeled: Series,
}

/// Whether a metric's curve came from the fixed calibration or a refit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    Fixed,
    Refitted,
}

/// Cubic coefficients in a renderer-friendly shape.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CubicCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl From<Cubic> for CubicCoefficients {
    fn from(model: Cubic) -> Self {
        Self {
            a: model.a,
            b: model.b,
            c: model.c,
            d: model.d,
        }
    }
}
