use chrono::{DateTime, Utc};
use sdwsn_analysis::series::{RunMetadata, Series};
use serde::Serialize;

/// Per-cycle artifact: each metric over time with the slotframe size and
/// schedule occupancy alongside, plus the running (negated) reward total.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineReport {
    pub generated_at: DateTime<Utc>,
    pub metadata: RunMetadata,
    pub slotframe: Series,
    pub last_ts_in_schedule: Series,
    pub power: Series,
    pub delay: Series,
    pub pdr: Series,
    pub cumulative_reward: Series,
}
