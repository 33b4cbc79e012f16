use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use sdwsn_analysis::{
    observation::{Column, ObservationTable},
    series::{RunMetadata, cumulative_reward, metric_timeline},
};

use crate::{
    schema::timeline::TimelineReport,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct TimelineArg {
    /// Path to the observations JSON file
    pub observations: PathBuf,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Keep the warm-up row instead of dropping it
    #[arg(long)]
    pub keep_warmup: bool,
}

pub(crate) fn run(arg: &TimelineArg) -> anyhow::Result<()> {
    let records = util::read_observations_file(&arg.observations)?;
    let table = ObservationTable::from_records(&records)?;
    let table = if arg.keep_warmup {
        table
    } else {
        table.without_warmup()
    };
    eprintln!(
        "Loaded {} observations from {}",
        table.len(),
        arg.observations.display()
    );

    let metadata = RunMetadata::from_table(&table)
        .context("observations contain no rows after the warm-up drop")?;

    let report = TimelineReport {
        generated_at: Utc::now(),
        metadata,
        slotframe: metric_timeline(&table, Column::SlotframeSize),
        last_ts_in_schedule: metric_timeline(&table, Column::LastTsInSchedule),
        power: metric_timeline(&table, Column::PowerAvg),
        delay: metric_timeline(&table, Column::DelayAvg),
        pdr: metric_timeline(&table, Column::PdrMean),
        cumulative_reward: cumulative_reward(&table),
    };

    Output::save_json(&report, arg.output.clone())?;
    Ok(())
}
