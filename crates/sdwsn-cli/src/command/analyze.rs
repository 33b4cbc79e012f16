use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use sdwsn_analysis::{
    aggregate::{GroupStats, aggregate},
    models,
    observation::{Column, ObservationTable},
    reward::{RewardWeights, estimate_reward_many},
    series::{RunMetadata, Series},
};
use sdwsn_stats::{cubic::Cubic, fit::fit_cubic};

use crate::{
    schema::report::{AnalysisReport, MetricReport, ModelSource},
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Path to the observations JSON file
    pub observations: PathBuf,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Independent column to group by
    #[arg(long, default_value = "current_sf_len")]
    pub group_by: Column,
    /// Refit the metric models from this run's aggregated means instead of
    /// using the fixed calibration
    #[arg(long)]
    pub fit: bool,
    /// Keep the warm-up row instead of dropping it
    #[arg(long)]
    pub keep_warmup: bool,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
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
    let weights = RewardWeights {
        alpha: metadata.alpha,
        beta: metadata.beta,
        delta: metadata.delta,
    };

    let power = summarize(&table, arg, Column::PowerAvg, models::POWER_MODEL)?;
    let delay = summarize(&table, arg, Column::DelayAvg, models::DELAY_MODEL)?;
    let pdr = summarize(&table, arg, Column::PdrMean, models::PDR_MODEL)?;

    let reward_groups = aggregate(&table, arg.group_by, Column::Reward)?;
    let observed_reward = Series::from_group_stats(&reward_groups);

    let xs: Vec<f64> = reward_groups.iter().map(|g| g.key).collect();
    let estimates = estimate_reward_many(&xs, weights, &power.model, &delay.model, &pdr.model);
    let estimated_reward = Series::from_values(xs, estimates);

    let report = AnalysisReport {
        generated_at: Utc::now(),
        metadata,
        group_by: arg.group_by.name().to_string(),
        metrics: vec![power.report, delay.report, pdr.report],
        observed_reward,
        estimated_reward,
    };

    Output::save_json(&report, arg.output.clone())?;
    Ok(())
}

struct MetricSummary {
    model: Cubic,
    report: MetricReport,
}

fn summarize(
    table: &ObservationTable,
    arg: &AnalyzeArg,
    column: Column,
    fixed: Cubic,
) -> anyhow::Result<MetricSummary> {
    let groups = aggregate(table, arg.group_by, column)?;
    let (model, model_source) = if arg.fit {
        refit(&groups, column, fixed)
    } else {
        (fixed, ModelSource::Fixed)
    };

    let xs: Vec<f64> = groups.iter().map(|g| g.key).collect();
    let report = MetricReport {
        metric: column.name().to_string(),
        model_source,
        model: model.into(),
        observed: Series::from_group_stats(&groups),
        modeled: Series::from_model(&model, &xs),
        groups,
    };
    Ok(MetricSummary { model, report })
}

/// Refits one metric's cubic from its aggregated means. Both fit failures
/// are recoverable: the fixed calibration stays in force.
fn refit(groups: &[GroupStats], column: Column, fixed: Cubic) -> (Cubic, ModelSource) {
    let points: Vec<(f64, f64)> = groups.iter().map(|g| (g.key, g.mean)).collect();
    match fit_cubic(&points) {
        Ok(model) => {
            eprintln!("Refit {} model: {model}", column.name());
            (model, ModelSource::Refitted)
        }
        Err(err) => {
            eprintln!(
                "Refit of {} failed ({err}); keeping the fixed model",
                column.name()
            );
            (fixed, ModelSource::Fixed)
        }
    }
}
