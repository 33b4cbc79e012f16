use clap::{Parser, Subcommand};

use self::{analyze::AnalyzeArg, generate::GenerateArg, timeline::TimelineArg};

mod analyze;
mod generate;
mod timeline;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Aggregate a run's observations over slotframe size and rebuild the
    /// reward from metric models
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Export per-cycle metric timelines and the cumulative reward
    Timeline(#[clap(flatten)] TimelineArg),
    /// Synthesize observation records from the fixed metric models
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Timeline(arg) => timeline::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}
