use clap::{Parser, Subcommand};

use self::{
    classify::ClassifyArg, curate::CurateArg, radar::RadarArg, replay_guide::ReplayGuideArg,
};

mod classify;
mod curate;
mod radar;
mod replay_guide;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Attach a meaning tag to every move of a game
    Classify(#[clap(flatten)] ClassifyArg),
    /// Compute one player's skill radar for a game
    Radar(#[clap(flatten)] RadarArg),
    /// Rank candidate games against a player's radar history
    Curate(#[clap(flatten)] CurateArg),
    /// Pick the most instructive mistakes of a game
    ReplayGuide(#[clap(flatten)] ReplayGuideArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Classify(arg) => classify::run(&arg)?,
        Mode::Radar(arg) => radar::run(&arg)?,
        Mode::Curate(arg) => curate::run(&arg)?,
        Mode::ReplayGuide(arg) => replay_guide::run(&arg)?,
    }
    Ok(())
}
