use std::path::PathBuf;

use kifu_curator::suitability::score_batch_suitability;
use serde_json::{Map, Value};

use crate::files;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CurateArg {
    /// Radar history file of the player
    #[arg(long)]
    radar_history: PathBuf,
    /// Candidate game statistics file (JSON array)
    #[arg(long)]
    candidates: PathBuf,
    /// Curator config file (defaults apply if omitted)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &CurateArg) -> anyhow::Result<()> {
    let CurateArg {
        radar_history,
        candidates,
        config,
        output,
    } = arg;

    let history = files::read_radar_history(radar_history)?;
    let candidates = files::read_candidates(candidates)?;
    let config = files::read_curator_config(config.as_deref())?;
    eprintln!(
        "Scoring {} candidates for {} ({} games in history)",
        candidates.len(),
        history.player_name(),
        history.len()
    );

    let user = history.aggregate();
    let scores = score_batch_suitability(&user, &candidates, &config);

    let mut result = Map::new();
    result.insert("player_name".to_owned(), Value::from(history.player_name()));
    result.insert("radar".to_owned(), Value::Object(user.to_dict()));
    result.insert(
        "scores".to_owned(),
        Value::Array(scores.iter().map(|s| Value::Object(s.to_dict())).collect()),
    );
    files::write_document(&result, output.as_deref())
}
