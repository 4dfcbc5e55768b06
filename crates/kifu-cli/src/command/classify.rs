use std::{collections::BTreeMap, path::PathBuf};

use kifu_core::EvaluationRecord;
use kifu_meaning::{
    classifier::{classify_game, tag_distribution},
    tag::MeaningTag,
};
use serde::Serialize;

use crate::files;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ClassifyArg {
    /// Game records file path
    #[arg(long)]
    records: PathBuf,
    /// Game length used to detect the endgame (defaults to the file's value, then the last move)
    #[arg(long)]
    total_moves: Option<u32>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput<'a> {
    game_id: &'a str,
    distribution: BTreeMap<&'static str, u32>,
    tags: &'a [MeaningTag],
    records: &'a [EvaluationRecord],
}

pub fn run(arg: &ClassifyArg) -> anyhow::Result<()> {
    let ClassifyArg {
        records,
        total_moves,
        output,
    } = arg;

    eprintln!("Loading records from {}...", records.display());
    let mut game = files::read_game_records(records)?;
    eprintln!("Loaded {} records", game.records.len());

    let tags = classify_game(&mut game.records, total_moves.or(game.total_moves));
    let distribution = tag_distribution(&game.records)
        .into_iter()
        .map(|(id, count)| (id.as_str(), count))
        .collect();

    files::write_document(
        &ClassifyOutput {
            game_id: &game.game_id,
            distribution,
            tags: &tags,
            records: &game.records,
        },
        output.as_deref(),
    )
}
