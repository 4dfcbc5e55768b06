use std::path::PathBuf;

use kifu_curator::replay::{DEFAULT_MAX_HIGHLIGHTS, extract_replay_guide};
use kifu_meaning::classifier::classify_game;

use crate::files;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayGuideArg {
    /// Game records file path
    #[arg(long)]
    records: PathBuf,
    /// Maximum number of highlight moments
    #[arg(long, default_value_t = DEFAULT_MAX_HIGHLIGHTS)]
    max: usize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &ReplayGuideArg) -> anyhow::Result<()> {
    let ReplayGuideArg {
        records,
        max,
        output,
    } = arg;

    let mut game = files::read_game_records(records)?;
    // records that already carry a tag keep it
    classify_game(&mut game.records, game.total_moves);

    let guide = extract_replay_guide(&game.game_id, &game.records, *max);
    files::write_document(&guide.to_dict(), output.as_deref())
}
