use std::path::PathBuf;

use chrono::NaiveDate;
use kifu_core::Player;
use kifu_radar::{history::RadarHistoryEntry, metrics::compute_radar_from_moves};

use crate::files;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RadarArg {
    /// Game records file path
    #[arg(long)]
    records: PathBuf,
    /// Color of the player to profile (B or W)
    #[arg(long)]
    player: Player,
    /// Radar history file to append this game to (created if missing)
    #[arg(long, requires = "player_name")]
    history: Option<PathBuf>,
    /// Player name the history belongs to
    #[arg(long)]
    player_name: Option<String>,
    /// Date the game was played (YYYY-MM-DD)
    #[arg(long)]
    game_date: Option<NaiveDate>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(arg: &RadarArg) -> anyhow::Result<()> {
    let RadarArg {
        records,
        player,
        history,
        player_name,
        game_date,
        output,
    } = arg;

    let game = files::read_game_records(records)?;
    let radar = compute_radar_from_moves(&game.records, *player);
    files::write_document(&radar.to_dict(), output.as_deref())?;

    if let (Some(history_path), Some(player_name)) = (history, player_name) {
        let mut aggregate = files::open_radar_history(history_path, player_name)?;

        let mut entry = RadarHistoryEntry::new(game.game_id.as_str(), *player, radar);
        if let Some(date) = game_date {
            entry = entry.with_game_date(*date);
        }
        if let Some(evicted) = aggregate.add_game(entry) {
            eprintln!("Evicted game {} from history", evicted.game_id);
        }

        files::save_radar_history(history_path, &aggregate)?;
        eprintln!(
            "History of {} now holds {} games",
            player_name,
            aggregate.len()
        );
    }

    Ok(())
}
