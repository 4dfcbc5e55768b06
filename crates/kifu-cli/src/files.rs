//! JSON files read and written by the `kifu` commands.
//!
//! Every command prints one pretty JSON document, to stdout or to `--output`.
//! The radar history file is the only file the CLI rewrites, so it is
//! replaced atomically.

use std::{
    collections::BTreeSet,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::Path,
};

use anyhow::{Context, bail};
use kifu_curator::{candidate::CandidateGameStats, config::CuratorConfig};
use kifu_radar::history::UserRadarAggregate;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::debug;

use crate::model::records::GameRecords;

fn read_json<T>(kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {kind} file: {}", path.display()))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {kind} file: {}", path.display()))?;
    debug!(kind, path = %path.display(), "read JSON file");
    Ok(value)
}

fn write_pretty<W, T>(mut writer: W, document: &T) -> io::Result<()>
where
    W: io::Write,
    T: Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut writer, document)?;
    writeln!(writer)?;
    writer.flush()
}

/// Writes a command's result to `output`, or to stdout if it is `None`.
pub fn write_document<T>(document: &T, output: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_pretty(BufWriter::new(file), document)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))
        }
        None => {
            write_pretty(io::stdout().lock(), document).context("Failed to write JSON to stdout")
        }
    }
}

/// Game records, refusing a file without any record.
pub fn read_game_records(path: &Path) -> anyhow::Result<GameRecords> {
    let game: GameRecords = read_json("game records", path)?;
    if game.records.is_empty() {
        bail!("{} has no records", path.display());
    }
    Ok(game)
}

pub fn read_radar_history(path: &Path) -> anyhow::Result<UserRadarAggregate> {
    let map: Map<String, Value> = read_json("radar history", path)?;
    UserRadarAggregate::from_dict(&map)
        .with_context(|| format!("Invalid radar history in {}", path.display()))
}

/// History of `player_name`, or a fresh one if `path` does not exist yet.
pub fn open_radar_history(path: &Path, player_name: &str) -> anyhow::Result<UserRadarAggregate> {
    if !path.exists() {
        return Ok(UserRadarAggregate::new(player_name));
    }
    let history = read_radar_history(path)?;
    if history.player_name() != player_name {
        bail!(
            "{} holds the history of '{}', not '{}'",
            path.display(),
            history.player_name(),
            player_name
        );
    }
    Ok(history)
}

/// Replaces the history file through a sibling temporary file and a rename.
pub fn save_radar_history(path: &Path, history: &UserRadarAggregate) -> anyhow::Result<()> {
    let temp_path = path.with_extension("tmp");
    let file = File::create(&temp_path)
        .with_context(|| format!("Failed to create {}", temp_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_pretty(&mut writer, &history.to_dict())
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)
        .and_then(|file| file.sync_all())
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    debug!(path = %path.display(), games = history.len(), "saved radar history");
    Ok(())
}

/// Candidate statistics, refusing duplicate game ids.
pub fn read_candidates(path: &Path) -> anyhow::Result<Vec<CandidateGameStats>> {
    let candidates: Vec<CandidateGameStats> = read_json("candidates", path)?;
    let mut seen = BTreeSet::new();
    for candidate in &candidates {
        if !seen.insert(candidate.game_id.as_str()) {
            bail!("{} lists game '{}' twice", path.display(), candidate.game_id);
        }
    }
    Ok(candidates)
}

/// Curator settings from `path`, or the defaults if no file is given.
pub fn read_curator_config(path: Option<&Path>) -> anyhow::Result<CuratorConfig> {
    match path {
        Some(path) => read_json("curator config", path),
        None => Ok(CuratorConfig::default()),
    }
}
