//! Bounded per-player radar history.
//!
//! Each player keeps the radar snapshots of their most recent games, oldest
//! first. Adding past capacity evicts the oldest entry in insertion order;
//! game dates play no part in eviction.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use kifu_core::Player;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    aggregate::{AggregatedRadarResult, aggregate_radar},
    canonical::{
        RadarDictError, extras, radar_from_dict, read_count, read_object, read_required_string,
        read_string,
    },
    metrics::RadarMetrics,
};

pub const DEFAULT_MAX_HISTORY: usize = 10;

const GAME_DATE_FORMAT: &str = "%Y-%m-%d";

const ENTRY_KEYS: [&str; 5] = ["game_id", "player_color", "game_date", "added_at", "radar"];
const HISTORY_KEYS: [&str; 3] = ["player_name", "max_history", "entries"];

/// One game's radar in a player's history.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarHistoryEntry {
    pub game_id: String,
    pub player_color: Player,
    pub radar: RadarMetrics,
    pub game_date: Option<NaiveDate>,
    pub added_at: DateTime<Utc>,
    /// Unrecognized keys, carried through serialization untouched
    pub extra: Map<String, Value>,
}

impl RadarHistoryEntry {
    /// Entry stamped with the current time.
    #[must_use]
    pub fn new(game_id: impl Into<String>, player_color: Player, radar: RadarMetrics) -> Self {
        Self {
            game_id: game_id.into(),
            player_color,
            radar,
            game_date: None,
            added_at: Utc::now(),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_game_date(mut self, date: NaiveDate) -> Self {
        self.game_date = Some(date);
        self
    }

    #[must_use]
    pub fn with_added_at(mut self, added_at: DateTime<Utc>) -> Self {
        self.added_at = added_at;
        self
    }

    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert("game_id".to_owned(), Value::from(self.game_id.clone()));
        map.insert("player_color".to_owned(), Value::from(self.player_color.as_str()));
        map.insert(
            "game_date".to_owned(),
            self.game_date.map_or(Value::Null, |date| {
                Value::from(date.format(GAME_DATE_FORMAT).to_string())
            }),
        );
        map.insert(
            "added_at".to_owned(),
            Value::from(self.added_at.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        map.insert("radar".to_owned(), Value::Object(self.radar.to_dict()));
        map
    }

    pub fn from_dict(map: &Map<String, Value>) -> Result<Self, RadarDictError> {
        let invalid = |key: &str, value: &str| RadarDictError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        };

        let game_id = read_required_string(map, "game_id")?.to_owned();
        let color = read_required_string(map, "player_color")?;
        let player_color = color.parse::<Player>().map_err(|_| invalid("player_color", color))?;
        let radar = match read_object(map, "radar")? {
            Some(radar) => radar_from_dict(radar)?,
            None => RadarMetrics::unknown(),
        };
        let game_date = read_string(map, "game_date")?
            .map(|s| {
                NaiveDate::parse_from_str(s, GAME_DATE_FORMAT).map_err(|_| invalid("game_date", s))
            })
            .transpose()?;
        let added_at = read_required_string(map, "added_at")?;
        let added_at = DateTime::parse_from_rfc3339(added_at)
            .map_err(|_| invalid("added_at", added_at))?
            .with_timezone(&Utc);

        Ok(Self {
            game_id,
            player_color,
            radar,
            game_date,
            added_at,
            extra: extras(map, |key| ENTRY_KEYS.contains(&key)),
        })
    }
}

/// Rolling radar history of one player.
///
/// # Example
///
/// ```
/// use kifu_core::Player;
/// use kifu_radar::{
///     axis::{PerAxis, RadarAxis},
///     history::{RadarHistoryEntry, UserRadarAggregate},
///     metrics::RadarMetrics,
/// };
///
/// let mut history = UserRadarAggregate::with_max_history("alice", 2);
/// for (game, opening) in [("g1", 1.0), ("g2", 2.0), ("g3", 4.0)] {
///     let radar = RadarMetrics::new(
///         PerAxis::from_fn(|axis| (axis == RadarAxis::Opening).then_some(opening)),
///         PerAxis::default(),
///     );
///     history.add_game(RadarHistoryEntry::new(game, Player::Black, radar));
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.aggregate().score(RadarAxis::Opening), Some(3.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UserRadarAggregate {
    player_name: String,
    max_history: usize,
    entries: VecDeque<RadarHistoryEntry>,
    extra: Map<String, Value>,
}

impl UserRadarAggregate {
    #[must_use]
    pub fn new(player_name: impl Into<String>) -> Self {
        Self::with_max_history(player_name, DEFAULT_MAX_HISTORY)
    }

    /// History keeping at most `max_history` games (at least one).
    #[must_use]
    pub fn with_max_history(player_name: impl Into<String>, max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            player_name: player_name.into(),
            max_history,
            entries: VecDeque::with_capacity(max_history),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    #[must_use]
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a game, returning the evicted oldest entry if the history was full.
    pub fn add_game(&mut self, entry: RadarHistoryEntry) -> Option<RadarHistoryEntry> {
        let evicted = if self.entries.len() >= self.max_history {
            self.entries.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            debug!(
                player = %self.player_name,
                evicted = %old.game_id,
                added = %entry.game_id,
                "radar history full, evicting oldest game"
            );
        }
        self.entries.push_back(entry);
        evicted
    }

    /// Entries from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &RadarHistoryEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn aggregate(&self) -> AggregatedRadarResult {
        aggregate_radar(self.entries.iter().map(|entry| &entry.radar))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keys read by [`UserRadarAggregate::from_dict`] that it does not know.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        map.insert("player_name".to_owned(), Value::from(self.player_name.clone()));
        map.insert("max_history".to_owned(), Value::from(self.max_history));
        map.insert(
            "entries".to_owned(),
            Value::Array(
                self.entries
                    .iter()
                    .map(|entry| Value::Object(entry.to_dict()))
                    .collect(),
            ),
        );
        map
    }

    /// Reads a history back; entries beyond capacity are evicted oldest first.
    ///
    /// A missing capacity means [`DEFAULT_MAX_HISTORY`]; any stated capacity
    /// goes through [`UserRadarAggregate::with_max_history`], so 0 keeps one
    /// game. Unknown keys are kept.
    pub fn from_dict(map: &Map<String, Value>) -> Result<Self, RadarDictError> {
        let player_name = read_required_string(map, "player_name")?;
        let max_history = match map.get("max_history") {
            None | Some(Value::Null) => DEFAULT_MAX_HISTORY,
            Some(_) => usize::try_from(read_count(map, "max_history")?).unwrap_or(usize::MAX),
        };
        let mut aggregate = Self::with_max_history(player_name, max_history);
        aggregate.extra = extras(map, |key| HISTORY_KEYS.contains(&key));
        match map.get("entries") {
            None | Some(Value::Null) => {}
            Some(Value::Array(entries)) => {
                for entry in entries {
                    let Value::Object(entry) = entry else {
                        return Err(RadarDictError::NotAnObject {
                            key: "entries".to_owned(),
                        });
                    };
                    aggregate.add_game(RadarHistoryEntry::from_dict(entry)?);
                }
            }
            Some(_) => {
                return Err(RadarDictError::InvalidValue {
                    key: "entries".to_owned(),
                    value: "expected an array".to_owned(),
                });
            }
        }
        Ok(aggregate)
    }
}

/// Radar histories keyed by player name.
///
/// Player names are used verbatim; no case folding or trimming is applied.
#[derive(Debug, Clone)]
pub struct UserAggregateStore {
    max_history: usize,
    aggregates: BTreeMap<String, UserRadarAggregate>,
}

impl Default for UserAggregateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserAggregateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }

    /// Store whose newly created histories keep `max_history` games.
    #[must_use]
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            max_history,
            aggregates: BTreeMap::new(),
        }
    }

    pub fn add_game(
        &mut self,
        player_name: &str,
        entry: RadarHistoryEntry,
    ) -> Option<RadarHistoryEntry> {
        self.get_or_create(player_name).add_game(entry)
    }

    #[must_use]
    pub fn get(&self, player_name: &str) -> Option<&UserRadarAggregate> {
        self.aggregates.get(player_name)
    }

    pub fn get_or_create(&mut self, player_name: &str) -> &mut UserRadarAggregate {
        let max_history = self.max_history;
        self.aggregates
            .entry(player_name.to_owned())
            .or_insert_with(|| UserRadarAggregate::with_max_history(player_name, max_history))
    }

    /// Removes a player's history, returning it if there was one.
    pub fn clear_player(&mut self, player_name: &str) -> Option<UserRadarAggregate> {
        self.aggregates.remove(player_name)
    }

    pub fn clear_all(&mut self) {
        self.aggregates.clear();
    }

    /// Player names in sorted order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.aggregates.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::axis::{PerAxis, RadarAxis, Tier};

    fn opening_radar(opening: f64) -> RadarMetrics {
        RadarMetrics::new(
            PerAxis::from_fn(|axis| (axis == RadarAxis::Opening).then_some(opening)),
            PerAxis::from_fn(|_| 10),
        )
    }

    fn entry(game_id: &str, opening: f64) -> RadarHistoryEntry {
        RadarHistoryEntry::new(game_id, Player::Black, opening_radar(opening))
    }

    fn game_ids(history: &UserRadarAggregate) -> Vec<&str> {
        history.entries().map(|e| e.game_id.as_str()).collect()
    }

    #[test]
    fn test_keeps_last_three_games() {
        // opening scores 0..4; 0 clamps to 1.0, the last three average to 3.0
        let mut history = UserRadarAggregate::with_max_history("alice", 3);
        for (i, score) in [0.0, 1.0, 2.0, 3.0, 4.0].into_iter().enumerate() {
            history.add_game(entry(&format!("g{i}"), score));
        }
        assert_eq!(game_ids(&history), vec!["g2", "g3", "g4"]);
        let aggregate = history.aggregate();
        assert_eq!(aggregate.score(RadarAxis::Opening), Some(3.0));
        assert_eq!(aggregate.tier(RadarAxis::Opening), Tier::Tier3);
        assert_eq!(aggregate.games_count(), 3);
    }

    #[test]
    fn test_add_game_returns_evicted_entry() {
        let mut history = UserRadarAggregate::with_max_history("bob", 2);
        assert!(history.add_game(entry("a", 1.0)).is_none());
        assert!(history.add_game(entry("b", 2.0)).is_none());
        let evicted = history.add_game(entry("c", 3.0)).unwrap();
        assert_eq!(evicted.game_id, "a");
    }

    #[test]
    fn test_eviction_follows_insertion_order_not_game_date() {
        let dated = |id: &str, day: u32| {
            entry(id, 3.0).with_game_date(NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
        };

        let mut in_order = UserRadarAggregate::with_max_history("carol", 2);
        for e in [dated("d1", 1), dated("d2", 2), dated("d3", 3)] {
            in_order.add_game(e);
        }
        assert_eq!(game_ids(&in_order), vec!["d2", "d3"]);

        // the newest game arrives first and is the first to go
        let mut out_of_order = UserRadarAggregate::with_max_history("carol", 2);
        for e in [dated("d3", 3), dated("d1", 1), dated("d2", 2)] {
            out_of_order.add_game(e);
        }
        assert_eq!(game_ids(&out_of_order), vec!["d1", "d2"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = UserRadarAggregate::with_max_history("dave", 0);
        history.add_game(entry("a", 1.0));
        history.add_game(entry("b", 2.0));
        assert_eq!(game_ids(&history), vec!["b"]);
    }

    #[test]
    fn test_clear() {
        let mut history = UserRadarAggregate::new("erin");
        history.add_game(entry("a", 1.0));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.aggregate().score(RadarAxis::Opening), None);
    }

    #[test]
    fn test_dict_round_trip() {
        let added_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let mut history = UserRadarAggregate::with_max_history("frank", 4);
        history.add_game(
            entry("g1", 2.5)
                .with_game_date(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap())
                .with_added_at(added_at),
        );
        history.add_game(entry("g2", 4.25).with_added_at(added_at));

        let dict = history.to_dict();
        assert_eq!(dict["entries"][0]["game_date"], "2024-04-30");
        assert_eq!(dict["entries"][1]["game_date"], Value::Null);
        assert_eq!(dict["entries"][0]["added_at"], "2024-05-01T12:30:00.000000Z");

        let restored = UserRadarAggregate::from_dict(&dict).unwrap();
        assert_eq!(restored, history);
        assert_eq!(restored.to_dict(), dict);
    }

    #[test]
    fn test_from_dict_capacity_matches_constructor() {
        let mut dict = UserRadarAggregate::new("hana").to_dict();
        dict.insert("max_history".to_owned(), Value::from(0));
        let restored = UserRadarAggregate::from_dict(&dict).unwrap();
        assert_eq!(
            restored.max_history(),
            UserRadarAggregate::with_max_history("hana", 0).max_history()
        );

        dict.remove("max_history");
        let restored = UserRadarAggregate::from_dict(&dict).unwrap();
        assert_eq!(restored.max_history(), DEFAULT_MAX_HISTORY);
    }

    #[test]
    fn test_from_dict_keeps_unknown_keys() {
        let mut history = UserRadarAggregate::new("ivan");
        history.add_game(entry("g1", 3.0));
        let mut dict = history.to_dict();
        dict.insert("rating".to_owned(), Value::from("3d"));
        if let Some(Value::Array(entries)) = dict.get_mut("entries") {
            if let Some(Value::Object(first)) = entries.first_mut() {
                first.insert("source".to_owned(), Value::from("upload"));
            }
        }

        let restored = UserRadarAggregate::from_dict(&dict).unwrap();
        assert_eq!(restored.extra().get("rating"), Some(&Value::from("3d")));
        let first = restored.entries().next().unwrap();
        assert_eq!(first.extra.get("source"), Some(&Value::from("upload")));
        assert!(!first.extra.contains_key("game_id"));
        assert_eq!(restored.to_dict(), dict);
    }

    #[test]
    fn test_from_dict_errors() {
        let mut dict = UserRadarAggregate::new("gina").to_dict();
        dict.insert(
            "entries".to_owned(),
            serde_json::json!([{
                "game_id": "g1",
                "player_color": "X",
                "added_at": "2024-01-01T00:00:00Z"
            }]),
        );
        let err = UserRadarAggregate::from_dict(&dict).unwrap_err();
        assert!(
            matches!(err, RadarDictError::InvalidValue { ref key, .. } if key == "player_color")
        );

        dict.remove("player_name");
        let err = UserRadarAggregate::from_dict(&dict).unwrap_err();
        assert_eq!(err, RadarDictError::MissingField { key: "player_name".to_owned() });
    }

    #[test]
    fn test_store_keys_players_verbatim() {
        let mut store = UserAggregateStore::with_max_history(2);
        store.add_game("Alice", entry("a1", 2.0));
        store.add_game("alice", entry("a2", 4.0));
        store.add_game("Alice", entry("a3", 4.0));
        store.add_game("Alice", entry("a4", 4.0));

        assert_eq!(store.players().collect::<Vec<_>>(), vec!["Alice", "alice"]);
        let alice = store.get("Alice").unwrap();
        assert_eq!(alice.max_history(), 2);
        assert_eq!(game_ids(alice), vec!["a3", "a4"]);
        assert_eq!(store.get("alice").unwrap().len(), 1);

        assert!(store.clear_player("alice").is_some());
        assert!(store.get("alice").is_none());
        store.clear_all();
        assert_eq!(store.players().count(), 0);
    }
}
