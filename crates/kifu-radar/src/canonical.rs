//! Canonical JSON mappings for radar values.
//!
//! Scores are rounded half-up to three decimals on the way out. Tiers are
//! never trusted on the way in: they are recomputed from the scores, so a
//! mapping always round-trips to a self-consistent value.

use kifu_stats::rounding::{SCORE_DECIMALS, round_option};
use serde_json::{Map, Number, Value};

use crate::{
    aggregate::AggregatedRadarResult,
    axis::{PerAxis, RadarAxis},
    metrics::RadarMetrics,
};

pub const OVERALL_TIER_KEY: &str = "overall_tier";
pub const VALID_MOVE_COUNTS_KEY: &str = "valid_move_counts";
pub const CONTRIBUTING_GAMES_KEY: &str = "contributing_games";
pub const GAMES_COUNT_KEY: &str = "games_count";

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RadarDictError {
    #[display("missing required field '{key}'")]
    MissingField { key: String },
    #[display("'{key}' must be a number or null")]
    InvalidScore { key: String },
    #[display("'{key}' must be a non-negative integer")]
    InvalidCount { key: String },
    #[display("'{key}' must be an object")]
    NotAnObject { key: String },
    #[display("'{key}' must be a string")]
    NotAString { key: String },
    #[display("'{key}' has invalid value '{value}'")]
    InvalidValue { key: String, value: String },
}

fn is_aggregate_key(key: &str) -> bool {
    is_radar_key(key) || key == CONTRIBUTING_GAMES_KEY || key == GAMES_COUNT_KEY
}

pub(crate) fn extras(map: &Map<String, Value>, known: fn(&str) -> bool) -> Map<String, Value> {
    map.iter()
        .filter(|(key, _)| !known(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn is_radar_key(key: &str) -> bool {
    key == OVERALL_TIER_KEY
        || key == VALID_MOVE_COUNTS_KEY
        || RadarAxis::ALL
            .iter()
            .any(|axis| key == axis.as_str() || key == axis.tier_key())
}

pub(crate) fn score_value(score: Option<f64>) -> Value {
    round_option(score, SCORE_DECIMALS)
        .and_then(Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

pub(crate) fn counts_value(counts: &PerAxis<u32>) -> Value {
    Value::Object(
        counts
            .iter()
            .map(|(axis, count)| (axis.as_str().to_owned(), Value::from(*count)))
            .collect(),
    )
}

pub(crate) fn read_score(
    map: &Map<String, Value>,
    key: &str,
) -> Result<Option<f64>, RadarDictError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(_) => Err(RadarDictError::InvalidScore { key: key.to_owned() }),
    }
}

pub(crate) fn read_count(map: &Map<String, Value>, key: &str) -> Result<u32, RadarDictError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| RadarDictError::InvalidCount { key: key.to_owned() }),
    }
}

pub(crate) fn read_object<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, RadarDictError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(_) => Err(RadarDictError::NotAnObject { key: key.to_owned() }),
    }
}

pub(crate) fn read_required_string<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str, RadarDictError> {
    read_string(map, key)?.ok_or_else(|| RadarDictError::MissingField { key: key.to_owned() })
}

pub(crate) fn read_string<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, RadarDictError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(RadarDictError::NotAString { key: key.to_owned() }),
    }
}

fn read_counts(map: &Map<String, Value>, key: &str) -> Result<PerAxis<u32>, RadarDictError> {
    let mut counts = PerAxis::default();
    if let Some(object) = read_object(map, key)? {
        for axis in RadarAxis::ALL {
            counts[axis] = read_count(object, axis.as_str())?;
        }
    }
    Ok(counts)
}

fn read_scores(map: &Map<String, Value>) -> Result<PerAxis<Option<f64>>, RadarDictError> {
    let mut scores = PerAxis::default();
    for axis in RadarAxis::ALL {
        scores[axis] = read_score(map, axis.as_str())?;
    }
    Ok(scores)
}

fn write_axes(
    map: &mut Map<String, Value>,
    scores: &PerAxis<Option<f64>>,
    tier: impl Fn(RadarAxis) -> &'static str,
) {
    for axis in RadarAxis::ALL {
        map.insert(axis.as_str().to_owned(), score_value(scores[axis]));
        map.insert(axis.tier_key().to_owned(), Value::from(tier(axis)));
    }
}

impl RadarMetrics {
    /// Canonical mapping of this snapshot, including carried-over extra keys.
    ///
    /// ```
    /// use kifu_radar::{axis::{PerAxis, RadarAxis}, metrics::RadarMetrics};
    /// use serde_json::json;
    ///
    /// let radar = RadarMetrics::new(
    ///     PerAxis::from_fn(|axis| (axis == RadarAxis::Opening).then_some(3.14159)),
    ///     PerAxis::from_fn(|_| 12),
    /// );
    /// let dict = radar.to_dict();
    /// assert_eq!(dict["opening"], json!(3.142));
    /// assert_eq!(dict["opening_tier"], json!("tier_3"));
    /// assert_eq!(dict["fighting"], json!(null));
    /// assert_eq!(dict["overall_tier"], json!("tier_3"));
    /// assert_eq!(dict["valid_move_counts"]["endgame"], json!(12));
    /// ```
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = self.extra().clone();
        write_axes(&mut map, self.scores(), |axis| self.tier(axis).as_str());
        map.insert(OVERALL_TIER_KEY.to_owned(), Value::from(self.overall_tier().as_str()));
        map.insert(
            VALID_MOVE_COUNTS_KEY.to_owned(),
            counts_value(self.valid_move_counts()),
        );
        map
    }
}

/// Reads a snapshot from its canonical mapping.
///
/// Missing scores are unknown and missing counts are zero. Tier keys are
/// ignored and recomputed. Keys this crate does not know are kept as extras.
pub fn radar_from_dict(map: &Map<String, Value>) -> Result<RadarMetrics, RadarDictError> {
    let scores = read_scores(map)?;
    let counts = read_counts(map, VALID_MOVE_COUNTS_KEY)?;
    Ok(RadarMetrics::new(scores, counts).with_extra(extras(map, is_radar_key)))
}

impl AggregatedRadarResult {
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = self.extra().clone();
        write_axes(&mut map, self.scores(), |axis| self.tier(axis).as_str());
        map.insert(OVERALL_TIER_KEY.to_owned(), Value::from(self.overall_tier().as_str()));
        map.insert(
            CONTRIBUTING_GAMES_KEY.to_owned(),
            counts_value(self.contributing_games_per_axis()),
        );
        map.insert(
            VALID_MOVE_COUNTS_KEY.to_owned(),
            counts_value(self.valid_move_counts()),
        );
        map.insert(GAMES_COUNT_KEY.to_owned(), Value::from(self.games_count()));
        map
    }
}

/// Reads an aggregate from its canonical mapping.
///
/// Follows the rules of [`radar_from_dict`]: missing values default, tiers
/// are recomputed and unknown keys are kept as extras.
pub fn aggregated_from_dict(
    map: &Map<String, Value>,
) -> Result<AggregatedRadarResult, RadarDictError> {
    let aggregate = AggregatedRadarResult::new(
        read_scores(map)?,
        read_counts(map, CONTRIBUTING_GAMES_KEY)?,
        read_counts(map, VALID_MOVE_COUNTS_KEY)?,
        read_count(map, GAMES_COUNT_KEY)?,
    );
    Ok(aggregate.with_extra(extras(map, is_aggregate_key)))
}
