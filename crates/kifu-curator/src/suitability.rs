//! Suitability scoring of candidate games.

use kifu_core::MeaningTagId;
use kifu_radar::{aggregate::AggregatedRadarResult, axis::RadarAxis};
use kifu_stats::{
    descriptive::{DescriptiveStats, deltas},
    percentiles::percentile_rank,
    rounding::{SCORE_DECIMALS, round_half_up, round_option},
};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

use crate::{candidate::CandidateGameStats, config::CuratorConfig};

/// Score distance below the weakness threshold at which an axis weighs fully.
pub const WEAKNESS_SPAN: f64 = 2.0;

/// Raw stability of a game with too short a score trajectory to judge.
pub const NEUTRAL_STABILITY: f64 = 0.5;

/// Tags characteristic of weakness on each radar axis.
pub static AXIS_TAGS: [(RadarAxis, &[MeaningTagId]); RadarAxis::LEN] = [
    (
        RadarAxis::Opening,
        &[
            MeaningTagId::DirectionError,
            MeaningTagId::SlowMove,
            MeaningTagId::ShapeMistake,
        ],
    ),
    (
        RadarAxis::Fighting,
        &[
            MeaningTagId::CaptureRaceLoss,
            MeaningTagId::LifeDeathError,
            MeaningTagId::ReadingFailure,
            MeaningTagId::ConnectionMiss,
        ],
    ),
    (
        RadarAxis::Endgame,
        &[MeaningTagId::EndgameSlip, MeaningTagId::TerritorialLoss],
    ),
    (
        RadarAxis::Stability,
        &[
            MeaningTagId::Overplay,
            MeaningTagId::LifeDeathError,
            MeaningTagId::CaptureRaceLoss,
        ],
    ),
    (
        RadarAxis::Awareness,
        &[
            MeaningTagId::MissedTesuji,
            MeaningTagId::DirectionError,
            MeaningTagId::ConnectionMiss,
        ],
    ),
];

/// Tags characteristic of weakness on `axis`.
#[must_use]
pub fn tags_for_axis(axis: RadarAxis) -> &'static [MeaningTagId] {
    AXIS_TAGS
        .iter()
        .find(|(a, _)| *a == axis)
        .map(|(_, tags)| *tags)
        .unwrap_or_default()
}

/// Weight in `[0, 1]` of each weak axis; known axes at or above the threshold
/// and unknown axes are not weak.
///
/// Scores are compared as published, rounded to three decimals, so an axis
/// shown as `3.000` is never weak under the default threshold.
#[must_use]
pub fn weak_axis_weights(
    user: &AggregatedRadarResult,
    config: &CuratorConfig,
) -> Vec<(RadarAxis, f64)> {
    let threshold = config.weak_axis_threshold;
    RadarAxis::ALL
        .into_iter()
        .filter_map(|axis| {
            let score = round_half_up(user.score(axis)?, SCORE_DECIMALS);
            (score < threshold).then(|| {
                let weight = ((threshold - score) / WEAKNESS_SPAN).clamp(0.0, 1.0);
                (axis, weight)
            })
        })
        .collect()
}

/// How much of the candidate's diagnostic mistakes fall on the player's weak axes.
///
/// Each tag weighs as much as the weakest axis listing it. `uncertain` moves
/// count toward neither side of the ratio. Returns 0 when the player has no
/// weak axis or the game has no diagnostic tag.
#[must_use]
pub fn needs_match(
    user: &AggregatedRadarResult,
    candidate: &CandidateGameStats,
    config: &CuratorConfig,
) -> f64 {
    let weak_axes = weak_axis_weights(user, config);
    if weak_axes.is_empty() {
        return 0.0;
    }

    let mut weighted = 0.0;
    let mut total = 0.0;
    let mut diagnostic_moves = 0_u64;
    for (id, count) in candidate.known_tag_counts() {
        if !id.is_diagnostic() {
            continue;
        }
        diagnostic_moves += u64::from(count);
        total += f64::from(count);
        let weight = weak_axes
            .iter()
            .filter(|(axis, _)| tags_for_axis(*axis).contains(&id))
            .map(|(_, w)| *w)
            .fold(0.0, f64::max);
        weighted += f64::from(count) * weight;
    }

    if diagnostic_moves == 0 {
        return 0.0;
    }
    (weighted / total).clamp(0.0, 1.0)
}

/// Calmness of the candidate's score trajectory, in `[0, 1]`.
///
/// Uses the population standard deviation σ of successive score-lead changes:
/// `1 / (1 + σ / volatility_scale)`. With reliability counts available, that
/// value is blended with the reliable-move ratio.
#[must_use]
pub fn stability(candidate: &CandidateGameStats, config: &CuratorConfig) -> f64 {
    let leads = candidate
        .score_leads
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();

    // fewer than two points leave no deltas
    let raw = match DescriptiveStats::new(deltas(&leads)) {
        Some(stats) => 1.0 / (1.0 + stats.std_dev / config.volatility_scale),
        None => NEUTRAL_STABILITY,
    };

    let blended = match candidate.reliability.and_then(|r| r.ratio()) {
        Some(ratio) => (1.0 - config.reliability_weight) * raw + config.reliability_weight * ratio,
        None => raw,
    };
    blended.clamp(0.0, 1.0)
}

/// Suitability of one candidate game for one player.
///
/// Every number is rounded half-up to three decimals. The percentile is only
/// present when the game was ranked within a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuitabilityScore {
    pub game_id: String,
    pub needs_match: f64,
    pub stability: f64,
    pub total: f64,
    pub percentile: Option<f64>,
}

impl SuitabilityScore {
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let number = |v: f64| Number::from_f64(v).map_or(Value::Null, Value::Number);
        let mut map = Map::new();
        map.insert("game_id".to_owned(), Value::from(self.game_id.clone()));
        map.insert("needs_match".to_owned(), number(self.needs_match));
        map.insert("stability".to_owned(), number(self.stability));
        map.insert("total".to_owned(), number(self.total));
        map.insert(
            "percentile".to_owned(),
            self.percentile.map_or(Value::Null, number),
        );
        map
    }
}

/// Unrounded components of a score.
#[derive(Debug, Clone, Copy)]
struct RawSuitability {
    needs_match: f64,
    stability: f64,
    total: f64,
}

impl RawSuitability {
    fn compute(
        user: &AggregatedRadarResult,
        candidate: &CandidateGameStats,
        config: &CuratorConfig,
    ) -> Self {
        let needs_match = needs_match(user, candidate, config);
        let stability = stability(candidate, config);
        let total = (100.0
            * (config.needs_match_weight * needs_match + config.stability_weight * stability))
            .clamp(0.0, 100.0);
        trace!(game_id = %candidate.game_id, needs_match, stability, total, "suitability");
        Self {
            needs_match,
            stability,
            total,
        }
    }

    fn publish(self, game_id: &str, percentile: Option<f64>) -> SuitabilityScore {
        SuitabilityScore {
            game_id: game_id.to_owned(),
            needs_match: round_half_up(self.needs_match, SCORE_DECIMALS),
            stability: round_half_up(self.stability, SCORE_DECIMALS),
            total: round_half_up(self.total, SCORE_DECIMALS),
            percentile: round_option(percentile, SCORE_DECIMALS),
        }
    }
}

/// Scores one candidate game in isolation; the percentile is `None`.
#[must_use]
pub fn score_game_suitability(
    user: &AggregatedRadarResult,
    candidate: &CandidateGameStats,
    config: &CuratorConfig,
) -> SuitabilityScore {
    RawSuitability::compute(user, candidate, config).publish(&candidate.game_id, None)
}

/// Scores a batch of candidates and ranks each total within the batch.
///
/// Results keep the input order. Percentiles are mid-ranks computed on
/// unrounded totals, so ties share a rank and an all-tie batch sits at 50.
/// A batch of one has no percentile.
///
/// ```
/// use kifu_curator::{
///     candidate::CandidateGameStats, config::CuratorConfig,
///     suitability::score_batch_suitability,
/// };
/// use kifu_radar::{aggregate::aggregate_radar, metrics::RadarMetrics};
///
/// let user = aggregate_radar(&[] as &[RadarMetrics]);
/// let calm = CandidateGameStats::new("calm").with_score_leads(vec![0.0, 0.5, 1.0]);
/// let wild = CandidateGameStats::new("wild").with_score_leads(vec![0.0, 20.0, -15.0]);
///
/// let scores = score_batch_suitability(&user, &[calm, wild], &CuratorConfig::default());
/// assert_eq!(scores[0].percentile, Some(75.0));
/// assert_eq!(scores[1].percentile, Some(25.0));
/// ```
#[must_use]
pub fn score_batch_suitability(
    user: &AggregatedRadarResult,
    candidates: &[CandidateGameStats],
    config: &CuratorConfig,
) -> Vec<SuitabilityScore> {
    let raw = candidates
        .iter()
        .map(|candidate| RawSuitability::compute(user, candidate, config))
        .collect::<Vec<_>>();
    let totals = raw.iter().map(|r| r.total).collect::<Vec<_>>();
    debug!(candidates = candidates.len(), "scored suitability batch");

    candidates
        .iter()
        .zip(raw)
        .map(|(candidate, raw)| {
            raw.publish(&candidate.game_id, percentile_rank(&totals, raw.total))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use kifu_radar::{aggregate::aggregate_radar, axis::PerAxis, metrics::RadarMetrics};

    use super::*;

    fn user_with(scores: &[(RadarAxis, f64)]) -> AggregatedRadarResult {
        let radar = RadarMetrics::new(
            PerAxis::from_fn(|axis| {
                scores
                    .iter()
                    .find(|(a, _)| *a == axis)
                    .map(|(_, score)| *score)
            }),
            PerAxis::default(),
        );
        aggregate_radar([&radar])
    }

    #[test]
    fn test_axis_table_covers_every_axis() {
        for axis in RadarAxis::ALL {
            assert!(!tags_for_axis(axis).is_empty(), "{axis}");
            assert!(!tags_for_axis(axis).contains(&MeaningTagId::Uncertain));
        }
    }

    #[test]
    fn test_weak_axis_weights() {
        let user = user_with(&[
            (RadarAxis::Opening, 1.0),
            (RadarAxis::Fighting, 2.0),
            (RadarAxis::Endgame, 3.0),
        ]);
        let weights = weak_axis_weights(&user, &CuratorConfig::default());
        assert_eq!(
            weights,
            vec![(RadarAxis::Opening, 1.0), (RadarAxis::Fighting, 0.5)]
        );
    }

    #[test]
    fn test_axis_published_at_threshold_is_not_weak() {
        let config = CuratorConfig::default();
        let user = user_with(&[(RadarAxis::Awareness, 2.999_999_999_999_999_6)]);
        assert!(weak_axis_weights(&user, &config).is_empty());

        let user = user_with(&[(RadarAxis::Awareness, 2.9994)]);
        let weights = weak_axis_weights(&user, &config);
        assert_eq!(weights.len(), 1);
        assert!((weights[0].1 - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn test_needs_match_excludes_uncertain() {
        let user = user_with(&[(RadarAxis::Fighting, 1.0)]);
        let candidate = CandidateGameStats::new("g")
            .with_tag_count(MeaningTagId::ConnectionMiss, 3)
            .with_tag_count(MeaningTagId::SlowMove, 1)
            .with_tag_count(MeaningTagId::Uncertain, 100);
        let value = needs_match(&user, &candidate, &CuratorConfig::default());
        assert!((value - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_needs_match_uses_strongest_weak_axis() {
        // connection_miss is listed under both fighting and awareness
        let user = user_with(&[(RadarAxis::Fighting, 2.0), (RadarAxis::Awareness, 1.0)]);
        let candidate =
            CandidateGameStats::new("g").with_tag_count(MeaningTagId::ConnectionMiss, 4);
        assert_eq!(needs_match(&user, &candidate, &CuratorConfig::default()), 1.0);
    }

    #[test]
    fn test_needs_match_is_zero_without_weakness_or_signal() {
        let strong = user_with(&[(RadarAxis::Opening, 4.0)]);
        let candidate = CandidateGameStats::new("g").with_tag_count(MeaningTagId::SlowMove, 5);
        assert_eq!(needs_match(&strong, &candidate, &CuratorConfig::default()), 0.0);

        let weak = user_with(&[(RadarAxis::Opening, 1.0)]);
        let only_uncertain =
            CandidateGameStats::new("g").with_tag_count(MeaningTagId::Uncertain, 5);
        assert_eq!(needs_match(&weak, &only_uncertain, &CuratorConfig::default()), 0.0);
    }

    #[test]
    fn test_stability() {
        let config = CuratorConfig::default();
        let short = CandidateGameStats::new("g").with_score_leads(vec![3.0]);
        assert_eq!(stability(&short, &config), NEUTRAL_STABILITY);

        let flat = CandidateGameStats::new("g").with_score_leads(vec![1.0, 2.0, 3.0]);
        assert_eq!(stability(&flat, &config), 1.0);

        // deltas 5, -5: sigma 5, raw 0.5
        let swingy = CandidateGameStats::new("g").with_score_leads(vec![0.0, 5.0, 0.0]);
        assert!((stability(&swingy, &config) - 0.5).abs() < 1e-12);

        let reliable = swingy.clone().with_reliability(1, 4);
        assert!((stability(&reliable, &config) - (0.8 * 0.5 + 0.2 * 0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_single_game_has_no_percentile() {
        let user = user_with(&[(RadarAxis::Endgame, 1.5)]);
        let candidate = CandidateGameStats::new("solo")
            .with_score_leads(vec![0.0, 1.0])
            .with_tag_count(MeaningTagId::EndgameSlip, 2);
        let config = CuratorConfig::default();

        let score = score_game_suitability(&user, &candidate, &config);
        assert_eq!(score.percentile, None);
        assert_eq!(score.needs_match, 0.75);
        assert_eq!(score.stability, 1.0);
        assert_eq!(score.total, 85.0);

        let batch = score_batch_suitability(&user, &[candidate], &config);
        assert_eq!(batch[0].percentile, None);
    }

    #[test]
    fn test_two_game_batch_ranks_both() {
        let user = user_with(&[(RadarAxis::Endgame, 1.5)]);
        let strong_match = CandidateGameStats::new("a")
            .with_score_leads(vec![0.0, 1.0])
            .with_tag_count(MeaningTagId::EndgameSlip, 2);
        let weak_match = CandidateGameStats::new("b")
            .with_score_leads(vec![0.0, 1.0])
            .with_tag_count(MeaningTagId::SlowMove, 2);
        let scores = score_batch_suitability(
            &user,
            &[weak_match, strong_match],
            &CuratorConfig::default(),
        );
        assert_eq!(scores[0].game_id, "b");
        let (low, high) = (&scores[0], &scores[1]);
        assert!(high.total > low.total);
        assert!(high.percentile.unwrap() >= 50.0);
        assert!(low.percentile.is_some());
    }

    #[test]
    fn test_all_tied_batch_is_fifty() {
        let user = user_with(&[]);
        let games = (0..4)
            .map(|i| CandidateGameStats::new(format!("g{i}")))
            .collect::<Vec<_>>();
        for score in score_batch_suitability(&user, &games, &CuratorConfig::default()) {
            assert_eq!(score.percentile, Some(50.0));
        }
    }

    #[test]
    fn test_published_values_are_rounded() {
        let user = user_with(&[(RadarAxis::Opening, 2.0)]);
        // needs_match 1/3 * 0.5
        let candidate = CandidateGameStats::new("g")
            .with_tag_count(MeaningTagId::SlowMove, 1)
            .with_tag_count(MeaningTagId::Overplay, 2);
        let score = score_game_suitability(&user, &candidate, &CuratorConfig::default());
        assert_eq!(score.needs_match, 0.167);
        let dict = score.to_dict();
        assert_eq!(dict["needs_match"], serde_json::json!(0.167));
        assert_eq!(dict["percentile"], Value::Null);
    }
}
