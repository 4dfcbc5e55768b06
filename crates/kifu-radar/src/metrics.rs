//! Per-game radar computation.

use kifu_core::{EvaluationRecord, MistakeCategory, Player, PositionDifficulty};
use kifu_meaning::classifier::{get_loss_value, get_mistake_category, is_classifiable_move};
use kifu_stats::{descriptive::order_independent_mean, rounding::round_half_up};
use serde_json::{Map, Value};
use tracing::trace;

use crate::axis::{MAX_SCORE, MIN_SCORE, PerAxis, RadarAxis, Tier, clamp_score, tiers_for};

/// Axes backed by fewer moves than this are reported as unknown.
pub const MIN_MOVES_FOR_RADAR: u32 = 10;

/// Last move number (inclusive) of the opening sample.
pub const OPENING_MOVE_LIMIT: u32 = 50;
/// First move number of the endgame sample.
pub const ENDGAME_MOVE_START: u32 = 150;

// mean loss (points) at or above which a loss axis bottoms out
pub const OPENING_WORST_MEAN_LOSS: f64 = 2.0;
pub const FIGHTING_WORST_MEAN_LOSS: f64 = 3.0;
pub const ENDGAME_WORST_MEAN_LOSS: f64 = 1.5;

// rate bands for the ratio axes
pub const STABILITY_FLOOR_RATE: f64 = 0.70;
pub const STABILITY_CEIL_RATE: f64 = 1.0;
pub const AWARENESS_FLOOR_RATE: f64 = 0.20;
pub const AWARENESS_CEIL_RATE: f64 = 0.80;

// decimals kept by the score mappings; far finer than the published precision
const SCORE_EPSILON_DECIMALS: usize = 9;

/// Radar snapshot of one player in one game.
///
/// Scores lie in `[1.0, 5.0]` or are unknown. Tiers and the overall tier are
/// derived from the scores at construction and stay consistent with them.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarMetrics {
    scores: PerAxis<Option<f64>>,
    tiers: PerAxis<Tier>,
    overall_tier: Tier,
    valid_move_counts: PerAxis<u32>,
    extra: Map<String, Value>,
}

impl RadarMetrics {
    /// Builds a snapshot, clamping scores into `[1.0, 5.0]`.
    ///
    /// No sample-size gate is applied here; see [`compute_radar_from_moves`].
    #[must_use]
    pub fn new(scores: PerAxis<Option<f64>>, valid_move_counts: PerAxis<u32>) -> Self {
        let scores = scores.map(|_, score| clamp_score(*score));
        let (tiers, overall_tier) = tiers_for(&scores);
        Self {
            scores,
            tiers,
            overall_tier,
            valid_move_counts,
            extra: Map::new(),
        }
    }

    /// Snapshot with every axis unknown.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(PerAxis::default(), PerAxis::default())
    }

    /// Attaches keys to be carried through serialization untouched.
    #[must_use]
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    #[must_use]
    pub fn score(&self, axis: RadarAxis) -> Option<f64> {
        self.scores[axis]
    }

    #[must_use]
    pub fn scores(&self) -> &PerAxis<Option<f64>> {
        &self.scores
    }

    #[must_use]
    pub fn tier(&self, axis: RadarAxis) -> Tier {
        self.tiers[axis]
    }

    #[must_use]
    pub fn overall_tier(&self) -> Tier {
        self.overall_tier
    }

    #[must_use]
    pub fn valid_move_count(&self, axis: RadarAxis) -> u32 {
        self.valid_move_counts[axis]
    }

    #[must_use]
    pub fn valid_move_counts(&self) -> &PerAxis<u32> {
        &self.valid_move_counts
    }

    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Linear score for a mean loss: 0 maps to 5.0, `worst` and above to 1.0.
fn loss_to_score(mean_loss: f64, worst: f64) -> f64 {
    let ratio = (mean_loss / worst).clamp(0.0, 1.0);
    settle(MAX_SCORE - (MAX_SCORE - MIN_SCORE) * ratio)
}

/// Linear score for a rate: `floor` and below map to 1.0, `ceil` and above to 5.0.
fn rate_to_score(rate: f64, floor: f64, ceil: f64) -> f64 {
    let ratio = ((rate - floor) / (ceil - floor)).clamp(0.0, 1.0);
    settle(MIN_SCORE + (MAX_SCORE - MIN_SCORE) * ratio)
}

/// Snaps float noise (e.g. `2.9999999999999996`) onto the score it stands for.
///
/// Scores are compared against tier breakpoints and the weak-axis threshold,
/// so the internal value must agree with the published one.
fn settle(score: f64) -> f64 {
    round_half_up(score, SCORE_EPSILON_DECIMALS)
}

#[derive(Default)]
struct AxisSample {
    losses: Vec<f64>,
    hits: u32,
    count: u32,
}

impl AxisSample {
    fn push_loss(&mut self, loss: f64) {
        self.losses.push(loss);
        self.count += 1;
    }

    fn push_hit(&mut self, hit: bool) {
        self.hits += u32::from(hit);
        self.count += 1;
    }

    fn mean_loss(&self) -> Option<f64> {
        order_independent_mean(self.losses.iter().copied())
    }

    fn rate(&self) -> Option<f64> {
        (self.count > 0).then(|| f64::from(self.hits) / f64::from(self.count))
    }
}

/// Computes the radar of `player` from one game's evaluation records.
///
/// Records of the other player and passes are ignored. Loss axes skip moves
/// without a loss value, and the ratio axes skip moves with neither a loss
/// value nor a mistake category. An axis with fewer than [`MIN_MOVES_FOR_RADAR`]
/// contributing moves is unknown, but its move count is still reported.
#[must_use]
pub fn compute_radar_from_moves(moves: &[EvaluationRecord], player: Player) -> RadarMetrics {
    let mut samples = PerAxis::<AxisSample>::default();

    for record in moves
        .iter()
        .filter(|record| record.player == player && is_classifiable_move(record))
    {
        if let Some(loss) = get_loss_value(record) {
            if (1..=OPENING_MOVE_LIMIT).contains(&record.move_number) {
                samples[RadarAxis::Opening].push_loss(loss);
            }
            if record.position_difficulty == Some(PositionDifficulty::Hard) {
                samples[RadarAxis::Fighting].push_loss(loss);
            }
            if record.move_number >= ENDGAME_MOVE_START {
                samples[RadarAxis::Endgame].push_loss(loss);
            }
        }
        if let Some(category) = get_mistake_category(record) {
            samples[RadarAxis::Stability].push_hit(!category.is_serious());
            samples[RadarAxis::Awareness].push_hit(category == MistakeCategory::Good);
        }
    }

    let scores = samples.map(|axis, sample| {
        if sample.count < MIN_MOVES_FOR_RADAR {
            trace!(%axis, count = sample.count, "axis below minimum sample");
            return None;
        }
        match axis {
            RadarAxis::Opening => sample
                .mean_loss()
                .map(|loss| loss_to_score(loss, OPENING_WORST_MEAN_LOSS)),
            RadarAxis::Fighting => sample
                .mean_loss()
                .map(|loss| loss_to_score(loss, FIGHTING_WORST_MEAN_LOSS)),
            RadarAxis::Endgame => sample
                .mean_loss()
                .map(|loss| loss_to_score(loss, ENDGAME_WORST_MEAN_LOSS)),
            RadarAxis::Stability => sample
                .rate()
                .map(|rate| rate_to_score(rate, STABILITY_FLOOR_RATE, STABILITY_CEIL_RATE)),
            RadarAxis::Awareness => sample
                .rate()
                .map(|rate| rate_to_score(rate, AWARENESS_FLOOR_RATE, AWARENESS_CEIL_RATE)),
        }
    });
    let counts = samples.map(|_, sample| sample.count);

    RadarMetrics::new(scores, counts)
}
