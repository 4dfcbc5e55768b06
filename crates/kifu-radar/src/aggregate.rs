//! Multi-game radar aggregation.

use kifu_stats::descriptive::order_independent_mean;
use serde_json::{Map, Value};

use crate::{
    axis::{PerAxis, RadarAxis, Tier, clamp_score, tiers_for},
    metrics::RadarMetrics,
};

/// Per-axis average over several radar snapshots.
///
/// An axis is averaged over the snapshots where it is known; if none are, it
/// stays unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRadarResult {
    scores: PerAxis<Option<f64>>,
    tiers: PerAxis<Tier>,
    overall_tier: Tier,
    contributing_games: PerAxis<u32>,
    valid_move_counts: PerAxis<u32>,
    games_count: u32,
    extra: Map<String, Value>,
}

impl AggregatedRadarResult {
    /// Builds an aggregate from already-averaged scores.
    #[must_use]
    pub fn new(
        scores: PerAxis<Option<f64>>,
        contributing_games: PerAxis<u32>,
        valid_move_counts: PerAxis<u32>,
        games_count: u32,
    ) -> Self {
        let scores = scores.map(|_, score| clamp_score(*score));
        let (tiers, overall_tier) = tiers_for(&scores);
        Self {
            scores,
            tiers,
            overall_tier,
            contributing_games,
            valid_move_counts,
            games_count,
            extra: Map::new(),
        }
    }

    /// Attaches keys to be carried through serialization untouched.
    #[must_use]
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
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

    /// Number of snapshots in which `axis` was known.
    #[must_use]
    pub fn contributing_games(&self, axis: RadarAxis) -> u32 {
        self.contributing_games[axis]
    }

    /// Moves backing `axis`, summed over all snapshots.
    #[must_use]
    pub fn valid_move_count(&self, axis: RadarAxis) -> u32 {
        self.valid_move_counts[axis]
    }

    #[must_use]
    pub(crate) fn contributing_games_per_axis(&self) -> &PerAxis<u32> {
        &self.contributing_games
    }

    #[must_use]
    pub(crate) fn valid_move_counts(&self) -> &PerAxis<u32> {
        &self.valid_move_counts
    }

    #[must_use]
    pub fn games_count(&self) -> u32 {
        self.games_count
    }
}

/// Averages radar snapshots axis by axis.
///
/// Known values are sorted before summing, so the result does not depend on
/// the order of the snapshots.
///
/// ```
/// use kifu_radar::{
///     aggregate::aggregate_radar,
///     axis::{PerAxis, RadarAxis},
///     metrics::RadarMetrics,
/// };
///
/// let snapshot = |opening| {
///     RadarMetrics::new(
///         PerAxis::from_fn(|axis| (axis == RadarAxis::Opening).then_some(opening)),
///         PerAxis::from_fn(|_| 20),
///     )
/// };
/// let result = aggregate_radar(&[snapshot(2.0), snapshot(4.0)]);
/// assert_eq!(result.score(RadarAxis::Opening), Some(3.0));
/// assert_eq!(result.score(RadarAxis::Endgame), None);
/// assert_eq!(result.contributing_games(RadarAxis::Opening), 2);
/// assert_eq!(result.valid_move_count(RadarAxis::Endgame), 40);
/// ```
#[must_use]
pub fn aggregate_radar<'a, I>(snapshots: I) -> AggregatedRadarResult
where
    I: IntoIterator<Item = &'a RadarMetrics>,
{
    let mut known = PerAxis::<Vec<f64>>::default();
    let mut valid_move_counts = PerAxis::<u32>::default();
    let mut games_count = 0_u32;

    for snapshot in snapshots {
        games_count += 1;
        for axis in RadarAxis::ALL {
            if let Some(score) = snapshot.score(axis) {
                known[axis].push(score);
            }
            valid_move_counts[axis] =
                valid_move_counts[axis].saturating_add(snapshot.valid_move_count(axis));
        }
    }

    let scores = known.map(|_, values| order_independent_mean(values.iter().copied()));
    let contributing_games = known.map(|_, values| u32::try_from(values.len()).unwrap_or(u32::MAX));

    AggregatedRadarResult::new(scores, contributing_games, valid_move_counts, games_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_opening(opening: Option<f64>) -> RadarMetrics {
        RadarMetrics::new(
            PerAxis::from_fn(|axis| if axis == RadarAxis::Opening { opening } else { None }),
            PerAxis::from_fn(|_| 10),
        )
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate_radar(&Vec::<RadarMetrics>::new());
        assert_eq!(result.games_count(), 0);
        for axis in RadarAxis::ALL {
            assert_eq!(result.score(axis), None);
            assert_eq!(result.tier(axis), Tier::Unknown);
            assert_eq!(result.contributing_games(axis), 0);
        }
        assert_eq!(result.overall_tier(), Tier::Unknown);
    }

    #[test]
    fn test_unknown_axes_do_not_dilute_mean() {
        let snapshots = [with_opening(Some(4.0)), with_opening(None), with_opening(Some(2.0))];
        let result = aggregate_radar(&snapshots);
        assert_eq!(result.score(RadarAxis::Opening), Some(3.0));
        assert_eq!(result.contributing_games(RadarAxis::Opening), 2);
        assert_eq!(result.games_count(), 3);
        assert_eq!(result.valid_move_count(RadarAxis::Opening), 30);
    }

    #[test]
    fn test_order_independent() {
        let values = [1.1, 4.7, 2.3, 3.9, 1.7, 4.2];
        let forward = values.map(|v| with_opening(Some(v)));
        let mut backward = forward.clone();
        backward.reverse();
        let mut shuffled = forward.clone();
        shuffled.swap(0, 4);
        shuffled.swap(1, 3);

        let expected = aggregate_radar(&forward);
        assert_eq!(aggregate_radar(&backward), expected);
        assert_eq!(aggregate_radar(&shuffled), expected);
    }

    #[test]
    fn test_tiers_follow_aggregated_scores() {
        let result = aggregate_radar(&[with_opening(Some(4.0)), with_opening(Some(5.0))]);
        assert_eq!(result.tier(RadarAxis::Opening), Tier::Tier5);
        assert_eq!(result.overall_tier(), Tier::Tier5);
    }
}
