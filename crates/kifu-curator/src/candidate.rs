//! Statistics of a candidate game, as consumed by the scorer.

use std::collections::BTreeMap;

use kifu_core::{EvaluationRecord, MeaningTagId, Player};
use kifu_meaning::classifier::{is_classifiable_move, tag_distribution};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Search visits at or above which an evaluation counts as reliable.
pub const RELIABLE_VISITS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliabilityCounts {
    pub reliable_moves: u32,
    pub total_moves: u32,
}

impl ReliabilityCounts {
    /// Share of reliable moves, or `None` if no moves were counted.
    #[must_use]
    pub fn ratio(self) -> Option<f64> {
        (self.total_moves > 0)
            .then(|| (f64::from(self.reliable_moves) / f64::from(self.total_moves)).min(1.0))
    }
}

/// Per-game statistics of a candidate game.
///
/// Tag counts are keyed by tag id string so that mappings written by newer
/// collaborators still load; ids this crate does not know are ignored when
/// scoring.
///
/// ```
/// use kifu_curator::candidate::CandidateGameStats;
///
/// let stats: CandidateGameStats = serde_json::from_str(
///     r#"{ "game_id": "g1", "tag_counts": { "connection_miss": 3, "uncertain": 9 } }"#,
/// )
/// .unwrap();
/// assert_eq!(stats.game_id, "g1");
/// assert!(stats.score_leads.is_empty());
/// assert_eq!(stats.reliability, None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateGameStats {
    pub game_id: String,
    /// Score lead after each move, from Black's perspective
    pub score_leads: Vec<f64>,
    pub tag_counts: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reliability: Option<ReliabilityCounts>,
}

impl CandidateGameStats {
    #[must_use]
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_score_leads(mut self, score_leads: Vec<f64>) -> Self {
        self.score_leads = score_leads;
        self
    }

    #[must_use]
    pub fn with_tag_count(mut self, id: MeaningTagId, count: u32) -> Self {
        self.tag_counts.insert(id.as_str().to_owned(), count);
        self
    }

    #[must_use]
    pub fn with_reliability(mut self, reliable_moves: u32, total_moves: u32) -> Self {
        self.reliability = Some(ReliabilityCounts {
            reliable_moves,
            total_moves,
        });
        self
    }

    /// Counts per known tag id, skipping ids this crate does not recognize.
    #[must_use]
    pub fn known_tag_counts(&self) -> BTreeMap<MeaningTagId, u32> {
        let mut counts = BTreeMap::new();
        for (raw, &count) in &self.tag_counts {
            match raw.parse::<MeaningTagId>() {
                Ok(id) => *counts.entry(id).or_default() += count,
                Err(e) => debug!(game_id = %self.game_id, %e, "ignoring tag count"),
            }
        }
        counts
    }

    /// Builds candidate statistics from a game's evaluation records.
    ///
    /// The score trajectory is taken from `score_after`, turned to Black's
    /// perspective. Tag counts come from tags already attached to the records.
    /// Passes are left out of the reliability counts.
    #[must_use]
    pub fn from_records(game_id: impl Into<String>, records: &[EvaluationRecord]) -> Self {
        let score_leads = records
            .iter()
            .filter_map(|record| {
                let lead = record.score_after.filter(|v| v.is_finite())?;
                Some(match record.player {
                    Player::Black => lead,
                    Player::White => -lead,
                })
            })
            .collect();

        let tag_counts = tag_distribution(records)
            .into_iter()
            .map(|(id, count)| (id.as_str().to_owned(), count))
            .collect();

        let mut reliability = ReliabilityCounts::default();
        for record in records.iter().filter(|r| is_classifiable_move(r)) {
            reliability.total_moves += 1;
            reliability.reliable_moves += u32::from(record.root_visits >= RELIABLE_VISITS);
        }

        Self {
            game_id: game_id.into(),
            score_leads,
            tag_counts,
            reliability: (reliability.total_moves > 0).then_some(reliability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records() {
        let mut records = vec![
            EvaluationRecord::new(1, Player::Black, "D4")
                .with_scores(0.5, 1.0)
                .with_root_visits(400),
            EvaluationRecord::new(2, Player::White, "Q16")
                .with_scores(-1.0, -2.0)
                .with_root_visits(50),
            EvaluationRecord::new(3, Player::Black, "pass").with_root_visits(500),
        ];
        records[0].set_meaning_tag(MeaningTagId::SlowMove);
        records[1].set_meaning_tag(MeaningTagId::SlowMove);

        let stats = CandidateGameStats::from_records("g1", &records);
        assert_eq!(stats.score_leads, vec![1.0, 2.0]);
        assert_eq!(stats.tag_counts.get("slow_move"), Some(&2));
        assert_eq!(
            stats.reliability,
            Some(ReliabilityCounts {
                reliable_moves: 1,
                total_moves: 2
            })
        );
    }

    #[test]
    fn test_unknown_tag_ids_are_ignored() {
        let mut stats = CandidateGameStats::new("g1").with_tag_count(MeaningTagId::Overplay, 2);
        stats.tag_counts.insert("ko_threat".to_owned(), 5);
        let known = stats.known_tag_counts();
        assert_eq!(known.len(), 1);
        assert_eq!(known[&MeaningTagId::Overplay], 2);
    }

    #[test]
    fn test_reliability_ratio() {
        assert_eq!(ReliabilityCounts::default().ratio(), None);
        let counts = ReliabilityCounts {
            reliable_moves: 3,
            total_moves: 4,
        };
        assert_eq!(counts.ratio(), Some(0.75));
    }

    #[test]
    fn test_serde_round_trip_skips_missing_reliability() {
        let stats = CandidateGameStats::new("g2").with_score_leads(vec![0.5, 1.5]);
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("reliability").is_none());
        let back: CandidateGameStats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
