//! Per-move evaluation records.
//!
//! An [`EvaluationRecord`] is the atomic input of the pipeline. It is produced by
//! an external analysis collaborator and deserialized from JSON:
//!
//! ```json
//! {
//!   "move_number": 42,
//!   "player": "B",
//!   "gtp": "D4",
//!   "best_move": "C3",
//!   "score_before": 1.5,
//!   "score_after": -2.0,
//!   "points_lost": 3.5,
//!   "root_visits": 800,
//!   "reason_tags": ["need_connect"],
//!   "mistake_category": "inaccuracy",
//!   "position_difficulty": "hard"
//! }
//! ```
//!
//! Every field except `move_number`, `player` and `gtp` may be omitted.

use serde::{Deserialize, Serialize};

use crate::{MeaningTagId, MistakeCategory, Player, PositionDifficulty};

/// One move's engine-derived metrics.
///
/// Records are read-only for the pipeline with one exception: the meaning-tag
/// slot, which is written at most once through [`EvaluationRecord::set_meaning_tag`].
///
/// # Example
///
/// ```
/// use kifu_core::{EvaluationRecord, MeaningTagId, Player};
///
/// let mut record = EvaluationRecord::new(12, Player::Black, "D4").with_points_lost(3.0);
/// assert!(record.set_meaning_tag(MeaningTagId::SlowMove));
/// assert!(!record.set_meaning_tag(MeaningTagId::Overplay));
/// assert_eq!(record.meaning_tag_id(), Some(MeaningTagId::SlowMove));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// 1-based move number within the game
    pub move_number: u32,
    /// Side that played the move
    pub player: Player,
    /// Played move in GTP notation (`"pass"` for a pass)
    pub gtp: String,
    /// Engine's preferred move in GTP notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_move: Option<String>,
    /// Score lead before the move, from the mover's perspective
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_before: Option<f64>,
    /// Score lead after the move, from the mover's perspective
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_after: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winrate_before: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winrate_after: Option<f64>,
    /// Canonical non-negative point loss
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_lost: Option<f64>,
    /// Score loss reported by a KataGo-style engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_loss: Option<f64>,
    /// Estimated loss reported by a Leela-style engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leela_loss_est: Option<f64>,
    /// Number of search visits backing the evaluation
    #[serde(default)]
    pub root_visits: u32,
    /// Raw heuristic reason codes (e.g. `"need_connect"`, `"atari"`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reason_tags: Vec<String>,
    /// Category assigned by the collaborator; `None` when it judged nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mistake_category: Option<MistakeCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_difficulty: Option<PositionDifficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meaning_tag_id: Option<MeaningTagId>,
}

impl EvaluationRecord {
    /// Creates a record with no evaluation data attached.
    #[must_use]
    pub fn new(move_number: u32, player: Player, gtp: impl Into<String>) -> Self {
        Self {
            move_number,
            player,
            gtp: gtp.into(),
            best_move: None,
            score_before: None,
            score_after: None,
            winrate_before: None,
            winrate_after: None,
            points_lost: None,
            score_loss: None,
            leela_loss_est: None,
            root_visits: 0,
            reason_tags: vec![],
            mistake_category: None,
            position_difficulty: None,
            meaning_tag_id: None,
        }
    }

    #[must_use]
    pub fn with_best_move(mut self, best_move: impl Into<String>) -> Self {
        self.best_move = Some(best_move.into());
        self
    }

    #[must_use]
    pub fn with_scores(mut self, before: f64, after: f64) -> Self {
        self.score_before = Some(before);
        self.score_after = Some(after);
        self
    }

    #[must_use]
    pub fn with_winrates(mut self, before: f64, after: f64) -> Self {
        self.winrate_before = Some(before);
        self.winrate_after = Some(after);
        self
    }

    /// Sets the canonical loss and the mistake category derived from it.
    #[must_use]
    pub fn with_points_lost(mut self, points_lost: f64) -> Self {
        self.points_lost = Some(points_lost);
        self.mistake_category = Some(MistakeCategory::from_loss(points_lost));
        self
    }

    #[must_use]
    pub fn with_score_loss(mut self, score_loss: f64) -> Self {
        self.score_loss = Some(score_loss);
        self
    }

    #[must_use]
    pub fn with_leela_loss_est(mut self, loss: f64) -> Self {
        self.leela_loss_est = Some(loss);
        self
    }

    #[must_use]
    pub fn with_root_visits(mut self, root_visits: u32) -> Self {
        self.root_visits = root_visits;
        self
    }

    #[must_use]
    pub fn with_reason_tags<I, S>(mut self, reason_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reason_tags = reason_tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_mistake_category(mut self, category: MistakeCategory) -> Self {
        self.mistake_category = Some(category);
        self
    }

    #[must_use]
    pub fn with_position_difficulty(mut self, difficulty: PositionDifficulty) -> Self {
        self.position_difficulty = Some(difficulty);
        self
    }

    /// Meaning tag written by the classifier, if any.
    #[must_use]
    pub fn meaning_tag_id(&self) -> Option<MeaningTagId> {
        self.meaning_tag_id
    }

    /// Writes the meaning tag if the slot is still empty.
    ///
    /// Returns `true` if this call wrote the slot. A second write is a no-op
    /// that returns `false`, leaving the first tag in place.
    pub fn set_meaning_tag(&mut self, id: MeaningTagId) -> bool {
        if self.meaning_tag_id.is_some() {
            return false;
        }
        self.meaning_tag_id = Some(id);
        true
    }

    #[must_use]
    pub fn has_reason(&self, code: &str) -> bool {
        self.reason_tags.iter().any(|tag| tag == code)
    }
}
