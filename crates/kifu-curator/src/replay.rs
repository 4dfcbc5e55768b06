//! Highlight moments for replaying a game.

use kifu_core::{EvaluationRecord, MeaningTagId, MistakeCategory, Player};
use kifu_meaning::{
    classifier::{get_loss_value, get_mistake_category, is_classifiable_move},
    reason::parse_reason_codes,
    registry::resolve_lexicon_anchor,
};
use kifu_stats::rounding::{SCORE_DECIMALS, round_half_up};
use serde::Serialize;
use serde_json::{Map, Number, Value};

pub const DEFAULT_MAX_HIGHLIGHTS: usize = 5;

/// One instructive mistake in a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightMoment {
    pub move_number: u32,
    pub player: Player,
    pub gtp: String,
    /// Point loss, rounded to three decimals
    pub loss: f64,
    pub category: MistakeCategory,
    pub meaning_tag_id: Option<MeaningTagId>,
    pub lexicon_anchor: Option<&'static str>,
}

impl HighlightMoment {
    fn from_record(record: &EvaluationRecord, category: MistakeCategory, loss: f64) -> Self {
        let meaning_tag_id = record.meaning_tag_id();
        let lexicon_anchor = meaning_tag_id
            .and_then(|id| resolve_lexicon_anchor(id, &parse_reason_codes(&record.reason_tags)));
        Self {
            move_number: record.move_number,
            player: record.player,
            gtp: record.gtp.clone(),
            loss: round_half_up(loss, SCORE_DECIMALS),
            category,
            meaning_tag_id,
            lexicon_anchor,
        }
    }

    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("move_number".to_owned(), Value::from(self.move_number));
        map.insert("player".to_owned(), Value::from(self.player.as_str()));
        map.insert("gtp".to_owned(), Value::from(self.gtp.clone()));
        map.insert(
            "loss".to_owned(),
            Number::from_f64(self.loss).map_or(Value::Null, Value::Number),
        );
        map.insert("category".to_owned(), Value::from(self.category.as_str()));
        map.insert(
            "meaning_tag_id".to_owned(),
            self.meaning_tag_id
                .map_or(Value::Null, |id| Value::from(id.as_str())),
        );
        map.insert(
            "lexicon_anchor".to_owned(),
            self.lexicon_anchor.map_or(Value::Null, Value::from),
        );
        map
    }
}

/// The highlight moments of one game, most severe first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayGuide {
    pub game_id: String,
    pub highlights: Vec<HighlightMoment>,
}

impl ReplayGuide {
    #[must_use]
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("game_id".to_owned(), Value::from(self.game_id.clone()));
        map.insert(
            "highlights".to_owned(),
            Value::Array(
                self.highlights
                    .iter()
                    .map(|h| Value::Object(h.to_dict()))
                    .collect(),
            ),
        );
        map
    }
}

/// Picks at most `max_highlights` instructive mistakes from a game.
///
/// Candidates are played moves rated inaccuracy or worse that carry a loss
/// value; a move without a stated category is rated by its loss. They are
/// ordered by loss, largest first, with ties going to the earlier move.
///
/// ```
/// use kifu_core::{EvaluationRecord, Player};
/// use kifu_curator::replay::extract_replay_guide;
///
/// let records = [
///     EvaluationRecord::new(10, Player::Black, "D4").with_points_lost(6.0),
///     EvaluationRecord::new(11, Player::White, "Q16").with_points_lost(0.5),
///     EvaluationRecord::new(12, Player::Black, "C3").with_points_lost(12.0),
///     EvaluationRecord::new(14, Player::Black, "pass").with_points_lost(30.0),
/// ];
/// let guide = extract_replay_guide("g1", &records, 5);
/// let moves = guide.highlights.iter().map(|h| h.move_number).collect::<Vec<_>>();
/// assert_eq!(moves, vec![12, 10]);
/// ```
#[must_use]
pub fn extract_replay_guide(
    game_id: &str,
    records: &[EvaluationRecord],
    max_highlights: usize,
) -> ReplayGuide {
    let mut candidates = records
        .iter()
        .filter(|record| is_classifiable_move(record))
        .filter_map(|record| {
            let category = get_mistake_category(record)?;
            let loss = get_loss_value(record)?;
            (category >= MistakeCategory::Inaccuracy).then_some((record, category, loss))
        })
        .collect::<Vec<_>>();

    candidates.sort_by(|(a, _, a_loss), (b, _, b_loss)| {
        b_loss
            .total_cmp(a_loss)
            .then_with(|| a.move_number.cmp(&b.move_number))
    });
    candidates.truncate(max_highlights);

    ReplayGuide {
        game_id: game_id.to_owned(),
        highlights: candidates
            .into_iter()
            .map(|(record, category, loss)| HighlightMoment::from_record(record, category, loss))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_go_to_earlier_move() {
        let records = [
            EvaluationRecord::new(30, Player::Black, "D4").with_points_lost(5.0),
            EvaluationRecord::new(20, Player::White, "E5").with_points_lost(5.0),
            EvaluationRecord::new(25, Player::Black, "F6").with_points_lost(7.0),
        ];
        let guide = extract_replay_guide("g", &records, 10);
        let moves = guide
            .highlights
            .iter()
            .map(|h| h.move_number)
            .collect::<Vec<_>>();
        assert_eq!(moves, vec![25, 20, 30]);
    }

    #[test]
    fn test_cap_and_good_moves() {
        let records = (1..=20)
            .map(|n| {
                EvaluationRecord::new(n, Player::Black, "D4").with_points_lost(f64::from(n) / 2.0)
            })
            .collect::<Vec<_>>();
        let guide = extract_replay_guide("g", &records, 3);
        assert_eq!(guide.highlights.len(), 3);
        assert_eq!(guide.highlights[0].move_number, 20);
        assert_eq!(guide.highlights[0].category, MistakeCategory::Blunder);

        let guide = extract_replay_guide("g", &records, 100);
        // losses below 2.0 (moves 1-3) are good moves
        assert_eq!(guide.highlights.len(), 17);
        assert_eq!(extract_replay_guide("g", &records, 0).highlights.len(), 0);
    }

    #[test]
    fn test_highlight_carries_tag_and_anchor() {
        let mut record = EvaluationRecord::new(40, Player::White, "K10")
            .with_points_lost(4.333_33)
            .with_reason_tags(["cut_risk"]);
        record.set_meaning_tag(MeaningTagId::ConnectionMiss);

        let guide = extract_replay_guide("g", &[record], DEFAULT_MAX_HIGHLIGHTS);
        let moment = &guide.highlights[0];
        assert_eq!(moment.loss, 4.333);
        assert_eq!(moment.meaning_tag_id, Some(MeaningTagId::ConnectionMiss));
        assert_eq!(moment.lexicon_anchor, Some("cutting_point"));

        let dict = guide.to_dict();
        assert_eq!(dict["highlights"][0]["lexicon_anchor"], "cutting_point");
        assert_eq!(dict["highlights"][0]["category"], "inaccuracy");
        assert_eq!(dict["highlights"][0]["player"], "W");
    }

    #[test]
    fn test_category_falls_back_to_engine_loss() {
        let records = [
            EvaluationRecord::new(7, Player::Black, "D4").with_score_loss(6.0),
            EvaluationRecord::new(8, Player::White, "Q4").with_score_loss(1.0),
            EvaluationRecord::new(9, Player::Black, "C3"),
        ];
        let guide = extract_replay_guide("g", &records, 5);
        assert_eq!(guide.highlights.len(), 1);
        assert_eq!(guide.highlights[0].move_number, 7);
        assert_eq!(guide.highlights[0].category, MistakeCategory::Mistake);
    }

    #[test]
    fn test_untagged_highlight_has_no_anchor() {
        let record = EvaluationRecord::new(5, Player::Black, "C3").with_points_lost(8.0);
        let guide = extract_replay_guide("g", &[record], 1);
        assert_eq!(guide.highlights[0].meaning_tag_id, None);
        assert_eq!(guide.highlights[0].lexicon_anchor, None);
        assert_eq!(guide.to_dict()["highlights"][0]["meaning_tag_id"], Value::Null);
    }
}
