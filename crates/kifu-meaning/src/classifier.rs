//! Rule-based meaning-tag classifier.
//!
//! Classification runs in two stages.
//!
//! # Gates
//!
//! Records that cannot be judged degrade to `uncertain` before any rule runs:
//!
//! | order | condition                                        | debug reason           |
//! |-------|--------------------------------------------------|------------------------|
//! | 1     | pass or resignation                              | `pass_move`            |
//! | 2     | vertex that does not parse                       | `unclassifiable_move`  |
//! | 3     | no loss value on the record                      | `no_loss_data`         |
//! | 4     | loss below `LOSS_THRESHOLD_SMALL`, no reason code | `loss_below_threshold` |
//!
//! # Rules
//!
//! The surviving record is reduced to a set of signals and checked against
//! [`RULES`] from top to bottom. The first rule whose predicate holds decides
//! the tag, and its name becomes the debug reason. The order is part of the
//! contract. Explicit reason codes such as `need_connect` or `self_atari` sit
//! above the generic single-code fallbacks (`atari`, `low_liberties`,
//! `endgame_hint`), and every recognized code has a rule of its own. A record
//! is `uncertain` (`no_distinguishing_signal`) only when it carries no usable
//! signal at all.

use std::{collections::BTreeMap, fmt};

use kifu_core::{Coord, EvaluationRecord, MeaningTagId, MistakeCategory, is_pass_gtp};
use tracing::{debug, trace};

use crate::{
    context::ClassificationContext,
    reason::{ReasonCode, parse_reason_codes},
    registry::resolve_lexicon_anchor,
    tag::MeaningTag,
    thresholds::{
        ACTUAL_MOVE_POLICY_LOW, DISTANCE_CLOSE, DISTANCE_FAR, EARLY_GAME_MOVE_LIMIT,
        ENDGAME_ABSOLUTE_MOVE, ENDGAME_RATIO, LOSS_THRESHOLD_CATASTROPHIC, LOSS_THRESHOLD_CUT_RISK,
        LOSS_THRESHOLD_HUGE, LOSS_THRESHOLD_LARGE, LOSS_THRESHOLD_MEDIUM,
        LOSS_THRESHOLD_SIGNIFICANT, LOSS_THRESHOLD_SMALL, OWNERSHIP_FLUX_LIFE_DEATH, POLICY_LOW,
        POLICY_VERY_LOW, SCORE_STDEV_HIGH, TRAP_ACTUAL_POLICY_MAX, TRAP_BEST_POLICY_MIN,
    },
};

pub const REASON_PASS_MOVE: &str = "pass_move";
pub const REASON_UNCLASSIFIABLE_MOVE: &str = "unclassifiable_move";
pub const REASON_NO_LOSS_DATA: &str = "no_loss_data";
pub const REASON_LOSS_BELOW_THRESHOLD: &str = "loss_below_threshold";
pub const REASON_NO_DISTINGUISHING_SIGNAL: &str = "no_distinguishing_signal";

/// Everything the rules look at, extracted once per classification.
#[derive(Debug)]
struct Signals {
    move_number: u32,
    loss: f64,
    reasons: Vec<ReasonCode>,
    actual_policy: Option<f64>,
    best_policy: Option<f64>,
    distance: Option<f64>,
    ownership_flux: Option<f64>,
    score_stdev: Option<f64>,
    endgame: bool,
}

impl Signals {
    fn new(
        record: &EvaluationRecord,
        context: Option<&ClassificationContext>,
        loss: f64,
        reasons: Vec<ReasonCode>,
    ) -> Self {
        let total_moves = context.and_then(ClassificationContext::total_moves);
        Self {
            move_number: record.move_number,
            loss,
            reasons,
            actual_policy: context.and_then(ClassificationContext::actual_move_policy),
            best_policy: context.and_then(ClassificationContext::best_move_policy),
            distance: context.and_then(ClassificationContext::distance_from_best),
            ownership_flux: context.and_then(ClassificationContext::ownership_flux),
            score_stdev: context.and_then(ClassificationContext::score_stdev),
            endgame: is_endgame(record.move_number, total_moves),
        }
    }

    fn has(&self, code: ReasonCode) -> bool {
        self.reasons.contains(&code)
    }

    fn loss_at_least(&self, threshold: f64) -> bool {
        self.loss >= threshold
    }

    fn distance_at_most(&self, limit: f64) -> bool {
        self.distance.is_some_and(|d| d <= limit)
    }

    fn actual_policy_below(&self, limit: f64) -> bool {
        self.actual_policy.is_some_and(|p| p < limit)
    }
}

/// One entry of the ordered decision list.
pub struct Rule {
    /// Name of the rule, reported as the tag's debug reason
    pub reason: &'static str,
    pub tag: MeaningTagId,
    applies: fn(&Signals) -> bool,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("reason", &self.reason)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// The decision list, highest priority first.
pub static RULES: [Rule; 25] = [
    Rule {
        reason: "ownership_flux_life_death",
        tag: MeaningTagId::LifeDeathError,
        applies: |s| {
            s.ownership_flux.is_some_and(|f| f >= OWNERSHIP_FLUX_LIFE_DEATH)
                && s.loss_at_least(LOSS_THRESHOLD_LARGE)
        },
    },
    Rule {
        reason: "catastrophic_liberty_loss",
        tag: MeaningTagId::LifeDeathError,
        applies: |s| {
            s.loss_at_least(LOSS_THRESHOLD_CATASTROPHIC)
                && (s.has(ReasonCode::Atari) || s.has(ReasonCode::LowLiberties))
        },
    },
    Rule {
        reason: "need_connect_signal",
        tag: MeaningTagId::ConnectionMiss,
        applies: |s| s.has(ReasonCode::NeedConnect),
    },
    Rule {
        reason: "cut_risk_in_fight",
        tag: MeaningTagId::ConnectionMiss,
        applies: |s| s.has(ReasonCode::CutRisk) && s.loss_at_least(LOSS_THRESHOLD_CUT_RISK),
    },
    Rule {
        reason: "liberty_race_lost",
        tag: MeaningTagId::CaptureRaceLoss,
        applies: |s| {
            s.has(ReasonCode::LowLiberties)
                && s.has(ReasonCode::Atari)
                && s.loss_at_least(LOSS_THRESHOLD_SIGNIFICANT)
        },
    },
    Rule {
        reason: "overlooked_forced_response",
        tag: MeaningTagId::ReadingFailure,
        applies: |s| {
            s.best_policy.is_some_and(|p| p >= TRAP_BEST_POLICY_MIN)
                && s.actual_policy.is_some_and(|p| p <= TRAP_ACTUAL_POLICY_MAX)
                && s.loss_at_least(LOSS_THRESHOLD_MEDIUM)
        },
    },
    Rule {
        reason: "low_prior_best_move",
        tag: MeaningTagId::MissedTesuji,
        applies: |s| {
            s.best_policy.is_some_and(|p| p < POLICY_LOW)
                && s.loss_at_least(LOSS_THRESHOLD_SIGNIFICANT)
        },
    },
    Rule {
        reason: "endgame_window",
        tag: MeaningTagId::EndgameSlip,
        applies: |s| s.endgame && !s.loss_at_least(LOSS_THRESHOLD_HUGE),
    },
    Rule {
        reason: "volatile_large_loss",
        tag: MeaningTagId::ReadingFailure,
        applies: |s| {
            s.loss_at_least(LOSS_THRESHOLD_LARGE)
                && s.score_stdev.is_some_and(|v| v >= SCORE_STDEV_HIGH)
        },
    },
    Rule {
        reason: "local_overplay",
        tag: MeaningTagId::Overplay,
        applies: |s| {
            s.loss_at_least(LOSS_THRESHOLD_LARGE)
                && s.distance_at_most(DISTANCE_CLOSE)
                && s.actual_policy_below(POLICY_LOW)
        },
    },
    Rule {
        reason: "far_from_best",
        tag: MeaningTagId::DirectionError,
        applies: |s| {
            s.distance.is_some_and(|d| d >= DISTANCE_FAR)
                && s.loss_at_least(LOSS_THRESHOLD_SIGNIFICANT)
        },
    },
    Rule {
        reason: "negligible_prior_shape",
        tag: MeaningTagId::ShapeMistake,
        applies: |s| {
            s.actual_policy_below(ACTUAL_MOVE_POLICY_LOW)
                && s.distance_at_most(DISTANCE_CLOSE)
                && s.loss_at_least(LOSS_THRESHOLD_MEDIUM)
        },
    },
    Rule {
        reason: "slow_local_move",
        tag: MeaningTagId::SlowMove,
        applies: |s| {
            s.distance_at_most(DISTANCE_CLOSE)
                && s.loss_at_least(LOSS_THRESHOLD_SMALL)
                && !s.loss_at_least(LOSS_THRESHOLD_LARGE)
                && !s.actual_policy_below(POLICY_VERY_LOW)
        },
    },
    Rule {
        reason: "early_game_direction",
        tag: MeaningTagId::DirectionError,
        applies: |s| {
            s.move_number < EARLY_GAME_MOVE_LIMIT
                && s.loss_at_least(LOSS_THRESHOLD_SIGNIFICANT)
                && s.distance.is_none()
        },
    },
    Rule {
        reason: "self_atari_signal",
        tag: MeaningTagId::LifeDeathError,
        applies: |s| s.has(ReasonCode::SelfAtari),
    },
    Rule {
        reason: "reading_failure_signal",
        tag: MeaningTagId::ReadingFailure,
        applies: |s| s.has(ReasonCode::ReadingFailure),
    },
    Rule {
        reason: "cut_risk_signal",
        tag: MeaningTagId::ConnectionMiss,
        applies: |s| s.has(ReasonCode::CutRisk),
    },
    Rule {
        reason: "chase_mode_signal",
        tag: MeaningTagId::Overplay,
        applies: |s| s.has(ReasonCode::ChaseMode),
    },
    Rule {
        reason: "thin_shape_signal",
        tag: MeaningTagId::ShapeMistake,
        applies: |s| s.has(ReasonCode::Thin),
    },
    Rule {
        reason: "too_many_choices_signal",
        tag: MeaningTagId::ReadingFailure,
        applies: |s| s.has(ReasonCode::TooManyChoices),
    },
    Rule {
        reason: "atari_signal",
        tag: MeaningTagId::CaptureRaceLoss,
        applies: |s| s.has(ReasonCode::Atari),
    },
    Rule {
        reason: "low_liberties_signal",
        tag: MeaningTagId::CaptureRaceLoss,
        applies: |s| s.has(ReasonCode::LowLiberties),
    },
    Rule {
        reason: "endgame_hint_signal",
        tag: MeaningTagId::EndgameSlip,
        applies: |s| s.has(ReasonCode::EndgameHint),
    },
    Rule {
        reason: "heavy_loss_signal",
        tag: MeaningTagId::TerritorialLoss,
        applies: |s| s.has(ReasonCode::HeavyLoss),
    },
    Rule {
        reason: "unexplained_large_loss",
        tag: MeaningTagId::TerritorialLoss,
        applies: |s| s.loss_at_least(LOSS_THRESHOLD_LARGE),
    },
];

/// Best available canonical loss on a record, independent of the engine that produced it.
///
/// Checks `score_loss`, then `leela_loss_est`, then `points_lost`; the first
/// finite value wins and is clamped to be non-negative.
///
/// ```
/// use kifu_core::{EvaluationRecord, Player};
/// use kifu_meaning::classifier::get_loss_value;
///
/// let record = EvaluationRecord::new(1, Player::Black, "D4").with_points_lost(2.0);
/// assert_eq!(get_loss_value(&record), Some(2.0));
/// assert_eq!(get_loss_value(&record.with_leela_loss_est(-0.5)), Some(0.0));
/// ```
#[must_use]
pub fn get_loss_value(record: &EvaluationRecord) -> Option<f64> {
    [record.score_loss, record.leela_loss_est, record.points_lost]
        .into_iter()
        .flatten()
        .find(|v| v.is_finite())
        .map(|v| v.max(0.0))
}

/// Mistake band of a record: the collaborator's category, else the band of its loss.
///
/// `None` when the record carries neither, so it says nothing about the move.
#[must_use]
pub fn get_mistake_category(record: &EvaluationRecord) -> Option<MistakeCategory> {
    record
        .mistake_category
        .or_else(|| get_loss_value(record).map(MistakeCategory::from_loss))
}

/// Parses a played vertex, filtering out passes, resignations and malformed input.
#[must_use]
pub fn classify_gtp_move(gtp: &str) -> Option<Coord> {
    if is_pass_gtp(gtp) {
        return None;
    }
    Coord::from_gtp(gtp)
}

#[must_use]
pub fn is_classifiable_move(record: &EvaluationRecord) -> bool {
    classify_gtp_move(&record.gtp).is_some()
}

/// Chebyshev distance between two intersections, as used by the distance rules.
#[must_use]
pub fn compute_move_distance(a: Coord, b: Coord) -> f64 {
    f64::from(a.distance(b))
}

/// Whether a move falls in the endgame window.
///
/// A move is endgame if its number reaches [`ENDGAME_ABSOLUTE_MOVE`], or if the
/// game length is known and the move lies in the last quarter of it
/// ([`ENDGAME_RATIO`]).
///
/// ```
/// use kifu_meaning::classifier::is_endgame;
///
/// assert!(is_endgame(200, None));
/// assert!(is_endgame(90, Some(120)));
/// assert!(!is_endgame(89, Some(120)));
/// assert!(!is_endgame(150, None));
/// ```
#[must_use]
pub fn is_endgame(move_number: u32, total_moves: Option<u32>) -> bool {
    if move_number >= ENDGAME_ABSOLUTE_MOVE {
        return true;
    }
    match total_moves {
        Some(total) if total > 0 => f64::from(move_number) / f64::from(total) >= ENDGAME_RATIO,
        _ => false,
    }
}

/// The decision list in priority order.
#[must_use]
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Classifies one move.
///
/// Never panics; records that cannot be judged get the `uncertain` tag with a
/// debug reason naming the gate that stopped them. The result is a pure
/// function of the record and context.
#[must_use]
pub fn classify(record: &EvaluationRecord, context: Option<&ClassificationContext>) -> MeaningTag {
    let (id, reason, reasons) = select(record, context);
    let tag = MeaningTag::from_rule(id, resolve_lexicon_anchor(id, &reasons), reason);
    trace!(
        move_number = record.move_number,
        player = %record.player,
        tag = %tag.id(),
        reason = tag.debug_reason(),
        "classified move"
    );
    tag
}

fn uncertain(reason: &'static str) -> (MeaningTagId, &'static str, Vec<ReasonCode>) {
    (MeaningTagId::Uncertain, reason, vec![])
}

fn select(
    record: &EvaluationRecord,
    context: Option<&ClassificationContext>,
) -> (MeaningTagId, &'static str, Vec<ReasonCode>) {
    if is_pass_gtp(&record.gtp) {
        return uncertain(REASON_PASS_MOVE);
    }
    if !is_classifiable_move(record) {
        return uncertain(REASON_UNCLASSIFIABLE_MOVE);
    }
    let Some(loss) = get_loss_value(record) else {
        return uncertain(REASON_NO_LOSS_DATA);
    };
    let reasons = parse_reason_codes(&record.reason_tags);
    if loss < LOSS_THRESHOLD_SMALL && reasons.is_empty() {
        return uncertain(REASON_LOSS_BELOW_THRESHOLD);
    }

    let signals = Signals::new(record, context, loss, reasons);
    match RULES.iter().find(|rule| (rule.applies)(&signals)) {
        Some(rule) => (rule.tag, rule.reason, signals.reasons),
        None => uncertain(REASON_NO_DISTINGUISHING_SIGNAL),
    }
}

/// Classifies a move and writes the tag into the record's slot.
///
/// The slot is write-once: if the record already carries a tag it is kept and
/// the freshly computed tag is only returned.
pub fn classify_and_attach(
    record: &mut EvaluationRecord,
    context: Option<&ClassificationContext>,
) -> MeaningTag {
    let tag = classify(record, context);
    if !record.set_meaning_tag(tag.id()) {
        debug!(
            move_number = record.move_number,
            existing = ?record.meaning_tag_id(),
            "meaning tag already attached, keeping existing tag"
        );
    }
    tag
}

/// Classifies every move of one game in place.
///
/// Each move gets a context with the distance derived from its best move and
/// the game length (`total_moves`, or the highest move number if `None`).
pub fn classify_game(
    records: &mut [EvaluationRecord],
    total_moves: Option<u32>,
) -> Vec<MeaningTag> {
    let total_moves = total_moves.or_else(|| records.iter().map(|r| r.move_number).max());
    records
        .iter_mut()
        .map(|record| {
            let mut context = ClassificationContext::for_record(record);
            if let Some(total) = total_moves {
                context = context.with_total_moves(total);
            }
            classify_and_attach(record, Some(&context))
        })
        .collect()
}

/// Occurrences of each attached meaning tag. Untagged records are skipped.
#[must_use]
pub fn tag_distribution(records: &[EvaluationRecord]) -> BTreeMap<MeaningTagId, u32> {
    let mut counts = BTreeMap::new();
    for id in records.iter().filter_map(EvaluationRecord::meaning_tag_id) {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use kifu_core::Player;

    use super::*;

    fn record(loss: f64) -> EvaluationRecord {
        EvaluationRecord::new(100, Player::Black, "K10").with_points_lost(loss)
    }

    fn classify_with(record: &EvaluationRecord, context: &ClassificationContext) -> MeaningTag {
        classify(record, Some(context))
    }

    #[test]
    fn test_need_connect_beats_generic_low_liberties() {
        let record = record(3.0).with_reason_tags(["need_connect", "low_liberties"]);
        let tag = classify(&record, None);
        assert_eq!(tag.id(), MeaningTagId::ConnectionMiss);
        assert_eq!(tag.debug_reason(), "need_connect_signal");
        assert_eq!(tag.lexicon_anchor_id(), Some("connection"));
    }

    #[test]
    fn test_lone_generic_codes_do_not_degrade() {
        let cases = [
            ("atari", MeaningTagId::CaptureRaceLoss, "atari_signal"),
            ("low_liberties", MeaningTagId::CaptureRaceLoss, "low_liberties_signal"),
            ("endgame_hint", MeaningTagId::EndgameSlip, "endgame_hint_signal"),
        ];
        for (code, id, reason) in cases {
            let tag = classify(&record(1.5).with_reason_tags([code]), None);
            assert_eq!(tag.id(), id, "{code}");
            assert_eq!(tag.debug_reason(), reason, "{code}");
        }
    }

    #[test]
    fn test_generic_code_survives_negligible_loss() {
        let tag = classify(&record(0.2).with_reason_tags(["atari"]), None);
        assert_eq!(tag.id(), MeaningTagId::CaptureRaceLoss);
        assert_eq!(tag.lexicon_anchor_id(), Some("atari"));
    }

    #[test]
    fn test_gates() {
        let pass = EvaluationRecord::new(10, Player::White, "pass").with_points_lost(5.0);
        assert_eq!(classify(&pass, None).debug_reason(), REASON_PASS_MOVE);

        let bad = EvaluationRecord::new(10, Player::White, "I9").with_points_lost(5.0);
        assert_eq!(classify(&bad, None).debug_reason(), REASON_UNCLASSIFIABLE_MOVE);

        let no_loss = EvaluationRecord::new(10, Player::White, "D4");
        assert_eq!(classify(&no_loss, None).debug_reason(), REASON_NO_LOSS_DATA);

        let tiny = record(0.3);
        assert_eq!(classify(&tiny, None).debug_reason(), REASON_LOSS_BELOW_THRESHOLD);

        for record in [pass, bad, no_loss, tiny] {
            let tag = classify(&record, None);
            assert_eq!(tag.id(), MeaningTagId::Uncertain);
            assert_eq!(tag.lexicon_anchor_id(), None);
        }
    }

    #[test]
    fn test_unknown_reason_codes_count_as_absent() {
        let tag = classify(&record(0.3).with_reason_tags(["ko_threat"]), None);
        assert_eq!(tag.debug_reason(), REASON_LOSS_BELOW_THRESHOLD);
    }

    #[test]
    fn test_no_distinguishing_signal() {
        let tag = classify(&record(2.0), None);
        assert_eq!(tag.id(), MeaningTagId::Uncertain);
        assert_eq!(tag.debug_reason(), REASON_NO_DISTINGUISHING_SIGNAL);
    }

    #[test]
    fn test_ownership_flux_outranks_explicit_codes() {
        let record = record(6.0).with_reason_tags(["need_connect"]);
        let context = ClassificationContext::new().with_ownership_flux(12.0);
        let tag = classify_with(&record, &context);
        assert_eq!(tag.id(), MeaningTagId::LifeDeathError);
        assert_eq!(tag.debug_reason(), "ownership_flux_life_death");
    }

    #[test]
    fn test_catastrophic_loss_with_liberty_signal() {
        let tag = classify(&record(25.0).with_reason_tags(["low_liberties"]), None);
        assert_eq!(tag.id(), MeaningTagId::LifeDeathError);
        assert_eq!(tag.debug_reason(), "catastrophic_liberty_loss");
    }

    #[test]
    fn test_cut_risk_rank_depends_on_loss() {
        let tag = classify(&record(4.0).with_reason_tags(["cut_risk", "atari"]), None);
        assert_eq!(tag.id(), MeaningTagId::ConnectionMiss);
        assert_eq!(tag.debug_reason(), "cut_risk_in_fight");
        assert_eq!(tag.lexicon_anchor_id(), Some("cutting_point"));

        let tag = classify(&record(3.9).with_reason_tags(["cut_risk"]), None);
        assert_eq!(tag.id(), MeaningTagId::ConnectionMiss);
        assert_eq!(tag.debug_reason(), "cut_risk_signal");
        assert_eq!(tag.lexicon_anchor_id(), Some("cutting_point"));
    }

    #[test]
    fn test_lone_explicit_codes_pick_their_tag() {
        let cases = [
            ("reading_failure", 3.0, MeaningTagId::ReadingFailure, "reading_failure_signal"),
            ("self_atari", 4.0, MeaningTagId::LifeDeathError, "self_atari_signal"),
            ("chase_mode", 4.0, MeaningTagId::Overplay, "chase_mode_signal"),
            ("thin", 3.0, MeaningTagId::ShapeMistake, "thin_shape_signal"),
            ("too_many_choices", 3.0, MeaningTagId::ReadingFailure, "too_many_choices_signal"),
            ("heavy_loss", 3.0, MeaningTagId::TerritorialLoss, "heavy_loss_signal"),
            ("need_connect", 0.2, MeaningTagId::ConnectionMiss, "need_connect_signal"),
        ];
        for (code, loss, id, reason) in cases {
            let tag = classify(&record(loss).with_reason_tags([code]), None);
            assert_eq!(tag.id(), id, "{code}");
            assert_eq!(tag.debug_reason(), reason, "{code}");
        }
    }

    #[test]
    fn test_every_known_code_avoids_uncertain() {
        for code in ReasonCode::ALL {
            let tag = classify(&record(1.5).with_reason_tags([code.as_str()]), None);
            assert!(tag.id().is_diagnostic(), "{code}");
        }
    }

    #[test]
    fn test_explicit_code_anchors() {
        let tag = classify(&record(4.0).with_reason_tags(["self_atari"]), None);
        assert_eq!(tag.lexicon_anchor_id(), Some("self_atari"));
        let tag = classify(&record(4.0).with_reason_tags(["chase_mode"]), None);
        assert_eq!(tag.lexicon_anchor_id(), Some("chasing"));
        let tag = classify(&record(3.0).with_reason_tags(["thin"]), None);
        assert_eq!(tag.lexicon_anchor_id(), Some("thin_shape"));
    }

    #[test]
    fn test_mistake_category_falls_back_to_loss() {
        let bare = EvaluationRecord::new(5, Player::Black, "D4");
        assert_eq!(get_mistake_category(&bare), None);

        let leela = bare.clone().with_leela_loss_est(6.0);
        assert_eq!(get_mistake_category(&leela), Some(MistakeCategory::Mistake));

        let explicit = bare.with_mistake_category(MistakeCategory::Inaccuracy);
        assert_eq!(get_mistake_category(&explicit), Some(MistakeCategory::Inaccuracy));
    }

    #[test]
    fn test_liberty_race() {
        let tag = classify(&record(3.0).with_reason_tags(["atari", "low_liberties"]), None);
        assert_eq!(tag.debug_reason(), "liberty_race_lost");
        assert_eq!(tag.lexicon_anchor_id(), Some("atari"));
    }

    #[test]
    fn test_trap_signature() {
        let context = ClassificationContext::new()
            .with_best_move_policy(0.7)
            .with_actual_move_policy(0.01);
        let tag = classify_with(&record(2.5), &context);
        assert_eq!(tag.id(), MeaningTagId::ReadingFailure);
        assert_eq!(tag.debug_reason(), "overlooked_forced_response");
    }

    #[test]
    fn test_low_prior_best_move_is_tesuji() {
        let context = ClassificationContext::new().with_best_move_policy(0.03);
        let tag = classify_with(&record(3.5), &context);
        assert_eq!(tag.id(), MeaningTagId::MissedTesuji);
    }

    #[test]
    fn test_endgame_window() {
        let late = EvaluationRecord::new(210, Player::White, "A1").with_points_lost(3.0);
        assert_eq!(classify(&late, None).id(), MeaningTagId::EndgameSlip);

        let ratio = EvaluationRecord::new(80, Player::White, "A1").with_points_lost(3.0);
        let context = ClassificationContext::new().with_total_moves(100);
        assert_eq!(classify_with(&ratio, &context).id(), MeaningTagId::EndgameSlip);

        // huge losses late in the game are not mere slips
        let huge = EvaluationRecord::new(210, Player::White, "A1").with_points_lost(12.0);
        assert_eq!(classify(&huge, None).id(), MeaningTagId::TerritorialLoss);
    }

    #[test]
    fn test_volatility_separates_reading_failure_from_overplay() {
        let base = ClassificationContext::new()
            .with_distance_from_best(1.0)
            .with_actual_move_policy(0.02);
        let calm = classify_with(&record(6.0), &base);
        assert_eq!(calm.id(), MeaningTagId::Overplay);

        let volatile = classify_with(&record(6.0), &base.clone().with_score_stdev(9.0));
        assert_eq!(volatile.id(), MeaningTagId::ReadingFailure);
        assert_eq!(volatile.debug_reason(), "volatile_large_loss");
    }

    #[test]
    fn test_distance_rules() {
        let far = ClassificationContext::new().with_distance_from_best(7.0);
        assert_eq!(classify_with(&record(3.0), &far).id(), MeaningTagId::DirectionError);

        let shape = ClassificationContext::new()
            .with_distance_from_best(1.0)
            .with_actual_move_policy(0.001);
        assert_eq!(classify_with(&record(2.5), &shape).id(), MeaningTagId::ShapeMistake);

        let slow = ClassificationContext::new()
            .with_distance_from_best(2.0)
            .with_actual_move_policy(0.2);
        let tag = classify_with(&record(1.5), &slow);
        assert_eq!(tag.id(), MeaningTagId::SlowMove);
        assert_eq!(tag.lexicon_anchor_id(), Some("slow_move"));
    }

    #[test]
    fn test_early_game_direction_without_distance() {
        let early = EvaluationRecord::new(20, Player::Black, "C17").with_points_lost(3.5);
        let tag = classify(&early, None);
        assert_eq!(tag.id(), MeaningTagId::DirectionError);
        assert_eq!(tag.debug_reason(), "early_game_direction");
    }

    #[test]
    fn test_every_rule_tag_is_diagnostic() {
        assert!(rules().iter().all(|rule| rule.tag.is_diagnostic()));
        let mut names = rules().iter().map(|rule| rule.reason).collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let record = record(7.0).with_reason_tags(["cut_risk", "thin"]);
        let context = ClassificationContext::new().with_distance_from_best(3.0);
        let first = classify_with(&record, &context);
        for _ in 0..10 {
            assert_eq!(classify_with(&record, &context), first);
        }
    }

    #[test]
    fn test_loss_source_priority() {
        let record = EvaluationRecord::new(1, Player::Black, "D4")
            .with_points_lost(1.0)
            .with_leela_loss_est(2.0)
            .with_score_loss(3.0);
        assert_eq!(get_loss_value(&record), Some(3.0));

        let mut record = record;
        record.score_loss = Some(f64::NAN);
        assert_eq!(get_loss_value(&record), Some(2.0));
    }

    #[test]
    fn test_classify_and_attach_is_idempotent() {
        let mut record = record(3.0).with_reason_tags(["need_connect"]);
        let first = classify_and_attach(&mut record, None);
        let second = classify_and_attach(&mut record, None);
        assert_eq!(first, second);
        assert_eq!(record.meaning_tag_id(), Some(MeaningTagId::ConnectionMiss));
    }

    #[test]
    fn test_classify_game_and_distribution() {
        let mut records = vec![
            EvaluationRecord::new(1, Player::Black, "Q16").with_points_lost(0.1),
            EvaluationRecord::new(2, Player::White, "D4")
                .with_points_lost(3.0)
                .with_reason_tags(["need_connect"]),
            EvaluationRecord::new(3, Player::Black, "pass"),
            EvaluationRecord::new(4, Player::White, "C3")
                .with_points_lost(3.0)
                .with_reason_tags(["need_connect"]),
        ];
        let tags = classify_game(&mut records, None);
        assert_eq!(tags.len(), 4);

        let distribution = tag_distribution(&records);
        assert_eq!(distribution[&MeaningTagId::ConnectionMiss], 2);
        assert_eq!(distribution[&MeaningTagId::Uncertain], 2);
        assert_eq!(distribution.values().sum::<u32>(), 4);
    }

    #[test]
    fn test_distance_helper() {
        let a = classify_gtp_move("D4").unwrap();
        let b = classify_gtp_move("F7").unwrap();
        assert_eq!(compute_move_distance(a, b), 3.0);
        assert_eq!(classify_gtp_move("pass"), None);
    }
}
