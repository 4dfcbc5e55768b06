//! Static metadata for every meaning tag.
//!
//! The registry is a compile-time table indexed by [`MeaningTagId`]. It is
//! never mutated; only read accessors are exposed.
//!
//! # Lexicon anchors
//!
//! Each tag may name a default anchor into the external Go glossary. Some
//! (tag, reason code) pairs point to a more specific entry, e.g. a connection
//! miss caused by a cut points to `cutting_point` instead of `connection`.
//! [`resolve_lexicon_anchor`] applies that override table first.

use kifu_core::MeaningTagId;

use crate::reason::ReasonCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ja,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    Tactical,
    Shape,
    Strategic,
    Endgame,
    Fallback,
}

/// Registry entry describing one meaning tag.
#[derive(Debug, Clone, Copy)]
pub struct MeaningTagDefinition {
    pub id: MeaningTagId,
    pub category: TagCategory,
    pub ja_label: &'static str,
    pub en_label: &'static str,
    pub ja_description: &'static str,
    pub en_description: &'static str,
    pub default_lexicon_anchor: Option<&'static str>,
    /// Reason codes that historically co-occur with this tag
    pub related_reason_codes: &'static [ReasonCode],
}

impl MeaningTagDefinition {
    #[must_use]
    pub const fn label(&self, language: Language) -> &'static str {
        match language {
            Language::Ja => self.ja_label,
            Language::En => self.en_label,
        }
    }

    #[must_use]
    pub const fn description(&self, language: Language) -> &'static str {
        match language {
            Language::Ja => self.ja_description,
            Language::En => self.en_description,
        }
    }
}

/// Definitions in [`MeaningTagId::ALL`] order.
static DEFINITIONS: [MeaningTagDefinition; 12] = [
    MeaningTagDefinition {
        id: MeaningTagId::CaptureRaceLoss,
        category: TagCategory::Tactical,
        ja_label: "攻め合い負け",
        en_label: "Lost capturing race",
        ja_description: "手数の読み違いで攻め合いに負けた。",
        en_description: "Miscounted liberties and lost a capturing race.",
        default_lexicon_anchor: Some("semeai"),
        related_reason_codes: &[ReasonCode::Atari, ReasonCode::LowLiberties],
    },
    MeaningTagDefinition {
        id: MeaningTagId::LifeDeathError,
        category: TagCategory::Tactical,
        ja_label: "死活ミス",
        en_label: "Life and death error",
        ja_description: "石の生き死にを誤り、大石が取られた、または取り損ねた。",
        en_description: "Misjudged the life or death of a group.",
        default_lexicon_anchor: Some("life_and_death"),
        related_reason_codes: &[
            ReasonCode::Atari,
            ReasonCode::LowLiberties,
            ReasonCode::SelfAtari,
        ],
    },
    MeaningTagDefinition {
        id: MeaningTagId::ConnectionMiss,
        category: TagCategory::Tactical,
        ja_label: "連絡ミス",
        en_label: "Missed connection",
        ja_description: "継ぐべき所を継がずに石を切り離された。",
        en_description: "Failed to connect and let stones be cut apart.",
        default_lexicon_anchor: Some("connection"),
        related_reason_codes: &[ReasonCode::NeedConnect, ReasonCode::CutRisk, ReasonCode::Thin],
    },
    MeaningTagDefinition {
        id: MeaningTagId::ReadingFailure,
        category: TagCategory::Tactical,
        ja_label: "読み抜け",
        en_label: "Reading failure",
        ja_description: "複雑な局面で相手の手を読み落とした。",
        en_description: "Overlooked a key response in a sharp position.",
        default_lexicon_anchor: Some("reading"),
        related_reason_codes: &[ReasonCode::ReadingFailure, ReasonCode::TooManyChoices],
    },
    MeaningTagDefinition {
        id: MeaningTagId::ShapeMistake,
        category: TagCategory::Shape,
        ja_label: "形の悪さ",
        en_label: "Bad shape",
        ja_description: "効率の悪い形を作った。",
        en_description: "Played an inefficient, ugly shape.",
        default_lexicon_anchor: Some("shape"),
        related_reason_codes: &[ReasonCode::Thin],
    },
    MeaningTagDefinition {
        id: MeaningTagId::SlowMove,
        category: TagCategory::Shape,
        ja_label: "緩着",
        en_label: "Slow move",
        ja_description: "堅すぎる手で、より大きな場所を逃した。",
        en_description: "Overly solid move that let a bigger point go.",
        default_lexicon_anchor: Some("slow_move"),
        related_reason_codes: &[],
    },
    MeaningTagDefinition {
        id: MeaningTagId::DirectionError,
        category: TagCategory::Strategic,
        ja_label: "方向違い",
        en_label: "Wrong direction",
        ja_description: "打つべき方面を誤った。",
        en_description: "Played in the wrong area of the board.",
        default_lexicon_anchor: Some("direction_of_play"),
        related_reason_codes: &[],
    },
    MeaningTagDefinition {
        id: MeaningTagId::Overplay,
        category: TagCategory::Strategic,
        ja_label: "打ち過ぎ",
        en_label: "Overplay",
        ja_description: "無理な手で咎められた。",
        en_description: "Pushed too hard and got punished.",
        default_lexicon_anchor: Some("overplay"),
        related_reason_codes: &[ReasonCode::ChaseMode, ReasonCode::HeavyLoss],
    },
    MeaningTagDefinition {
        id: MeaningTagId::MissedTesuji,
        category: TagCategory::Strategic,
        ja_label: "手筋見逃し",
        en_label: "Missed tesuji",
        ja_description: "見つけにくい好手を見逃した。",
        en_description: "Missed a hard-to-see skillful move.",
        default_lexicon_anchor: Some("tesuji"),
        related_reason_codes: &[],
    },
    MeaningTagDefinition {
        id: MeaningTagId::TerritorialLoss,
        category: TagCategory::Strategic,
        ja_label: "地の損",
        en_label: "Territorial loss",
        ja_description: "はっきりした理由なく地を損した。",
        en_description: "Gave up points without a clearer cause.",
        default_lexicon_anchor: Some("territory"),
        related_reason_codes: &[ReasonCode::HeavyLoss],
    },
    MeaningTagDefinition {
        id: MeaningTagId::EndgameSlip,
        category: TagCategory::Endgame,
        ja_label: "ヨセのミス",
        en_label: "Endgame slip",
        ja_description: "ヨセの大きさや順序を誤った。",
        en_description: "Misjudged the size or order of endgame moves.",
        default_lexicon_anchor: Some("yose"),
        related_reason_codes: &[ReasonCode::EndgameHint],
    },
    MeaningTagDefinition {
        id: MeaningTagId::Uncertain,
        category: TagCategory::Fallback,
        ja_label: "判定保留",
        en_label: "Uncertain",
        ja_description: "分類に十分な情報がない。",
        en_description: "Not enough signal to classify this move.",
        default_lexicon_anchor: None,
        related_reason_codes: &[],
    },
];

/// (tag, reason) pairs that point to a more specific glossary entry.
static REASON_ANCHORS: &[(MeaningTagId, ReasonCode, &str)] = &[
    (MeaningTagId::CaptureRaceLoss, ReasonCode::Atari, "atari"),
    (MeaningTagId::CaptureRaceLoss, ReasonCode::LowLiberties, "liberties"),
    (MeaningTagId::LifeDeathError, ReasonCode::SelfAtari, "self_atari"),
    (MeaningTagId::ConnectionMiss, ReasonCode::CutRisk, "cutting_point"),
    (MeaningTagId::ShapeMistake, ReasonCode::Thin, "thin_shape"),
    (MeaningTagId::Overplay, ReasonCode::ChaseMode, "chasing"),
];

/// Registry entry for `id`.
#[must_use]
pub fn definition(id: MeaningTagId) -> &'static MeaningTagDefinition {
    &DEFINITIONS[id as usize]
}

/// All registry entries, in [`MeaningTagId::ALL`] order.
#[must_use]
pub fn all_definitions() -> &'static [MeaningTagDefinition] {
    &DEFINITIONS
}

/// Glossary anchor for a tag, preferring a reason-specific entry.
///
/// The first reason code (in the given order) with an override for `id` wins;
/// otherwise the tag's default anchor is returned, or `None` if it has none.
///
/// ```
/// use kifu_core::MeaningTagId;
/// use kifu_meaning::{reason::ReasonCode, registry::resolve_lexicon_anchor};
///
/// assert_eq!(resolve_lexicon_anchor(MeaningTagId::ConnectionMiss, &[]), Some("connection"));
/// assert_eq!(
///     resolve_lexicon_anchor(MeaningTagId::ConnectionMiss, &[ReasonCode::CutRisk]),
///     Some("cutting_point"),
/// );
/// assert_eq!(resolve_lexicon_anchor(MeaningTagId::Uncertain, &[ReasonCode::Atari]), None);
/// ```
#[must_use]
pub fn resolve_lexicon_anchor(id: MeaningTagId, reasons: &[ReasonCode]) -> Option<&'static str> {
    reasons
        .iter()
        .find_map(|reason| {
            REASON_ANCHORS
                .iter()
                .find(|(tag, code, _)| *tag == id && code == reason)
                .map(|(_, _, anchor)| *anchor)
        })
        .or(definition(id).default_lexicon_anchor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_are_indexed_by_id() {
        for id in MeaningTagId::ALL {
            assert_eq!(definition(id).id, id);
        }
        assert_eq!(all_definitions().len(), MeaningTagId::ALL.len());
    }

    #[test]
    fn test_every_tag_has_both_languages() {
        for def in all_definitions() {
            for language in [Language::Ja, Language::En] {
                assert!(!def.label(language).is_empty(), "{}", def.id);
                assert!(!def.description(language).is_empty(), "{}", def.id);
            }
        }
    }

    #[test]
    fn test_only_uncertain_lacks_default_anchor() {
        for def in all_definitions() {
            assert_eq!(
                def.default_lexicon_anchor.is_none(),
                def.id == MeaningTagId::Uncertain,
                "{}",
                def.id
            );
        }
    }

    #[test]
    fn test_reason_override_requires_matching_tag() {
        // cut_risk only overrides connection misses
        assert_eq!(
            resolve_lexicon_anchor(MeaningTagId::Overplay, &[ReasonCode::CutRisk]),
            Some("overplay")
        );
    }

    #[test]
    fn test_first_matching_reason_wins() {
        let anchor = resolve_lexicon_anchor(
            MeaningTagId::CaptureRaceLoss,
            &[ReasonCode::LowLiberties, ReasonCode::Atari],
        );
        assert_eq!(anchor, Some("liberties"));
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            definition(MeaningTagId::EndgameSlip).category,
            TagCategory::Endgame
        );
        assert_eq!(
            definition(MeaningTagId::SlowMove).category,
            TagCategory::Shape
        );
    }
}
