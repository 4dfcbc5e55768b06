use kifu_core::{MeaningTagId, UnknownTagIdError};
use serde::Serialize;

/// Confidence assigned by the rule-based classifier.
pub const RULE_CONFIDENCE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MeaningTagError {
    #[display("{_0}")]
    UnknownTagId(UnknownTagIdError),
    #[display("confidence {confidence} is outside [0.0, 1.0]")]
    #[from(ignore)]
    ConfidenceOutOfRange { confidence: f64 },
}

/// Classification result for one move.
///
/// Immutable once constructed. Construction validates the confidence, so a
/// `MeaningTag` in hand always satisfies `0.0 <= confidence <= 1.0`.
///
/// # Example
///
/// ```
/// use kifu_core::MeaningTagId;
/// use kifu_meaning::tag::MeaningTag;
///
/// let tag =
///     MeaningTag::new(MeaningTagId::Overplay, Some("overplay".into()), 0.8, "manual").unwrap();
/// assert_eq!(tag.confidence(), 0.8);
///
/// assert!(MeaningTag::new(MeaningTagId::Overplay, None, 1.5, "manual").is_err());
/// assert!(MeaningTag::from_id_str("not_a_tag", None, 1.0, "manual").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeaningTag {
    id: MeaningTagId,
    lexicon_anchor_id: Option<String>,
    confidence: f64,
    debug_reason: String,
}

impl MeaningTag {
    pub fn new(
        id: MeaningTagId,
        lexicon_anchor_id: Option<String>,
        confidence: f64,
        debug_reason: impl Into<String>,
    ) -> Result<Self, MeaningTagError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(MeaningTagError::ConfidenceOutOfRange { confidence });
        }
        Ok(Self {
            id,
            lexicon_anchor_id,
            confidence,
            debug_reason: debug_reason.into(),
        })
    }

    /// Like [`MeaningTag::new`], parsing the id from its snake-case string form.
    pub fn from_id_str(
        id: &str,
        lexicon_anchor_id: Option<String>,
        confidence: f64,
        debug_reason: impl Into<String>,
    ) -> Result<Self, MeaningTagError> {
        Self::new(id.parse()?, lexicon_anchor_id, confidence, debug_reason)
    }

    /// Tag produced by a classifier rule, always at full confidence.
    pub(crate) fn from_rule(
        id: MeaningTagId,
        lexicon_anchor_id: Option<&'static str>,
        debug_reason: &str,
    ) -> Self {
        Self {
            id,
            lexicon_anchor_id: lexicon_anchor_id.map(str::to_owned),
            confidence: RULE_CONFIDENCE,
            debug_reason: debug_reason.to_owned(),
        }
    }

    #[must_use]
    pub fn id(&self) -> MeaningTagId {
        self.id
    }

    #[must_use]
    pub fn lexicon_anchor_id(&self) -> Option<&str> {
        self.lexicon_anchor_id.as_deref()
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    #[must_use]
    pub fn debug_reason(&self) -> &str {
        &self.debug_reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_bounds_are_inclusive() {
        assert!(MeaningTag::new(MeaningTagId::Uncertain, None, 0.0, "r").is_ok());
        assert!(MeaningTag::new(MeaningTagId::Uncertain, None, 1.0, "r").is_ok());
    }

    #[test]
    fn test_out_of_range_confidence_fails() {
        for confidence in [-0.01, 1.000_001, f64::NAN, f64::INFINITY] {
            let err = MeaningTag::new(MeaningTagId::Uncertain, None, confidence, "r").unwrap_err();
            assert!(matches!(err, MeaningTagError::ConfidenceOutOfRange { .. }));
        }
    }

    #[test]
    fn test_unknown_id_string_fails() {
        let err = MeaningTag::from_id_str("ladder_breaker", None, 1.0, "r").unwrap_err();
        assert_eq!(err.to_string(), "unknown meaning tag id 'ladder_breaker'");
    }

    #[test]
    fn test_serializes_all_fields() {
        let tag = MeaningTag::from_rule(MeaningTagId::EndgameSlip, Some("yose"), "endgame_window");
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json["id"], "endgame_slip");
        assert_eq!(json["lexicon_anchor_id"], "yose");
        assert_eq!(json["confidence"], 1.0);
        assert_eq!(json["debug_reason"], "endgame_window");
    }
}
