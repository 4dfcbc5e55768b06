use std::fmt;

/// Heuristic reason code attached to a record by the analysis collaborator.
///
/// Records carry these as raw strings; codes this crate does not know are
/// ignored rather than rejected, since the collaborator may evolve faster
/// than the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReasonCode {
    Atari,
    LowLiberties,
    NeedConnect,
    CutRisk,
    SelfAtari,
    EndgameHint,
    HeavyLoss,
    ReadingFailure,
    ChaseMode,
    Thin,
    TooManyChoices,
}

impl ReasonCode {
    pub const ALL: [Self; 11] = [
        Self::Atari,
        Self::LowLiberties,
        Self::NeedConnect,
        Self::CutRisk,
        Self::SelfAtari,
        Self::EndgameHint,
        Self::HeavyLoss,
        Self::ReadingFailure,
        Self::ChaseMode,
        Self::Thin,
        Self::TooManyChoices,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atari => "atari",
            Self::LowLiberties => "low_liberties",
            Self::NeedConnect => "need_connect",
            Self::CutRisk => "cut_risk",
            Self::SelfAtari => "self_atari",
            Self::EndgameHint => "endgame_hint",
            Self::HeavyLoss => "heavy_loss",
            Self::ReadingFailure => "reading_failure",
            Self::ChaseMode => "chase_mode",
            Self::Thin => "thin",
            Self::TooManyChoices => "too_many_choices",
        }
    }

    /// Parses a raw code; `None` for codes this crate does not recognize.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized codes from raw strings, in record order, without duplicates.
#[must_use]
pub fn parse_reason_codes<S>(raw: &[S]) -> Vec<ReasonCode>
where
    S: AsRef<str>,
{
    let mut codes = Vec::with_capacity(raw.len());
    for code in raw.iter().filter_map(|s| ReasonCode::from_code(s.as_ref())) {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}
