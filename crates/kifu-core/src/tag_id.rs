use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Semantic mistake category attached to a move.
///
/// The set is closed: adding a variant forces every `match` in the classifier,
/// the registry and the curator's weakness table to be revisited.
///
/// ```
/// use kifu_core::MeaningTagId;
///
/// let id: MeaningTagId = "connection_miss".parse().unwrap();
/// assert_eq!(id, MeaningTagId::ConnectionMiss);
/// assert!("sente_gote".parse::<MeaningTagId>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MeaningTagId {
    // tactical
    CaptureRaceLoss,
    LifeDeathError,
    ConnectionMiss,
    ReadingFailure,
    // shape
    ShapeMistake,
    SlowMove,
    // strategic
    DirectionError,
    Overplay,
    MissedTesuji,
    TerritorialLoss,
    // endgame
    EndgameSlip,
    // fallback
    Uncertain,
}

impl MeaningTagId {
    /// Every tag id, in registry order.
    pub const ALL: [Self; 12] = [
        Self::CaptureRaceLoss,
        Self::LifeDeathError,
        Self::ConnectionMiss,
        Self::ReadingFailure,
        Self::ShapeMistake,
        Self::SlowMove,
        Self::DirectionError,
        Self::Overplay,
        Self::MissedTesuji,
        Self::TerritorialLoss,
        Self::EndgameSlip,
        Self::Uncertain,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CaptureRaceLoss => "capture_race_loss",
            Self::LifeDeathError => "life_death_error",
            Self::ConnectionMiss => "connection_miss",
            Self::ReadingFailure => "reading_failure",
            Self::ShapeMistake => "shape_mistake",
            Self::SlowMove => "slow_move",
            Self::DirectionError => "direction_error",
            Self::Overplay => "overplay",
            Self::MissedTesuji => "missed_tesuji",
            Self::TerritorialLoss => "territorial_loss",
            Self::EndgameSlip => "endgame_slip",
            Self::Uncertain => "uncertain",
        }
    }

    /// `false` only for [`MeaningTagId::Uncertain`], which carries no diagnostic signal.
    #[must_use]
    pub const fn is_diagnostic(self) -> bool {
        !matches!(self, Self::Uncertain)
    }
}

impl fmt::Display for MeaningTagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown meaning tag id '{id}'")]
pub struct UnknownTagIdError {
    pub id: String,
}

impl FromStr for MeaningTagId {
    type Err = UnknownTagIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownTagIdError { id: s.to_owned() })
    }
}
