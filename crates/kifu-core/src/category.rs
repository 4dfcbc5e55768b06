use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) of the inaccuracy band, in points.
pub const INACCURACY_LOSS: f64 = 2.0;
/// Lower bound (inclusive) of the mistake band, in points.
pub const MISTAKE_LOSS: f64 = 5.0;
/// Lower bound (inclusive) of the blunder band, in points.
pub const BLUNDER_LOSS: f64 = 10.0;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
}

impl Player {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "B",
            Self::White => "W",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid player '{value}', expected B or W")]
pub struct ParsePlayerError {
    value: String,
}

impl FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Self::Black),
            "w" | "white" => Ok(Self::White),
            _ => Err(ParsePlayerError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Coarse mistake band assigned to a move from its point loss.
///
/// Bands are half-open: `[0, 2)` good, `[2, 5)` inaccuracy, `[5, 10)` mistake,
/// `[10, ∞)` blunder.
///
/// ```
/// use kifu_core::MistakeCategory;
///
/// assert_eq!(MistakeCategory::from_loss(0.3), MistakeCategory::Good);
/// assert_eq!(MistakeCategory::from_loss(2.5), MistakeCategory::Inaccuracy);
/// assert_eq!(MistakeCategory::from_loss(6.0), MistakeCategory::Mistake);
/// assert_eq!(MistakeCategory::from_loss(12.0), MistakeCategory::Blunder);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum MistakeCategory {
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl MistakeCategory {
    /// Band for a canonical (non-negative) loss. Negative or NaN losses count as good.
    #[must_use]
    pub fn from_loss(loss: f64) -> Self {
        if loss >= BLUNDER_LOSS {
            Self::Blunder
        } else if loss >= MISTAKE_LOSS {
            Self::Mistake
        } else if loss >= INACCURACY_LOSS {
            Self::Inaccuracy
        } else {
            Self::Good
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Inaccuracy => "inaccuracy",
            Self::Mistake => "mistake",
            Self::Blunder => "blunder",
        }
    }

    /// Mistakes and blunders; the moves the stability axis counts against a player.
    #[must_use]
    pub const fn is_serious(self) -> bool {
        matches!(self, Self::Mistake | Self::Blunder)
    }
}

impl fmt::Display for MistakeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How hard the position was, as judged by the analysis collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum PositionDifficulty {
    Easy,
    Normal,
    Hard,
    OnlyMove,
}
