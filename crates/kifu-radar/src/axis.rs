//! Radar axes, tiers and per-axis storage.

use std::{
    fmt,
    ops::{Index, IndexMut},
};

use kifu_stats::rounding::{SCORE_DECIMALS, round_half_up};
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

// lower bounds (inclusive) of each tier
pub const TIER_5_MIN_SCORE: f64 = 4.5;
pub const TIER_4_MIN_SCORE: f64 = 3.5;
pub const TIER_3_MIN_SCORE: f64 = 2.5;
pub const TIER_2_MIN_SCORE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadarAxis {
    Opening,
    Fighting,
    Endgame,
    Stability,
    Awareness,
}

impl RadarAxis {
    pub const LEN: usize = 5;
    pub const ALL: [Self; Self::LEN] = [
        Self::Opening,
        Self::Fighting,
        Self::Endgame,
        Self::Stability,
        Self::Awareness,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Fighting => "fighting",
            Self::Endgame => "endgame",
            Self::Stability => "stability",
            Self::Awareness => "awareness",
        }
    }

    /// Key of this axis' tier in a canonical mapping.
    #[must_use]
    pub const fn tier_key(self) -> &'static str {
        match self {
            Self::Opening => "opening_tier",
            Self::Fighting => "fighting_tier",
            Self::Endgame => "endgame_tier",
            Self::Stability => "stability_tier",
            Self::Awareness => "awareness_tier",
        }
    }
}

impl fmt::Display for RadarAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered skill band for one axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "tier_1")]
    Tier1,
    #[serde(rename = "tier_2")]
    Tier2,
    #[serde(rename = "tier_3")]
    Tier3,
    #[serde(rename = "tier_4")]
    Tier4,
    #[serde(rename = "tier_5")]
    Tier5,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Tier {
    /// Tier for a score as it is published (rounded to three decimals).
    ///
    /// Rounding is monotone, so a higher score never maps to a lower tier.
    ///
    /// ```
    /// use kifu_radar::axis::Tier;
    ///
    /// assert_eq!(Tier::from_score(Some(4.5)), Tier::Tier5);
    /// assert_eq!(Tier::from_score(Some(4.4996)), Tier::Tier5);
    /// assert_eq!(Tier::from_score(Some(4.4)), Tier::Tier4);
    /// assert_eq!(Tier::from_score(Some(1.0)), Tier::Tier1);
    /// assert_eq!(Tier::from_score(None), Tier::Unknown);
    /// ```
    #[must_use]
    pub fn from_score(score: Option<f64>) -> Self {
        let Some(score) = score.filter(|s| s.is_finite()) else {
            return Self::Unknown;
        };
        let score = round_half_up(score, SCORE_DECIMALS);
        if score >= TIER_5_MIN_SCORE {
            Self::Tier5
        } else if score >= TIER_4_MIN_SCORE {
            Self::Tier4
        } else if score >= TIER_3_MIN_SCORE {
            Self::Tier3
        } else if score >= TIER_2_MIN_SCORE {
            Self::Tier2
        } else {
            Self::Tier1
        }
    }

    /// Level 1-5, or `None` for [`Tier::Unknown`].
    #[must_use]
    pub const fn level(self) -> Option<u8> {
        match self {
            Self::Tier1 => Some(1),
            Self::Tier2 => Some(2),
            Self::Tier3 => Some(3),
            Self::Tier4 => Some(4),
            Self::Tier5 => Some(5),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            1 => Self::Tier1,
            2 => Self::Tier2,
            3 => Self::Tier3,
            4 => Self::Tier4,
            5 => Self::Tier5,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tier1 => "tier_1",
            Self::Tier2 => "tier_2",
            Self::Tier3 => "tier_3",
            Self::Tier4 => "tier_4",
            Self::Tier5 => "tier_5",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [
            Self::Tier1,
            Self::Tier2,
            Self::Tier3,
            Self::Tier4,
            Self::Tier5,
            Self::Unknown,
        ]
        .into_iter()
        .find(|tier| tier.as_str() == name)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Median tier over the known ones.
///
/// With an even number of known tiers, the two middle levels are averaged and
/// rounded down. Returns [`Tier::Unknown`] if no tier is known.
///
/// ```
/// use kifu_radar::axis::{Tier, overall_tier};
///
/// assert_eq!(overall_tier([Tier::Tier1, Tier::Tier4, Tier::Tier5]), Tier::Tier4);
/// assert_eq!(overall_tier([Tier::Tier2, Tier::Tier5, Tier::Unknown]), Tier::Tier3);
/// assert_eq!(overall_tier([Tier::Unknown; 5]), Tier::Unknown);
/// ```
#[must_use]
pub fn overall_tier<I>(tiers: I) -> Tier
where
    I: IntoIterator<Item = Tier>,
{
    let mut levels = tiers.into_iter().filter_map(Tier::level).collect::<Vec<_>>();
    if levels.is_empty() {
        return Tier::Unknown;
    }
    levels.sort_unstable();
    let mid = levels.len() / 2;
    let level = if levels.len() % 2 == 1 {
        levels[mid]
    } else {
        (levels[mid - 1] + levels[mid]) / 2
    };
    Tier::from_level(level)
}

/// One value per [`RadarAxis`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PerAxis<T>([T; RadarAxis::LEN]);

impl<T> PerAxis<T> {
    #[must_use]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(RadarAxis) -> T,
    {
        Self(RadarAxis::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (RadarAxis, &T)> {
        RadarAxis::ALL.into_iter().zip(&self.0)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    #[must_use]
    pub fn map<U, F>(&self, mut f: F) -> PerAxis<U>
    where
        F: FnMut(RadarAxis, &T) -> U,
    {
        PerAxis::from_fn(|axis| f(axis, &self[axis]))
    }
}

impl<T> Index<RadarAxis> for PerAxis<T> {
    type Output = T;

    fn index(&self, axis: RadarAxis) -> &Self::Output {
        &self.0[axis as usize]
    }
}

impl<T> IndexMut<RadarAxis> for PerAxis<T> {
    fn index_mut(&mut self, axis: RadarAxis) -> &mut Self::Output {
        &mut self.0[axis as usize]
    }
}

/// Clamps a score into `[1.0, 5.0]`; non-finite scores become unknown.
#[must_use]
pub fn clamp_score(score: Option<f64>) -> Option<f64> {
    score
        .filter(|s| s.is_finite())
        .map(|s| s.clamp(MIN_SCORE, MAX_SCORE))
}

/// Per-axis tiers plus the overall tier for a set of scores.
#[must_use]
pub fn tiers_for(scores: &PerAxis<Option<f64>>) -> (PerAxis<Tier>, Tier) {
    let tiers = scores.map(|_, score| Tier::from_score(*score));
    let overall = overall_tier(tiers.values().copied());
    (tiers, overall)
}
