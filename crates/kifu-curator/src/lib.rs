//! Ranking of candidate training games against a player's weaknesses.
//!
//! A candidate game is worth replaying when its mistakes are the kind the
//! player tends to make, and when its score trajectory is calm enough to
//! follow. The curator turns these two ideas into a 0-100 suitability score.
//!
//! # Components
//!
//! ```text
//! needs_match = Σ count(tag) · weakness(tag) / Σ count(diagnostic tags)
//! stability   = 1 / (1 + σ(score-lead deltas) / 5), blended with reliability
//! total       = 100 · (0.6 · needs_match + 0.4 · stability)
//! ```
//!
//! `weakness(tag)` comes from the player's aggregated radar: every axis scoring
//! below 3.0 weighs the tags characteristic of that axis (see
//! [`suitability::AXIS_TAGS`]). Moves tagged `uncertain` are left out.
//!
//! When a batch is scored, each total is also ranked within the batch as a
//! mid-rank percentile. A game scored alone has no percentile.
//!
//! Published numbers are rounded half-up to three decimals once, after all
//! computation, so output is identical across platforms.
//!
//! The [`replay`] module picks the most instructive moments of a game for
//! coaching views.

pub mod candidate;
pub mod config;
pub mod replay;
pub mod suitability;
