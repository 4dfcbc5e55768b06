//! Semantic mistake classification for evaluated Go moves.
//!
//! This crate turns one [`EvaluationRecord`](kifu_core::EvaluationRecord) into one
//! [`MeaningTag`](tag::MeaningTag): a label such as `connection_miss` or
//! `endgame_slip` describing *why* a move lost points, together with a
//! cross-reference into an external Go glossary.
//!
//! # Architecture
//!
//! ```text
//! EvaluationRecord + ClassificationContext
//!     ↓ gates (pass, unparseable vertex, missing loss, negligible loss)
//! Signals (loss, reason codes, policy, distance, volatility, phase)
//!     ↓ ordered rule list, first match wins
//! MeaningTagId + debug reason
//!     ↓ registry lookup
//! MeaningTag (with lexicon anchor)
//! ```
//!
//! # Modules
//!
//! - [`tag`] - The immutable [`MeaningTag`](tag::MeaningTag) value and its construction errors
//! - [`registry`] - Static per-tag metadata: labels, descriptions, glossary anchors
//! - [`reason`] - Raw heuristic reason codes supplied by the analysis collaborator
//! - [`thresholds`] - Every numeric cutoff the classifier uses
//! - [`context`] - Situational signals that do not live on the record
//! - [`classifier`] - The rule engine and its public helpers
//!
//! # Example
//!
//! ```
//! use kifu_core::{EvaluationRecord, MeaningTagId, Player};
//! use kifu_meaning::classifier::classify;
//!
//! let record = EvaluationRecord::new(87, Player::White, "K10")
//!     .with_points_lost(4.0)
//!     .with_reason_tags(["need_connect", "low_liberties"]);
//!
//! let tag = classify(&record, None);
//! assert_eq!(tag.id(), MeaningTagId::ConnectionMiss);
//! assert_eq!(tag.debug_reason(), "need_connect_signal");
//! ```

pub mod classifier;
pub mod context;
pub mod reason;
pub mod registry;
pub mod tag;
pub mod thresholds;
