//! Shared value objects for the kifu review pipeline.
//!
//! Everything downstream (classification, skill radar, curation) consumes the
//! types defined here:
//!
//! - [`EvaluationRecord`] - one move's engine-derived metrics, produced by an
//!   external analysis collaborator and consumed read-only (apart from the
//!   single meaning-tag slot)
//! - [`MistakeCategory`] / [`PositionDifficulty`] - coarse labels attached to a record
//! - [`MeaningTagId`] - the closed set of semantic mistake categories
//! - [`Coord`] - board coordinates parsed from GTP notation
//!
//! No type in this crate performs I/O; all of them round-trip through `serde`.

pub use self::{category::*, coord::*, record::*, tag_id::*};

pub mod category;
pub mod coord;
pub mod record;
pub mod tag_id;
