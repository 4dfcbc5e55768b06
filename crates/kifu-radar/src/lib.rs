//! Five-axis skill radar for Go players.
//!
//! This crate summarizes how a player performed in one game along five
//! independent axes, and rolls those per-game snapshots up into a bounded,
//! per-player history.
//!
//! # Overview
//!
//! ```text
//! EvaluationRecord (one game, one player)
//!     ↓ compute_radar_from_moves
//! RadarMetrics (5 scores in [1.0, 5.0] or unknown, tiers, sample counts)
//!     ↓ UserRadarAggregate::add_game (FIFO, bounded)
//! history of RadarMetrics
//!     ↓ aggregate_radar
//! AggregatedRadarResult (per-axis mean over known snapshots)
//! ```
//!
//! # Axes
//!
//! | axis        | sample                          | measure                               |
//! |-------------|---------------------------------|---------------------------------------|
//! | opening     | moves 1-50                      | mean point loss                       |
//! | fighting    | moves in `hard` positions       | mean point loss                       |
//! | endgame     | moves 150 and later             | mean point loss                       |
//! | stability   | all moves                       | share of moves that are not mistakes  |
//! | awareness   | all moves                       | share of moves rated good             |
//!
//! An axis backed by fewer than [`MIN_MOVES_FOR_RADAR`](metrics::MIN_MOVES_FOR_RADAR)
//! moves is reported as unknown rather than scored.
//!
//! # Serialization
//!
//! Radar values are exchanged as canonical JSON objects (`to_dict` /
//! `from_dict`). Missing keys are filled with defaults, unknown keys survive a
//! round trip, and floats are rounded half-up to three decimals so repeated
//! serialization is byte-identical.
//!
//! # Example
//!
//! ```
//! use kifu_core::{EvaluationRecord, Player};
//! use kifu_radar::{axis::{RadarAxis, Tier}, metrics::compute_radar_from_moves};
//!
//! let moves = (1..=40)
//!     .map(|n| {
//!         let player = if n % 2 == 1 { Player::Black } else { Player::White };
//!         EvaluationRecord::new(n, player, "D4").with_points_lost(0.5)
//!     })
//!     .collect::<Vec<_>>();
//!
//! let radar = compute_radar_from_moves(&moves, Player::Black);
//! assert_eq!(radar.score(RadarAxis::Opening), Some(4.0));
//! assert_eq!(radar.tier(RadarAxis::Endgame), Tier::Unknown);
//! ```

pub mod aggregate;
pub mod axis;
pub mod canonical;
pub mod history;
pub mod metrics;
