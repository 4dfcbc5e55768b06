//! Statistical utilities shared by the kifu analysis crates.
//!
//! This crate provides the small set of numeric tools the review pipeline relies on:
//!
//! - **Descriptive statistics**: mean, median, variance and standard deviation
//! - **Percentiles**: mid-rank percentile ranks within a batch
//! - **Rounding**: environment-independent half-up decimal rounding
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile ranks within a batch
//! - [`rounding`]: Half-up rounding applied to every published number
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use kifu_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Ranking a value within a batch
//!
//! ```
//! use kifu_stats::percentiles::percentile_rank;
//!
//! let totals = [10.0, 20.0, 30.0, 40.0];
//! assert_eq!(percentile_rank(&totals, 40.0), Some(87.5));
//! ```
//!
//! ## Rounding for publication
//!
//! ```
//! use kifu_stats::rounding::round_half_up;
//!
//! assert_eq!(round_half_up(2.675, 2), 2.68);
//! assert_eq!(round_half_up(0.125, 2), 0.13);
//! ```

pub mod descriptive;
pub mod percentiles;
pub mod rounding;
