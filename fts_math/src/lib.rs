//! # FTS Math
//!
//! Numeric building blocks for fuzzy time series forecasting.
//! This crate provides descriptive statistics of a series (including the
//! Sturges' rule set count) and the ordered interval partitions that define
//! fuzzy sets.

use thiserror::Error;

pub mod intervals;
pub mod stats;

pub use intervals::IntervalSet;
pub use stats::{sturges_set_count, SeriesStats};

/// Errors that can occur in series and interval calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for series math operations
pub type Result<T> = std::result::Result<T, MathError>;
