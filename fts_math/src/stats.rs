//! Descriptive bounds of a numeric series
//!
//! Contains:
//! - `SeriesStats` (minimum, maximum, range, length)
//! - Sturges' rule for the suggested number of fuzzy sets

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Sturges' rule coefficient (`3.322 ≈ 1 / log10(2)`)
const STURGES_COEFFICIENT: f64 = 3.322;

/// Descriptive bounds of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Smallest observed value
    pub min: f64,
    /// Largest observed value
    pub max: f64,
    /// `max - min`
    pub range: f64,
    /// Number of observations
    pub len: usize,
    /// Number of fuzzy sets suggested by Sturges' rule
    pub suggested_set_count: usize,
}

impl SeriesStats {
    /// Compute the bounds of a series.
    ///
    /// The series must hold at least two finite values.
    pub fn from_series(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(MathError::InvalidInput("Series is empty".to_string()));
        }
        if values.len() < 2 {
            return Err(MathError::InvalidInput(format!(
                "Series must contain at least 2 values, got {}",
                values.len()
            )));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(MathError::InvalidInput(format!(
                    "Non-finite value {} at index {}",
                    value, index
                )));
            }
            min = min.min(value);
            max = max.max(value);
        }

        Ok(Self {
            min,
            max,
            range: max - min,
            len: values.len(),
            suggested_set_count: sturges_set_count(values.len()),
        })
    }
}

/// Number of classes given by Sturges' rule: `round(1 + 3.322 * log10(n))`.
///
/// Never returns less than one, including for `n < 2`.
pub fn sturges_set_count(n: usize) -> usize {
    if n < 2 {
        return 1;
    }
    let k = (1.0 + STURGES_COEFFICIENT * (n as f64).log10()).round();
    (k as usize).max(1)
}
