//! Ordered interval partitions of the universe of discourse
//!
//! An `IntervalSet` with `m + 1` boundaries defines `m` contiguous fuzzy sets.
//! Set `i` covers `[boundaries[i], boundaries[i + 1]]`, closed on both ends, so
//! a value sitting exactly on a shared boundary belongs to both neighbours;
//! [`IntervalSet::locate`] resolves that by taking the first match in
//! ascending order.

use crate::stats::SeriesStats;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Ordered boundaries of a fuzzy partition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct IntervalSet {
    boundaries: Vec<f64>,
}

impl IntervalSet {
    /// Create an interval set from raw boundaries.
    ///
    /// Boundaries must be finite and non-decreasing, with at least two of them.
    /// Repeated boundaries (zero-width sets) are accepted: clamped swarm
    /// breakpoints can coincide and first-match location keeps them harmless.
    pub fn new(boundaries: Vec<f64>) -> Result<Self> {
        if boundaries.len() < 2 {
            return Err(MathError::InvalidInput(format!(
                "An interval set needs at least 2 boundaries, got {}",
                boundaries.len()
            )));
        }
        if let Some((index, value)) = boundaries
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(MathError::InvalidInput(format!(
                "Non-finite boundary {} at index {}",
                value, index
            )));
        }
        if let Some(index) = boundaries.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(MathError::InvalidInput(format!(
                "Boundaries must be increasing: {} at index {} is followed by {}",
                boundaries[index],
                index,
                boundaries[index + 1]
            )));
        }

        Ok(Self { boundaries })
    }

    /// Partition `[lower, upper]` into `count` sets of equal width.
    pub fn equal_width(lower: f64, upper: f64, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(MathError::InvalidInput(
                "Interval count must be greater than zero".to_string(),
            ));
        }
        if upper < lower {
            return Err(MathError::InvalidInput(format!(
                "Upper bound {} is below lower bound {}",
                upper, lower
            )));
        }

        let width = (upper - lower) / count as f64;
        let mut boundaries: Vec<f64> = (0..count).map(|i| lower + i as f64 * width).collect();
        // Pin the last boundary so the padded maximum is always covered.
        boundaries.push(upper);

        Self::new(boundaries)
    }

    /// Build `[min - left_pad, breakpoints.., max + right_pad]` for a series.
    ///
    /// `breakpoints` must already be sorted ascending.
    pub fn padded(
        stats: &SeriesStats,
        left_pad: f64,
        right_pad: f64,
        breakpoints: &[f64],
    ) -> Result<Self> {
        let mut boundaries = Vec::with_capacity(breakpoints.len() + 2);
        boundaries.push(stats.min - left_pad);
        boundaries.extend_from_slice(breakpoints);
        boundaries.push(stats.max + right_pad);

        Self::new(boundaries)
    }

    /// Rebuild an interval set from `(lower, upper)` pairs.
    ///
    /// Consecutive pairs must share their boundary exactly.
    pub fn from_tuples(tuples: &[(f64, f64)]) -> Result<Self> {
        let (first, rest) = tuples.split_first().ok_or_else(|| {
            MathError::InvalidInput("At least one interval is required".to_string())
        })?;

        let mut boundaries = Vec::with_capacity(tuples.len() + 1);
        boundaries.push(first.0);
        boundaries.push(first.1);
        for (offset, &(lower, upper)) in rest.iter().enumerate() {
            let previous_upper = boundaries[boundaries.len() - 1];
            if lower != previous_upper {
                return Err(MathError::InvalidInput(format!(
                    "Interval {} starts at {} but the previous one ends at {}",
                    offset + 1,
                    lower,
                    previous_upper
                )));
            }
            boundaries.push(upper);
        }

        Self::new(boundaries)
    }

    /// All boundaries in ascending order
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of fuzzy sets
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Always false: a valid set holds at least one interval
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lowest boundary
    pub fn lower(&self) -> f64 {
        self.boundaries[0]
    }

    /// Highest boundary
    pub fn upper(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// Bounds of the set at `index`
    pub fn bounds(&self, index: usize) -> Option<(f64, f64)> {
        if index < self.len() {
            Some((self.boundaries[index], self.boundaries[index + 1]))
        } else {
            None
        }
    }

    /// Iterate over `(lower, upper)` pairs in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.boundaries.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Index of the first set containing `value`, scanning upwards
    pub fn locate(&self, value: f64) -> Option<usize> {
        self.iter()
            .position(|(lower, upper)| lower <= value && value <= upper)
    }

    /// Midpoint of every set, used as its representative value
    pub fn midpoints(&self) -> Vec<f64> {
        self.iter().map(|(lower, upper)| (lower + upper) / 2.0).collect()
    }

    /// Exact `(lower, upper)` pairs
    pub fn interval_tuples(&self) -> Vec<(f64, f64)> {
        self.iter().collect()
    }

    /// `(lower, upper)` pairs rounded for display. Never use these for
    /// classification.
    pub fn rounded_tuples(&self, decimals: u32) -> Vec<(f64, f64)> {
        let factor = 10f64.powi(decimals as i32);
        self.iter()
            .map(|(lower, upper)| {
                (
                    (lower * factor).round() / factor,
                    (upper * factor).round() / factor,
                )
            })
            .collect()
    }
}

impl TryFrom<Vec<f64>> for IntervalSet {
    type Error = MathError;

    fn try_from(boundaries: Vec<f64>) -> Result<Self> {
        Self::new(boundaries)
    }
}

impl From<IntervalSet> for Vec<f64> {
    fn from(set: IntervalSet) -> Self {
        set.boundaries
    }
}
