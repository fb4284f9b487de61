//! Equal-width baseline partition
//!
//! The number of sets comes from Sturges' rule and the universe of discourse
//! is the series range widened by two constant paddings. Nothing is learned;
//! this is the reference the swarm-tuned model is compared against.

use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, FuzzyTimeSeriesEngine};
use fts_math::{IntervalSet, SeriesStats};

/// Padding applied below the minimum and above the maximum by default
pub const DEFAULT_PADDING: f64 = 50.0;

/// Baseline planner with fixed padding and Sturges' rule set count
#[derive(Debug, Clone)]
pub struct FixedIntervalPlanner {
    /// Distance below the series minimum
    left_pad: f64,
    /// Distance above the series maximum
    right_pad: f64,
    engine: FuzzyTimeSeriesEngine,
}

impl Default for FixedIntervalPlanner {
    fn default() -> Self {
        Self {
            left_pad: DEFAULT_PADDING,
            right_pad: DEFAULT_PADDING,
            engine: FuzzyTimeSeriesEngine::new(),
        }
    }
}

impl FixedIntervalPlanner {
    /// Create a planner with the default padding of 50 on both sides
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a planner with custom padding
    pub fn with_padding(left_pad: f64, right_pad: f64) -> Result<Self> {
        for (name, pad) in [("left", left_pad), ("right", right_pad)] {
            if !pad.is_finite() || pad < 0.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} padding must be a finite non-negative number, got {}",
                    name, pad
                )));
            }
        }

        Ok(Self {
            left_pad,
            right_pad,
            ..Self::default()
        })
    }

    /// Padding below the series minimum
    pub fn left_pad(&self) -> f64 {
        self.left_pad
    }

    /// Padding above the series maximum
    pub fn right_pad(&self) -> f64 {
        self.right_pad
    }

    /// Equal-width intervals over `[min - left_pad, max + right_pad]`
    pub fn plan(&self, series: &[f64]) -> Result<IntervalSet> {
        let stats = SeriesStats::from_series(series)?;
        let set = IntervalSet::equal_width(
            stats.min - self.left_pad,
            stats.max + self.right_pad,
            stats.suggested_set_count,
        )?;
        Ok(set)
    }

    /// Plan the intervals and run the engine over them
    pub fn forecast(&self, series: &[f64]) -> Result<ForecastResult> {
        let intervals = self.plan(series)?;
        let result = self.engine.forecast(series, &intervals)?;

        log::debug!(
            "Fixed-interval baseline: {} sets, padding ({:.2}, {:.2}), MAPE {:.4}%",
            intervals.len(),
            self.left_pad,
            self.right_pad,
            result.mape()
        );

        Ok(result)
    }
}
