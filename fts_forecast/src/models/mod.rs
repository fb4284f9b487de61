//! Fuzzy time series models
//!
//! - [`fts`]: Lee's fuzzy time series engine shared by every model
//! - [`fixed_interval`]: equal-width baseline sized by Sturges' rule
//! - [`pso`]: particle swarm search over padding and breakpoints

use crate::error::Result;
use crate::metrics::ErrorMetrics;
use fts_math::IntervalSet;
use serde::Serialize;

pub use fts::{FuzzyLogicalRelationship, FuzzyTimeSeriesEngine, RelationshipGroups};

/// Outcome of one engine run over a series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Observed values
    actual: Vec<f64>,
    /// Predicted values aligned with `actual`; `None` where no prediction exists
    predicted: Vec<Option<f64>>,
    /// Interval set used for fuzzification
    intervals: IntervalSet,
    /// Fuzzy set index assigned to every observation
    states: Vec<usize>,
    /// Relationship groups learned from the series
    groups: RelationshipGroups,
    /// Mean Absolute Percentage Error of the scored positions
    mape: f64,
}

impl ForecastResult {
    pub(crate) fn new(
        actual: Vec<f64>,
        predicted: Vec<Option<f64>>,
        intervals: IntervalSet,
        states: Vec<usize>,
        groups: RelationshipGroups,
        mape: f64,
    ) -> Self {
        Self {
            actual,
            predicted,
            intervals,
            states,
            groups,
            mape,
        }
    }

    /// Observed values
    pub fn actual(&self) -> &[f64] {
        &self.actual
    }

    /// Predicted values, aligned with [`actual`](Self::actual)
    pub fn predicted(&self) -> &[Option<f64>] {
        &self.predicted
    }

    /// Interval set used for fuzzification
    pub fn intervals(&self) -> &IntervalSet {
        &self.intervals
    }

    /// Fuzzy set index of every observation
    pub fn states(&self) -> &[usize] {
        &self.states
    }

    /// Relationship groups learned from the series
    pub fn groups(&self) -> &RelationshipGroups {
        &self.groups
    }

    /// Mean Absolute Percentage Error, in percent
    pub fn mape(&self) -> f64 {
        self.mape
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    /// Check if the result is empty
    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }

    /// MAE, RMSE and MAPE over the scored positions
    pub fn error_metrics(&self) -> Result<ErrorMetrics> {
        ErrorMetrics::evaluate(&self.actual, &self.predicted)
    }

    /// Serialize the result to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub mod fixed_interval;
pub mod fts;
pub mod pso;
