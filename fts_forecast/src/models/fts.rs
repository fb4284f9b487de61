//! Lee's fuzzy time series
//!
//! The engine maps every observation to the first fuzzy set containing it,
//! records the transition from each observation to the next as a fuzzy
//! logical relationship (FLR), groups relationships by their origin (FLRG)
//! and forecasts the value at a position as the mean of the midpoints of
//! every set that followed the position's set anywhere in the series.
//! Repeated outcomes are kept, so frequent transitions weigh more.

use crate::error::{ForecastError, Result};
use crate::metrics::mean_absolute_percentage_error;
use crate::models::ForecastResult;
use fts_math::IntervalSet;
use serde::Serialize;
use std::fmt;

/// Display label of a fuzzy set (`A1`, `A2`, ...)
pub fn set_label(index: usize) -> String {
    format!("A{}", index + 1)
}

/// Assign every value to the first interval that contains it
pub fn fuzzify(series: &[f64], intervals: &IntervalSet) -> Result<Vec<usize>> {
    series
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            intervals
                .locate(value)
                .ok_or(ForecastError::UnclassifiedValue { index, value })
        })
        .collect()
}

/// Observed transition between the fuzzy sets of two consecutive positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FuzzyLogicalRelationship {
    /// Set at position `i`
    pub from: usize,
    /// Set at position `i + 1`
    pub to: usize,
}

impl fmt::Display for FuzzyLogicalRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", set_label(self.from), set_label(self.to))
    }
}

/// Relationships between every pair of consecutive states
pub fn relationships(states: &[usize]) -> Vec<FuzzyLogicalRelationship> {
    states
        .windows(2)
        .map(|pair| FuzzyLogicalRelationship {
            from: pair[0],
            to: pair[1],
        })
        .collect()
}

/// Fuzzy logical relationship groups: for each set, the ordered list of sets
/// observed right after it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RelationshipGroups {
    groups: Vec<Vec<usize>>,
}

impl RelationshipGroups {
    /// Group relationships by origin, keeping occurrence order and duplicates.
    ///
    /// Sets without an outgoing relationship get an empty group.
    pub fn from_relationships(set_count: usize, relationships: &[FuzzyLogicalRelationship]) -> Self {
        let mut groups = vec![Vec::new(); set_count];
        for relationship in relationships {
            let needed = relationship.from.max(relationship.to) + 1;
            if groups.len() < needed {
                groups.resize(needed, Vec::new());
            }
            groups[relationship.from].push(relationship.to);
        }
        Self { groups }
    }

    /// Sets observed after `set`, in occurrence order
    pub fn outcomes(&self, set: usize) -> &[usize] {
        self.groups.get(set).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of sets covered by the groups
    pub fn set_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of `(from, to)` pairs across all groups
    pub fn total_relationships(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Iterate over `(set, outcomes)` for every set
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.groups
            .iter()
            .enumerate()
            .map(|(set, outcomes)| (set, outcomes.as_slice()))
    }
}

impl fmt::Display for RelationshipGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (set, outcomes) in self.iter() {
            if outcomes.is_empty() {
                writeln!(f, "{} -> -", set_label(set))?;
            } else {
                let labels: Vec<String> = outcomes.iter().map(|&o| set_label(o)).collect();
                writeln!(f, "{} -> {}", set_label(set), labels.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Lee defuzzification.
///
/// Position 0 never gets a prediction. Any other position gets the mean of
/// the representatives of its set's outcomes, or `None` if the set was never
/// followed by anything.
pub fn defuzzify(
    states: &[usize],
    groups: &RelationshipGroups,
    representatives: &[f64],
) -> Vec<Option<f64>> {
    states
        .iter()
        .enumerate()
        .map(|(position, &state)| {
            if position == 0 {
                return None;
            }
            let values: Vec<f64> = groups
                .outcomes(state)
                .iter()
                .filter_map(|&outcome| representatives.get(outcome).copied())
                .collect();
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        })
        .collect()
}

/// Stateless Lee fuzzy time series engine
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyTimeSeriesEngine;

impl FuzzyTimeSeriesEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }

    /// Fuzzify, learn relationship groups, defuzzify and score `series`
    /// against `intervals`.
    ///
    /// Fails with [`ForecastError::UnclassifiedValue`] when a value lies
    /// outside the interval set and with [`ForecastError::InsufficientData`]
    /// when no position after the first carries a prediction.
    pub fn forecast(&self, series: &[f64], intervals: &IntervalSet) -> Result<ForecastResult> {
        if series.is_empty() {
            return Err(ForecastError::InvalidInput("Series is empty".to_string()));
        }
        if let Some((index, value)) = series.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ForecastError::InvalidInput(format!(
                "Non-finite value {} at index {}",
                value, index
            )));
        }

        let states = fuzzify(series, intervals)?;
        let groups = RelationshipGroups::from_relationships(intervals.len(), &relationships(&states));
        let representatives = intervals.midpoints();
        let predicted = defuzzify(&states, &groups, &representatives);
        let mape = mean_absolute_percentage_error(series, &predicted)?;

        log::trace!(
            "Forecast over {} sets: {} relationships, MAPE {:.4}%",
            intervals.len(),
            groups.total_relationships(),
            mape
        );

        Ok(ForecastResult::new(
            series.to_vec(),
            predicted,
            intervals.clone(),
            states,
            groups,
            mape,
        ))
    }
}
