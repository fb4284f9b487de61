//! Metrics for evaluating fuzzy time series forecasts
//!
//! All metrics work on aligned `actual` / `predicted` sequences where a
//! prediction may be absent. The first position and every absent prediction
//! are left out of scoring: the first position has no predecessor to
//! forecast from.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Pairs `(index, actual, predicted)` that take part in scoring
fn scored_pairs<'a>(
    actual: &'a [f64],
    predicted: &'a [Option<f64>],
) -> impl Iterator<Item = (usize, f64, f64)> + 'a {
    actual
        .iter()
        .zip(predicted.iter())
        .enumerate()
        .skip(1)
        .filter_map(|(index, (&a, p))| p.map(|p| (index, a, p)))
}

fn check_lengths(actual: &[f64], predicted: &[Option<f64>]) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(ForecastError::InvalidInput(format!(
            "Actual length ({}) doesn't match predicted length ({})",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Mean Absolute Percentage Error, in percent.
///
/// `mean(|actual - predicted| / actual) * 100` over positions after the first
/// that carry a prediction. A zero actual value cannot be scored; such points
/// are skipped with a warning.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[Option<f64>]) -> Result<f64> {
    check_lengths(actual, predicted)?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for (index, a, p) in scored_pairs(actual, predicted) {
        if a == 0.0 {
            log::warn!(
                "Skipping position {} in MAPE: actual value is zero",
                index
            );
            continue;
        }
        sum += ((a - p) / a).abs();
        count += 1;
    }

    if count == 0 {
        return Err(ForecastError::InsufficientData(
            "No position with a defined prediction to score".to_string(),
        ));
    }

    Ok(sum / count as f64 * 100.0)
}

/// Mean Absolute Error over the scored positions
pub fn mean_absolute_error(actual: &[f64], predicted: &[Option<f64>]) -> Result<f64> {
    check_lengths(actual, predicted)?;

    let (sum, count) = scored_pairs(actual, predicted)
        .fold((0.0, 0usize), |(sum, count), (_, a, p)| {
            (sum + (a - p).abs(), count + 1)
        });

    if count == 0 {
        return Err(ForecastError::InsufficientData(
            "No position with a defined prediction to score".to_string(),
        ));
    }

    Ok(sum / count as f64)
}

/// Root Mean Squared Error over the scored positions
pub fn root_mean_squared_error(actual: &[f64], predicted: &[Option<f64>]) -> Result<f64> {
    check_lengths(actual, predicted)?;

    let (sum, count) = scored_pairs(actual, predicted)
        .fold((0.0, 0usize), |(sum, count), (_, a, p)| {
            (sum + (a - p).powi(2), count + 1)
        });

    if count == 0 {
        return Err(ForecastError::InsufficientData(
            "No position with a defined prediction to score".to_string(),
        ));
    }

    Ok((sum / count as f64).sqrt())
}

/// Forecast accuracy summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
    /// Positions after the first that carried a prediction, as used by MAE
    /// and RMSE
    pub scored_points: usize,
    /// Scored positions with a non-zero actual, as used by MAPE
    pub mape_points: usize,
}

impl ErrorMetrics {
    /// Evaluate aligned actual and predicted values
    pub fn evaluate(actual: &[f64], predicted: &[Option<f64>]) -> Result<Self> {
        Ok(Self {
            mae: mean_absolute_error(actual, predicted)?,
            rmse: root_mean_squared_error(actual, predicted)?,
            mape: mean_absolute_percentage_error(actual, predicted)?,
            scored_points: scored_pairs(actual, predicted).count(),
            mape_points: scored_pairs(actual, predicted)
                .filter(|&(_, a, _)| a != 0.0)
                .count(),
        })
    }
}

impl std::fmt::Display for ErrorMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Performance Metrics:")?;
        writeln!(f, "  MAE:     {:.4}", self.mae)?;
        writeln!(f, "  RMSE:    {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:    {:.4}%", self.mape)?;
        writeln!(f, "  Points:  {} ({} for MAPE)", self.scored_points, self.mape_points)?;
        Ok(())
    }
}
