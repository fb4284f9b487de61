//! Side-by-side evaluation of the fixed-interval baseline and the
//! swarm-tuned model on the same series

use crate::error::Result;
use crate::models::fixed_interval::FixedIntervalPlanner;
use crate::models::pso::{OptimizationResult, ParticleSwarmOptimizer, PsoConfig};
use crate::models::ForecastResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::fmt;

/// Baseline and optimized forecasts of one series
#[derive(Debug, Clone, Serialize)]
pub struct ModelComparison {
    /// Forecast over the equal-width intervals
    pub baseline: ForecastResult,
    /// Padding `(z1, z2)` used by the baseline
    pub baseline_padding: (f64, f64),
    /// Swarm search result
    pub optimized: OptimizationResult,
}

impl ModelComparison {
    /// Run both models on `series`
    pub fn run<R: Rng>(
        series: &[f64],
        planner: &FixedIntervalPlanner,
        optimizer: &ParticleSwarmOptimizer,
        rng: &mut R,
    ) -> Result<Self> {
        let baseline = planner.forecast(series)?;
        let optimized = optimizer.optimize(series, rng)?;

        log::info!(
            "Baseline MAPE {:.4}% vs optimized MAPE {:.4}%",
            baseline.mape(),
            optimized.best_score
        );

        Ok(Self {
            baseline,
            baseline_padding: (planner.left_pad(), planner.right_pad()),
            optimized,
        })
    }

    /// Run both models with the default baseline and a seeded swarm
    pub fn run_seeded(series: &[f64], config: PsoConfig, seed: u64) -> Result<Self> {
        let planner = FixedIntervalPlanner::new();
        let optimizer = ParticleSwarmOptimizer::new(config)?;
        let mut rng = StdRng::seed_from_u64(seed);
        Self::run(series, &planner, &optimizer, &mut rng)
    }

    /// Baseline MAPE minus optimized MAPE; positive when the swarm helped
    pub fn improvement(&self) -> f64 {
        self.baseline.mape() - self.optimized.best_score
    }

    /// Serialize the comparison to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn write_intervals(f: &mut fmt::Formatter<'_>, tuples: &[(f64, f64)]) -> fmt::Result {
    for (i, (lower, upper)) in tuples.iter().enumerate() {
        writeln!(f, "    A{:<3} [{:.2}, {:.2}]", i + 1, lower, upper)?;
    }
    Ok(())
}

impl fmt::Display for ModelComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (z1, z2) = self.baseline_padding;
        writeln!(f, "FTS Lee (fixed intervals):")?;
        writeln!(f, "  Z1: {:.2}", z1)?;
        writeln!(f, "  Z2: {:.2}", z2)?;
        writeln!(f, "  Intervals: {}", self.baseline.intervals().len())?;
        write_intervals(f, &self.baseline.intervals().rounded_tuples(2))?;
        writeln!(f, "  MAPE: {:.4}%", self.baseline.mape())?;

        writeln!(f, "FTS Lee + PSO:")?;
        writeln!(f, "  Best Z1: {:.2}", self.optimized.left_pad)?;
        writeln!(f, "  Best Z2: {:.2}", self.optimized.right_pad)?;
        writeln!(f, "  Intervals: {}", self.optimized.interval_count)?;
        write_intervals(f, &self.optimized.intervals.rounded_tuples(2))?;
        writeln!(f, "  MAPE: {:.4}%", self.optimized.best_score)?;

        writeln!(f, "Improvement: {:.4} percentage points", self.improvement())?;
        Ok(())
    }
}
