//! # Kurs FTS
//!
//! `kurs_fts` bundles the workspace crates for forecasting daily exchange
//! rates with Lee's fuzzy time series:
//!
//! - [`math`]: series bounds, Sturges' rule and interval partitions
//! - [`forecast`]: the forecasting engine, the fixed-interval baseline and
//!   the particle swarm optimizer
//!
//! ## Example
//!
//! ```
//! use kurs_fts::forecast::models::fixed_interval::FixedIntervalPlanner;
//!
//! let rates = [15_480.0, 15_512.0, 15_497.0, 15_530.0, 15_541.0, 15_526.0];
//! let result = FixedIntervalPlanner::new().forecast(&rates).unwrap();
//!
//! assert_eq!(result.predicted()[0], None);
//! assert!(result.mape() >= 0.0);
//! ```

pub use fts_forecast as forecast;
pub use fts_math as math;

pub use fts_forecast::{
    ForecastError, ForecastResult, FixedIntervalPlanner, FuzzyTimeSeriesEngine, ModelComparison,
    ParticleSwarmOptimizer, PsoConfig,
};
pub use fts_math::{IntervalSet, SeriesStats};
