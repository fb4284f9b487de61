//! # FTS Forecast
//!
//! Exchange-rate forecasting with Lee's fuzzy time series, where the
//! fuzzification intervals are either laid out with Sturges' rule or tuned by
//! particle swarm optimization.
//!
//! ## Features
//!
//! - CSV loading of daily exchange-rate data
//! - Lee fuzzy time series engine (fuzzification, FLR/FLRG, defuzzification, MAPE)
//! - Fixed-interval baseline with constant padding
//! - Particle swarm search over padding and interval breakpoints
//! - Baseline vs optimized comparison with JSON export
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fts_forecast::comparison::ModelComparison;
//! use fts_forecast::data::DataLoader;
//! use fts_forecast::models::pso::PsoConfig;
//!
//! # fn main() -> fts_forecast::error::Result<()> {
//! // Load data, sorted by date
//! let data = DataLoader::from_csv("kurs.csv")?;
//!
//! // Run the baseline and a reproducible swarm search
//! let config = PsoConfig::default().with_particles(20).with_iterations(50);
//! let comparison = ModelComparison::run_seeded(data.values(), config, 42)?;
//!
//! println!("{}", comparison);
//! # Ok(())
//! # }
//! ```

pub mod comparison;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use crate::comparison::ModelComparison;
pub use crate::data::{CsvColumns, DataLoader, ExchangeRateSeries};
pub use crate::error::ForecastError;
pub use crate::models::fixed_interval::FixedIntervalPlanner;
pub use crate::models::pso::{OptimizationResult, ParticleSwarmOptimizer, PsoConfig, SwarmState};
pub use crate::models::{ForecastResult, FuzzyTimeSeriesEngine};
pub use fts_math::{IntervalSet, SeriesStats};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
