//! Particle swarm search over fuzzy interval boundaries
//!
//! A particle encodes `[z1, z2, b_1, .., b_{k-1}]`: the padding below the
//! series minimum, the padding above the series maximum and the `k - 1`
//! interior breakpoints. The induced interval set is
//! `[min - z1, b_1, .., b_{k-1}, max + z2]` and its fitness is the MAPE of
//! the Lee forecast over it.
//!
//! Each iteration evaluates every particle, updates personal and global bests
//! on strict improvement, records the global best score, then moves the swarm:
//!
//! ```text
//! v = w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x)
//! x = x + v
//! ```
//!
//! Two behaviours are kept as observed in the model this reproduces: both
//! paddings share a single clamp range, and breakpoints are clamped to
//! `[min, max]` even though any point strictly inside
//! `(min - z1, max + z2)` would be a valid boundary.
//!
//! Particle evaluations within an iteration are independent of one another;
//! [`SwarmState::evaluate`] is where a parallel evaluator would go, provided
//! the global best is only replaced by a strictly better score.

use crate::error::{ForecastError, Result};
use crate::models::{ForecastResult, FuzzyTimeSeriesEngine};
use fts_math::{IntervalSet, SeriesStats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Smallest interval count sampled for a run
pub const MIN_INTERVAL_COUNT: usize = 5;
/// Largest interval count sampled for a run
pub const MAX_INTERVAL_COUNT: usize = 15;

/// Swarm configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoConfig {
    /// Swarm size
    pub n_particles: usize,
    /// Number of iterations
    pub n_iterations: usize,
    /// Inertia weight `w`
    #[serde(alias = "w")]
    pub inertia: f64,
    /// Cognitive coefficient `c1`, pull towards the particle's own best
    #[serde(alias = "c1")]
    pub cognitive: f64,
    /// Social coefficient `c2`, pull towards the swarm's best
    #[serde(alias = "c2")]
    pub social: f64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            n_particles: 10,
            n_iterations: 30,
            inertia: 0.9,
            cognitive: 1.5,
            social: 1.5,
        }
    }
}

impl PsoConfig {
    /// Create a validated configuration
    pub fn new(
        n_particles: usize,
        n_iterations: usize,
        inertia: f64,
        cognitive: f64,
        social: f64,
    ) -> Result<Self> {
        let config = Self {
            n_particles,
            n_iterations,
            inertia,
            cognitive,
            social,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from JSON.
    ///
    /// Missing fields take their default; `w`, `c1` and `c2` are accepted as
    /// field names.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the swarm size
    #[must_use]
    pub fn with_particles(mut self, n_particles: usize) -> Self {
        self.n_particles = n_particles;
        self
    }

    /// Set the number of iterations
    #[must_use]
    pub fn with_iterations(mut self, n_iterations: usize) -> Self {
        self.n_iterations = n_iterations;
        self
    }

    /// Set the inertia weight
    #[must_use]
    pub fn with_inertia(mut self, inertia: f64) -> Self {
        self.inertia = inertia;
        self
    }

    /// Set the cognitive and social coefficients
    #[must_use]
    pub fn with_coefficients(mut self, cognitive: f64, social: f64) -> Self {
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<()> {
        if self.n_particles == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of particles must be at least 1".to_string(),
            ));
        }
        if self.n_iterations == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of iterations must be at least 1".to_string(),
            ));
        }
        if !self.inertia.is_finite() {
            return Err(ForecastError::InvalidParameter(format!(
                "Inertia weight must be finite, got {}",
                self.inertia
            )));
        }
        for (name, value) in [("Cognitive", self.cognitive), ("Social", self.social)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{} coefficient must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Range that both paddings are drawn from and clamped to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddingRange {
    pub lower: f64,
    pub upper: f64,
}

impl PaddingRange {
    /// Bucket the padding range by the spread of the series
    pub fn for_series_range(range: f64) -> Self {
        let (lower, upper) = if range <= 100.0 {
            (0.0, 30.0)
        } else if range <= 300.0 {
            (10.0, 50.0)
        } else {
            (30.0, 100.0)
        };
        Self { lower, upper }
    }

    /// Clamp a padding into the range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    /// Check if a padding lies in the range
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// One candidate solution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    best_score: f64,
}

impl Particle {
    fn random<R: Rng>(
        interval_count: usize,
        padding: &PaddingRange,
        stats: &SeriesStats,
        rng: &mut R,
    ) -> Self {
        let mut position = Vec::with_capacity(interval_count + 1);
        position.push(rng.gen_range(padding.lower..=padding.upper));
        position.push(rng.gen_range(padding.lower..=padding.upper));

        let mut breakpoints: Vec<f64> = (1..interval_count)
            .map(|_| rng.gen_range(stats.min..=stats.max))
            .collect();
        breakpoints.sort_by(f64::total_cmp);
        position.extend(breakpoints);

        Self {
            velocity: vec![0.0; position.len()],
            best_position: position.clone(),
            best_score: f64::INFINITY,
            position,
        }
    }

    /// Current position `[z1, z2, breakpoints..]`
    pub fn position(&self) -> &[f64] {
        &self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    /// Best position this particle has visited
    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    /// Score of the best position, infinite before the first evaluation
    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    /// Padding below the series minimum
    pub fn left_pad(&self) -> f64 {
        self.position[0]
    }

    /// Padding above the series maximum
    pub fn right_pad(&self) -> f64 {
        self.position[1]
    }

    /// Interior breakpoints, sorted ascending
    pub fn breakpoints(&self) -> &[f64] {
        &self.position[2..]
    }

    /// Interval set induced by the current position
    pub fn intervals(&self, stats: &SeriesStats) -> Result<IntervalSet> {
        intervals_from_position(stats, &self.position)
    }
}

fn intervals_from_position(stats: &SeriesStats, position: &[f64]) -> Result<IntervalSet> {
    Ok(IntervalSet::padded(
        stats,
        position[0],
        position[1],
        &position[2..],
    )?)
}

/// Score a position. A forecast with no scorable position is infinitely bad;
/// any other failure is a construction defect and aborts the run.
fn score_position(
    series: &[f64],
    stats: &SeriesStats,
    position: &[f64],
    engine: &FuzzyTimeSeriesEngine,
) -> Result<f64> {
    let intervals = intervals_from_position(stats, position)?;
    match engine.forecast(series, &intervals) {
        Ok(result) => Ok(result.mape()),
        Err(ForecastError::InsufficientData(_)) => Ok(f64::INFINITY),
        Err(err) => Err(err),
    }
}

/// Complete swarm state between two iterations
#[derive(Debug, Clone, Serialize)]
pub struct SwarmState {
    particles: Vec<Particle>,
    global_best_position: Vec<f64>,
    global_best_score: f64,
    interval_count: usize,
    padding: PaddingRange,
    stats: SeriesStats,
    history: Vec<f64>,
}

impl SwarmState {
    /// Create a swarm with an interval count drawn from
    /// `[MIN_INTERVAL_COUNT, MAX_INTERVAL_COUNT]`
    pub fn initialize<R: Rng>(series: &[f64], n_particles: usize, rng: &mut R) -> Result<Self> {
        let interval_count = rng.gen_range(MIN_INTERVAL_COUNT..=MAX_INTERVAL_COUNT);
        Self::with_interval_count(series, n_particles, interval_count, rng)
    }

    /// Create a swarm whose particles all induce `interval_count` intervals
    pub fn with_interval_count<R: Rng>(
        series: &[f64],
        n_particles: usize,
        interval_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if n_particles == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of particles must be at least 1".to_string(),
            ));
        }
        if interval_count == 0 {
            return Err(ForecastError::InvalidParameter(
                "Interval count must be at least 1".to_string(),
            ));
        }

        let stats = SeriesStats::from_series(series)?;
        let padding = PaddingRange::for_series_range(stats.range);
        let particles: Vec<Particle> = (0..n_particles)
            .map(|_| Particle::random(interval_count, &padding, &stats, &mut *rng))
            .collect();

        Ok(Self {
            global_best_position: particles[0].position.clone(),
            global_best_score: f64::INFINITY,
            particles,
            interval_count,
            padding,
            stats,
            history: Vec::new(),
        })
    }

    /// Evaluate every particle and update personal and global bests.
    ///
    /// Bests are replaced only on strict improvement.
    pub fn evaluate(&mut self, series: &[f64], engine: &FuzzyTimeSeriesEngine) -> Result<()> {
        for particle in &mut self.particles {
            let score = score_position(series, &self.stats, &particle.position, engine)?;

            if score < particle.best_score {
                particle.best_score = score;
                particle.best_position.clone_from(&particle.position);
            }
            if score < self.global_best_score {
                self.global_best_score = score;
                self.global_best_position.clone_from(&particle.position);
            }
        }
        Ok(())
    }

    /// Move every particle, clamp it into the search space and re-sort its
    /// breakpoints
    pub fn advance<R: Rng>(&mut self, config: &PsoConfig, rng: &mut R) {
        for particle in &mut self.particles {
            for j in 0..particle.position.len() {
                let r1: f64 = rng.gen();
                let r2: f64 = rng.gen();
                let x = particle.position[j];

                particle.velocity[j] = config.inertia * particle.velocity[j]
                    + config.cognitive * r1 * (particle.best_position[j] - x)
                    + config.social * r2 * (self.global_best_position[j] - x);
                particle.position[j] = x + particle.velocity[j];
            }

            particle.position[0] = self.padding.clamp(particle.position[0]);
            particle.position[1] = self.padding.clamp(particle.position[1]);
            let breakpoints = &mut particle.position[2..];
            for b in breakpoints.iter_mut() {
                *b = b.clamp(self.stats.min, self.stats.max);
            }
            breakpoints.sort_by(f64::total_cmp);
        }
    }

    /// One full iteration: evaluate, record the global best score, move.
    pub fn step<R: Rng>(
        mut self,
        series: &[f64],
        config: &PsoConfig,
        engine: &FuzzyTimeSeriesEngine,
        rng: &mut R,
    ) -> Result<Self> {
        self.evaluate(series, engine)?;
        self.history.push(self.global_best_score);

        log::debug!(
            "[Iter {:03}] MAPE = {:.4}% | z1 = {:.2}, z2 = {:.2}, intervals = {}",
            self.history.len(),
            self.global_best_score,
            self.global_best_position[0],
            self.global_best_position[1],
            self.interval_count
        );

        self.advance(config, rng);
        Ok(self)
    }

    /// Particles of the swarm
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Best position found by the swarm
    pub fn global_best_position(&self) -> &[f64] {
        &self.global_best_position
    }

    /// Score of the best position, infinite before the first evaluation
    pub fn global_best_score(&self) -> f64 {
        self.global_best_score
    }

    /// Number of intervals every particle induces
    pub fn interval_count(&self) -> usize {
        self.interval_count
    }

    /// Range the paddings are clamped to
    pub fn padding(&self) -> &PaddingRange {
        &self.padding
    }

    /// Bounds of the series being fitted
    pub fn stats(&self) -> &SeriesStats {
        &self.stats
    }

    /// Global best score recorded after each completed iteration
    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// Interval set induced by the global best position
    pub fn best_intervals(&self) -> Result<IntervalSet> {
        intervals_from_position(&self.stats, &self.global_best_position)
    }
}

/// Best configuration found by the swarm
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    /// Interval set induced by the global best position
    pub intervals: IntervalSet,
    /// Forecast over `intervals`
    pub forecast: ForecastResult,
    /// Best padding below the series minimum
    pub left_pad: f64,
    /// Best padding above the series maximum
    pub right_pad: f64,
    /// Number of intervals used throughout the run
    pub interval_count: usize,
    /// Best MAPE found
    pub best_score: f64,
    /// Global best MAPE after each iteration
    pub score_history: Vec<f64>,
}

/// Particle swarm optimizer for fuzzy interval boundaries
#[derive(Debug, Clone, Default)]
pub struct ParticleSwarmOptimizer {
    config: PsoConfig,
    engine: FuzzyTimeSeriesEngine,
}

impl ParticleSwarmOptimizer {
    /// Create an optimizer from a validated configuration
    pub fn new(config: PsoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engine: FuzzyTimeSeriesEngine::new(),
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Run the search with the given random source
    pub fn optimize<R: Rng>(&self, series: &[f64], rng: &mut R) -> Result<OptimizationResult> {
        let mut state = SwarmState::initialize(series, self.config.n_particles, rng)?;
        for _ in 0..self.config.n_iterations {
            state = state.step(series, &self.config, &self.engine, rng)?;
        }

        let intervals = state.best_intervals()?;
        let forecast = self.engine.forecast(series, &intervals)?;
        let best = state.global_best_position();

        log::info!(
            "PSO finished after {} iterations: MAPE = {:.4}%, z1 = {:.2}, z2 = {:.2}, intervals = {}",
            state.history().len(),
            state.global_best_score(),
            best[0],
            best[1],
            state.interval_count()
        );

        Ok(OptimizationResult {
            left_pad: best[0],
            right_pad: best[1],
            interval_count: state.interval_count(),
            best_score: state.global_best_score(),
            score_history: state.history().to_vec(),
            intervals,
            forecast,
        })
    }

    /// Run the search with a generator seeded from `seed`
    pub fn optimize_seeded(&self, series: &[f64], seed: u64) -> Result<OptimizationResult> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.optimize(series, &mut rng)
    }
}
