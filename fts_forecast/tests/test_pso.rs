use assert_approx_eq::assert_approx_eq;
use fts_forecast::error::ForecastError;
use fts_forecast::models::pso::{
    PaddingRange, ParticleSwarmOptimizer, PsoConfig, SwarmState, MAX_INTERVAL_COUNT,
    MIN_INTERVAL_COUNT,
};
use fts_forecast::models::FuzzyTimeSeriesEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

/// Sixty days of a rupiah-like selling rate
fn exchange_rate_series() -> Vec<f64> {
    (0..60)
        .map(|i| {
            let t = i as f64;
            15_200.0 + 180.0 * (t / 6.0).sin() + 4.0 * t + 25.0 * (t * 1.7).cos()
        })
        .collect()
}

fn assert_swarm_invariants(state: &SwarmState) {
    let stats = state.stats();
    let padding = state.padding();

    for particle in state.particles() {
        assert_eq!(particle.position().len(), state.interval_count() + 1);
        assert!(padding.contains(particle.left_pad()));
        assert!(padding.contains(particle.right_pad()));

        let breakpoints = particle.breakpoints();
        assert!(breakpoints.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(breakpoints
            .iter()
            .all(|&b| stats.min <= b && b <= stats.max));
    }
}

#[rstest]
#[case(0.0, 0.0, 30.0)]
#[case(100.0, 0.0, 30.0)]
#[case(100.5, 10.0, 50.0)]
#[case(300.0, 10.0, 50.0)]
#[case(300.1, 30.0, 100.0)]
#[case(2_500.0, 30.0, 100.0)]
fn test_padding_range_buckets(#[case] range: f64, #[case] lower: f64, #[case] upper: f64) {
    let padding = PaddingRange::for_series_range(range);
    assert_eq!(padding, PaddingRange { lower, upper });
}

#[test]
fn test_initial_swarm() {
    let series = exchange_rate_series();
    let mut rng = StdRng::seed_from_u64(11);
    let state = SwarmState::initialize(&series, 8, &mut rng).unwrap();

    assert_eq!(state.particles().len(), 8);
    assert!((MIN_INTERVAL_COUNT..=MAX_INTERVAL_COUNT).contains(&state.interval_count()));
    assert_eq!(state.global_best_score(), f64::INFINITY);
    assert!(state.history().is_empty());
    for particle in state.particles() {
        assert!(particle.velocity().iter().all(|&v| v == 0.0));
        assert_eq!(particle.best_score(), f64::INFINITY);
    }
    assert_swarm_invariants(&state);
}

#[test]
fn test_swarm_invariants_hold_after_every_step() {
    let series = exchange_rate_series();
    let config = PsoConfig::default().with_particles(12);
    let engine = FuzzyTimeSeriesEngine::new();
    let mut rng = StdRng::seed_from_u64(2024);

    let mut state = SwarmState::initialize(&series, config.n_particles, &mut rng).unwrap();
    for iteration in 1..=25 {
        state = state.step(&series, &config, &engine, &mut rng).unwrap();
        assert_eq!(state.history().len(), iteration);
        assert_swarm_invariants(&state);
    }
}

/// Swarm after `steps` iterations and a fresh evaluation, ready to move
fn evaluated_swarm(
    seed: u64,
    n_particles: usize,
    interval_count: usize,
    steps: usize,
) -> SwarmState {
    let series = exchange_rate_series();
    let config = PsoConfig::default().with_particles(n_particles);
    let engine = FuzzyTimeSeriesEngine::new();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut state =
        SwarmState::with_interval_count(&series, n_particles, interval_count, &mut rng).unwrap();
    for _ in 0..steps {
        state = state.step(&series, &config, &engine, &mut rng).unwrap();
    }
    state.evaluate(&series, &engine).unwrap();
    state
}

#[test]
fn test_advance_without_forces_keeps_positions() {
    let mut state = evaluated_swarm(21, 5, 6, 0);
    let before: Vec<Vec<f64>> = state
        .particles()
        .iter()
        .map(|p| p.position().to_vec())
        .collect();

    let still = PsoConfig::default()
        .with_inertia(0.0)
        .with_coefficients(0.0, 0.0);
    state.advance(&still, &mut StdRng::seed_from_u64(3));

    for (particle, position) in state.particles().iter().zip(&before) {
        assert_eq!(particle.position(), position.as_slice());
        assert!(particle.velocity().iter().all(|&v| v == 0.0));
    }
}

#[test]
fn test_social_pull_moves_towards_global_best() {
    // A single breakpoint keeps every coordinate in place through the re-sort.
    let mut state = evaluated_swarm(8, 6, 2, 0);
    let global_best = state.global_best_position().to_vec();
    let before: Vec<Vec<f64>> = state
        .particles()
        .iter()
        .map(|p| p.position().to_vec())
        .collect();
    assert!(before.iter().any(|position| position != &global_best));

    let social_only = PsoConfig::default()
        .with_inertia(0.0)
        .with_coefficients(0.0, 0.8);
    state.advance(&social_only, &mut StdRng::seed_from_u64(4));

    for (particle, old) in state.particles().iter().zip(&before) {
        for j in 0..old.len() {
            let (x, x_new, g) = (old[j], particle.position()[j], global_best[j]);
            assert!(x_new >= x.min(g) - 1e-9 && x_new <= x.max(g) + 1e-9);
            assert!((x_new - g).abs() <= (x - g).abs() + 1e-9);
            assert_approx_eq!(particle.velocity()[j], x_new - x, 1e-9);
        }
    }
}

#[test]
fn test_advance_follows_velocity_update() {
    let mut state = evaluated_swarm(42, 4, 5, 3);
    let config = PsoConfig::default()
        .with_inertia(0.7)
        .with_coefficients(1.2, 1.8);
    let global_best = state.global_best_position().to_vec();
    let stats = *state.stats();
    let padding = *state.padding();
    assert!(state
        .particles()
        .iter()
        .any(|p| p.position() != global_best.as_slice()));

    // Replay the same random draws: r1 then r2 for every coordinate.
    let mut replay = StdRng::seed_from_u64(77);
    let expected: Vec<(Vec<f64>, Vec<f64>)> = state
        .particles()
        .iter()
        .map(|particle| {
            let mut position = particle.position().to_vec();
            let mut velocity = particle.velocity().to_vec();
            for j in 0..position.len() {
                let r1: f64 = replay.gen();
                let r2: f64 = replay.gen();
                let x = position[j];
                velocity[j] = config.inertia * velocity[j]
                    + config.cognitive * r1 * (particle.best_position()[j] - x)
                    + config.social * r2 * (global_best[j] - x);
                position[j] = x + velocity[j];
            }
            position[0] = padding.clamp(position[0]);
            position[1] = padding.clamp(position[1]);
            for b in position[2..].iter_mut() {
                *b = b.clamp(stats.min, stats.max);
            }
            position[2..].sort_by(f64::total_cmp);
            (position, velocity)
        })
        .collect();

    state.advance(&config, &mut StdRng::seed_from_u64(77));

    for (particle, (position, velocity)) in state.particles().iter().zip(&expected) {
        for j in 0..position.len() {
            assert_approx_eq!(particle.position()[j], position[j], 1e-9);
            assert_approx_eq!(particle.velocity()[j], velocity[j], 1e-9);
        }
    }
}

#[test]
fn test_global_best_never_worsens() {
    let series = exchange_rate_series();
    let optimizer = ParticleSwarmOptimizer::new(
        PsoConfig::default().with_particles(15).with_iterations(40),
    )
    .unwrap();

    let result = optimizer.optimize_seeded(&series, 7).unwrap();

    assert_eq!(result.score_history.len(), 40);
    assert!(result
        .score_history
        .windows(2)
        .all(|pair| pair[1] <= pair[0]));
    assert_eq!(result.best_score, *result.score_history.last().unwrap());
}

#[test]
fn test_personal_bests_bound_global_best() {
    let series = exchange_rate_series();
    let config = PsoConfig::default().with_particles(6);
    let engine = FuzzyTimeSeriesEngine::new();
    let mut rng = StdRng::seed_from_u64(99);

    let mut state = SwarmState::initialize(&series, config.n_particles, &mut rng).unwrap();
    for _ in 0..10 {
        state = state.step(&series, &config, &engine, &mut rng).unwrap();
    }

    let best_personal = state
        .particles()
        .iter()
        .map(|p| p.best_score())
        .fold(f64::INFINITY, f64::min);
    assert_eq!(state.global_best_score(), best_personal);
}

#[test]
fn test_single_particle_single_iteration() {
    let series = exchange_rate_series();
    let seed = 31;

    // Replay the optimizer's initialization with the same seed.
    let mut rng = StdRng::seed_from_u64(seed);
    let initial = SwarmState::initialize(&series, 1, &mut rng).unwrap();
    let particle = &initial.particles()[0];
    let intervals = particle.intervals(initial.stats()).unwrap();
    let expected = FuzzyTimeSeriesEngine::new()
        .forecast(&series, &intervals)
        .unwrap();

    let optimizer =
        ParticleSwarmOptimizer::new(PsoConfig::default().with_particles(1).with_iterations(1))
            .unwrap();
    let result = optimizer.optimize_seeded(&series, seed).unwrap();

    assert_eq!(result.score_history, vec![expected.mape()]);
    assert_eq!(result.intervals, intervals);
    assert_eq!(result.forecast, expected);
    assert_eq!(result.left_pad, particle.left_pad());
    assert_eq!(result.right_pad, particle.right_pad());
    assert_eq!(result.interval_count, initial.interval_count());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let series = exchange_rate_series();
    let optimizer =
        ParticleSwarmOptimizer::new(PsoConfig::default().with_particles(5).with_iterations(8))
            .unwrap();

    let first = optimizer.optimize_seeded(&series, 5).unwrap();
    let second = optimizer.optimize_seeded(&series, 5).unwrap();

    assert_eq!(first.score_history, second.score_history);
    assert_eq!(first.intervals, second.intervals);
}

#[test]
fn test_result_matches_best_intervals() {
    let series = exchange_rate_series();
    let optimizer = ParticleSwarmOptimizer::default();
    let result = optimizer.optimize_seeded(&series, 3).unwrap();

    assert_eq!(result.intervals.len(), result.interval_count);
    assert_eq!(result.forecast.intervals(), &result.intervals);
    assert_approx_eq!(result.forecast.mape(), result.best_score, 1e-12);
    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_approx_eq!(result.intervals.lower(), min - result.left_pad, 1e-9);
    assert_approx_eq!(result.intervals.upper(), max + result.right_pad, 1e-9);
    assert!(result.forecast.predicted()[0].is_none());
}

#[test]
fn test_fixed_interval_count() {
    let series = exchange_rate_series();
    let mut rng = StdRng::seed_from_u64(1);
    let state = SwarmState::with_interval_count(&series, 3, 7, &mut rng).unwrap();

    assert_eq!(state.interval_count(), 7);
    for particle in state.particles() {
        assert_eq!(particle.breakpoints().len(), 6);
        assert_eq!(particle.intervals(state.stats()).unwrap().len(), 7);
    }
}

#[test]
fn test_constant_series_search() {
    let series = vec![14_000.0; 10];
    let optimizer =
        ParticleSwarmOptimizer::new(PsoConfig::default().with_particles(4).with_iterations(5))
            .unwrap();

    let result = optimizer.optimize_seeded(&series, 17).unwrap();
    assert!(result.best_score.is_finite());
    assert!(result.score_history.iter().all(|s| s.is_finite()));
}

#[rstest]
#[case(PsoConfig::default().with_particles(0))]
#[case(PsoConfig::default().with_iterations(0))]
#[case(PsoConfig::default().with_inertia(f64::NAN))]
#[case(PsoConfig::default().with_coefficients(-1.0, 1.5))]
#[case(PsoConfig::default().with_coefficients(1.5, f64::INFINITY))]
fn test_invalid_config(#[case] config: PsoConfig) {
    assert!(matches!(
        ParticleSwarmOptimizer::new(config),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_config_from_json() {
    let config = PsoConfig::from_json(r#"{"n_particles": 20, "w": 0.7, "c1": 2.0}"#).unwrap();

    assert_eq!(config.n_particles, 20);
    assert_eq!(config.n_iterations, 30);
    assert_eq!(config.inertia, 0.7);
    assert_eq!(config.cognitive, 2.0);
    assert_eq!(config.social, 1.5);

    assert!(matches!(
        PsoConfig::from_json(r#"{"n_iterations": 0}"#),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert!(matches!(
        PsoConfig::from_json("not json"),
        Err(ForecastError::SerializationError(_))
    ));
}

#[test]
fn test_optimizer_rejects_short_series() {
    let optimizer = ParticleSwarmOptimizer::default();
    assert!(matches!(
        optimizer.optimize_seeded(&[15_000.0], 1),
        Err(ForecastError::InvalidInput(_))
    ));
}
