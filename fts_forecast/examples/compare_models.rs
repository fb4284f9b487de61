use fts_forecast::comparison::ModelComparison;
use fts_forecast::data::DataLoader;
use fts_forecast::models::pso::PsoConfig;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("FTS Lee vs FTS Lee + PSO");
    println!("========================\n");

    // Use a CSV file when given one, otherwise a synthetic series
    let series = match env::args().nth(1) {
        Some(path) => {
            println!("Loading exchange rates from {}...", path);
            DataLoader::from_csv(&path)?.values().to_vec()
        }
        None => {
            println!("No CSV given, using 120 days of synthetic rates...");
            create_sample_rates(120)
        }
    };

    let stats = fts_forecast::SeriesStats::from_series(&series)?;
    println!("Minimum: {:.2}", stats.min);
    println!("Maximum: {:.2}", stats.max);
    println!("Observations: {}\n", stats.len);

    let config = PsoConfig::default();
    println!(
        "PSO: {} particles, {} iterations, w = {}, c1 = {}, c2 = {}\n",
        config.n_particles, config.n_iterations, config.inertia, config.cognitive, config.social
    );

    let comparison = ModelComparison::run_seeded(&series, config, 42)?;
    println!("{}", comparison);

    println!("Last five predictions (actual / baseline / optimized):");
    let n = series.len();
    for i in n.saturating_sub(5)..n {
        println!(
            "  {:>4}: {:>10.2} / {:>10} / {:>10}",
            i + 1,
            series[i],
            format_prediction(comparison.baseline.predicted()[i]),
            format_prediction(comparison.optimized.forecast.predicted()[i]),
        );
    }

    Ok(())
}

fn format_prediction(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

/// Create a trending, oscillating exchange-rate series
fn create_sample_rates(days: usize) -> Vec<f64> {
    (0..days)
        .map(|i| {
            let t = i as f64;
            15_400.0 + 2.5 * t + 120.0 * (t / 9.0).sin() + 30.0 * (t / 2.3).cos()
        })
        .collect()
}
