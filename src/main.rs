//! Runs tree-vs-list stress tests and prints one JSON object per run.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use balanced_index::bench::BenchmarkHarness;
use balanced_index::catalog::Catalog;
use balanced_index::config::StressConfig;
use balanced_index::record::sample_products;

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Record counts to stress, one run each.
    #[arg(default_values_t = [100, 1000, 10000])]
    counts: Vec<usize>,

    /// JSON file with a stress configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the generator, overriding the config file.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the sample catalogue's tree before and after optimizing it.
    #[arg(long)]
    optimize_demo: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse();

    if options.optimize_demo {
        let mut catalog = Catalog::from_records(sample_products())?;
        println!("# insertion order (height {})", catalog.height());
        print!("{}", catalog.index().to_text());
        catalog.optimize();
        println!("# optimized (height {})", catalog.height());
        print!("{}", catalog.index().to_text());
        println!("# stats {}", serde_json::to_string(&catalog.stats())?);
        return Ok(());
    }

    let mut config = match &options.config {
        Some(path) => StressConfig::load(path)?,
        None => StressConfig::default(),
    };
    if options.seed.is_some() {
        config.seed = options.seed;
    }

    let mut harness = BenchmarkHarness::from_config(config)?;
    for metrics in harness.run_series(&options.counts) {
        println!("{}", serde_json::to_string(&metrics)?);
    }
    return Ok(());
}
