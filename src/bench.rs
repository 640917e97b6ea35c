//! Tree versus flat list stress test.
//!
//! Generates synthetic products, inserts them into a throwaway
//! [`BalancedIndex`] and into a plain `Vec`, then times the same sampled
//! lookups against both. Nothing here touches a caller's live catalog.
//!
//! Timings are wall-clock and the keys are pseudo-random, so only relative
//! properties of a run are meaningful: the tree stays logarithmic in height
//! while the list scan grows linearly.

use std::hint::black_box;
use std::time::Duration;
use std::time::Instant;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde::Serializer;

use crate::config::StressConfig;
use crate::error::Result;
use crate::key::SortKey;
use crate::record::Product;
use crate::tree::BalancedIndex;
use crate::tree::node;

/// Outcome of one stress run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub count: usize,
    #[serde(serialize_with = "millis")]
    pub gen_time: Duration,
    #[serde(serialize_with = "millis")]
    pub insert_time: Duration,
    #[serde(serialize_with = "millis")]
    pub search_time: Duration,
    #[serde(serialize_with = "millis")]
    pub list_insert_time: Duration,
    #[serde(serialize_with = "millis")]
    pub list_search_time: Duration,
    pub height: u32,
    pub node_count: usize,
    /// Number of lookups performed against each structure.
    pub searches: usize,
    pub tree_hits: usize,
    pub list_hits: usize,
}

impl Metrics {
    /// How many times faster the tree lookups were than the list scan.
    ///
    /// `None` when the tree time is too small to divide by.
    pub fn search_speedup(&self) -> Option<f64> {
        let tree = self.search_time.as_secs_f64();
        if tree == 0.0 {
            return None;
        }
        return Some(self.list_search_time.as_secs_f64() / tree);
    }
}

fn millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    return serializer.serialize_f64(duration.as_nanos() as f64 / 1e6);
}

/// Drives stress runs with an injected random source.
pub struct BenchmarkHarness<G> {
    config: StressConfig,
    rng: G,
}

impl BenchmarkHarness<StdRng> {
    /// Harness over a `StdRng` seeded with `seed`, ignoring `config.seed`.
    pub fn seeded(config: StressConfig, seed: u64) -> Result<BenchmarkHarness<StdRng>> {
        return BenchmarkHarness::new(config, StdRng::seed_from_u64(seed));
    }

    /// Harness seeded from `config.seed`, or from the OS when unset.
    pub fn from_config(config: StressConfig) -> Result<BenchmarkHarness<StdRng>> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        return BenchmarkHarness::new(config, rng);
    }
}

impl<G: Rng> BenchmarkHarness<G> {
    pub fn new(config: StressConfig, rng: G) -> Result<BenchmarkHarness<G>> {
        config.validate()?;
        return Ok(BenchmarkHarness { config, rng });
    }

    pub fn config(&self) -> &StressConfig {
        return &self.config;
    }

    /// Synthesize `count` products with sequential ids from 0.
    pub fn generate(&mut self, count: usize) -> Vec<Product> {
        let mut products = Vec::with_capacity(count);
        for i in 0..count {
            let price = self.rng.gen_range(0..self.config.key_range);
            let stock = self.rng.gen_range(0..self.config.stock_range);
            let name = format!("Product {}", i);
            products.push(Product::new(i as u64, name, price as f64, stock, ""));
        }
        return products;
    }

    /// Run one stress test over `count` synthetic records.
    pub fn run_stress_test(&mut self, count: usize) -> Metrics {
        let _span = tracing::info_span!("stress_test", count).entered();

        let start = Instant::now();
        let products = self.generate(count);
        let gen_time = start.elapsed();

        // Prices are whole numbers below key_range, so converting through
        // u32 is exact and needs no validation.
        let keys: Vec<SortKey> = products.iter().map(|p| SortKey::from(p.price as u32)).collect();
        let searches = (count as f64 * self.config.search_fraction).floor() as usize;
        let targets: Vec<SortKey> = (0..searches)
            .map(|_| keys[self.rng.gen_range(0..count)])
            .collect();
        let tree_records = products.clone();

        let start = Instant::now();
        let mut index = BalancedIndex::new();
        for (key, record) in keys.iter().zip(tree_records) {
            index.insert_keyed(*key, record);
        }
        let insert_time = start.elapsed();

        let start = Instant::now();
        let mut tree_hits = 0;
        for target in &targets {
            if black_box(node::search(index.root(), *target)).is_some() {
                tree_hits += 1;
            }
        }
        let search_time = start.elapsed();

        let start = Instant::now();
        let mut list = Vec::new();
        for product in products {
            list.push(product);
        }
        let list_insert_time = start.elapsed();

        let start = Instant::now();
        let mut list_hits = 0;
        for target in &targets {
            let wanted = target.get();
            if black_box(list.iter().find(|p| p.price == wanted)).is_some() {
                list_hits += 1;
            }
        }
        let list_search_time = start.elapsed();

        let metrics = Metrics {
            count,
            gen_time,
            insert_time,
            search_time,
            list_insert_time,
            list_search_time,
            height: index.height(),
            node_count: index.len(),
            searches,
            tree_hits,
            list_hits,
        };
        tracing::info!(
            height = metrics.height,
            insert_ms = insert_time.as_secs_f64() * 1000.0,
            search_ms = search_time.as_secs_f64() * 1000.0,
            list_search_ms = list_search_time.as_secs_f64() * 1000.0,
            "stress test finished"
        );
        return metrics;
    }

    /// Run one stress test per entry of `counts`, in order.
    pub fn run_series(&mut self, counts: &[usize]) -> Vec<Metrics> {
        return counts.iter().map(|count| self.run_stress_test(*count)).collect();
    }
}
