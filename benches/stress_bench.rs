//! Tree versus flat list: insertion and lookup at several sizes.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use balanced_index::record::Product;
use balanced_index::tree::BalancedIndex;

const SIZES: [usize; 3] = [100, 1000, 10000];

// =============================================================================
// Workload Generation
// =============================================================================

fn products(size: usize, seed: u64) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(seed);
    return (0..size)
        .map(|i| {
            let price = rng.gen_range(0..10_000u32) as f64;
            Product::new(i as u64, format!("Product {}", i), price, rng.gen_range(0..100), "")
        })
        .collect();
}

fn targets(products: &[Product], seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let searches = products.len() / 10;
    return (0..searches)
        .map(|_| products[rng.gen_range(0..products.len())].price)
        .collect();
}

// =============================================================================
// Insertion
// =============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in SIZES {
        let data = products(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("BalancedIndex", size), &data, |b, data| {
            b.iter(|| {
                let mut index = BalancedIndex::new();
                for product in data.iter().cloned() {
                    index.insert(product).expect("generated prices are finite");
                }
                black_box(index.height())
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &data, |b, data| {
            b.iter(|| {
                let mut list = Vec::new();
                for product in data.iter().cloned() {
                    list.push(product);
                }
                black_box(list.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Lookup
// =============================================================================

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in SIZES {
        let data = products(size, 42);
        let wanted = targets(&data, 7);
        let list = data.clone();
        let index = BalancedIndex::from_records(data).expect("generated prices are finite");
        group.throughput(Throughput::Elements(wanted.len() as u64));

        group.bench_with_input(BenchmarkId::new("BalancedIndex", size), &wanted, |b, wanted| {
            b.iter(|| {
                let mut hits = 0;
                for price in wanted {
                    if let Ok(Some(_)) = index.search(*price) {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &wanted, |b, wanted| {
            b.iter(|| {
                let mut hits = 0;
                for price in wanted {
                    if list.iter().any(|p| p.price == *price) {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });

        let optimized = index.optimized();
        group.bench_with_input(BenchmarkId::new("Optimized", size), &wanted, |b, wanted| {
            b.iter(|| {
                let mut hits = 0;
                for price in wanted {
                    if let Ok(Some(_)) = optimized.search(*price) {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(benches, bench_insert, bench_search);

criterion_main!(benches);
