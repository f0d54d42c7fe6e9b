//! Criterion benchmarks for valuation_pricing.
//!
//! Benchmarks cover:
//! - Single DCF projection
//! - Monte Carlo sampling, sequential against rayon-parallel valuation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use valuation_core::fixtures::sample_dataset;
use valuation_core::AssumptionOverrides;
use valuation_pricing::dcf::project;
use valuation_pricing::mc::{MonteCarloSampler, SimulationConfig};
use valuation_pricing::rng::ValuationRng;

fn bench_dcf_projection(c: &mut Criterion) {
    let dataset = sample_dataset();
    let overrides = AssumptionOverrides::new().wacc(0.105);

    c.bench_function("dcf_project", |b| {
        b.iter(|| project(black_box(&dataset), black_box(&overrides)))
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let dataset = sample_dataset();
    let mut group = c.benchmark_group("monte_carlo");

    for iterations in [1_000usize, 10_000, 100_000] {
        for (label, threshold) in [("sequential", usize::MAX), ("parallel", 1)] {
            let sampler = MonteCarloSampler::new(
                SimulationConfig::builder()
                    .iterations(iterations)
                    .parallel_threshold(threshold)
                    .build()
                    .unwrap(),
            );
            group.bench_with_input(BenchmarkId::new(label, iterations), &sampler, |b, s| {
                b.iter(|| {
                    let mut rng = ValuationRng::from_seed(42);
                    s.simulate(black_box(&dataset), &mut rng)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_dcf_projection, bench_monte_carlo);
criterion_main!(benches);
