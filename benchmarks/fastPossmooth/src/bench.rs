//! Penalized smoothing benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Point-fit scalability (series length, penalty order)
//! - Penalty strength (from near-identity to the shape-restricted limit)
//! - Bootstrap replicate counts
//! - Realistic scenarios (dose-response, growth curves, high noise)
//!
//! For serial bootstrap replicates, use `POSSMOOTH_BACKEND=serial cargo bench`.
//! For parallel bootstrap replicates, use `POSSMOOTH_BACKEND=parallel cargo bench`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fastPossmooth::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn get_config() -> (bool, &'static str) {
    match env::var("POSSMOOTH_BACKEND").ok().as_deref() {
        Some("serial") => (false, "serial"),
        _ => (true, "parallel"),
    }
}

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Increasing trend with Gaussian noise.
fn generate_trend_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.3).unwrap();

    let keys: Vec<f64> = (0..size).map(|i| i as f64 * 10.0 / size as f64).collect();
    let values: Vec<f64> = keys
        .iter()
        .map(|&k| k.sqrt() + noise_dist.sample(&mut rng))
        .collect();
    (keys, values)
}

/// Sigmoid dose-response with multiplicative noise.
fn generate_dose_response_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Uniform::new(0.8, 1.2);

    let keys: Vec<f64> = (0..size).map(|i| (i as f64 * 0.05).exp()).collect();
    let values: Vec<f64> = keys
        .iter()
        .map(|&dose| {
            let response = 1.0 / (1.0 + (-(dose.ln() - 2.0)).exp());
            response * noise_dist.sample(&mut rng)
        })
        .collect();
    (keys, values)
}

/// Convex growth curve with noise.
fn generate_growth_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.5).unwrap();

    let keys: Vec<f64> = (0..size).map(|i| i as f64 * 0.1).collect();
    let values: Vec<f64> = keys
        .iter()
        .map(|&t| 0.2 * t * t + noise_dist.sample(&mut rng))
        .collect();
    (keys, values)
}

/// Weak trend buried in noise.
fn generate_high_noise_data(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 2.0).unwrap();

    let keys: Vec<f64> = (0..size).map(|i| i as f64).collect();
    let values: Vec<f64> = keys
        .iter()
        .map(|&k| 0.01 * k + noise_dist.sample(&mut rng))
        .collect();
    (keys, values)
}

// ============================================================================
// Benchmark Functions
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(20);

    for size in [100, 500, 1_000] {
        group.throughput(Throughput::Elements(size as u64));
        let (keys, values) = generate_trend_data(size, 42);

        for order in [First, Second] {
            let id = format!("order{}", order.as_u8());
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| {
                    PosSmooth::new()
                        .lambda(1.0)
                        .order(order)
                        .build()
                        .unwrap()
                        .fit(black_box(&keys), black_box(&values))
                        .unwrap()
                })
            });
        }
    }

    group.finish();
}

fn bench_lambda(c: &mut Criterion) {
    let mut group = c.benchmark_group("lambda");
    group.sample_size(30);

    let (keys, values) = generate_trend_data(500, 42);

    for lambda in [0.01, 0.1, 1.0, 10.0, 1000.0] {
        group.bench_with_input(BenchmarkId::new("order1", lambda), &lambda, |b, &lambda| {
            b.iter(|| {
                PosSmooth::new()
                    .lambda(lambda)
                    .build()
                    .unwrap()
                    .fit(black_box(&keys), black_box(&values))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_replicates(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("replicates_{}", mode_name));
    group.sample_size(10);

    let (keys, values) = generate_trend_data(200, 42);

    for replicates in [50, 200, 500] {
        group.throughput(Throughput::Elements(replicates as u64));
        group.bench_with_input(
            BenchmarkId::new("bootstrap", replicates),
            &replicates,
            |b, &replicates| {
                b.iter(|| {
                    PosSmooth::new()
                        .lambda(1.0)
                        .bootstrap(replicates)
                        .seed(123)
                        .parallel(use_parallel)
                        .build()
                        .unwrap()
                        .fit(black_box(&keys), black_box(&values))
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_core_baseline(c: &mut Criterion) {
    let mut group = c.benchmark_group("core_sequential");
    group.sample_size(10);

    let (keys, values) = generate_trend_data(200, 42);

    group.bench_function("bootstrap_200", |b| {
        b.iter(|| {
            possmooth::prelude::PosSmooth::new()
                .lambda(1.0)
                .bootstrap(200)
                .seed(123)
                .build()
                .unwrap()
                .fit(black_box(&keys), black_box(&values))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_scenarios(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scenarios_{}", mode_name));
    group.sample_size(10);

    let scenarios: [(&str, PenaltyOrder, (Vec<f64>, Vec<f64>)); 3] = [
        ("dose_response", First, generate_dose_response_data(150, 7)),
        ("growth_curve", Second, generate_growth_data(150, 7)),
        ("high_noise", First, generate_high_noise_data(150, 7)),
    ];

    for (name, order, (keys, values)) in &scenarios {
        group.bench_function(*name, |b| {
            b.iter(|| {
                PosSmooth::new()
                    .lambda(2.0)
                    .order(*order)
                    .bootstrap(100)
                    .seed(1)
                    .failure_policy(Skip)
                    .parallel(use_parallel)
                    .build()
                    .unwrap()
                    .fit(black_box(keys), black_box(values))
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_lambda,
    bench_replicates,
    bench_core_baseline,
    bench_scenarios,
);
criterion_main!(benches);
