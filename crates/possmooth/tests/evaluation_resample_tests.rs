#![cfg(feature = "dev")]
//! Tests for bootstrap resampling.
//!
//! ## Test Organization
//!
//! 1. **Shape** - Length, key order, membership
//! 2. **Determinism** - Fixed seeds and replicate generators

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use possmooth::internals::evaluation::resample::{counter_seed, replicate_rng, resample};
use possmooth::internals::primitives::series::Series;

// ============================================================================
// Helper Functions
// ============================================================================

fn shuffled_keys() -> Series<f64> {
    Series::new(
        vec![1.0, 2.5, 3.0, 4.0, 7.0, 9.5, 10.0],
        vec![0.3, 1.2, 0.7, 2.2, 1.9, 3.1, 2.8],
    )
    .unwrap()
}

// ============================================================================
// Shape Tests
// ============================================================================

/// Samples keep the original length.
#[test]
fn test_resample_length() {
    let series = shuffled_keys();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);

    for _ in 0..50 {
        assert_eq!(resample(&series, &mut rng).len(), series.len());
    }
}

/// Samples come back in non-decreasing key order.
#[test]
fn test_resample_sorted_keys() {
    let series = shuffled_keys();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);

    for _ in 0..50 {
        let sample = resample(&series, &mut rng);
        assert!(sample.keys().windows(2).all(|w| w[0] <= w[1]));
    }
}

/// Every sampled row is an original (key, value) pair.
#[test]
fn test_resample_rows_are_original() {
    let series = shuffled_keys();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
    let sample = resample(&series, &mut rng);

    for (k, v) in sample.iter() {
        assert!(series.iter().any(|(ok, ov)| ok == k && ov == v));
    }
}

/// Sampling is with replacement: duplicates appear.
#[test]
fn test_resample_with_replacement() {
    let series = Series::from_values((0..50).map(f64::from).collect()).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
    let sample = resample(&series, &mut rng);

    assert!(sample.keys().windows(2).any(|w| w[0] == w[1]));
}

/// Repeated draws of a row come back adjacent and keep their pairing.
#[test]
fn test_resample_duplicates_are_adjacent_rows() {
    let series = shuffled_keys();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(19);

    for _ in 0..50 {
        let sample = resample(&series, &mut rng);
        let rows: Vec<(f64, f64)> = sample.iter().collect();
        for (k, v) in series.iter() {
            let hits: Vec<usize> = (0..rows.len()).filter(|&i| rows[i].0 == k).collect();
            assert!(hits.windows(2).all(|w| w[1] == w[0] + 1));
            assert!(hits.iter().all(|&i| rows[i].1 == v));
        }
    }
}

/// A single observation resamples to itself.
#[test]
fn test_resample_single_point() {
    let series = Series::new(vec![2.0], vec![5.0]).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    let sample = resample(&series, &mut rng);

    assert_eq!(sample.keys(), &[2.0]);
    assert_eq!(sample.values(), &[5.0]);
}

// ============================================================================
// Determinism Tests
// ============================================================================

/// Equal seeds give equal samples.
#[test]
fn test_resample_deterministic() {
    let series = shuffled_keys();
    let a = resample(&series, &mut Xoshiro256PlusPlus::seed_from_u64(123));
    let b = resample(&series, &mut Xoshiro256PlusPlus::seed_from_u64(123));

    assert_eq!(a, b);
}

/// Replicate generators depend on both base seed and replicate index.
#[test]
fn test_replicate_rng_streams() {
    let series = shuffled_keys();
    let a = resample(&series, &mut replicate_rng(123, 0));
    let a_again = resample(&series, &mut replicate_rng(123, 0));

    assert_eq!(a, a_again);
    assert_ne!(counter_seed(123, 0), counter_seed(123, 1));
    assert_ne!(counter_seed(123, 0), counter_seed(124, 0));
}
