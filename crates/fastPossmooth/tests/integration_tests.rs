//! Integration tests for the parallel smoothing API.
//!
//! ## Test Organization
//!
//! 1. **Consistency** - Parallel and sequential bands agree
//! 2. **Inputs** - Slices, vectors, ndarray
//! 3. **Configuration** - Builder validation, cancellation

use approx::assert_abs_diff_eq;
use ndarray::{s, Array1};

use fastPossmooth::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn noisy_trend(n: usize) -> (Vec<f64>, Vec<f64>) {
    let keys: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
    let values = (0..n)
        .map(|i| 0.1 * i as f64 + 0.5 * (1.7 * i as f64).sin())
        .collect();
    (keys, values)
}

fn banded(parallel: bool, seed: u64) -> SmoothResult<f64> {
    let (keys, values) = noisy_trend(40);
    PosSmooth::new()
        .lambda(2.0)
        .bootstrap(50)
        .seed(seed)
        .parallel(parallel)
        .build()
        .unwrap()
        .fit(&keys, &values)
        .unwrap()
}

// ============================================================================
// Consistency Tests
// ============================================================================

/// Parallel and sequential runs give identical results for a seed.
#[test]
fn test_parallel_matches_sequential() {
    let par = banded(true, 99);
    let seq = banded(false, 99);

    assert_eq!(par.estimate, seq.estimate);
    assert_eq!(par.std_errors, seq.std_errors);
    assert_eq!(par.lower, seq.lower);
    assert_eq!(par.upper, seq.upper);
    assert_eq!(par, seq);
}

/// The parallel band matches the core crate's sequential band.
#[test]
fn test_parallel_matches_core() {
    let (keys, values) = noisy_trend(40);
    let core = possmooth::prelude::PosSmooth::new()
        .lambda(2.0)
        .bootstrap(50)
        .seed(99)
        .build()
        .unwrap()
        .fit(&keys, &values)
        .unwrap();

    assert_eq!(banded(true, 99), core);
}

/// Repeated parallel runs are reproducible.
#[test]
fn test_parallel_reproducible() {
    assert_eq!(banded(true, 5), banded(true, 5));
}

/// Bands are ordered and non-degenerate.
#[test]
fn test_parallel_band_shape() {
    let result = banded(true, 1);
    let table = result.aggregated().unwrap();

    assert_eq!(table.rows.len(), 40);
    assert_eq!(table.summary.replicates_used, 50);
    for row in &table.rows {
        assert!(row.lower <= row.estimate && row.estimate <= row.upper);
    }
    assert!(result
        .std_errors
        .as_ref()
        .unwrap()
        .iter()
        .any(|&se| se > 0.0));
}

// ============================================================================
// Input Tests
// ============================================================================

/// ndarray, Vec and slice inputs give the same fit.
#[test]
fn test_ndarray_input() {
    let (keys, values) = noisy_trend(12);
    let model = PosSmooth::new().lambda(5.0).build().unwrap();

    let from_vec = model.fit(&keys, &values).unwrap();
    let from_slice = model.fit(keys.as_slice(), values.as_slice()).unwrap();
    let from_array = model
        .fit(&Array1::from_vec(keys.clone()), &Array1::from_vec(values.clone()))
        .unwrap();

    assert_eq!(from_vec, from_slice);
    assert_eq!(from_vec, from_array);
}

/// Non-contiguous arrays are rejected.
#[test]
fn test_non_contiguous_input() {
    let keys = Array1::from_vec((0..10).map(f64::from).collect());
    let values = Array1::from_vec((0..10).map(|i| f64::from(i) * 2.0).collect());
    let model = PosSmooth::new().build().unwrap();

    let err = model
        .fit(&keys.slice(s![..;2]), &values.slice(s![..;2]))
        .unwrap_err();
    assert!(matches!(err, PossmoothError::InvalidInput(_)));
}

/// Isotonic limit through the parallel builder.
#[test]
fn test_isotonic_fit_values() {
    let model = PosSmooth::new().lambda(1000.0).order(First).build().unwrap();
    let result = model
        .fit_values(&Array1::from_vec(vec![0.0, 2.0, 1.0, 3.0, 2.0, 4.0]))
        .unwrap();

    for (got, want) in result.estimate.iter().zip([0.0, 1.5, 1.5, 2.5, 2.5, 4.0]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-4);
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

/// Setting parallel twice is a duplicate parameter.
#[test]
fn test_duplicate_parallel() {
    let err = PosSmooth::<f64>::new()
        .parallel(true)
        .parallel(false)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        PossmoothError::DuplicateParameter {
            parameter: "parallel"
        }
    );
}

/// Base validation still applies.
#[test]
fn test_base_validation() {
    assert_eq!(
        PosSmooth::<f64>::new().bootstrap(1).build().unwrap_err(),
        PossmoothError::InsufficientReplicates { got: 1, min: 2 }
    );
}

/// Cancellation is observed by parallel replicates.
#[test]
fn test_parallel_cancellation() {
    let (keys, values) = noisy_trend(20);
    let token = CancelToken::new();
    token.cancel();

    let err = PosSmooth::new()
        .bootstrap(16)
        .cancel_token(token)
        .build()
        .unwrap()
        .fit(&keys, &values)
        .unwrap_err();

    assert_eq!(
        err,
        PossmoothError::Cancelled {
            completed: 0,
            requested: 16
        }
    );
}
