#![cfg(feature = "dev")]
//! Tests for input validation utilities.
//!
//! These tests verify the validation functions used before any fit:
//! - Series validation (length, emptiness, numeric validity, key order)
//! - Parameter validation (lambda, confidence level, replicates)
//! - Builder duplicate detection
//!
//! ## Test Organization
//!
//! 1. **Input Validation** - Array validation, length checks
//! 2. **Parameter Validation** - Lambda, level, replicates
//! 3. **Error Messages** - Proper error reporting

use possmooth::internals::algorithms::formulate::PenaltySpec;
use possmooth::internals::engine::validator::Validator;
use possmooth::internals::math::difference::PenaltyOrder;
use possmooth::internals::primitives::errors::PossmoothError;

// ============================================================================
// Input Validation Tests
// ============================================================================

/// Test validation rejects empty input.
#[test]
fn test_validate_empty_input() {
    let keys: Vec<f64> = vec![];
    let values: Vec<f64> = vec![];

    assert_eq!(
        Validator::validate_inputs(&keys, &values),
        Err(PossmoothError::EmptyInput)
    );
}

/// Test validation rejects length mismatch.
#[test]
fn test_validate_length_mismatch() {
    let res = Validator::validate_inputs(&[0.0, 1.0], &[1.0]);

    assert_eq!(
        res,
        Err(PossmoothError::MismatchedInputs {
            keys_len: 2,
            values_len: 1
        })
    );
}

/// Test validation rejects non-finite keys and values.
#[test]
fn test_validate_nonfinite() {
    let res_keys = Validator::validate_inputs(&[0.0, f64::NAN], &[1.0, 2.0]);
    if let Err(PossmoothError::InvalidNumericValue(s)) = res_keys {
        assert!(s.contains("keys[1]"), "Error should name the key: {s}");
    } else {
        panic!("Expected InvalidNumericValue for NaN key");
    }

    let res_values = Validator::validate_inputs(&[0.0, 1.0], &[f64::INFINITY, 2.0]);
    if let Err(PossmoothError::InvalidNumericValue(s)) = res_values {
        assert!(s.contains("values[0]"), "Error should name the value: {s}");
    } else {
        panic!("Expected InvalidNumericValue for infinite value");
    }
}

/// Test validation rejects keys that are not strictly increasing.
#[test]
fn test_validate_unsorted_keys() {
    assert_eq!(
        Validator::validate_inputs(&[0.0, 2.0, 1.0], &[1.0, 2.0, 3.0]),
        Err(PossmoothError::UnsortedKeys { index: 2 })
    );
    assert_eq!(
        Validator::validate_inputs(&[0.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
        Err(PossmoothError::UnsortedKeys { index: 2 })
    );
}

/// Test a valid series passes through unchanged.
#[test]
fn test_validate_valid_input() {
    let series = Validator::validate_inputs(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();

    assert_eq!(series.keys(), &[0.0, 1.0, 2.0]);
    assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
}

/// Test the series must cover one difference term.
#[test]
fn test_validate_series_length() {
    let series = Validator::validate_inputs(&[0.0, 1.0], &[1.0, 2.0]).unwrap();

    assert!(Validator::validate_series(&series, &PenaltySpec::new(1.0, PenaltyOrder::First)).is_ok());
    assert_eq!(
        Validator::validate_series(&series, &PenaltySpec::new(1.0, PenaltyOrder::Second)),
        Err(PossmoothError::TooFewPoints { got: 2, min: 3 })
    );
}

// ============================================================================
// Parameter Validation Tests
// ============================================================================

/// Test lambda must be finite and non-negative.
#[test]
fn test_validate_lambda() {
    assert!(Validator::validate_lambda(0.0).is_ok());
    assert!(Validator::validate_lambda(1e6).is_ok());
    assert_eq!(
        Validator::validate_lambda(-0.1),
        Err(PossmoothError::InvalidLambda(-0.1))
    );
    assert!(matches!(
        Validator::validate_lambda(f64::NAN),
        Err(PossmoothError::InvalidLambda(_))
    ));
}

/// Test confidence level must lie in (0, 1).
#[test]
fn test_validate_confidence_level() {
    assert!(Validator::validate_confidence_level(0.95).is_ok());
    assert!(Validator::validate_confidence_level(0.5f32).is_ok());
    for level in [0.0, 1.0, 1.2, -0.1] {
        assert_eq!(
            Validator::validate_confidence_level(level),
            Err(PossmoothError::InvalidConfidenceLevel(level))
        );
    }
}

/// Test replicate counts: zero is invalid, one is insufficient.
#[test]
fn test_validate_replicates() {
    assert_eq!(
        Validator::validate_replicates(0),
        Err(PossmoothError::InvalidReplicates(0))
    );
    assert_eq!(
        Validator::validate_replicates(1),
        Err(PossmoothError::InsufficientReplicates { got: 1, min: 2 })
    );
    assert!(Validator::validate_replicates(2).is_ok());
    assert!(PossmoothError::InvalidReplicates(0).is_invalid_input());
    assert!(!PossmoothError::InsufficientReplicates { got: 1, min: 2 }.is_invalid_input());
}

// ============================================================================
// Error Message Tests
// ============================================================================

/// Test duplicate parameters are reported by name.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());

    let err = Validator::validate_no_duplicates(Some("lambda")).unwrap_err();
    assert_eq!(
        err,
        PossmoothError::DuplicateParameter {
            parameter: "lambda"
        }
    );
    assert!(err.to_string().contains("lambda"));
}
