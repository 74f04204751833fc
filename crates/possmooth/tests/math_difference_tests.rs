#![cfg(feature = "dev")]
//! Tests for forward differences and penalty orders.
//!
//! ## Test Organization
//!
//! 1. **Differences** - First and second order values, lengths
//! 2. **Orders** - Conversion from integers, stencils
//! 3. **Errors** - Series too short

use approx::assert_relative_eq;

use possmooth::internals::math::difference::{difference, PenaltyOrder};
use possmooth::internals::primitives::errors::PossmoothError;

// ============================================================================
// Difference Tests
// ============================================================================

/// First differences of squares are odd numbers.
#[test]
fn test_first_difference_of_squares() {
    let v = vec![1.0, 4.0, 9.0, 16.0];
    let d = difference(&v, PenaltyOrder::First).unwrap();

    assert_eq!(d.len(), 3);
    for (got, want) in d.iter().zip([3.0, 5.0, 7.0]) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
}

/// Second differences of squares are constant.
#[test]
fn test_second_difference_of_squares() {
    let v = vec![1.0, 4.0, 9.0, 16.0, 25.0];
    let d = difference(&v, PenaltyOrder::Second).unwrap();

    assert_eq!(d.len(), 3);
    for got in d {
        assert_relative_eq!(got, 2.0, epsilon = 1e-12);
    }
}

/// Second differences of a line vanish.
#[test]
fn test_second_difference_of_line() {
    let v: Vec<f32> = (0..6).map(|i| 0.5 * i as f32 + 1.0).collect();
    let d = difference(&v, PenaltyOrder::Second).unwrap();

    assert!(d.iter().all(|x| x.abs() < 1e-6));
}

/// Length is m - order.
#[test]
fn test_difference_length() {
    let v = vec![0.0; 10];
    assert_eq!(difference(&v, PenaltyOrder::First).unwrap().len(), 9);
    assert_eq!(difference(&v, PenaltyOrder::Second).unwrap().len(), 8);
}

// ============================================================================
// Order Tests
// ============================================================================

/// Integer orders outside {1, 2} are rejected.
#[test]
fn test_order_conversion() {
    assert_eq!(PenaltyOrder::try_from(1u8), Ok(PenaltyOrder::First));
    assert_eq!(PenaltyOrder::try_from(2u8), Ok(PenaltyOrder::Second));
    assert_eq!(
        PenaltyOrder::try_from(3u8),
        Err(PossmoothError::InvalidOrder(3))
    );
    assert_eq!(
        PenaltyOrder::try_from(0u8),
        Err(PossmoothError::InvalidOrder(0))
    );
    assert!(PossmoothError::InvalidOrder(0).is_invalid_input());
}

/// Stencils match the operator.
#[test]
fn test_order_stencil() {
    assert_eq!(PenaltyOrder::First.stencil(), &[-1.0, 1.0]);
    assert_eq!(PenaltyOrder::Second.stencil(), &[1.0, -2.0, 1.0]);
    assert_eq!(PenaltyOrder::First.width(), 2);
    assert_eq!(PenaltyOrder::Second.width(), 3);
    assert_eq!(PenaltyOrder::default(), PenaltyOrder::First);
}

// ============================================================================
// Error Tests
// ============================================================================

/// A series no longer than the order has no differences.
#[test]
fn test_difference_too_short() {
    assert_eq!(
        difference(&[1.0], PenaltyOrder::First),
        Err(PossmoothError::TooFewPoints { got: 1, min: 2 })
    );
    assert_eq!(
        difference(&[1.0, 2.0], PenaltyOrder::Second),
        Err(PossmoothError::TooFewPoints { got: 2, min: 3 })
    );
    assert_eq!(
        difference::<f64>(&[], PenaltyOrder::First),
        Err(PossmoothError::TooFewPoints { got: 0, min: 2 })
    );
}
