//! Forward finite differences.
//!
//! ## Purpose
//!
//! This module computes order-1 and order-2 forward differences and exposes
//! the matching stencils. The fit penalty is built from the same stencils,
//! so the penalty and [`difference`] always agree.
//!
//! ## Key concepts
//!
//! * **Order 1**: `d[i] = v[i+1] - v[i]`, stencil `[-1, 1]`.
//! * **Order 2**: `d[i] = v[i+2] - 2 v[i+1] + v[i]`, stencil `[1, -2, 1]`.
//!
//! ## Invariants
//!
//! * Output length is `n - order`.
//! * `n > order`, otherwise no difference terms exist.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PossmoothError;

// ============================================================================
// Penalty Order
// ============================================================================

/// Order of the finite-difference penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PenaltyOrder {
    /// First differences (monotonicity).
    #[default]
    First,

    /// Second differences (convexity).
    Second,
}

impl PenaltyOrder {
    /// Numeric order (1 or 2).
    #[inline]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    /// Number of elements consumed by one difference term.
    #[inline]
    pub fn width(self) -> usize {
        self.as_u8() as usize + 1
    }

    /// Coefficients of one forward difference.
    #[inline]
    pub fn stencil(self) -> &'static [f64] {
        match self {
            Self::First => &[-1.0, 1.0],
            Self::Second => &[1.0, -2.0, 1.0],
        }
    }
}

impl TryFrom<u8> for PenaltyOrder {
    type Error = PossmoothError;

    fn try_from(order: u8) -> Result<Self, Self::Error> {
        match order {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(PossmoothError::InvalidOrder(other)),
        }
    }
}

// ============================================================================
// Difference Operator
// ============================================================================

/// Forward differences of `v` at the given order.
pub fn difference<T: Float>(v: &[T], order: PenaltyOrder) -> Result<Vec<T>, PossmoothError> {
    let n = v.len();
    let d = order.as_u8() as usize;
    if n <= d {
        return Err(PossmoothError::TooFewPoints { got: n, min: d + 1 });
    }

    let two = T::one() + T::one();
    let out = match order {
        PenaltyOrder::First => v.windows(2).map(|w| w[1] - w[0]).collect(),
        PenaltyOrder::Second => v.windows(3).map(|w| w[2] - two * w[1] + w[0]).collect(),
    };
    Ok(out)
}
