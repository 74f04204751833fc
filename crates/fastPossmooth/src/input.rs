//! Input abstractions for penalized smoothing.
//!
//! ## Purpose
//!
//! This module lets `fit` accept keys and values as slices, vectors or
//! one-dimensional `ndarray` arrays through a single trait.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Inputs are viewed as slices; nothing is copied here.
//! * **Fail-fast validation**: Non-contiguous arrays are rejected up front.
//!
//! ## Invariants
//!
//! * Returned slices cover every element of the input container.
//!
//! ## Non-goals
//!
//! * This module does not validate the series itself (handled by `possmooth`).

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};
use num_traits::Float;

// Export dependencies from possmooth crate
use possmooth::internals::primitives::errors::PossmoothError;

/// Types usable as keys or values of a smoothing fit.
pub trait SmoothInput<T: Float> {
    /// View the input as a contiguous slice.
    fn as_smooth_slice(&self) -> Result<&[T], PossmoothError>;
}

impl<T: Float> SmoothInput<T> for [T] {
    fn as_smooth_slice(&self) -> Result<&[T], PossmoothError> {
        Ok(self)
    }
}

impl<T: Float> SmoothInput<T> for Vec<T> {
    fn as_smooth_slice(&self) -> Result<&[T], PossmoothError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, S> SmoothInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_smooth_slice(&self) -> Result<&[T], PossmoothError> {
        self.as_slice().ok_or_else(|| {
            PossmoothError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}
