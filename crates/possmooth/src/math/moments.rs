//! Column-wise running moments.
//!
//! ## Purpose
//!
//! This module accumulates the per-index mean and variance of a stream of
//! equal-length vectors (one per bootstrap replicate) with Welford's
//! single-pass update, so the replicate matrix never has to be held twice.
//!
//! ## Invariants
//!
//! * Every pushed vector has the same length as the accumulator.
//! * The sample standard deviation uses the `n - 1` divisor and needs at
//!   least two vectors.

// External dependencies
use num_traits::Float;

/// Welford accumulator over equal-length vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMoments<T> {
    count: usize,
    mean: Vec<T>,
    m2: Vec<T>,
}

impl<T: Float> ColumnMoments<T> {
    /// Empty accumulator for vectors of length `len`.
    pub fn new(len: usize) -> Self {
        Self {
            count: 0,
            mean: vec![T::zero(); len],
            m2: vec![T::zero(); len],
        }
    }

    /// Number of vectors seen.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Add one vector.
    pub fn push(&mut self, x: &[T]) {
        debug_assert_eq!(x.len(), self.mean.len());
        self.count += 1;
        let n = T::from(self.count).unwrap_or_else(T::one);

        for ((mean, m2), &xi) in self.mean.iter_mut().zip(self.m2.iter_mut()).zip(x) {
            let delta = xi - *mean;
            *mean = *mean + delta / n;
            *m2 = *m2 + delta * (xi - *mean);
        }
    }

    /// Per-index sample standard deviation, `None` with fewer than two vectors.
    pub fn sample_sd(&self) -> Option<Vec<T>> {
        if self.count < 2 {
            return None;
        }
        let denom = T::from(self.count - 1).unwrap_or_else(T::one);
        Some(
            self.m2
                .iter()
                .map(|&m2| (m2 / denom).max(T::zero()).sqrt())
                .collect(),
        )
    }
}
