//! Ordered series of keyed observations.
//!
//! ## Purpose
//!
//! This module defines [`Series`], the paired (key, value) sequence that is
//! smoothed. Keys order the observations (a year, a dose, a position) and
//! values are the noisy measurements.
//!
//! ## Design notes
//!
//! * **Canonical series**: Built with [`Series::new`], keys are strictly
//!   increasing and every entry is finite.
//! * **Resampled series**: Built by the resampler, keys are only
//!   non-decreasing and duplicate rows are kept.
//!
//! ## Invariants
//!
//! * `keys.len() == values.len()` and the length is at least 1.
//! * Keys are non-decreasing.
//!
//! ## Non-goals
//!
//! * This module does not load or parse data.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PossmoothError;

/// An ordered sequence of (key, value) observations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Series<T> {
    keys: Vec<T>,
    values: Vec<T>,
}

impl<T: Float> Series<T> {
    /// Build a canonical series.
    ///
    /// Fails if the inputs are empty, differ in length, contain non-finite
    /// entries, or if keys are not strictly increasing.
    pub fn new(keys: Vec<T>, values: Vec<T>) -> Result<Self, PossmoothError> {
        if keys.is_empty() || values.is_empty() {
            return Err(PossmoothError::EmptyInput);
        }
        if keys.len() != values.len() {
            return Err(PossmoothError::MismatchedInputs {
                keys_len: keys.len(),
                values_len: values.len(),
            });
        }

        for (i, (&k, &v)) in keys.iter().zip(values.iter()).enumerate() {
            if !k.is_finite() {
                return Err(PossmoothError::InvalidNumericValue(format!(
                    "keys[{}]={}",
                    i,
                    k.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !v.is_finite() {
                return Err(PossmoothError::InvalidNumericValue(format!(
                    "values[{}]={}",
                    i,
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        if let Some(i) = keys.windows(2).position(|w| w[1] <= w[0]) {
            return Err(PossmoothError::UnsortedKeys { index: i + 1 });
        }

        Ok(Self { keys, values })
    }

    /// Build a canonical series keyed `1, 2, ..., m`.
    pub fn from_values(values: Vec<T>) -> Result<Self, PossmoothError> {
        let keys = (1..=values.len())
            .map(|i| T::from(i).unwrap_or_else(T::nan))
            .collect();
        Self::new(keys, values)
    }

    /// Wrap rows already in non-decreasing key order.
    pub(crate) fn from_sorted_rows(keys: Vec<T>, values: Vec<T>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        debug_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        Self { keys, values }
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Ordering keys.
    #[inline]
    pub fn keys(&self) -> &[T] {
        &self.keys
    }

    /// Observed values.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate over (key, value) pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }
}
