//! Input validation for smoothing configuration and data.
//!
//! ## Purpose
//!
//! This module validates configuration parameters and input data before any
//! fit runs: series shape, penalty weight and order, confidence level and
//! replicate count.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their mathematical constraints.
//! * Validation is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not correct invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::formulate::PenaltySpec;
use crate::evaluation::intervals::MIN_REPLICATES;
use crate::primitives::errors::PossmoothError;
use crate::primitives::series::Series;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for smoothing configuration and input data.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate keys and values and build the canonical series.
    pub fn validate_inputs<T: Float>(keys: &[T], values: &[T]) -> Result<Series<T>, PossmoothError> {
        Series::new(keys.to_vec(), values.to_vec())
    }

    /// Validate that `series` is long enough for `penalty`.
    pub fn validate_series<T: Float>(
        series: &Series<T>,
        penalty: &PenaltySpec<T>,
    ) -> Result<(), PossmoothError> {
        penalty.validate(series.len())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the penalty weight.
    pub fn validate_lambda<T: Float>(lambda: T) -> Result<(), PossmoothError> {
        if !lambda.is_finite() || lambda < T::zero() {
            return Err(PossmoothError::InvalidLambda(
                lambda.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the confidence level.
    pub fn validate_confidence_level<T: Float>(level: T) -> Result<(), PossmoothError> {
        if !level.is_finite() || level <= T::zero() || level >= T::one() {
            return Err(PossmoothError::InvalidConfidenceLevel(
                level.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the number of bootstrap replicates.
    ///
    /// # Notes
    ///
    /// * 0 replicates is invalid input.
    /// * 1 replicate cannot estimate a standard deviation.
    pub fn validate_replicates(replicates: usize) -> Result<(), PossmoothError> {
        if replicates == 0 {
            return Err(PossmoothError::InvalidReplicates(replicates));
        }
        if replicates < MIN_REPLICATES {
            return Err(PossmoothError::InsufficientReplicates {
                got: replicates,
                min: MIN_REPLICATES,
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), PossmoothError> {
        if let Some(param) = duplicate_param {
            return Err(PossmoothError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
