//! Normal-approximation bootstrap confidence bands.
//!
//! ## Purpose
//!
//! This module turns a bootstrap distribution of fitted vectors into
//! pointwise standard errors and `estimate ± z * se` intervals.
//!
//! ## Design notes
//!
//! * **Dispersion**: Sample standard deviation (`n - 1` divisor) per index,
//!   accumulated in replicate order with Welford's update.
//! * **Centre**: Intervals are centred on the point estimate of the original
//!   series, not on the bootstrap mean.
//!
//! ## Invariants
//!
//! * At least two replicates are required; one draw has no variance.
//! * `lower <= estimate <= upper` at every index.
//!
//! ## Non-goals
//!
//! * Percentile, BCa or studentized intervals.
//! * Simultaneous bands.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::moments::ColumnMoments;
use crate::math::normal::z_critical;
use crate::primitives::errors::PossmoothError;

/// Minimum replicates for a dispersion estimate.
pub const MIN_REPLICATES: usize = 2;

/// Pointwise confidence band.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBand<T> {
    /// Bootstrap standard error per index.
    pub std_errors: Vec<T>,

    /// Lower bounds.
    pub lower: Vec<T>,

    /// Upper bounds.
    pub upper: Vec<T>,

    /// Critical value used.
    pub z: T,
}

/// Per-index sample standard deviation across replicate fits.
pub fn bootstrap_std_errors<'a, T, I>(len: usize, replicates: I) -> Result<Vec<T>, PossmoothError>
where
    T: Float + 'a,
    I: IntoIterator<Item = &'a [T]>,
{
    let mut moments = ColumnMoments::new(len);
    for fit in replicates {
        moments.push(fit);
    }

    moments
        .sample_sd()
        .ok_or(PossmoothError::InsufficientReplicates {
            got: moments.count(),
            min: MIN_REPLICATES,
        })
}

/// Normal-approximation band around `estimate`.
pub fn normal_band<T: Float>(
    estimate: &[T],
    std_errors: Vec<T>,
    confidence_level: T,
) -> Result<ConfidenceBand<T>, PossmoothError> {
    let z = z_critical(confidence_level)?;

    let lower = estimate
        .iter()
        .zip(&std_errors)
        .map(|(&e, &se)| e - z * se)
        .collect();
    let upper = estimate
        .iter()
        .zip(&std_errors)
        .map(|(&e, &se)| e + z * se)
        .collect();

    Ok(ConfidenceBand {
        std_errors,
        lower,
        upper,
        z,
    })
}
