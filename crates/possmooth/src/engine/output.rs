//! Output types and result aggregation.
//!
//! ## Purpose
//!
//! This module defines [`SmoothResult`], the full output of a fit, and
//! [`AggregatedResult`], the per-point (key, observed, estimate, lower,
//! upper) rows consumed by reporting code. It also records the run
//! metadata needed to reproduce a bootstrap.
//!
//! ## Design notes
//!
//! * **Optional band**: Band columns are `None` when no bootstrap was run.
//! * **Order**: Rows follow the key order of the input series.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * All populated vectors have the same length as the input series.
//! * `lower <= estimate <= upper` wherever a band is present.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations beyond zipping columns.
//! * This module does not render plots.

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::formulate::PenaltySpec;

// ============================================================================
// Rows and Metadata
// ============================================================================

/// One aggregated output row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedRow<T> {
    /// Ordering key.
    pub key: T,

    /// Observed value.
    pub observed: T,

    /// Point estimate.
    pub estimate: T,

    /// Lower confidence bound.
    pub lower: T,

    /// Upper confidence bound.
    pub upper: T,
}

/// Metadata of a bootstrap run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BootstrapSummary {
    /// Replicates requested.
    pub replicates_requested: usize,

    /// Replicates that contributed to the band.
    pub replicates_used: usize,

    /// Indices of replicates dropped under the skip policy.
    pub failed_replicates: Vec<usize>,

    /// Base seed of the per-replicate generators.
    pub seed: u64,

    /// Confidence level of the band.
    pub confidence_level: f64,

    /// Critical value used for the band.
    pub z: f64,
}

// ============================================================================
// Result Structures
// ============================================================================

/// Output of a smoothing fit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothResult<T> {
    /// Ordering keys.
    pub keys: Vec<T>,

    /// Observed values.
    pub observed: Vec<T>,

    /// Point estimate.
    pub estimate: Vec<T>,

    /// Bootstrap standard errors.
    pub std_errors: Option<Vec<T>>,

    /// Lower confidence bounds.
    pub lower: Option<Vec<T>>,

    /// Upper confidence bounds.
    pub upper: Option<Vec<T>>,

    /// Penalty used for every fit of the run.
    pub penalty: PenaltySpec<T>,

    /// Bootstrap metadata, when a band was computed.
    pub bootstrap: Option<BootstrapSummary>,
}

/// Per-point rows plus bootstrap metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatedResult<T> {
    /// One row per observation, in key order.
    pub rows: Vec<AggregatedRow<T>>,

    /// Penalty used for every fit of the run.
    pub penalty: PenaltySpec<T>,

    /// Bootstrap metadata.
    pub summary: BootstrapSummary,
}

/// Zip columns into aggregated rows, preserving order.
pub fn aggregate<T: Float>(
    keys: &[T],
    observed: &[T],
    estimate: &[T],
    lower: &[T],
    upper: &[T],
) -> Vec<AggregatedRow<T>> {
    keys.iter()
        .zip(observed)
        .zip(estimate)
        .zip(lower.iter().zip(upper))
        .map(|(((&key, &observed), &estimate), (&lower, &upper))| AggregatedRow {
            key,
            observed,
            estimate,
            lower,
            upper,
        })
        .collect()
}

impl<T: Float> SmoothResult<T> {
    /// Check if a confidence band was computed.
    pub fn has_confidence_band(&self) -> bool {
        self.lower.is_some() && self.upper.is_some() && self.bootstrap.is_some()
    }

    /// Residuals `observed - estimate`.
    pub fn residuals(&self) -> Vec<T> {
        self.observed
            .iter()
            .zip(&self.estimate)
            .map(|(&y, &e)| y - e)
            .collect()
    }

    /// Aggregated rows, if a band was computed.
    pub fn aggregated(&self) -> Option<AggregatedResult<T>> {
        let (lower, upper, summary) = match (&self.lower, &self.upper, &self.bootstrap) {
            (Some(l), Some(u), Some(s)) => (l, u, s),
            _ => return None,
        };
        Some(AggregatedResult {
            rows: aggregate(&self.keys, &self.observed, &self.estimate, lower, upper),
            penalty: self.penalty,
            summary: summary.clone(),
        })
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for SmoothResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.keys.len())?;
        writeln!(f, "  Lambda:      {}", self.penalty.lambda)?;
        writeln!(f, "  Order:       {}", self.penalty.order.as_u8())?;
        writeln!(f, "  Shape:       {:?}", self.penalty.shape)?;

        if let Some(boot) = &self.bootstrap {
            writeln!(
                f,
                "  Bootstrap:   {} of {} replicates, seed {}",
                boot.replicates_used, boot.replicates_requested, boot.seed
            )?;
            writeln!(
                f,
                "  Level:       {} (z = {:.4})",
                boot.confidence_level, boot.z
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Smoothed Data:")?;
        let has_band = self.has_confidence_band();

        write!(f, "{:>10} {:>12} {:>12}", "Key", "Observed", "Estimate")?;
        if has_band {
            write!(f, " {:>12} {:>12} {:>12}", "Std_Err", "Lower", "Upper")?;
        }
        writeln!(f)?;

        let line_width = 36 + if has_band { 39 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Show first 10 and last 10 rows of long series
        let n = self.keys.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>10}", "...")?;
            }
            prev_idx = idx;

            write!(
                f,
                "{:>10.2} {:>12.6} {:>12.6}",
                self.keys[idx], self.observed[idx], self.estimate[idx]
            )?;
            if let (Some(se), Some(lo), Some(hi)) = (&self.std_errors, &self.lower, &self.upper) {
                write!(f, " {:>12.6} {:>12.6} {:>12.6}", se[idx], lo[idx], hi[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
