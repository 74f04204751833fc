//! Parallel bootstrap replicates.
//!
//! ## Purpose
//!
//! This module runs the resample-and-refit replicates of a bootstrap on the
//! global rayon pool. It plugs into the `possmooth` engine through the
//! `BootstrapPassFn` hook.
//!
//! ## Design notes
//!
//! * **Task per replicate**: Each replicate is one rayon task that reads the
//!   shared series and solver and writes only its own slot.
//! * **Index-assigned slots**: `collect` keeps replicate order, so the engine
//!   reduces the same distribution as the sequential pass.
//! * **Counter-based seeds**: Replicate `r` draws from its own generator,
//!   independent of which thread runs it.
//!
//! ## Invariants
//!
//! * The output has exactly one slot per requested replicate.
//! * Replicates that observe cancellation leave their slot empty.
//!
//! ## Non-goals
//!
//! * This module does not apply the failure policy or build the band
//!   (delegated to `possmooth`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
#[cfg(feature = "cpu")]
use log::debug;
#[cfg(feature = "cpu")]
use num_traits::Float;

// Export dependencies from possmooth crate
#[cfg(feature = "cpu")]
use possmooth::internals::engine::executor::{ReplicateJob, ReplicateSlot};

/// Run bootstrap replicates in parallel.
#[cfg(feature = "cpu")]
pub fn bootstrap_pass_parallel<T>(job: &ReplicateJob<'_, T>) -> Vec<ReplicateSlot<T>>
where
    T: Float + Send + Sync,
{
    debug!(
        "parallel bootstrap: replicates={}, threads={}",
        job.replicates,
        rayon::current_num_threads()
    );

    (0..job.replicates)
        .into_par_iter()
        .map(|r| {
            if job.is_cancelled() {
                None
            } else {
                Some(job.run_replicate(r))
            }
        })
        .collect()
}
