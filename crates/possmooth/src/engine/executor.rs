//! Execution engine for penalized smoothing and bootstrap bands.
//!
//! ## Purpose
//!
//! This module orchestrates a complete run: the point fit on the original
//! series, R resample-and-refit replicates, the failure policy, and the
//! normal-approximation band around the point estimate.
//!
//! ## Design notes
//!
//! * Replicates are described by a [`ReplicateJob`] and executed by a
//!   bootstrap pass. The default pass is sequential; extension crates inject
//!   a parallel one through [`BootstrapPassFn`].
//! * Each replicate writes only its own slot, so the collected distribution
//!   is indexed by replicate and independent of execution order.
//! * Dispersion is accumulated in replicate order, so sequential and
//!   parallel passes give identical bands for the same seed.
//!
//! ## Invariants
//!
//! * The point fit always runs first; its failure is reported as a point-fit
//!   failure, never as a replicate failure.
//! * A band is never built from fewer usable replicates than the run
//!   reports in its summary.
//!
//! ## Non-goals
//!
//! * This module does not validate builder configuration (handled by `validator`).
//! * This module does not handle parallel execution directly (handled by extension crates).

// External dependencies
use log::{debug, warn};
use num_traits::Float;
use rand::RngCore;
use std::sync::Arc;

// Internal dependencies
use crate::algorithms::active_set::DualActiveSet;
use crate::algorithms::formulate::{formulate_and_solve, PenaltySpec};
use crate::algorithms::solver::ConvexSolver;
use crate::engine::output::{aggregate, AggregatedResult, BootstrapSummary, SmoothResult};
use crate::engine::validator::Validator;
use crate::evaluation::intervals::{bootstrap_std_errors, normal_band, MIN_REPLICATES};
use crate::evaluation::resample::{replicate_rng, resample};
use crate::math::difference::PenaltyOrder;
use crate::primitives::cancel::CancelToken;
use crate::primitives::errors::PossmoothError;
use crate::primitives::series::Series;

// ============================================================================
// Type Definitions
// ============================================================================

/// Outcome slot of one replicate; `None` if it never ran.
pub type ReplicateSlot<T> = Option<Result<Vec<T>, PossmoothError>>;

/// Signature for custom bootstrap pass function
#[doc(hidden)]
pub type BootstrapPassFn<T> = fn(&ReplicateJob<'_, T>) -> Vec<ReplicateSlot<T>>;

/// What to do when a replicate's fit fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplicateFailurePolicy {
    /// Fail the whole run, naming the lowest failing replicate.
    #[default]
    Abort,

    /// Drop failed replicates and report them in the summary.
    Skip,
}

// ============================================================================
// Configuration
// ============================================================================

/// Bootstrap settings.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapConfig<T> {
    /// Number of replicates.
    pub replicates: usize,

    /// Two-sided confidence level.
    pub confidence_level: T,

    /// Base seed; drawn from entropy when absent.
    pub seed: Option<u64>,

    /// Replicate failure policy.
    pub failure_policy: ReplicateFailurePolicy,

    /// Optional cancellation token.
    pub cancel: Option<CancelToken>,
}

impl<T: Float> BootstrapConfig<T> {
    /// Default level (0.95) and policy (abort) for `replicates` replicates.
    pub fn new(replicates: usize) -> Self {
        Self {
            replicates,
            confidence_level: T::from(0.95).unwrap_or_else(T::zero),
            seed: None,
            failure_policy: ReplicateFailurePolicy::default(),
            cancel: None,
        }
    }
}

/// Full configuration of one run.
#[derive(Debug, Clone)]
pub struct SmoothConfig<T> {
    /// Penalty applied to every fit.
    pub penalty: PenaltySpec<T>,

    /// Bootstrap settings; point fit only when absent.
    pub bootstrap: Option<BootstrapConfig<T>>,

    /// Solver shared by every fit.
    pub solver: Arc<dyn ConvexSolver<T>>,

    /// Custom bootstrap pass (enables parallel execution).
    #[doc(hidden)]
    pub custom_bootstrap_pass: Option<BootstrapPassFn<T>>,
}

impl<T: Float + Send + Sync> SmoothConfig<T> {
    /// Point-fit configuration with the bundled solver.
    pub fn new(penalty: PenaltySpec<T>) -> Self {
        Self {
            penalty,
            bootstrap: None,
            solver: Arc::new(DualActiveSet::default()),
            custom_bootstrap_pass: None,
        }
    }
}

// ============================================================================
// Replicate Job
// ============================================================================

/// Everything a bootstrap pass needs to run replicates.
#[derive(Debug, Clone, Copy)]
pub struct ReplicateJob<'a, T> {
    /// Original series.
    pub series: &'a Series<T>,

    /// Penalty for each refit.
    pub penalty: &'a PenaltySpec<T>,

    /// Shared solver.
    pub solver: &'a dyn ConvexSolver<T>,

    /// Base seed for replicate generators.
    pub seed: u64,

    /// Number of replicates.
    pub replicates: usize,

    /// Replicate failure policy.
    pub failure_policy: ReplicateFailurePolicy,

    /// Optional cancellation token.
    pub cancel: Option<&'a CancelToken>,
}

impl<T: Float> ReplicateJob<'_, T> {
    /// Resample and refit replicate `replicate`.
    pub fn run_replicate(&self, replicate: usize) -> Result<Vec<T>, PossmoothError> {
        let mut rng = replicate_rng(self.seed, replicate);
        let sample = resample(self.series, &mut rng);
        formulate_and_solve(&sample, self.penalty, self.solver)
            .map_err(|err| err.in_replicate(replicate))
    }

    /// Whether cancellation was requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }
}

/// Run replicates one after another.
///
/// Under the abort policy the pass stops at the first failure; later slots
/// stay empty.
pub fn bootstrap_pass_sequential<T: Float>(job: &ReplicateJob<'_, T>) -> Vec<ReplicateSlot<T>> {
    let mut slots: Vec<ReplicateSlot<T>> = (0..job.replicates).map(|_| None).collect();

    for (r, slot) in slots.iter_mut().enumerate() {
        if job.is_cancelled() {
            break;
        }
        let outcome = job.run_replicate(r);
        let failed = outcome.is_err();
        *slot = Some(outcome);
        if failed && job.failure_policy == ReplicateFailurePolicy::Abort {
            break;
        }
    }

    slots
}

// ============================================================================
// Executor
// ============================================================================

/// Collected bootstrap distribution summary.
#[derive(Debug, Clone)]
struct Distribution<T> {
    std_errors: Vec<T>,
    used: usize,
    failed: Vec<usize>,
}

/// Orchestrates the point fit and the bootstrap.
#[derive(Debug, Clone)]
pub struct SmoothExecutor<T> {
    config: SmoothConfig<T>,
}

impl<T: Float + Send + Sync> SmoothExecutor<T> {
    /// Executor for `config`.
    pub fn from_config(config: SmoothConfig<T>) -> Self {
        Self { config }
    }

    /// Fit `series` and, if configured, its bootstrap band.
    pub fn run(&self, series: &Series<T>) -> Result<SmoothResult<T>, PossmoothError> {
        let penalty = &self.config.penalty;
        let solver = &*self.config.solver;

        debug!(
            "point fit: m={}, order={}, lambda={}, solver={}",
            series.len(),
            penalty.order.as_u8(),
            penalty.lambda.to_f64().unwrap_or(f64::NAN),
            solver.name()
        );
        let estimate = formulate_and_solve(series, penalty, solver)?;

        let mut result = SmoothResult {
            keys: series.keys().to_vec(),
            observed: series.values().to_vec(),
            estimate,
            std_errors: None,
            lower: None,
            upper: None,
            penalty: *penalty,
            bootstrap: None,
        };

        let Some(boot) = &self.config.bootstrap else {
            return Ok(result);
        };
        Validator::validate_replicates(boot.replicates)?;
        Validator::validate_confidence_level(boot.confidence_level)?;

        let seed = boot.seed.unwrap_or_else(rand::random);
        let job = ReplicateJob {
            series,
            penalty,
            solver,
            seed,
            replicates: boot.replicates,
            failure_policy: boot.failure_policy,
            cancel: boot.cancel.as_ref(),
        };

        debug!(
            "bootstrap: replicates={}, level={}, seed={}, policy={:?}",
            boot.replicates,
            boot.confidence_level.to_f64().unwrap_or(f64::NAN),
            seed,
            boot.failure_policy
        );
        let pass = self
            .config
            .custom_bootstrap_pass
            .unwrap_or(bootstrap_pass_sequential);
        let slots = pass(&job);
        let dist = Self::collect(series.len(), &job, slots)?;

        let band = normal_band(&result.estimate, dist.std_errors, boot.confidence_level)?;
        result.bootstrap = Some(BootstrapSummary {
            replicates_requested: boot.replicates,
            replicates_used: dist.used,
            failed_replicates: dist.failed,
            seed,
            confidence_level: boot.confidence_level.to_f64().unwrap_or(f64::NAN),
            z: band.z.to_f64().unwrap_or(f64::NAN),
        });
        result.std_errors = Some(band.std_errors);
        result.lower = Some(band.lower);
        result.upper = Some(band.upper);

        Ok(result)
    }

    /// Apply the failure policy and reduce slots to standard errors.
    fn collect(
        len: usize,
        job: &ReplicateJob<'_, T>,
        slots: Vec<ReplicateSlot<T>>,
    ) -> Result<Distribution<T>, PossmoothError> {
        let requested = job.replicates;
        let mut fits: Vec<Vec<T>> = Vec::with_capacity(requested);
        let mut failed = Vec::new();
        let mut missing = 0usize;

        for (r, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(Ok(fit)) => fits.push(fit),
                Some(Err(err)) => match job.failure_policy {
                    ReplicateFailurePolicy::Abort => {
                        return Err(PossmoothError::BootstrapFailed {
                            replicate: r,
                            source: Box::new(err),
                        });
                    }
                    ReplicateFailurePolicy::Skip => {
                        warn!("skipping bootstrap replicate {r}: {err}");
                        failed.push(r);
                    }
                },
                None => missing += 1,
            }
        }

        if missing > 0 {
            let completed = requested - missing;
            warn!("bootstrap cancelled after {completed} of {requested} replicates");
            return Err(PossmoothError::Cancelled {
                completed,
                requested,
            });
        }

        if fits.len() < MIN_REPLICATES {
            return Err(PossmoothError::InsufficientReplicates {
                got: fits.len(),
                min: MIN_REPLICATES,
            });
        }

        let std_errors = bootstrap_std_errors(len, fits.iter().map(Vec::as_slice))?;
        Ok(Distribution {
            std_errors,
            used: fits.len(),
            failed,
        })
    }
}

// ============================================================================
// Free-Function Entry Point
// ============================================================================

/// Point fit plus normal-approximation bootstrap band.
///
/// The base seed of the replicate generators is drawn from `rng` and
/// recorded in the returned summary.
#[allow(clippy::too_many_arguments)]
pub fn bootstrap_ci<T, R>(
    series: &Series<T>,
    lambda: T,
    order: PenaltyOrder,
    replicates: usize,
    confidence_level: T,
    rng: &mut R,
    solver: Arc<dyn ConvexSolver<T>>,
) -> Result<AggregatedResult<T>, PossmoothError>
where
    T: Float + Send + Sync,
    R: RngCore + ?Sized,
{
    let penalty = PenaltySpec::new(lambda, order);
    Validator::validate_series(series, &penalty)?;
    Validator::validate_replicates(replicates)?;
    Validator::validate_confidence_level(confidence_level)?;

    let mut bootstrap = BootstrapConfig::new(replicates);
    bootstrap.confidence_level = confidence_level;
    bootstrap.seed = Some(rng.next_u64());

    let config = SmoothConfig {
        penalty,
        bootstrap: Some(bootstrap),
        solver,
        custom_bootstrap_pass: None,
    };
    let result = SmoothExecutor::from_config(config).run(series)?;

    match (&result.lower, &result.upper, result.bootstrap) {
        (Some(lower), Some(upper), Some(summary)) => Ok(AggregatedResult {
            rows: aggregate(&result.keys, &result.observed, &result.estimate, lower, upper),
            penalty: result.penalty,
            summary,
        }),
        _ => Err(PossmoothError::InvalidInput(
            "bootstrap produced no confidence band".to_string(),
        )),
    }
}
