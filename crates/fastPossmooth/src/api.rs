//! High-level API for penalized smoothing with parallel bootstrap.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point of `fastPossmooth`. It
//! wraps the `possmooth` builder and runs bootstrap replicates on all
//! available CPU cores.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `possmooth` builder pattern.
//! * **Parallel-First**: Defaults to parallel replicates.
//! * **Deterministic**: Parallel and sequential runs give identical bands
//!   for the same seed.
//! * **Feature-Gated**: Parallelism is configurable via the `cpu` feature.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ParallelPosSmoothBuilder`] via `PosSmooth::new()`.
//! 2. Chain configuration methods (`.lambda()`, `.bootstrap()`, etc.).
//! 3. Call `.build()` and fit slices, vectors or `ndarray` arrays.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::evaluation::bootstrap::bootstrap_pass_parallel;

// External dependencies
use num_traits::Float;
use std::sync::Arc;

// Export dependencies from possmooth crate
use possmooth::internals::api::PosSmoothBuilder;

// Internal dependencies
use crate::input::SmoothInput;

// Publicly re-exported types
pub use possmooth::internals::api::{
    AggregatedResult, AggregatedRow, BootstrapSummary, CancelToken, ConvexSolver, DualActiveSet,
    DualCoordinateDescent, FitContext, FitStage, Objective, PenaltyOrder, PenaltySpec, PenaltyTerm,
    PosSmoothModel, PossmoothError, ReplicateFailurePolicy, Series, Shape, SmoothResult, SolverError,
};

// ============================================================================
// Extended Builder
// ============================================================================

/// Builder for penalized smoothing with parallel bootstrap support.
#[derive(Debug, Clone)]
pub struct ParallelPosSmoothBuilder<T> {
    /// Base builder from the possmooth crate
    pub base: PosSmoothBuilder<T>,

    /// Run replicates in parallel (default true).
    pub parallel: Option<bool>,
}

impl<T: Float + Send + Sync> Default for ParallelPosSmoothBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Send + Sync> ParallelPosSmoothBuilder<T> {
    /// Create a new builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from the possmooth builder
    /// * parallel: true (fastPossmooth extension)
    pub fn new() -> Self {
        Self {
            base: PosSmoothBuilder::new(),
            parallel: None,
        }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.base.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the penalty weight.
    pub fn lambda(mut self, lambda: T) -> Self {
        self.base = self.base.lambda(lambda);
        self
    }

    /// Set the difference order.
    pub fn order(mut self, order: PenaltyOrder) -> Self {
        self.base = self.base.order(order);
        self
    }

    /// Set the shape restriction.
    pub fn shape(mut self, shape: Shape) -> Self {
        self.base = self.base.shape(shape);
        self
    }

    /// Enable a bootstrap band with `replicates` replicates.
    pub fn bootstrap(mut self, replicates: usize) -> Self {
        self.base = self.base.bootstrap(replicates);
        self
    }

    /// Set the band confidence level.
    pub fn confidence_level(mut self, level: T) -> Self {
        self.base = self.base.confidence_level(level);
        self
    }

    /// Set the base seed for reproducible bootstraps.
    pub fn seed(mut self, seed: u64) -> Self {
        self.base = self.base.seed(seed);
        self
    }

    /// Set the replicate failure policy.
    pub fn failure_policy(mut self, policy: ReplicateFailurePolicy) -> Self {
        self.base = self.base.failure_policy(policy);
        self
    }

    /// Attach a cancellation token to the bootstrap.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.base = self.base.cancel_token(token);
        self
    }

    /// Replace the bundled solver.
    pub fn solver(mut self, solver: Arc<dyn ConvexSolver<T>>) -> Self {
        self.base = self.base.solver(solver);
        self
    }

    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<ParallelPosSmooth<T>, PossmoothError> {
        let mut builder = self.base;

        #[cfg(feature = "cpu")]
        {
            if self.parallel.unwrap_or(true) {
                builder = builder.custom_bootstrap_pass(bootstrap_pass_parallel);
            } else {
                builder.custom_bootstrap_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            // Fallback to sequential if cpu feature is disabled
            builder.custom_bootstrap_pass = None;
        }

        Ok(ParallelPosSmooth {
            model: builder.build()?,
        })
    }
}

// ============================================================================
// Extended Model
// ============================================================================

/// Smoothing model with parallel bootstrap support.
#[derive(Debug, Clone)]
pub struct ParallelPosSmooth<T> {
    model: PosSmoothModel<T>,
}

impl<T: Float + Send + Sync> ParallelPosSmooth<T> {
    /// Fit values observed at strictly increasing keys.
    pub fn fit<I1, I2>(&self, keys: &I1, values: &I2) -> Result<SmoothResult<T>, PossmoothError>
    where
        I1: SmoothInput<T> + ?Sized,
        I2: SmoothInput<T> + ?Sized,
    {
        let keys = keys.as_smooth_slice()?;
        let values = values.as_smooth_slice()?;
        self.model.fit(keys, values)
    }

    /// Fit values observed at keys `1..=m`.
    pub fn fit_values<I>(&self, values: &I) -> Result<SmoothResult<T>, PossmoothError>
    where
        I: SmoothInput<T> + ?Sized,
    {
        self.model.fit_values(values.as_smooth_slice()?)
    }

    /// Fit an already validated series.
    pub fn fit_series(&self, series: &Series<T>) -> Result<SmoothResult<T>, PossmoothError> {
        self.model.fit_series(series)
    }

    /// Penalty applied by this model.
    pub fn penalty(&self) -> &PenaltySpec<T> {
        self.model.penalty()
    }
}
