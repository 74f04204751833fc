//! High-level API for penalized smoothing.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the penalty, the optional bootstrap band and the
//! solver, and a model that fits series with that configuration.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PosSmoothBuilder`] via `PosSmooth::new()`.
//! 2. Chain configuration methods (`.lambda()`, `.order()`, `.bootstrap()`, etc.).
//! 3. Call `.build()` to get a [`PosSmoothModel`], then `.fit(&keys, &values)`.

// External dependencies
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::engine::executor::{BootstrapConfig, BootstrapPassFn, SmoothConfig, SmoothExecutor};
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::active_set::DualActiveSet;
pub use crate::algorithms::dual_cd::DualCoordinateDescent;
pub use crate::algorithms::formulate::{PenaltySpec, Shape};
pub use crate::algorithms::solver::{ConvexSolver, Objective, PenaltyTerm};
pub use crate::engine::executor::ReplicateFailurePolicy;
pub use crate::engine::output::{AggregatedResult, AggregatedRow, BootstrapSummary, SmoothResult};
pub use crate::math::difference::PenaltyOrder;
pub use crate::primitives::cancel::CancelToken;
pub use crate::primitives::errors::{FitContext, FitStage, PossmoothError, SolverError};
pub use crate::primitives::series::Series;

/// Fluent builder for penalized smoothing.
#[derive(Debug, Clone)]
pub struct PosSmoothBuilder<T> {
    /// Penalty weight (default 1.0).
    pub lambda: Option<T>,

    /// Difference order (default first).
    pub order: Option<PenaltyOrder>,

    /// Shape restriction (default increasing).
    pub shape: Option<Shape>,

    /// Bootstrap replicates; no band when absent.
    pub replicates: Option<usize>,

    /// Band confidence level (default 0.95).
    pub confidence_level: Option<T>,

    /// Base seed for the replicate generators.
    pub seed: Option<u64>,

    /// Replicate failure policy (default abort).
    pub failure_policy: Option<ReplicateFailurePolicy>,

    /// Cooperative cancellation for the bootstrap.
    pub cancel: Option<CancelToken>,

    /// Solver shared by every fit.
    pub solver: Option<Arc<dyn ConvexSolver<T>>>,

    // ======================================
    // DEV
    // ======================================
    /// Custom bootstrap pass function.
    #[doc(hidden)]
    pub custom_bootstrap_pass: Option<BootstrapPassFn<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float + Send + Sync> Default for PosSmoothBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + Send + Sync> PosSmoothBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            lambda: None,
            order: None,
            shape: None,
            replicates: None,
            confidence_level: None,
            seed: None,
            failure_policy: None,
            cancel: None,
            solver: None,
            custom_bootstrap_pass: None,
            duplicate_param: None,
        }
    }

    /// Set the penalty weight.
    pub fn lambda(mut self, lambda: T) -> Self {
        if self.lambda.is_some() {
            self.duplicate_param = Some("lambda");
        }
        self.lambda = Some(lambda);
        self
    }

    /// Set the difference order.
    pub fn order(mut self, order: PenaltyOrder) -> Self {
        if self.order.is_some() {
            self.duplicate_param = Some("order");
        }
        self.order = Some(order);
        self
    }

    /// Set the shape restriction.
    pub fn shape(mut self, shape: Shape) -> Self {
        if self.shape.is_some() {
            self.duplicate_param = Some("shape");
        }
        self.shape = Some(shape);
        self
    }

    /// Enable a bootstrap band with `replicates` replicates.
    pub fn bootstrap(mut self, replicates: usize) -> Self {
        if self.replicates.is_some() {
            self.duplicate_param = Some("bootstrap");
        }
        self.replicates = Some(replicates);
        self
    }

    /// Set the band confidence level.
    pub fn confidence_level(mut self, level: T) -> Self {
        if self.confidence_level.is_some() {
            self.duplicate_param = Some("confidence_level");
        }
        self.confidence_level = Some(level);
        self
    }

    /// Set the base seed for reproducible bootstraps.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Set the replicate failure policy.
    pub fn failure_policy(mut self, policy: ReplicateFailurePolicy) -> Self {
        if self.failure_policy.is_some() {
            self.duplicate_param = Some("failure_policy");
        }
        self.failure_policy = Some(policy);
        self
    }

    /// Attach a cancellation token to the bootstrap.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        if self.cancel.is_some() {
            self.duplicate_param = Some("cancel_token");
        }
        self.cancel = Some(token);
        self
    }

    /// Replace the bundled solver.
    pub fn solver(mut self, solver: Arc<dyn ConvexSolver<T>>) -> Self {
        if self.solver.is_some() {
            self.duplicate_param = Some("solver");
        }
        self.solver = Some(solver);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom bootstrap pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_bootstrap_pass(mut self, pass: BootstrapPassFn<T>) -> Self {
        self.custom_bootstrap_pass = Some(pass);
        self
    }

    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<PosSmoothModel<T>, PossmoothError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let lambda = self.lambda.unwrap_or_else(T::one);
        Validator::validate_lambda(lambda)?;

        let penalty = PenaltySpec::new(lambda, self.order.unwrap_or_default())
            .with_shape(self.shape.unwrap_or_default());

        let bootstrap = match self.replicates {
            Some(replicates) => {
                Validator::validate_replicates(replicates)?;
                let mut boot = BootstrapConfig::new(replicates);
                if let Some(level) = self.confidence_level {
                    Validator::validate_confidence_level(level)?;
                    boot.confidence_level = level;
                }
                boot.seed = self.seed;
                boot.failure_policy = self.failure_policy.unwrap_or_default();
                boot.cancel = self.cancel;
                Some(boot)
            }
            None => {
                if let Some(param) = self.orphan_bootstrap_param() {
                    return Err(PossmoothError::InvalidInput(format!(
                        "{param} requires bootstrap(replicates)"
                    )));
                }
                None
            }
        };

        let solver = self
            .solver
            .unwrap_or_else(|| Arc::new(DualActiveSet::default()));

        Ok(PosSmoothModel {
            config: SmoothConfig {
                penalty,
                bootstrap,
                solver,
                custom_bootstrap_pass: self.custom_bootstrap_pass,
            },
        })
    }

    /// First bootstrap-only setting given without `bootstrap`.
    fn orphan_bootstrap_param(&self) -> Option<&'static str> {
        if self.confidence_level.is_some() {
            Some("confidence_level")
        } else if self.seed.is_some() {
            Some("seed")
        } else if self.failure_policy.is_some() {
            Some("failure_policy")
        } else if self.cancel.is_some() {
            Some("cancel_token")
        } else {
            None
        }
    }
}

/// A validated smoothing model.
#[derive(Debug, Clone)]
pub struct PosSmoothModel<T> {
    config: SmoothConfig<T>,
}

impl<T: Float + Send + Sync> PosSmoothModel<T> {
    /// Fit values observed at strictly increasing `keys`.
    pub fn fit(&self, keys: &[T], values: &[T]) -> Result<SmoothResult<T>, PossmoothError> {
        let series = Validator::validate_inputs(keys, values)?;
        self.fit_series(&series)
    }

    /// Fit values observed at keys `1..=m`.
    pub fn fit_values(&self, values: &[T]) -> Result<SmoothResult<T>, PossmoothError> {
        let series = Series::from_values(values.to_vec())?;
        self.fit_series(&series)
    }

    /// Fit an already validated series.
    pub fn fit_series(&self, series: &Series<T>) -> Result<SmoothResult<T>, PossmoothError> {
        Validator::validate_series(series, &self.config.penalty)?;
        SmoothExecutor::from_config(self.config.clone()).run(series)
    }

    /// Penalty applied by this model.
    pub fn penalty(&self) -> &PenaltySpec<T> {
        &self.config.penalty
    }
}
