//! Error types for smoothing and bootstrap operations.
//!
//! ## Purpose
//!
//! This module defines every error condition that can occur while fitting a
//! penalized smooth or estimating its bootstrap confidence band: input
//! validation, parameter constraints, solver failures and bootstrap-level
//! failures.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (lengths, indices, lambda).
//! * **Staged**: Solver failures carry the fit context that produced them,
//!   including whether it was the point fit or which bootstrap replicate,
//!   and the message names that stage.
//! * **Deferred**: Builder errors are stored and reported by `build()`.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * A solver error is never downgraded to a default value.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or retry strategies.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Solver Error
// ============================================================================

/// Failure reported by a convex solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The problem has no feasible point.
    #[error("problem is infeasible")]
    Infeasible,

    /// The objective is unbounded below.
    #[error("objective is unbounded")]
    Unbounded,

    /// The solver failed numerically (non-convergence, non-finite iterates).
    #[error("numerical failure: {reason}")]
    NumericalFailure {
        /// Human-readable cause.
        reason: String,
    },

    /// The solver exceeded its time budget.
    #[error("solver timed out after {elapsed:?}")]
    Timeout {
        /// Time spent before giving up.
        elapsed: Duration,
    },
}

// ============================================================================
// Fit Context
// ============================================================================

/// Which fit of a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitStage {
    /// The fit of the original series.
    #[default]
    Point,

    /// The refit of a bootstrap replicate.
    Replicate(usize),
}

impl Display for FitStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Point => write!(f, "point fit"),
            Self::Replicate(r) => write!(f, "bootstrap replicate {r}"),
        }
    }
}

/// The parameters of the fit that produced a solver failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitContext {
    /// Stage of the failing fit.
    pub stage: FitStage,

    /// Series length.
    pub len: usize,

    /// Penalty order (1 or 2).
    pub order: u8,

    /// Penalty weight.
    pub lambda: f64,
}

impl Display for FitContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} (m={}, order={}, lambda={})",
            self.stage, self.len, self.order, self.lambda
        )
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for smoothing and bootstrap operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PossmoothError {
    /// Input arrays are empty.
    #[error("Input arrays are empty")]
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Keys and values must have the same number of elements.
    #[error("Length mismatch: keys has {keys_len} points, values has {values_len}")]
    MismatchedInputs {
        /// Number of ordering keys.
        keys_len: usize,
        /// Number of observed values.
        values_len: usize,
    },

    /// Input data contains NaN or infinite values.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// The series is too short for the selected penalty order.
    #[error("Too few points: got {got}, need at least {min}")]
    TooFewPoints {
        /// Number of points provided.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// Canonical series keys must be strictly increasing.
    #[error("Keys are not strictly increasing at index {index}")]
    UnsortedKeys {
        /// First index whose key does not exceed its predecessor.
        index: usize,
    },

    /// Penalty weight must be finite and non-negative.
    #[error("Invalid lambda: {0} (must be >= 0 and finite)")]
    InvalidLambda(f64),

    /// Penalty order must be 1 or 2.
    #[error("Invalid penalty order: {0} (must be 1 or 2)")]
    InvalidOrder(u8),

    /// Confidence level must lie strictly between 0 and 1.
    #[error("Invalid confidence level: {0} (must be > 0 and < 1)")]
    InvalidConfidenceLevel(f64),

    /// Replicate count must be positive.
    #[error("Invalid replicate count: {0} (must be at least 1)")]
    InvalidReplicates(usize),

    /// The solver failed on a fit.
    #[error("Solver failed in {context}: {source}")]
    Solver {
        /// Parameters of the failing fit.
        context: FitContext,
        /// Underlying solver failure.
        #[source]
        source: SolverError,
    },

    /// Too few replicates to estimate a standard deviation.
    #[error("Insufficient replicates: got {got}, need at least {min}")]
    InsufficientReplicates {
        /// Number of usable replicates.
        got: usize,
        /// Minimum required replicates.
        min: usize,
    },

    /// A bootstrap replicate failed under the abort policy.
    #[error("Bootstrap aborted: {source}")]
    BootstrapFailed {
        /// Zero-based index of the failing replicate.
        replicate: usize,
        /// Failure of that replicate's fit.
        #[source]
        source: Box<PossmoothError>,
    },

    /// The run was cancelled before all replicates completed.
    #[error("Bootstrap cancelled after {completed} of {requested} replicates")]
    Cancelled {
        /// Replicates completed before cancellation was observed.
        completed: usize,
        /// Replicates requested.
        requested: usize,
    },

    /// Parameter was set multiple times in the builder.
    #[error(
        "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
    )]
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl PossmoothError {
    /// Whether the error belongs to the input-validation family.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::InvalidInput(_)
                | Self::MismatchedInputs { .. }
                | Self::InvalidNumericValue(_)
                | Self::TooFewPoints { .. }
                | Self::UnsortedKeys { .. }
                | Self::InvalidLambda(_)
                | Self::InvalidOrder(_)
                | Self::InvalidConfidenceLevel(_)
                | Self::InvalidReplicates(_)
        )
    }

    /// Re-tag a solver failure as coming from bootstrap replicate `replicate`.
    pub fn in_replicate(self, replicate: usize) -> Self {
        match self {
            Self::Solver { context, source } => Self::Solver {
                context: FitContext {
                    stage: FitStage::Replicate(replicate),
                    ..context
                },
                source,
            },
            other => other,
        }
    }

    /// The underlying solver error, looking through bootstrap wrapping.
    pub fn solver_error(&self) -> Option<&SolverError> {
        match self {
            Self::Solver { source, .. } => Some(source),
            Self::BootstrapFailed { source, .. } => source.solver_error(),
            _ => None,
        }
    }
}
