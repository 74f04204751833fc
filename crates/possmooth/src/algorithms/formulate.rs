//! Fit formulation: from a series to a penalized objective.
//!
//! ## Purpose
//!
//! This module turns a series, a penalty order and a penalty weight into the
//! [`Objective`] handed to a [`ConvexSolver`], and returns the solver's
//! minimizer as the fitted vector.
//!
//! ## Key concepts
//!
//! The fitted vector minimizes
//!
//! ```text
//! 0.5 * sum_i (y_i - b_i)^2 + lambda * sum_j max(0, s * diff_order(b)_j)
//! ```
//!
//! where `s` is `-1` for [`Shape::Increasing`] (violations of increase or
//! convexity are penalized) and `+1` for [`Shape::Decreasing`].
//!
//! * `lambda = 0` gives `b = y` exactly.
//! * Large `lambda` with order 1 gives an isotonic fit, with order 2 a
//!   discretely convex fit (or antitonic / concave for `Decreasing`).
//!
//! ## Invariants
//!
//! * Penalty rows are adjacency stencils in key order.
//! * Solver failures surface as [`PossmoothError::Solver`] with the fit
//!   context attached; the input is never returned in their place.

// External dependencies
use log::trace;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::solver::{ConvexSolver, Objective, PenaltyTerm};
use crate::math::difference::PenaltyOrder;
use crate::primitives::errors::{FitContext, FitStage, PossmoothError, SolverError};
use crate::primitives::series::Series;

// ============================================================================
// Shape
// ============================================================================

/// Direction of the shape restriction encouraged by the penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Penalize decreases (order 1) or concavity (order 2).
    #[default]
    Increasing,

    /// Penalize increases (order 1) or convexity (order 2).
    Decreasing,
}

impl Shape {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Self::Increasing => -1.0,
            Self::Decreasing => 1.0,
        }
    }
}

// ============================================================================
// Penalty Specification
// ============================================================================

/// Penalty parameters of one fit.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltySpec<T> {
    /// Penalty weight, finite and non-negative.
    pub lambda: T,

    /// Difference order.
    pub order: PenaltyOrder,

    /// Shape direction.
    pub shape: Shape,
}

impl<T: Float> PenaltySpec<T> {
    /// Increasing-shape penalty with the given weight and order.
    pub fn new(lambda: T, order: PenaltyOrder) -> Self {
        Self {
            lambda,
            order,
            shape: Shape::default(),
        }
    }

    /// Replace the shape direction.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Check the weight and that `len` observations admit a difference term.
    pub fn validate(&self, len: usize) -> Result<(), PossmoothError> {
        if !self.lambda.is_finite() || self.lambda < T::zero() {
            return Err(PossmoothError::InvalidLambda(
                self.lambda.to_f64().unwrap_or(f64::NAN),
            ));
        }
        let min = self.order.width();
        if len < min {
            return Err(PossmoothError::TooFewPoints { got: len, min });
        }
        Ok(())
    }

    /// Context attached to solver failures, as a point fit.
    pub fn context(&self, len: usize) -> FitContext {
        FitContext {
            stage: FitStage::Point,
            len,
            order: self.order.as_u8(),
            lambda: self.lambda.to_f64().unwrap_or(f64::NAN),
        }
    }
}

// ============================================================================
// Formulation
// ============================================================================

/// Build the penalized objective for `values`.
pub fn build_objective<T: Float>(values: &[T], penalty: &PenaltySpec<T>) -> Objective<T> {
    let m = values.len();
    let width = penalty.order.width();
    let sign = penalty.shape.sign();
    let stencil: Vec<T> = penalty
        .order
        .stencil()
        .iter()
        .map(|&c| T::from(c * sign).unwrap_or_else(T::zero))
        .collect();

    let mut objective = Objective::new(values.to_vec());
    for start in 0..m.saturating_sub(width - 1) {
        objective.push_term(PenaltyTerm {
            weight: penalty.lambda,
            coefficients: stencil
                .iter()
                .enumerate()
                .map(|(k, &c)| (start + k, c))
                .collect(),
        });
    }
    objective
}

/// Fit `series` under `penalty` with `solver`.
pub fn formulate_and_solve<T: Float>(
    series: &Series<T>,
    penalty: &PenaltySpec<T>,
    solver: &dyn ConvexSolver<T>,
) -> Result<Vec<T>, PossmoothError> {
    let m = series.len();
    penalty.validate(m)?;

    let objective = build_objective(series.values(), penalty);
    trace!(
        "formulated objective: m={}, terms={}, solver={}",
        m,
        objective.terms().len(),
        solver.name()
    );

    let fit = solver
        .minimize(&objective)
        .map_err(|source| PossmoothError::Solver {
            context: penalty.context(m),
            source,
        })?;

    if fit.len() != m {
        return Err(PossmoothError::Solver {
            context: penalty.context(m),
            source: SolverError::NumericalFailure {
                reason: format!("solver returned {} values for {} unknowns", fit.len(), m),
            },
        });
    }
    Ok(fit)
}
