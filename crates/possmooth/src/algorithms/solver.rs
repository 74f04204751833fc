//! Convex solver interface and objective representation.
//!
//! ## Purpose
//!
//! This module defines the objective class handed to a solver and the
//! [`ConvexSolver`] trait every solver implements. The smoothing core only
//! depends on this contract; the concrete solver is injected.
//!
//! ## Key concepts
//!
//! The objective is
//!
//! ```text
//! f(b) = 0.5 * ||b - target||^2 + sum_j weight_j * max(0, a_j . b)
//! ```
//!
//! over a free vector `b`, where each `a_j` is a sparse row.
//!
//! ## Invariants
//!
//! * Every coefficient index is below `target.len()`.
//! * Every weight is finite and non-negative.
//!
//! ## Non-goals
//!
//! * This module does not solve anything (see `active_set` and `dual_cd`).
//! * This module does not model general constraints.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SolverError;

// ============================================================================
// Objective
// ============================================================================

/// One weighted positive-part term `weight * max(0, a . b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyTerm<T> {
    /// Non-negative term weight.
    pub weight: T,

    /// Sparse row `a` as (index, coefficient) pairs.
    pub coefficients: Vec<(usize, T)>,
}

impl<T: Float> PenaltyTerm<T> {
    /// The linear form `a . b`.
    #[inline]
    pub fn apply(&self, b: &[T]) -> T {
        self.coefficients
            .iter()
            .fold(T::zero(), |acc, &(i, c)| acc + c * b[i])
    }

    /// Squared norm of the row.
    #[inline]
    pub fn norm_sq(&self) -> T {
        self.coefficients
            .iter()
            .fold(T::zero(), |acc, &(_, c)| acc + c * c)
    }
}

/// Quadratic loss plus a finite sum of positive-part terms.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective<T> {
    target: Vec<T>,
    terms: Vec<PenaltyTerm<T>>,
}

impl<T: Float> Objective<T> {
    /// Pure quadratic objective centred on `target`.
    pub fn new(target: Vec<T>) -> Self {
        Self {
            target,
            terms: Vec::new(),
        }
    }

    /// Add a positive-part term.
    pub fn push_term(&mut self, term: PenaltyTerm<T>) {
        debug_assert!(term.coefficients.iter().all(|&(i, _)| i < self.target.len()));
        self.terms.push(term);
    }

    /// Dimension of the decision vector.
    #[inline]
    pub fn dim(&self) -> usize {
        self.target.len()
    }

    /// Centre of the quadratic term.
    #[inline]
    pub fn target(&self) -> &[T] {
        &self.target
    }

    /// Positive-part terms.
    #[inline]
    pub fn terms(&self) -> &[PenaltyTerm<T>] {
        &self.terms
    }

    /// Objective value at `b`.
    pub fn evaluate(&self, b: &[T]) -> T {
        let half = T::from(0.5).unwrap_or_else(T::one);
        let loss = self
            .target
            .iter()
            .zip(b)
            .fold(T::zero(), |acc, (&t, &bi)| acc + (bi - t) * (bi - t));
        let penalty = self
            .terms
            .iter()
            .fold(T::zero(), |acc, term| acc + term.weight * term.apply(b).max(T::zero()));
        half * loss + penalty
    }
}

// ============================================================================
// Solver Trait
// ============================================================================

/// A solver for [`Objective`].
///
/// Implementations must be pure functions of the objective: the same handle
/// is shared by concurrent bootstrap replicates.
pub trait ConvexSolver<T>: Debug + Send + Sync {
    /// Return the minimizer of `objective`.
    fn minimize(&self, objective: &Objective<T>) -> Result<Vec<T>, SolverError>;

    /// Short name used in log messages.
    fn name(&self) -> &'static str {
        "custom"
    }
}
