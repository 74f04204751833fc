//! Active-set Newton solver on the banded dual.
//!
//! ## Purpose
//!
//! This module provides the default bundled [`ConvexSolver`]. It minimizes
//! `0.5 ||b - y||^2 + sum_j w_j max(0, a_j . b)` through its dual
//!
//! ```text
//! min_u 0.5 u^T Q u - u . (A y)    subject to 0 <= u_j <= w_j,   Q = A A^T
//! ```
//!
//! and recovers `b = y - A^T u`.
//!
//! ## Key concepts
//!
//! * **Working set**: every dual coordinate is at its lower bound, at its
//!   upper bound, or free. The free block is solved exactly by a Newton step,
//!   with a ratio test that stops at the first bound it crosses.
//! * **Banded subproblems**: when each variable is touched by nearby rows
//!   only (difference stencils), `Q` restricted to the free set keeps the
//!   same half-bandwidth and is solved with a banded Cholesky factor.
//! * **Release**: at a subspace minimizer, bound coordinates whose
//!   multiplier has the wrong sign are released. If releasing all of them
//!   stalls, the solver falls back to releasing the worst one at a time.
//!
//! ## Invariants
//!
//! * `u` stays inside its box throughout.
//! * On success every free coordinate is stationary and every bound one
//!   has a multiplier of the right sign, within tolerance.
//! * Linearly dependent active rows hand the problem to
//!   [`DualCoordinateDescent`], which needs no factorization.
//!
//! ## Non-goals
//!
//! * This is not a general QP engine; it handles only this objective class.

// External dependencies
use log::{debug, trace};
use num_traits::Float;
use std::time::{Duration, Instant};

// Internal dependencies
use crate::algorithms::dual_cd::DualCoordinateDescent;
use crate::algorithms::solver::{ConvexSolver, Objective, PenaltyTerm};
use crate::math::banded::{BandedCholesky, BandedMatrix};
use crate::primitives::errors::SolverError;

/// Default relative stationarity tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Rounding allowance on multipliers, in units of machine epsilon.
const ROUNDING_EPS: f64 = 64.0;

// ============================================================================
// Solver
// ============================================================================

/// Primal-feasible active-set method on the box-constrained dual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualActiveSet {
    /// Relative tolerance on dual stationarity and multiplier signs.
    pub tolerance: f64,

    /// Iteration budget; `50 * terms + 100` when absent.
    pub max_iterations: Option<usize>,

    /// Optional wall-clock budget per solve.
    pub time_limit: Option<Duration>,
}

impl Default for DualActiveSet {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: None,
            time_limit: None,
        }
    }
}

impl DualActiveSet {
    /// Set the relative tolerance.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration budget.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set a wall-clock budget per solve.
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Coordinate descent with the same time budget.
    fn fallback(&self) -> DualCoordinateDescent {
        let cd = DualCoordinateDescent::default();
        match self.time_limit {
            Some(limit) => cd.time_limit(limit),
            None => cd,
        }
    }
}

/// Position of a dual coordinate relative to its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Lower,
    Upper,
    Free,
}

impl<T: Float + Send + Sync> ConvexSolver<T> for DualActiveSet {
    fn minimize(&self, objective: &Objective<T>) -> Result<Vec<T>, SolverError> {
        let target = objective.target();

        for (j, term) in objective.terms().iter().enumerate() {
            if !term.weight.is_finite() || term.weight < T::zero() {
                return Err(SolverError::NumericalFailure {
                    reason: format!("term {j} has invalid weight"),
                });
            }
        }

        // Zero-weight and empty rows keep u_j = 0 and are left out
        let rows: Vec<&PenaltyTerm<T>> = objective
            .terms()
            .iter()
            .filter(|t| t.weight > T::zero() && t.norm_sq() > T::zero())
            .collect();
        let n = rows.len();
        if n == 0 {
            return Ok(target.to_vec());
        }

        let bandwidth = row_bandwidth(target.len(), &rows);
        let norms: Vec<T> = rows.iter().map(|r| r.norm_sq().sqrt()).collect();
        let a_dot_y: Vec<T> = rows.iter().map(|r| r.apply(target)).collect();
        let y_scale = target
            .iter()
            .fold(T::one(), |acc, &v| acc.max(v.abs()));
        let tol = T::from(self.tolerance)
            .unwrap_or_else(T::epsilon)
            .max(T::epsilon());
        let rounding = T::epsilon() * T::from(ROUNDING_EPS).unwrap_or_else(T::one);
        let half = T::from(0.5).unwrap_or_else(T::one);

        let max_iterations = self.max_iterations.unwrap_or(50 * n + 100);
        let start = Instant::now();

        let mut u = vec![T::zero(); n];
        let mut state = vec![Bound::Lower; n];
        let mut single_release = false;
        let mut last_dual = T::infinity();

        for iteration in 0..max_iterations {
            if let Some(limit) = self.time_limit {
                let elapsed = start.elapsed();
                if elapsed >= limit {
                    return Err(SolverError::Timeout { elapsed });
                }
            }

            let b = recover_primal(target, &rows, &u);
            if b.iter().any(|v| !v.is_finite()) {
                return Err(SolverError::NumericalFailure {
                    reason: format!("non-finite iterate at iteration {iteration}"),
                });
            }

            // Dual gradient: Q u - A y = -A b
            let grad: Vec<T> = rows.iter().map(|r| -r.apply(&b)).collect();
            let u_scale = u.iter().fold(T::zero(), |acc, &v| acc.max(v.abs()));
            let allowance =
                |p: usize| tol * norms[p] * y_scale + rounding * norms[p] * norms[p] * u_scale;

            let free: Vec<usize> = (0..n).filter(|&p| state[p] == Bound::Free).collect();
            let stationary = free.iter().all(|&p| grad[p].abs() <= allowance(p));

            if !stationary {
                let gram = free_gram(&rows, &free, bandwidth);
                let Some(chol) = BandedCholesky::factor(&gram) else {
                    debug!(
                        "active rows are linearly dependent ({} free); using coordinate descent",
                        free.len()
                    );
                    return self.fallback().minimize(objective);
                };
                let mut step: Vec<T> = free.iter().map(|&p| -grad[p]).collect();
                chol.solve_in_place(&mut step);
                take_step(&rows, &free, &step, &mut u, &mut state);
                continue;
            }

            // Subspace minimizer: check the bound multipliers
            let resid_sq = target
                .iter()
                .zip(&b)
                .fold(T::zero(), |acc, (&y, &bi)| acc + (y - bi) * (y - bi));
            let dual = half * resid_sq
                - u.iter()
                    .zip(&a_dot_y)
                    .fold(T::zero(), |acc, (&up, &ay)| acc + up * ay);
            if dual >= last_dual - rounding * last_dual.abs().max(T::one()) {
                single_release = true;
            }
            last_dual = dual;

            let mut violators: Vec<(usize, T)> = (0..n)
                .filter_map(|p| {
                    let wrong_sign = match state[p] {
                        Bound::Lower => -grad[p],
                        Bound::Upper => grad[p],
                        Bound::Free => return None,
                    };
                    let excess = wrong_sign - allowance(p);
                    (excess > T::zero()).then_some((p, excess))
                })
                .collect();

            if violators.is_empty() {
                trace!(
                    "dual active set converged: iterations={}, free={}, bandwidth={}",
                    iteration + 1,
                    free.len(),
                    bandwidth
                );
                return Ok(b);
            }

            if single_release {
                let worst = violators
                    .iter()
                    .copied()
                    .fold(violators[0], |w, v| if v.1 > w.1 { v } else { w });
                violators = vec![worst];
            }
            for (p, _) in violators {
                state[p] = Bound::Free;
            }
        }

        Err(SolverError::NumericalFailure {
            reason: format!("active set did not settle after {max_iterations} iterations"),
        })
    }

    fn name(&self) -> &'static str {
        "dual-active-set"
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Largest spread of row indices sharing a variable.
fn row_bandwidth<T: Float>(dim: usize, rows: &[&PenaltyTerm<T>]) -> usize {
    let mut span: Vec<Option<(usize, usize)>> = vec![None; dim];
    for (p, row) in rows.iter().enumerate() {
        for &(i, _) in &row.coefficients {
            span[i] = Some(match span[i] {
                Some((lo, hi)) => (lo.min(p), hi.max(p)),
                None => (p, p),
            });
        }
    }
    span.iter()
        .flatten()
        .map(|&(lo, hi)| hi - lo)
        .max()
        .unwrap_or(0)
}

/// `b = y - A^T u`.
fn recover_primal<T: Float>(target: &[T], rows: &[&PenaltyTerm<T>], u: &[T]) -> Vec<T> {
    let mut b = target.to_vec();
    for (row, &up) in rows.iter().zip(u) {
        if up != T::zero() {
            for &(i, c) in &row.coefficients {
                b[i] = b[i] - up * c;
            }
        }
    }
    b
}

/// `a . c` for two sparse rows.
fn sparse_dot<T: Float>(a: &PenaltyTerm<T>, c: &PenaltyTerm<T>) -> T {
    a.coefficients.iter().fold(T::zero(), |acc, &(i, x)| {
        c.coefficients
            .iter()
            .filter(|&&(k, _)| k == i)
            .fold(acc, |acc, &(_, z)| acc + x * z)
    })
}

/// `Q = A A^T` restricted to the free rows, in band storage.
///
/// Dropping rows never widens the band, so the full half-bandwidth still
/// bounds the restricted matrix.
fn free_gram<T: Float>(
    rows: &[&PenaltyTerm<T>],
    free: &[usize],
    bandwidth: usize,
) -> BandedMatrix<T> {
    let mut gram = BandedMatrix::zeros(free.len(), bandwidth);
    for (f, &p) in free.iter().enumerate() {
        gram.set(f, 0, rows[p].norm_sq());
        for t in 1..=bandwidth.min(f) {
            let q = free[f - t];
            if p - q > bandwidth {
                break;
            }
            gram.set(f, t, sparse_dot(rows[p], rows[q]));
        }
    }
    gram
}

/// Move the free block along `step`, stopping at the first bound crossed.
fn take_step<T: Float>(
    rows: &[&PenaltyTerm<T>],
    free: &[usize],
    step: &[T],
    u: &mut [T],
    state: &mut [Bound],
) {
    // Fraction of the step each coordinate can take before leaving its box
    let limits: Vec<Option<(T, Bound)>> = free
        .iter()
        .zip(step)
        .map(|(&p, &d)| {
            let next = u[p] + d;
            let w = rows[p].weight;
            if next < T::zero() {
                Some((u[p] / (u[p] - next), Bound::Lower))
            } else if next > w {
                Some(((w - u[p]) / (next - u[p]), Bound::Upper))
            } else {
                None
            }
        })
        .collect();

    let alpha = limits
        .iter()
        .flatten()
        .fold(T::one(), |acc, &(limit, _)| acc.min(limit));

    for ((&p, &d), limit) in free.iter().zip(step).zip(&limits) {
        match *limit {
            Some((l, bound)) if l <= alpha => {
                u[p] = if bound == Bound::Lower {
                    T::zero()
                } else {
                    rows[p].weight
                };
                state[p] = bound;
            }
            _ => {
                u[p] = (u[p] + alpha * d).max(T::zero()).min(rows[p].weight);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn chain(target: Vec<f64>, weight: f64, stencil: &[f64]) -> Objective<f64> {
        let m = target.len();
        let mut obj = Objective::new(target);
        for start in 0..=(m - stencil.len()) {
            obj.push_term(PenaltyTerm {
                weight,
                coefficients: stencil
                    .iter()
                    .enumerate()
                    .map(|(k, &c)| (start + k, c))
                    .collect(),
            });
        }
        obj
    }

    #[test]
    fn single_pair_pools_to_mean() {
        let obj = chain(vec![2.0, 1.0], 10.0, &[1.0, -1.0]);
        let b = DualActiveSet::default().minimize(&obj).unwrap();
        assert_abs_diff_eq!(b[0], 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(b[1], 1.5, epsilon = 1e-12);
    }

    #[test]
    fn saturated_multiplier_only_shrinks() {
        let obj = chain(vec![2.0, 1.0], 0.2, &[1.0, -1.0]);
        let b = DualActiveSet::default().minimize(&obj).unwrap();
        assert_abs_diff_eq!(b[0], 1.8, epsilon = 1e-12);
        assert_abs_diff_eq!(b[1], 1.2, epsilon = 1e-12);
    }

    #[test]
    fn agrees_with_coordinate_descent_on_first_differences() {
        let y = vec![0.3, 1.1, 0.2, 0.9, 1.7, 0.8, 1.4, 2.2, 1.6, 2.5];
        let obj = chain(y, 0.35, &[1.0, -1.0]);

        let exact = DualActiveSet::default().minimize(&obj).unwrap();
        let cd = DualCoordinateDescent::default().minimize(&obj).unwrap();
        for (a, c) in exact.iter().zip(&cd) {
            assert_abs_diff_eq!(*a, *c, epsilon = 1e-4);
        }
    }

    #[test]
    fn dependent_rows_fall_back_to_coordinate_descent() {
        // The same violated row twice: the free Gram block is singular
        let mut obj = Objective::new(vec![2.0_f64, 1.0]);
        for _ in 0..2 {
            obj.push_term(PenaltyTerm {
                weight: 10.0,
                coefficients: vec![(0, 1.0), (1, -1.0)],
            });
        }

        let b = DualActiveSet::default().minimize(&obj).unwrap();
        assert_abs_diff_eq!(b[0], 1.5, epsilon = 1e-6);
        assert_abs_diff_eq!(b[1], 1.5, epsilon = 1e-6);
    }

    #[test]
    fn bandwidth_follows_shared_variables() {
        let first = chain(vec![0.0; 6], 1.0, &[1.0, -1.0]);
        let second = chain(vec![0.0; 6], 1.0, &[1.0, -2.0, 1.0]);
        let rows1: Vec<_> = first.terms().iter().collect();
        let rows2: Vec<_> = second.terms().iter().collect();
        assert_eq!(row_bandwidth(6, &rows1), 1);
        assert_eq!(row_bandwidth(6, &rows2), 2);
    }

    #[test]
    fn iteration_budget_exhaustion_is_numerical_failure() {
        let obj = chain(vec![3.0, 2.0, 1.0, 0.0], 100.0, &[1.0, -1.0]);
        let err = DualActiveSet::default()
            .max_iterations(1)
            .minimize(&obj)
            .unwrap_err();
        assert!(matches!(err, SolverError::NumericalFailure { .. }));
    }
}
