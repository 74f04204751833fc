//! Banded symmetric positive-definite systems.
//!
//! ## Purpose
//!
//! This module factors and solves `Q x = r` for a symmetric positive-definite
//! `Q` whose non-zeros lie within `bandwidth` of the diagonal. The dual Gram
//! matrices of difference penalties are tridiagonal (order 1) or
//! pentadiagonal (order 2), so a solve costs `O(n * bandwidth^2)`.
//!
//! ## Key concepts
//!
//! Only the lower band is stored, by diagonal offset:
//! `data[t * n + i] = Q(i, i - t)` for `0 <= t <= bandwidth`.
//!
//! ## Invariants
//!
//! * Factorization fails (returns `None`) instead of clamping a
//!   non-positive pivot.
//! * The Cholesky factor uses the same band layout as the matrix.

// External dependencies
use num_traits::Float;

/// Relative pivot floor, in units of machine epsilon.
const PIVOT_FLOOR_EPS: f64 = 1024.0;

// ============================================================================
// Banded Matrix
// ============================================================================

/// Lower band of a symmetric matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedMatrix<T> {
    n: usize,
    bandwidth: usize,
    data: Vec<T>,
}

impl<T: Float> BandedMatrix<T> {
    /// Zero `n x n` matrix with the given half-bandwidth.
    pub fn zeros(n: usize, bandwidth: usize) -> Self {
        Self {
            n,
            bandwidth,
            data: vec![T::zero(); (bandwidth + 1) * n],
        }
    }

    /// Dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Half-bandwidth.
    #[inline]
    pub fn bandwidth(&self) -> usize {
        self.bandwidth
    }

    /// Entry `(i, i - offset)`.
    #[inline]
    pub fn get(&self, i: usize, offset: usize) -> T {
        self.data[offset * self.n + i]
    }

    /// Set entry `(i, i - offset)` (and its mirror).
    #[inline]
    pub fn set(&mut self, i: usize, offset: usize, value: T) {
        debug_assert!(offset <= self.bandwidth && offset <= i);
        self.data[offset * self.n + i] = value;
    }

    /// `Q x` using both triangles.
    pub fn mul_vec(&self, x: &[T]) -> Vec<T> {
        let n = self.n;
        let mut out = vec![T::zero(); n];
        for i in 0..n {
            out[i] = out[i] + self.get(i, 0) * x[i];
            for t in 1..=self.bandwidth.min(i) {
                let q = self.get(i, t);
                out[i] = out[i] + q * x[i - t];
                out[i - t] = out[i - t] + q * x[i];
            }
        }
        out
    }
}

// ============================================================================
// Cholesky Factor
// ============================================================================

/// Cholesky factor `L` of a [`BandedMatrix`], `Q = L L^T`.
#[derive(Debug, Clone, PartialEq)]
pub struct BandedCholesky<T> {
    n: usize,
    bandwidth: usize,
    lb: Vec<T>,
}

impl<T: Float> BandedCholesky<T> {
    /// Factor `q`, or `None` if it is not numerically positive definite.
    pub fn factor(q: &BandedMatrix<T>) -> Option<Self> {
        let n = q.n;
        let k = q.bandwidth;
        let floor = T::epsilon() * T::from(PIVOT_FLOOR_EPS).unwrap_or_else(T::one);
        let mut lb = vec![T::zero(); (k + 1) * n];

        for i in 0..n {
            // Off-diagonal entries L(i, i - t), farthest first
            for t in (1..=k.min(i)).rev() {
                let j = i - t;
                let mut s = q.get(i, t);
                // sum over c < j of L(i, c) L(j, c), both inside the band
                for tj in 1..=k.min(j) {
                    let c = j - tj;
                    let ti = i - c;
                    if ti > k {
                        break;
                    }
                    s = s - lb[ti * n + i] * lb[tj * n + j];
                }
                lb[t * n + i] = s / lb[j];
            }

            let qii = q.get(i, 0);
            let mut diag = qii;
            for t in 1..=k.min(i) {
                let v = lb[t * n + i];
                diag = diag - v * v;
            }
            if !diag.is_finite() || diag <= floor * qii.abs() {
                return None;
            }
            lb[i] = diag.sqrt();
        }

        Some(Self {
            n,
            bandwidth: k,
            lb,
        })
    }

    /// Solve `Q x = rhs` in place.
    pub fn solve_in_place(&self, rhs: &mut [T]) {
        let n = self.n;
        let k = self.bandwidth;
        debug_assert_eq!(rhs.len(), n);

        // L z = rhs
        for i in 0..n {
            let mut s = rhs[i];
            for t in 1..=k.min(i) {
                s = s - self.lb[t * n + i] * rhs[i - t];
            }
            rhs[i] = s / self.lb[i];
        }

        // L^T x = z
        for i in (0..n).rev() {
            let mut s = rhs[i];
            for t in 1..=k.min(n - 1 - i) {
                s = s - self.lb[t * n + (i + t)] * rhs[i + t];
            }
            rhs[i] = s / self.lb[i];
        }
    }
}
