#![cfg(feature = "dev")]
//! Tests for banded Cholesky factorization.
//!
//! ## Test Organization
//!
//! 1. **Solves** - Tridiagonal and pentadiagonal systems
//! 2. **Failures** - Singular and indefinite matrices

use approx::assert_relative_eq;

use possmooth::internals::math::banded::{BandedCholesky, BandedMatrix};

// ============================================================================
// Helper Functions
// ============================================================================

/// Gram matrix of the order-`d` difference rows on `n + d` points.
fn difference_gram(n: usize, stencil: &[f64]) -> BandedMatrix<f64> {
    let bandwidth = stencil.len() - 1;
    let mut q = BandedMatrix::zeros(n, bandwidth);
    for i in 0..n {
        for t in 0..=bandwidth.min(i) {
            let dot: f64 = (0..stencil.len())
                .filter(|&k| k >= t)
                .map(|k| stencil[k] * stencil[k - t])
                .sum();
            q.set(i, t, dot);
        }
    }
    q
}

fn solve(q: &BandedMatrix<f64>, rhs: &[f64]) -> Vec<f64> {
    let chol = BandedCholesky::factor(q).unwrap();
    let mut x = rhs.to_vec();
    chol.solve_in_place(&mut x);
    x
}

// ============================================================================
// Solve Tests
// ============================================================================

/// Tridiagonal (2, -1) system from first differences.
#[test]
fn test_tridiagonal_solve() {
    let q = difference_gram(5, &[1.0, -1.0]);
    assert_eq!(q.bandwidth(), 1);
    assert_eq!(q.get(3, 0), 2.0);
    assert_eq!(q.get(3, 1), -1.0);

    // Q * [1, 2, 3, 4, 5] = [0, 0, 0, 0, 6]
    let x = solve(&q, &[0.0, 0.0, 0.0, 0.0, 6.0]);
    for (got, want) in x.iter().zip([1.0, 2.0, 3.0, 4.0, 5.0]) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
}

/// Pentadiagonal (6, -4, 1) system from second differences.
#[test]
fn test_pentadiagonal_solve() {
    let n = 100;
    let q = difference_gram(n, &[1.0, -2.0, 1.0]);
    assert_eq!(q.get(10, 0), 6.0);
    assert_eq!(q.get(10, 1), -4.0);
    assert_eq!(q.get(10, 2), 1.0);

    let truth: Vec<f64> = (0..n).map(|i| (i as f64 * 0.1).sin() + 0.01 * i as f64).collect();
    let rhs = q.mul_vec(&truth);
    let x = solve(&q, &rhs);

    for (got, want) in x.iter().zip(&truth) {
        assert_relative_eq!(*got, *want, epsilon = 1e-6);
    }
}

/// Symmetric product uses both triangles.
#[test]
fn test_mul_vec_symmetric() {
    let q = difference_gram(3, &[1.0, -1.0]);
    assert_eq!(q.mul_vec(&[1.0, 0.0, 0.0]), vec![2.0, -1.0, 0.0]);
    assert_eq!(q.mul_vec(&[0.0, 0.0, 1.0]), vec![0.0, -1.0, 2.0]);
}

// ============================================================================
// Failure Tests
// ============================================================================

/// Rank-deficient matrices are reported instead of factored.
#[test]
fn test_singular_matrix() {
    let mut q = BandedMatrix::zeros(2, 1);
    q.set(0, 0, 2.0);
    q.set(1, 0, 2.0);
    q.set(1, 1, 2.0);

    assert!(BandedCholesky::factor(&q).is_none());
}

/// Indefinite matrices are reported instead of factored.
#[test]
fn test_indefinite_matrix() {
    let mut q = BandedMatrix::zeros(2, 1);
    q.set(0, 0, 1.0);
    q.set(1, 0, 1.0);
    q.set(1, 1, 2.0);

    assert!(BandedCholesky::factor(&q).is_none());
    assert_eq!(q.dim(), 2);
}
