#![cfg(feature = "dev")]
//! Tests for the dense linear solver.
//!
//! ## Test Organization
//!
//! 1. **Solves** - Well-conditioned systems in f32 and f64
//! 2. **Rank Deficiency** - Singular and malformed systems

use approx::assert_relative_eq;

use robust_subset::internals::math::linalg::FloatLinalg;

// ============================================================================
// Solve Tests
// ============================================================================

/// Test a 2x2 system.
#[test]
fn test_solve_dense_2x2() {
    // 2x + y = 5, x + 3y = 10 → x = 1, y = 3
    let a = [2.0, 1.0, 1.0, 3.0];
    let b = [5.0, 10.0];
    let x = f64::solve_dense(&a, &b, 2).unwrap();
    assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
}

/// Test that the matrix is read row-major.
#[test]
fn test_solve_dense_row_major() {
    // Upper triangular: x + 2y = 5, y = 2 → x = 1
    let a = [1.0, 2.0, 0.0, 1.0];
    let b = [5.0, 2.0];
    let x = f64::solve_dense(&a, &b, 2).unwrap();
    assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
    assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
}

/// Test a 3x3 system in single precision.
#[test]
fn test_solve_dense_f32() {
    let a: [f32; 9] = [4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0];
    let expected: [f32; 3] = [1.0, -1.0, 2.0];
    let b: Vec<f32> = (0..3)
        .map(|i| (0..3).map(|j| a[i * 3 + j] * expected[j]).sum())
        .collect();
    let x = f32::solve_dense(&a, &b, 3).unwrap();
    for i in 0..3 {
        assert_relative_eq!(x[i], expected[i], epsilon = 1e-5);
    }
}

// ============================================================================
// Rank Deficiency Tests
// ============================================================================

/// Test that a singular matrix yields no solution.
#[test]
fn test_solve_dense_singular() {
    let a = [1.0, 2.0, 2.0, 4.0];
    let b = [1.0, 2.0];
    assert!(f64::solve_dense(&a, &b, 2).is_none());

    let zero = [0.0; 4];
    assert!(f64::solve_dense(&zero, &b, 2).is_none());
}

/// Test that malformed inputs yield no solution.
#[test]
fn test_solve_dense_malformed() {
    assert!(f64::solve_dense(&[], &[], 0).is_none());
    assert!(f64::solve_dense(&[1.0, 2.0, 3.0], &[1.0, 2.0], 2).is_none());
}
