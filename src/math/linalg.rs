//! Linear algebra backend abstraction for hyperplane fitting.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the dense solve used for
//! the normal equations, standardizing on the nalgebra backend.
//!
//! ## Design notes
//!
//! * Uses QR decomposition (Householder reflections) of the normal matrix.
//! * Rank deficiency is detected from the diagonal of R relative to its largest
//!   entry. There is no pseudo-inverse fallback: a singular system must reach the
//!   caller as a failure, never as a least-norm guess.
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to nalgebra.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + Debug + Send + Sync + 'static {
    /// Solve the dense system `A x = b`, with `A` given row-major as `n * n` values.
    ///
    /// Returns `None` when `A` is numerically singular.
    fn solve_dense(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn solve_dense(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>> {
        let tolerance = f64::EPSILON * 1000.0 * n as f64;
        nalgebra_backend::solve_dense_system(a, b, n, tolerance)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn solve_dense(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>> {
        let tolerance = f32::EPSILON * 100.0 * n as f32;
        nalgebra_backend::solve_dense_system(a, b, n, tolerance)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use nalgebra::{DMatrix, DVector, RealField};

    /// Solve a dense square system via QR, rejecting rank-deficient matrices.
    ///
    /// A pivot of R whose magnitude is at most `rank_tolerance` times the largest
    /// pivot marks the system as singular.
    pub fn solve_dense_system<R: RealField + Copy>(
        a: &[R],
        b: &[R],
        n: usize,
        rank_tolerance: R,
    ) -> Option<Vec<R>> {
        if n == 0 || a.len() != n * n || b.len() != n {
            return None;
        }

        let matrix = DMatrix::from_row_slice(n, n, a);
        let rhs = DVector::from_column_slice(b);

        let qr = matrix.qr();
        let r = qr.r();

        let zero: R = nalgebra::zero();
        let mut largest = zero;
        for i in 0..n {
            let pivot = r[(i, i)].abs();
            if pivot > largest {
                largest = pivot;
            }
        }
        if largest <= zero {
            return None;
        }
        for i in 0..n {
            if r[(i, i)].abs() <= largest * rank_tolerance {
                return None;
            }
        }

        let solution = qr.solve(&rhs)?;
        let values: Vec<R> = solution.as_slice().to_vec();
        if values.iter().all(|v| v.is_finite()) {
            Some(values)
        } else {
            None
        }
    }
}
