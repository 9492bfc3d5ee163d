//! Tests for hyperplane fitting and residuals.
//!
//! These tests verify the fitting substrate shared by every loss:
//! - Exact fits through d support points
//! - Least-squares refits over a trimmed ordering
//! - Residual computation against arbitrary points
//!
//! ## Test Organization
//!
//! 1. **Support Fits** - Exact reproduction of support points for several d
//! 2. **Singular Systems** - Degenerate and underdetermined supports
//! 3. **Refits** - Trimmed and full least squares
//! 4. **Residuals** - Signs, squares and dimension checks

use approx::{assert_abs_diff_eq, assert_relative_eq};

use robust_subset::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Points `[y, x_1, ..., x_{d-1}]` on the plane with the given coefficients.
fn points_on_plane(coefficients: &[f64], predictors: &[Vec<f64>]) -> Vec<Point<f64>> {
    predictors
        .iter()
        .map(|x| {
            let y = coefficients[0]
                + coefficients[1..]
                    .iter()
                    .zip(x)
                    .map(|(b, xi)| b * xi)
                    .sum::<f64>();
            let mut coords = vec![y];
            coords.extend_from_slice(x);
            Point::new(coords)
        })
        .collect()
}

// ============================================================================
// Support Fit Tests
// ============================================================================

/// Test that a line through two points reproduces them exactly.
#[test]
fn test_fit_from_support_line() {
    let a = Point::new(vec![3.0, 1.0]);
    let b = Point::new(vec![9.0, 4.0]);
    let plane = HyperplaneFit::fit_from_support(&[&a, &b]).unwrap();

    assert_relative_eq!(plane.intercept(), 1.0, epsilon = 1e-10);
    assert_relative_eq!(plane.slopes()[0], 2.0, epsilon = 1e-10);
    assert_abs_diff_eq!(plane.residual(&a), 0.0, epsilon = 1e-10);
    assert_abs_diff_eq!(plane.residual(&b), 0.0, epsilon = 1e-10);
}

/// Test exact reproduction of support points for d = 2, 3 and 4.
#[test]
fn test_fit_from_support_reproduces_points() {
    let cases: Vec<(Vec<f64>, Vec<Vec<f64>>)> = vec![
        (vec![-1.0, 0.5], vec![vec![2.0], vec![-3.0]]),
        (
            vec![1.0, 2.0, -3.0],
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 1.0]],
        ),
        (
            vec![0.25, 1.5, -2.0, 4.0],
            vec![
                vec![1.0, 2.0, 0.0],
                vec![-1.0, 0.5, 3.0],
                vec![2.0, -1.0, 1.0],
                vec![0.0, 0.0, -2.0],
            ],
        ),
    ];

    for (coefficients, predictors) in cases {
        let support = points_on_plane(&coefficients, &predictors);
        let refs: Vec<&Point<f64>> = support.iter().collect();
        let plane = HyperplaneFit::fit_from_support(&refs).unwrap();

        assert_eq!(plane.dimension(), coefficients.len());
        for (got, want) in plane.coefficients().iter().zip(&coefficients) {
            assert_relative_eq!(*got, *want, epsilon = 1e-9);
        }
        for point in &support {
            assert_abs_diff_eq!(plane.residual(point), 0.0, epsilon = 1e-9);
        }
    }
}

/// Test the degenerate d = 1 case: the intercept is the single response.
#[test]
fn test_fit_from_support_constant() {
    let p = Point::new(vec![4.5]);
    let plane = HyperplaneFit::fit_from_support(&[&p]).unwrap();
    assert_relative_eq!(plane.intercept(), 4.5, epsilon = 1e-12);
    assert!(plane.slopes().is_empty());
}

/// Test single precision fitting.
#[test]
fn test_fit_from_support_f32() {
    let a = Point::new(vec![1.0_f32, 0.0]);
    let b = Point::new(vec![5.0_f32, 2.0]);
    let plane = HyperplaneFit::fit_from_support(&[&a, &b]).unwrap();
    assert_relative_eq!(plane.intercept(), 1.0_f32, epsilon = 1e-5);
    assert_relative_eq!(plane.slopes()[0], 2.0_f32, epsilon = 1e-5);
}

// ============================================================================
// Singular System Tests
// ============================================================================

/// Test that two points sharing an x value are singular.
#[test]
fn test_fit_from_support_duplicate_x_is_singular() {
    let a = Point::new(vec![1.0, 2.0]);
    let b = Point::new(vec![3.0, 2.0]);
    assert_eq!(
        HyperplaneFit::fit_from_support(&[&a, &b]),
        Err(RegressionError::SingularSystem { dimension: 2 })
    );
}

/// Test that three collinear predictors in d = 3 are singular.
#[test]
fn test_fit_from_support_collinear_predictors_is_singular() {
    let a = Point::new(vec![1.0, 0.0, 0.0]);
    let b = Point::new(vec![2.0, 1.0, 1.0]);
    let c = Point::new(vec![4.0, 2.0, 2.0]);
    assert!(matches!(
        HyperplaneFit::fit_from_support(&[&a, &b, &c]),
        Err(RegressionError::SingularSystem { dimension: 3 })
    ));
}

/// Test that fewer than d points or no points at all are singular.
#[test]
fn test_fit_from_support_too_few_points() {
    let a = Point::new(vec![1.0, 0.0, 0.0]);
    let b = Point::new(vec![2.0, 1.0, 0.0]);
    assert!(matches!(
        HyperplaneFit::fit_from_support(&[&a, &b]),
        Err(RegressionError::SingularSystem { .. })
    ));
    assert!(matches!(
        HyperplaneFit::fit_from_support::<f64>(&[]),
        Err(RegressionError::SingularSystem { .. })
    ));
}

// ============================================================================
// Refit Tests
// ============================================================================

/// Test that the trimmed refit ignores points beyond the quantile.
#[test]
fn test_refit_weighted_excludes_outlier() {
    let mut points = points_on_plane(
        &[1.0, 3.0],
        &[
            vec![0.0],
            vec![1.0],
            vec![2.0],
            vec![3.0],
            vec![4.0],
            vec![5.0],
        ],
    );
    points.push(Point::new(vec![100.0, 6.0]));
    let set = PointSet::new(points).unwrap();

    let truth = Hyperplane::new(vec![1.0, 3.0]);
    let residuals = HyperplaneFit::residuals_against(&truth, set.points()).unwrap();
    let ordering = residuals.sorted_by_squared();
    assert_eq!(ordering.last().unwrap().index, 6);

    let refit = HyperplaneFit::refit_weighted(&set, &ordering, 6).unwrap();
    assert_relative_eq!(refit.intercept(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(refit.slopes()[0], 3.0, epsilon = 1e-9);
}

/// Test refit argument checks.
#[test]
fn test_refit_weighted_invalid_quantile() {
    let set = PointSet::from_flat(&[0.0, 0.0, 1.0, 1.0, 2.0, 2.0], 2).unwrap();
    let plane = Hyperplane::new(vec![0.0, 1.0]);
    let ordering = HyperplaneFit::residuals_against(&plane, set.points())
        .unwrap()
        .sorted_by_squared();

    assert!(matches!(
        HyperplaneFit::refit_weighted(&set, &ordering, 4),
        Err(RegressionError::InvalidOrderIndex { .. })
    ));
    assert!(matches!(
        HyperplaneFit::refit_weighted(&set, &ordering, 1),
        Err(RegressionError::SingularSystem { dimension: 2 })
    ));
}

/// Test ordinary least squares against the closed-form simple regression.
#[test]
fn test_ordinary_least_squares() {
    // x = 0, 1, 2; y = 0, 1, 5 → slope 2.5, intercept -0.5
    let set = PointSet::from_flat(&[0.0, 0.0, 1.0, 1.0, 5.0, 2.0], 2).unwrap();
    let plane = HyperplaneFit::ordinary_least_squares(&set).unwrap();
    assert_relative_eq!(plane.intercept(), -0.5, epsilon = 1e-10);
    assert_relative_eq!(plane.slopes()[0], 2.5, epsilon = 1e-10);
}

// ============================================================================
// Residual Tests
// ============================================================================

/// Test residual signs, squares and ordering.
#[test]
fn test_residuals_against() {
    let set = PointSet::from_flat(&[1.0, 0.0, 0.0, 1.0, 5.0, 2.0], 2).unwrap();
    let plane = Hyperplane::new(vec![0.0, 1.0]);
    let residuals = HyperplaneFit::residuals_against(&plane, set.points()).unwrap();

    assert_eq!(residuals.len(), 3);
    assert_eq!(residuals.signed_values(), vec![1.0, -1.0, 3.0]);
    assert_eq!(residuals.squared_values(), vec![1.0, 1.0, 9.0]);

    // Ties on the squared residual are broken by point index.
    let order: Vec<usize> = residuals.sorted_by_squared().iter().map(|e| e.index).collect();
    assert_eq!(order, vec![0, 1, 2]);
    let order: Vec<usize> = residuals.sorted_by_signed().iter().map(|e| e.index).collect();
    assert_eq!(order, vec![1, 0, 2]);
}

/// Test that a point of the wrong dimension is reported.
#[test]
fn test_residuals_against_dimension_mismatch() {
    let plane = Hyperplane::new(vec![0.0, 1.0]);
    let points = vec![Point::new(vec![1.0, 2.0, 3.0])];
    assert_eq!(
        HyperplaneFit::residuals_against(&plane, &points),
        Err(RegressionError::DimensionMismatch {
            index: 0,
            expected: 2,
            got: 3
        })
    );
}

/// Test that a hyperplane without coefficients is rejected.
#[test]
fn test_residuals_against_empty_hyperplane() {
    let plane = Hyperplane::<f64>::new(vec![]);
    let points = vec![Point::new(vec![])];
    assert!(matches!(
        HyperplaneFit::residuals_against(&plane, &points),
        Err(RegressionError::InvalidInput(_))
    ));
}
