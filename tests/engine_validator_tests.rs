#![cfg(feature = "dev")]
//! Tests for configuration and genotype validation.
//!
//! ## Test Organization
//!
//! 1. **Configuration** - Point sets, quantiles, penalties, duplicates
//! 2. **Genotypes** - Subset feasibility
//! 3. **Shape** - Point-set mismatch

use robust_subset::internals::engine::validator::Validator;
use robust_subset::internals::primitives::errors::RegressionError;
use robust_subset::internals::primitives::points::PointSet;

// ============================================================================
// Configuration Tests
// ============================================================================

/// Test quantile bounds.
#[test]
fn test_validate_quantile() {
    assert!(Validator::validate_quantile(2, 2, 10).is_ok());
    assert!(Validator::validate_quantile(10, 2, 10).is_ok());
    assert_eq!(
        Validator::validate_quantile(1, 2, 10),
        Err(RegressionError::InvalidQuantile {
            h: 1,
            min: 2,
            max: 10
        })
    );
    assert!(Validator::validate_quantile(11, 2, 10).is_err());
}

/// Test penalty finiteness.
#[test]
fn test_validate_penalty() {
    assert!(Validator::validate_penalty(-f64::MAX).is_ok());
    assert!(Validator::validate_penalty(0.0_f32).is_ok());
    assert!(matches!(
        Validator::validate_penalty(f64::NAN),
        Err(RegressionError::InvalidPenalty(_))
    ));
    assert!(Validator::validate_penalty(f64::INFINITY).is_err());
}

/// Test duplicate-parameter reporting.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("quantile")),
        Err(RegressionError::DuplicateParameter {
            parameter: "quantile"
        })
    );
}

/// Test that a point set needs at least d points.
#[test]
fn test_validate_point_set() {
    let enough = PointSet::from_flat(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
    assert!(Validator::validate_point_set(&enough).is_ok());

    let short = PointSet::from_flat(&[1.0, 2.0, 3.0, 4.0], 4).unwrap();
    assert_eq!(
        Validator::validate_point_set(&short),
        Err(RegressionError::TooFewPoints { got: 1, min: 4 })
    );
}

// ============================================================================
// Genotype Tests
// ============================================================================

/// Test feasible subsets.
#[test]
fn test_check_subset_feasible() {
    assert!(Validator::check_subset(&[0, 1], 2, 5).is_ok());
    assert!(Validator::check_subset(&[4, 0, 2], 3, 5).is_ok());
}

/// Test that every kind of infeasible subset reports its usable count.
#[test]
fn test_check_subset_infeasible() {
    let cases: [(&[usize], usize); 5] = [
        (&[1], 1),
        (&[1, 2, 3], 3),
        (&[2, 2], 1),
        (&[1, 9], 1),
        (&[], 0),
    ];
    for (indices, usable) in cases {
        assert_eq!(
            Validator::check_subset(indices, 2, 5),
            Err(RegressionError::InfeasibleGenotype {
                expected: 2,
                got: usable
            }),
            "{indices:?}"
        );
    }
}

// ============================================================================
// Shape Tests
// ============================================================================

/// Test point-set shape checks.
#[test]
fn test_validate_shape() {
    let points = PointSet::from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2).unwrap();
    assert!(Validator::validate_shape(&points, 3, 2).is_ok());
    assert_eq!(
        Validator::validate_shape(&points, 3, 3),
        Err(RegressionError::PointSetMismatch {
            expected_n: 3,
            expected_d: 3,
            got_n: 3,
            got_d: 2
        })
    );
}
