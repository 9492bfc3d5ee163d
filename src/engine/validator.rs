//! Validation of engine configuration and genotypes.
//!
//! ## Purpose
//!
//! This module checks the configuration a fitness engine is built with and the
//! subsets genotypes propose, before any fitting happens.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//!
//! ## Key concepts
//!
//! * **Quantile bounds**: h must lie in `[d, n]`.
//! * **Subset feasibility**: exactly d distinct, in-range indices.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not repair invalid subsets or clamp quantiles.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RegressionError;
use crate::primitives::points::PointSet;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for engine configuration and genotypes.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Configuration Validation
    // ========================================================================

    /// Validate that the point set can support a fit of its own dimension.
    pub fn validate_point_set<T: Float>(points: &PointSet<T>) -> Result<(), RegressionError> {
        if points.is_empty() {
            return Err(RegressionError::EmptyInput);
        }
        let d = points.dimension();
        if points.len() < d {
            return Err(RegressionError::TooFewPoints {
                got: points.len(),
                min: d,
            });
        }
        Ok(())
    }

    /// Validate the quantile h against `[d, n]`.
    pub fn validate_quantile(h: usize, d: usize, n: usize) -> Result<(), RegressionError> {
        if h < d || h > n {
            return Err(RegressionError::InvalidQuantile { h, min: d, max: n });
        }
        Ok(())
    }

    /// Validate the penalty fitness.
    pub fn validate_penalty<T: Float>(penalty: T) -> Result<(), RegressionError> {
        if !penalty.is_finite() {
            return Err(RegressionError::InvalidPenalty(
                penalty.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that no builder parameter was set twice.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), RegressionError> {
        if let Some(parameter) = duplicate_param {
            return Err(RegressionError::DuplicateParameter { parameter });
        }
        Ok(())
    }

    /// Validate that a genotype's point set has the shape the engine was built for.
    pub fn validate_shape<T: Float>(
        points: &PointSet<T>,
        expected_n: usize,
        expected_d: usize,
    ) -> Result<(), RegressionError> {
        if points.len() != expected_n || points.dimension() != expected_d {
            return Err(RegressionError::PointSetMismatch {
                expected_n,
                expected_d,
                got_n: points.len(),
                got_d: points.dimension(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Genotype Validation
    // ========================================================================

    /// Check that a subset names exactly `d` distinct indices below `n`.
    ///
    /// Failure is reported as `InfeasibleGenotype` with the number of usable
    /// (distinct, in-range) indices.
    pub fn check_subset(indices: &[usize], d: usize, n: usize) -> Result<(), RegressionError> {
        let mut usable: Vec<usize> = indices.iter().copied().filter(|&i| i < n).collect();
        usable.sort_unstable();
        usable.dedup();

        if indices.len() != d || usable.len() != d {
            return Err(RegressionError::InfeasibleGenotype {
                expected: d,
                got: usable.len(),
            });
        }
        Ok(())
    }
}
