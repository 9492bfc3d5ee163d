//! Genotype boundary between the search engine and the fitness engine.
//!
//! ## Purpose
//!
//! This module defines `SubsetGenotype`, the view of an individual the fitness
//! engine consumes, and `SubsetSelection`, a ready-made implementation for
//! index-list and bit-mask genotypes.
//!
//! ## Design notes
//!
//! * **Borrowing**: Genotypes borrow the shared point set; evaluation never copies it.
//! * **No validation**: Subsets are validated by the engine, where an infeasible
//!   subset becomes a penalty instead of an error.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RegressionError;
use crate::primitives::points::{Point, PointSet};

// ============================================================================
// Genotype Trait
// ============================================================================

/// An individual that selects a subset of points from a shared point set.
pub trait SubsetGenotype<T: Float> {
    /// The full point set the subset indexes into.
    fn all_points(&self) -> &PointSet<T>;

    /// Indices of the selected support points.
    fn chosen_indices(&self) -> &[usize];

    /// Dimension of the points (d).
    fn point_dimension(&self) -> usize {
        self.all_points().dimension()
    }

    /// The selected points, or `None` if any index is out of range.
    fn chosen_subset(&self) -> Option<Vec<&Point<T>>> {
        let points = self.all_points();
        self.chosen_indices()
            .iter()
            .map(|&i| points.get(i))
            .collect()
    }
}

// ============================================================================
// Subset Selection
// ============================================================================

/// Genotype holding an explicit list of point indices.
#[derive(Debug, Clone)]
pub struct SubsetSelection<'a, T> {
    points: &'a PointSet<T>,
    indices: Vec<usize>,
}

impl<'a, T: Float> SubsetSelection<'a, T> {
    /// Select points by index.
    pub fn new(points: &'a PointSet<T>, indices: Vec<usize>) -> Self {
        Self { points, indices }
    }

    /// Select the points whose mask bit is set.
    pub fn from_mask(points: &'a PointSet<T>, mask: &[bool]) -> Result<Self, RegressionError> {
        if mask.len() != points.len() {
            return Err(RegressionError::InvalidInput(format!(
                "mask has {} bits for {} points",
                mask.len(),
                points.len()
            )));
        }

        let indices = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &bit)| bit.then_some(i))
            .collect();
        Ok(Self { points, indices })
    }
}

impl<T: Float> SubsetGenotype<T> for SubsetSelection<'_, T> {
    fn all_points(&self) -> &PointSet<T> {
        self.points
    }

    fn chosen_indices(&self) -> &[usize] {
        &self.indices
    }
}
