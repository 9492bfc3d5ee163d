//! Immutable point data for subset regression.
//!
//! ## Purpose
//!
//! This module defines `Point` and `PointSet`, the read-only problem instance
//! every evaluation fits against.
//!
//! ## Design notes
//!
//! * **Layout**: Coordinate 0 is the response y, coordinates 1..d-1 are predictors.
//! * **Validation**: `PointSet` constructors reject empty input, inconsistent
//!   dimensions and non-finite values once, so evaluations never re-check them.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Every point in a set has the same dimension d >= 1.
//! * n and d never change after construction.
//!
//! ## Non-goals
//!
//! * This module does not load or parse point data.

// External dependencies
use core::ops::Index;
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::RegressionError;

// ============================================================================
// Point
// ============================================================================

/// A single observation: response followed by predictors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point<T> {
    coords: Vec<T>,
}

impl<T: Float> Point<T> {
    /// Create a point from raw coordinates `[y, x_1, ..., x_{d-1}]`.
    pub fn new(coords: Vec<T>) -> Self {
        Self { coords }
    }

    /// Number of coordinates (d).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Response value (coordinate 0).
    #[inline]
    pub fn response(&self) -> T {
        self.coords[0]
    }

    /// Predictor values (coordinates 1..d-1).
    #[inline]
    pub fn predictors(&self) -> &[T] {
        &self.coords[1..]
    }

    /// All coordinates.
    #[inline]
    pub fn coords(&self) -> &[T] {
        &self.coords
    }
}

impl<T: Float> From<Vec<T>> for Point<T> {
    fn from(coords: Vec<T>) -> Self {
        Self::new(coords)
    }
}

// ============================================================================
// PointSet
// ============================================================================

/// Ordered, fixed collection of n points of dimension d.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet<T> {
    points: Vec<Point<T>>,
    dimension: usize,
}

impl<T: Float> PointSet<T> {
    /// Build a point set, validating shape and finiteness.
    pub fn new(points: Vec<Point<T>>) -> Result<Self, RegressionError> {
        let first = points.first().ok_or(RegressionError::EmptyInput)?;
        let dimension = first.dimension();
        if dimension == 0 {
            return Err(RegressionError::InvalidInput(
                "points must have at least one coordinate".to_string(),
            ));
        }

        for (i, point) in points.iter().enumerate() {
            if point.dimension() != dimension {
                return Err(RegressionError::DimensionMismatch {
                    index: i,
                    expected: dimension,
                    got: point.dimension(),
                });
            }
            if let Some(j) = point.coords.iter().position(|v| !v.is_finite()) {
                return Err(RegressionError::InvalidNumericValue(format!(
                    "point[{}][{}]={}",
                    i,
                    j,
                    point.coords[j].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(Self { points, dimension })
    }

    /// Build a point set from a row-major buffer of `n * dimension` values.
    pub fn from_flat(data: &[T], dimension: usize) -> Result<Self, RegressionError> {
        if data.is_empty() {
            return Err(RegressionError::EmptyInput);
        }
        if dimension == 0 || data.len() % dimension != 0 {
            return Err(RegressionError::InvalidInput(format!(
                "buffer of {} values cannot be split into points of dimension {}",
                data.len(),
                dimension
            )));
        }

        let points = data
            .chunks_exact(dimension)
            .map(|row| Point::new(row.to_vec()))
            .collect();
        Self::new(points)
    }

    /// Number of points (n).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a validated set; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimension shared by all points (d).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Point at `index`, if in range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Point<T>> {
        self.points.get(index)
    }

    /// All points in order.
    #[inline]
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Point<T>> {
        self.points.iter()
    }
}

impl<T> Index<usize> for PointSet<T> {
    type Output = Point<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a, T> IntoIterator for &'a PointSet<T> {
    type Item = &'a Point<T>;
    type IntoIter = core::slice::Iter<'a, Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
