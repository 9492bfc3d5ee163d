//! Hyperplane fitting and residual computation.
//!
//! ## Purpose
//!
//! This module provides the shared substrate of every robust loss: fitting a
//! hyperplane through d support points, refitting it by least squares over a
//! trimmed selection, and computing residuals of arbitrary points against it.
//!
//! ## Design notes
//!
//! * **Algorithm**: Builds the normal equations MᵗM·β = Mᵗy from the design
//!   matrix rows `[1, x_1, ..., x_{d-1}]` and solves them densely.
//! * **Failure**: Rank-deficient systems surface as `SingularSystem`.
//! * **Generics**: Generic over `FloatLinalg` types.
//!
//! ## Key concepts
//!
//! * **Support points**: d affinely independent points determine the hyperplane
//!   exactly; every support point then has a zero residual.
//! * **Trimmed refit**: Least squares over the first `quantile` entries of an
//!   ordering of residuals.
//!
//! ## Invariants
//!
//! * Fitted coefficients are always finite.
//! * A hyperplane of dimension d has one intercept and d-1 slopes.
//!
//! ## Non-goals
//!
//! * This module does not score residuals (handled by `loss`).
//! * This module does not choose which points to trim.

// External dependencies
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::RegressionError;
use crate::primitives::points::{Point, PointSet};
use crate::primitives::residuals::{ResidualEntry, ResidualSet};

// ============================================================================
// Hyperplane
// ============================================================================

/// Hyperplane coefficients: intercept followed by one slope per predictor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hyperplane<T> {
    coefficients: Vec<T>,
}

impl<T: Float> Hyperplane<T> {
    /// Create a hyperplane from `[b0, b1, ..., b_{d-1}]`.
    pub fn new(coefficients: Vec<T>) -> Self {
        Self { coefficients }
    }

    /// Number of coefficients (d).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coefficients.len()
    }

    /// All coefficients.
    #[inline]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Intercept b0.
    #[inline]
    pub fn intercept(&self) -> T {
        self.coefficients[0]
    }

    /// Replace the intercept, leaving the slopes untouched.
    #[inline]
    pub fn set_intercept(&mut self, intercept: T) {
        self.coefficients[0] = intercept;
    }

    /// Slopes b1..b_{d-1}.
    #[inline]
    pub fn slopes(&self) -> &[T] {
        &self.coefficients[1..]
    }

    /// Predicted response `b0 + Σ b_j x_j` for a point.
    #[inline]
    pub fn predict(&self, point: &Point<T>) -> T {
        self.intercept() + self.slope_term(point)
    }

    /// Signed residual `y - ŷ` of a point.
    #[inline]
    pub fn residual(&self, point: &Point<T>) -> T {
        point.response() - self.predict(point)
    }

    /// Residual ignoring the intercept, `y - Σ b_j x_j`.
    #[inline]
    pub fn partial_residual(&self, point: &Point<T>) -> T {
        point.response() - self.slope_term(point)
    }

    /// Consume the hyperplane, returning its coefficients.
    pub fn into_coefficients(self) -> Vec<T> {
        self.coefficients
    }

    fn slope_term(&self, point: &Point<T>) -> T {
        self.slopes()
            .iter()
            .zip(point.predictors())
            .fold(T::zero(), |acc, (&b, &x)| acc + b * x)
    }
}

// ============================================================================
// Hyperplane Fit
// ============================================================================

/// Normal-equations fitting for hyperplanes.
pub struct HyperplaneFit;

impl HyperplaneFit {
    /// Fit the hyperplane passing through the given support points.
    ///
    /// Fails with `SingularSystem` if fewer than d points are given or if they
    /// are not affinely independent.
    pub fn fit_from_support<T: FloatLinalg>(
        support: &[&Point<T>],
    ) -> Result<Hyperplane<T>, RegressionError> {
        let d = match support.first() {
            Some(first) => first.dimension(),
            None => return Err(RegressionError::SingularSystem { dimension: 0 }),
        };
        if support.len() < d {
            return Err(RegressionError::SingularSystem { dimension: d });
        }
        Self::solve_normal_equations(support.iter().copied(), d)
    }

    /// Least-squares refit over the first `quantile` entries of `ordering`.
    ///
    /// `ordering` is expected to be sorted ascending by squared residual, so the
    /// refit covers the best-fitting points.
    pub fn refit_weighted<T: FloatLinalg>(
        points: &PointSet<T>,
        ordering: &[ResidualEntry<T>],
        quantile: usize,
    ) -> Result<Hyperplane<T>, RegressionError> {
        if quantile > ordering.len() {
            return Err(RegressionError::InvalidOrderIndex {
                index: quantile,
                len: ordering.len(),
            });
        }
        let d = points.dimension();
        if quantile < d {
            return Err(RegressionError::SingularSystem { dimension: d });
        }

        let mut selected = Vec::with_capacity(quantile);
        for entry in &ordering[..quantile] {
            let point = points.get(entry.index).ok_or_else(|| {
                RegressionError::InvalidInput(format!(
                    "residual refers to point {} of {}",
                    entry.index,
                    points.len()
                ))
            })?;
            selected.push(point);
        }
        Self::solve_normal_equations(selected.into_iter(), d)
    }

    /// Ordinary least squares over every point of the set.
    pub fn ordinary_least_squares<T: FloatLinalg>(
        points: &PointSet<T>,
    ) -> Result<Hyperplane<T>, RegressionError> {
        let d = points.dimension();
        if points.len() < d {
            return Err(RegressionError::SingularSystem { dimension: d });
        }
        Self::solve_normal_equations(points.iter(), d)
    }

    /// Residuals of every point against `hyperplane`, in point order.
    ///
    /// Fails with `InvalidInput` for a hyperplane without coefficients.
    pub fn residuals_against<T: Float>(
        hyperplane: &Hyperplane<T>,
        points: &[Point<T>],
    ) -> Result<ResidualSet<T>, RegressionError> {
        let d = hyperplane.dimension();
        if d == 0 {
            return Err(RegressionError::InvalidInput(
                "hyperplane has no coefficients".into(),
            ));
        }
        let mut entries = Vec::with_capacity(points.len());
        for (i, point) in points.iter().enumerate() {
            if point.dimension() != d {
                return Err(RegressionError::DimensionMismatch {
                    index: i,
                    expected: d,
                    got: point.dimension(),
                });
            }
            entries.push(ResidualEntry::new(i, hyperplane.residual(point)));
        }
        Ok(ResidualSet::from_entries(entries))
    }

    /// Accumulate MᵗM and Mᵗy over `points` and solve for the coefficients.
    fn solve_normal_equations<'a, T, I>(points: I, d: usize) -> Result<Hyperplane<T>, RegressionError>
    where
        T: FloatLinalg,
        I: Iterator<Item = &'a Point<T>>,
    {
        let mut xtx = vec![T::zero(); d * d];
        let mut xty = vec![T::zero(); d];
        let mut terms = vec![T::zero(); d];

        for (i, point) in points.enumerate() {
            if point.dimension() != d {
                return Err(RegressionError::DimensionMismatch {
                    index: i,
                    expected: d,
                    got: point.dimension(),
                });
            }

            terms[0] = T::one();
            terms[1..].copy_from_slice(point.predictors());
            let y = point.response();

            for j in 0..d {
                let tj = terms[j];
                for k in j..d {
                    xtx[j * d + k] = xtx[j * d + k] + tj * terms[k];
                }
                xty[j] = xty[j] + tj * y;
            }
        }

        // Fill symmetric part
        for j in 0..d {
            for k in 0..j {
                xtx[j * d + k] = xtx[k * d + j];
            }
        }

        T::solve_dense(&xtx, &xty, d)
            .map(Hyperplane::new)
            .ok_or(RegressionError::SingularSystem { dimension: d })
    }
}
