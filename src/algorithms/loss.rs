//! Robust loss functions over a residual set.
//!
//! ## Purpose
//!
//! This module implements the scoring side of subset regression: given the
//! residuals of every point against a candidate hyperplane and a quantile h,
//! each loss turns them into a fitness (higher is better, so scores are negated
//! losses).
//!
//! ## Design notes
//!
//! * **Closed set**: Losses form one enum dispatched by `LossFunction::score`.
//! * **Selection over sorting**: LMS and LQS use quickselect; LTS and LTA only
//!   order the h smallest residuals.
//! * **Multi-objective**: Pareto variants return a vector fitness that trades
//!   robustness at several trimming levels against each other.
//!
//! ## Key concepts
//!
//! * **LTS**: Sum of the h smallest squared residuals.
//! * **LMS**: The ⌊n/2⌋-th smallest squared residual.
//! * **LQS**: The (h-1)-th smallest squared residual.
//! * **LQD**: The (h(h-1)/2 - 1)-th smallest pairwise difference of the sorted
//!   squared residuals.
//! * **LTA**: Sum of absolute residuals of the h points with the smallest squares.
//!
//! ## Invariants
//!
//! * Scores are finite; a non-finite score is reported as an error.
//! * For fixed residuals the LTS magnitude is non-decreasing in h.
//!
//! ## Non-goals
//!
//! * This module does not fit hyperplanes (handled by `hyperplane`).
//! * This module does not apply intercept corrections (handled by `adjust`).

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::hyperplane::HyperplaneFit;
use crate::math::linalg::FloatLinalg;
use crate::math::select::{select_nth_smallest, select_nth_smallest_pairwise_difference};
use crate::primitives::errors::RegressionError;
use crate::primitives::points::PointSet;
use crate::primitives::residuals::{ResidualEntry, ResidualSet};

/// Trimming proportion α used by the default quantile.
const BREAKDOWN_ALPHA: f64 = 0.5;

// ============================================================================
// Fitness
// ============================================================================

/// Fitness produced by a loss: one score, or one score per objective.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fitness<T> {
    /// Single-objective fitness.
    Scalar(T),

    /// Multi-objective fitness.
    Vector(Vec<T>),
}

impl<T: Float> Fitness<T> {
    /// The scalar score, or the first objective of a vector.
    pub fn primary(&self) -> T {
        match self {
            Fitness::Scalar(v) => *v,
            Fitness::Vector(v) => v.first().copied().unwrap_or_else(T::nan),
        }
    }

    /// All objectives as a slice.
    pub fn objectives(&self) -> &[T] {
        match self {
            Fitness::Scalar(v) => core::slice::from_ref(v),
            Fitness::Vector(v) => v,
        }
    }

    /// Number of objectives.
    pub fn len(&self) -> usize {
        self.objectives().len()
    }

    /// True for a vector fitness without objectives.
    pub fn is_empty(&self) -> bool {
        self.objectives().is_empty()
    }
}

impl<T: Float + Display> Display for Fitness<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Fitness::Scalar(v) => write!(f, "{v:.6}"),
            Fitness::Vector(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v:.6}")?;
                }
                write!(f, "]")
            }
        }
    }
}

// ============================================================================
// Default Quantile
// ============================================================================

/// Default quantile h for n points of dimension d.
///
/// `h = 2·⌊(n+p+1)/2⌋ − n + 2α(n − ⌊(n+p+1)/2⌋)` with α = 0.5 and p = d − 1
/// predictors, clamped into `[d, n]`.
pub fn default_quantile(n: usize, d: usize) -> usize {
    let p = d.saturating_sub(1);
    let half = (n + p + 1) / 2;
    let h = (2 * half) as f64 - n as f64 + 2.0 * BREAKDOWN_ALPHA * (n as f64 - half as f64);
    let h = h.floor().max(0.0) as usize;
    h.clamp(d.min(n), n)
}

// ============================================================================
// Loss Function
// ============================================================================

/// Robust loss used to score a candidate hyperplane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LossFunction {
    /// Least Trimmed Squares (default).
    #[default]
    Lts,

    /// Least Median of Squares.
    Lms,

    /// Least Quantile of Squares.
    Lqs,

    /// Least Quartile Difference.
    Lqd,

    /// Least Trimmed Absolute deviations.
    Lta,

    /// LTS at h, ⌊n/4⌋ and ⌊3n/4⌋ as three objectives.
    ParetoTrimmed,

    /// LTS at h and the OLS-on-h objective.
    ParetoOls,
}

impl LossFunction {
    /// Number of objectives in the produced fitness.
    #[inline]
    pub const fn objective_count(&self) -> usize {
        match self {
            LossFunction::ParetoTrimmed => 3,
            LossFunction::ParetoOls => 2,
            _ => 1,
        }
    }

    /// Whether the loss produces a vector fitness.
    #[inline]
    pub const fn is_multi_objective(&self) -> bool {
        self.objective_count() > 1
    }

    /// Score residuals with quantile `h`.
    pub fn score<T: FloatLinalg>(
        &self,
        points: &PointSet<T>,
        residuals: &ResidualSet<T>,
        h: usize,
    ) -> Result<Fitness<T>, RegressionError> {
        let n = residuals.len();
        if h == 0 || h > n {
            return Err(RegressionError::InvalidOrderIndex {
                index: h.wrapping_sub(1),
                len: n,
            });
        }

        let fitness = match self {
            LossFunction::Lts => {
                Fitness::Scalar(-Self::trimmed_squares(&residuals.smallest_by_squared(h), h)?)
            }
            LossFunction::Lms => {
                Fitness::Scalar(-select_nth_smallest(&residuals.squared_values(), n / 2)?)
            }
            LossFunction::Lqs => {
                Fitness::Scalar(-select_nth_smallest(&residuals.squared_values(), h - 1)?)
            }
            LossFunction::Lqd => Fitness::Scalar(-Self::quartile_difference(residuals, h)?),
            LossFunction::Lta => {
                Fitness::Scalar(-Self::trimmed_absolute(&residuals.smallest_by_squared(h), h)?)
            }
            LossFunction::ParetoTrimmed => {
                let lower = (n / 4).clamp(1, n);
                let upper = (3 * n / 4).clamp(1, n);
                let widest = h.max(lower).max(upper);
                let sorted = residuals.smallest_by_squared(widest);
                Fitness::Vector(vec![
                    -Self::trimmed_squares(&sorted, h)?,
                    -Self::trimmed_squares(&sorted, lower)?,
                    -Self::trimmed_squares(&sorted, upper)?,
                ])
            }
            LossFunction::ParetoOls => {
                let sorted = residuals.smallest_by_squared(h);
                Fitness::Vector(vec![
                    -Self::trimmed_squares(&sorted, h)?,
                    Self::ols_fit_on_h(points, &sorted, h)?,
                ])
            }
        };

        if let Some(bad) = fitness.objectives().iter().find(|v| !v.is_finite()) {
            return Err(RegressionError::InvalidNumericValue(format!(
                "{:?} score {}",
                self,
                bad.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(fitness)
    }

    /// Sum of the first `h` squared residuals of an ascending ordering.
    pub fn trimmed_squares<T: Float>(
        sorted: &[ResidualEntry<T>],
        h: usize,
    ) -> Result<T, RegressionError> {
        let head = Self::head(sorted, h)?;
        Ok(head.iter().fold(T::zero(), |acc, e| acc + e.squared))
    }

    /// Sum of the first `h` absolute residuals of an ordering by squared residual.
    pub fn trimmed_absolute<T: Float>(
        sorted: &[ResidualEntry<T>],
        h: usize,
    ) -> Result<T, RegressionError> {
        let head = Self::head(sorted, h)?;
        Ok(head.iter().fold(T::zero(), |acc, e| acc + e.abs()))
    }

    /// The (h(h-1)/2 - 1)-th smallest pairwise difference of the sorted squares.
    pub fn quartile_difference<T: Float>(
        residuals: &ResidualSet<T>,
        h: usize,
    ) -> Result<T, RegressionError> {
        let mut squared = residuals.squared_values();
        squared.sort_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));

        let rank = (h * h.saturating_sub(1) / 2).checked_sub(1).ok_or(
            RegressionError::InvalidOrderIndex {
                index: 0,
                len: h * h.saturating_sub(1) / 2,
            },
        )?;
        select_nth_smallest_pairwise_difference(&squared, rank)
    }

    /// Refit on the h best points, then return −Σ squared residual over all points.
    pub fn ols_fit_on_h<T: FloatLinalg>(
        points: &PointSet<T>,
        sorted: &[ResidualEntry<T>],
        h: usize,
    ) -> Result<T, RegressionError> {
        let refit = HyperplaneFit::refit_weighted(points, sorted, h)?;
        let residuals = HyperplaneFit::residuals_against(&refit, points.points())?;
        let total = residuals
            .entries()
            .iter()
            .fold(T::zero(), |acc, e| acc + e.squared);
        Ok(-total)
    }

    fn head<T>(sorted: &[ResidualEntry<T>], h: usize) -> Result<&[ResidualEntry<T>], RegressionError> {
        sorted.get(..h).ok_or(RegressionError::InvalidOrderIndex {
            index: h.wrapping_sub(1),
            len: sorted.len(),
        })
    }
}
