//! Intercept correction passes.
//!
//! ## Purpose
//!
//! This module implements the optional adjust step that runs between the initial
//! fit and scoring. A hyperplane through d support points has the right slopes
//! more often than the right offset; re-estimating the intercept from the
//! residuals of all points recovers a better fit at O(n log n) cost.
//!
//! ## Design notes
//!
//! * **Partial residuals**: Windows are taken over `u_i = y_i − Σ b_j x_j`, the
//!   residuals with the intercept removed, sorted ascending. The new intercept is
//!   a location estimate of these values.
//! * **Incremental window**: LTS adjust slides a window of k = ⌊n/2⌋ + 1 values
//!   and updates its mean and sum of squared deviations in O(1) per step.
//! * **Residual refresh**: Every pass re-derives the residual set before returning.
//!
//! ## Invariants
//!
//! * LTS and LMS adjust change only the intercept.
//! * The residual set always matches the hyperplane on return.
//!
//! ## Non-goals
//!
//! * This module does not decide whether adjusting is enabled (handled by engine).

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::hyperplane::{Hyperplane, HyperplaneFit};
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::RegressionError;
use crate::primitives::points::PointSet;
use crate::primitives::residuals::ResidualSet;

// ============================================================================
// Adjust Method
// ============================================================================

/// Intercept correction applied after the initial fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AdjustMethod {
    /// Intercept = mean of the minimum-variance window of partial residuals.
    LtsAdjust,

    /// Intercept = midpoint of the narrowest window of partial residuals.
    LmsAdjust,

    /// Least-squares refit over the h smallest squared residuals.
    LsAdjust,
}

impl AdjustMethod {
    /// Window length used by the LTS and LMS passes.
    #[inline]
    pub fn window_size(n: usize) -> usize {
        (n / 2 + 1).min(n)
    }

    /// Apply the correction and refresh `residuals` to match `hyperplane`.
    pub fn apply<T: FloatLinalg>(
        &self,
        points: &PointSet<T>,
        hyperplane: &mut Hyperplane<T>,
        residuals: &mut ResidualSet<T>,
        h: usize,
    ) -> Result<(), RegressionError> {
        match self {
            AdjustMethod::LtsAdjust => {
                let sorted = Self::sorted_partial_residuals(points, hyperplane);
                let k = Self::window_size(sorted.len());
                let (_, mean) = Self::minimum_variance_window(&sorted, k)?;
                hyperplane.set_intercept(mean);
            }
            AdjustMethod::LmsAdjust => {
                let sorted = Self::sorted_partial_residuals(points, hyperplane);
                let k = Self::window_size(sorted.len());
                let (_, midpoint) = Self::minimum_width_window(&sorted, k)?;
                hyperplane.set_intercept(midpoint);
            }
            AdjustMethod::LsAdjust => {
                let ordering = residuals.smallest_by_squared(h);
                *hyperplane = HyperplaneFit::refit_weighted(points, &ordering, h)?;
            }
        }

        *residuals = HyperplaneFit::residuals_against(hyperplane, points.points())?;
        Ok(())
    }

    /// Start index and mean of the length-`k` window with the smallest sum of
    /// squared deviations from its own mean. `sorted` must be ascending.
    pub fn minimum_variance_window<T: Float>(
        sorted: &[T],
        k: usize,
    ) -> Result<(usize, T), RegressionError> {
        Self::check_window(sorted.len(), k)?;
        let kt = T::from(k).unwrap();

        let mut sum = T::zero();
        let mut sum_sq = T::zero();
        for &v in &sorted[..k] {
            sum = sum + v;
            sum_sq = sum_sq + v * v;
        }
        let mut mean = sum / kt;
        let mut deviation = sum_sq - kt * mean * mean;

        let mut best_start = 0;
        let mut best_mean = mean;
        let mut best_deviation = deviation;

        for start in 1..=(sorted.len() - k) {
            let outgoing = sorted[start - 1];
            let incoming = sorted[start + k - 1];
            let next_mean = (kt * mean - outgoing + incoming) / kt;
            deviation = deviation + incoming * incoming
                - outgoing * outgoing
                - kt * (next_mean * next_mean - mean * mean);
            mean = next_mean;

            if deviation < best_deviation {
                best_deviation = deviation;
                best_mean = mean;
                best_start = start;
            }
        }

        Ok((best_start, best_mean))
    }

    /// Start index and endpoint midpoint of the narrowest length-`k` window.
    /// `sorted` must be ascending.
    pub fn minimum_width_window<T: Float>(
        sorted: &[T],
        k: usize,
    ) -> Result<(usize, T), RegressionError> {
        Self::check_window(sorted.len(), k)?;
        let two = T::from(2.0).unwrap();

        let mut best_start = 0;
        let mut best_width = sorted[k - 1] - sorted[0];
        for start in 1..=(sorted.len() - k) {
            let width = sorted[start + k - 1] - sorted[start];
            if width < best_width {
                best_width = width;
                best_start = start;
            }
        }

        let midpoint = (sorted[best_start] + sorted[best_start + k - 1]) / two;
        Ok((best_start, midpoint))
    }

    fn sorted_partial_residuals<T: Float>(points: &PointSet<T>, hyperplane: &Hyperplane<T>) -> Vec<T> {
        let mut values: Vec<T> = points
            .iter()
            .map(|p| hyperplane.partial_residual(p))
            .collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
        values
    }

    fn check_window(len: usize, k: usize) -> Result<(), RegressionError> {
        if k == 0 || k > len {
            return Err(RegressionError::InvalidOrderIndex {
                index: k.wrapping_sub(1),
                len,
            });
        }
        Ok(())
    }
}
