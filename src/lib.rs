//! # robust-subset — Robust Subset-Regression Fitness for Rust
//!
//! Fitness functions for high-breakdown robust regression driven by an external
//! search engine (a genetic algorithm, random search, a local optimizer).
//!
//! ## What is subset regression?
//!
//! Robust estimators such as Least Trimmed Squares or Least Median of Squares
//! have no closed form. A classical way to approximate them is to search over
//! small subsets of the data: each candidate names d points, the hyperplane
//! through those points is fitted exactly, and the residuals of **all** n points
//! against it are scored by a robust loss that ignores the worst n − h of them.
//! A search engine then keeps the candidates with the best fitness.
//!
//! This crate provides the per-candidate work:
//!
//! 1. Validate the candidate subset (exactly d distinct points).
//! 2. Fit the hyperplane through the subset.
//! 3. Compute residuals of every point.
//! 4. Optionally correct the intercept (LTS, LMS or least-squares adjust).
//! 5. Score the residuals with the chosen loss.
//!
//! Infeasible candidates receive a penalty fitness so the search can continue.
//!
//! ## Quick Start
//!
//! ```rust
//! use robust_subset::prelude::*;
//!
//! // y = 2x with one gross outlier at x = 7. Coordinate 0 is the response.
//! let data: Vec<f64> = (0..10)
//!     .flat_map(|i| {
//!         let x = i as f64;
//!         let y = if i == 7 { 60.0 } else { 2.0 * x };
//!         [y, x]
//!     })
//!     .collect();
//! let points = PointSet::from_flat(&data, 2)?;
//!
//! let mut fitness = SubsetRegression::new()
//!     .loss(Lts)
//!     .quantile(9)
//!     .build(&points)?;
//!
//! // A candidate subset naming two clean points.
//! let genotype = SubsetSelection::new(&points, vec![1, 4]);
//! let score = fitness.evaluate(&genotype)?;
//!
//! // The outlier is trimmed away, so the loss is (numerically) zero.
//! assert!(score.primary().abs() < 1e-9);
//!
//! let plane = fitness.last_fitted_hyperplane().unwrap();
//! assert!((plane[1] - 2.0).abs() < 1e-9);
//! assert!(!fitness.last_chosen_indices().unwrap().contains(&7));
//! # Result::<(), RegressionError>::Ok(())
//! ```
//!
//! ## Losses
//!
//! | Loss              | Score (negated)                                            |
//! |-------------------|------------------------------------------------------------|
//! | `Lts`             | Sum of the h smallest squared residuals                    |
//! | `Lms`             | The ⌊n/2⌋-th smallest squared residual                     |
//! | `Lqs`             | The (h−1)-th smallest squared residual                     |
//! | `Lqd`             | An order statistic of pairwise squared-residual differences |
//! | `Lta`             | Sum of \|r\| over the h points with smallest r²            |
//! | `ParetoTrimmed`   | LTS at h, ⌊n/4⌋ and ⌊3n/4⌋                                 |
//! | `ParetoOls`       | LTS at h, and −SSR of the OLS refit on the h best points   |
//!
//! Fitness is "higher is better", so every loss is returned negated.
//!
//! ## Intercept correction
//!
//! A hyperplane through d points often has good slopes and a poor offset.
//! `.adjust(LtsAdjust)` and `.adjust(LmsAdjust)` re-estimate only the intercept
//! from the partial residuals of all points; `.adjust(LsAdjust)` refits every
//! coefficient by least squares over the h best points.
//!
//! ## Parallel evaluation
//!
//! With the `parallel` feature, `evaluate_many` spreads a batch of genotypes over
//! the rayon thread pool. Results are identical to sequential evaluation.
//!
//! ## Logging
//!
//! The crate emits diagnostics through the `log` facade and never installs a
//! logger itself.
//!
//! ## References
//!
//! - Rousseeuw, P. J. & Leroy, A. M. (1987). "Robust Regression and Outlier Detection"
//! - Croux, C., Rousseeuw, P. J. & Hössjer, O. (1994). "Generalized S-Estimators"
//! - Johnson, D. B. & Mizoguchi, T. (1978). "Selecting the Kth Element in X + Y and X1 + X2 + ... + Xm"

#![warn(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains points, residual orderings, the genotype boundary and errors.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the dense linear solver and order-statistic selection.
mod math;

// Layer 3: Algorithms - core regression algorithms.
//
// Contains hyperplane fitting, robust losses and intercept correction.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
//
// Contains validation, the evaluation pipeline and result assembly.
mod engine;

// High-level fluent API.
//
// Provides the `SubsetRegression` builder and the `SubsetFitness` engine.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use robust_subset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        AdjustMethod,
        AdjustMethod::{LmsAdjust, LsAdjust, LtsAdjust},
        Evaluation, EvaluationStage, Fitness, FittedSnapshot, Hyperplane, HyperplaneFit,
        LossFunction,
        LossFunction::{Lms, Lqd, Lqs, Lta, Lts, ParetoOls, ParetoTrimmed},
        Point, PointSet, RegressionError, ResidualEntry, ResidualSet, SubsetFitness,
        SubsetGenotype, SubsetRegressionBuilder as SubsetRegression, SubsetSelection,
        default_quantile, select_nth_smallest, select_nth_smallest_pairwise_difference,
    };
}

pub use api::{
    AdjustMethod, AdjustPassFn, Evaluation, EvaluationStage, Fitness, FittedSnapshot, Hyperplane,
    HyperplaneFit, LossFunction, Point, PointSet, RegressionError, ResidualEntry, ResidualSet,
    SubsetFitness, SubsetGenotype, SubsetRegressionBuilder, SubsetSelection, default_quantile,
    select_nth_smallest, select_nth_smallest_pairwise_difference,
};

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
