//! Error types for subset-regression fitness evaluation.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while building a
//! fitness engine, fitting hyperplanes, selecting order statistics and scoring
//! residuals.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the values needed for diagnosis (indices, sizes).
//! * **Layered severity**: `InfeasibleGenotype` is recoverable and is converted to a
//!   penalty fitness by the engine; `SingularSystem` and `InvalidOrderIndex` always
//!   propagate to the caller.
//! * **Trait Implementation**: Derives `Display` and `std::error::Error` via `thiserror`.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty point sets, inconsistent dimensions, non-finite values.
//! 2. **Genotype feasibility**: Subsets that do not name exactly d distinct points.
//! 3. **Numerical failure**: Support points that are not affinely independent.
//! 4. **Configuration**: Quantiles outside `[d, n]`, order indices out of range.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not decide whether a run should abort.

use thiserror::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for subset-regression operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// The point set contains no points.
    #[error("Input point set is empty")]
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A point does not have the dimension shared by the rest of the set.
    #[error("Dimension mismatch at point {index}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Position of the offending point.
        index: usize,
        /// Dimension shared by the point set.
        expected: usize,
        /// Dimension of the offending point.
        got: usize,
    },

    /// Input data contains NaN or infinite values.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// Not enough points for the requested operation.
    #[error("Too few points: got {got}, need at least {min}")]
    TooFewPoints {
        /// Number of points provided.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// The genotype does not select exactly d distinct, in-range points.
    #[error("Infeasible genotype: expected {expected} distinct points, got {got}")]
    InfeasibleGenotype {
        /// Number of points a subset must select (the dimension d).
        expected: usize,
        /// Number of usable points actually selected.
        got: usize,
    },

    /// The normal-equations matrix is not invertible.
    #[error("Singular system: normal equations of dimension {dimension} are not invertible")]
    SingularSystem {
        /// Number of coefficients in the system.
        dimension: usize,
    },

    /// An order-statistic index lies outside `[0, len)`.
    #[error("Invalid order index: {index} (must be less than {len})")]
    InvalidOrderIndex {
        /// Requested zero-based rank.
        index: usize,
        /// Number of values the rank was taken over.
        len: usize,
    },

    /// The quantile h lies outside `[d, n]`.
    #[error("Invalid quantile: {h} (must be in [{min}, {max}])")]
    InvalidQuantile {
        /// The quantile provided.
        h: usize,
        /// Lower bound (the dimension d).
        min: usize,
        /// Upper bound (the number of points n).
        max: usize,
    },

    /// Penalty fitness must be finite.
    #[error("Invalid penalty: {0} (must be finite)")]
    InvalidPenalty(f64),

    /// Genotype refers to a point set with a different shape than the engine was built for.
    #[error(
        "Point set mismatch: engine built for {expected_n} points of dimension {expected_d}, got {got_n} points of dimension {got_d}"
    )]
    PointSetMismatch {
        /// Number of points the engine was built for.
        expected_n: usize,
        /// Dimension the engine was built for.
        expected_d: usize,
        /// Number of points in the genotype's point set.
        got_n: usize,
        /// Dimension of the genotype's point set.
        got_d: usize,
    },

    /// Parameter was set multiple times in the builder.
    #[error(
        "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
    )]
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl RegressionError {
    /// Whether the error is recoverable at the evaluation boundary.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InfeasibleGenotype { .. })
    }
}
