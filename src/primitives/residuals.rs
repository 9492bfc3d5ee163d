//! Residual storage and ordering.
//!
//! ## Purpose
//!
//! This module holds the per-point residuals produced by one hyperplane
//! evaluation and provides the orderings the loss and adjust passes consume.
//!
//! ## Design notes
//!
//! * **Total order**: Orderings break ties on the point index, so the same
//!   residuals always produce the same ordering and the same chosen indices.
//! * **Partial ordering**: `smallest_by_squared` partitions with
//!   `select_nth_unstable_by` before sorting only the kept prefix.
//!
//! ## Invariants
//!
//! * `squared == signed * signed` for every entry.
//! * Entries are stored in point order; orderings are returned as new vectors.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Residual Entry
// ============================================================================

/// Residual of a single point against a hyperplane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualEntry<T> {
    /// Index of the point in its point set.
    pub index: usize,
    /// Signed residual `y - ŷ`.
    pub signed: T,
    /// Squared residual.
    pub squared: T,
}

impl<T: Float> ResidualEntry<T> {
    /// Create an entry from a signed residual.
    #[inline]
    pub fn new(index: usize, signed: T) -> Self {
        Self {
            index,
            signed,
            squared: signed * signed,
        }
    }

    /// Absolute residual.
    #[inline]
    pub fn abs(&self) -> T {
        self.signed.abs()
    }
}

/// Ascending by squared residual, then by point index.
#[inline]
pub fn cmp_by_squared<T: Float>(a: &ResidualEntry<T>, b: &ResidualEntry<T>) -> Ordering {
    a.squared
        .partial_cmp(&b.squared)
        .unwrap_or(Ordering::Equal)
        .then(a.index.cmp(&b.index))
}

/// Ascending by signed residual, then by point index.
#[inline]
pub fn cmp_by_signed<T: Float>(a: &ResidualEntry<T>, b: &ResidualEntry<T>) -> Ordering {
    a.signed
        .partial_cmp(&b.signed)
        .unwrap_or(Ordering::Equal)
        .then(a.index.cmp(&b.index))
}

// ============================================================================
// Residual Set
// ============================================================================

/// Residuals of every point in a point set, in point order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualSet<T> {
    entries: Vec<ResidualEntry<T>>,
}

impl<T: Float> ResidualSet<T> {
    /// Wrap entries already in point order.
    pub fn from_entries(entries: Vec<ResidualEntry<T>>) -> Self {
        Self { entries }
    }

    /// Number of residuals (n).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no residuals are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in point order.
    #[inline]
    pub fn entries(&self) -> &[ResidualEntry<T>] {
        &self.entries
    }

    /// Squared residuals in point order.
    pub fn squared_values(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.squared).collect()
    }

    /// Signed residuals in point order.
    pub fn signed_values(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.signed).collect()
    }

    /// All entries sorted ascending by squared residual.
    pub fn sorted_by_squared(&self) -> Vec<ResidualEntry<T>> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(cmp_by_squared);
        sorted
    }

    /// All entries sorted ascending by signed residual.
    pub fn sorted_by_signed(&self) -> Vec<ResidualEntry<T>> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(cmp_by_signed);
        sorted
    }

    /// The `count` entries with the smallest squared residuals, sorted ascending.
    ///
    /// `count` is clamped to the number of entries.
    pub fn smallest_by_squared(&self, count: usize) -> Vec<ResidualEntry<T>> {
        let count = count.min(self.entries.len());
        if count == 0 {
            return Vec::new();
        }

        let mut work = self.entries.clone();
        if count < work.len() {
            work.select_nth_unstable_by(count - 1, cmp_by_squared);
            work.truncate(count);
        }
        work.sort_by(cmp_by_squared);
        work
    }
}
