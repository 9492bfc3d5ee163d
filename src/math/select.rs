//! Order-statistic selection.
//!
//! ## Purpose
//!
//! This module provides the selection primitives behind the robust losses:
//! the k-th smallest element of a slice and the k-th smallest pairwise
//! difference of a sorted slice.
//!
//! ## Design notes
//!
//! * **Quickselect**: `select_nth_smallest` partitions with `select_nth_unstable_by`
//!   in expected O(n) time instead of sorting.
//! * **Sorted-matrix selection**: Pairwise differences `v[j] - v[i]` (j > i) of a
//!   sorted slice form a matrix whose rows increase and whose columns decrease.
//!   The selector keeps one candidate column range per row, pivots on the weighted
//!   median of the row medians, counts the differences below the pivot with two
//!   monotone pointers in O(n), and discards the side that cannot hold the target.
//!   Once at most n candidates remain they are collected and quickselected. The
//!   O(n²) difference set is never materialised.
//! * **Exact arithmetic contract**: Counting compares the same `v[j] - v[i]`
//!   expressions a brute-force enumeration would produce, so results match it bit
//!   for bit.
//!
//! ## Invariants
//!
//! * Results equal `sorted(values)[k]` (respectively the k-th smallest enumerated
//!   difference), duplicates included.
//! * Out-of-range ranks fail with `InvalidOrderIndex`; they are never clamped.
//!
//! ## Non-goals
//!
//! * This module does not handle NaN: inputs containing NaN are rejected.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::RegressionError;

// ============================================================================
// K-th Smallest
// ============================================================================

/// Return the element at sorted position `k` without fully sorting.
pub fn select_nth_smallest<T: Float>(values: &[T], k: usize) -> Result<T, RegressionError> {
    let mut work = values.to_vec();
    select_nth_smallest_in_place(&mut work, k)
}

/// Like [`select_nth_smallest`], reordering `values` instead of copying them.
pub fn select_nth_smallest_in_place<T: Float>(
    values: &mut [T],
    k: usize,
) -> Result<T, RegressionError> {
    if k >= values.len() {
        return Err(RegressionError::InvalidOrderIndex {
            index: k,
            len: values.len(),
        });
    }
    reject_nan(values)?;

    let (_, nth, _) = values.select_nth_unstable_by(k, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    Ok(*nth)
}

// ============================================================================
// K-th Smallest Pairwise Difference
// ============================================================================

/// Number of pairs `(i, j)` with `i < j` among `n` values.
#[inline]
pub const fn pairwise_difference_count(n: usize) -> usize {
    if n < 2 { 0 } else { n * (n - 1) / 2 }
}

/// Return the k-th smallest of `sorted[j] - sorted[i]` over all `j > i`.
///
/// `sorted` must be in ascending order.
pub fn select_nth_smallest_pairwise_difference<T: Float>(
    sorted: &[T],
    k: usize,
) -> Result<T, RegressionError> {
    let n = sorted.len();
    let total = pairwise_difference_count(n);
    if k >= total {
        return Err(RegressionError::InvalidOrderIndex {
            index: k,
            len: total,
        });
    }
    reject_nan(sorted)?;
    if sorted.windows(2).any(|w| w[0] > w[1]) {
        return Err(RegressionError::InvalidInput(
            "pairwise-difference selection requires ascending input".to_string(),
        ));
    }

    // Candidate columns of row i are the half-open range [left[i], right[i]).
    let mut left: Vec<usize> = (0..n).map(|i| i + 1).collect();
    let mut right: Vec<usize> = vec![n; n];
    let mut below_pivot = vec![0usize; n];
    let mut up_to_pivot = vec![0usize; n];
    let mut row_medians: Vec<(T, usize)> = Vec::with_capacity(n);
    let mut remaining = total;

    while remaining > n {
        row_medians.clear();
        for i in 0..n {
            if left[i] < right[i] {
                let mid = left[i] + (right[i] - left[i]) / 2;
                row_medians.push((sorted[mid] - sorted[i], right[i] - left[i]));
            }
        }
        let pivot = weighted_median(&mut row_medians);

        // Row boundaries move right as i grows because differences shrink down a column.
        let mut j_lt = 0;
        let mut j_le = 0;
        let mut count_lt = 0;
        let mut count_le = 0;
        for i in 0..n {
            j_lt = j_lt.max(i + 1);
            while j_lt < n && sorted[j_lt] - sorted[i] < pivot {
                j_lt += 1;
            }
            j_le = j_le.max(i + 1);
            while j_le < n && sorted[j_le] - sorted[i] <= pivot {
                j_le += 1;
            }
            below_pivot[i] = j_lt;
            up_to_pivot[i] = j_le;
            count_lt += j_lt - (i + 1);
            count_le += j_le - (i + 1);
        }

        if k < count_lt {
            for i in 0..n {
                right[i] = right[i].min(below_pivot[i]);
            }
        } else if k >= count_le {
            for i in 0..n {
                left[i] = left[i].max(up_to_pivot[i]);
            }
        } else {
            return Ok(pivot);
        }

        remaining = (0..n).map(|i| right[i].saturating_sub(left[i])).sum();
    }

    let discarded_low: usize = (0..n).map(|i| left[i] - (i + 1)).sum();
    let mut candidates = Vec::with_capacity(remaining);
    for i in 0..n {
        for j in left[i]..right[i] {
            candidates.push(sorted[j] - sorted[i]);
        }
    }
    select_nth_smallest_in_place(&mut candidates, k - discarded_low)
}

// ============================================================================
// Helpers
// ============================================================================

/// Weighted median of `(value, weight)` pairs; `pairs` must be non-empty.
fn weighted_median<T: Float>(pairs: &mut [(T, usize)]) -> T {
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Equal));
    let total: usize = pairs.iter().map(|p| p.1).sum();

    let mut cumulative = 0;
    for &(value, weight) in pairs.iter() {
        cumulative += weight;
        if 2 * cumulative >= total {
            return value;
        }
    }
    pairs[pairs.len() - 1].0
}

fn reject_nan<T: Float>(values: &[T]) -> Result<(), RegressionError> {
    match values.iter().position(|v| v.is_nan()) {
        Some(i) => Err(RegressionError::InvalidNumericValue(format!(
            "NaN at position {i}"
        ))),
        None => Ok(()),
    }
}
