//! Reduction strategies: five ways to sum a large integer collection.
//!
//! | Strategy | Decomposition | Engine |
//! |----------|---------------|--------|
//! | [`Sequential`] | none | current thread |
//! | [`Partitioned`] | `threads` contiguous partitions | [`WorkerPool`](crate::pool::WorkerPool) |
//! | [`DataParallel`] | decided by the engine | rayon `par_iter` |
//! | [`ForkJoinVec`] | halve owned copies, fork both halves | rayon `join` |
//! | [`ForkJoinRange`] | halve index ranges, fork the left half | rayon `join` |
//!
//! All strategies add with 32-bit wrapping arithmetic, so whatever the
//! decomposition, every strategy returns the same bits as [`Sequential`].
//!
//! # Partitions
//!
//! The divide-and-conquer strategies split a half-open [`Partition`] at
//! `start + (end - start) / 2`, so for an odd length the left half is the
//! smaller one. [`leaves`] reproduces the recursion without summing, which
//! makes the decomposition itself testable.
//!
//! ```rust
//! use contesa::reduction::{leaves, split};
//!
//! assert_eq!(split(&(0..5)), (0..2, 2..5));
//! assert_eq!(leaves(0..10, 3), vec![0..2, 2..5, 5..7, 7..10]);
//! ```
//!
//! # Examples
//!
//! ```rust
//! use contesa::reduction::{self, Reducer};
//!
//! let data = [1, 2, 3, 4, 5];
//! for reducer in reduction::all() {
//!     assert_eq!(reducer.reduce(&data).unwrap(), 15);
//! }
//! ```

pub mod engine;
pub mod fork_join;
pub mod parallel;
pub mod partitioned;
pub mod sequential;

use std::fmt::Debug;
use std::ops::Range;

use crate::error::Result;

pub use engine::Engine;
pub use fork_join::{ForkJoinRange, ForkJoinVec};
pub use parallel::DataParallel;
pub use partitioned::Partitioned;
pub use sequential::Sequential;

/// A contiguous half-open index range `[start, end)` of the input.
pub type Partition = Range<usize>;

/// Sums a collection of integers.
pub trait Reducer: Send + Sync + Debug {
    /// Returns the name used in reports.
    fn name(&self) -> &'static str;

    /// Returns a one-line description for report headings.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Returns the wrapping 32-bit sum of `data`.
    fn reduce(&self, data: &[i32]) -> Result<i32>;
}

/// The five default strategies, in report order.
pub fn all() -> Vec<Box<dyn Reducer>> {
    vec![
        Box::new(Sequential),
        Box::new(Partitioned::default()),
        Box::new(DataParallel::default()),
        Box::new(ForkJoinVec::default()),
        Box::new(ForkJoinRange::default()),
    ]
}

/// Splits `partition` at its midpoint, left half first.
///
/// The two halves are disjoint and their union is `partition`.
pub fn split(partition: &Partition) -> (Partition, Partition) {
    let mid = partition.start + (partition.end - partition.start) / 2;
    (partition.start..mid, mid..partition.end)
}

/// Returns the leaf partitions a divide-and-conquer reduction with the given
/// threshold visits, in index order.
///
/// A partition no longer than `threshold` is a leaf; anything longer is
/// split with [`split`]. A threshold of zero is treated as one.
pub fn leaves(partition: Partition, threshold: usize) -> Vec<Partition> {
    fn walk(partition: Partition, threshold: usize, out: &mut Vec<Partition>) {
        if partition.len() <= threshold {
            out.push(partition);
            return;
        }
        let (left, right) = split(&partition);
        walk(left, threshold, out);
        walk(right, threshold, out);
    }

    let mut out = Vec::new();
    walk(partition, threshold.max(1), &mut out);
    out
}

/// Single-pass wrapping sum, the leaf computation of every strategy.
#[inline]
pub(crate) fn wrapping_sum(data: &[i32]) -> i32 {
    data.iter().fold(0i32, |acc, &x| acc.wrapping_add(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_even_and_odd() {
        assert_eq!(split(&(0..4)), (0..2, 2..4));
        assert_eq!(split(&(3..8)), (3..5, 5..8));
        assert_eq!(split(&(7..8)), (7..7, 7..8));
    }

    #[test]
    fn test_leaves_cover_range_exactly_once() {
        for (len, threshold) in [(0, 1), (1, 1), (10, 3), (1_000, 7), (200_001, 200_000)] {
            let parts = leaves(0..len, threshold);
            assert_eq!(parts.iter().map(|p| p.len()).sum::<usize>(), len);
            assert_eq!(parts.first().map(|p| p.start), Some(0));
            assert_eq!(parts.last().map(|p| p.end), Some(len));
            for pair in parts.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            assert!(parts.iter().all(|p| p.len() <= threshold));
        }
    }

    #[test]
    fn test_leaves_at_threshold_is_single() {
        assert_eq!(leaves(0..10_000, 10_000), vec![0..10_000]);
        assert_eq!(leaves(0..10_001, 10_000), vec![0..5_000, 5_000..10_001]);
    }

    #[test]
    fn test_zero_threshold_terminates() {
        assert_eq!(leaves(0..3, 0), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn test_wrapping_sum_overflows_like_i32() {
        assert_eq!(wrapping_sum(&[i32::MAX, 1]), i32::MIN);
        assert_eq!(wrapping_sum(&[]), 0);
    }

    #[test]
    fn test_all_in_report_order() {
        let names: Vec<_> = all().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            [
                "Sequential",
                "Partitioned",
                "DataParallel",
                "ForkJoinVec",
                "ForkJoinRange"
            ]
        );
    }
}
