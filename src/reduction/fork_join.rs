//! Divide-and-conquer reductions on the work-stealing engine.
//!
//! Both strategies halve their input until a piece is at or below the
//! threshold, sum the leaves directly and add the halves on the way back up.
//! They differ in what they split and in how they fork:
//!
//! ```text
//!   ForkJoinVec (owned copies, symmetric)     ForkJoinRange (index ranges, asymmetric)
//!
//!          [ v ]                                     [s, e)
//!         /     \                                   /      \
//!   fork [v.lo]  fork [v.hi]               fork [s, m)    [m, e) computed here
//!         \     /                                   \      /
//!        lo + hi                                 join(left) + right
//! ```

use crate::error::Result;
use crate::reduction::{split, wrapping_sum, Engine, Partition, Reducer};

/// Threshold of [`ForkJoinVec`] in the reference scenario.
pub const VEC_THRESHOLD: usize = 10_000;

/// Threshold of [`ForkJoinRange`] in the reference scenario.
pub const RANGE_THRESHOLD: usize = 200_000;

/// Divide-and-conquer over an owned, resizable sequence.
///
/// Every split materializes both halves as independent vectors and forks
/// them as two parallel sub-tasks; the parent joins both and adds them.
/// The low threshold produces many small tasks.
///
/// # Examples
///
/// ```rust
/// use contesa::reduction::{ForkJoinVec, Reducer};
///
/// let data: Vec<i32> = (1..=100).collect();
/// assert_eq!(ForkJoinVec::new(8).reduce(&data).unwrap(), 5050);
/// ```
#[derive(Debug, Clone)]
pub struct ForkJoinVec {
    threshold: usize,
    engine: Engine,
}

impl ForkJoinVec {
    /// Creates the strategy with the given leaf threshold (at least one).
    pub fn new(threshold: usize) -> Self {
        ForkJoinVec {
            threshold: threshold.max(1),
            engine: Engine::global(),
        }
    }

    /// Runs on the given engine instead of the global pool.
    pub fn with_engine(self, engine: Engine) -> Self {
        Self { engine, ..self }
    }

    /// Returns the leaf threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Sums `items`, copying each half into its own vector at every split.
    /// The top-level input is borrowed, never copied as a whole.
    fn compute(items: &[i32], threshold: usize) -> i32 {
        if items.len() <= threshold {
            return wrapping_sum(items);
        }

        let mid = items.len() / 2;
        let left = items[..mid].to_vec();
        let right = items[mid..].to_vec();

        let (left, right) = rayon::join(
            || Self::compute(&left, threshold),
            || Self::compute(&right, threshold),
        );
        left.wrapping_add(right)
    }
}

impl Default for ForkJoinVec {
    fn default() -> Self {
        Self::new(VEC_THRESHOLD)
    }
}

impl Reducer for ForkJoinVec {
    fn name(&self) -> &'static str {
        "ForkJoinVec"
    }

    fn description(&self) -> &'static str {
        "fork-join over copied halves"
    }

    fn reduce(&self, data: &[i32]) -> Result<i32> {
        let threshold = self.threshold;
        Ok(self.engine.install(|| Self::compute(data, threshold)))
    }
}

/// Divide-and-conquer over index ranges into one shared array.
///
/// Nothing is copied: each task is a [`Partition`] of the same slice. On a
/// split, the right half is computed by the current worker while the left
/// half is offered to the engine for stealing, then joined and added. The
/// high threshold keeps the task count small.
///
/// # Examples
///
/// ```rust
/// use contesa::reduction::{ForkJoinRange, Reducer};
///
/// let data: Vec<i32> = (1..=100).collect();
/// assert_eq!(ForkJoinRange::new(8).reduce(&data).unwrap(), 5050);
/// ```
#[derive(Debug, Clone)]
pub struct ForkJoinRange {
    threshold: usize,
    engine: Engine,
}

impl ForkJoinRange {
    /// Creates the strategy with the given leaf threshold (at least one).
    pub fn new(threshold: usize) -> Self {
        ForkJoinRange {
            threshold: threshold.max(1),
            engine: Engine::global(),
        }
    }

    /// Runs on the given engine instead of the global pool.
    pub fn with_engine(self, engine: Engine) -> Self {
        Self { engine, ..self }
    }

    /// Returns the leaf threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    fn compute(data: &[i32], partition: Partition, threshold: usize) -> i32 {
        if partition.len() <= threshold {
            let mut sum = 0i32;
            for i in partition {
                sum = sum.wrapping_add(data[i]);
            }
            return sum;
        }

        let (left, right) = split(&partition);

        // rayon::join runs its first closure on this worker and makes the
        // second one available to thieves.
        let (right, left) = rayon::join(
            || Self::compute(data, right, threshold),
            || Self::compute(data, left, threshold),
        );
        left.wrapping_add(right)
    }
}

impl Default for ForkJoinRange {
    fn default() -> Self {
        Self::new(RANGE_THRESHOLD)
    }
}

impl Reducer for ForkJoinRange {
    fn name(&self) -> &'static str {
        "ForkJoinRange"
    }

    fn description(&self) -> &'static str {
        "fork-join over index ranges"
    }

    fn reduce(&self, data: &[i32]) -> Result<i32> {
        let threshold = self.threshold;
        Ok(self
            .engine
            .install(|| Self::compute(data, 0..data.len(), threshold)))
    }
}
