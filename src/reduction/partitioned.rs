//! Manual partitioning over a bounded worker pool.

use crate::error::{PoolError, Result};
use crate::pool::WorkerPool;
use crate::reduction::{wrapping_sum, Partition, Reducer};

/// Worker count of the reference scenario.
pub const DEFAULT_THREADS: usize = 10;

/// Splits the input into exactly `threads` contiguous partitions and sums
/// each one as a task on a [`WorkerPool`] of `threads` workers.
///
/// Partition `i` is `[i * n / threads, (i + 1) * n / threads)`, so sizes
/// differ by at most one and the partitions cover the input exactly. Each
/// task owns a copy of its partition. The pool is shut down right after
/// submission, and partial sums are added in the order they are retrieved.
///
/// # Examples
///
/// ```rust
/// use contesa::reduction::{Partitioned, Reducer};
///
/// let data: Vec<i32> = (0..100).collect();
/// assert_eq!(Partitioned::new(4).reduce(&data).unwrap(), 4950);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioned {
    threads: usize,
}

impl Partitioned {
    /// Creates the strategy with `threads` partitions and workers.
    pub const fn new(threads: usize) -> Self {
        Partitioned { threads }
    }

    /// Returns the number of partitions and workers.
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Returns the partitions for an input of length `len`.
    pub fn partitions(&self, len: usize) -> Vec<Partition> {
        (0..self.threads)
            .map(|i| i * len / self.threads..(i + 1) * len / self.threads)
            .collect()
    }
}

impl Default for Partitioned {
    fn default() -> Self {
        Self::new(DEFAULT_THREADS)
    }
}

impl Reducer for Partitioned {
    fn name(&self) -> &'static str {
        "Partitioned"
    }

    fn description(&self) -> &'static str {
        "manual partitions on a worker pool"
    }

    fn reduce(&self, data: &[i32]) -> Result<i32> {
        let pool = WorkerPool::new(self.threads)?;

        let handles = self
            .partitions(data.len())
            .into_iter()
            .map(|partition| {
                let chunk = data[partition].to_vec();
                pool.submit(move || wrapping_sum(&chunk))
            })
            .collect::<std::result::Result<Vec<_>, PoolError>>()?;

        pool.shutdown();

        let mut sum = 0i32;
        for handle in handles {
            sum = sum.wrapping_add(handle.join()?);
        }
        Ok(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_partitions_cover_input() {
        let strategy = Partitioned::new(3);
        assert_eq!(strategy.partitions(10), vec![0..3, 3..6, 6..10]);
        assert_eq!(strategy.partitions(2), vec![0..0, 0..1, 1..2]);
        assert_eq!(strategy.partitions(0), vec![0..0, 0..0, 0..0]);
    }

    #[test]
    fn test_reduce() {
        let data: Vec<i32> = (1..=1_000).collect();
        assert_eq!(Partitioned::default().reduce(&data).unwrap(), 500_500);
    }

    #[test]
    fn test_fewer_elements_than_threads() {
        assert_eq!(Partitioned::new(10).reduce(&[1, 2, 3]).unwrap(), 6);
        assert_eq!(Partitioned::new(10).reduce(&[]).unwrap(), 0);
    }

    #[test]
    fn test_zero_threads() {
        let result = Partitioned::new(0).reduce(&[1, 2, 3]);
        assert!(matches!(result, Err(Error::Pool(PoolError::ZeroWorkers))));
    }
}
