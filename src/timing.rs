//! Elapsed-time accumulation shared by concurrent actors.
//!
//! [`ElapsedAccumulator`] is the only piece of harness state written by every
//! actor, so it is always atomic regardless of which counter strategy is
//! being measured.

use std::fmt::Debug;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use atomic_time::AtomicDuration;

/// An additive duration that many threads may add to concurrently.
///
/// Additions go through a compare-and-swap loop, so the final total is the
/// exact sum of every added duration whatever the interleaving. Additions
/// saturate at [`Duration::MAX`] instead of overflowing.
///
/// # Examples
///
/// ```rust
/// use contesa::timing::ElapsedAccumulator;
/// use std::time::Duration;
///
/// let acc = ElapsedAccumulator::new();
/// acc.add(Duration::from_nanos(150));
/// acc.add(Duration::from_nanos(50));
///
/// assert_eq!(acc.total(), Duration::from_nanos(200));
/// assert_eq!(acc.average_over(2), Duration::from_nanos(100));
/// ```
pub struct ElapsedAccumulator {
    total: AtomicDuration,
}

impl ElapsedAccumulator {
    /// Creates an accumulator at zero.
    pub fn new() -> Self {
        ElapsedAccumulator {
            total: AtomicDuration::new(Duration::ZERO),
        }
    }

    /// Adds `elapsed` to the total.
    pub fn add(&self, elapsed: Duration) {
        // The closure never returns `None`, so the update always succeeds.
        let _ = self
            .total
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(elapsed))
            });
    }

    /// Returns the accumulated total.
    pub fn total(&self) -> Duration {
        self.total.load(Ordering::Acquire)
    }

    /// Returns the total divided by `count`, or zero when `count` is zero.
    pub fn average_over(&self, count: u32) -> Duration {
        average(self.total(), count)
    }
}

impl Default for ElapsedAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ElapsedAccumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElapsedAccumulator")
            .field("total", &self.total())
            .finish()
    }
}

/// Divides `total` by `count`, returning zero for a zero count.
pub fn average(total: Duration, count: u32) -> Duration {
    total.checked_div(count).unwrap_or(Duration::ZERO)
}

/// Runs `f` and returns its result along with the wall-clock time it took.
///
/// # Examples
///
/// ```rust
/// use contesa::timing::timed;
///
/// let (sum, elapsed) = timed(|| (1..=10).sum::<i32>());
/// assert_eq!(sum, 55);
/// assert!(elapsed.as_secs() < 1);
/// ```
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
