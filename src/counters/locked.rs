//! Counter guarded by an explicit reentrant lock.

use std::cell::Cell;
use std::fmt::Debug;
use std::time::Duration;

use parking_lot::ReentrantMutex;

use crate::counters::Counter;

/// How long one acquisition attempt may wait before it is retried.
const ACQUIRE_SLICE: Duration = Duration::from_millis(10);

/// A counter that acquires an explicit reentrant lock around a plain
/// read-modify-write.
///
/// Acquisition goes through [`Locked::with_lock`]: a timed attempt either
/// yields a scoped guard or holds nothing at all, and the guard releases the
/// lock on every exit path, unwinding included. Because the lock is
/// reentrant, the owning thread may call back into the counter while it
/// holds the guard.
///
/// # Examples
///
/// ```rust
/// use contesa::counters::locked::Locked;
/// use contesa::counters::Counter;
///
/// let counter = Locked::new();
/// counter.increment();
///
/// // Nested acquisition from the owning thread does not deadlock.
/// let seen = counter.with_lock(|value| {
///     value.set(value.get() + 1);
///     counter.read()
/// });
/// assert_eq!(seen, 2);
/// ```
pub struct Locked {
    name: &'static str,
    value: ReentrantMutex<Cell<i64>>,
}

impl Locked {
    /// Creates a new counter at zero with no name.
    pub fn new() -> Self {
        Locked {
            name: "",
            value: ReentrantMutex::new(Cell::new(0)),
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    pub fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }

    /// Runs `f` while holding the lock and returns its result.
    ///
    /// The lock is released when the guard goes out of scope, including when
    /// `f` panics. A timed-out attempt never leaves the lock held, it simply
    /// tries again.
    pub fn with_lock<R>(&self, f: impl FnOnce(&Cell<i64>) -> R) -> R {
        let guard = loop {
            if let Some(guard) = self.value.try_lock_for(ACQUIRE_SLICE) {
                break guard;
            }
            tracing::trace!(counter = self.name, "lock acquisition timed out, retrying");
        };
        f(&*guard)
    }
}

impl Counter for Locked {
    fn name(&self) -> &str {
        self.name
    }

    fn increment(&self) {
        self.with_lock(|value| value.set(value.get() + 1));
    }

    fn decrement(&self) {
        self.with_lock(|value| value.set(value.get() - 1));
    }

    fn read(&self) -> i64 {
        self.with_lock(Cell::get)
    }
}

impl Default for Locked {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Locked {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{ {} }}", self.name, self.read())
    }
}
