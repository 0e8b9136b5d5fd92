//! Single atomic word counter.

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::counters::Counter;

/// A counter backed by one shared [`AtomicI64`].
///
/// Every operation is a single hardware atomic instruction. Under many
/// writers all of them fight over the same cache line, which is exactly what
/// the striped strategy avoids.
///
/// # Examples
///
/// ```rust
/// use contesa::counters::atomic::Atomic;
/// use contesa::counters::Counter;
///
/// static HITS: Atomic = Atomic::new().with_name("hits");
///
/// HITS.increment();
/// assert_eq!(HITS.read(), 1);
/// ```
pub struct Atomic {
    name: &'static str,
    value: AtomicI64,
}

impl Atomic {
    /// Creates a new counter at zero with no name.
    pub const fn new() -> Self {
        Atomic {
            name: "",
            value: AtomicI64::new(0),
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    pub const fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }
}

impl Counter for Atomic {
    #[inline]
    fn name(&self) -> &str {
        self.name
    }

    #[inline]
    fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn decrement(&self) {
        self.value.fetch_sub(1, Ordering::Relaxed);
    }

    #[inline]
    fn read(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

impl Default for Atomic {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Atomic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{ {} }}", self.name, self.read())
    }
}
