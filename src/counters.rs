//! Counter strategies and the shared slot infrastructure.
//!
//! Every strategy implements [`Counter`], a flat capability set of
//! `increment`, `decrement` and `read`. They differ only in how concurrent
//! updates are synchronized:
//!
//! | Strategy | Synchronization | Write cost under contention | Read cost |
//! |----------|-----------------|-----------------------------|-----------|
//! | [`Striped`](striped::Striped) | 64 cache-padded atomic cells | lowest | sums 64 cells |
//! | [`Atomic`](atomic::Atomic) | one atomic word | cache-line bouncing | one load |
//! | [`Synchronized`](synchronized::Synchronized) | value owned by a mutex | lock hand-off | one lock |
//! | [`Locked`](locked::Locked) | explicit reentrant lock, scoped guard | lock hand-off | one lock |
//!
//! # Thread Slot Assignment
//!
//! The striped strategy needs every thread to write to its own cell. Slots
//! are assigned round-robin the first time a thread touches a striped
//! counter: the first thread gets slot 0, the second slot 1, and so on,
//! wrapping after [`NUM_COMPONENTS`] threads.
//!
//! ```text
//!   Thread 0 ──writes──►  [Slot 0]  (CachePadded)
//!   Thread 1 ──writes──►  [Slot 1]  (CachePadded)
//!        ...                 ...
//!   Thread 63 ─writes──►  [Slot 63] (CachePadded)
//!                              │
//!                              ▼
//!                      read() sums all slots
//! ```
//!
//! The harness spawns a thousand short-lived threads per round, so slots are
//! shared between threads; contention still drops by the number of slots
//! compared with a single atomic word.

pub mod atomic;
pub mod locked;
pub mod striped;
pub mod synchronized;

use atomic_traits::Atomic as AtomicCell;
use std::{
    fmt::Debug,
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
    sync::Arc,
};

/// Number of cells (slots) used by a striped counter.
///
/// A power of two, so the modulo in [`get_next_slot_id`] is a mask. Each cell
/// is cache-line padded, which puts a striped counter at about 4KB.
pub(crate) const NUM_COMPONENTS: usize = 64;

/// Global counter for assigning slot IDs to threads.
static NEXT_SLOT_ID: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    /// Slot index of the current thread, assigned lazily and stable for the
    /// lifetime of the thread.
    pub(crate) static THREAD_SLOT_INDEX: usize = get_next_slot_id();
}

/// Assigns the next slot ID, in the range `[0, NUM_COMPONENTS)`.
///
/// `Relaxed` is enough: two threads landing on the same slot only costs
/// contention, never correctness.
pub fn get_next_slot_id() -> usize {
    NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed) % NUM_COMPONENTS
}

/// A mutable signed counter that may be shared by any number of actors.
///
/// After `N` increments and `M` decrements have completed, [`read`](Counter::read)
/// returns exactly `N - M` whatever the interleaving. While writers are still
/// running, `read` returns some value the counter held at an instant, which
/// is all a benchmark snapshot needs.
///
/// # Examples
///
/// ```rust
/// use contesa::counters::atomic::Atomic;
/// use contesa::counters::Counter;
///
/// let counter = Atomic::new().with_name("hits");
/// counter.increment();
/// counter.increment();
/// counter.decrement();
///
/// assert_eq!(counter.read(), 1);
/// assert_eq!(counter.name(), "hits");
/// ```
pub trait Counter: Send + Sync + Debug {
    /// Returns the name of the counter, or an empty string when unnamed.
    fn name(&self) -> &str;

    /// Adds one to the counter.
    fn increment(&self);

    /// Subtracts one from the counter. There is no floor at zero.
    fn decrement(&self);

    /// Returns the current value.
    fn read(&self) -> i64;
}

impl Display for dyn Counter + '_ {
    /// Formats the counter as `name:value` if named, or just `value` otherwise.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.name().is_empty() {
            write!(f, "{}:{}", self.name(), self.read())
        } else {
            write!(f, "{}", self.read())
        }
    }
}

/// Access to the current thread's cell of a striped counter.
pub(crate) trait GetComponentCounter {
    /// The atomic type used for individual cells.
    type CounterType: AtomicCell;

    /// Returns a reference to the current thread's cell, selected through
    /// `THREAD_SLOT_INDEX`.
    fn get_component_counter(&self) -> &Self::CounterType;
}

/// The four counter strategies, in report order.
///
/// # Examples
///
/// ```rust
/// use contesa::counters::Strategy;
///
/// for strategy in Strategy::ALL {
///     let counter = strategy.build();
///     counter.increment();
///     assert_eq!(counter.read(), 1);
///     assert_eq!(counter.name(), strategy.name());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Per-thread cells summed on read.
    Striped,
    /// A single atomic word.
    Atomic,
    /// A mutex owning the value.
    Synchronized,
    /// An explicit reentrant lock with a scoped guard.
    Locked,
}

impl Strategy {
    /// Every strategy, in the order the report lists them.
    pub const ALL: [Strategy; 4] = [
        Strategy::Striped,
        Strategy::Atomic,
        Strategy::Synchronized,
        Strategy::Locked,
    ];

    /// Returns the display name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Striped => "StripedCounter",
            Strategy::Atomic => "AtomicCounter",
            Strategy::Synchronized => "SynchronizedCounter",
            Strategy::Locked => "LockedCounter",
        }
    }

    /// Creates a fresh, zeroed counter of this strategy, named after it.
    pub fn build(self) -> Arc<dyn Counter> {
        match self {
            Strategy::Striped => Arc::new(striped::Striped::new().with_name(self.name())),
            Strategy::Atomic => Arc::new(atomic::Atomic::new().with_name(self.name())),
            Strategy::Synchronized => {
                Arc::new(synchronized::Synchronized::new().with_name(self.name()))
            }
            Strategy::Locked => Arc::new(locked::Locked::new().with_name(self.name())),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
