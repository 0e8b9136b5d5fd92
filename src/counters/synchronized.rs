//! Counter whose value lives inside a mutex.

use std::fmt::Debug;

use parking_lot::Mutex;

use crate::counters::Counter;

/// A counter guarded by an implicit critical section.
///
/// The integer is owned by a [`parking_lot::Mutex`], so there is no way to
/// reach it without taking the lock: every method body is a critical
/// section, and the guard drops at the end of the statement.
///
/// # Examples
///
/// ```rust
/// use contesa::counters::synchronized::Synchronized;
/// use contesa::counters::Counter;
///
/// let counter = Synchronized::new();
/// counter.increment();
/// counter.decrement();
/// counter.increment();
/// assert_eq!(counter.read(), 1);
/// ```
pub struct Synchronized {
    name: &'static str,
    value: Mutex<i64>,
}

impl Synchronized {
    /// Creates a new counter at zero with no name.
    pub const fn new() -> Self {
        Synchronized {
            name: "",
            value: Mutex::new(0),
        }
    }

    /// Sets the name of this counter, returning `self` for method chaining.
    pub fn with_name(self, name: &'static str) -> Self {
        Self { name, ..self }
    }
}

impl Counter for Synchronized {
    fn name(&self) -> &str {
        self.name
    }

    fn increment(&self) {
        *self.value.lock() += 1;
    }

    fn decrement(&self) {
        *self.value.lock() -= 1;
    }

    fn read(&self) -> i64 {
        *self.value.lock()
    }
}

impl Default for Synchronized {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Synchronized {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{ {} }}", self.name, self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new() {
        let counter = Synchronized::default();
        assert_eq!(counter.read(), 0);
        assert_eq!(counter.name(), "");
    }

    #[test]
    fn test_with_name_preserves_value() {
        let counter = Synchronized::new().with_name("sync");
        counter.decrement();
        assert_eq!(counter.name(), "sync");
        assert_eq!(counter.read(), -1);
    }

    #[test]
    fn test_multiple_threads() {
        let counter = Arc::new(Synchronized::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..500 {
                        if i % 2 == 0 {
                            counter.increment();
                        } else {
                            counter.decrement();
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.read(), 0);
    }
}
