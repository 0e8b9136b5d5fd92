//! Unified error type for the crate.
//!
//! Pool, task and engine failures all convert into [`Error`], so callers
//! driving several strategies can use a single `?`-friendly [`Result`].
//!
//! # Example
//!
//! ```rust
//! use contesa::reduction::{Partitioned, Reducer};
//! use contesa::Result;
//!
//! fn total(data: &[i32]) -> Result<i32> {
//!     Partitioned::new(4).reduce(data)
//! }
//!
//! assert_eq!(total(&[1, 2, 3]).unwrap(), 6);
//! ```

use thiserror::Error;

/// Unified error type for all fallible operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The worker pool rejected an operation.
    #[error("pool error: {0}")]
    Pool(#[from] PoolError),

    /// A task submitted to the worker pool did not produce a value.
    #[error("task error: {0}")]
    Task(#[from] TaskError),

    /// A dedicated work-stealing pool could not be built.
    #[error("engine error: {0}")]
    Engine(#[from] rayon::ThreadPoolBuildError),

    /// Error serializing a report to JSON.
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by [`WorkerPool`](crate::pool::WorkerPool).
#[derive(Debug, Error)]
pub enum PoolError {
    /// A pool needs at least one worker.
    #[error("worker pool needs at least one worker")]
    ZeroWorkers,

    /// The pool no longer accepts work.
    #[error("worker pool is shut down")]
    Shutdown,

    /// The operating system refused to start a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Outcome of a pooled task that did not return a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The task panicked; the payload message is kept when it is a string.
    #[error("task panicked: {0}")]
    Panicked(String),

    /// The task was dropped before it ran, by a forced shutdown.
    #[error("task was cancelled")]
    Cancelled,
}
