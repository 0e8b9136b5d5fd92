//! Work-stealing engine selection for the rayon-backed strategies.

use std::fmt::Debug;
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// The work-stealing pool a strategy runs on.
///
/// By default this is rayon's global pool. A dedicated pool isolates a
/// benchmark from other rayon users in the process and pins its size.
///
/// # Examples
///
/// ```rust
/// use contesa::reduction::{Engine, ForkJoinRange, Reducer};
///
/// let engine = Engine::with_threads(2).unwrap();
/// assert_eq!(engine.threads(), 2);
///
/// let reducer = ForkJoinRange::new(4).with_engine(engine);
/// assert_eq!(reducer.reduce(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap(), 45);
/// ```
#[derive(Clone, Default)]
pub struct Engine {
    pool: Option<Arc<ThreadPool>>,
}

impl Engine {
    /// Uses rayon's global pool.
    pub fn global() -> Self {
        Self::default()
    }

    /// Builds a dedicated pool of `threads` workers.
    pub fn with_threads(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("contesa-fj-{i}"))
            .build()?;
        Ok(Self::from_pool(Arc::new(pool)))
    }

    /// Runs on an existing pool.
    pub fn from_pool(pool: Arc<ThreadPool>) -> Self {
        Engine { pool: Some(pool) }
    }

    /// Returns the number of worker threads the engine schedules on.
    pub fn threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Runs `op` inside the engine, so rayon calls it makes are scheduled
    /// on the engine's workers.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.pool {
            Some(pool) => write!(f, "Engine(dedicated, {})", pool.current_num_threads()),
            None => f.write_str("Engine(global)"),
        }
    }
}
