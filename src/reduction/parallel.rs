//! Engine-managed data-parallel reduction.

use rayon::prelude::*;

use crate::error::Result;
use crate::reduction::{Engine, Reducer};

/// Hands the whole reduction to rayon: splitting, scheduling and combining
/// are the engine's business.
///
/// # Examples
///
/// ```rust
/// use contesa::reduction::{DataParallel, Reducer};
///
/// let data = vec![3; 1_000];
/// assert_eq!(DataParallel::default().reduce(&data).unwrap(), 3_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataParallel {
    engine: Engine,
}

impl DataParallel {
    /// Creates the strategy on rayon's global pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs on the given engine instead of the global pool.
    pub fn with_engine(self, engine: Engine) -> Self {
        Self { engine }
    }
}

impl Reducer for DataParallel {
    fn name(&self) -> &'static str {
        "DataParallel"
    }

    fn description(&self) -> &'static str {
        "engine-managed parallel iterator"
    }

    fn reduce(&self, data: &[i32]) -> Result<i32> {
        Ok(self
            .engine
            .install(|| data.par_iter().copied().reduce(|| 0, i32::wrapping_add)))
    }
}
