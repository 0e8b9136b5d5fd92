//! Sequential baseline.

use crate::error::Result;
use crate::reduction::{wrapping_sum, Reducer};

/// Single-pass accumulation on the calling thread.
///
/// Every other strategy must return exactly what this one returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Reducer for Sequential {
    fn name(&self) -> &'static str {
        "Sequential"
    }

    fn description(&self) -> &'static str {
        "single-thread sum"
    }

    fn reduce(&self, data: &[i32]) -> Result<i32> {
        Ok(wrapping_sum(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        assert_eq!(Sequential.reduce(&[1, 2, 3, 4, 5]).unwrap(), 15);
        assert_eq!(Sequential.reduce(&[]).unwrap(), 0);
        assert_eq!(Sequential.reduce(&[42]).unwrap(), 42);
    }
}
