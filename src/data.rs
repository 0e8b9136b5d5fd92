//! Synthetic input for the reduction benchmarks.
//!
//! The benchmark draws from an unseeded generator, so its sums differ from
//! run to run. Tests use [`seeded`] to get the same collection every time.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of the input collection in the reference scenario.
pub const INPUT_LEN: usize = 1_000_000;

/// Exclusive upper bound of generated values; values fall in `[0, VALUE_BOUND)`.
pub const VALUE_BOUND: i32 = 100;

/// Draws `len` values uniformly from `[0, bound)` using `rng`.
///
/// A non-positive `bound` yields a collection of zeros.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, len: usize, bound: i32) -> Vec<i32> {
    if bound <= 0 {
        return vec![0; len];
    }
    Uniform::new(0, bound).sample_iter(rng).take(len).collect()
}

/// Generates the collection from the thread-local, OS-seeded generator.
pub fn random(len: usize) -> Vec<i32> {
    generate(&mut rand::thread_rng(), len, VALUE_BOUND)
}

/// Generates a reproducible collection from a fixed seed.
///
/// # Examples
///
/// ```rust
/// use contesa::data;
///
/// let a = data::seeded(1_000, 7);
/// let b = data::seeded(1_000, 7);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|&v| (0..data::VALUE_BOUND).contains(&v)));
/// ```
pub fn seeded(len: usize, seed: u64) -> Vec<i32> {
    generate(&mut StdRng::seed_from_u64(seed), len, VALUE_BOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_bounds() {
        let data = random(10_000);
        assert_eq!(data.len(), 10_000);
        assert!(data.iter().all(|&v| (0..VALUE_BOUND).contains(&v)));
    }

    #[test]
    fn test_seeded_differs_by_seed() {
        assert_ne!(seeded(100, 1), seeded(100, 2));
    }

    #[test]
    fn test_empty() {
        assert!(seeded(0, 3).is_empty());
    }

    #[test]
    fn test_non_positive_bound() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(generate(&mut rng, 3, 0), vec![0, 0, 0]);
    }
}
