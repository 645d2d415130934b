//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG used for every production run.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of draws → same trip outcomes. Runs without an
//! explicit seed still record the seed they were started with, so any run
//! can be replayed.

use super::UniformSource;
use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use arbor_trip_core::rng::{RngManager, UniformSource};
///
/// let mut rng = RngManager::new(12345);
/// let draw = rng.next_f64();
/// assert!((0.0..1.0).contains(&draw));
/// let street_slip = rng.range(0, 3); // [0, 3)
/// assert!((0..3).contains(&street_slip));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced by 1 (xorshift cannot leave the zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an RNG seeded from fresh OS randomness.
    ///
    /// Returns the generator together with the seed it was built from.
    pub fn from_entropy() -> (Self, u64) {
        let (high, low) = uuid::Uuid::new_v4().as_u64_pair();
        let seed = high ^ low.rotate_left(32);
        (Self::new(seed), seed)
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

impl UniformSource for RngManager {
    fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Top 53 bits → [0.0, 1.0)
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    fn range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "min must be less than max");

        let value = self.next();
        let range_size = (max - min) as u64;
        min + (value % range_size) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "min must be less than max")]
    fn test_range_invalid_bounds() {
        let mut rng = RngManager::new(12345);
        rng.range(3, 3);
    }

    #[test]
    fn test_next_f64_in_range() {
        let mut rng = RngManager::new(12345);

        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!(
                (0.0..1.0).contains(&val),
                "next_f64() produced value {} outside [0.0, 1.0)",
                val
            );
        }
    }

    #[test]
    fn test_entropy_seed_replays() {
        let (mut rng, seed) = RngManager::from_entropy();
        let mut replay = RngManager::new(seed);

        for _ in 0..50 {
            assert_eq!(rng.next(), replay.next());
        }
    }
}
