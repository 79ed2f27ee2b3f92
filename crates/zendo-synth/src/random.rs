//! Deterministic random number generation.
//!
//! All randomness in the engine flows through a single seeded PRNG
//! (Xoshiro256**) so a test suite can replay the exact sequence of
//! constructor and budget-split choices from a seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Seedable random source for rule synthesis.
///
/// Given the same seed, always produces the same sequence of draws.
///
/// # Example
///
/// ```rust
/// use zendo_synth::SynthRng;
///
/// let mut a = SynthRng::new(12345);
/// let mut b = SynthRng::new(12345);
/// assert_eq!(a.range(0..100), b.range(0..100));
/// ```
pub struct SynthRng {
    seed: u64,
    rng: Xoshiro256StarStar,
}

impl SynthRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        debug_assert!(seed != 0, "Seed should not be zero for better randomness");

        Self {
            seed,
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw from a half-open range.
    pub fn range(&mut self, range: std::ops::Range<usize>) -> usize {
        debug_assert!(!range.is_empty(), "Range must be non-empty");
        self.rng.gen_range(range)
    }

    /// Uniform draw from an inclusive range.
    pub fn range_inclusive(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        debug_assert!(!range.is_empty(), "Range must be non-empty");
        self.rng.gen_range(range)
    }

    /// Uniform real in `[0, bound)`.
    pub fn real(&mut self, bound: f64) -> f64 {
        debug_assert!(bound > 0.0, "Bound must be positive");
        self.rng.gen_range(0.0..bound)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.rng);
    }

    /// Choose a random element from a slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.rng)
    }

    /// Sample `amount` distinct indices from `0..len` without
    /// replacement, via a partial Fisher-Yates shuffle.
    ///
    /// Used to draw the reasonability sample from the corpus. If
    /// `amount >= len` every index is returned (shuffled).
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        let mut indices: Vec<usize> = (0..len).collect();
        for i in 0..amount {
            let j = self.rng.gen_range(i..len);
            indices.swap(i, j);
        }
        indices.truncate(amount);
        indices
    }

    /// Random lowercase a-z string of exactly `length` characters.
    ///
    /// Substring parameters for atomic rules are drawn from the
    /// uniform lowercase alphabet, independent of the corpus.
    pub fn lowercase_string(&mut self, length: usize) -> String {
        (0..length)
            .map(|_| char::from(b'a' + self.rng.gen_range(0..26u8)))
            .collect()
    }

    /// Fork this RNG into a new one with a derived seed.
    ///
    /// Useful for giving independent synthesis attempts their own
    /// deterministic streams.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let new_seed = self.rng.gen::<u64>().max(1);
        Self::new(new_seed)
    }
}

/// Get the synthesis seed from the environment or generate a random one.
///
/// Prints the seed for reproduction. Use `ZENDO_SEED=<seed>` to replay
/// a run exactly.
#[must_use]
pub fn get_or_generate_seed() -> u64 {
    match std::env::var("ZENDO_SEED") {
        Ok(s) => {
            let seed: u64 = s.parse().expect("ZENDO_SEED must be a valid u64");
            println!("ZENDO_SEED={} (from environment)", seed);
            seed
        }
        Err(_) => {
            let seed = rand::random::<u64>().max(1);
            println!("ZENDO_SEED={} (randomly generated)", seed);
            seed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SynthRng::new(42);
        let mut rng2 = SynthRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.range(0..1000), rng2.range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SynthRng::new(42);
        let mut rng2 = SynthRng::new(43);

        let seq1: Vec<usize> = (0..10).map(|_| rng1.range(0..1_000_000)).collect();
        let seq2: Vec<usize> = (0..10).map(|_| rng2.range(0..1_000_000)).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_range_inclusive() {
        let mut rng = SynthRng::new(12345);
        for _ in 0..100 {
            let val = rng.range_inclusive(4..=9);
            assert!((4..=9).contains(&val));
        }
    }

    #[test]
    fn test_real_bound() {
        let mut rng = SynthRng::new(12345);
        for _ in 0..100 {
            let val = rng.real(3.5);
            assert!((0.0..3.5).contains(&val));
        }
    }

    #[test]
    fn test_sample_indices_distinct() {
        let mut rng = SynthRng::new(12345);
        let mut sample = rng.sample_indices(1000, 50);
        assert_eq!(sample.len(), 50);
        sample.sort_unstable();
        sample.dedup();
        assert_eq!(sample.len(), 50, "sampled indices must be distinct");
    }

    #[test]
    fn test_sample_indices_small_population() {
        let mut rng = SynthRng::new(12345);
        let sample = rng.sample_indices(5, 50);
        assert_eq!(sample.len(), 5);
    }

    #[test]
    fn test_lowercase_string() {
        let mut rng = SynthRng::new(12345);
        let s = rng.lowercase_string(3);
        assert_eq!(s.len(), 3);
        assert!(s.chars().all(|c| c.is_ascii_lowercase()));
        assert_eq!(rng.lowercase_string(0), "");
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = SynthRng::new(12345);
        let mut rng2 = SynthRng::new(12345);
        let mut fork1 = rng1.fork();
        let mut fork2 = rng2.fork();
        assert_eq!(fork1.seed(), fork2.seed());
        assert_eq!(fork1.range(0..1000), fork2.range(0..1000));
    }
}
