//! Deterministic random number generation for match setup.
//!
//! A match is seeded once; independent streams are derived per purpose
//! (one per deck shuffle, one for turn order) so that adding a random
//! draw in one place never changes the outcome of another.
//!
//! ```
//! use card_battle::core::GameRng;
//!
//! let rng = GameRng::new(42);
//! let mut deck_a = rng.for_context("deck-0");
//! let mut deck_b = GameRng::new(42).for_context("deck-0");
//!
//! let mut first = vec![1, 2, 3, 4, 5];
//! let mut second = first.clone();
//! deck_a.shuffle(&mut first);
//! deck_b.shuffle(&mut second);
//! assert_eq!(first, second);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this generator was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream for a named purpose.
    ///
    /// The same context always yields the same stream for the same seed,
    /// regardless of how many values were drawn from `self`.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a random index in the given range.
    pub fn gen_index(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(7);
        let mut rng2 = GameRng::new(7);

        for _ in 0..50 {
            assert_eq!(rng1.gen_index(0..1000), rng2.gen_index(0..1000));
        }
    }

    #[test]
    fn test_contexts_are_independent() {
        let rng = GameRng::new(42);
        let mut deck = rng.for_context("deck-0");
        let mut turn = rng.for_context("turn-order");

        let seq1: Vec<_> = (0..10).map(|_| deck.gen_index(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| turn.gen_index(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_ignores_parent_draws() {
        let mut used = GameRng::new(3);
        let _ = used.gen_index(0..10);
        let fresh = GameRng::new(3);

        assert_eq!(
            used.for_context("deck-1").seed(),
            fresh.for_context("deck-1").seed()
        );
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=20).collect();
        rng.shuffle(&mut data);

        assert_ne!(data, (1..=20).collect::<Vec<_>>());
        data.sort_unstable();
        assert_eq!(data, (1..=20).collect::<Vec<_>>());
    }
}
