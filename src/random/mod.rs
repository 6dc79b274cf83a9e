//! Replacement-byte source for randomization commands.
//!
//! The drawing logic itself is a pure function over any [`rand::Rng`];
//! [`Randomizer`] wraps a concrete `StdRng` so hosts get entropy-backed
//! values by default and tests get a fixed seed.

use crate::core::{LockMask, TokenParams, TokenValues};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Draw replacement values for every unlocked slot.
///
/// The returned array is identical to `current` at locked indices and
/// holds independently drawn values uniform over `[params.min, params.max]`
/// at unlocked indices. `current` is never mutated.
pub fn randomize_values<R: Rng>(
    rng: &mut R,
    current: &TokenValues,
    mask: &LockMask,
    params: &TokenParams,
) -> TokenValues {
    let mut bytes = *current.bytes();
    for (index, slot) in bytes.iter_mut().enumerate() {
        if !mask.is_locked(index) {
            *slot = rng.random_range(params.min..=params.max);
        }
    }
    TokenValues::from_bytes(bytes)
}

/// Owned random generator used by the engine.
#[derive(Debug)]
pub struct Randomizer {
    rng: StdRng,
}

impl Randomizer {
    /// Entropy-seeded generator for production use.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic generator with a fixed seed, for reproducible runs
    /// and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a replacement array; see [`randomize_values`].
    pub fn draw(
        &mut self,
        current: &TokenValues,
        mask: &LockMask,
        params: &TokenParams,
    ) -> TokenValues {
        randomize_values(&mut self.rng, current, mask, params)
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for Randomizer {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TOKEN_WIDTH;

    #[test]
    fn locked_slots_keep_their_bytes() {
        let mut randomizer = Randomizer::seeded(11);
        let current = TokenValues::from_bytes([7; TOKEN_WIDTH]);
        let mask = LockMask::unlocked().toggled(3).unwrap().toggled(30).unwrap();

        for _ in 0..50 {
            let drawn = randomizer.draw(&current, &mask, &TokenParams::default());
            assert_eq!(drawn.get(3), Some(7));
            assert_eq!(drawn.get(30), Some(7));
        }
    }

    #[test]
    fn drawn_values_respect_the_range() {
        let mut randomizer = Randomizer::seeded(23);
        let params = TokenParams {
            min: 10,
            max: 20,
            step: 1,
        };

        let drawn = randomizer.draw(
            &TokenValues::zero(),
            &LockMask::unlocked(),
            &params,
        );

        assert!(drawn.bytes().iter().all(|b| (10..=20).contains(b)));
    }

    #[test]
    fn degenerate_range_pins_every_unlocked_slot() {
        let mut randomizer = Randomizer::seeded(5);
        let params = TokenParams {
            min: 42,
            max: 42,
            step: 1,
        };

        let drawn = randomizer.draw(
            &TokenValues::zero(),
            &LockMask::unlocked(),
            &params,
        );

        assert!(drawn.bytes().iter().all(|b| *b == 42));
    }

    #[test]
    fn input_array_is_never_mutated() {
        let mut randomizer = Randomizer::seeded(1);
        let current = TokenValues::zero();

        let _ = randomizer.draw(&current, &LockMask::unlocked(), &TokenParams::default());

        assert_eq!(current, TokenValues::zero());
    }

    #[test]
    fn seeded_generators_replay_the_same_sequence() {
        let params = TokenParams::default();
        let mask = LockMask::unlocked();

        let first = Randomizer::seeded(99).draw(&TokenValues::zero(), &mask, &params);
        let second = Randomizer::seeded(99).draw(&TokenValues::zero(), &mask, &params);

        assert_eq!(first, second);
    }
}
