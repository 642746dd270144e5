//! Sources of measurement outcomes.
//!
//! The engine never touches ambient randomness. It asks a [`CollapseSource`]
//! for one [`Bit`] per classical move, so callers choose between a seeded
//! generator for real play and a scripted sequence for tests and replays.

use crate::types::Bit;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use tracing::{debug, instrument, warn};

/// Produces the outcome of measuring a quantum cell.
pub trait CollapseSource: std::fmt::Debug {
    /// Draws one uniformly distributed bit.
    fn measure(&mut self) -> Bit;
}

impl<S: CollapseSource + ?Sized> CollapseSource for &mut S {
    fn measure(&mut self) -> Bit {
        (**self).measure()
    }
}

impl<S: CollapseSource + ?Sized> CollapseSource for Box<S> {
    fn measure(&mut self) -> Bit {
        (**self).measure()
    }
}

/// Deterministic coin backed by ChaCha8.
///
/// The same seed always yields the same sequence of collapses.
#[derive(Clone, Debug)]
pub struct SeededCollapse {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededCollapse {
    /// Create a coin with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a coin with a fresh random seed.
    ///
    /// The seed is logged so a surprising match can be replayed.
    #[must_use]
    #[instrument]
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        debug!(seed, "Seeded collapse source from entropy");
        Self::new(seed)
    }

    /// Seed this coin was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl CollapseSource for SeededCollapse {
    fn measure(&mut self) -> Bit {
        Bit::from(self.inner.gen_bool(0.5))
    }
}

/// Replays a fixed sequence of bits.
///
/// Once the script runs out every further measurement yields [`Bit::Zero`].
#[derive(Clone, Debug, Default)]
pub struct ScriptedCollapse {
    bits: VecDeque<Bit>,
}

impl ScriptedCollapse {
    /// Creates a source that yields `bits` in order.
    pub fn new(bits: impl IntoIterator<Item = Bit>) -> Self {
        Self {
            bits: bits.into_iter().collect(),
        }
    }

    /// Appends a bit to the end of the script.
    pub fn push(&mut self, bit: Bit) {
        self.bits.push_back(bit);
    }

    /// Bits not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bits.len()
    }
}

impl CollapseSource for ScriptedCollapse {
    fn measure(&mut self) -> Bit {
        self.bits.pop_front().unwrap_or_else(|| {
            warn!("Collapse script exhausted, defaulting to Zero");
            Bit::Zero
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededCollapse::new(42);
        let mut b = SeededCollapse::new(42);
        let left: Vec<Bit> = (0..64).map(|_| a.measure()).collect();
        let right: Vec<Bit> = (0..64).map(|_| b.measure()).collect();
        assert_eq!(left, right);
        assert_eq!(a.seed(), 42);
    }

    #[test]
    fn test_seeded_source_produces_both_bits() {
        let mut coin = SeededCollapse::new(7);
        let bits: Vec<Bit> = (0..256).map(|_| coin.measure()).collect();
        assert!(bits.contains(&Bit::Zero));
        assert!(bits.contains(&Bit::One));
    }

    #[test]
    fn test_scripted_source_replays_then_defaults() {
        let mut coin = ScriptedCollapse::new([Bit::One, Bit::Zero]);
        coin.push(Bit::One);
        assert_eq!(coin.remaining(), 3);
        assert_eq!(coin.measure(), Bit::One);
        assert_eq!(coin.measure(), Bit::Zero);
        assert_eq!(coin.measure(), Bit::One);
        assert_eq!(coin.measure(), Bit::Zero);
        assert_eq!(coin.remaining(), 0);
    }

    #[test]
    fn test_boxed_and_borrowed_sources() {
        fn draw<C: CollapseSource>(mut source: C) -> Bit {
            source.measure()
        }

        let mut scripted = ScriptedCollapse::new([Bit::One, Bit::Zero]);
        assert_eq!(draw(&mut scripted), Bit::One);
        assert_eq!(scripted.remaining(), 1);

        let boxed: Box<dyn CollapseSource> = Box::new(ScriptedCollapse::new([Bit::One]));
        assert_eq!(draw(boxed), Bit::One);
    }
}
