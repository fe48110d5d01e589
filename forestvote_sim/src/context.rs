//! Seeded entropy implementing EntropySource for deterministic runs.

use forestvote_env::{EntropySource, RoundId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Simulation entropy backed by a seeded ChaCha8 stream.
///
/// The same seed replays the same sequence of rounds, including round ids.
#[derive(Debug, Clone)]
pub struct SimEntropy {
    /// Master seed for this run
    seed: u64,

    /// Deterministic RNG for every draw
    rng: ChaCha8Rng,
}

impl SimEntropy {
    /// Creates a new SimEntropy with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl EntropySource for SimEntropy {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn round_id(&mut self, round: u64) -> RoundId {
        // Combine master seed with the round number; no draw is consumed
        RoundId::derived(self.seed.wrapping_mul(0x9e3779b97f4a7c15) ^ round)
    }
}
