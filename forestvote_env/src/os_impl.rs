//! Production implementation of EntropySource using the OS-seeded thread RNG.

use crate::{EntropySource, RoundId};
use rand::rngs::ThreadRng;
use rand::Rng;

/// Production entropy backed by `rand::thread_rng()`.
///
/// This is the "real" implementation used by the interactive quiz.
/// Rounds are not reproducible.
pub struct OsEntropy {
    rng: ThreadRng,
}

impl OsEntropy {
    /// Creates a new OsEntropy.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for OsEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for OsEntropy {
    fn next_unit(&mut self) -> f64 {
        // gen::<f64>() samples [0, 1)
        self.rng.gen::<f64>()
    }

    fn seed(&self) -> u64 {
        // Production is not seeded
        0
    }

    fn round_id(&mut self, _round: u64) -> RoundId {
        RoundId::random()
    }
}
