//! Core entropy trait for ForestVote rounds.

use crate::error::EnvError;
use crate::types::RoundId;

/// The central interface for randomness.
///
/// This trait abstracts the "process-wide random source" so that round
/// generation can run against OS entropy in production and against a
/// reproducible stream in simulation and tests.
///
/// # Implementations
///
/// - **Production**: `OsEntropy` - wraps `rand::thread_rng()`
/// - **Simulation**: `SimEntropy` (forestvote_sim) - `ChaCha8Rng(seed)`
/// - **Tests**: `ScriptedEntropy` - replays a fixed list of draws
///
/// # Determinism
///
/// Implementors only supply [`next_unit`](EntropySource::next_unit). All other
/// helpers are derived from it, so two sources yielding the same unit draws
/// make the same decisions.
pub trait EntropySource {
    /// Returns the next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns the source's seed (for logging/debugging).
    ///
    /// Unseeded sources return 0.
    fn seed(&self) -> u64;

    /// Derives the identifier for the given round number.
    ///
    /// Seeded implementations combine their seed with `round` so that a
    /// replayed run produces the same ids.
    fn round_id(&mut self, round: u64) -> RoundId;

    /// Uniform real in `[0, 1)`.
    fn uniform_unit(&mut self) -> f64 {
        self.next_unit()
    }

    /// Uniform integer in `[a, b]` inclusive. The caller ensures `a <= b`.
    fn uniform_int(&mut self, a: i64, b: i64) -> i64 {
        debug_assert!(a <= b, "uniform_int called with a > b");
        let span = (b - a + 1) as f64;
        let offset = (self.next_unit() * span).floor() as i64;
        (a + offset).min(b)
    }

    /// Fair coin flip, `P(true) = 0.5`.
    fn coin(&mut self) -> bool {
        self.next_unit() < 0.5
    }

    /// Returns `true` with probability `p`.
    fn bernoulli(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniformly selects one element of a non-empty slice.
    ///
    /// # Errors
    /// * `EnvError::InvalidArgument` - `items` is empty. No draw is consumed.
    fn choice<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T, EnvError>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return Err(EnvError::invalid_argument("choice from an empty set"));
        }
        let idx = (self.next_unit() * items.len() as f64).floor() as usize;
        Ok(&items[idx.min(items.len() - 1)])
    }
}
