//! Scripted entropy: replays a fixed list of unit draws.

use crate::{EntropySource, RoundId};

/// Largest f64 strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Entropy source that replays a fixed sequence, cycling when exhausted.
///
/// Draws are clamped into `[0, 1)`. An empty script always yields 0.0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEntropy {
    draws: Vec<f64>,
    position: usize,
}

impl ScriptedEntropy {
    /// Creates a source that yields `draws` in order.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            position: 0,
        }
    }

    /// Number of draws consumed so far (not wrapped).
    pub fn position(&self) -> usize {
        self.position
    }
}

impl EntropySource for ScriptedEntropy {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw.clamp(0.0, BELOW_ONE)
    }

    fn seed(&self) -> u64 {
        0
    }

    fn round_id(&mut self, round: u64) -> RoundId {
        RoundId::derived(round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_cycles() {
        let mut entropy = ScriptedEntropy::new(vec![0.1, 0.2]);
        assert_eq!(entropy.next_unit(), 0.1);
        assert_eq!(entropy.next_unit(), 0.2);
        assert_eq!(entropy.next_unit(), 0.1);
        assert_eq!(entropy.position(), 3);
    }

    #[test]
    fn test_scripted_clamps() {
        let mut entropy = ScriptedEntropy::new(vec![1.0, -0.5]);
        let high = entropy.next_unit();
        assert!(high < 1.0 && high > 0.99);
        assert_eq!(entropy.next_unit(), 0.0);
    }

    #[test]
    fn test_scripted_empty() {
        let mut entropy = ScriptedEntropy::default();
        assert_eq!(entropy.next_unit(), 0.0);
    }
}
