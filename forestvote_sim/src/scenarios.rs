//! Deterministic check scenarios for the quiz core.

/// Scenario identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioId {
    /// CHK-001: normalized tree counts are odd and within bounds
    OddCount,

    /// CHK-002: a point on the threshold routes left
    BoundaryLeft,

    /// CHK-003: majority matches an independent count
    MajorityRule,

    /// CHK-004: same seed, same rounds
    Replay,

    /// CHK-005: votes line up with the forest and guesses are judged correctly
    RevealAlignment,

    /// CHK-006: guessing before any round is rejected
    GuessBeforeRound,
}

impl ScenarioId {
    /// Returns a list of all scenarios.
    pub fn all() -> Vec<ScenarioId> {
        vec![
            ScenarioId::OddCount,
            ScenarioId::BoundaryLeft,
            ScenarioId::MajorityRule,
            ScenarioId::Replay,
            ScenarioId::RevealAlignment,
            ScenarioId::GuessBeforeRound,
        ]
    }

    /// Returns the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioId::OddCount => "odd_count",
            ScenarioId::BoundaryLeft => "boundary_left",
            ScenarioId::MajorityRule => "majority_rule",
            ScenarioId::Replay => "replay",
            ScenarioId::RevealAlignment => "reveal_alignment",
            ScenarioId::GuessBeforeRound => "guess_before_round",
        }
    }

    /// Returns a description of the scenario.
    pub fn description(&self) -> &'static str {
        match self {
            ScenarioId::OddCount => "Requested counts -5..=25 normalize to odd values in [3, 15]",
            ScenarioId::BoundaryLeft => "value == threshold votes the left leaf for every tree",
            ScenarioId::MajorityRule => "Majority equals Blue iff more than half the votes are Blue",
            ScenarioId::Replay => "Two controllers with one seed produce identical sessions",
            ScenarioId::RevealAlignment => "votes[i] == evaluate(forest[i], point); first guess stands",
            ScenarioId::GuessBeforeRound => "submit_guess before start_new_round is InvalidState",
        }
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "odd_count" | "oddcount" | "chk-001" => Ok(ScenarioId::OddCount),
            "boundary_left" | "boundaryleft" | "chk-002" => Ok(ScenarioId::BoundaryLeft),
            "majority_rule" | "majorityrule" | "chk-003" => Ok(ScenarioId::MajorityRule),
            "replay" | "chk-004" => Ok(ScenarioId::Replay),
            "reveal_alignment" | "revealalignment" | "chk-005" => Ok(ScenarioId::RevealAlignment),
            "guess_before_round" | "guessbeforeround" | "chk-006" => Ok(ScenarioId::GuessBeforeRound),
            _ => Err(format!("Unknown scenario: {}", s)),
        }
    }
}
