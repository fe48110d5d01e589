//! Scenario runner - executes deterministic checks against seeded rounds.

use crate::context::SimEntropy;
use crate::oracle::Oracle;
use crate::scenarios::ScenarioId;

use forestvote_core::config::{MAX_TREES, MIN_TREES};
use forestvote_core::{evaluate, normalize_tree_count, Class, QuizConfig, QuizController, QuizError};
use tracing::{debug, info, warn};

/// Results from running a scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Scenario that was run
    pub scenario: ScenarioId,

    /// Seed used
    pub seed: u64,

    /// Whether scenario passed all assertions
    pub passed: bool,

    /// Rounds generated while checking
    pub rounds: u64,

    /// Failure message if any
    pub failure_reason: Option<String>,
}

/// Outcome of one scenario body: rounds checked, or the first violation.
type CheckResult = Result<u64, String>;

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(message())
    }
}

fn quiz_err(err: QuizError) -> String {
    err.to_string()
}

/// Runs check scenarios.
pub struct ScenarioRunner {
    /// Configuration seed
    seed: u64,

    /// Rounds generated per scenario
    rounds: u64,

    /// Quiz configuration under test
    config: QuizConfig,
}

impl ScenarioRunner {
    /// Creates a new scenario runner.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rounds: 25,
            config: QuizConfig::default(),
        }
    }

    /// Sets the rounds per scenario.
    pub fn with_rounds(mut self, rounds: u64) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the quiz configuration.
    pub fn with_config(mut self, config: QuizConfig) -> Self {
        self.config = config;
        self
    }

    fn controller(&self) -> QuizController<SimEntropy> {
        QuizController::new(SimEntropy::new(self.seed), self.config.clone())
    }

    /// Requested count for round `i`, sweeping below, inside and above the range.
    fn requested_for(i: u64) -> i64 {
        (i % 21) as i64 - 2
    }

    /// Runs a scenario and returns the result.
    pub fn run(&self, scenario: ScenarioId) -> ScenarioResult {
        info!("Starting scenario: {} (seed={})", scenario.name(), self.seed);

        let outcome = match scenario {
            ScenarioId::OddCount => self.run_odd_count(),
            ScenarioId::BoundaryLeft => self.run_boundary_left(),
            ScenarioId::MajorityRule => self.run_majority_rule(),
            ScenarioId::Replay => self.run_replay(),
            ScenarioId::RevealAlignment => self.run_reveal_alignment(),
            ScenarioId::GuessBeforeRound => self.run_guess_before_round(),
        };

        match outcome {
            Ok(rounds) => ScenarioResult {
                scenario,
                seed: self.seed,
                passed: true,
                rounds,
                failure_reason: None,
            },
            Err(reason) => {
                warn!("Scenario {} (seed={}) failed: {}", scenario.name(), self.seed, reason);
                ScenarioResult {
                    scenario,
                    seed: self.seed,
                    passed: false,
                    rounds: 0,
                    failure_reason: Some(reason),
                }
            }
        }
    }

    /// CHK-001: every requested count in -5..=25 yields an odd forest in range.
    fn run_odd_count(&self) -> CheckResult {
        let mut controller = self.controller();
        let mut rounds = 0;

        for requested in -5i64..=25 {
            let expected = normalize_tree_count(requested);
            ensure(expected % 2 == 1, || format!("count {} -> {} is even", requested, expected))?;
            ensure((MIN_TREES..=MAX_TREES).contains(&expected), || {
                format!("count {} -> {} out of range", requested, expected)
            })?;

            let session = controller.start_new_round(requested).map_err(quiz_err)?;
            ensure(session.tree_count() == expected, || {
                format!("requested {} built {} trees, expected {}", requested, session.tree_count(), expected)
            })?;
            rounds += 1;
        }

        info!("✓ OddCount complete: {} counts checked", rounds);
        Ok(rounds)
    }

    /// CHK-002: a point on each tree's threshold takes the left leaf.
    fn run_boundary_left(&self) -> CheckResult {
        let oracle = Oracle::new();
        let mut controller = self.controller();

        for i in 0..self.rounds {
            let session = controller.start_new_round(Self::requested_for(i)).map_err(quiz_err)?;
            for tree in &session.forest {
                let on_threshold = oracle.point_on_threshold(tree, session.point.x1);
                ensure(evaluate(tree, &on_threshold) == tree.left, || {
                    format!("round {} tree {} routed right at {}", session.round, tree.id, on_threshold)
                })?;
            }
        }

        info!("✓ BoundaryLeft complete: {} rounds", self.rounds);
        Ok(self.rounds)
    }

    /// CHK-003: session majority equals the oracle's count.
    fn run_majority_rule(&self) -> CheckResult {
        let oracle = Oracle::new();
        let mut controller = self.controller();
        let mut blue_rounds = 0;

        for i in 0..self.rounds {
            let session = controller.start_new_round(Self::requested_for(i)).map_err(quiz_err)?;
            let expected = oracle.majority(&oracle.votes(&session.forest, &session.point));
            ensure(session.majority == expected, || {
                format!(
                    "round {}: majority {} but oracle says {} (votes {:?})",
                    session.round, session.majority, expected, session.votes
                )
            })?;
            if session.majority == Class::Blue {
                blue_rounds += 1;
            }
        }

        debug!("  {} of {} rounds had a Blue majority", blue_rounds, self.rounds);
        info!("✓ MajorityRule complete: {} rounds", self.rounds);
        Ok(self.rounds)
    }

    /// CHK-004: same seed, same sessions.
    fn run_replay(&self) -> CheckResult {
        let mut first = self.controller();
        let mut second = self.controller();

        for i in 0..self.rounds {
            let requested = Self::requested_for(i);
            let a = first.start_new_round(requested).map_err(quiz_err)?.clone();
            let b = second.start_new_round(requested).map_err(quiz_err)?;
            ensure(&a == b, || format!("round {} diverged between replays", a.round))?;
        }

        info!("✓ Replay complete: {} rounds identical", self.rounds);
        Ok(self.rounds)
    }

    /// CHK-005: votes align with the forest, guesses are judged against the
    /// oracle, and a second guess leaves the outcome alone.
    fn run_reveal_alignment(&self) -> CheckResult {
        let oracle = Oracle::new();
        let mut controller = self.controller();

        for i in 0..self.rounds {
            let session = controller.start_new_round(Self::requested_for(i)).map_err(quiz_err)?.clone();
            for (idx, tree) in session.forest.iter().enumerate() {
                ensure(session.votes[idx] == evaluate(tree, &session.point), || {
                    format!("round {} vote {} misaligned", session.round, idx)
                })?;
            }

            let guess = if i % 2 == 0 { Class::Red } else { Class::Blue };
            let outcome = controller.submit_guess(guess).map_err(quiz_err)?;
            let expected_majority = oracle.majority(&session.votes);
            ensure(outcome.is_correct == (guess == expected_majority), || {
                format!("round {}: guess {} judged {}", session.round, guess, outcome.is_correct)
            })?;
            ensure(outcome.votes == session.votes, || {
                format!("round {}: reveal votes differ from session", session.round)
            })?;

            let again = controller.submit_guess(guess.flipped()).map_err(quiz_err)?;
            ensure(again == outcome, || format!("round {}: second guess re-judged", session.round))?;
        }

        info!("✓ RevealAlignment complete: {} rounds", self.rounds);
        Ok(self.rounds)
    }

    /// CHK-006: guessing with no round is InvalidState.
    fn run_guess_before_round(&self) -> CheckResult {
        let mut controller = self.controller();
        match controller.submit_guess(Class::Blue) {
            Err(QuizError::InvalidState(_)) => {
                info!("✓ GuessBeforeRound complete: rejected with InvalidState");
                Ok(0)
            }
            Err(other) => Err(format!("expected InvalidState, got {}", other)),
            Ok(outcome) => Err(format!("guess accepted before any round: {:?}", outcome)),
        }
    }
}
