//! Quiz session state and the round controller.
//!
//! A [`Session`] is the single source of truth for one round: the forest,
//! the test point, the per-tree votes and the majority. It is rebuilt
//! wholesale on every new round and never mutated in place.
//!
//! ```text
//!  Configuring ──start_new_round──► Hidden ──submit_guess──► Revealed
//!                                     ▲                          │
//!                                     └─────start_new_round──────┘
//! ```

use crate::config::{normalize_tree_count, GeneratorConfig, QuizConfig};
use crate::error::QuizError;
use crate::forest::{count_votes, evaluate_forest};
use crate::point::{generate_point, Point};
use crate::render::{RenderSink, RoundFrame};
use crate::tree::{generate_tree, Class, Tree};
use forestvote_env::{EntropySource, RoundId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where the current round is in its reveal flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No round started yet
    Configuring,
    /// Trees shown, votes hidden
    Hidden,
    /// Votes shown after a guess
    Revealed,
}

/// One complete round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub round_id: RoundId,

    /// 1-based round number within the controller's lifetime
    pub round: u64,

    pub forest: Vec<Tree>,
    pub point: Point,

    /// `votes[i]` is `forest[i]`'s vote on `point`
    pub votes: Vec<Class>,

    pub majority: Class,
}

impl Session {
    /// Generates a round with exactly `tree_count` trees.
    ///
    /// Callers normalize the count first; this builds whatever it is given.
    /// Nothing is published on failure.
    pub fn generate<E: EntropySource>(
        tree_count: usize,
        round: u64,
        config: &GeneratorConfig,
        entropy: &mut E,
    ) -> Result<Self, QuizError> {
        let forest = (0..tree_count)
            .map(|i| generate_tree(i, config, entropy))
            .collect::<Result<Vec<_>, _>>()?;
        let point = generate_point(entropy);
        let ballot = evaluate_forest(&forest, &point);

        Ok(Self {
            round_id: entropy.round_id(round),
            round,
            forest,
            point,
            votes: ballot.votes,
            majority: ballot.majority,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.forest.len()
    }

    /// Number of trees voting `class`.
    pub fn count(&self, class: Class) -> usize {
        count_votes(&self.votes, class)
    }

    /// Compares a guess to the majority. Always carries the full breakdown.
    pub fn judge(&self, guess: Class) -> GuessOutcome {
        GuessOutcome {
            guess,
            is_correct: guess == self.majority,
            majority: self.majority,
            votes: self.votes.clone(),
        }
    }

    /// Render frame for this round. Votes are hidden until `reveal` is given.
    pub fn frame<'a>(&'a self, reveal: Option<&'a GuessOutcome>) -> RoundFrame<'a> {
        RoundFrame {
            round_id: self.round_id,
            round: self.round,
            point: &self.point,
            trees: &self.forest,
            votes_hidden: reveal.is_none(),
            reveal,
        }
    }
}

/// Result of a guess, with everything needed for the reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    pub guess: Class,
    pub is_correct: bool,
    pub majority: Class,
    pub votes: Vec<Class>,
}

impl GuessOutcome {
    /// Number of trees voting `class`.
    pub fn count(&self, class: Class) -> usize {
        count_votes(&self.votes, class)
    }
}

/// Judges a guess against a session.
///
/// # Errors
/// * `QuizError::InvalidState` - no session has been started
pub fn submit_guess(session: Option<&Session>, guess: Class) -> Result<GuessOutcome, QuizError> {
    session
        .map(|s| s.judge(guess))
        .ok_or_else(|| QuizError::invalid_state("guess submitted before any round was started"))
}

/// Owns the entropy source and the current round.
///
/// There is no ambient state: everything a round needs lives here and is
/// handed to the presentation layer by reference.
pub struct QuizController<E: EntropySource> {
    entropy: E,
    config: QuizConfig,
    session: Option<Session>,
    outcome: Option<GuessOutcome>,
    phase: Phase,
    rounds_started: u64,
}

impl<E: EntropySource> QuizController<E> {
    pub fn new(entropy: E, config: QuizConfig) -> Self {
        Self {
            entropy,
            config,
            session: None,
            outcome: None,
            phase: Phase::Configuring,
            rounds_started: 0,
        }
    }

    /// Controller with the default configuration.
    pub fn with_defaults(entropy: E) -> Self {
        Self::new(entropy, QuizConfig::default())
    }

    /// Starts a new round, replacing any previous one in full.
    ///
    /// The requested count is normalized (clamped to `[3, 15]`, forced odd).
    /// On error the previous round and phase are left untouched.
    pub fn start_new_round(&mut self, requested: i64) -> Result<&Session, QuizError> {
        let tree_count = normalize_tree_count(requested);
        let round = self.rounds_started + 1;

        let session = Session::generate(tree_count, round, &self.config.generator, &mut self.entropy)
            .map_err(|e| {
                warn!("Round {} generation failed: {}", round, e);
                e
            })?;

        info!(
            "Round {} ({}) | {} trees | point {}",
            round, session.round_id, tree_count, session.point
        );
        // INFO output must not reveal the answer before a guess
        debug!(
            "  majority {} | Red={} Blue={} (requested {})",
            session.majority,
            session.count(Class::Red),
            session.count(Class::Blue),
            requested
        );

        self.rounds_started = round;
        self.outcome = None;
        self.phase = Phase::Hidden;
        Ok(&*self.session.insert(session))
    }

    /// Starts a round with the configured default count.
    pub fn start_default_round(&mut self) -> Result<&Session, QuizError> {
        let requested = i64::try_from(self.config.effective_default_count()).unwrap_or(i64::MAX);
        self.start_new_round(requested)
    }

    /// Submits a guess for the current round.
    ///
    /// The first guess of a round is judged and moves it to `Revealed`. Later
    /// guesses in the same round return that first outcome unchanged.
    ///
    /// # Errors
    /// * `QuizError::InvalidState` - no round has been started
    pub fn submit_guess(&mut self, guess: Class) -> Result<GuessOutcome, QuizError> {
        if let Some(outcome) = &self.outcome {
            debug!("Round {} already revealed; ignoring guess {}", self.rounds_started, guess);
            return Ok(outcome.clone());
        }

        let outcome = submit_guess(self.session.as_ref(), guess).map_err(|e| {
            warn!("Rejected guess {}: {}", guess, e);
            e
        })?;

        info!(
            "Round {} | guess {} | majority {} | {}",
            self.rounds_started,
            guess,
            outcome.majority,
            if outcome.is_correct { "correct" } else { "incorrect" }
        );

        self.phase = Phase::Revealed;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Renders the current round through `sink`.
    ///
    /// # Errors
    /// * `QuizError::InvalidState` - no round has been started
    pub fn render<S: RenderSink + ?Sized>(&self, sink: &mut S) -> Result<(), QuizError> {
        let frame = self
            .frame()
            .ok_or_else(|| QuizError::invalid_state("nothing to render before the first round"))?;
        sink.render(&frame)
    }

    /// Render frame for the current round, if any.
    pub fn frame(&self) -> Option<RoundFrame<'_>> {
        self.session
            .as_ref()
            .map(|session| session.frame(self.outcome.as_ref()))
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn outcome(&self) -> Option<&GuessOutcome> {
        self.outcome.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Rounds started so far.
    pub fn rounds_started(&self) -> u64 {
        self.rounds_started
    }

    /// Seed of the underlying entropy source (0 when unseeded).
    pub fn seed(&self) -> u64 {
        self.entropy.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::evaluate;
    use crate::tree::Feature;
    use forestvote_env::ScriptedEntropy;

    /// Draws for one non-degenerate tree: x1, threshold 0.5, Red | Blue.
    const X1_HALF_RED_BLUE: [f64; 4] = [0.1, 0.45, 0.1, 0.9];

    fn scripted_round(trees: usize, x1: f64, x2: f64) -> ScriptedEntropy {
        let mut draws = Vec::new();
        for _ in 0..trees {
            draws.extend_from_slice(&X1_HALF_RED_BLUE);
        }
        draws.push(x1);
        draws.push(x2);
        ScriptedEntropy::new(draws)
    }

    #[test]
    fn test_uniform_forest_votes_red() {
        let mut controller = QuizController::with_defaults(scripted_round(5, 0.3, 0.6));
        let session = controller.start_new_round(5).unwrap();

        assert_eq!(session.tree_count(), 5);
        for tree in &session.forest {
            assert_eq!(tree.feature, Feature::X1);
            assert_eq!(tree.threshold, 0.5);
            assert_eq!((tree.left, tree.right), (Class::Red, Class::Blue));
        }
        assert_eq!(session.point, Point::new(0.3, 0.6));
        assert_eq!(session.votes, vec![Class::Red; 5]);
        assert_eq!(session.majority, Class::Red);
    }

    #[test]
    fn test_judge_two_blue_one_red() {
        let session = Session {
            round_id: RoundId::derived(1),
            round: 1,
            forest: vec![
                Tree::new(0, Feature::X1, 0.2, Class::Red, Class::Blue),
                Tree::new(1, Feature::X1, 0.35, Class::Red, Class::Blue),
                Tree::new(2, Feature::X1, 0.8, Class::Red, Class::Blue),
            ],
            point: Point::new(0.5, 0.5),
            votes: vec![Class::Blue, Class::Blue, Class::Red],
            majority: Class::Blue,
        };

        let wrong = session.judge(Class::Red);
        assert!(!wrong.is_correct);
        assert_eq!(wrong.majority, Class::Blue);
        assert_eq!(wrong.votes, session.votes);

        let right = session.judge(Class::Blue);
        assert!(right.is_correct);
        assert_eq!(right.count(Class::Blue), 2);
    }

    #[test]
    fn test_requested_counts_normalized() {
        let mut controller = QuizController::with_defaults(ScriptedEntropy::new(vec![0.42, 0.17, 0.93]));
        assert_eq!(controller.start_new_round(4).unwrap().tree_count(), 5);
        assert_eq!(controller.start_new_round(20).unwrap().tree_count(), 15);
        assert_eq!(controller.start_new_round(1).unwrap().tree_count(), 3);
    }

    #[test]
    fn test_guess_before_round_is_invalid_state() {
        let mut controller = QuizController::with_defaults(ScriptedEntropy::new(vec![0.5]));
        let err = controller.submit_guess(Class::Red).unwrap_err();
        assert!(matches!(err, QuizError::InvalidState(_)));
        assert_eq!(controller.phase(), Phase::Configuring);

        assert!(matches!(submit_guess(None, Class::Blue), Err(QuizError::InvalidState(_))));
    }

    #[test]
    fn test_phase_flow_and_repeat_guess() {
        let mut controller = QuizController::with_defaults(scripted_round(3, 0.9, 0.1));
        assert_eq!(controller.phase(), Phase::Configuring);

        controller.start_new_round(3).unwrap();
        assert_eq!(controller.phase(), Phase::Hidden);
        assert!(controller.frame().unwrap().votes_hidden);

        // x1 = 0.9 > 0.5 routes every tree right -> Blue
        let first = controller.submit_guess(Class::Red).unwrap();
        assert!(!first.is_correct);
        assert_eq!(controller.phase(), Phase::Revealed);
        assert!(!controller.frame().unwrap().votes_hidden);

        // A second guess does not re-judge
        let second = controller.submit_guess(Class::Blue).unwrap();
        assert_eq!(second, first);

        controller.start_new_round(3).unwrap();
        assert_eq!(controller.phase(), Phase::Hidden);
        assert!(controller.outcome().is_none());
        assert_eq!(controller.rounds_started(), 2);
    }

    #[test]
    fn test_votes_align_with_evaluation() {
        let mut controller = QuizController::with_defaults(ScriptedEntropy::new(vec![
            0.11, 0.52, 0.73, 0.34, 0.95, 0.26, 0.67, 0.08, 0.49, 0.3, 0.81, 0.62,
        ]));
        for requested in [3, 7, 15] {
            let session = controller.start_new_round(requested).unwrap();
            for (tree, vote) in session.forest.iter().zip(&session.votes) {
                assert_eq!(evaluate(tree, &session.point), *vote);
            }
            let ids: Vec<usize> = session.forest.iter().map(|t| t.id).collect();
            assert_eq!(ids, (0..session.tree_count()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_failed_round_keeps_previous_session() {
        let mut controller = QuizController::with_defaults(scripted_round(3, 0.2, 0.2));
        let before = controller.start_new_round(3).unwrap().clone();

        controller.config.generator.thresholds.clear();
        let err = controller.start_new_round(3).unwrap_err();
        assert!(matches!(err, QuizError::InvalidArgument(_)));
        assert_eq!(controller.session(), Some(&before));
        assert_eq!(controller.phase(), Phase::Hidden);
        assert_eq!(controller.rounds_started(), 1);
    }

    #[test]
    fn test_round_ids_follow_entropy() {
        let mut controller = QuizController::with_defaults(scripted_round(3, 0.2, 0.2));
        let first = controller.start_new_round(3).unwrap().round_id;
        assert_eq!(first, RoundId::derived(1));
    }

    #[test]
    fn test_start_default_round_uses_config() {
        let config = QuizConfig {
            default_tree_count: 8,
            ..QuizConfig::default()
        };
        let mut controller = QuizController::new(ScriptedEntropy::new(vec![0.3, 0.6]), config);
        assert_eq!(controller.start_default_round().unwrap().tree_count(), 9);
    }
}
