//! ForestVote Core - Random Forest Majority-Vote Intuition Quiz
//!
//! A round shows a small forest of depth-2 decision trees (one split, two
//! leaves) and a random test point in the unit square. The learner predicts
//! the forest's majority class before the per-tree votes are revealed.
//!
//! 1. **Generation**: trees and points drawn from an injectable entropy source
//! 2. **Evaluation**: deterministic per-tree votes and a strict-majority rule
//! 3. **Session**: a controller owning the round, moving Hidden -> Revealed
//!
//! Rendering is a separate capability ([`RenderSink`]); the core never
//! depends on a concrete UI.

pub mod config;
pub mod error;
pub mod forest;
pub mod point;
pub mod render;
pub mod session;
pub mod tree;

#[cfg(feature = "dashboard")]
pub mod dashboard;

// Re-export key types for convenience
pub use config::{normalize_tree_count, parse_tree_count, GeneratorConfig, QuizConfig};
pub use error::QuizError;
pub use forest::{evaluate, evaluate_forest, majority_of, Ballot};
pub use point::{generate_point, Point};
pub use render::{Branch, RenderSink, RoundFrame, TextRenderer};
pub use session::{submit_guess, GuessOutcome, Phase, QuizController, Session};
pub use tree::{generate_tree, Class, Feature, Tree};
