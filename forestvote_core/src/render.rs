//! Presentation boundary.
//!
//! The core hands a [`RoundFrame`] to any [`RenderSink`]; sinks decide how it
//! looks. [`TextRenderer`] is the plain-text sink used by the console loop.

use crate::error::QuizError;
use crate::point::Point;
use crate::session::GuessOutcome;
use crate::tree::{Class, Tree};
use forestvote_env::RoundId;
use std::io::Write;

/// Which leaf a point reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Left,
    Right,
}

/// Everything a sink needs to draw one round.
#[derive(Debug, Clone, Copy)]
pub struct RoundFrame<'a> {
    pub round_id: RoundId,
    pub round: u64,
    pub point: &'a Point,
    pub trees: &'a [Tree],

    /// Per-tree votes and path highlights are withheld while true
    pub votes_hidden: bool,

    /// Present once the round has been guessed
    pub reveal: Option<&'a GuessOutcome>,
}

impl RoundFrame<'_> {
    /// Branch `tree` sends the point down, or `None` while votes are hidden.
    pub fn taken_branch(&self, tree: &Tree) -> Option<Branch> {
        if self.votes_hidden {
            return None;
        }
        Some(if tree.routes_left(self.point) {
            Branch::Left
        } else {
            Branch::Right
        })
    }

    /// The tree's vote, or `None` while votes are hidden.
    pub fn visible_vote(&self, tree: &Tree) -> Option<Class> {
        self.taken_branch(tree).map(|branch| match branch {
            Branch::Left => tree.left,
            Branch::Right => tree.right,
        })
    }
}

/// Capability for drawing rounds.
pub trait RenderSink {
    fn render(&mut self, frame: &RoundFrame<'_>) -> Result<(), QuizError>;
}

/// `Test point: x1 = 0.30, x2 = 0.72`
pub fn point_line(point: &Point) -> String {
    format!("Test point: {}", point)
}

/// `Forest majority: Blue (Red: 2, Blue: 3)`
pub fn majority_line(outcome: &GuessOutcome) -> String {
    format!(
        "Forest majority: {} (Red: {}, Blue: {})",
        outcome.majority,
        outcome.count(Class::Red),
        outcome.count(Class::Blue)
    )
}

/// `Correct!` or `Incorrect. Forest predicts Blue.`
pub fn feedback_line(outcome: &GuessOutcome) -> String {
    if outcome.is_correct {
        "Correct!".to_string()
    } else {
        format!("Incorrect. Forest predicts {}.", outcome.majority)
    }
}

/// `x1 ≤ 0.50`
pub fn split_label(tree: &Tree) -> String {
    format!("{} ≤ {:.2}", tree.feature, tree.threshold)
}

/// Plain-text sink writing to any `io::Write`.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_tree(&mut self, frame: &RoundFrame<'_>, tree: &Tree) -> std::io::Result<()> {
        let taken = frame.taken_branch(tree);
        let marker = |branch: Branch| if taken == Some(branch) { "  ◀" } else { "" };

        match frame.visible_vote(tree) {
            Some(vote) => writeln!(self.out, "Tree {}  [{}]  vote: {}", tree.id + 1, split_label(tree), vote)?,
            None => writeln!(self.out, "Tree {}  [{}]", tree.id + 1, split_label(tree))?,
        }
        writeln!(self.out, "  ├─ yes → {}{}", tree.left, marker(Branch::Left))?;
        writeln!(self.out, "  └─ no  → {}{}", tree.right, marker(Branch::Right))?;
        Ok(())
    }

    fn write_frame(&mut self, frame: &RoundFrame<'_>) -> std::io::Result<()> {
        writeln!(self.out, "── Round {} ({}) ──", frame.round, frame.round_id)?;
        writeln!(self.out, "{}", point_line(frame.point))?;
        writeln!(self.out)?;

        for tree in frame.trees {
            self.write_tree(frame, tree)?;
        }

        match frame.reveal {
            Some(outcome) => {
                writeln!(self.out)?;
                let chips: Vec<String> = outcome
                    .votes
                    .iter()
                    .enumerate()
                    .map(|(i, vote)| format!("T{} vote: {}", i + 1, vote))
                    .collect();
                writeln!(self.out, "{}", chips.join(" | "))?;
                writeln!(self.out, "{}", majority_line(outcome))?;
                writeln!(self.out, "{}", feedback_line(outcome))?;
            }
            None => {
                writeln!(self.out)?;
                writeln!(self.out, "Which class does the forest vote for? (Red / Blue)")?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> RenderSink for TextRenderer<W> {
    fn render(&mut self, frame: &RoundFrame<'_>) -> Result<(), QuizError> {
        self.write_frame(frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::tree::Feature;

    fn sample_session() -> Session {
        Session {
            round_id: RoundId::derived(9),
            round: 4,
            forest: vec![
                Tree::new(0, Feature::X1, 0.5, Class::Red, Class::Blue),
                Tree::new(1, Feature::X2, 0.2, Class::Blue, Class::Red),
                Tree::new(2, Feature::X1, 0.8, Class::Blue, Class::Red),
            ],
            point: Point::new(0.3, 0.72),
            votes: vec![Class::Red, Class::Red, Class::Blue],
            majority: Class::Red,
        }
    }

    fn render_to_string(frame: &RoundFrame<'_>) -> String {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(frame).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_hidden_frame_shows_no_votes() {
        let session = sample_session();
        let frame = session.frame(None);
        assert!(frame.votes_hidden);
        assert_eq!(frame.taken_branch(&session.forest[0]), None);

        let text = render_to_string(&frame);
        assert!(text.contains("Test point: x1 = 0.30, x2 = 0.72"));
        assert!(text.contains("Tree 1  [x1 ≤ 0.50]"));
        assert!(text.contains("Tree 3  [x1 ≤ 0.80]"));
        assert!(!text.contains("vote:"));
        assert!(!text.contains('◀'));
    }

    #[test]
    fn test_revealed_frame_shows_breakdown() {
        let session = sample_session();
        let outcome = session.judge(Class::Blue);
        let frame = session.frame(Some(&outcome));

        assert_eq!(frame.taken_branch(&session.forest[0]), Some(Branch::Left));
        assert_eq!(frame.taken_branch(&session.forest[1]), Some(Branch::Right));

        let text = render_to_string(&frame);
        assert!(text.contains("Tree 1  [x1 ≤ 0.50]  vote: Red"));
        assert!(text.contains("T1 vote: Red | T2 vote: Red | T3 vote: Blue"));
        assert!(text.contains("Forest majority: Red (Red: 2, Blue: 1)"));
        assert!(text.contains("Incorrect. Forest predicts Red."));
    }

    #[test]
    fn test_visible_votes_match_session_votes() {
        let session = sample_session();
        let outcome = session.judge(Class::Red);
        let frame = session.frame(Some(&outcome));
        let shown: Vec<Class> = session
            .forest
            .iter()
            .filter_map(|tree| frame.visible_vote(tree))
            .collect();
        assert_eq!(shown, session.votes);
        assert_eq!(feedback_line(&outcome), "Correct!");
    }
}
