//! JSON exporter for played rounds.

use forestvote_core::{Class, GuessOutcome, Point, Session, Tree};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// A played round: the forest, the point, the votes and the guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundExport {
    /// Seed used (0 when unseeded)
    pub seed: u64,

    /// Short round id
    pub round_id: String,

    pub round: u64,
    pub point: Point,
    pub trees: Vec<Tree>,
    pub votes: Vec<Class>,
    pub majority: Class,

    pub guess: Class,
    pub is_correct: bool,

    /// Display label per vote ("Red" / "Blue")
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub vote_labels: Vec<String>,
}

impl RoundExport {
    /// Creates an export from a session and its guess outcome.
    pub fn new(seed: u64, session: &Session, outcome: &GuessOutcome) -> Self {
        Self {
            seed,
            round_id: session.round_id.to_string(),
            round: session.round,
            point: session.point,
            trees: session.forest.clone(),
            votes: outcome.votes.clone(),
            majority: outcome.majority,
            guess: outcome.guess,
            is_correct: outcome.is_correct,
            vote_labels: outcome.votes.iter().map(|v| v.label().to_string()).collect(),
        }
    }

    /// Pretty JSON text.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
