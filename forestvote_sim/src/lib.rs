//! ForestVote Deterministic Simulation Harness
//!
//! This crate provides the seeded side of the quiz: every round is derived
//! from a single 64-bit seed, so any surprising round can be replayed by
//! its seed number.
//!
//! # Components
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    ScenarioRunner                    │
//! │   SimEntropy(seed) ──► QuizController ──► Session    │
//! │                                             │        │
//! │                       Oracle ◄──────────────┘        │
//! │              (independent vote recount)              │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Plus the interactive [`Console`] loop and the JSON [`RoundExport`].
//!
//! # Usage
//!
//! ```
//! use forestvote_sim::{ScenarioRunner, scenarios::ScenarioId};
//!
//! let runner = ScenarioRunner::new(42).with_rounds(5);
//! assert!(runner.run(ScenarioId::MajorityRule).passed);
//! ```

mod context;
mod oracle;
mod runner;
mod exporter;
mod console;
pub mod scenarios;

pub use context::SimEntropy;
pub use oracle::Oracle;
pub use runner::{ScenarioRunner, ScenarioResult};
pub use exporter::RoundExport;
pub use console::{Command, Console, ConsoleSummary};
