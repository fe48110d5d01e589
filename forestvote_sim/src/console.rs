//! Line-oriented console front end.
//!
//! Reads one command per line and renders rounds as plain text. The first
//! round starts as soon as the loop runs.

use forestvote_core::{parse_tree_count, Class, Phase, QuizController, QuizError, TextRenderer};
use forestvote_env::EntropySource;
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Commands:
  n            new round
  r | 0 | red  guess Red
  b | 1 | blue guess Blue
  t <count>    trees for the next round (3-15, odd)
  h            this help
  q            quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewRound,
    Guess(Class),
    SetTrees(usize),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl std::str::FromStr for Command {
    type Err = std::convert::Infallible;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest),
            None => (line, ""),
        };

        Ok(match head.to_lowercase().as_str() {
            "" => Command::Empty,
            "n" | "new" => Command::NewRound,
            "t" | "trees" => Command::SetTrees(parse_tree_count(rest)),
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => match other.parse::<Class>() {
                Ok(class) => Command::Guess(class),
                Err(_) => Command::Unknown(line.to_string()),
            },
        })
    }
}

/// Tally of one console run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleSummary {
    pub rounds: u64,
    pub guesses: u64,
    pub correct: u64,
}

/// Console quiz loop over arbitrary input/output streams.
pub struct Console<E: EntropySource, R: BufRead, W: Write> {
    controller: QuizController<E>,
    input: R,
    out: W,
    requested: i64,
    summary: ConsoleSummary,
}

impl<E: EntropySource, R: BufRead, W: Write> Console<E, R, W> {
    pub fn new(controller: QuizController<E>, input: R, out: W) -> Self {
        let requested = controller.config().effective_default_count() as i64;
        Self {
            controller,
            input,
            out,
            requested,
            summary: ConsoleSummary::default(),
        }
    }

    /// Overrides the tree count requested for the next round.
    pub fn with_requested(mut self, requested: i64) -> Self {
        self.requested = requested;
        self
    }

    pub fn controller(&self) -> &QuizController<E> {
        &self.controller
    }

    /// Returns the output stream, e.g. to inspect what was written.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs until `q` or end of input.
    pub fn run(&mut self) -> Result<ConsoleSummary, QuizError> {
        writeln!(self.out, "Random Forest Intuition Quiz. Type 'h' for help.")?;
        self.new_round()?;

        let mut line = String::new();
        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            let command: Command = match line.parse() {
                Ok(command) => command,
                Err(never) => match never {},
            };
            debug!("console command: {:?}", command);

            match command {
                Command::NewRound => self.new_round()?,
                Command::Guess(class) => self.guess(class)?,
                Command::SetTrees(count) => {
                    self.requested = count as i64;
                    writeln!(self.out, "Trees next round: {}", count)?;
                }
                Command::Help => writeln!(self.out, "{}", HELP)?,
                Command::Quit => break,
                Command::Empty => {}
                Command::Unknown(text) => {
                    writeln!(self.out, "Unknown command '{}'. Type 'h' for help.", text)?;
                }
            }
        }

        writeln!(
            self.out,
            "Played {} round(s), {} of {} guesses correct.",
            self.summary.rounds, self.summary.correct, self.summary.guesses
        )?;
        Ok(self.summary)
    }

    fn new_round(&mut self) -> Result<(), QuizError> {
        let count = self.controller.start_new_round(self.requested)?.tree_count();
        // Echo the effective count back, as the input field would
        self.requested = count as i64;
        self.summary.rounds += 1;
        self.controller.render(&mut TextRenderer::new(&mut self.out))
    }

    fn guess(&mut self, class: Class) -> Result<(), QuizError> {
        if self.controller.phase() == Phase::Revealed {
            writeln!(self.out, "Already revealed. Type 'n' for a new round.")?;
            return Ok(());
        }

        let outcome = self.controller.submit_guess(class)?;
        self.summary.guesses += 1;
        if outcome.is_correct {
            self.summary.correct += 1;
        }
        self.controller.render(&mut TextRenderer::new(&mut self.out))
    }
}
