//! ForestVote TUI Dashboard Module
//! ================================
//!
//! Interactive terminal front end for the quiz, drawn with Ratatui over a
//! Crossterm backend. It is one more [`RenderSink`](crate::RenderSink)-style
//! consumer of the round frame; all quiz rules stay in the controller.
//!
//! Enable with the `dashboard` feature flag.
//!
//! Keys:
//! - `n` new round
//! - `r` / `0` guess Red, `b` / `1` guess Blue
//! - `+` / `-` change the requested tree count
//! - `q` / `Esc` quit

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use forestvote_env::EntropySource;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame, Terminal,
};

use crate::config::{normalize_tree_count, MAX_TREES, MIN_TREES};
use crate::error::QuizError;
use crate::render::{feedback_line, majority_line, point_line, split_label, RoundFrame};
use crate::session::{Phase, QuizController};
use crate::tree::Class;

fn class_color(class: Class) -> Color {
    match class {
        Class::Red => Color::Red,
        Class::Blue => Color::Blue,
    }
}

// =============================================================================
// QUIZ DASHBOARD
// =============================================================================

/// TUI dashboard driving a [`QuizController`].
pub struct QuizDashboard<E: EntropySource> {
    controller: QuizController<E>,
    requested: i64,
    status: String,
}

impl<E: EntropySource> QuizDashboard<E> {
    pub fn new(controller: QuizController<E>) -> Self {
        let requested = controller.config().effective_default_count() as i64;
        Self {
            controller,
            requested,
            status: String::new(),
        }
    }

    /// Overrides the tree count requested for the next round.
    pub fn with_requested(mut self, requested: i64) -> Self {
        self.requested = normalize_tree_count(requested) as i64;
        self
    }

    pub fn controller(&self) -> &QuizController<E> {
        &self.controller
    }

    /// Requested tree count as currently shown (always normalized).
    pub fn requested(&self) -> i64 {
        self.requested
    }

    /// Applies one key press. Returns `false` when the dashboard should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool, QuizError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
            KeyCode::Char('n') => self.new_round()?,
            KeyCode::Char('r') | KeyCode::Char('0') => self.guess(Class::Red)?,
            KeyCode::Char('b') | KeyCode::Char('1') => self.guess(Class::Blue)?,
            // Step by two so the count stays odd
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.requested = normalize_tree_count(self.requested + 2) as i64;
                self.status = format!("Trees next round: {}", self.requested);
            }
            KeyCode::Char('-') => {
                self.requested = normalize_tree_count(self.requested - 2) as i64;
                self.status = format!("Trees next round: {}", self.requested);
            }
            _ => {}
        }
        Ok(true)
    }

    fn new_round(&mut self) -> Result<(), QuizError> {
        let count = self.controller.start_new_round(self.requested)?.tree_count();
        self.requested = count as i64;
        self.status.clear();
        Ok(())
    }

    fn guess(&mut self, class: Class) -> Result<(), QuizError> {
        if self.controller.phase() == Phase::Revealed {
            self.status = "Already revealed. Press 'n' for a new round.".to_string();
            return Ok(());
        }
        let outcome = self.controller.submit_guess(class)?;
        self.status = feedback_line(&outcome);
        Ok(())
    }

    /// Run the TUI main loop (blocks until 'q' pressed)
    pub fn run(&mut self) -> Result<(), QuizError> {
        if self.controller.session().is_none() {
            self.new_round()?;
        }

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Restore terminal even when the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<(), QuizError> {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && !self.handle_key(key.code)? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Render the UI
    fn ui(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Test point
                Constraint::Min(5),    // Forest table
                Constraint::Length(5), // Reveal
                Constraint::Length(1), // Footer
            ])
            .split(f.area());

        // === HEADER ===
        let (round, round_id) = self
            .controller
            .session()
            .map(|s| (s.round, s.round_id.to_string()))
            .unwrap_or((0, "-".to_string()));
        let header = Paragraph::new(Line::from(vec![
            Span::styled("🌲 Random Forest Intuition Quiz", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  |  "),
            Span::styled(format!("Round {} ({})", round, round_id), Style::default().fg(Color::Cyan)),
            Span::raw("  |  "),
            Span::raw(format!("Trees: {} [{}-{}]", self.requested, MIN_TREES, MAX_TREES)),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(header, chunks[0]);

        let Some(frame) = self.controller.frame() else {
            return;
        };

        // === TEST POINT ===
        let point = Paragraph::new(point_line(frame.point))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(point, chunks[1]);

        // === FOREST TABLE ===
        f.render_widget(forest_table(&frame), chunks[2]);

        // === REVEAL ===
        let mut reveal_lines: Vec<Line> = match frame.reveal {
            Some(outcome) => vec![
                Line::from(Span::styled(
                    majority_line(outcome),
                    Style::default().fg(class_color(outcome.majority)).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    feedback_line(outcome),
                    Style::default().fg(if outcome.is_correct { Color::Green } else { Color::Yellow }),
                )),
            ],
            None => vec![Line::from("Predict the forest's majority vote: [r] Red  [b] Blue")],
        };
        if !self.status.is_empty() && frame.reveal.is_none() {
            reveal_lines.push(Line::from(Span::styled(self.status.as_str(), Style::default().fg(Color::DarkGray))));
        }
        let reveal = Paragraph::new(reveal_lines)
            .block(Block::default().title("Forest Vote").borders(Borders::ALL));
        f.render_widget(reveal, chunks[3]);

        // === FOOTER ===
        let footer = Paragraph::new("[n] new round  [r/b] guess  [+/-] trees  [q] quit")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(footer, chunks[4]);
    }
}

fn forest_table<'a>(frame: &RoundFrame<'a>) -> Table<'a> {
    let header_cells = ["Tree", "Split", "Yes", "No", "Vote"]
        .iter()
        .map(|h| Span::styled(*h, Style::default().add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = frame
        .trees
        .iter()
        .map(|tree| {
            let vote = match frame.visible_vote(tree) {
                Some(class) => Span::styled(class.label(), Style::default().fg(class_color(class)).add_modifier(Modifier::BOLD)),
                None => Span::raw("?"),
            };
            Row::new(vec![
                Span::raw(format!("T{}", tree.id + 1)),
                Span::raw(split_label(tree)),
                Span::styled(tree.left.label(), Style::default().fg(class_color(tree.left))),
                Span::styled(tree.right.label(), Style::default().fg(class_color(tree.right))),
                vote,
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(Block::default().title("Forest").borders(Borders::ALL))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizConfig;
    use forestvote_env::ScriptedEntropy;

    fn dashboard() -> QuizDashboard<ScriptedEntropy> {
        let entropy = ScriptedEntropy::new(vec![0.13, 0.58, 0.91, 0.27, 0.44, 0.76]);
        QuizDashboard::new(QuizController::with_defaults(entropy))
    }

    #[test]
    fn test_tree_count_keys_stay_odd() {
        let mut dash = dashboard();
        assert_eq!(dash.requested(), 5);
        dash.handle_key(KeyCode::Char('+')).unwrap();
        assert_eq!(dash.requested(), 7);
        for _ in 0..10 {
            dash.handle_key(KeyCode::Char('-')).unwrap();
        }
        assert_eq!(dash.requested(), 3);
    }

    #[test]
    fn test_first_round_uses_config_count() {
        let config = QuizConfig {
            default_tree_count: 9,
            ..QuizConfig::default()
        };
        let mut dash = QuizDashboard::new(QuizController::new(ScriptedEntropy::new(vec![0.4]), config));
        assert_eq!(dash.requested(), 9);
        dash.handle_key(KeyCode::Char('n')).unwrap();
        assert_eq!(dash.controller().session().unwrap().tree_count(), 9);
    }

    #[test]
    fn test_guess_before_round_surfaces_error() {
        let mut dash = dashboard();
        let err = dash.handle_key(KeyCode::Char('r')).unwrap_err();
        assert!(matches!(err, QuizError::InvalidState(_)));
    }

    #[test]
    fn test_round_then_guess() {
        let mut dash = dashboard();
        assert!(dash.handle_key(KeyCode::Char('n')).unwrap());
        assert_eq!(dash.controller().phase(), Phase::Hidden);
        dash.handle_key(KeyCode::Char('b')).unwrap();
        assert_eq!(dash.controller().phase(), Phase::Revealed);
        assert!(!dash.handle_key(KeyCode::Char('q')).unwrap());
    }
}
