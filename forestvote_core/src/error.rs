//! Error taxonomy for quiz operations.

use forestvote_env::EnvError;
use thiserror::Error;

/// Errors surfaced by the quiz core.
///
/// None of these are retried. Round generation fails before any session is
/// published, so the previous round stays intact.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuizError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}

impl From<EnvError> for QuizError {
    fn from(err: EnvError) -> Self {
        match err {
            EnvError::InvalidArgument(msg) => Self::InvalidArgument(msg),
        }
    }
}
