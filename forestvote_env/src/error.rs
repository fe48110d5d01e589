//! Error types for the ForestVote environment abstraction.

use thiserror::Error;

/// Errors that can occur in the environment abstraction layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// A helper was called with an argument it cannot serve (empty choice set)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl EnvError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
