use thiserror::Error;

use crate::editing::Position;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("position {0} is outside the document")]
    InvalidPosition(Position),

    #[error("expected {expected} replacements (one per selection), got {actual}")]
    ReplacementCountMismatch { expected: usize, actual: usize },

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
