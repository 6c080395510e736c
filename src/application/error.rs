//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{CommandError, Verb};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Command(#[from] CommandError),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("{verb} failed: {message}")]
    Handler {
        verb: Verb,
        message: String,
        fatal: bool,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub fn is_fatal(&self) -> bool {
        match self {
            ApplicationError::Command(e) => e.is_fatal(),
            ApplicationError::Handler { fatal, .. } => *fatal,
            ApplicationError::InvalidOptions(_) | ApplicationError::Config { .. } => true,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
