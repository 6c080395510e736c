//! Domain-level errors (no external dependencies)

use thiserror::Error;

use super::verb::Verb;

/// Command errors describe malformed invocations.
/// They are detected before any handler runs and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{}", invalid_command_message(.attempted.as_deref()))]
    InvalidCommand { attempted: Option<String> },

    #[error("please feed me a resume in FRESH or JSON Resume format")]
    ResumeNotFound,

    #[error("missing value for {argument}")]
    MissingArgument { argument: String },

    #[error("please specify an output file for this operation or omit the TO keyword")]
    MalformedSplit,
}

impl CommandError {
    /// Whether the process should stop with a non-zero exit code.
    pub fn is_fatal(&self) -> bool {
        match self {
            CommandError::InvalidCommand { .. }
            | CommandError::ResumeNotFound
            | CommandError::MissingArgument { .. }
            | CommandError::MalformedSplit => true,
        }
    }

    /// The offending verb token, if one was typed.
    pub fn attempted(&self) -> Option<&str> {
        match self {
            CommandError::InvalidCommand { attempted } => attempted.as_deref(),
            _ => None,
        }
    }
}

fn invalid_command_message(attempted: Option<&str>) -> String {
    match attempted {
        Some(verb) => format!("invalid command: '{verb}'"),
        None => {
            let names: Vec<&str> = Verb::ALL.iter().map(|v| v.name()).collect();
            format!("please specify a command ({})", names.join(", "))
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, CommandError>;
