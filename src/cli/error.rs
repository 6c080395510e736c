//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::CommandError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::from(e))
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Command(CommandError::ResumeNotFound) => {
                        crate::exitcode::NOINPUT
                    }
                    ApplicationError::Command(_) | ApplicationError::InvalidOptions(_) => {
                        crate::exitcode::USAGE
                    }
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::Handler { .. } => crate::exitcode::SOFTWARE,
                },
            },
        }
    }

    /// Whether the process should exit non-zero.
    pub fn is_fatal(&self) -> bool {
        match self {
            CliError::Infra(InfraError::Application(app)) => app.is_fatal(),
            CliError::Infra(InfraError::Io { .. }) => true,
        }
    }
}
