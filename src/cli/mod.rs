//! CLI layer: argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::{Cli, ClapOptionParser, Commands};
pub use commands::{execute, run};
pub use error::{CliError, CliResult};
