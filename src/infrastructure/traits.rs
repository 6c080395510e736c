//! I/O boundary traits for testability
//!
//! These traits abstract the collaborators around dispatch (option parsing,
//! verb handlers, message output, help text), allowing the dispatcher to be
//! tested with mock implementations.

use std::io;
use std::path::PathBuf;

use crate::application::ApplicationResult;
use crate::domain::{Options, Verb};

/// Flags and positional arguments extracted for one verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArgs {
    pub options: Options,
    /// Non-flag arguments after the verb, in order, separator included
    pub positionals: Vec<String>,
}

/// Option-parsing layer.
pub trait OptionParser: Send + Sync {
    /// Parse the normalized argument list for an already-resolved verb.
    ///
    /// `defaults` supplies every option the command line leaves unset.
    /// A missing required positional must surface as `ResumeNotFound`.
    fn parse(&self, verb: Verb, args: &[String], defaults: &Options)
        -> ApplicationResult<ParsedArgs>;
}

/// Failure reported by a verb handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError {
    pub message: String,
    /// Whether the process should exit non-zero
    pub fatal: bool,
}

impl HandlerError {
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fatal: true,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fatal: false,
        }
    }
}

/// Verb-specific work (generation, conversion, validation, ...).
pub trait VerbHandler: Send + Sync {
    fn handle(
        &self,
        sources: &[String],
        destinations: &[String],
        options: &Options,
        log: &dyn Fn(&str),
    ) -> Result<(), HandlerError>;
}

/// Destination for handler log messages.
pub trait MessageSink: Send + Sync {
    fn emit(&self, msg: &str);
}

/// Source of the manual page shown on `--help`.
pub trait HelpSource: Send + Sync {
    fn manual(&self) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Writes messages to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn emit(&self, msg: &str) {
        println!("{msg}");
    }
}

/// Manual page compiled into the binary.
#[derive(Debug, Default)]
pub struct EmbeddedHelp;

impl HelpSource for EmbeddedHelp {
    fn manual(&self) -> io::Result<String> {
        Ok(include_str!("../cli/use.txt").to_string())
    }
}

/// Manual page read from disk on demand.
#[derive(Debug, Clone)]
pub struct FileHelp {
    path: PathBuf,
}

impl FileHelp {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HelpSource for FileHelp {
    fn manual(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}

/// Describes the work a verb was asked to do through the log callback.
///
/// Stands in for the rendering engine, which lives outside this crate.
#[derive(Debug, Clone, Copy)]
pub struct ReportingHandler {
    verb: Verb,
}

impl ReportingHandler {
    pub fn new(verb: Verb) -> Self {
        Self { verb }
    }
}

impl VerbHandler for ReportingHandler {
    fn handle(
        &self,
        sources: &[String],
        destinations: &[String],
        options: &Options,
        log: &dyn Fn(&str),
    ) -> Result<(), HandlerError> {
        match self.verb {
            Verb::New => {
                for src in sources {
                    log(&format!("Creating new {} resume: {}", options.format, src));
                }
            }
            Verb::Validate => {
                for src in sources {
                    log(&format!("Validating {src}"));
                }
            }
            Verb::Analyze => {
                for src in sources {
                    log(&format!("Analyzing {src}"));
                }
            }
            Verb::Convert => {
                if destinations.is_empty() {
                    return Err(HandlerError::warning(
                        "convert needs a destination: SOURCE TO DESTINATION",
                    ));
                }
                for (src, dst) in sources.iter().zip(destinations) {
                    log(&format!("Converting {src} to {dst}"));
                }
                if sources.len() != destinations.len() {
                    let unpaired = if sources.len() > destinations.len() {
                        &sources[destinations.len()..]
                    } else {
                        &destinations[sources.len()..]
                    };
                    return Err(HandlerError::warning(format!(
                        "convert pairs each source with one destination; skipped: {}",
                        unpaired.join(", ")
                    )));
                }
            }
            Verb::Build => {
                let targets = if destinations.is_empty() {
                    "default targets".to_string()
                } else {
                    destinations.join(", ")
                };
                log(&format!(
                    "Generating {} from {} with theme '{}' (css: {}, prettify: {})",
                    targets,
                    sources.join(" + "),
                    options.theme,
                    options.css,
                    options.prettify
                ));
            }
        }
        Ok(())
    }
}
