//! Domain entities: argument groups and handler options

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Positional arguments partitioned into inputs and outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentGroup {
    /// Input files, in command-line order
    pub sources: Vec<String>,
    /// Output files, in command-line order (may be empty)
    pub destinations: Vec<String>,
}

impl ArgumentGroup {
    pub fn sources_only(sources: Vec<String>) -> Self {
        Self {
            sources,
            destinations: Vec::new(),
        }
    }
}

/// Resume data format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeFormat {
    #[default]
    #[serde(rename = "FRESH", alias = "fresh")]
    Fresh,
    #[serde(rename = "JRS", alias = "jrs")]
    Jrs,
}

/// How generated HTML pulls in its stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CssMode {
    #[default]
    Embed,
    Link,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl FromStr for ResumeFormat {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FRESH" => Ok(ResumeFormat::Fresh),
            "JRS" => Ok(ResumeFormat::Jrs),
            _ => Err(ParseOptionError {
                kind: "format",
                value: s.to_string(),
                expected: "FRESH, JRS",
            }),
        }
    }
}

impl fmt::Display for ResumeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResumeFormat::Fresh => f.write_str("FRESH"),
            ResumeFormat::Jrs => f.write_str("JRS"),
        }
    }
}

impl FromStr for CssMode {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embed" => Ok(CssMode::Embed),
            "link" => Ok(CssMode::Link),
            _ => Err(ParseOptionError {
                kind: "css mode",
                value: s.to_string(),
                expected: "embed, link",
            }),
        }
    }
}

impl fmt::Display for CssMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssMode::Embed => f.write_str("embed"),
            CssMode::Link => f.write_str("link"),
        }
    }
}

/// Options handed to every verb handler.
///
/// Built once per invocation from configured defaults and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Theme name or path (build)
    pub theme: String,
    /// Resume format (new)
    pub format: ResumeFormat,
    /// Prettify generated HTML (build)
    pub prettify: bool,
    /// Suppress handler log messages
    pub silent: bool,
    /// Stylesheet handling (build)
    pub css: CssMode,
    /// Help was requested instead of work
    pub help: bool,
    /// Version was requested instead of work
    pub version: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            theme: "modern".to_string(),
            format: ResumeFormat::Fresh,
            prettify: true,
            silent: false,
            css: CssMode::Embed,
            help: false,
            version: false,
        }
    }
}

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input untouched on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
