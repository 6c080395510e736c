//! CLI argument definitions using clap

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{CommandError, CssMode, Options, ResumeFormat, Verb};
use crate::infrastructure::traits::{OptionParser, ParsedArgs};

/// Create, validate, convert, analyze and build resumes
#[derive(Parser, Debug)]
#[command(name = "hackmyresume")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(override_usage = "hackmyresume COMMAND <SOURCES...> [TO <TARGETS...>]")]
pub struct Cli {
    /// Run in silent mode
    #[arg(short, long, global = true)]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create resume(s) in FRESH or JSON Resume format
    #[command(visible_alias = "create")]
    New {
        /// Resume files to create
        #[arg(required = true)]
        sources: Vec<String>,
        /// FRESH or JRS format
        #[arg(short, long, value_name = "FMT")]
        format: Option<ResumeFormat>,
    },

    /// Validate a resume in FRESH or JSON Resume format
    Validate {
        /// Resume files to validate
        #[arg(required = true)]
        sources: Vec<String>,
    },

    /// Convert a resume to/from FRESH or JSON Resume format
    Convert {
        /// SOURCES... TO TARGETS...
        args: Vec<String>,
    },

    /// Analyze one or more resumes
    Analyze {
        /// Resume files to analyze
        #[arg(required = true)]
        sources: Vec<String>,
    },

    /// Generate resume to multiple formats
    #[command(visible_alias = "generate")]
    Build {
        /// SOURCES... [TO TARGETS...]
        args: Vec<String>,
        /// Theme name or path
        #[arg(short, long)]
        theme: Option<String>,
        /// Prettify HTML output
        #[arg(short, long, conflicts_with = "nopretty")]
        prettify: bool,
        /// Leave HTML output as generated
        #[arg(short, long)]
        nopretty: bool,
        /// Embed or link the theme stylesheet
        #[arg(long, value_name = "MODE")]
        css: Option<CssMode>,
    },
}

impl Commands {
    pub fn verb(&self) -> Verb {
        match self {
            Commands::New { .. } => Verb::New,
            Commands::Validate { .. } => Verb::Validate,
            Commands::Convert { .. } => Verb::Convert,
            Commands::Analyze { .. } => Verb::Analyze,
            Commands::Build { .. } => Verb::Build,
        }
    }
}

impl Cli {
    /// Merge parsed flags over `defaults`.
    fn into_parsed(self, defaults: &Options) -> ParsedArgs {
        let mut options = defaults.clone();
        options.silent |= self.silent;

        let positionals = match self.command {
            Commands::New { sources, format } => {
                if let Some(format) = format {
                    options.format = format;
                }
                sources
            }
            Commands::Validate { sources } | Commands::Analyze { sources } => sources,
            Commands::Convert { args } => args,
            Commands::Build {
                args,
                theme,
                prettify,
                nopretty,
                css,
            } => {
                if let Some(theme) = theme {
                    options.theme = theme;
                }
                if nopretty {
                    options.prettify = false;
                } else if prettify {
                    options.prettify = true;
                }
                if let Some(css) = css {
                    options.css = css;
                }
                args
            }
        };

        ParsedArgs {
            options,
            positionals,
        }
    }
}

/// Option parser backed by the [`Cli`] definition.
#[derive(Debug, Default)]
pub struct ClapOptionParser;

impl OptionParser for ClapOptionParser {
    #[instrument(skip(self, defaults))]
    fn parse(
        &self,
        verb: Verb,
        args: &[String],
        defaults: &Options,
    ) -> ApplicationResult<ParsedArgs> {
        let cli = match Cli::try_parse_from(args) {
            Ok(cli) => cli,
            Err(e) => return map_clap_error(&e, defaults),
        };

        let parsed_verb = cli.command.verb();
        if parsed_verb != verb {
            debug!("parse: resolved {} but clap matched {}", verb, parsed_verb);
            return Err(CommandError::InvalidCommand {
                attempted: Some(parsed_verb.name().to_string()),
            }
            .into());
        }

        Ok(cli.into_parsed(defaults))
    }
}

fn map_clap_error(err: &clap::Error, defaults: &Options) -> ApplicationResult<ParsedArgs> {
    debug!("map_clap_error: kind={:?}", err.kind());
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Ok(ParsedArgs {
                options: Options {
                    help: true,
                    ..defaults.clone()
                },
                positionals: Vec::new(),
            })
        }
        ErrorKind::DisplayVersion => Ok(ParsedArgs {
            options: Options {
                version: true,
                ..defaults.clone()
            },
            positionals: Vec::new(),
        }),
        // Only positionals are required, so this means no input files.
        ErrorKind::MissingRequiredArgument => Err(CommandError::ResumeNotFound.into()),
        ErrorKind::InvalidValue if is_empty_value(err) => Err(CommandError::MissingArgument {
            argument: context_string(err, ContextKind::InvalidArg)
                .unwrap_or_else(|| "option".to_string()),
        }
        .into()),
        _ => Err(ApplicationError::InvalidOptions(summary(err))),
    }
}

fn is_empty_value(err: &clap::Error) -> bool {
    matches!(context_string(err, ContextKind::InvalidValue), Some(v) if v.is_empty())
}

fn context_string(err: &clap::Error, kind: ContextKind) -> Option<String> {
    match err.get(kind) {
        Some(ContextValue::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// First line of clap's rendered message, without the `error: ` prefix.
fn summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.trim_start_matches("error: ").to_string()
}
