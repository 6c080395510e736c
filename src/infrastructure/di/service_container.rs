//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{CommandDispatcher, HandlerSet};
use crate::cli::args::ClapOptionParser;
use crate::config::Settings;
use crate::domain::Verb;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{
    ConsoleSink, EmbeddedHelp, FileHelp, HelpSource, MessageSink, OptionParser,
    ReportingHandler,
};

/// Container holding all application services for one invocation.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Option-parsing layer
    pub parser: Arc<dyn OptionParser>,

    /// Verb handlers
    pub handlers: HandlerSet,

    /// Handler log output
    pub sink: Arc<dyn MessageSink>,

    /// Manual page
    pub help: Arc<dyn HelpSource>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let help: Arc<dyn HelpSource> = match &settings.help_file {
            Some(path) => {
                debug!("help text from {}", path.display());
                Arc::new(FileHelp::new(path))
            }
            None => Arc::new(EmbeddedHelp),
        };

        Self::with_deps(
            settings,
            reporting_handlers(),
            Arc::new(ConsoleSink),
            help,
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        handlers: HandlerSet,
        sink: Arc<dyn MessageSink>,
        help: Arc<dyn HelpSource>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            parser: Arc::new(ClapOptionParser),
            handlers,
            sink,
            help,
        }
    }

    /// Dispatcher seeded with the configured option defaults.
    pub fn dispatcher(&self) -> CommandDispatcher {
        CommandDispatcher::new(
            Arc::clone(&self.parser),
            self.handlers.clone(),
            Arc::clone(&self.sink),
            self.settings.default_options(),
        )
    }

    pub fn manual(&self) -> InfraResult<String> {
        self.help
            .manual()
            .map_err(|e| InfraError::io("read help text", e))
    }
}

fn reporting_handlers() -> HandlerSet {
    HandlerSet {
        new: Arc::new(ReportingHandler::new(Verb::New)),
        validate: Arc::new(ReportingHandler::new(Verb::Validate)),
        convert: Arc::new(ReportingHandler::new(Verb::Convert)),
        analyze: Arc::new(ReportingHandler::new(Verb::Analyze)),
        build: Arc::new(ReportingHandler::new(Verb::Build)),
    }
}
