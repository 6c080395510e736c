//! Command dispatch service
//!
//! Turns raw process arguments into exactly one handler call, or one error.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    split_source_dest, ArgLayout, ArgumentGroup, CommandError, Invocation, Options, Verb,
    VerbRegistry,
};
use crate::infrastructure::traits::{MessageSink, OptionParser, VerbHandler};

/// One handler per verb.
#[derive(Clone)]
pub struct HandlerSet {
    pub new: Arc<dyn VerbHandler>,
    pub validate: Arc<dyn VerbHandler>,
    pub convert: Arc<dyn VerbHandler>,
    pub analyze: Arc<dyn VerbHandler>,
    pub build: Arc<dyn VerbHandler>,
}

impl HandlerSet {
    /// Route every verb to the same handler.
    pub fn uniform(handler: Arc<dyn VerbHandler>) -> Self {
        Self {
            new: Arc::clone(&handler),
            validate: Arc::clone(&handler),
            convert: Arc::clone(&handler),
            analyze: Arc::clone(&handler),
            build: handler,
        }
    }

    pub fn get(&self, verb: Verb) -> &dyn VerbHandler {
        match verb {
            Verb::New => self.new.as_ref(),
            Verb::Validate => self.validate.as_ref(),
            Verb::Convert => self.convert.as_ref(),
            Verb::Analyze => self.analyze.as_ref(),
            Verb::Build => self.build.as_ref(),
        }
    }
}

/// What a successful dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The handler for `verb` ran with `group`
    Dispatched { verb: Verb, group: ArgumentGroup },
    /// Help was requested; no handler ran
    Help,
    /// Version was requested; no handler ran
    Version,
}

/// Entry point for one invocation.
pub struct CommandDispatcher {
    registry: VerbRegistry,
    parser: Arc<dyn OptionParser>,
    handlers: HandlerSet,
    sink: Arc<dyn MessageSink>,
    defaults: Options,
}

impl CommandDispatcher {
    pub fn new(
        parser: Arc<dyn OptionParser>,
        handlers: HandlerSet,
        sink: Arc<dyn MessageSink>,
        defaults: Options,
    ) -> Self {
        Self {
            registry: VerbRegistry::new(),
            parser,
            handlers,
            sink,
            defaults,
        }
    }

    /// Resolve, parse, split and hand off.
    ///
    /// `raw_args` includes the program path at index 0. The verb is resolved
    /// before options are parsed, so an unknown or missing verb is reported
    /// even when only `--help` follows it.
    #[instrument(skip(self, raw_args))]
    pub fn dispatch<I, S>(&self, raw_args: I) -> ApplicationResult<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let invocation = Invocation::normalize(raw_args);
        debug!("dispatch: args={:?}", invocation.args());

        let verb = match invocation.attempted() {
            Some(token) => self.registry.resolve(token)?,
            None => return Err(CommandError::InvalidCommand { attempted: None }.into()),
        };
        debug!("dispatch: verb resolved: {}", verb);

        let parsed = self
            .parser
            .parse(verb, invocation.args(), &self.defaults)?;
        if parsed.options.help {
            return Ok(Outcome::Help);
        }
        if parsed.options.version {
            return Ok(Outcome::Version);
        }
        if parsed.positionals.is_empty() {
            return Err(CommandError::ResumeNotFound.into());
        }

        let group = match verb.layout() {
            ArgLayout::SourceDest => split_source_dest(&parsed.positionals)?,
            ArgLayout::Flat => ArgumentGroup::sources_only(parsed.positionals),
        };
        if group.sources.is_empty() {
            return Err(CommandError::ResumeNotFound.into());
        }
        debug!(
            "dispatch: sources={:?}, destinations={:?}",
            group.sources, group.destinations
        );

        let options = &parsed.options;
        let sink = Arc::clone(&self.sink);
        let log = move |msg: &str| {
            if !options.silent {
                sink.emit(msg);
            }
        };

        self.handlers
            .get(verb)
            .handle(&group.sources, &group.destinations, options, &log)
            .map_err(|e| ApplicationError::Handler {
                verb,
                message: e.message,
                fatal: e.fatal,
            })?;

        Ok(Outcome::Dispatched { verb, group })
    }
}
