//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (OptionParser, VerbHandler, MessageSink)
//! but are themselves concrete structs, not traits.

mod dispatcher;

pub use dispatcher::{CommandDispatcher, HandlerSet, Outcome};
