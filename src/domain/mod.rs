//! Domain layer: verbs, invocations and argument partitioning
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod invocation;
pub mod split;
pub mod verb;

pub use entities::*;
pub use error::{CommandError, DomainResult};
pub use invocation::Invocation;
pub use split::{split_source_dest, SEPARATOR};
pub use verb::{ArgLayout, Verb, VerbRegistry};
