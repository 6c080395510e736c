//! Verbs and the registry that resolves typed tokens to them.

use std::collections::HashMap;
use std::fmt;

use super::error::{CommandError, DomainResult};

/// Handler identity for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    New,
    Validate,
    Convert,
    Analyze,
    Build,
}

/// How a verb's positional arguments are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgLayout {
    /// `SRC... [TO DST...]`
    SourceDest,
    /// `SRC...`
    Flat,
}

impl Verb {
    pub const ALL: [Verb; 5] = [
        Verb::New,
        Verb::Validate,
        Verb::Convert,
        Verb::Analyze,
        Verb::Build,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Verb::New => "new",
            Verb::Validate => "validate",
            Verb::Convert => "convert",
            Verb::Analyze => "analyze",
            Verb::Build => "build",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Verb::New => &["create"],
            Verb::Build => &["generate"],
            Verb::Validate | Verb::Convert | Verb::Analyze => &[],
        }
    }

    pub fn layout(self) -> ArgLayout {
        match self {
            Verb::Convert | Verb::Build => ArgLayout::SourceDest,
            Verb::New | Verb::Validate | Verb::Analyze => ArgLayout::Flat,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lookup tables for canonical verb names and aliases.
///
/// Keys are lower-cased at registration, so lookups only need to
/// normalize the incoming token.
#[derive(Debug, Clone)]
pub struct VerbRegistry {
    canonical: HashMap<String, Verb>,
    aliases: HashMap<String, Verb>,
}

impl Default for VerbRegistry {
    fn default() -> Self {
        let mut registry = Self {
            canonical: HashMap::new(),
            aliases: HashMap::new(),
        };
        for verb in Verb::ALL {
            registry.register(verb);
        }
        registry
    }
}

impl VerbRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, verb: Verb) {
        self.canonical.insert(verb.name().to_lowercase(), verb);
        for alias in verb.aliases() {
            self.aliases.insert(alias.to_lowercase(), verb);
        }
    }

    /// Resolve a typed verb token, ignoring case and surrounding whitespace.
    ///
    /// On failure the error carries `token` exactly as given.
    pub fn resolve(&self, token: &str) -> DomainResult<Verb> {
        let key = token.trim().to_lowercase();
        self.canonical
            .get(&key)
            .or_else(|| self.aliases.get(&key))
            .copied()
            .ok_or_else(|| CommandError::InvalidCommand {
                attempted: Some(token.to_string()),
            })
    }
}
