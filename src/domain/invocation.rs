//! Raw argument normalization.
//!
//! Verb matching is case-insensitive, but filenames are not, so only the
//! verb token is rewritten.

/// Leading positions holding the program path.
const LEADING_ARGS: usize = 1;

/// Process arguments with the verb token normalized in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
    attempted: Option<String>,
}

impl Invocation {
    /// Locate the verb (first token after the program path that is not a
    /// flag) and rewrite it trimmed and lower-cased.
    pub fn normalize<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = raw.into_iter().map(Into::into).collect();

        let attempted = args
            .iter_mut()
            .skip(LEADING_ARGS)
            .find(|arg| !is_flag(arg))
            .map(|arg| {
                let original = arg.clone();
                *arg = original.trim().to_lowercase();
                original
            });

        Self { args, attempted }
    }

    /// Full argument list, program path included, verb normalized.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Verb token as typed.
    pub fn attempted(&self) -> Option<&str> {
        self.attempted.as_deref()
    }
}

fn is_flag(arg: &str) -> bool {
    arg.starts_with('-')
}
