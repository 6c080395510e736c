//! Source/destination splitting around the `TO` keyword.

use tracing::debug;

use super::entities::ArgumentGroup;
use super::error::{CommandError, DomainResult};

/// Separator keyword, matched case-insensitively.
pub const SEPARATOR: &str = "to";

/// Split positional arguments at the first `TO`.
///
/// Only the first separator counts; later `to` tokens are filenames.
/// A trailing separator promises a destination that is not there and is
/// rejected with [`CommandError::MalformedSplit`].
pub fn split_source_dest(params: &[String]) -> DomainResult<ArgumentGroup> {
    if params.is_empty() {
        return Err(CommandError::ResumeNotFound);
    }

    let split_at = params.iter().position(|p| is_separator(p));
    debug!("split_source_dest: params={:?}, split_at={:?}", params, split_at);

    match split_at {
        None => Ok(ArgumentGroup::sources_only(params.to_vec())),
        Some(idx) if idx == params.len() - 1 => Err(CommandError::MalformedSplit),
        Some(idx) => Ok(ArgumentGroup {
            sources: params[..idx].to_vec(),
            destinations: params[idx + 1..].to_vec(),
        }),
    }
}

fn is_separator(token: &str) -> bool {
    token.eq_ignore_ascii_case(SEPARATOR)
}
