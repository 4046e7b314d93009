//! Substring denylist applied to player queries before execution.
//!
//! This is not SQL parsing. Any occurrence of a listed term blocks the query,
//! including inside identifiers (`created_at`) or comments, and statements
//! that mutate without these literals pass. Level content depends on the
//! exact matching, so it stays this crude.

use thiserror::Error;

/// Substrings that block execution, matched case-insensitively.
pub const DENYLIST: [&str; 10] = [
    "update", "insert", "alter", "delete", "rename", "create", "into", "add", "drop", "truncate",
];

/// Message shown to the player when a query is blocked.
pub const DISALLOWED_MESSAGE: &str = "Error: It appears you may be trying to use a command that \
is not allowed in this context.  Please reformulate your query to avoid commands that could \
change data or database configuration.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("query contains the disallowed term {term:?}")]
pub struct DisallowedQuery {
    pub term: &'static str,
}

/// Returns `true` when no denylisted substring occurs in `query`.
#[must_use]
pub fn is_query_allowed(query: &str) -> bool {
    check_query(query).is_ok()
}

/// Like [`is_query_allowed`] but names the first term that matched.
///
/// # Errors
///
/// Returns `DisallowedQuery` when the lower-cased query contains a denylisted term.
pub fn check_query(query: &str) -> Result<(), DisallowedQuery> {
    let lowered = query.to_lowercase();
    match DENYLIST.into_iter().find(|term| lowered.contains(*term)) {
        Some(term) => Err(DisallowedQuery { term }),
        None => Ok(()),
    }
}
