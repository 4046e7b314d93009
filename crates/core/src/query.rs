//! The default "list available tables" query.

/// Query placed in the editor at the start of every level.
pub const DEFAULT_QUERY: &str = "-- To show all available tables, run the following query.
-- Shortcut: Cmd+Enter or Ctrl+Enter to run query
SELECT name AS available_tables
FROM sqlite_master
WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
ORDER BY name;";

/// The default query without its comment lines, for the help panel.
#[must_use]
pub fn default_query_body() -> String {
    DEFAULT_QUERY
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Query that actually runs for the given editor text.
///
/// Empty editor text falls back to [`DEFAULT_QUERY`]. Whitespace-only text is
/// treated as empty too, unlike the exact empty-string check this game
/// started with, so a stray newline never reaches the data source.
#[must_use]
pub fn effective_query(text: &str) -> &str {
    if text.trim().is_empty() {
        DEFAULT_QUERY
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::is_query_allowed;

    #[test]
    fn default_query_passes_the_gate() {
        assert!(is_query_allowed(DEFAULT_QUERY));
    }

    #[test]
    fn blank_text_uses_default_query() {
        assert_eq!(effective_query(""), DEFAULT_QUERY);
        assert_eq!(effective_query("  \n\t"), DEFAULT_QUERY);
        assert_eq!(effective_query("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn body_drops_comment_lines() {
        let body = default_query_body();
        assert!(body.starts_with("SELECT name AS available_tables"));
        assert!(!body.contains("--"));
    }
}
