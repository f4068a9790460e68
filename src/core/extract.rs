//! Best-effort extraction of SQL and rationale from optimizer output
//!
//! The optimizer answers in loosely formatted prose. Each extractor tries its
//! patterns in order and degrades to returning the whole text untouched.

use regex::Regex;
use std::sync::LazyLock;

static FENCED_SQL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```sql\s*(.*?)\s*```").expect("valid regex"));

// Lazy body plus alternation stops at the earliest terminator.
static LABELED_SQL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Optimized SQL Query:\s*(.*?)(?:\n\n|Rationale:|\z)").expect("valid regex")
});

static RATIONALE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Rationale:\s*(.*)\z").expect("valid regex"));

/// Pull the optimized SQL out of an optimizer response.
///
/// Tries a fenced ```` ```sql ```` block first, then an `Optimized SQL Query:`
/// section ending at a blank line or a `Rationale:` label. Falls back to the
/// full text.
pub fn extract_sql(text: &str) -> &str {
    if let Some(sql) = capture(&FENCED_SQL_REGEX, text) {
        return sql.trim();
    }

    if let Some(sql) = capture(&LABELED_SQL_REGEX, text) {
        return sql.trim();
    }

    text
}

/// Pull the rationale out of an optimizer response.
///
/// Everything after the first `Rationale:` label, or the full text.
pub fn extract_rationale(text: &str) -> &str {
    capture(&RATIONALE_REGEX, text)
        .map(str::trim)
        .unwrap_or(text)
}

fn capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
