//! ANSI escape sequence handling for supervisor log lines.
//!
//! The supervisor forwards the raw stdout of its components, and most of
//! them color their output with SGR escape sequences that appear as garbage
//! in a log pane. Every fetched snapshot is passed through
//! [`strip_escape_seqs`] line-by-line before it reaches the consumer.

use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for the SGR sequences components emit.
///
/// Covers:
/// - Color codes with a 2-3 digit parameter: `ESC [ <digits> m` (e.g. `\x1b[32m`)
/// - The reset sequence `ESC [0;39m` (and repeated `0;` prefixes)
static SGR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[(0;)*\d{2,3}m").expect("SGR regex pattern is valid"));

/// Strip SGR color escape sequences from a log line.
///
/// Pure and idempotent: stripping an already-clean line returns it
/// unchanged, so `strip_escape_seqs(strip_escape_seqs(s)) ==
/// strip_escape_seqs(s)`.
///
/// # Examples
///
/// ```
/// use launchmon_core::strip_escape_seqs;
///
/// assert_eq!(strip_escape_seqs("\x1b[32mOK\x1b[0;39m"), "OK");
/// assert_eq!(strip_escape_seqs("plain"), "plain");
/// ```
pub fn strip_escape_seqs(line: &str) -> String {
    let mut stripped = SGR_PATTERN.replace_all(line, "").into_owned();
    // Removing a sequence can splice its neighbors into a new well-formed
    // one (e.g. an ESC[ immediately before a complete sequence). Strip
    // until a pass removes nothing; each pass shortens the line, so this
    // terminates.
    while SGR_PATTERN.is_match(&stripped) {
        stripped = SGR_PATTERN.replace_all(&stripped, "").into_owned();
    }
    stripped
}

/// Check whether a line contains SGR color escape sequences.
pub fn contains_escape_seqs(line: &str) -> bool {
    SGR_PATTERN.is_match(line)
}
