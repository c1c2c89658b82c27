//! Visual width measurement.
//!
//! Widths are counted in terminal display columns via `unicode-width`, so
//! CJK and other wide characters measure as two columns. The terminal
//! variant strips SGR escape sequences first; they occupy no columns.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

/// Regex pattern for SGR escape sequences.
pub const ESCAPE: &str = r"\x1b\[[0-9;]*m";

static ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(ESCAPE).unwrap());

/// Remove all SGR escape sequences from text.
pub fn strip_codes(text: &str) -> Cow<'_, str> {
    ESCAPE_RE.replace_all(text, "")
}

/// Display width of text as-is, without stripping escape sequences.
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Display width of text with SGR escape sequences counted as zero columns.
pub fn visible_width(text: &str) -> usize {
    strip_codes(text).width()
}
