//! Text normalization and escaping.
//!
//! Pure helpers: all context arrives through parameters, so the rules are
//! testable in isolation from renderer state.

/// Collapse whitespace without trimming the ends.
///
/// Newlines, carriage returns, and tabs become spaces; runs of spaces
/// collapse to one. Single streaming pass.
pub fn clean_without_trim(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for mut ch in s.chars() {
        if ch == '\n' || ch == '\r' || ch == '\t' {
            ch = ' ';
        }
        if ch != ' ' || !prev_space {
            out.push(ch);
            prev_space = ch == ' ';
        }
    }
    out
}

/// Whether a literal text run must be backslash-escaped to survive a
/// re-parse of the canonical output.
///
/// Only single-character runs are ever escaped; the parser hands escaped
/// source characters through as their own runs. A lone `.` is escaped only
/// after a purely numeric run, where it would otherwise read as an
/// ordered-list marker. `!` is never escaped: it is only special before
/// `[`, which the image handler produces structurally.
pub fn needs_escaping(text: &str, last_text: &str) -> bool {
    match text {
        "\\" | "`" | "*" | "_" | "{" | "}" | "[" | "]" | "(" | ")" | "#" | "+" | "-" | "<"
        | ">" => true,
        "!" => false,
        "." => is_number(last_text),
        _ => false,
    }
}

/// True when every byte is an ASCII digit. The empty run counts as numeric.
pub fn is_number(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Escape backslashes in a link or image destination.
pub fn escape_destination(text: &str) -> String {
    text.replace('\\', "\\\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace_runs() {
        assert_eq!(clean_without_trim("a  b"), "a b");
        assert_eq!(clean_without_trim("a\nb"), "a b");
        assert_eq!(clean_without_trim("a \t\r\n b"), "a b");
        assert_eq!(clean_without_trim("  lead and trail  "), " lead and trail ");
    }

    #[test]
    fn test_clean_leaves_plain_text_alone() {
        assert_eq!(clean_without_trim("plain text"), "plain text");
        assert_eq!(clean_without_trim(""), "");
    }

    #[test]
    fn test_reserved_single_characters_escape() {
        for run in ["\\", "`", "*", "_", "{", "}", "[", "]", "(", ")", "#", "+", "-", "<", ">"] {
            assert!(needs_escaping(run, "text"), "expected {run:?} to escape");
        }
    }

    #[test]
    fn test_bang_never_escapes() {
        assert!(!needs_escaping("!", "text"));
        assert!(!needs_escaping("!", "5"));
    }

    #[test]
    fn test_period_escapes_only_after_numeric_run() {
        assert!(needs_escaping(".", "5"));
        assert!(needs_escaping(".", "1988"));
        assert!(needs_escaping(".", ""));
        assert!(!needs_escaping(".", "five"));
        assert!(!needs_escaping(".", "5a"));
    }

    #[test]
    fn test_multi_character_runs_never_escape() {
        assert!(!needs_escaping("5.", "5"));
        assert!(!needs_escaping("**", ""));
        assert!(!needs_escaping("a-b", ""));
    }

    #[test]
    fn test_escape_destination_doubles_backslashes() {
        assert_eq!(escape_destination("a\\b"), "a\\\\b");
        assert_eq!(escape_destination("plain"), "plain");
    }
}
