//! Code block language handling and reformatting.

/// Optional reformatting of fenced code blocks.
///
/// `format` returns `None` whenever the language is unrecognized or the
/// code fails to parse; the renderer then falls back to the literal text.
pub trait CodeFormatter {
    fn format(&self, language: &str, code: &str) -> Option<String>;
}

/// Built-in formatter: pretty-prints `json` blocks.
#[derive(Debug, Default)]
pub struct DefaultCodeFormatter;

impl CodeFormatter for DefaultCodeFormatter {
    fn format(&self, language: &str, code: &str) -> Option<String> {
        match language.to_ascii_lowercase().as_str() {
            "json" => {
                let value: serde_json::Value = serde_json::from_str(code).ok()?;
                let mut pretty = serde_json::to_string_pretty(&value).ok()?;
                pretty.push('\n');
                Some(pretty)
            }
            _ => None,
        }
    }
}

/// Extract the language token from a fence info string: the first
/// whitespace-delimited field, minus a leading `.`.
pub fn language_token(info: &str) -> Option<&str> {
    for field in info.split_whitespace() {
        let field = field.strip_prefix('.').unwrap_or(field);
        if !field.is_empty() {
            return Some(field);
        }
    }
    None
}
