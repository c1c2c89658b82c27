//! Render configuration.

use serde::{Deserialize, Serialize};

/// Options for canonical rendering.
///
/// Deserializable so the CLI can load overrides from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Emit ANSI escape codes for styling, and measure visual widths with
    /// escape sequences counted as zero columns.
    pub terminal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain() {
        assert!(!Options::default().terminal);
    }
}
