//! ANSI escape code constants.

/// Bold on.
pub const BOLD_ON: &str = "\x1b[1m";

/// Reset all attributes (colors and formatting).
pub const RESET: &str = "\x1b[0m";
