//! Command-line interface for mdcanon.

use clap::Parser;
use std::path::PathBuf;

/// mdc - canonical-form Markdown formatter.
///
/// Reads Markdown and writes the one canonical rendering of it: Setext
/// headings for levels 1-2, `-` bullets, ordered lists renumbered from 1,
/// width-aligned tables, exactly one blank line between blocks.
#[derive(Parser, Debug)]
#[command(
    name = "mdc",
    author = "Mdcanon Contributors",
    version,
    about = "Canonical-form Markdown formatter",
    after_help = "Examples:\n  \
                  cat README.md | mdc\n  \
                  mdc -l docs/*.md\n  \
                  mdc -w CHANGELOG.md\n  \
                  mdc --terminal notes.md"
)]
pub struct Cli {
    /// Input files to format (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// List files whose formatting differs from canonical form
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Write results back to the source files instead of stdout
    #[arg(short = 'w', long = "write")]
    pub write: bool,

    /// Force ANSI styling in the output
    #[arg(long = "terminal")]
    pub terminal: bool,

    /// Load option overrides from a TOML file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long = "loglevel", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether the run rewrites or inspects files rather than emitting the
    /// formatted stream.
    pub fn rewrites_files(&self) -> bool {
        self.list || self.write
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mdc"]);
        assert!(cli.should_read_stdin());
        assert!(!cli.rewrites_files());
        assert!(!cli.terminal);
    }

    #[test]
    fn test_file_modes() {
        let cli = Cli::parse_from(["mdc", "-l", "a.md", "b.md"]);
        assert!(!cli.should_read_stdin());
        assert!(cli.rewrites_files());
        assert_eq!(cli.files.len(), 2);

        let cli = Cli::parse_from(["mdc", "-w", "a.md"]);
        assert!(cli.rewrites_files());
    }
}
