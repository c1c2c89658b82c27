//! mdc - canonical-form Markdown formatter.
//!
//! This binary provides the CLI interface to the mdcanon library,
//! formatting files in place, listing unformatted files, or streaming the
//! canonical form to stdout.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, LevelFilter};
use std::fs;
use std::io::{self, Read, Write};

use mdcanon_core::{Error, Options, Result};
use mdcanon_render::process_bytes;

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Set up logging
    setup_logging(&cli.log_level);
    info!("mdcanon v{}", env!("CARGO_PKG_VERSION"));

    // Run the main application
    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let opts = resolve_options(cli)?;
    debug!("Options: {:?}", opts);

    if cli.should_read_stdin() {
        run_stdin(&opts)
    } else {
        run_files(cli, &opts)
    }
}

/// Resolve render options from the config file, flags, and the terminal.
fn resolve_options(cli: &Cli) -> Result<Options> {
    let mut opts = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let opts = toml::from_str::<Options>(&raw)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
            debug!("Loaded config from {}", path.display());
            opts
        }
        None => Options::default(),
    };

    // Styling is forced by the flag, and otherwise enabled when the output
    // is a terminal and the run is not rewriting files.
    if cli.terminal {
        opts.terminal = true;
    } else if !cli.rewrites_files() && atty::is(atty::Stream::Stdout) {
        opts.terminal = true;
    }
    Ok(opts)
}

/// Format stdin to stdout.
fn run_stdin(opts: &Options) -> Result<()> {
    info!("Reading from stdin");

    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;

    let output = process_bytes(&input, opts)?;
    io::stdout().write_all(&output)?;
    io::stdout().flush()?;
    Ok(())
}

/// Format the given files.
fn run_files(cli: &Cli, opts: &Options) -> Result<()> {
    let stdout = io::stdout();
    for path in &cli.files {
        info!("Processing file: {}", path.display());

        let input = fs::read(path)?;
        let output = process_bytes(&input, opts)?;

        if cli.list {
            if output != input {
                writeln!(stdout.lock(), "{}", path.display())?;
            }
        } else if cli.write {
            if output != input {
                debug!("Rewriting {}", path.display());
                fs::write(path, &output)?;
            }
        } else {
            stdout.lock().write_all(&output)?;
        }
    }
    stdout.lock().flush()?;
    Ok(())
}
