//! `sshgo` - personal SSH and RDP connection manager
//!
//! Keeps connection profiles in a pipe-delimited text file, launches the
//! matching client, and installs completion and aliases into shell rc
//! files.

mod cli;
mod commands;
mod error;
mod format;
mod util;

use clap::Parser;
use cli::Cli;
use sshgo_core::tracing::{LOG_ENV, TracingConfig, TracingLevel, init_tracing};

fn main() {
    let cli = Cli::parse();

    let tracing_config = TracingConfig::new()
        .with_level(TracingLevel::from_verbosity(cli.verbose, cli.quiet))
        .with_filter(std::env::var(LOG_ENV).ok());
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: {e}");
    }

    let result = commands::dispatch(cli.config.as_deref(), cli.command);

    if let Err(e) = result {
        if e.should_report() {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
