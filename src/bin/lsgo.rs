//! lsgo CLI - list the source files of Go packages.
//!
//! Prints one unique path per line on stdout. Diagnostics go to stderr; any
//! error exits non-zero.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging; stdout carries the file list
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli::run(cli)
}
