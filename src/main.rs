//! Glossa - statistical language detection CLI
//!
//! Trains n-gram language profiles from Wikipedia abstract dumps and
//! serves detection over HTTP or one-shot from the command line.

use anyhow::Result;
use clap::Parser;
use glossa::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse args first so --log-level can seed the filter
    let cli = cli::Cli::parse();

    // RUST_LOG overrides --log-level when set
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    cli::run(cli)
}
