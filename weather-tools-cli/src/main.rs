//! Binary crate for the `weather-tools` command-line client.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive city/mode prompt flow
//! - Printing tool replies for humans
//!
//! All weather logic lives in `weather-tools-core`; this binary only calls
//! the two tools and renders their output.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
