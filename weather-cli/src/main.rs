//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Storing an API key for local runs
//! - Invoking the request handler from a terminal
//! - Printing the response the function would return

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
