//! # Wolfpack CLI
//!
//! Binary entry point for the `wolfpack` command-line tool. It parses the
//! command-line arguments with `clap`, sets up logging and hands off to the
//! command implementations.
//!
//! The actual work lives in the `wolfpack` library crate; the binary is a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
