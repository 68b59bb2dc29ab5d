//! benchspec CLI
//!
//! Resolves benchmark component specs from config documents and command-line
//! overrides, printing the result as JSON.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        logging::init()?;
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Resolve {
            config,
            component,
            run_uri,
            flags,
            pretty,
        } => commands::run_resolve(&commands::ResolveArgs {
            config,
            component,
            run_uri,
            flags,
            pretty,
        }),
        Commands::Options => commands::run_options(),
    }
}
