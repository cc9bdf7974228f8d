//! Talospec CLI - Command-line front-end for cluster spec validation
//!
//! The CLI reads a cluster specification, runs it through the core
//! validation and normalization pipeline, and reports the outcome. All
//! failures print as a single line and exit non-zero.

mod cli;
mod handlers;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Validate(args) => handlers::handle_validate(args),
        Commands::Show(args) => handlers::handle_show(args),
    };

    if let Err(error) = result {
        eprintln!("{} {error}", "✗".red().bold());
        process::exit(1);
    }
}

/// Initialize the logging system; `RUST_LOG` wins over the verbosity flag.
fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
