//! Command-line argument definitions

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "talospec",
    version,
    about = "Validate and normalize Talos cluster specifications"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a cluster specification and report the first violation
    Validate(ValidateArgs),
    /// Print the normalized cluster specification
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the cluster specification (YAML)
    pub spec: PathBuf,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Path to the cluster specification (YAML)
    pub spec: PathBuf,

    /// Emit JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}
