//! Command handlers
//!
//! All validation logic lives in `talospec-core`; the handlers only drive
//! the loader and shape terminal output.

use crate::cli::{ShowArgs, ValidateArgs};
use anyhow::{Context, Result};
use colored::Colorize;
use talospec_core::ClusterLoader;
use tracing::info;

/// Handle the validate command.
pub fn handle_validate(args: &ValidateArgs) -> Result<()> {
    let loader = ClusterLoader::new();
    let cluster = loader.load(&args.spec)?;

    info!(
        cluster = %cluster.name,
        machines = cluster.machines.len(),
        "specification accepted"
    );
    println!(
        "{} cluster '{}' is valid ({} machine{})",
        "✓".green().bold(),
        cluster.name,
        cluster.machines.len(),
        if cluster.machines.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

/// Handle the show command.
pub fn handle_show(args: &ShowArgs) -> Result<()> {
    let loader = ClusterLoader::new();
    let cluster = loader.load(&args.spec)?;

    let rendered = if args.json {
        serde_json::to_string_pretty(&cluster).context("rendering cluster as JSON")?
    } else {
        serde_yaml::to_string(&cluster).context("rendering cluster as YAML")?
    };
    print!("{rendered}");
    if args.json {
        println!();
    }
    Ok(())
}
