use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod config;
mod discover;
mod verify;

#[cfg(test)]
mod tests;

use crate::config::Settings;

/// Locate tools in cabinet photos and check which ones are missing
#[derive(Parser, Debug)]
#[command(name = "toolscan")]
#[command(about = "Tool silhouette discovery and presence verification", long_about = None)]
struct Cli {
    /// Settings file (TOML or JSON) with [discovery] and [verification] sections
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Also write daily rolling log files to this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find tool silhouettes by diffing an empty and a full cabinet photo
    Discover(discover::DiscoverArgs),
    /// Check which known tools are present in a new photo
    Verify(verify::VerifyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    common::log_setup::setup_logging(&cli.log_level, cli.log_dir.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Discover(args) => {
            discover::run(args, &settings.discovery)?;
        }
        Command::Verify(args) => {
            let outcome = verify::run(args, &settings.verification)?;
            tracing::info!(
                "{} of {} tools present ({:.0}%)",
                outcome.total() - outcome.missing_count(),
                outcome.total(),
                outcome.completion_rate()
            );
        }
    }

    Ok(())
}
