//! mipmaptool CLI - command-line interface for PAA texture tools

pub mod commands;
pub mod naming;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "mipmaptool")]
#[command(about = "PAA texture tools: unpack, info, and best-mipmap merging", long_about = None)]
struct Cli {
    /// Print per-mipmap detail while reading and writing
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the mipmaptool CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging; -v/-q pick the level once, nothing else toggles it.
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    cli.command.execute()?;

    Ok(())
}
