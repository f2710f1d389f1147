//! statematrix CLI - inspect and edit persistent Q-value tables
//!
//! This CLI provides a unified interface for:
//! - Creating table files of a given size
//! - Inspecting dimensions and value statistics
//! - Reading and updating single Q-values
//! - Exporting tables as CSV

use anyhow::Result;
use clap::{Parser, Subcommand};
use statematrix::cli::commands;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "statematrix")]
#[command(version, about = "Persistent Q-value table toolkit", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new table file
    Create(commands::create::CreateArgs),

    /// Show dimensions and value statistics of a table file
    Inspect(commands::inspect::InspectArgs),

    /// Print the Q-value of a state-action pair
    Get(commands::query::GetArgs),

    /// Print the best action and maximum Q-value of a state
    Max(commands::query::MaxArgs),

    /// Set a Q-value and save the table
    Set(commands::set::SetArgs),

    /// Export a table as CSV
    Export(commands::export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Create(args) => commands::create::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
        Commands::Get(args) => commands::query::execute_get(args),
        Commands::Max(args) => commands::query::execute_max(args),
        Commands::Set(args) => commands::set::execute(args),
        Commands::Export(args) => commands::export::execute(args),
    }
}
