//! Export command - dump a table file as CSV

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{app::TableStore, export::TableCsvExporter};

#[derive(Parser, Debug)]
#[command(about = "Export a table file as state,action,value CSV")]
pub struct ExportArgs {
    /// Path of the table file to read
    pub file: PathBuf,

    /// Output CSV path
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let mut store = TableStore::new();
    let descriptor = store
        .load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let rows = TableCsvExporter::export(store.record(descriptor)?, &args.output)
        .with_context(|| format!("Failed to export to {}", args.output.display()))?;

    println!("✓ {rows} rows exported to: {}", args.output.display());
    Ok(())
}
