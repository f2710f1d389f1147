//! Inspect command - summarize a table file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    app::TableStore,
    cli::output::{CellStats, format_number, print_kv, print_section},
    matrix::DEFAULT_Q_VALUE,
};

#[derive(Parser, Debug)]
#[command(about = "Show dimensions and value statistics of a table file")]
pub struct InspectArgs {
    /// Path of the table file to read
    pub file: PathBuf,

    /// Fill value the table was created with; cells differing from it are counted
    #[arg(long, default_value_t = DEFAULT_Q_VALUE, allow_negative_numbers = true)]
    pub default: f32,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Summary {
    file: PathBuf,
    num_states: u64,
    num_actions: u32,
    cells: usize,
    default_value: f32,
    stats: Option<CellStats>,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let mut store = TableStore::new();
    let descriptor = store
        .load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let record = store.record(descriptor)?;

    let summary = Summary {
        file: args.file.clone(),
        num_states: record.num_states(),
        num_actions: record.num_actions(),
        cells: record.matrix().len(),
        default_value: args.default,
        stats: CellStats::of(record, args.default),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section(&format!("Table {}", summary.file.display()));
    print_kv("States", &format_number(summary.num_states));
    print_kv("Actions", &format_number(u64::from(summary.num_actions)));
    print_kv("Cells", &format_number(summary.cells as u64));
    match summary.stats {
        Some(stats) => {
            print_kv("Min", &stats.min.to_string());
            print_kv("Max", &stats.max.to_string());
            print_kv("Mean", &format!("{:.6}", stats.mean));
            print_kv(
                &format!("Cells != {}", summary.default_value),
                &format_number(stats.non_default as u64),
            );
        }
        None => print_kv("Values", "(empty)"),
    }
    Ok(())
}
