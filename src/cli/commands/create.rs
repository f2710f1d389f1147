//! Create command - write a fresh table file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{StoreConfig, TableStore},
    cli::output::{format_number, print_kv, print_section},
    matrix::DEFAULT_Q_VALUE,
};

#[derive(Parser, Debug)]
#[command(about = "Create a new table file")]
pub struct CreateArgs {
    /// Path of the table file to write
    pub file: PathBuf,

    /// Number of states
    #[arg(long, short = 's')]
    pub states: u64,

    /// Number of actions per state
    #[arg(long, short = 'a')]
    pub actions: u32,

    /// Value every cell starts at
    #[arg(long, default_value_t = DEFAULT_Q_VALUE, allow_negative_numbers = true)]
    pub default: f32,

    /// Flush the file to stable storage after writing
    #[arg(long)]
    pub sync: bool,
}

pub fn execute(args: CreateArgs) -> Result<()> {
    let config = StoreConfig::new()
        .with_default_value(args.default)
        .with_sync_on_save(args.sync);
    let mut store = TableStore::with_config(config);

    let descriptor = store
        .create(&args.file, args.states, args.actions)
        .context("Failed to allocate table")?;
    store
        .save(descriptor)
        .with_context(|| format!("Failed to write {}", args.file.display()))?;

    print_section("Table created");
    print_kv("File", &args.file.display().to_string());
    print_kv("States", &format_number(args.states));
    print_kv("Actions", &format_number(u64::from(args.actions)));
    print_kv("Default value", &args.default.to_string());
    Ok(())
}
