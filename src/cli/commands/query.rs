//! Get and max commands - read values from a table file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{app::TableStore, identifiers::Descriptor};

#[derive(Parser, Debug)]
#[command(about = "Print the Q-value of a state-action pair")]
pub struct GetArgs {
    /// Path of the table file to read
    pub file: PathBuf,

    /// State index
    pub state: u64,

    /// Action index
    pub action: u32,
}

#[derive(Parser, Debug)]
#[command(about = "Print the best action and maximum Q-value of a state")]
pub struct MaxArgs {
    /// Path of the table file to read
    pub file: PathBuf,

    /// State index
    pub state: u64,
}

fn open(file: &Path) -> Result<(TableStore, Descriptor)> {
    let mut store = TableStore::new();
    let descriptor = store
        .load(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok((store, descriptor))
}

pub fn execute_get(args: GetArgs) -> Result<()> {
    let (store, descriptor) = open(&args.file)?;
    let value = store.get_q(descriptor, args.state, args.action)?;
    println!("{value}");
    Ok(())
}

pub fn execute_max(args: MaxArgs) -> Result<()> {
    let (store, descriptor) = open(&args.file)?;
    let action = store.greedy_action(descriptor, args.state)?;
    let value = store.get_max_q(descriptor, args.state)?;
    println!("action {action}: {value}");
    Ok(())
}
