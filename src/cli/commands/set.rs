//! Set command - update one value in a table file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::app::{StoreConfig, TableStore};

#[derive(Parser, Debug)]
#[command(about = "Set the Q-value of a state-action pair and save the table")]
pub struct SetArgs {
    /// Path of the table file to update
    pub file: PathBuf,

    /// State index
    pub state: u64,

    /// Action index
    pub action: u32,

    /// New Q-value
    #[arg(allow_negative_numbers = true)]
    pub value: f32,

    /// Flush the file to stable storage after writing
    #[arg(long)]
    pub sync: bool,
}

pub fn execute(args: SetArgs) -> Result<()> {
    let mut store = TableStore::with_config(StoreConfig::new().with_sync_on_save(args.sync));
    let descriptor = store
        .load(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let previous = store.get_q(descriptor, args.state, args.action)?;
    store.set_q(descriptor, args.state, args.action, args.value)?;
    store
        .save(descriptor)
        .with_context(|| format!("Failed to write {}", args.file.display()))?;

    info!(
        state = args.state,
        action = args.action,
        previous,
        value = args.value,
        "updated Q-value"
    );
    println!("{previous} -> {}", args.value);
    Ok(())
}
