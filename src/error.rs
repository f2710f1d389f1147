//! Error types for the statematrix crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the statematrix crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cannot allocate a {num_states}x{num_actions} matrix")]
    AllocationFailure { num_states: u64, num_actions: u64 },

    #[error(
        "{num_states}x{num_actions} exceeds the table file limits ({} states, {} actions)",
        i64::MAX,
        i32::MAX
    )]
    DimensionsTooLarge { num_states: u64, num_actions: u32 },

    #[error("negative dimensions: {num_states} states, {num_actions} actions")]
    NegativeDimensions { num_states: i64, num_actions: i64 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt table file {path:?}: {reason}")]
    CorruptFile { path: PathBuf, reason: String },

    #[error("descriptor {descriptor} does not refer to an open table")]
    InvalidDescriptor { descriptor: i64 },

    #[error(
        "index ({state}, {action}) is out of range for a {num_states}x{num_actions} matrix"
    )]
    IndexOutOfRange {
        state: i64,
        action: i64,
        num_states: u64,
        num_actions: u32,
    },

    #[error("state {state} has no actions to take a maximum over")]
    EmptyRow { state: u64 },

    #[error(
        "table {path:?} is {found_states}x{found_actions}, expected {expected_states}x{expected_actions}"
    )]
    DimensionMismatch {
        path: PathBuf,
        expected_states: u64,
        expected_actions: u32,
        found_states: u64,
        found_actions: u32,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
