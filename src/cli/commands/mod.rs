//! Subcommands of the statematrix CLI.

pub mod create;
pub mod export;
pub mod inspect;
pub mod query;
pub mod set;
