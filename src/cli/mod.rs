//! CLI infrastructure for the statematrix tool
//!
//! This module provides the command-line interface for creating, inspecting,
//! querying, updating and exporting table files.

pub mod commands;
pub mod output;
