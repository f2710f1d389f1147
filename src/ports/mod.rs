//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the table engine and its
//! surroundings: where table files are stored, and how an agent sees a table.

pub mod repository;
pub mod state_matrix;

pub use repository::TableRepository;
pub use state_matrix::StateMatrix;
