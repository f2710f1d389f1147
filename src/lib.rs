//! Persistent Q-value tables for reinforcement learning agents
//!
//! This crate provides:
//! - A flat, bounds-checked `(state, action)` matrix of `f32` Q-values
//! - An append-only registry handing out sequential table descriptors
//! - A fixed little-endian file format, one file per table
//! - A sentinel-returning facade for host-language bindings
//! - A `StateMatrix` trait for agents, plus CLI and CSV export tooling

pub mod adapters;
pub mod app;
pub mod cli;
pub mod codec;
pub mod error;
pub mod export;
pub mod facade;
pub mod handle;
pub mod identifiers;
pub mod matrix;
pub mod ports;
pub mod registry;

pub use app::{StoreConfig, TableStore};
pub use error::{Error, Result};
pub use handle::TableHandle;
pub use identifiers::Descriptor;
pub use matrix::{DEFAULT_Q_VALUE, QMatrix};
pub use ports::{StateMatrix, TableRepository};
pub use registry::{HandleTable, TableRecord};
