//! Configuration types for table stores.

use serde::{Deserialize, Serialize};

use crate::matrix::DEFAULT_Q_VALUE;

/// Configuration for a [`TableStore`](super::TableStore).
///
/// This type provides a builder-style API for configuring the store before
/// it is created.
///
/// # Examples
///
/// ```
/// use statematrix::app::StoreConfig;
///
/// let config = StoreConfig::new()
///     .with_default_value(-1.0)
///     .with_sync_on_save(true)
///     .with_buffer_capacity(64 * 1024);
/// assert_eq!(config.default_value, -1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Value every cell of a newly created table starts at
    pub default_value: f32,
    /// Whether to fsync table files after writing them
    pub sync_on_save: bool,
    /// Buffer size used for file reads and writes
    pub buffer_capacity: usize,
}

impl StoreConfig {
    /// Create a configuration with default values:
    /// - Default value: `0.0`
    /// - No fsync on save
    /// - 8 KiB I/O buffers
    pub fn new() -> Self {
        Self {
            default_value: DEFAULT_Q_VALUE,
            sync_on_save: false,
            buffer_capacity: 8 * 1024,
        }
    }

    /// Set the value new tables are filled with.
    pub fn with_default_value(mut self, value: f32) -> Self {
        self.default_value = value;
        self
    }

    /// Set whether saves are flushed to stable storage.
    pub fn with_sync_on_save(mut self, sync: bool) -> Self {
        self.sync_on_save = sync;
        self
    }

    /// Set the I/O buffer size.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
