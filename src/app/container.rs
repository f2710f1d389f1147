//! Table store: handle table plus persistence.
//!
//! The store owns the registry of open tables and the repository that table
//! files go through, and exposes every table operation as a typed `Result`.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::debug;

use super::config::StoreConfig;
use crate::{
    Result,
    adapters::BinaryFileRepository,
    error::Error,
    identifiers::Descriptor,
    matrix::QMatrix,
    ports::TableRepository,
    registry::{HandleTable, TableRecord},
};

/// Registry of open tables backed by a repository.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use statematrix::app::TableStore;
///
/// let mut store = TableStore::new();
/// let descriptor = store.create("q1.dat", 1000, 8)?;
/// store.set_q(descriptor, 12, 3, 0.75)?;
/// store.save(descriptor)?;
/// # Ok::<(), statematrix::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use statematrix::app::TableStore;
/// use statematrix::adapters::InMemoryRepository;
///
/// let store = TableStore::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .build();
/// assert!(store.is_empty());
/// ```
pub struct TableStore {
    /// Open tables, indexed by descriptor
    handles: HandleTable,
    /// Repository for table persistence
    repository: Arc<dyn TableRepository + Send + Sync>,
    config: StoreConfig,
}

impl TableStore {
    /// Create a store with production defaults.
    ///
    /// Uses `BinaryFileRepository` and [`StoreConfig::default`].
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a file-backed store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            handles: HandleTable::new(),
            repository: Arc::new(BinaryFileRepository::with_config(&config)),
            config,
        }
    }

    /// Create a builder for constructing a store with custom dependencies.
    ///
    /// Primarily used for testing with in-memory storage.
    pub fn for_testing() -> TableStoreBuilder {
        TableStoreBuilder::new()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the repository.
    pub fn repository(&self) -> Arc<dyn TableRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Create a table filled with the configured default value and register it.
    ///
    /// Nothing is written until [`save`](Self::save) is called.
    pub fn create(
        &mut self,
        filename: impl Into<PathBuf>,
        num_states: u64,
        num_actions: u32,
    ) -> Result<Descriptor> {
        let matrix = QMatrix::with_default(num_states, num_actions, self.config.default_value)?;
        self.handles.register(TableRecord::new(filename, matrix))
    }

    /// Load a table from `path` and register it under a fresh descriptor.
    ///
    /// Loading the same file twice yields two independent tables.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Descriptor> {
        let record = self.repository.load(path.as_ref())?;
        self.handles.register(record)
    }

    /// Load a table and check it has the expected dimensions.
    ///
    /// The table is registered before the check, so a mismatch still
    /// consumes a descriptor.
    pub fn load_expecting(
        &mut self,
        path: impl AsRef<Path>,
        num_states: u64,
        num_actions: u32,
    ) -> Result<Descriptor> {
        let path = path.as_ref();
        let descriptor = self.load(path)?;
        let record = self.handles.resolve(descriptor)?;
        if record.num_states() != num_states || record.num_actions() != num_actions {
            return Err(Error::DimensionMismatch {
                path: path.to_path_buf(),
                expected_states: num_states,
                expected_actions: num_actions,
                found_states: record.num_states(),
                found_actions: record.num_actions(),
            });
        }
        Ok(descriptor)
    }

    /// Write a table to its filename.
    pub fn save(&self, descriptor: Descriptor) -> Result<()> {
        let record = self.handles.resolve(descriptor)?;
        debug!(%descriptor, path = %record.filename().display(), "saving table");
        self.repository.save(record, Some(descriptor))
    }

    pub fn get_q(&self, descriptor: Descriptor, state: u64, action: u32) -> Result<f32> {
        self.record(descriptor)?.matrix().get(state, action)
    }

    pub fn set_q(
        &mut self,
        descriptor: Descriptor,
        state: u64,
        action: u32,
        value: f32,
    ) -> Result<()> {
        self.handles
            .resolve_mut(descriptor)?
            .matrix_mut()
            .set(state, action, value)
    }

    /// Maximum Q-value over the actions of `state`.
    pub fn get_max_q(&self, descriptor: Descriptor, state: u64) -> Result<f32> {
        self.record(descriptor)?.matrix().max_over_actions(state)
    }

    /// First action holding the maximum Q-value of `state`.
    pub fn greedy_action(&self, descriptor: Descriptor, state: u64) -> Result<u32> {
        self.record(descriptor)?.matrix().greedy_action(state)
    }

    pub fn num_states(&self, descriptor: Descriptor) -> Result<u64> {
        Ok(self.record(descriptor)?.num_states())
    }

    pub fn num_actions(&self, descriptor: Descriptor) -> Result<u32> {
        Ok(self.record(descriptor)?.num_actions())
    }

    /// Borrow a registered table.
    pub fn record(&self, descriptor: Descriptor) -> Result<&TableRecord> {
        self.handles.resolve(descriptor)
    }

    /// Number of tables registered so far.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a [`TableStore`] with custom dependencies.
///
/// # Examples
///
/// ```
/// use statematrix::app::{StoreConfig, TableStore};
/// use statematrix::adapters::InMemoryRepository;
///
/// let store = TableStore::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_config(StoreConfig::new().with_default_value(-1.0))
///     .build();
/// assert_eq!(store.config().default_value, -1.0);
/// ```
pub struct TableStoreBuilder {
    repository: Option<Arc<dyn TableRepository + Send + Sync>>,
    config: StoreConfig,
}

impl TableStoreBuilder {
    fn new() -> Self {
        Self {
            repository: None,
            config: StoreConfig::default(),
        }
    }

    /// Set the repository.
    pub fn with_repository<R>(mut self, repository: R) -> Self
    where
        R: TableRepository + Send + Sync + 'static,
    {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Set the store configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the store.
    ///
    /// Falls back to a `BinaryFileRepository` if no repository was provided.
    pub fn build(self) -> TableStore {
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(BinaryFileRepository::with_config(&self.config)));
        TableStore {
            handles: HandleTable::new(),
            repository,
            config: self.config,
        }
    }
}
