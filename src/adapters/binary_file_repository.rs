//! File-system implementation of the table repository.
//!
//! One file per table, in the fixed layout of [`crate::codec`].

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    Result, app::StoreConfig, codec, error::Error, identifiers::Descriptor,
    ports::TableRepository, registry::TableRecord,
};

/// Repository storing each table in its own binary file.
///
/// # Examples
///
/// ```no_run
/// use statematrix::adapters::BinaryFileRepository;
/// use statematrix::app::StoreConfig;
/// use statematrix::ports::TableRepository;
/// use std::path::Path;
///
/// let repo = BinaryFileRepository::with_config(&StoreConfig::default().with_sync_on_save(true));
/// let record = repo.load(Path::new("q1.dat"))?;
/// repo.save(&record, None)?;
/// # Ok::<(), statematrix::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BinaryFileRepository {
    buffer_capacity: usize,
    sync_on_save: bool,
}

impl BinaryFileRepository {
    /// Create a repository with default buffering and no fsync.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Create a repository using the I/O settings from `config`.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            buffer_capacity: config.buffer_capacity.max(1),
            sync_on_save: config.sync_on_save,
        }
    }
}

impl Default for BinaryFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRepository for BinaryFileRepository {
    fn save(&self, record: &TableRecord, descriptor: Option<Descriptor>) -> Result<()> {
        let path = record.filename();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::with_capacity(self.buffer_capacity, file);

        let write_failed = |source| Error::Io {
            operation: format!("write table to {path:?}"),
            source,
        };
        codec::encode(&mut writer, record, descriptor).map_err(write_failed)?;
        writer.flush().map_err(write_failed)?;

        if self.sync_on_save {
            writer.get_ref().sync_all().map_err(|source| Error::Io {
                operation: format!("sync file {path:?}"),
                source,
            })?;
        }

        debug!(
            path = %path.display(),
            cells = record.matrix().len(),
            "saved table"
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<TableRecord> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let mut reader = BufReader::with_capacity(self.buffer_capacity, file);

        let record = codec::decode(&mut reader, path)?;
        debug!(
            path = %path.display(),
            num_states = record.num_states(),
            num_actions = record.num_actions(),
            "loaded table"
        );
        Ok(record)
    }
}
