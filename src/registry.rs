//! Append-only registry of open tables.
//!
//! Every created or loaded table is registered here and receives the next
//! descriptor in sequence. Records are never removed, so a descriptor stays
//! valid for the lifetime of the registry.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{Error, Result},
    identifiers::Descriptor,
    matrix::QMatrix,
};

/// One open table: where it persists and the values it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    filename: PathBuf,
    matrix: QMatrix,
}

impl TableRecord {
    pub fn new(filename: impl Into<PathBuf>, matrix: QMatrix) -> Self {
        Self {
            filename: filename.into(),
            matrix,
        }
    }

    /// Path this table is saved to.
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn matrix(&self) -> &QMatrix {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut QMatrix {
        &mut self.matrix
    }

    pub fn num_states(&self) -> u64 {
        self.matrix.num_states()
    }

    pub fn num_actions(&self) -> u32 {
        self.matrix.num_actions()
    }
}

/// Registry mapping descriptors to table records.
#[derive(Debug, Default)]
pub struct HandleTable {
    records: Vec<TableRecord>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its descriptor.
    pub fn register(&mut self, record: TableRecord) -> Result<Descriptor> {
        // Descriptors cross the facade as non-negative i32.
        let index = i32::try_from(self.records.len()).map_err(|_| Self::full(&record))? as u32;
        self.records
            .try_reserve(1)
            .map_err(|_| Self::full(&record))?;

        debug!(
            descriptor = index,
            filename = %record.filename.display(),
            num_states = record.num_states(),
            num_actions = record.num_actions(),
            "registered table"
        );
        self.records.push(record);
        Ok(Descriptor::new(index))
    }

    /// Look up a registered record.
    pub fn resolve(&self, descriptor: Descriptor) -> Result<&TableRecord> {
        self.records
            .get(descriptor.index())
            .ok_or_else(|| Self::unknown(descriptor))
    }

    /// Look up a registered record for mutation.
    pub fn resolve_mut(&mut self, descriptor: Descriptor) -> Result<&mut TableRecord> {
        self.records
            .get_mut(descriptor.index())
            .ok_or_else(|| Self::unknown(descriptor))
    }

    /// Number of tables registered so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all registered tables in descriptor order.
    pub fn iter(&self) -> impl Iterator<Item = (Descriptor, &TableRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| (Descriptor::new(index as u32), record))
    }

    fn unknown(descriptor: Descriptor) -> Error {
        Error::InvalidDescriptor {
            descriptor: i64::from(descriptor.as_raw()),
        }
    }

    fn full(record: &TableRecord) -> Error {
        Error::AllocationFailure {
            num_states: record.num_states(),
            num_actions: u64::from(record.num_actions()),
        }
    }
}
