//! Repository port for table persistence.
//!
//! This module defines the trait boundary between the handle table and the
//! storage holding table files.

use std::path::Path;

use crate::{Result, identifiers::Descriptor, registry::TableRecord};

/// Port for persisting and loading table records.
///
/// Implementations store the fixed binary layout described in
/// [`crate::codec`]; they differ only in where the bytes live.
///
/// # Examples
///
/// ```no_run
/// use statematrix::adapters::BinaryFileRepository;
/// use statematrix::matrix::QMatrix;
/// use statematrix::ports::TableRepository;
/// use statematrix::registry::TableRecord;
/// use std::path::Path;
///
/// let repo = BinaryFileRepository::new();
/// let record = TableRecord::new("q1.dat", QMatrix::new(10, 4)?);
///
/// repo.save(&record, None)?;
/// let loaded = repo.load(Path::new("q1.dat"))?;
/// assert_eq!(loaded.num_states(), 10);
/// # Ok::<(), statematrix::Error>(())
/// ```
pub trait TableRepository {
    /// Save a record to the location named by its filename.
    ///
    /// `descriptor` is written into the header as bookkeeping only.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be created or a write is
    /// short.
    fn save(&self, record: &TableRecord, descriptor: Option<Descriptor>) -> Result<()>;

    /// Load a record from `path`.
    ///
    /// The returned record's filename is `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The location does not exist or cannot be read
    /// - The header or payload is shorter than declared, or the counts are negative
    /// - The declared matrix cannot be allocated
    fn load(&self, path: &Path) -> Result<TableRecord>;
}
