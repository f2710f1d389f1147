//! Typed handle to a table in the process-wide store.

use std::path::{Path, PathBuf};

use crate::{Result, facade::with_store, identifiers::Descriptor, ports::StateMatrix};

/// A table registered in the process-wide store, addressed by descriptor.
///
/// Handles are cheap to copy; all copies refer to the same table. Dropping a
/// handle does not close the table.
///
/// # Examples
///
/// ```no_run
/// use statematrix::handle::TableHandle;
/// use statematrix::ports::StateMatrix;
///
/// let mut table = TableHandle::create("q1.dat", 10_000, 9)?;
/// table.set_q(42, 4, 1.5)?;
/// table.shutdown()?;
///
/// let reopened = TableHandle::open_expecting("q1.dat", 10_000, 9)?;
/// assert_eq!(reopened.get_q(42, 4)?, 1.5);
/// # Ok::<(), statematrix::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableHandle {
    descriptor: Descriptor,
}

impl TableHandle {
    /// Create a new table in the process-wide store.
    pub fn create(filename: impl Into<PathBuf>, num_states: u64, num_actions: u32) -> Result<Self> {
        let filename = filename.into();
        with_store(|store| store.create(filename, num_states, num_actions)).map(Self::from)
    }

    /// Open a previously saved table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        with_store(|store| store.load(path)).map(Self::from)
    }

    /// Open a previously saved table, failing if its dimensions differ.
    pub fn open_expecting(
        path: impl AsRef<Path>,
        num_states: u64,
        num_actions: u32,
    ) -> Result<Self> {
        with_store(|store| store.load_expecting(path, num_states, num_actions)).map(Self::from)
    }

    pub fn descriptor(&self) -> Descriptor {
        self.descriptor
    }

    /// Path the table is saved to.
    pub fn filename(&self) -> Result<PathBuf> {
        with_store(|store| {
            store
                .record(self.descriptor)
                .map(|record| record.filename().to_path_buf())
        })
    }

    /// First action holding the maximum Q-value of `state`.
    pub fn greedy_action(&self, state: u64) -> Result<u32> {
        with_store(|store| store.greedy_action(self.descriptor, state))
    }
}

impl From<Descriptor> for TableHandle {
    fn from(descriptor: Descriptor) -> Self {
        Self { descriptor }
    }
}

impl StateMatrix for TableHandle {
    fn get_q(&self, state: u64, action: u32) -> Result<f32> {
        with_store(|store| store.get_q(self.descriptor, state, action))
    }

    fn set_q(&mut self, state: u64, action: u32, value: f32) -> Result<()> {
        with_store(|store| store.set_q(self.descriptor, state, action, value))
    }

    fn max_value(&self, state: u64) -> Result<f32> {
        with_store(|store| store.get_max_q(self.descriptor, state))
    }

    fn num_actions(&self) -> Result<u32> {
        with_store(|store| store.num_actions(self.descriptor))
    }

    fn num_states(&self) -> Result<u64> {
        with_store(|store| store.num_states(self.descriptor))
    }

    fn shutdown(&mut self) -> Result<()> {
        with_store(|store| store.save(self.descriptor))
    }
}
