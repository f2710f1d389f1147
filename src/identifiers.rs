//! Descriptor type used to address open tables.
//!
//! Descriptors are small, sequential, zero-based handles. They are handed out
//! in registration order and never reused during a process run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Handle identifying one registered table within the current process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Descriptor(u32);

impl Descriptor {
    /// Create a descriptor from a registry position.
    ///
    /// # Examples
    ///
    /// ```
    /// use statematrix::identifiers::Descriptor;
    ///
    /// let descriptor = Descriptor::new(3);
    /// assert_eq!(descriptor.index(), 3);
    /// assert_eq!(descriptor.as_raw(), 3);
    /// ```
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Convert a raw caller-supplied integer, rejecting negative values.
    pub fn from_raw(raw: i32) -> Result<Self> {
        u32::try_from(raw)
            .map(Self)
            .map_err(|_| Error::InvalidDescriptor {
                descriptor: i64::from(raw),
            })
    }

    /// Position in the registry.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw integer form handed across the facade boundary.
    pub fn as_raw(self) -> i32 {
        i32::try_from(self.0).unwrap_or(i32::MAX)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Descriptor {
    type Error = Error;

    fn try_from(raw: i32) -> Result<Self> {
        Self::from_raw(raw)
    }
}
