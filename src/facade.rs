//! Sentinel-returning operations over the process-wide table store.
//!
//! This is the surface a host-language binding calls into. Every function
//! takes raw integers and byte-string filenames, never panics on bad input,
//! and reports failure through a sentinel: `-1` for descriptors, counts and
//! `save`, `-1.0` for Q-values. [`set_q`] on a bad descriptor or index does
//! nothing.
//!
//! Descriptors are handed out from 0 in the order tables are created or
//! loaded and stay valid until the process exits.
//!
//! The store is guarded by a mutex only so it can live in a `static`; callers
//! are expected to serialize their own access. The store itself is not
//! reachable from outside the crate, so no caller can hold its lock across a
//! nested call:
//!
//! ```compile_fail
//! statematrix::facade::with_store(|_| statematrix::facade::get_q(0, 0, 0));
//! ```

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex, MutexGuard},
};

use tracing::warn;

use crate::{Result, app::TableStore, identifiers::Descriptor};

/// Returned by descriptor- and count-returning operations on failure.
pub const FAILURE: i32 = -1;

/// Returned by value-returning operations on failure.
pub const FAILURE_VALUE: f32 = -1.0;

static STORE: LazyLock<Mutex<TableStore>> = LazyLock::new(|| Mutex::new(TableStore::new()));

/// Run `op` against the process-wide store.
///
/// The lock is held while `op` runs, so `op` must not call back into this
/// module or into a `TableHandle`.
pub(crate) fn with_store<T>(op: impl FnOnce(&mut TableStore) -> T) -> T {
    op(&mut *store())
}

fn store() -> MutexGuard<'static, TableStore> {
    STORE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Create a table of `num_states * num_actions` cells at the default value.
///
/// Returns the new descriptor, or `-1` if the dimensions are negative or the
/// matrix cannot be allocated.
pub fn create(filename: &[u8], num_states: i64, num_actions: i32) -> i32 {
    let filename = filename_from_bytes(filename);
    let result = match (u64::try_from(num_states), u32::try_from(num_actions)) {
        (Ok(states), Ok(actions)) => store().create(filename, states, actions),
        _ => Err(crate::Error::NegativeDimensions {
            num_states,
            num_actions: i64::from(num_actions),
        }),
    };
    or_sentinel("create", result.map(Descriptor::as_raw), FAILURE)
}

/// Load a table from `filename` under a fresh descriptor, or `-1`.
pub fn load(filename: &[u8]) -> i32 {
    let filename = filename_from_bytes(filename);
    let result = store().load(&filename);
    or_sentinel("load", result.map(Descriptor::as_raw), FAILURE)
}

/// Write the table to its filename. Returns `0` on success, `-1` on failure.
pub fn save(descriptor: i32) -> i32 {
    let result = Descriptor::from_raw(descriptor).and_then(|d| store().save(d));
    or_sentinel("save", result.map(|()| 0), FAILURE)
}

/// Q-value of a state-action pair, or `-1.0`.
pub fn get_q(descriptor: i32, state: i64, action: i32) -> f32 {
    let result = resolve_indices(descriptor, state, action)
        .and_then(|(d, state, action)| store().get_q(d, state, action));
    or_sentinel("get_q", result, FAILURE_VALUE)
}

/// Set the Q-value of a state-action pair. Does nothing on failure.
pub fn set_q(descriptor: i32, state: i64, action: i32, value: f32) {
    let result = resolve_indices(descriptor, state, action)
        .and_then(|(d, state, action)| store().set_q(d, state, action, value));
    or_sentinel("set_q", result, ());
}

/// Maximum Q-value over the actions of `state`, or `-1.0`.
pub fn get_max_q(descriptor: i32, state: i64) -> f32 {
    let result = resolve_indices(descriptor, state, 0)
        .and_then(|(d, state, _)| store().get_max_q(d, state));
    or_sentinel("get_max_q", result, FAILURE_VALUE)
}

/// Number of states in the table, or `-1`.
pub fn get_num_states(descriptor: i32) -> i64 {
    let result = Descriptor::from_raw(descriptor)
        .and_then(|d| store().num_states(d))
        .map(|n| i64::try_from(n).unwrap_or(i64::MAX));
    or_sentinel("get_num_states", result, i64::from(FAILURE))
}

/// Number of actions per state in the table, or `-1`.
pub fn get_num_actions(descriptor: i32) -> i32 {
    let result = Descriptor::from_raw(descriptor)
        .and_then(|d| store().num_actions(d))
        .map(|n| i32::try_from(n).unwrap_or(i32::MAX));
    or_sentinel("get_num_actions", result, FAILURE)
}

/// Filename up to the first NUL byte.
fn filename_from_bytes(bytes: &[u8]) -> PathBuf {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let bytes = &bytes[..end];

    #[cfg(unix)]
    {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};
        PathBuf::from(OsStr::from_bytes(bytes))
    }
    #[cfg(not(unix))]
    {
        PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
    }
}

fn resolve_indices(descriptor: i32, state: i64, action: i32) -> Result<(Descriptor, u64, u32)> {
    let descriptor = Descriptor::from_raw(descriptor)?;
    match (u64::try_from(state), u32::try_from(action)) {
        (Ok(state), Ok(action)) => Ok((descriptor, state, action)),
        _ => {
            // Report against the table's real bounds when it exists.
            let (num_states, num_actions) = store()
                .record(descriptor)
                .map(|r| (r.num_states(), r.num_actions()))?;
            Err(crate::Error::IndexOutOfRange {
                state,
                action: i64::from(action),
                num_states,
                num_actions,
            })
        }
    }
}

fn or_sentinel<T>(operation: &str, result: Result<T>, sentinel: T) -> T {
    result.unwrap_or_else(|err| {
        warn!(operation, error = %err, "table operation failed");
        sentinel
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_stops_at_nul() {
        assert_eq!(filename_from_bytes(b"q1.dat\0junk"), PathBuf::from("q1.dat"));
        assert_eq!(filename_from_bytes(b"plain"), PathBuf::from("plain"));
        assert_eq!(filename_from_bytes(b""), PathBuf::from(""));
    }

    #[test]
    fn test_negative_descriptor_sentinels() {
        assert_eq!(get_q(-1, 0, 0), FAILURE_VALUE);
        assert_eq!(get_max_q(-5, 0), FAILURE_VALUE);
        assert_eq!(get_num_states(-1), -1);
        assert_eq!(get_num_actions(-1), -1);
        assert_eq!(save(-1), FAILURE);
        set_q(-1, 0, 0, 1.0);
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        assert_eq!(create(b"neg", -1, 2), FAILURE);
        assert_eq!(create(b"neg", 2, -1), FAILURE);
    }

    #[test]
    fn test_lock_released_after_with_store() {
        let len = with_store(|store| store.len());
        // A second acquisition on the same thread would hang if the guard leaked.
        assert!(with_store(|store| store.len()) >= len);
        assert_eq!(get_num_states(i32::MAX), -1);
    }
}
