//! Tests for descriptor-backed table handles.

use statematrix::{Error, StateMatrix, TableHandle};
use tempfile::TempDir;

/// Write a small policy through any StateMatrix and read back its best value.
fn train<M: StateMatrix>(table: &mut M) -> statematrix::Result<f32> {
    for state in 0..table.num_states()? {
        for action in 0..table.num_actions()? {
            table.set_q(state, action, (state * 10 + u64::from(action)) as f32)?;
        }
    }
    table.max_value(table.num_states()? - 1)
}

#[test]
fn test_handle_shutdown_and_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("agent.dat");

    let mut table = TableHandle::create(&path, 4, 3).unwrap();
    assert_eq!(train(&mut table).unwrap(), 32.0);
    assert_eq!(table.greedy_action(3).unwrap(), 2);
    assert_eq!(table.filename().unwrap(), path);
    table.shutdown().unwrap();

    let reopened = TableHandle::open(&path).unwrap();
    assert!(reopened.descriptor() > table.descriptor());
    assert_eq!(reopened.get_q(2, 1).unwrap(), 21.0);
    assert_eq!(reopened.num_states().unwrap(), 4);
    assert_eq!(reopened.num_actions().unwrap(), 3);
}

#[test]
fn test_open_expecting_rejects_other_dimensions() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("sized.dat");

    let mut table = TableHandle::create(&path, 5, 2).unwrap();
    table.shutdown().unwrap();

    assert!(TableHandle::open_expecting(&path, 5, 2).is_ok());
    assert!(matches!(
        TableHandle::open_expecting(&path, 5, 3),
        Err(Error::DimensionMismatch {
            expected_actions: 3,
            found_actions: 2,
            ..
        })
    ));
}

#[test]
fn test_open_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = TableHandle::open(temp_dir.path().join("none.dat"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_copies_share_one_table() {
    let mut first = TableHandle::create("unsaved.dat", 1, 2).unwrap();
    let second = first;
    first.set_q(0, 1, 6.5).unwrap();
    assert_eq!(second.get_q(0, 1).unwrap(), 6.5);
    assert_eq!(second.max_value(0).unwrap(), 6.5);
}

#[test]
fn test_handle_rejects_width_beyond_file_header() {
    let result = TableHandle::create("wide.dat", 0, 3_000_000_000);
    assert!(matches!(result, Err(Error::DimensionsTooLarge { .. })));
}
