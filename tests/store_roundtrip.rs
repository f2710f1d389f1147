//! Round-trip and query laws for the table store.

mod common;

use std::path::Path;

use statematrix::{
    Descriptor, Error, StoreConfig, TableStore, adapters::InMemoryRepository, codec,
};
use tempfile::TempDir;

#[test]
fn test_new_table_is_default_filled() {
    let mut store = TableStore::for_testing()
        .with_repository(InMemoryRepository::new())
        .build();

    for (num_states, num_actions) in [(0, 0), (0, 5), (5, 0), (1, 1), (7, 3)] {
        let descriptor = store.create("t", num_states, num_actions).unwrap();
        for state in 0..num_states {
            for action in 0..num_actions {
                assert_eq!(store.get_q(descriptor, state, action).unwrap(), 0.0);
            }
        }
    }
}

#[test]
fn test_file_roundtrip_preserves_every_cell() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("q.dat");

    let mut store = TableStore::new();
    let original = store.create(&path, 25, 6).unwrap();
    let written = common::fill_random(&mut store, original, 42);
    store.save(original).expect("Failed to save table");

    let loaded = store.load(&path).expect("Failed to load table");
    assert_ne!(loaded, original);
    assert_eq!(store.num_states(loaded).unwrap(), 25);
    assert_eq!(store.num_actions(loaded).unwrap(), 6);
    assert_eq!(store.record(loaded).unwrap().matrix().values(), &written[..]);
    assert_eq!(store.record(loaded).unwrap().filename(), path.as_path());
}

#[test]
fn test_max_equals_maximum_of_row() {
    let mut store = TableStore::for_testing()
        .with_repository(InMemoryRepository::new())
        .build();
    let descriptor = store.create("t", 40, 9).unwrap();
    common::fill_random(&mut store, descriptor, 7);

    for state in 0..40 {
        let expected = (0..9)
            .map(|action| store.get_q(descriptor, state, action).unwrap())
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(store.get_max_q(descriptor, state).unwrap(), expected);

        let greedy = store.greedy_action(descriptor, state).unwrap();
        assert_eq!(store.get_q(descriptor, state, greedy).unwrap(), expected);
    }
}

#[test]
fn test_fresh_store_numbers_descriptors_from_zero() {
    let repo = InMemoryRepository::new();
    let mut store = TableStore::for_testing().with_repository(repo).build();

    let a = store.create("a", 2, 2).unwrap();
    store.save(a).unwrap();
    let b = store.load("a").unwrap();
    let c = store.load("a").unwrap();
    let d = store.create("d", 1, 1).unwrap();

    assert_eq!(
        [a, b, c, d],
        [0, 1, 2, 3].map(Descriptor::new),
    );
}

#[test]
fn test_two_loads_are_independent() {
    let mut store = TableStore::for_testing()
        .with_repository(InMemoryRepository::new())
        .build();
    let original = store.create("shared", 2, 2).unwrap();
    store.set_q(original, 0, 0, 1.5).unwrap();
    store.save(original).unwrap();

    let first = store.load("shared").unwrap();
    let second = store.load("shared").unwrap();
    store.set_q(first, 0, 0, 99.0).unwrap();

    assert_eq!(store.get_q(second, 0, 0).unwrap(), 1.5);
    assert_eq!(store.get_q(original, 0, 0).unwrap(), 1.5);
}

#[test]
fn test_load_ignores_writer_filename() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let written_as = temp_dir.path().join("original.dat");
    let moved_to = temp_dir.path().join("moved.dat");

    let mut store = TableStore::new();
    let descriptor = store.create(&written_as, 3, 3).unwrap();
    store.set_q(descriptor, 2, 2, 8.0).unwrap();
    store.save(descriptor).unwrap();
    std::fs::rename(&written_as, &moved_to).unwrap();

    let loaded = store.load(&moved_to).unwrap();
    assert_eq!(store.record(loaded).unwrap().filename(), moved_to.as_path());

    // Saving writes to the path it was loaded from.
    store.set_q(loaded, 0, 0, 1.0).unwrap();
    store.save(loaded).unwrap();
    assert!(!written_as.exists());
    let reloaded = store.load(&moved_to).unwrap();
    assert_eq!(store.get_q(reloaded, 0, 0).unwrap(), 1.0);
    assert_eq!(store.get_q(reloaded, 2, 2).unwrap(), 8.0);
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("padded.dat");

    let mut store = TableStore::new();
    let descriptor = store.create(&path, 2, 1).unwrap();
    store.set_q(descriptor, 1, 0, 2.0).unwrap();
    store.save(descriptor).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), codec::HEADER_LEN + 2 * codec::CELL_LEN);
    bytes.extend_from_slice(b"trailer");
    std::fs::write(&path, bytes).unwrap();

    let loaded = store.load(&path).unwrap();
    assert_eq!(store.get_q(loaded, 1, 0).unwrap(), 2.0);
}

#[test]
fn test_corrupt_inputs() {
    let repo = InMemoryRepository::new();
    let mut store = TableStore::for_testing()
        .with_repository(repo.clone())
        .build();

    let descriptor = store.create("full", 4, 4).unwrap();
    store.save(descriptor).unwrap();
    let mut bytes = repo.raw(Path::new("full")).unwrap();
    bytes.truncate(codec::HEADER_LEN + 3);
    repo.insert_raw(Path::new("truncated"), bytes);

    assert!(matches!(
        store.load("truncated"),
        Err(Error::CorruptFile { .. })
    ));
    assert!(matches!(store.load("absent"), Err(Error::Io { .. })));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_sync_on_save_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("synced.dat");

    let mut store = TableStore::with_config(
        StoreConfig::new()
            .with_sync_on_save(true)
            .with_buffer_capacity(16),
    );
    let descriptor = store.create(&path, 100, 10).unwrap();
    let written = common::fill_random(&mut store, descriptor, 3);
    store.save(descriptor).unwrap();

    let loaded = store.load(&path).unwrap();
    assert_eq!(store.record(loaded).unwrap().matrix().values(), &written[..]);
}

#[test]
fn test_dimensions_survive_roundtrip_at_header_limits() {
    let repo = InMemoryRepository::new();
    let mut store = TableStore::for_testing()
        .with_repository(repo.clone())
        .build();

    let err = store.create("wide", 0, 3_000_000_000).unwrap_err();
    assert!(matches!(err, Error::DimensionsTooLarge { .. }));
    assert!(store.is_empty());

    let widest = store.create("widest", 0, i32::MAX as u32).unwrap();
    store.save(widest).unwrap();
    let reloaded = store.load("widest").unwrap();
    assert_eq!(store.num_states(reloaded).unwrap(), 0);
    assert_eq!(store.num_actions(reloaded).unwrap(), i32::MAX as u32);
}
