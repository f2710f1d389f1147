//! Tests for CLI command execution against real files.

use std::path::Path;

use statematrix::{
    adapters::BinaryFileRepository,
    cli::commands::{
        create::{self, CreateArgs},
        export::{self, ExportArgs},
        inspect::{self, InspectArgs},
        query::{self, GetArgs, MaxArgs},
        set::{self, SetArgs},
    },
    ports::TableRepository,
};
use tempfile::TempDir;

fn create_table(path: &Path, states: u64, actions: u32, default: f32) {
    create::execute(CreateArgs {
        file: path.to_path_buf(),
        states,
        actions,
        default,
        sync: false,
    })
    .expect("create should succeed");
}

#[test]
fn test_create_set_and_query() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("cli.dat");

    create_table(&path, 3, 2, -1.0);
    set::execute(SetArgs {
        file: path.clone(),
        state: 1,
        action: 1,
        value: 4.5,
        sync: true,
    })
    .expect("set should succeed");

    let record = BinaryFileRepository::new().load(&path).unwrap();
    assert_eq!(record.matrix().get(1, 1).unwrap(), 4.5);
    assert_eq!(record.matrix().get(0, 0).unwrap(), -1.0);

    query::execute_get(GetArgs {
        file: path.clone(),
        state: 1,
        action: 1,
    })
    .unwrap();
    query::execute_max(MaxArgs {
        file: path.clone(),
        state: 1,
    })
    .unwrap();
    inspect::execute(InspectArgs {
        file: path.clone(),
        default: 0.0,
        json: true,
    })
    .unwrap();
}

#[test]
fn test_query_out_of_range_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("small.dat");
    create_table(&path, 1, 1, 0.0);

    let result = query::execute_get(GetArgs {
        file: path.clone(),
        state: 1,
        action: 0,
    });
    assert!(result.is_err());

    let result = set::execute(SetArgs {
        file: path,
        state: 0,
        action: 4,
        value: 1.0,
        sync: false,
    });
    assert!(result.is_err());
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("export.dat");
    let output = temp_dir.path().join("export.csv");
    create_table(&path, 2, 1, 0.0);

    export::execute(ExportArgs {
        file: path,
        output: output.clone(),
    })
    .expect("export should succeed");

    let text = std::fs::read_to_string(output).unwrap();
    assert_eq!(text, "state,action,value\n0,0,0.0\n1,0,0.0\n");
}

#[test]
fn test_inspect_missing_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = inspect::execute(InspectArgs {
        file: temp_dir.path().join("missing.dat"),
        default: 0.0,
        json: false,
    });
    assert!(result.is_err());
}

#[test]
fn test_inspect_with_custom_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("negative.dat");
    create_table(&path, 2, 2, -1.0);

    inspect::execute(InspectArgs {
        file: path,
        default: -1.0,
        json: false,
    })
    .unwrap();
}
