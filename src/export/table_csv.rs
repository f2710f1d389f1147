//! CSV export of Q-value tables.
//!
//! One row per state-action pair, in row-major order:
//!
//! ```text
//! state,action,value
//! 0,0,0.0
//! 0,1,5.5
//! ```

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{Result, error::Error, registry::TableRecord};

/// A single row in the CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCsvRow {
    pub state: u64,
    pub action: u32,
    pub value: f32,
}

/// Exporter for table CSV files
pub struct TableCsvExporter;

impl TableCsvExporter {
    /// Rows of `record` in row-major order.
    pub fn rows(record: &TableRecord) -> impl Iterator<Item = TableCsvRow> + '_ {
        let num_actions = record.num_actions();
        record
            .matrix()
            .values()
            .iter()
            .enumerate()
            .map(move |(index, &value)| TableCsvRow {
                state: index as u64 / u64::from(num_actions),
                action: (index as u64 % u64::from(num_actions)) as u32,
                value,
            })
    }

    /// Write `record` as CSV to `writer`, returning the number of rows.
    pub fn write<W: Write>(record: &TableRecord, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut count = 0;
        for row in Self::rows(record) {
            csv_writer.serialize(row)?;
            count += 1;
        }
        // Header row only appears once a record is serialized.
        if count == 0 {
            csv_writer.write_record(["state", "action", "value"])?;
        }
        csv_writer.flush().map_err(|source| Error::Io {
            operation: "flush CSV output".to_string(),
            source,
        })?;
        Ok(count)
    }

    /// Export `record` to a CSV file at `path`, returning the number of rows.
    pub fn export(record: &TableRecord, path: &Path) -> Result<usize> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        Self::write(record, file)
    }
}
