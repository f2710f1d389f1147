//! Export utilities for table data.

pub mod table_csv;

pub use table_csv::{TableCsvExporter, TableCsvRow};
