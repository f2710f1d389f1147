//! Binary encoding of table records.
//!
//! A table file is a fixed 24-byte little-endian header followed by the
//! matrix cells as little-endian `f32`, row-major, with no padding:
//!
//! ```text
//! offset  width  field
//!      0      8  num_states         i64   restored on read
//!      8      4  num_actions        i32   restored on read
//!     12      4  writer_descriptor  i32   written, ignored on read
//!     16      4  filename_len       u32   written, ignored on read
//!     20      4  reserved           u32   written, ignored on read
//!     24    4*n  cells              f32
//! ```
//!
//! The payload has no length prefix; its size follows from the header
//! counts. Bytes after the payload are ignored.

use std::{
    io::{self, Read, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    identifiers::Descriptor,
    matrix::QMatrix,
    registry::TableRecord,
};

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 24;

/// Size of one encoded cell in bytes.
pub const CELL_LEN: usize = 4;

/// Cells decoded per read call.
const CHUNK_CELLS: usize = 8192;

/// Fixed header preceding the cells of a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHeader {
    pub num_states: i64,
    pub num_actions: i32,
    /// Descriptor of the table in the process that wrote the file.
    pub writer_descriptor: i32,
    /// Byte length of the writer's filename.
    pub filename_len: u32,
    pub reserved: u32,
}

impl TableHeader {
    /// Header describing `record`, tagged with the writer's bookkeeping.
    ///
    /// `QMatrix` never holds dimensions beyond `i64`/`i32`, so the counts
    /// always convert exactly.
    pub fn for_record(record: &TableRecord, descriptor: Option<Descriptor>) -> Self {
        let filename_len = record.filename().as_os_str().len();
        Self {
            num_states: i64::try_from(record.num_states()).unwrap_or(i64::MAX),
            num_actions: i32::try_from(record.num_actions()).unwrap_or(i32::MAX),
            writer_descriptor: descriptor.map_or(-1, Descriptor::as_raw),
            filename_len: u32::try_from(filename_len).unwrap_or(u32::MAX),
            reserved: 0,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..8].copy_from_slice(&self.num_states.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.num_actions.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.writer_descriptor.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.filename_len.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.reserved.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Self {
        let i64_at = |at: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&bytes[at..at + 8]);
            i64::from_le_bytes(raw)
        };
        let u32_at = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        Self {
            num_states: i64_at(0),
            num_actions: u32_at(8) as i32,
            writer_descriptor: u32_at(12) as i32,
            filename_len: u32_at(16),
            reserved: u32_at(20),
        }
    }

    /// Validated `(num_states, num_actions)` pair.
    fn dimensions(&self, path: &Path) -> Result<(u64, u32)> {
        match (u64::try_from(self.num_states), u32::try_from(self.num_actions)) {
            (Ok(num_states), Ok(num_actions)) => Ok((num_states, num_actions)),
            _ => Err(Error::CorruptFile {
                path: path.to_path_buf(),
                reason: format!(
                    "negative dimensions in header: {} states, {} actions",
                    self.num_states, self.num_actions
                ),
            }),
        }
    }
}

/// Write `record` in table-file form.
///
/// `descriptor` is recorded as opaque bookkeeping; pass `None` when the
/// record is not registered.
pub fn encode<W: Write>(
    writer: &mut W,
    record: &TableRecord,
    descriptor: Option<Descriptor>,
) -> io::Result<()> {
    let header = TableHeader::for_record(record, descriptor);
    writer.write_all(&header.to_bytes())?;

    let mut chunk = Vec::with_capacity(CHUNK_CELLS.min(record.matrix().len()) * CELL_LEN);
    for cells in record.matrix().values().chunks(CHUNK_CELLS) {
        chunk.clear();
        for value in cells {
            chunk.extend_from_slice(&value.to_le_bytes());
        }
        writer.write_all(&chunk)?;
    }
    Ok(())
}

/// Encode `record` into an in-memory buffer.
pub fn encode_to_vec(record: &TableRecord, descriptor: Option<Descriptor>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + record.matrix().len() * CELL_LEN);
    // Writing to a Vec cannot fail.
    let _ = encode(&mut bytes, record, descriptor);
    bytes
}

/// Read a table from `reader`.
///
/// `path` becomes the decoded record's filename; whatever the writer stored
/// in the header bookkeeping is discarded.
pub fn decode<R: Read>(reader: &mut R, path: &Path) -> Result<TableRecord> {
    let mut raw_header = [0u8; HEADER_LEN];
    read_exact_or_corrupt(reader, &mut raw_header, path, "header")?;
    let header = TableHeader::from_bytes(&raw_header);
    let (num_states, num_actions) = header.dimensions(path)?;

    let (mut values, cells) = QMatrix::allocate(num_states, num_actions)?;
    let mut chunk = vec![0u8; CHUNK_CELLS.min(cells) * CELL_LEN];
    while values.len() < cells {
        let take = (cells - values.len()).min(CHUNK_CELLS);
        let buf = &mut chunk[..take * CELL_LEN];
        read_exact_or_corrupt(reader, buf, path, "payload")?;
        values.extend(
            buf.chunks_exact(CELL_LEN)
                .map(|cell| f32::from_le_bytes([cell[0], cell[1], cell[2], cell[3]])),
        );
    }

    let matrix = QMatrix::from_values(num_states, num_actions, values).ok_or_else(|| {
        Error::CorruptFile {
            path: path.to_path_buf(),
            reason: "payload length does not match header".to_string(),
        }
    })?;
    Ok(TableRecord::new(path, matrix))
}

fn read_exact_or_corrupt<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    path: &Path,
    section: &str,
) -> Result<()> {
    reader.read_exact(buf).map_err(|source| {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            Error::CorruptFile {
                path: path.to_path_buf(),
                reason: format!("{section} is shorter than declared"),
            }
        } else {
            Error::Io {
                operation: format!("read {section} of {path:?}"),
                source,
            }
        }
    })
}
