//! Data file writer
//!
//! Producer side of the main data file. The core engine only consumes the
//! file, but tests, benches, and upstream ingest need a writer that hands
//! back the offset each record began at — that offset is what the chunk logs
//! record.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;

use super::record::{encode_u64_field, SIZE_FIELD_LEN};

/// Appends size-prefixed key/value records to the main data file
pub struct DataFileWriter {
    file: File,
    pos: u64,
}

impl DataFileWriter {
    /// Create the data file, truncating any previous contents
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self { file, pos: 0 })
    }

    /// Open the data file for appending, keeping existing records
    pub fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().write(true).create(true).append(true).open(path)?;
        let pos = file.metadata()?.len();
        Ok(Self { file, pos })
    }

    /// Append one record and return the offset it begins at
    pub fn append(&mut self, key: &[u8], value: &[u8]) -> Result<u64> {
        let offset = self.pos;
        let mut record =
            Vec::with_capacity(2 * SIZE_FIELD_LEN + key.len() + value.len());
        record.extend_from_slice(&encode_u64_field(key.len() as u64)?);
        record.extend_from_slice(key);
        record.extend_from_slice(&encode_u64_field(value.len() as u64)?);
        record.extend_from_slice(value);
        self.file.write_all(&record)?;
        self.pos += record.len() as u64;
        Ok(offset)
    }

    /// Current end-of-file position (the offset the next record would get)
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Flush buffered writes and fsync
    pub fn sync(&mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_data()?;
        Ok(())
    }
}
