//! Data file reader
//!
//! Sequential scan for the build phase and random-offset record reads for
//! query verification.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{LodeError, Result};

use super::record::{decode_u64_field, SIZE_FIELD_LEN};

/// A record pulled off the data file during a sequential scan
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedRecord {
    /// Byte offset at which the record (its key size field) begins
    pub offset: u64,
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

/// Reads size-prefixed key/value records from the main data file
pub struct DataFileReader {
    file: File,
    len: u64,
    pos: u64,
}

impl DataFileReader {
    /// Open the data file read-only
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self { file, len, pos: 0 })
    }

    /// Total file length in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read the next record in sequence, or `None` at end of file.
    ///
    /// A record that starts before the end of the file but cannot be fully
    /// decoded is a corruption error, not a clean end.
    pub fn next_record(&mut self) -> Result<Option<ScannedRecord>> {
        if self.pos >= self.len {
            return Ok(None);
        }
        let offset = self.pos;
        let (_, key) = self.read_sized()?;
        let (_, value) = self.read_sized()?;
        Ok(Some(ScannedRecord { offset, key, value }))
    }

    /// Read the record starting at `offset`, returning `(key, value)` with
    /// their decoded sizes.
    ///
    /// Repositions the sequential cursor; callers interleaving scans and
    /// offset reads should use separate readers.
    pub fn record_at(&mut self, offset: u64) -> Result<((u64, Vec<u8>), (u64, Vec<u8>))> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.pos = offset;
        let key = self.read_sized()?;
        let value = self.read_sized()?;
        Ok((key, value))
    }

    /// Read one `size field | content` unit at the cursor.
    fn read_sized(&mut self) -> Result<(u64, Vec<u8>)> {
        let mut field = [0u8; SIZE_FIELD_LEN];
        self.file.read_exact(&mut field).map_err(|e| {
            LodeError::Corruption(format!("truncated size field at offset {}: {}", self.pos, e))
        })?;
        let size = decode_u64_field(&field)?;
        let mut content = vec![0u8; size as usize];
        self.file.read_exact(&mut content).map_err(|e| {
            LodeError::Corruption(format!(
                "truncated content of {} bytes at offset {}: {}",
                size,
                self.pos + SIZE_FIELD_LEN as u64,
                e
            ))
        })?;
        self.pos += SIZE_FIELD_LEN as u64 + size;
        Ok((size, content))
    }
}
