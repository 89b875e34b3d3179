//! Chunk Module
//!
//! One shard's durable append log of (keyHash, offset) records.
//!
//! ## Responsibilities
//! - Append 16-byte records in insertion order
//! - Linear scan by keyHash, returning all matching offsets
//!
//! ## File Format
//! ```text
//! ┌───────────────────────────────┐
//! │ Record 1                      │
//! │ ┌─────────────┬─────────────┐ │
//! │ │ keyHash (8) │ offset (8)  │ │
//! │ └─────────────┴─────────────┘ │
//! ├───────────────────────────────┤
//! │ Record 2                      │
//! │ ...                           │
//! └───────────────────────────────┘
//! ```
//!
//! No header, no in-memory index: every lookup re-scans the file from the
//! start. Chunk size is bounded by the shard count (on average
//! `total keys / chunk_num` records), which is the cost-control lever for
//! the scan.
//!
//! Multiple records may carry the same keyHash (hash collisions across
//! distinct keys), so a lookup returns candidate offsets, not a single
//! value; the index verifies candidates against the main data file.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::datafile::{decode_u64_field, encode_u64_field, SIZE_FIELD_LEN};
use crate::error::{LodeError, Result};

/// Width of one chunk record: keyHash field + offset field
pub const CHUNK_RECORD_LEN: usize = 2 * SIZE_FIELD_LEN;

/// A shard's on-disk append log
///
/// The file handle is interior-mutable so a `Chunk` can be shared through
/// the directory; cross-call ordering (append ordering within a shard,
/// scan-vs-append exclusion) is the per-shard lock's job, not this mutex's.
pub struct Chunk {
    id: u32,
    path: PathBuf,
    file: Mutex<File>,
}

impl Chunk {
    /// Open (or create) the chunk file for the given shard id
    pub fn open(dir: &Path, id: u32) -> Result<Self> {
        let path = Self::chunk_path(dir, id);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;
        Ok(Self {
            id,
            path,
            file: Mutex::new(file),
        })
    }

    /// Shard id this chunk belongs to
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Path of the chunk file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deterministic chunk file name for a shard id
    pub fn chunk_path(dir: &Path, id: u32) -> PathBuf {
        dir.join(format!("chunk_{:06}.log", id))
    }

    /// Append one (keyHash, offset) record.
    ///
    /// Flushes and re-reads the file size first, then seeks to the end, so
    /// the append lands after every record already on disk. An I/O failure
    /// here is fatal to the build phase: a silently missing record would
    /// break lookups later.
    pub fn append(&self, key_hash: u32, offset: u64) -> Result<()> {
        let mut file = self.file.lock();
        file.sync_data()?;
        let end = file.metadata()?.len();
        file.seek(SeekFrom::Start(end))?;

        let mut record = [0u8; CHUNK_RECORD_LEN];
        record[..SIZE_FIELD_LEN].copy_from_slice(&encode_u64_field(key_hash as u64)?);
        record[SIZE_FIELD_LEN..].copy_from_slice(&encode_u64_field(offset)?);
        file.write_all(&record)?;

        trace!(chunk = self.id, key_hash, offset, "appended chunk record");
        Ok(())
    }

    /// Collect the offsets of every record whose hash field equals
    /// `key_hash`, in insertion order. The result may be empty.
    pub fn lookup(&self, key_hash: u32) -> Result<Vec<u64>> {
        let mut file = self.file.lock();
        file.sync_data()?;
        let len = file.metadata()?.len();
        file.seek(SeekFrom::Start(0))?;

        let mut offsets = Vec::new();
        let mut hash_field = [0u8; SIZE_FIELD_LEN];
        let mut offset_field = [0u8; SIZE_FIELD_LEN];
        let mut pos = 0u64;
        while pos < len {
            if pos + CHUNK_RECORD_LEN as u64 > len {
                return Err(LodeError::Corruption(format!(
                    "truncated record at byte {} of chunk {}",
                    pos, self.id
                )));
            }
            file.read_exact(&mut hash_field)?;
            file.read_exact(&mut offset_field)?;
            if decode_u64_field(&hash_field)? == key_hash as u64 {
                offsets.push(decode_u64_field(&offset_field)?);
            }
            pos += CHUNK_RECORD_LEN as u64;
        }

        debug!(chunk = self.id, key_hash, candidates = offsets.len(), "chunk scan");
        Ok(offsets)
    }
}
