//! Index Module
//!
//! The orchestrator that ties the lookup pipeline together.
//!
//! ## Lookup Pipeline
//!
//! ```text
//! ┌──────────────┐     ┌─────────────────┐     ┌───────────┐     ┌────────────┐
//! │ RecencyCache │ ──▶ │ ShardDirectory  │ ──▶ │   Chunk   │ ──▶ │ Data File  │
//! │  (LRU, opt.) │miss │ (map or splay)  │     │ hash scan │     │ key verify │
//! └──────────────┘     └─────────────────┘     └───────────┘     └────────────┘
//! ```
//!
//! ## Responsibilities
//! - Build: one sequential pass over the data file, recording every key's
//!   (keyHash, offset) into the owning shard's chunk
//! - Query: resolve batches of keys in parallel through the pipeline above,
//!   publishing answers into a shared positional result map
//! - Guard shared state: the directory behind one lock, appends/scans behind
//!   per-shard locks, answers behind the result lock
//!
//! ## Concurrency Model
//!
//! Both phases fan work out over a bounded worker pool and join before
//! returning. Build work is routed by shard so appends to one shard never
//! interleave; queries are independent and any worker may take any key.
//! One key's failure is recorded at its own position and never disturbs
//! sibling keys in the batch.

mod build;
mod query;

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::cache::RecencyCache;
use crate::config::Config;
use crate::directory::ShardDirectory;

/// Disk-backed key/value lookup index
///
/// Constructed by [`Index::build`]; the directory backend and cache choice
/// are fixed for the index's lifetime.
pub struct Index {
    /// Engine configuration
    config: Config,

    /// Front-end recency cache, when enabled at build time
    cache: Option<RecencyCache>,

    /// Shard id → chunk, behind the directory-wide lock.
    /// The same lock serializes first-touch creation and splay rotations.
    directory: Mutex<ShardDirectory>,

    /// Per-shard locks, indexed by shard id; sized at construction so no
    /// lock is ever created on a lookup path
    shard_locks: Box<[Mutex<()>]>,

    /// Query position → answer; empty string means "not found".
    /// Recreated at the start of every query batch.
    answers: Mutex<HashMap<usize, String>>,
}

impl Index {
    /// Read one answer by query position.
    ///
    /// `Some("")` means the key was queried and not found; `None` means the
    /// position was not part of the last batch. An empty *stored* value is
    /// indistinguishable from not-found — callers must not store empty
    /// values.
    pub fn answer(&self, position: usize) -> Option<String> {
        self.answers.lock().get(&position).cloned()
    }

    /// Snapshot of every answer from the last batch
    pub fn answers(&self) -> HashMap<usize, String> {
        self.answers.lock().clone()
    }

    /// Write one answer; each position is written at most once per batch
    fn record_answer(&self, position: usize, value: String) {
        self.answers.lock().insert(position, value);
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of shards that own at least one record
    pub fn shard_count(&self) -> usize {
        self.directory.lock().len()
    }

    /// Resident entries in the recency cache, if one is enabled
    pub fn cache_len(&self) -> Option<usize> {
        self.cache.as_ref().map(|cache| cache.len())
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
