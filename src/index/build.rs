//! Index build phase
//!
//! One sequential scan of the main data file populates the shard directory:
//! every key's (keyHash, offset) record lands in the chunk owned by
//! `hash % chunk_num`. Any failure while scanning, creating a chunk, or
//! appending aborts the build — a partially populated directory would serve
//! wrong not-found answers, so no partial index is ever returned.

use std::collections::HashMap;
use std::fs;

use parking_lot::Mutex;
use tracing::{error, info};

use crate::cache::RecencyCache;
use crate::chunk::Chunk;
use crate::config::Config;
use crate::datafile::DataFileReader;
use crate::directory::ShardDirectory;
use crate::error::{LodeError, Result};
use crate::hash::{key_hash, shard_of};
use crate::pool;

use super::Index;

/// One key's index record, ready to append
struct BuildEntry {
    shard: u32,
    key_hash: u32,
    offset: u64,
}

impl Index {
    /// Build an index over the configured data file.
    ///
    /// `use_cache` enables the recency cache in front of the pipeline;
    /// `use_tree` selects the splay-tree directory backend over the plain
    /// map. Both choices are fixed for the index's lifetime.
    ///
    /// Appends fan out over the bounded worker pool, routed by shard id so
    /// all appends to one shard run on one worker in data file order.
    /// First-touch chunk creation is serialized by the directory-wide lock
    /// (first creator wins); each append holds its shard's lock.
    pub fn build(config: Config, use_cache: bool, use_tree: bool) -> Result<Index> {
        info!(
            data_file = %config.data_file.display(),
            chunk_num = config.chunk_num,
            use_cache,
            use_tree,
            "building index"
        );
        fs::create_dir_all(&config.chunk_dir)?;

        // scan phase: every record's key is hashed and routed to its shard
        let mut reader = DataFileReader::open(&config.data_file)?;
        let mut entries = Vec::new();
        while let Some(record) = reader.next_record()? {
            let hash = key_hash(&record.key);
            entries.push(BuildEntry {
                shard: shard_of(hash, config.chunk_num),
                key_hash: hash,
                offset: record.offset,
            });
        }
        let total = entries.len();

        let directory = Mutex::new(ShardDirectory::new(use_tree));
        let shard_locks: Box<[Mutex<()>]> = (0..config.chunk_num)
            .map(|_| Mutex::new(()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        // append phase: the first failure is kept and fails the whole build
        let failure: Mutex<Option<LodeError>> = Mutex::new(None);
        pool::for_each_routed(
            config.max_concurrency,
            entries,
            |entry| entry.shard as usize,
            |entry| {
                if failure.lock().is_some() {
                    return;
                }
                if let Err(e) = append_entry(&config, &directory, &shard_locks, &entry) {
                    error!(shard = entry.shard, error = %e, "chunk append failed");
                    let mut slot = failure.lock();
                    if slot.is_none() {
                        *slot = Some(e);
                    }
                }
            },
        );
        if let Some(e) = failure.into_inner() {
            return Err(e);
        }

        info!(records = total, shards = directory.lock().len(), "index built");
        let cache = use_cache.then(|| RecencyCache::new(config.cache_size));
        Ok(Index {
            config,
            cache,
            directory,
            shard_locks,
            answers: Mutex::new(HashMap::new()),
        })
    }
}

fn append_entry(
    config: &Config,
    directory: &Mutex<ShardDirectory>,
    shard_locks: &[Mutex<()>],
    entry: &BuildEntry,
) -> Result<()> {
    // first-touch creation under the directory-wide lock, separate from the
    // per-shard lock so unrelated shards keep appending while one is created
    let chunk = directory
        .lock()
        .get_or_create(entry.shard, || Chunk::open(&config.chunk_dir, entry.shard))?;

    let _shard_guard = shard_locks[entry.shard as usize].lock();
    chunk.append(entry.key_hash, entry.offset)
}
