//! Index query phase
//!
//! Resolves an ordered batch of keys in parallel. Each key walks the
//! pipeline independently: cache probe, shard hash, directory resolve,
//! chunk scan, then candidate verification against the main data file.
//! Failures are recorded per key — the batch always drains fully.

use tracing::{debug, warn};

use crate::datafile::DataFileReader;
use crate::error::{LodeError, Result};
use crate::hash::{key_hash, shard_of};
use crate::pool;

use super::Index;

impl Index {
    /// Resolve every key in the batch, publishing answers at positions
    /// `[start_index, start_index + keys.len())`. Blocks until all keys are
    /// resolved; the previous batch's answers are discarded.
    ///
    /// Not-found and per-key failures record an empty string at the key's
    /// position — sibling keys are unaffected. Read results back with
    /// [`Index::answer`].
    pub fn query(&self, keys: &[String], start_index: usize) {
        self.answers.lock().clear();
        let batch: Vec<(usize, String)> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (start_index + i, key.clone()))
            .collect();
        pool::for_each_bounded(self.config.max_concurrency, batch, |(position, key)| {
            if let Err(e) = self.resolve(&key, position) {
                warn!(key = %key, position, error = %e, "query resolved to not-found");
            }
        });
    }

    /// Resolve one key at one position. Every failure path records the
    /// empty-string answer before returning the error.
    fn resolve(&self, key: &str, position: usize) -> Result<()> {
        // 1. recency cache
        if let Some(cache) = &self.cache {
            if let Some(value) = cache.get(key) {
                debug!(key, "cache hit");
                self.record_answer(position, value);
                return Ok(());
            }
        }

        // 2. shard directory
        let hash = key_hash(key.as_bytes());
        let shard = shard_of(hash, self.config.chunk_num);
        let chunk = self.directory.lock().access(shard);
        let Some(chunk) = chunk else {
            self.record_answer(position, String::new());
            return Err(LodeError::ShardMissing(shard));
        };

        // 3. chunk scan for candidate offsets
        let offsets = {
            let _shard_guard = self.shard_locks[shard as usize].lock();
            match chunk.lookup(hash) {
                Ok(offsets) => offsets,
                Err(e) => {
                    self.record_answer(position, String::new());
                    return Err(e);
                }
            }
        };

        // 4. verify candidates against the main data file
        match self.verify_candidates(key, &offsets) {
            Ok(value) => {
                self.record_answer(position, value.clone());
                if let Some(cache) = &self.cache {
                    cache.put(key.to_string(), value);
                }
                Ok(())
            }
            Err(e) => {
                self.record_answer(position, String::new());
                Err(e)
            }
        }
    }

    /// Walk candidate offsets in insertion order; the first record whose
    /// key matches byte-for-byte wins. Size bounds are enforced before the
    /// key comparison — an out-of-bounds size means the offset points at
    /// garbage, not at a record.
    fn verify_candidates(&self, key: &str, offsets: &[u64]) -> Result<String> {
        let mut reader = DataFileReader::open(&self.config.data_file)?;
        for &offset in offsets {
            let ((key_size, record_key), (value_size, record_value)) =
                reader.record_at(offset)?;

            if key_size < self.config.min_key_size || key_size > self.config.max_key_size {
                return Err(LodeError::Corruption(format!(
                    "key size {} out of bounds at offset {}",
                    key_size, offset
                )));
            }
            if value_size < self.config.min_value_size
                || value_size > self.config.max_value_size
            {
                return Err(LodeError::Corruption(format!(
                    "value size {} out of bounds at offset {}",
                    value_size, offset
                )));
            }

            if record_key == key.as_bytes() {
                let value = String::from_utf8(record_value).map_err(|e| {
                    LodeError::Corruption(format!(
                        "value at offset {} is not valid UTF-8: {}",
                        offset, e
                    ))
                })?;
                return Ok(value);
            }
        }
        Err(LodeError::KeyNotFound)
    }
}
