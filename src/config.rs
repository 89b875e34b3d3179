//! Configuration for LodeKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a LodeKV index
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path to the main data file (size-prefixed key/value records)
    pub data_file: PathBuf,

    /// Directory holding the per-shard chunk files
    /// Internal structure:
    ///   {chunk_dir}/
    ///     ├── chunk_000000.log
    ///     ├── chunk_000001.log
    ///     └── ...
    pub chunk_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Sharding Configuration
    // -------------------------------------------------------------------------
    /// Number of shards; shard id = hash(key) % chunk_num.
    /// Average chunk length is total keys / chunk_num, which bounds the cost
    /// of the linear chunk scan done on every lookup.
    pub chunk_num: u32,

    // -------------------------------------------------------------------------
    // Cache Configuration
    // -------------------------------------------------------------------------
    /// Recency cache capacity (entries), used when the cache is enabled
    pub cache_size: usize,

    // -------------------------------------------------------------------------
    // Concurrency Configuration
    // -------------------------------------------------------------------------
    /// Upper bound on worker threads for build and query fan-out
    pub max_concurrency: usize,

    // -------------------------------------------------------------------------
    // Record Bounds
    // -------------------------------------------------------------------------
    /// Smallest key size accepted when verifying records (bytes)
    pub min_key_size: u64,

    /// Largest key size accepted when verifying records (bytes)
    pub max_key_size: u64,

    /// Smallest value size accepted when verifying records (bytes)
    pub min_value_size: u64,

    /// Largest value size accepted when verifying records (bytes)
    pub max_value_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("./alldata"),
            chunk_dir: PathBuf::from("./chunks"),
            chunk_num: 1000,
            cache_size: 1000,
            max_concurrency: 64,
            min_key_size: 1,
            max_key_size: 1024,
            min_value_size: 1,
            max_value_size: 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the main data file path
    pub fn data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_file = path.into();
        self
    }

    /// Set the directory for chunk files
    pub fn chunk_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.chunk_dir = path.into();
        self
    }

    /// Set the number of shards
    pub fn chunk_num(mut self, count: u32) -> Self {
        self.config.chunk_num = count;
        self
    }

    /// Set the recency cache capacity (entries)
    pub fn cache_size(mut self, size: usize) -> Self {
        self.config.cache_size = size;
        self
    }

    /// Set the worker pool bound
    pub fn max_concurrency(mut self, limit: usize) -> Self {
        self.config.max_concurrency = limit;
        self
    }

    /// Set the accepted key size range (bytes)
    pub fn key_size_bounds(mut self, min: u64, max: u64) -> Self {
        self.config.min_key_size = min;
        self.config.max_key_size = max;
        self
    }

    /// Set the accepted value size range (bytes)
    pub fn value_size_bounds(mut self, min: u64, max: u64) -> Self {
        self.config.min_value_size = min;
        self.config.max_value_size = max;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
