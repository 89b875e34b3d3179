//! # LodeKV
//!
//! A disk-backed key/value lookup engine:
//! - One append-style data file holds all key/value records
//! - Per-shard chunk logs map key hashes to byte offsets in that file
//! - A shard directory (plain map, or self-adjusting splay tree) resolves
//!   shard ids to chunks
//! - A bounded LRU recency cache short-circuits repeat lookups
//! - Build and query both fan out over a bounded worker pool
//!
//! ## Architecture Overview
//!
//! ```text
//!                    ┌─────────────────────────────────┐
//!                    │             Index               │
//!                    │   (build / query orchestration) │
//!                    └───────┬─────────────────┬───────┘
//!                            │                 │
//!              ┌─────────────▼──┐      ┌───────▼────────┐
//!              │ Recency Cache  │      │ ShardDirectory │
//!              │  (LRU, opt.)   │      │ (map or splay) │
//!              └────────────────┘      └───────┬────────┘
//!                                              │
//!                                      ┌───────▼────────┐
//!                                      │     Chunk      │
//!                                      │ (keyHash, off) │
//!                                      └───────┬────────┘
//!                                              │
//!                                      ┌───────▼────────┐
//!                                      │   Data File    │
//!                                      │ (size-prefixed │
//!                                      │   kv records)  │
//!                                      └────────────────┘
//! ```
//!
//! Queries walk top to bottom: a cache hit answers immediately; otherwise
//! the key's hash selects a shard, the directory resolves the shard's
//! chunk, the chunk scan yields candidate offsets, and the data file read
//! verifies the exact key. Build walks bottom-up once, appending every
//! record's (keyHash, offset) into the owning shard's chunk.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod hash;
pub mod datafile;
pub mod chunk;
pub mod cache;
pub mod splay;
pub mod directory;
pub mod pool;
pub mod index;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LodeError, Result};
pub use config::Config;
pub use index::Index;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of LodeKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
