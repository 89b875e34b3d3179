//! Shard Directory Module
//!
//! Maps a shard id to its chunk. Two interchangeable backends, fixed at
//! construction:
//!
//! - **Map**: a plain `HashMap` — constant-time, access-pattern oblivious.
//! - **Tree**: a [`SplayTree`] — every resolved shard is rotated to the
//!   root, so shards that are hit often under a skewed query distribution
//!   stay near the top of the tree.
//!
//! The directory is a single shared mutable structure; the index guards it
//! with one lock for both first-touch creation and splay access (concurrent
//! rotations on overlapping regions of the tree are unsafe).

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::chunk::Chunk;
use crate::error::Result;
use crate::splay::SplayTree;

/// Shard id → chunk mapping, map- or splay-backed
pub enum ShardDirectory {
    Map(HashMap<u32, Arc<Chunk>>),
    Tree(SplayTree<u32, Arc<Chunk>>),
}

impl ShardDirectory {
    /// Create an empty directory with the requested backend
    pub fn new(use_tree: bool) -> Self {
        if use_tree {
            Self::Tree(SplayTree::new())
        } else {
            Self::Map(HashMap::new())
        }
    }

    /// Number of shards that have a chunk
    pub fn len(&self) -> usize {
        match self {
            Self::Map(map) => map.len(),
            Self::Tree(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a shard's chunk. On the tree backend this splays the shard's
    /// node to the root; that self-adjustment is the point of the tree, so
    /// resolution takes `&mut self` on both backends.
    pub fn access(&mut self, shard: u32) -> Option<Arc<Chunk>> {
        match self {
            Self::Map(map) => map.get(&shard).cloned(),
            Self::Tree(tree) => {
                let id = tree.access(&shard)?;
                Some(Arc::clone(tree.value(id)))
            }
        }
    }

    /// Resolve a shard's chunk, creating it with `create` on first touch.
    ///
    /// First creator wins: the caller serializes this with the directory
    /// lock, so a shard's chunk is created exactly once and every later
    /// resolution sees the same chunk.
    pub fn get_or_create(
        &mut self,
        shard: u32,
        create: impl FnOnce() -> Result<Chunk>,
    ) -> Result<Arc<Chunk>> {
        match self {
            Self::Map(map) => {
                if let Some(chunk) = map.get(&shard) {
                    return Ok(Arc::clone(chunk));
                }
                let chunk = Arc::new(create()?);
                map.insert(shard, Arc::clone(&chunk));
                debug!(shard, "created chunk (map directory)");
                Ok(chunk)
            }
            Self::Tree(tree) => {
                if let Some(id) = tree.find(&shard) {
                    return Ok(Arc::clone(tree.value(id)));
                }
                let chunk = Arc::new(create()?);
                let id = tree.insert(shard, Arc::clone(&chunk));
                debug_assert_eq!(tree.root(), Some(id));
                debug!(shard, "created chunk (tree directory)");
                Ok(chunk)
            }
        }
    }
}
