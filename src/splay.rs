//! Splay Tree Module
//!
//! A self-adjusting binary search tree: every found or inserted node is
//! rotated to the root, so under skewed access patterns the hot keys settle
//! near the top and their access paths shrink. The shard directory uses
//! this as its adaptive-locality backend — frequently queried shards become
//! cheap to reach.
//!
//! ## Node Storage
//!
//! Nodes live in a growable arena (`Vec`) and reference each other by index.
//! Rotations rewrite indices in both directions (child links and the parent
//! back-link), which an arena makes a plain swap with no aliasing concerns.
//! Nodes are never removed: the tree backs a directory whose entries live
//! for the process lifetime.
//!
//! ## Rotation Cases
//!
//! Splaying a node repeats one of three mutually exclusive steps until the
//! node is the root:
//! - **zig**: the parent is the root — rotate the node over it once;
//! - **zig-zig**: node and parent are same-side children — rotate the parent
//!   over the grandparent first, then the node over the parent;
//! - **zig-zag**: node and parent are opposite-side children — rotate the
//!   node twice.
//!
//! Every rotation preserves the in-order key sequence.

/// Arena index of a tree node
pub type NodeId = usize;

struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Self-adjusting binary search tree over `K`, with arena-allocated nodes
pub struct SplayTree<K: Ord, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K: Ord, V> SplayTree<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current root node, if any
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Key of a node
    pub fn key(&self, id: NodeId) -> &K {
        &self.nodes[id].key
    }

    /// Value of a node
    pub fn value(&self, id: NodeId) -> &V {
        &self.nodes[id].value
    }

    /// Standard BST descent; does not mutate the tree.
    pub fn find(&self, key: &K) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match key.cmp(&node.key) {
                std::cmp::Ordering::Less => node.left,
                std::cmp::Ordering::Equal => return Some(id),
                std::cmp::Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Find a node and, if present, splay it to the root.
    ///
    /// Lookups for absent keys leave the tree untouched: splaying operates
    /// on an existing node, so a miss rotates nothing.
    pub fn access(&mut self, key: &K) -> Option<NodeId> {
        let id = self.find(key)?;
        self.splay(id);
        Some(id)
    }

    /// Insert a new key, attach it as a leaf at its BST position, and splay
    /// it to the root. Returns the new node's id.
    ///
    /// # Panics
    ///
    /// Panics if the key is already present. The directory never inserts a
    /// shard twice; a duplicate here is a build-phase bug, not a runtime
    /// condition.
    pub fn insert(&mut self, key: K, value: V) -> NodeId {
        let id = self.nodes.len();
        match self.root {
            None => {
                self.nodes.push(Node {
                    key,
                    value,
                    parent: None,
                    left: None,
                    right: None,
                });
                self.root = Some(id);
                return id;
            }
            Some(mut cur) => loop {
                let node = &self.nodes[cur];
                match key.cmp(&node.key) {
                    std::cmp::Ordering::Equal => {
                        panic!("splay tree: duplicate key insert")
                    }
                    std::cmp::Ordering::Less => match node.left {
                        Some(next) => cur = next,
                        None => {
                            self.nodes.push(Node {
                                key,
                                value,
                                parent: Some(cur),
                                left: None,
                                right: None,
                            });
                            self.nodes[cur].left = Some(id);
                            break;
                        }
                    },
                    std::cmp::Ordering::Greater => match node.right {
                        Some(next) => cur = next,
                        None => {
                            self.nodes.push(Node {
                                key,
                                value,
                                parent: Some(cur),
                                left: None,
                                right: None,
                            });
                            self.nodes[cur].right = Some(id);
                            break;
                        }
                    },
                }
            },
        }
        self.splay(id);
        id
    }

    /// Keys in BST order — structurally invariant across rotations
    pub fn keys_in_order(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk_in_order(self.root, &mut out);
        out
    }

    /// Keys in pre-order — exposes the tree shape, for diagnostics and tests
    pub fn keys_pre_order(&self) -> Vec<&K> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk_pre_order(self.root, &mut out);
        out
    }

    fn walk_in_order<'a>(&'a self, cur: Option<NodeId>, out: &mut Vec<&'a K>) {
        if let Some(id) = cur {
            self.walk_in_order(self.nodes[id].left, out);
            out.push(&self.nodes[id].key);
            self.walk_in_order(self.nodes[id].right, out);
        }
    }

    fn walk_pre_order<'a>(&'a self, cur: Option<NodeId>, out: &mut Vec<&'a K>) {
        if let Some(id) = cur {
            out.push(&self.nodes[id].key);
            self.walk_pre_order(self.nodes[id].left, out);
            self.walk_pre_order(self.nodes[id].right, out);
        }
    }

    // =========================================================================
    // Rotations
    // =========================================================================

    /// Rotate `id` until it is the root.
    fn splay(&mut self, id: NodeId) {
        while let Some(parent) = self.nodes[id].parent {
            match self.nodes[parent].parent {
                // zig: parent is the root
                None => self.rotate(id),
                Some(grandparent) => {
                    let id_is_left = self.nodes[parent].left == Some(id);
                    let parent_is_left = self.nodes[grandparent].left == Some(parent);
                    if id_is_left == parent_is_left {
                        // zig-zig: straight line — rotate the parent first
                        self.rotate(parent);
                        self.rotate(id);
                    } else {
                        // zig-zag: bend — rotate the node through both links
                        self.rotate(id);
                        self.rotate(id);
                    }
                }
            }
        }
    }

    /// Rotate `id` one level up, re-linking parent, grandparent, and the
    /// subtree that crosses sides. No-op on the root.
    fn rotate(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id].parent else {
            return;
        };
        let grandparent = self.nodes[parent].parent;

        // the child of `id` that switches sides onto the old parent
        let crossing = if self.nodes[parent].left == Some(id) {
            let crossing = self.nodes[id].right;
            self.nodes[parent].left = crossing;
            self.nodes[id].right = Some(parent);
            crossing
        } else {
            let crossing = self.nodes[id].left;
            self.nodes[parent].right = crossing;
            self.nodes[id].left = Some(parent);
            crossing
        };
        if let Some(crossing) = crossing {
            self.nodes[crossing].parent = Some(parent);
        }

        self.nodes[parent].parent = Some(id);
        self.nodes[id].parent = grandparent;
        match grandparent {
            None => self.root = Some(id),
            Some(grandparent) => {
                if self.nodes[grandparent].left == Some(parent) {
                    self.nodes[grandparent].left = Some(id);
                } else {
                    self.nodes[grandparent].right = Some(id);
                }
            }
        }
    }
}

impl<K: Ord, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
