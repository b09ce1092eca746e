//! The owning tree type and its node handles.
//!
//! [`RbTree`] keeps its nodes in an [`Arena`] and hands out [`NodeId`]s. A
//! handle names one node of one tree; foreign, stale and erased handles are
//! rejected with [`RbError::InvalidNodeReference`].

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace, warn};

use crate::arena::Arena;
use crate::config::RbTreeConfig;
use crate::error::RbError;
use crate::red_black::{self, RbNode};
use crate::types::{Color, Node, NIL};
use crate::util::{self, first, get_l, get_p, get_r, last, next, prev};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a node of one particular [`RbTree`].
///
/// A handle stays valid until its own node is erased or the tree is cleared.
/// Erasing some other node never changes which key a live handle refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Arena slot of the node. Slots are reused after erase.
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// Red-black tree of ordered keys.
///
/// Nodes live in an arena owned by the tree; all links are arena indices and
/// slot 0 is the shared black sentinel. Equal keys are kept in insertion
/// order.
#[derive(Debug)]
pub struct RbTree<K> {
    arena: Arena<RbNode<K>>,
    root: u32,
    id: u64,
    config: RbTreeConfig,
}

impl<K> RbTree<K> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: NIL,
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            config: RbTreeConfig::default(),
        }
    }

    /// Creates a tree with fallible up-front allocation.
    pub fn with_config(config: RbTreeConfig) -> Result<Self, RbError> {
        let arena = Arena::with_capacity(config.initial_capacity, config.max_nodes)?;
        let id = NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed);
        debug!(
            "tree {id} created with capacity {} and node limit {:?}",
            config.initial_capacity, config.max_nodes
        );
        Ok(Self {
            arena,
            root: NIL,
            id,
            config,
        })
    }

    pub fn config(&self) -> &RbTreeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    fn handle(&self, idx: u32) -> Option<NodeId> {
        self.arena.generation(idx).map(|generation| NodeId {
            tree: self.id,
            index: idx,
            generation,
        })
    }

    fn resolve(&self, id: NodeId) -> Result<u32, RbError> {
        if id.tree == self.id && self.arena.generation(id.index) == Some(id.generation) {
            Ok(id.index)
        } else {
            Err(RbError::InvalidNodeReference)
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.handle(self.root)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.resolve(id).is_ok()
    }

    pub fn key(&self, id: NodeId) -> Option<&K> {
        let idx = self.resolve(id).ok()?;
        self.arena.node(idx).map(|n| &n.k)
    }

    pub fn color(&self, id: NodeId) -> Option<Color> {
        let idx = self.resolve(id).ok()?;
        self.arena.node(idx).map(|n| n.color)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id).ok()?;
        self.handle(get_p(&self.arena, idx))
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id).ok()?;
        self.handle(get_l(&self.arena, idx))
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id).ok()?;
        self.handle(get_r(&self.arena, idx))
    }

    /// Next node in key order.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id).ok()?;
        self.handle(next(&self.arena, idx))
    }

    /// Previous node in key order.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.resolve(id).ok()?;
        self.handle(prev(&self.arena, idx))
    }

    pub fn min(&self) -> Result<NodeId, RbError> {
        self.handle(first(&self.arena, self.root))
            .ok_or(RbError::EmptyTree)
    }

    pub fn max(&self) -> Result<NodeId, RbError> {
        self.handle(last(&self.arena, self.root))
            .ok_or(RbError::EmptyTree)
    }

    /// Nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    /// Black nodes on every root-to-sentinel path, root included.
    pub fn black_height(&self) -> usize {
        red_black::black_height(&self.arena, self.root)
    }

    /// Removes the node behind `id` and returns its key.
    pub fn erase(&mut self, id: NodeId) -> Result<K, RbError> {
        let idx = self.resolve(id)?;
        trace!("tree {}: erase node {idx}", self.id);
        self.root = red_black::remove(&mut self.arena, self.root, idx);
        self.arena
            .release(idx)
            .map(|n| n.k)
            .ok_or(RbError::InvalidNodeReference)
    }

    /// Releases every node, children before parents.
    pub fn clear(&mut self) {
        let released = self.arena.len();
        let mut curr = self.root;
        while curr != NIL {
            let l = get_l(&self.arena, curr);
            if l != NIL {
                curr = l;
                continue;
            }
            let r = get_r(&self.arena, curr);
            if r != NIL {
                curr = r;
                continue;
            }
            let p = get_p(&self.arena, curr);
            if let Some(parent) = self.arena.node_mut(p) {
                if parent.l() == curr {
                    parent.set_l(NIL);
                } else {
                    parent.set_r(NIL);
                }
            }
            self.arena.release(curr);
            curr = p;
        }
        self.root = NIL;
        if released > 0 {
            debug!("tree {}: released {released} nodes", self.id);
        }
    }

    fn in_order(&self) -> InOrder<'_, K> {
        InOrder {
            arena: &self.arena,
            curr: first(&self.arena, self.root),
        }
    }

    /// Writes every key in ascending order into `out` and returns how many
    /// were written.
    pub fn export_sorted(&self, out: &mut [K]) -> Result<usize, RbError>
    where
        K: Clone,
    {
        if self.is_empty() {
            return Err(RbError::EmptyTree);
        }
        if out.len() < self.len() {
            return Err(RbError::BufferTooSmall {
                capacity: out.len(),
                len: self.len(),
            });
        }
        let mut count = 0;
        for (slot, key) in out.iter_mut().zip(self.in_order()) {
            slot.clone_from(key);
            count += 1;
        }
        Ok(count)
    }

    /// All keys in ascending order; empty for an empty tree.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.in_order().cloned().collect()
    }

    /// Multi-line dump of the tree, see [`red_black::print`].
    pub fn print(&self) -> String
    where
        K: Debug,
    {
        red_black::print(&self.arena, self.root)
    }
}

impl<K: Ord> RbTree<K> {
    /// Inserts `key` and returns the handle of its new node. Equal keys are
    /// placed after the ones already present.
    pub fn insert(&mut self, key: K) -> Result<NodeId, RbError> {
        let idx = self.arena.alloc(RbNode::new(key)).inspect_err(|_| {
            warn!("tree {}: insert failed, {} nodes live", self.id, self.arena.len());
        })?;
        trace!("tree {}: insert node {idx}", self.id);
        self.root = red_black::insert(&mut self.arena, self.root, idx);
        self.handle(idx).ok_or(RbError::AllocationFailure)
    }

    pub fn find(&self, key: &K) -> Option<NodeId> {
        self.handle(util::find(&self.arena, self.root, key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Erases the node [`find`](Self::find) would return for `key`.
    pub fn remove(&mut self, key: &K) -> Result<K, RbError> {
        let id = self.find(key).ok_or(RbError::NotFound)?;
        self.erase(id)
    }

    /// Checks every red-black invariant, the key order and the parent links.
    pub fn assert_valid(&self) -> Result<(), String> {
        red_black::assert_red_black_tree(&self.arena, self.root)
    }
}

impl<K> Default for RbTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for RbTree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

struct InOrder<'a, K> {
    arena: &'a Arena<RbNode<K>>,
    curr: u32,
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let node = arena.node(self.curr)?;
        self.curr = next(arena, self.curr);
        Some(&node.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_releases_post_order() {
        let mut tree = RbTree::new();
        let ids: Vec<NodeId> = (0..32).map(|k| tree.insert(k).unwrap()).collect();
        assert_eq!(tree.len(), 32);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), None);
        assert!(ids.iter().all(|id| !tree.contains_node(*id)));
        tree.assert_valid().unwrap();

        tree.insert(5).unwrap();
        assert_eq!(tree.to_vec(), vec![5]);
    }

    #[test]
    fn test_foreign_handle_is_rejected() {
        let mut a = RbTree::new();
        let mut b = RbTree::new();
        let ia = a.insert(1).unwrap();
        let ib = b.insert(1).unwrap();
        assert_eq!(ia.index(), ib.index());
        assert_eq!(a.erase(ib), Err(RbError::InvalidNodeReference));
        assert_eq!(a.len(), 1);
        assert_eq!(b.erase(ib), Ok(1));
    }

    #[test]
    fn test_sentinel_links_are_none() {
        let mut tree = RbTree::new();
        let id = tree.insert(1).unwrap();
        assert_eq!(tree.parent(id), None);
        assert_eq!(tree.left(id), None);
        assert_eq!(tree.right(id), None);
        assert_eq!(tree.successor(id), None);
        assert_eq!(tree.predecessor(id), None);
    }
}
