//! Link helpers and read-only traversal over an arena-backed binary tree.
//!
//! Reads through [`NIL`] yield [`NIL`]; writes to [`NIL`] are dropped. That
//! is what lets the sentinel act as a valid link target everywhere.

use crate::arena::Arena;
use crate::types::{KeyNode, Node, Side, NIL};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &Arena<N>, idx: u32) -> u32 {
    arena.node(idx).map_or(NIL, |n| n.p())
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &Arena<N>, idx: u32) -> u32 {
    arena.node(idx).map_or(NIL, |n| n.l())
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &Arena<N>, idx: u32) -> u32 {
    arena.node(idx).map_or(NIL, |n| n.r())
}

#[inline]
pub(crate) fn child<N: Node>(arena: &Arena<N>, idx: u32, side: Side) -> u32 {
    arena.node(idx).map_or(NIL, |n| n.child(side))
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut Arena<N>, idx: u32, v: u32) {
    if let Some(n) = arena.node_mut(idx) {
        n.set_p(v);
    }
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut Arena<N>, idx: u32, v: u32) {
    if let Some(n) = arena.node_mut(idx) {
        n.set_l(v);
    }
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut Arena<N>, idx: u32, v: u32) {
    if let Some(n) = arena.node_mut(idx) {
        n.set_r(v);
    }
}

#[inline]
pub(crate) fn set_child<N: Node>(arena: &mut Arena<N>, idx: u32, side: Side, v: u32) {
    if let Some(n) = arena.node_mut(idx) {
        n.set_child(side, v);
    }
}

/// Which side of `parent` holds `node`.
#[inline]
pub(crate) fn side_of<N: Node>(arena: &Arena<N>, parent: u32, node: u32) -> Side {
    if get_l(arena, parent) == node {
        Side::Left
    } else {
        Side::Right
    }
}

/// Leftmost node under `root`, or [`NIL`].
pub fn first<N: Node>(arena: &Arena<N>, root: u32) -> u32 {
    let mut curr = root;
    while get_l(arena, curr) != NIL {
        curr = get_l(arena, curr);
    }
    curr
}

/// Rightmost node under `root`, or [`NIL`].
pub fn last<N: Node>(arena: &Arena<N>, root: u32) -> u32 {
    let mut curr = root;
    while get_r(arena, curr) != NIL {
        curr = get_r(arena, curr);
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &Arena<N>, node: u32) -> u32 {
    let r = get_r(arena, node);
    if r != NIL {
        return first(arena, r);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while p != NIL && get_r(arena, p) == curr {
        curr = p;
        p = get_p(arena, p);
    }
    p
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &Arena<N>, node: u32) -> u32 {
    let l = get_l(arena, node);
    if l != NIL {
        return last(arena, l);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while p != NIL && get_l(arena, p) == curr {
        curr = p;
        p = get_p(arena, p);
    }
    p
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &Arena<N>, root: u32) -> usize {
    if root == NIL {
        return 0;
    }
    1 + size(arena, get_l(arena, root)) + size(arena, get_r(arena, root))
}

/// Nodes on the longest downward path from `root`.
pub fn height<N: Node>(arena: &Arena<N>, root: u32) -> usize {
    if root == NIL {
        return 0;
    }
    1 + height(arena, get_l(arena, root)).max(height(arena, get_r(arena, root)))
}

/// Finds the first node with an equal key met while descending from `root`.
pub fn find<K, N>(arena: &Arena<N>, root: u32, key: &K) -> u32
where
    K: Ord,
    N: KeyNode<K>,
{
    let mut curr = root;
    while let Some(n) = arena.node(curr) {
        curr = match key.cmp(n.key()) {
            std::cmp::Ordering::Equal => return curr,
            std::cmp::Ordering::Less => n.l(),
            std::cmp::Ordering::Greater => n.r(),
        };
    }
    NIL
}
