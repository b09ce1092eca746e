use log::trace;

use crate::arena::Arena;
use crate::types::{Color, KeyNode, Node, Side, NIL};
use crate::util::{child, first, get_l, get_p, get_r, next, set_child, set_l, set_p, set_r, side_of};

use super::types::RbNodeLike;

#[inline]
fn color<N: RbNodeLike>(arena: &Arena<N>, i: u32) -> Color {
    arena.node(i).map_or(Color::Black, |n| n.color())
}

#[inline]
fn is_black<N: RbNodeLike>(arena: &Arena<N>, i: u32) -> bool {
    color(arena, i) == Color::Black
}

#[inline]
fn is_red<N: RbNodeLike>(arena: &Arena<N>, i: u32) -> bool {
    color(arena, i) == Color::Red
}

/// The sentinel keeps its black color: writes to [`NIL`] are dropped.
#[inline]
fn set_color<N: RbNodeLike>(arena: &mut Arena<N>, i: u32, c: Color) {
    if let Some(n) = arena.node_mut(i) {
        n.set_color(c);
    }
}

/// Rotates `pivot` down toward `dir`, promoting its child on the opposite
/// side. Returns the new root.
///
/// Colors are untouched and in-order ordering is preserved.
pub fn rotate<N: Node>(arena: &mut Arena<N>, mut root: u32, pivot: u32, dir: Side) -> u32 {
    let promoted = child(arena, pivot, dir.opposite());
    debug_assert_ne!(promoted, NIL, "rotation needs a child to promote");
    let inner = child(arena, promoted, dir);

    set_child(arena, pivot, dir.opposite(), inner);
    set_p(arena, inner, pivot);

    let gp = get_p(arena, pivot);
    set_p(arena, promoted, gp);
    if gp == NIL {
        root = promoted;
    } else {
        let side = side_of(arena, gp, pivot);
        set_child(arena, gp, side, promoted);
    }

    set_child(arena, promoted, dir, pivot);
    set_p(arena, pivot, promoted);
    root
}

/// Puts `new` where `old` hangs under its parent. `old`'s own children are
/// left alone. Returns the new root.
pub fn transplant<N: Node>(arena: &mut Arena<N>, mut root: u32, old: u32, new: u32) -> u32 {
    let p = get_p(arena, old);
    if p == NIL {
        root = new;
    } else {
        let side = side_of(arena, p, old);
        set_child(arena, p, side, new);
    }
    set_p(arena, new, p);
    root
}

/// Links the detached red node `n` into the tree by key and rebalances.
///
/// Equal keys descend right, so duplicates keep insertion order.
pub fn insert<K, N>(arena: &mut Arena<N>, mut root: u32, n: u32) -> u32
where
    K: Ord,
    N: RbNodeLike + KeyNode<K>,
{
    let (parent, side) = {
        let Some(node) = arena.node(n) else {
            return root;
        };
        let key = node.key();
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut curr = root;
        while let Some(c) = arena.node(curr) {
            parent = curr;
            side = if key < c.key() { Side::Left } else { Side::Right };
            curr = c.child(side);
        }
        (parent, side)
    };

    set_p(arena, n, parent);
    if parent == NIL {
        root = n;
    } else {
        set_child(arena, parent, side, n);
    }
    insert_fixup(arena, root, n)
}

/// Restores "no red node has a red child" upward from the red node `n`.
/// Returns the new root.
pub fn insert_fixup<N: RbNodeLike>(arena: &mut Arena<N>, mut root: u32, mut n: u32) -> u32 {
    loop {
        let mut p = get_p(arena, n);
        if p == NIL || is_black(arena, p) {
            break;
        }
        // A red parent is never the root, so the grandparent is real.
        let g = get_p(arena, p);
        let side = side_of(arena, g, p);
        let uncle = child(arena, g, side.opposite());

        if is_red(arena, uncle) {
            trace!("insert fixup at {n}: red uncle {uncle}, moving up to {g}");
            set_color(arena, p, Color::Black);
            set_color(arena, uncle, Color::Black);
            set_color(arena, g, Color::Red);
            n = g;
            continue;
        }

        if child(arena, p, side.opposite()) == n {
            trace!("insert fixup at {n}: triangle under {p}");
            root = rotate(arena, root, p, side);
            n = p;
            p = get_p(arena, n);
        }

        trace!("insert fixup at {n}: line, rotating {g}");
        set_color(arena, p, Color::Black);
        set_color(arena, g, Color::Red);
        root = rotate(arena, root, g, side.opposite());
        break;
    }
    set_color(arena, root, Color::Black);
    root
}

/// Unlinks node `z` from the tree and rebalances. Returns the new root.
///
/// When `z` has two children its successor is moved into `z`'s position and
/// takes `z`'s color, so no key changes owner. The slot of `z` is left
/// detached for the caller to release.
pub fn remove<N: RbNodeLike>(arena: &mut Arena<N>, mut root: u32, z: u32) -> u32 {
    let zl = get_l(arena, z);
    let zr = get_r(arena, z);

    let removed_color;
    let x;
    let xp;
    let x_side;

    if zl == NIL || zr == NIL {
        removed_color = color(arena, z);
        x = if zl == NIL { zr } else { zl };
        xp = get_p(arena, z);
        x_side = side_of(arena, xp, z);
        root = transplant(arena, root, z, x);
    } else {
        let y = first(arena, zr);
        removed_color = color(arena, y);
        x = get_r(arena, y);
        if get_p(arena, y) == z {
            xp = y;
            x_side = Side::Right;
        } else {
            xp = get_p(arena, y);
            x_side = Side::Left;
            root = transplant(arena, root, y, x);
            set_r(arena, y, zr);
            set_p(arena, zr, y);
        }
        root = transplant(arena, root, z, y);
        set_l(arena, y, zl);
        set_p(arena, zl, y);
        let z_color = color(arena, z);
        set_color(arena, y, z_color);
    }

    set_p(arena, z, NIL);
    set_l(arena, z, NIL);
    set_r(arena, z, NIL);

    if removed_color == Color::Black {
        if xp == NIL {
            // `x` replaced the root.
            set_color(arena, x, Color::Black);
        } else {
            root = erase_fixup(arena, root, xp, x_side);
        }
    }
    root
}

/// Resolves the missing black at `parent`'s child on `side`. That child may
/// be the sentinel. Returns the new root.
pub fn erase_fixup<N: RbNodeLike>(
    arena: &mut Arena<N>,
    mut root: u32,
    mut parent: u32,
    mut side: Side,
) -> u32 {
    let mut x = child(arena, parent, side);
    while x != root && is_black(arena, x) {
        let mut s = child(arena, parent, side.opposite());
        debug_assert_ne!(s, NIL, "a deficient position always has a real sibling");

        if is_red(arena, s) {
            trace!("erase fixup under {parent}: red sibling {s}");
            set_color(arena, s, Color::Black);
            set_color(arena, parent, Color::Red);
            root = rotate(arena, root, parent, side);
            s = child(arena, parent, side.opposite());
        }

        let near = child(arena, s, side);
        let far = child(arena, s, side.opposite());

        if is_black(arena, near) && is_black(arena, far) {
            trace!("erase fixup under {parent}: black nephews, moving up");
            set_color(arena, s, Color::Red);
            x = parent;
            if x == root {
                break;
            }
            parent = get_p(arena, x);
            side = side_of(arena, parent, x);
            continue;
        }

        if is_black(arena, far) {
            trace!("erase fixup under {parent}: near nephew {near} red");
            set_color(arena, near, Color::Black);
            set_color(arena, s, Color::Red);
            root = rotate(arena, root, s, side.opposite());
            s = child(arena, parent, side.opposite());
        }

        trace!("erase fixup under {parent}: far nephew red, rotating");
        let far = child(arena, s, side.opposite());
        let parent_color = color(arena, parent);
        set_color(arena, s, parent_color);
        set_color(arena, parent, Color::Black);
        set_color(arena, far, Color::Black);
        root = rotate(arena, root, parent, side);
        x = root;
        break;
    }
    set_color(arena, x, Color::Black);
    root
}

/// Black nodes on the leftmost path from `root` down to the sentinel.
pub fn black_height<N: RbNodeLike>(arena: &Arena<N>, root: u32) -> usize {
    let mut curr = root;
    let mut height = 0;
    while curr != NIL {
        if is_black(arena, curr) {
            height += 1;
        }
        curr = get_l(arena, curr);
    }
    height
}

/// Checks every red-black and search-tree invariant of the tree at `root`,
/// plus parent link consistency.
pub fn assert_red_black_tree<K, N>(arena: &Arena<N>, root: u32) -> Result<(), String>
where
    K: Ord,
    N: RbNodeLike + KeyNode<K>,
{
    if root == NIL {
        return if arena.is_empty() {
            Ok(())
        } else {
            Err(format!("Empty root but {} live nodes", arena.len()))
        };
    }
    if arena.node(root).is_none() {
        return Err(format!("Root {root} is not a live node"));
    }
    if get_p(arena, root) != NIL {
        return Err("Root has parent".to_string());
    }
    if !is_black(arena, root) {
        return Err("Root is not black".to_string());
    }

    fn black_height<N: RbNodeLike>(arena: &Arena<N>, node: u32) -> Result<usize, String> {
        if node == NIL {
            return Ok(0);
        }
        if arena.node(node).is_none() {
            return Err(format!("Link to vacant slot {node}"));
        }

        let l = get_l(arena, node);
        let r = get_r(arena, node);

        if l != NIL && get_p(arena, l) != node {
            return Err("Broken parent link on left child".to_string());
        }
        if r != NIL && get_p(arena, r) != node {
            return Err("Broken parent link on right child".to_string());
        }

        if is_red(arena, node) {
            if is_red(arena, l) {
                return Err("Red node has red left child".to_string());
            }
            if is_red(arena, r) {
                return Err("Red node has red right child".to_string());
            }
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err("Black height mismatch".to_string());
        }

        Ok(lh + usize::from(is_black(arena, node)))
    }

    black_height(arena, root)?;

    let mut count = 0;
    let mut curr = first(arena, root);
    let mut prev_node = NIL;
    while let Some(n) = arena.node(curr) {
        if let Some(prev) = arena.node(prev_node) {
            if prev.key() > n.key() {
                return Err("Node order violated".to_string());
            }
        }
        count += 1;
        prev_node = curr;
        curr = next(arena, curr);
    }
    if count != arena.len() {
        return Err(format!(
            "{count} nodes reachable but {} live in the arena",
            arena.len()
        ));
    }

    Ok(())
}
