use std::fmt::{Debug, Write};

use crate::arena::Arena;
use crate::types::{Color, KeyNode};

use super::types::RbNodeLike;

fn label<K: Debug, N: RbNodeLike + KeyNode<K>>(idx: u32, node: &N) -> String {
    let color = match node.color() {
        Color::Black => 'B',
        Color::Red => 'R',
    };
    format!("{color}:{:?} #{idx}", node.key())
}

/// Draws the subtree under `root` one node per line, left child first.
///
/// Each line reads `<color>:<key> #<slot>`. A node whose children are both the
/// sentinel gets no child lines; a single missing child is drawn as `nil`.
/// An empty subtree prints as `(empty)`.
pub fn print<K, N>(arena: &Arena<N>, root: u32) -> String
where
    K: Debug,
    N: RbNodeLike + KeyNode<K>,
{
    let Some(node) = arena.node(root) else {
        return "(empty)".to_string();
    };
    let mut out = label(root, node);
    draw_children::<K, N>(arena, node, "", &mut out);
    out
}

fn draw_children<K, N>(arena: &Arena<N>, node: &N, indent: &str, out: &mut String)
where
    K: Debug,
    N: RbNodeLike + KeyNode<K>,
{
    let (l, r) = (node.l(), node.r());
    if arena.node(l).is_none() && arena.node(r).is_none() {
        return;
    }
    for (idx, branch, pad) in [(l, "├─ ", "│  "), (r, "└─ ", "   ")] {
        let _ = write!(out, "\n{indent}{branch}");
        match arena.node(idx) {
            None => out.push_str("nil"),
            Some(child) => {
                out.push_str(&label(idx, child));
                draw_children::<K, N>(arena, child, &format!("{indent}{pad}"), out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::red_black::types::RbNode;
    use crate::types::NIL;

    fn black(k: i32) -> RbNode<i32> {
        let mut node = RbNode::new(k);
        node.color = Color::Black;
        node
    }

    #[test]
    fn test_print_empty_and_single() {
        let mut arena = Arena::<RbNode<i32>>::new();
        assert_eq!(print::<i32, _>(&arena, NIL), "(empty)");

        let idx = arena.alloc(black(7)).unwrap();
        assert_eq!(print::<i32, _>(&arena, idx), format!("B:7 #{idx}"));
    }

    #[test]
    fn test_print_marks_missing_child() {
        let mut arena = Arena::<RbNode<i32>>::new();
        let top = arena.alloc(black(5)).unwrap();
        let right = arena.alloc(RbNode::new(9)).unwrap();
        arena.node_mut(top).unwrap().r = right;
        arena.node_mut(right).unwrap().p = top;

        assert_eq!(
            print::<i32, _>(&arena, top),
            format!("B:5 #{top}\n├─ nil\n└─ R:9 #{right}")
        );
    }
}
