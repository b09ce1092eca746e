use crate::types::{Color, KeyNode, Node, NIL};

#[derive(Clone, Debug)]
pub struct RbNode<K> {
    pub p: u32,
    pub l: u32,
    pub r: u32,
    pub k: K,
    pub color: Color,
}

impl<K> RbNode<K> {
    /// A fresh node is red with both children on the sentinel.
    pub fn new(k: K) -> Self {
        Self {
            p: NIL,
            l: NIL,
            r: NIL,
            k,
            color: Color::Red,
        }
    }
}

impl<K> Node for RbNode<K> {
    fn p(&self) -> u32 {
        self.p
    }

    fn l(&self) -> u32 {
        self.l
    }

    fn r(&self) -> u32 {
        self.r
    }

    fn set_p(&mut self, v: u32) {
        self.p = v;
    }

    fn set_l(&mut self, v: u32) {
        self.l = v;
    }

    fn set_r(&mut self, v: u32) {
        self.r = v;
    }
}

impl<K> KeyNode<K> for RbNode<K> {
    fn key(&self) -> &K {
        &self.k
    }
}

/// Red-black specific node behavior.
pub trait RbNodeLike: Node {
    fn color(&self) -> Color;
    fn set_color(&mut self, color: Color);
}

impl<K> RbNodeLike for RbNode<K> {
    fn color(&self) -> Color {
        self.color
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
