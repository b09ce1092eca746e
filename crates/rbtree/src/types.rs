//! Link and color definitions shared by the tree modules.
//!
//! Every link is a `u32` index into an [`Arena`](crate::arena::Arena).
//! Index [`NIL`] is the sentinel: it stands in for both "no child" and
//! "no parent", reads as black, and reading any of its links yields [`NIL`]
//! again. Because of that, rotation and fixup code never branches on a
//! missing link.

/// Index of the shared sentinel slot.
pub const NIL: u32 = 0;

/// Node color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Child direction. Rotation and both fixups are written once over `Side`
/// and its [`opposite`](Side::opposite).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Structural links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> u32;
    fn l(&self) -> u32;
    fn r(&self) -> u32;
    fn set_p(&mut self, v: u32);
    fn set_l(&mut self, v: u32);
    fn set_r(&mut self, v: u32);

    #[inline]
    fn child(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.l(),
            Side::Right => self.r(),
        }
    }

    #[inline]
    fn set_child(&mut self, side: Side, v: u32) {
        match side {
            Side::Left => self.set_l(v),
            Side::Right => self.set_r(v),
        }
    }
}

/// Node that carries an ordered key.
pub trait KeyNode<K>: Node {
    fn key(&self) -> &K;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.opposite().opposite(), Side::Left);
    }
}
