//! Red-black rebalancing over the arena: rotation, insert fixup, erase with
//! transplant and erase fixup, plus invariant checking and a debug printer.

pub mod print;
pub mod types;
pub mod util;

pub use print::print;
pub use types::{RbNode, RbNodeLike};
pub use util::{
    assert_red_black_tree, black_height, erase_fixup, insert, insert_fixup, remove, rotate,
    transplant,
};
