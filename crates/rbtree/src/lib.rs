//! Arena-backed red-black tree.
//!
//! Nodes are stored in a slot arena owned by the tree. Parent, left and right
//! links are `u32` indices into that arena, and index [`NIL`] is one shared
//! black sentinel standing in for every absent child and for the root's
//! parent. Insert, find, min/max and erase all run in O(log n).
//!
//! Callers hold [`NodeId`] handles. Erase removes node identity, not a key:
//! when the erased node has two children its in-order successor is relinked
//! into its place, so every other handle keeps its key.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait, [`Color`], [`Side`], [`NIL`] |
//! [`arena`] | slot storage with free list and generations |
//! [`util`] | link helpers, `first` / `next` / `find` traversal |
//! [`red_black`] | rotation, insert/erase fixups, invariant check |
//! [`tree`] | [`RbTree`] and [`NodeId`] |
//!
//! # Example
//!
//! ```
//! use rbtree::{RbError, RbTree};
//!
//! let mut tree = RbTree::new();
//! for k in [10, 20, 30] {
//!     tree.insert(k).unwrap();
//! }
//! let root = tree.root().unwrap();
//! assert_eq!(tree.key(root), Some(&20));
//!
//! let ten = tree.find(&10).unwrap();
//! assert_eq!(tree.erase(ten), Ok(10));
//! assert_eq!(tree.to_vec(), vec![20, 30]);
//! assert_eq!(tree.erase(ten), Err(RbError::InvalidNodeReference));
//! ```

pub mod arena;
pub mod config;
pub mod error;
pub mod red_black;
pub mod tree;
pub mod types;
pub mod util;

pub use config::RbTreeConfig;
pub use error::RbError;
pub use tree::{NodeId, RbTree};
pub use types::{Color, Node, Side, NIL};
