//! An ordered map over scalar keys, augmented to answer "which two keys
//! are closest together?" in constant time.
//!
//! [`GapTree`] is an AVL-balanced binary search tree. Every node
//! additionally carries the minimum key, maximum key and closest pair of
//! its subtree, each refreshed in O(1) from the node's children as
//! insertions, deletions and rotations restructure the tree. The closest
//! pair over the whole key set is therefore always available at the root:
//!
//! ```
//! use gaptree::GapTree;
//!
//! let mut tree = GapTree::default();
//!
//! tree.insert(4, "platanos");
//! tree.insert(9, "bananas");
//! tree.insert(7, "plantains");
//!
//! // Read the closest pair of keys in O(1).
//! let pair = tree.closest_pair().unwrap();
//! assert_eq!((pair.lower(), pair.upper()), (7, 9));
//!
//! // Lookups, updates and removals are O(log n).
//! assert_eq!(tree.get(9), Some(&"bananas"));
//! assert_eq!(tree.remove(9), Some("bananas"));
//!
//! let pair = tree.closest_pair().unwrap();
//! assert_eq!((pair.lower(), pair.upper()), (4, 7));
//! ```
//!
//! Keys are unique: inserting an existing key replaces its value without
//! touching the tree structure. When the tree holds fewer than two keys
//! there is no pair to speak of, and [`GapTree::closest_pair()`] returns
//! [`None`].

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::todo,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]

mod closest;
mod entry;
mod iter;
mod node;
#[cfg(test)]
mod test_utils;
mod tree;

pub use closest::*;
pub use entry::*;
pub use iter::OwnedIter;
pub use tree::*;
