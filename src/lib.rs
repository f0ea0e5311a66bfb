//! This crate exposes an ordered key/value container in two flavours, a plain Binary Search Tree
//! and a self-balancing AVL tree built on the same node store, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` where `height` is the longest path from the root
//! `Node` to a leaf `Node`. [`bst::Tree`] makes no effort to keep that small; [`avl::Tree`]
//! rebalances after every insert and remove so the height stays `O(lg N)`. Both support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## Storage
//!
//! Nodes of both trees live in an index-based arena owned by the tree. Each node links to its
//! parent and children by index, which is what lets the trees walk upwards after a change and
//! lets iteration step to the in-order successor without an explicit stack.
//!
//! [`equal_paths`] is a small unrelated utility over a plain boxed binary tree.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod bst;
pub mod equal_paths;
mod error;
pub mod iter;
mod render;
mod store;

#[cfg(test)]
mod test;

pub use error::Error;
