//! In-order iteration shared by both trees.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::store::{NodeId, NodeStore};

/// A forward, in-order cursor over a tree.
///
/// An `Iter` points at one node of the tree it was created from, or past the last node (the
/// "end" position, see `Tree::end`). [`Iterator::next`] yields the pair at the current position
/// and then steps to the in-order successor. Two `Iter`s are equal when they point at the same
/// node of the same tree, so a cursor returned by `Tree::find` can be compared against
/// `Tree::end` to test for a miss.
///
/// The third parameter is the tree's per-node bookkeeping type and can be ignored; the `bst` and
/// `avl` modules each export an alias without it.
pub struct Iter<'a, K, V, A> {
    store: &'a NodeStore<K, V, A>,
    current: Option<NodeId>,
}

impl<'a, K, V, A> Iter<'a, K, V, A> {
    pub(crate) fn new(store: &'a NodeStore<K, V, A>, current: Option<NodeId>) -> Self {
        Self { store, current }
    }

    /// The key/value pair at the cursor, without advancing. `None` at the end position.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        let store = self.store;
        self.current.map(|id| {
            let node = &store[id];
            (&node.key, &node.value)
        })
    }

    /// Whether this cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }
}

impl<'a, K, V, A> Iterator for Iter<'a, K, V, A> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.get()?;
        self.current = self.current.and_then(|id| self.store.successor(id));
        Some(item)
    }
}

impl<K, V, A> FusedIterator for Iter<'_, K, V, A> {}

// Manual impl so cloning the cursor never requires `K: Clone` or `V: Clone`.
impl<K, V, A> Clone for Iter<'_, K, V, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            current: self.current,
        }
    }
}

impl<K, V, A> PartialEq for Iter<'_, K, V, A> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.store, other.store) && self.current == other.current
    }
}

impl<K, V, A> Eq for Iter<'_, K, V, A> {}

impl<K, V, A> fmt::Debug for Iter<'_, K, V, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
