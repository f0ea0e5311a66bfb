//! A plain, unbalanced BST. Keys are placed exactly where the insertion order puts them, so
//! inserting sorted keys degrades the tree into a list.
//!
//! # Examples
//!
//! ```
//! use avlbst::bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.get(&1), None);
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.get(&1), Some(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! tree.insert(1, 3);
//! assert_eq!(tree[&1], 3);
//!
//! // Removing a node returns its value.
//! assert_eq!(tree.remove(&1), Some(3));
//! assert!(tree.is_empty());
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::Error;
use crate::iter;
use crate::render::render;
use crate::store::NodeStore;

/// In-order cursor over a [`Tree`].
pub type Iter<'a, K, V> = iter::Iter<'a, K, V, ()>;

/// An unbalanced Binary Search Tree mapping keys to values.
#[derive(Clone)]
pub struct Tree<K, V> {
    store: NodeStore<K, V, ()>,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
        }
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes every node, children before parents.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Number of levels on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.store.height()
    }

    /// Recomputes every subtree height and reports whether each node's two subtrees differ in
    /// height by at most one.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlbst::bst::Tree;
    ///
    /// let balanced: Tree<_, _> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
    /// assert!(balanced.is_balanced());
    ///
    /// let list: Tree<_, _> = [(1, ()), (2, ()), (3, ())].into_iter().collect();
    /// assert!(!list.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        self.store.is_balanced()
    }

    /// A cursor at the smallest key; iterating it visits every pair in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        iter::Iter::new(&self.store, self.store.smallest())
    }

    /// Same as [`Tree::iter`].
    pub fn begin(&self) -> Iter<'_, K, V> {
        self.iter()
    }

    /// The past-the-end cursor.
    pub fn end(&self) -> Iter<'_, K, V> {
        iter::Iter::new(&self.store, None)
    }

    /// A cursor positioned at `key`, or [`Tree::end`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlbst::bst::Tree;
    ///
    /// let tree: Tree<_, _> = (0..5).map(|k| (k, k * k)).collect();
    ///
    /// let found = tree.find(&3);
    /// assert_eq!(found.get(), Some((&3, &9)));
    /// assert_eq!(found.map(|(k, _)| *k).collect::<Vec<_>>(), vec![3, 4]);
    ///
    /// assert!(tree.find(&42) == tree.end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Iter<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        iter::Iter::new(&self.store, self.store.find(key))
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store.find(key).map(|id| &self.store[id].value)
    }

    /// Mutable version of [`Tree::get`].
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.store.find(key)?;
        Some(&mut self.store[id].value)
    }

    /// Like [`Tree::get`] but reports a missing key as [`Error::KeyNotFound`].
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Like [`Tree::get_mut`] but reports a missing key as [`Error::KeyNotFound`].
    pub fn try_get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Whether `key` is stored in the tree.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store.find(key).is_some()
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwites its value. No rebalancing happens.
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        self.store.insert(key, value);
    }

    /// Removes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// A node with two children first trades places with its in-order predecessor.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store.remove(key).map(|removal| removal.node.value)
    }

    /// Draws up to five levels of the tree as indented text.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlbst::bst::Tree;
    ///
    /// let tree: Tree<_, _> = [(2, ()), (1, ()), (3, ())].into_iter().collect();
    /// assert_eq!(tree.render(), "2\n├── 1\n└── 3\n");
    /// ```
    pub fn render(&self) -> String
    where
        K: fmt::Debug,
    {
        render(&self.store, |node| format!("{:?}", node.key))
    }
}

impl<K, Q, V> Index<&Q> for Tree<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// When `key` is not in the tree.
    fn index(&self, key: &Q) -> &V {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<K, Q, V> IndexMut<&Q> for Tree<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    /// # Panics
    ///
    /// When `key` is not in the tree.
    fn index_mut(&mut self, key: &Q) -> &mut V {
        match self.try_get_mut(key) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
