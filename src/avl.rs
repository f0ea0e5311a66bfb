//! A self-balancing BST (specifically, an AVL tree).
//!
//! Each node stores a balance factor: the height of its right subtree minus the height of its
//! left subtree. Insertions and removals do the same structural work as in [`bst`][crate::bst],
//! then walk from the point of the change towards the root, adjusting balance factors and
//! rotating wherever a factor reaches ±2. The walk stops as soon as a subtree's height is known
//! not to have changed. After every operation each factor is -1, 0 or 1, which bounds the height
//! of a tree with `n` keys by roughly `1.44 * lg(n + 2)`.
//!
//! # Examples
//!
//! ```
//! use avlbst::avl::Tree;
//!
//! let mut tree = Tree::new();
//! for key in 0..1000 {
//!     tree.insert(key, key * 2);
//! }
//!
//! // Sorted input does not degrade the tree.
//! assert!(tree.height() <= 15);
//! assert!(tree.is_balanced());
//!
//! assert_eq!(tree.remove(&500), Some(1000));
//! assert_eq!(tree.get(&500), None);
//! assert_eq!(tree.len(), 999);
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::Error;
use crate::iter;
use crate::render::render;
use crate::store::{NodeId, NodeStore, Side};

/// The balance factor kept on every AVL node: right subtree height minus left subtree height.
///
/// Between operations it is always -1, 0 or 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Balance(i8);

impl Balance {
    /// The factor as a plain integer.
    pub fn get(self) -> i8 {
        self.0
    }
}

/// In-order cursor over a [`Tree`].
pub type Iter<'a, K, V> = iter::Iter<'a, K, V, Balance>;

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can be used for
/// inserting, finding, and removing keys and values.
#[derive(Clone)]
pub struct Tree<K, V> {
    store: NodeStore<K, V, Balance>,
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
    /// height by at most one. Always `true` for an AVL tree; useful as a sanity check.
    pub fn is_balanced(&self) -> bool {
        self.store.is_balanced()
    }

    /// The stored balance factor of the node holding `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlbst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, ());
    /// tree.insert(3, ());
    ///
    /// assert_eq!(tree.balance_of(&2), Some(1));
    /// assert_eq!(tree.balance_of(&3), Some(0));
    /// assert_eq!(tree.balance_of(&4), None);
    /// ```
    pub fn balance_of<Q>(&self, key: &Q) -> Option<i8>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.store.find(key).map(|id| self.balance(id))
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
    pub fn find<Q>(&self, key: &Q) -> Iter<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        iter::Iter::new(&self.store, self.store.find(key))
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlbst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.get(&1), Some(&2));
    /// assert_eq!(tree.get(&42), None);
    /// ```
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
    /// existing key overwites its value and leaves the shape of the tree alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlbst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.insert(1, 2);
    /// assert_eq!(tree.get(&1), Some(&2));
    ///
    /// tree.insert(1, 3);
    /// assert_eq!(tree.get(&1), Some(&3));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let Some(node) = self.store.insert(key, value) else {
            return;
        };
        let Some((parent, side)) = self.store.side_of(node) else {
            return;
        };
        let step = side_step(side);

        if self.balance(parent) == 0 {
            // The parent was a leaf and is now taller.
            self.set_balance(parent, step);
            self.insert_fix(parent, node);
        } else {
            // The new node filled the parent's shorter side.
            self.set_balance(parent, self.balance(parent) + step);
        }
    }

    /// Removes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlbst::avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Some(2));
    /// assert_eq!(tree.remove(&1), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removal = self.store.remove(key)?;
        if let Some((parent, side)) = removal.vacated {
            // The vacated side got shorter, which tips the parent towards the other side.
            self.remove_fix(parent, -side_step(side));
        }
        Some(removal.node.value)
    }

    /// Draws up to five levels of the tree as indented text, each key followed by its balance
    /// factor.
    ///
    /// # Examples
    ///
    /// ```
    /// use avlbst::avl::Tree;
    ///
    /// let tree: Tree<_, _> = [(1, ()), (2, ()), (3, ()), (4, ())].into_iter().collect();
    /// assert_eq!(tree.render(), "2 [+1]\n├── 1 [+0]\n└── 3 [+1]\n    ├── ·\n    └── 4 [+0]\n");
    /// ```
    pub fn render(&self) -> String
    where
        K: fmt::Debug,
    {
        render(&self.store, |node| format!("{:?} [{:+}]", node.key, node.aux.get()))
    }

    fn balance(&self, id: NodeId) -> i8 {
        self.store[id].aux.get()
    }

    fn set_balance(&mut self, id: NodeId, balance: i8) {
        self.store[id].aux = Balance(balance);
    }

    /// Propagates a height increase upwards. `parent`'s balance just moved from 0 to ±1 because
    /// its subtree containing `node` grew.
    fn insert_fix(&mut self, mut parent: NodeId, mut node: NodeId) {
        while let Some((grandparent, side)) = self.store.side_of(parent) {
            let step = side_step(side);
            let balance = self.balance(grandparent) + step;
            self.set_balance(grandparent, balance);
            log::trace!(
                "avl::insert_fix node {} balance {} after growth on its {:?}",
                grandparent,
                balance,
                side
            );

            if balance == 0 {
                return;
            }
            if balance == step {
                node = parent;
                parent = grandparent;
                continue;
            }

            // `grandparent` is at ±2.
            if self.store.side_of(node).map(|(_, s)| s) == Some(side) {
                self.rotate_up(parent);
                self.set_balance(parent, 0);
                self.set_balance(grandparent, 0);
            } else {
                self.rotate_up(node);
                self.rotate_up(node);
                let (parent_balance, grandparent_balance) = match self.balance(node) {
                    b if b == step => (0, -step),
                    0 => (0, 0),
                    _ => (step, 0),
                };
                self.set_balance(node, 0);
                self.set_balance(parent, parent_balance);
                self.set_balance(grandparent, grandparent_balance);
            }
            self.check_rotated(&[node, parent, grandparent]);
            return;
        }
    }

    /// Propagates a height decrease upwards: `delta` is added to `node`'s balance because one of
    /// its subtrees got shorter (+1 for the left one, -1 for the right one).
    fn remove_fix(&mut self, node: NodeId, delta: i8) {
        let mut next = Some((node, delta));
        while let Some((node, delta)) = next {
            // Rotations below can change `node`'s parent so look it up first.
            next = self
                .store
                .side_of(node)
                .map(|(parent, side)| (parent, -side_step(side)));

            let balance = self.balance(node) + delta;
            log::trace!("avl::remove_fix node {} balance {}", node, balance);

            if balance == delta {
                // Was 0: the other side still holds the height.
                self.set_balance(node, balance);
                return;
            }
            if balance == 0 {
                self.set_balance(node, 0);
                continue;
            }

            // `node` is at ±2 and leans towards the side opposite to `delta`'s origin.
            let (child_side, grandchild_side) = if delta < 0 {
                (Side::Left, Side::Right)
            } else {
                (Side::Right, Side::Left)
            };
            let child = self
                .child(node, child_side)
                .expect("the taller side of a node at ±2 has a child");
            let child_balance = self.balance(child);

            if child_balance == delta {
                self.rotate_up(child);
                self.set_balance(node, 0);
                self.set_balance(child, 0);
                self.check_rotated(&[node, child]);
            } else if child_balance == 0 {
                // Height of the rotated subtree is unchanged.
                self.rotate_up(child);
                self.set_balance(node, delta);
                self.set_balance(child, -delta);
                self.check_rotated(&[node, child]);
                return;
            } else {
                let Some(grandchild) = self.child(child, grandchild_side) else {
                    log::debug!(
                        "avl::remove_fix node {} child {} has no inner child, skipping rotation",
                        node,
                        child
                    );
                    continue;
                };
                self.rotate_up(grandchild);
                self.rotate_up(grandchild);
                let (node_balance, child_balance) = match self.balance(grandchild) {
                    b if b == -delta => (0, delta),
                    0 => (0, 0),
                    _ => (-delta, 0),
                };
                self.set_balance(node, node_balance);
                self.set_balance(child, child_balance);
                self.set_balance(grandchild, 0);
                self.check_rotated(&[node, child, grandchild]);
            }
        }
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.store[id].left,
            Side::Right => self.store[id].right,
        }
    }

    /// Rotates `child` above its parent, in whichever direction that takes.
    fn rotate_up(&mut self, child: NodeId) {
        match self.store.side_of(child) {
            Some((parent, Side::Left)) => self.rotate_right(parent),
            Some((parent, Side::Right)) => self.rotate_left(parent),
            None => {}
        }
    }

    /// Rotate `node` to the left. This moves its right child up and `node` down. Balance factors
    /// are left to the caller. Does nothing when `node` has no right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///  Option<parent>           Option<parent>
    ///      |                         |
    ///     node                     child
    ///    /    \                   /     \
    ///   x    child   rotate ->  node     z
    ///        /   \             /    \
    ///       y     z           x      y
    /// ```
    fn rotate_left(&mut self, node: NodeId) {
        let Some(child) = self.store[node].right else {
            return;
        };
        log::trace!("avl::rotate_left node {} child {}", node, child);
        let moved = self.store[child].left;
        let parent = self.store[node].parent;

        self.store[child].parent = parent;
        self.store[node].parent = Some(child);

        self.store[node].right = moved;
        if let Some(moved) = moved {
            self.store[moved].parent = Some(node);
        }

        self.store[child].left = Some(node);
        self.store.replace_in_parent(parent, node, Some(child));
    }

    /// Mirror image of [`Tree::rotate_left`].
    ///
    /// ```text
    ///     Option<parent>        Option<parent>
    ///          |                     |
    ///         node                 child
    ///        /    \               /     \
    ///     child    z  rotate ->  x      node
    ///     /   \                        /    \
    ///    x     y                      y      z
    /// ```
    fn rotate_right(&mut self, node: NodeId) {
        let Some(child) = self.store[node].left else {
            return;
        };
        log::trace!("avl::rotate_right node {} child {}", node, child);
        let moved = self.store[child].right;
        let parent = self.store[node].parent;

        self.store[child].parent = parent;
        self.store[node].parent = Some(child);

        self.store[node].left = moved;
        if let Some(moved) = moved {
            self.store[moved].parent = Some(node);
        }

        self.store[child].right = Some(node);
        self.store.replace_in_parent(parent, node, Some(child));
    }

    fn check_rotated(&self, nodes: &[NodeId]) {
        if cfg!(debug_assertions) {
            for &id in nodes {
                assert!(self.balance(id).abs() <= 1, "node {} left unbalanced", id);
            }
        }
    }
}

/// The balance change caused by growth on `side`.
fn side_step(side: Side) -> i8 {
    match side {
        Side::Left => -1,
        Side::Right => 1,
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
