//! The node arena shared by [`bst::Tree`][crate::bst::Tree] and [`avl::Tree`][crate::avl::Tree].
//!
//! Nodes live in a `Vec` of slots and refer to each other by index, so a node has exactly one
//! owner (the store) and its `parent`, `left` and `right` links are plain, non-owning `NodeId`s.
//! Released slots are recycled by later insertions.
//!
//! Every node carries an auxiliary datum `A` that belongs to the node's *position* in the tree
//! rather than to its key/value. The plain tree uses `()`; the AVL tree keeps its balance factor
//! there. Operations that move nodes around ([`NodeStore::swap_nodes`]) move `A` with the
//! position.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;
use std::ops::{Index, IndexMut};

/// Index of a node inside a [`NodeStore`].
pub(crate) type NodeId = usize;

/// Which child slot of a parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V, A> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) aux: A,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl<K, V, A> Node<K, V, A> {
    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// What [`NodeStore::remove`] hands back: the released node and the child slot its removal
/// vacated, if it had a parent.
pub(crate) struct Removal<K, V, A> {
    pub(crate) node: Node<K, V, A>,
    pub(crate) vacated: Option<(NodeId, Side)>,
}

#[derive(Clone)]
pub(crate) struct NodeStore<K, V, A> {
    slots: Vec<Option<Node<K, V, A>>>,
    vacant: Vec<NodeId>,
    root: Option<NodeId>,
}

impl<K, V, A> Default for NodeStore<K, V, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, A> Index<NodeId> for NodeStore<K, V, A> {
    type Output = Node<K, V, A>;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.slots[id]
            .as_ref()
            .expect("node index refers to a released slot")
    }
}

impl<K, V, A> IndexMut<NodeId> for NodeStore<K, V, A> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.slots[id]
            .as_mut()
            .expect("node index refers to a released slot")
    }
}

impl<K, V, A> NodeStore<K, V, A> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            root: None,
        }
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.vacant.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn allocate(&mut self, node: Node<K, V, A>) -> NodeId {
        match self.vacant.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Node<K, V, A> {
        let node = self.slots[id]
            .take()
            .expect("released a slot that was already vacant");
        self.vacant.push(id);
        node
    }

    /// The parent of `id` and the side of the parent `id` hangs off.
    pub(crate) fn side_of(&self, id: NodeId) -> Option<(NodeId, Side)> {
        let parent = self[id].parent?;
        if self[parent].left == Some(id) {
            Some((parent, Side::Left))
        } else {
            Some((parent, Side::Right))
        }
    }

    /// Points whatever referenced `old` from above (its parent's child slot, or the root) at
    /// `new`. Does not touch `new`'s parent link.
    pub(crate) fn replace_in_parent(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) if self[parent].left == Some(old) => self[parent].left = new,
            Some(parent) => self[parent].right = new,
        }
    }

    pub(crate) fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self[id];
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Descends from the root and links a new node at the first empty child slot on the key's
    /// path. A matching key has its value overwritten in place instead, in which case no node is
    /// created and `None` is returned.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<NodeId>
    where
        K: Ord,
        A: Default,
    {
        let mut attach_to = None;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &mut self[id];
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => {
                    node.value = value;
                    return None;
                }
                Ordering::Greater => Side::Right,
            };
            attach_to = Some((id, side));
            current = node.child(side);
        }

        let id = self.allocate(Node {
            key,
            value,
            aux: A::default(),
            parent: attach_to.map(|(parent, _)| parent),
            left: None,
            right: None,
        });
        match attach_to {
            Some((parent, side)) => *self[parent].child_mut(side) = Some(id),
            None => self.root = Some(id),
        }

        if cfg!(debug_assertions) {
            if let Some((parent, side)) = attach_to {
                let ordering = self[id].key.cmp(&self[parent].key);
                match side {
                    Side::Left => assert_eq!(ordering, Ordering::Less),
                    Side::Right => assert_eq!(ordering, Ordering::Greater),
                }
            }
        }

        Some(id)
    }

    /// The leftmost node of the whole tree, or `None` for an empty tree.
    pub(crate) fn smallest(&self) -> Option<NodeId> {
        self.root.map(|root| self.leftmost(root))
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self[id].left {
            id = left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self[id].right {
            id = right;
        }
        id
    }

    /// The node holding the largest key smaller than `id`'s key.
    ///
    /// That is the rightmost node of the left subtree when there is one. Otherwise it is the
    /// first ancestor reached by stepping up out of a right child. `None` means `id` holds the
    /// minimum.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self[id].left {
            return Some(self.rightmost(left));
        }
        let mut current = id;
        while let Some((parent, side)) = self.side_of(current) {
            if side == Side::Right {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Mirror image of [`NodeStore::predecessor`].
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self[id].right {
            return Some(self.leftmost(right));
        }
        let mut current = id;
        while let Some((parent, side)) = self.side_of(current) {
            if side == Side::Left {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Exchanges the tree positions of `n1` and `n2` while their keys and values stay put, as if
    /// the two nodes had traded identities. Neighbours' back-links and the root are updated and
    /// the positional `aux` data is exchanged along with the links.
    ///
    /// When one node is the other's direct child, the naive exchange would leave each node
    /// pointing at itself, so that case rewires the pair explicitly.
    pub(crate) fn swap_nodes(&mut self, n1: NodeId, n2: NodeId) {
        if n1 == n2 {
            return;
        }

        let n1_side = self.side_of(n1);
        let (n1_parent, n1_left, n1_right) = (self[n1].parent, self[n1].left, self[n1].right);
        let n2_side = self.side_of(n2);
        let (n2_parent, n2_left, n2_right) = (self[n2].parent, self[n2].left, self[n2].right);

        {
            let a = &mut self[n1];
            a.parent = n2_parent;
            a.left = n2_left;
            a.right = n2_right;
        }
        {
            let b = &mut self[n2];
            b.parent = n1_parent;
            b.left = n1_left;
            b.right = n1_right;
        }

        if n1_right == Some(n2) {
            self[n2].right = Some(n1);
            self[n1].parent = Some(n2);
        } else if n2_right == Some(n1) {
            self[n1].right = Some(n2);
            self[n2].parent = Some(n1);
        } else if n1_left == Some(n2) {
            self[n2].left = Some(n1);
            self[n1].parent = Some(n2);
        } else if n2_left == Some(n1) {
            self[n1].left = Some(n2);
            self[n2].parent = Some(n1);
        }

        if let Some((parent, side)) = n1_side.filter(|&(parent, _)| parent != n2) {
            *self[parent].child_mut(side) = Some(n2);
        }
        for child in [n1_left, n1_right].into_iter().flatten() {
            if child != n2 {
                self[child].parent = Some(n2);
            }
        }

        if let Some((parent, side)) = n2_side.filter(|&(parent, _)| parent != n1) {
            *self[parent].child_mut(side) = Some(n1);
        }
        for child in [n2_left, n2_right].into_iter().flatten() {
            if child != n1 {
                self[child].parent = Some(n1);
            }
        }

        if self.root == Some(n1) {
            self.root = Some(n2);
        } else if self.root == Some(n2) {
            self.root = Some(n1);
        }

        self.swap_aux(n1, n2);
    }

    fn swap_aux(&mut self, n1: NodeId, n2: NodeId) {
        let (low, high) = if n1 < n2 { (n1, n2) } else { (n2, n1) };
        let (head, tail) = self.slots.split_at_mut(high);
        if let (Some(a), Some(b)) = (head[low].as_mut(), tail[0].as_mut()) {
            mem::swap(&mut a.aux, &mut b.aux);
        }
    }

    /// Removes the node with `key`. A node with two children first trades places with its
    /// in-order predecessor so that the node actually unlinked has at most one child.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<Removal<K, V, A>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;
        if self[id].left.is_some() && self[id].right.is_some() {
            let predecessor = self
                .predecessor(id)
                .expect("a node with a left child has a predecessor");
            log::debug!("store::remove swapping node {} with predecessor {}", id, predecessor);
            self.swap_nodes(id, predecessor);
        }
        Some(self.unlink(id))
    }

    /// Splices out a node with at most one child, promoting that child into its place.
    fn unlink(&mut self, id: NodeId) -> Removal<K, V, A> {
        let node = &self[id];
        debug_assert!(node.left.is_none() || node.right.is_none());
        let parent = node.parent;
        let child = node.left.or(node.right);
        let vacated = self.side_of(id);

        if let Some(child) = child {
            self[child].parent = parent;
        }
        self.replace_in_parent(parent, id, child);

        Removal {
            node: self.release(id),
            vacated,
        }
    }

    /// Every node id in post-order: both subtrees of a node come before the node itself.
    fn post_order(&self) -> Vec<NodeId> {
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();
        let mut order = Vec::with_capacity(self.len());
        while let Some(id) = pending.pop() {
            order.push(id);
            pending.extend(self[id].left);
            pending.extend(self[id].right);
        }
        order.reverse();
        order
    }

    /// Drops every node children-first, then resets the store.
    pub(crate) fn clear(&mut self) {
        for id in self.post_order() {
            drop(self.release(id));
        }
        self.slots.clear();
        self.vacant.clear();
        self.root = None;
    }

    /// Height of the subtree rooted at every live node, indexed by `NodeId`. A leaf has height 1.
    pub(crate) fn heights(&self) -> Vec<usize> {
        let mut heights = vec![0; self.slots.len()];
        for id in self.post_order() {
            let node = &self[id];
            let left = node.left.map_or(0, |left| heights[left]);
            let right = node.right.map_or(0, |right| heights[right]);
            heights[id] = left.max(right) + 1;
        }
        heights
    }

    /// Number of levels on the longest root-to-leaf path. Zero for an empty tree.
    pub(crate) fn height(&self) -> usize {
        self.root.map_or(0, |root| self.heights()[root])
    }

    /// Recomputes subtree heights bottom-up and reports whether no node's children differ in
    /// height by more than one.
    pub(crate) fn is_balanced(&self) -> bool {
        let heights = self.heights();
        let height_of = |child: Option<NodeId>| child.map_or(0, |child| heights[child]);
        self.post_order().into_iter().all(|id| {
            let node = &self[id];
            height_of(node.left).abs_diff(height_of(node.right)) <= 1
        })
    }

    /// Walks parent links from `id` up to the root.
    #[cfg(test)]
    pub(crate) fn depth(&self, mut id: NodeId) -> usize {
        let mut depth = 0;
        while let Some(parent) = self[id].parent {
            depth += 1;
            id = parent;
        }
        depth
    }
}
