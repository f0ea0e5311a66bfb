//! Checks whether every leaf of a binary tree sits at the same depth.
//!
//! # Examples
//!
//! ```
//! use avlbst::equal_paths::{equal_paths, Node};
//!
//! //     1
//! //    / \
//! //   2   3
//! let tree = Node::new(1).with_left(Node::new(2)).with_right(Node::new(3));
//! assert!(equal_paths(Some(&tree)));
//!
//! //     1
//! //    / \
//! //   2   3
//! //  /
//! // 4
//! let tree = Node::new(1)
//!     .with_left(Node::new(2).with_left(Node::new(4)))
//!     .with_right(Node::new(3));
//! assert!(!equal_paths(Some(&tree)));
//! ```

/// A plain owned binary tree node. Each node owns its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    /// The payload. Not inspected by [`equal_paths`].
    pub key: T,
    /// Left subtree.
    pub left: Option<Box<Node<T>>>,
    /// Right subtree.
    pub right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    /// A node with no children.
    pub fn new(key: T) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// Replaces the left subtree.
    pub fn with_left(mut self, left: Node<T>) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    /// Replaces the right subtree.
    pub fn with_right(mut self, right: Node<T>) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Returns `true` if all root-to-leaf paths have the same length. An empty tree trivially
/// qualifies. A node with a single child is not a leaf, so a lone chain of nodes qualifies too.
pub fn equal_paths<T>(root: Option<&Node<T>>) -> bool {
    let Some(root) = root else {
        return true;
    };
    let goal = max_depth(Some(root));
    leaves_at(root, 1, goal)
}

/// Number of nodes on the longest root-to-leaf path.
fn max_depth<T>(node: Option<&Node<T>>) -> usize {
    match node {
        None => 0,
        Some(node) => 1 + max_depth(node.left.as_deref()).max(max_depth(node.right.as_deref())),
    }
}

fn leaves_at<T>(node: &Node<T>, depth: usize, goal: usize) -> bool {
    if node.is_leaf() {
        return depth == goal;
    }
    [node.left.as_deref(), node.right.as_deref()]
        .into_iter()
        .flatten()
        .all(|child| leaves_at(child, depth + 1, goal))
}
