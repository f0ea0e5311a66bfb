//! Text dump of a tree's top levels for eyeballing its shape while debugging.

use std::fmt::Write;

use crate::store::{Node, NodeId, NodeStore};

/// Levels below this are summarised with a single `...` line.
const MAX_LEVELS: usize = 5;

/// Renders `store` one node per line, children indented under their parent, left child first.
/// A missing child whose sibling exists is drawn as `·` so left and right can be told apart.
pub(crate) fn render<K, V, A, F>(store: &NodeStore<K, V, A>, label: F) -> String
where
    F: Fn(&Node<K, V, A>) -> String,
{
    let mut out = String::new();
    match store.root() {
        None => out.push_str("(empty)\n"),
        Some(root) => {
            let _ = writeln!(out, "{}", label(&store[root]));
            render_children(store, root, "", 1, &label, &mut out);
        }
    }
    out
}

fn render_children<K, V, A, F>(
    store: &NodeStore<K, V, A>,
    id: NodeId,
    prefix: &str,
    level: usize,
    label: &F,
    out: &mut String,
) where
    F: Fn(&Node<K, V, A>) -> String,
{
    let node = &store[id];
    if node.left.is_none() && node.right.is_none() {
        return;
    }
    if level == MAX_LEVELS {
        let _ = writeln!(out, "{prefix}└── ...");
        return;
    }

    for (child, last) in [(node.left, false), (node.right, true)] {
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        match child {
            Some(child) => {
                let _ = writeln!(out, "{prefix}{branch}{}", label(&store[child]));
                let prefix = format!("{prefix}{indent}");
                render_children(store, child, &prefix, level + 1, label, out);
            }
            None => {
                let _ = writeln!(out, "{prefix}{branch}·");
            }
        }
    }
}
