use avlbst::avl::Tree;
use quickcheck_macros::quickcheck;

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a hashmap.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], bst: &mut Tree<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                bst.insert(k.clone(), v.clone());
                map.insert(k.clone(), v.clone());
            }
            Op::Remove(k) => {
                assert_eq!(bst.remove(k), map.remove(k));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.len() == map.len()
        && tree.is_balanced()
        && map.keys().all(|key| tree.get(key) == map.get(key))
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.get(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.get(x).is_none() && tree.find(x) == tree.end())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    tree.is_balanced()
        && deletes.iter().all(|x| tree.get(x).is_none())
        && still_present.iter().all(|x| tree.get(x).is_some())
}

#[quickcheck]
fn iterates_sorted_and_deduplicated(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, ());
    }

    let mut expected = xs;
    expected.sort_unstable();
    expected.dedup();

    tree.iter().map(|(k, _)| *k).eq(expected)
}

#[quickcheck]
fn find_yields_the_tail(xs: Vec<i8>, probe: i8) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|&x| (x, ())).collect();
    let tail: Vec<_> = tree.find(&probe).map(|(k, _)| *k).collect();

    if tree.contains_key(&probe) {
        let expected: Vec<_> = tree.iter().map(|(k, _)| *k).filter(|k| *k >= probe).collect();
        tail == expected
    } else {
        tail.is_empty()
    }
}

#[quickcheck]
fn clear_empties(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_, _> = xs.iter().map(|&x| (x, x)).collect();
    tree.clear();
    tree.is_empty() && tree.begin() == tree.end()
}
