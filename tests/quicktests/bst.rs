use avlbst::bst::Tree;
use quickcheck_macros::quickcheck;

use std::collections::HashMap;

use crate::Op;

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut tree = Tree::new();
    let mut map = HashMap::new();

    for op in &ops {
        match op {
            Op::Insert(k, v) => {
                tree.insert(*k, *v);
                map.insert(*k, *v);
            }
            Op::Remove(k) => {
                if tree.remove(k) != map.remove(k) {
                    return false;
                }
            }
        }
    }

    tree.len() == map.len() && map.keys().all(|key| tree.get(key) == map.get(key))
}

#[quickcheck]
fn insert_overwrites(xs: Vec<(u8, u8)>) -> bool {
    let mut tree = Tree::new();
    let mut last = HashMap::new();
    for (k, v) in &xs {
        tree.insert(*k, *v);
        last.insert(*k, *v);
    }

    tree.len() == last.len() && last.iter().all(|(k, v)| tree[k] == *v)
}

#[quickcheck]
fn iterates_sorted(xs: Vec<i16>) -> bool {
    let tree: Tree<_, _> = xs.iter().map(|&x| (x, ())).collect();
    let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn missing_keys_are_errors(xs: Vec<u8>) -> bool {
    // Only even keys go in.
    let tree: Tree<_, _> = xs.iter().map(|&x| (x & !1, ())).collect();
    xs.iter()
        .map(|&x| x | 1)
        .all(|odd| tree.try_get(&odd) == Err(avlbst::Error::KeyNotFound))
}
