use std::collections::BTreeMap;

use quickcheck::{Arbitrary, Gen};

use crate::{avl, bst};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Remove the K from the data structure
    Remove(K),
    /// Compare iterators
    Iter,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }
}

/// Applies a set of operations to an AVL tree and a `BTreeMap`, checking after every step that
/// they agree and that the tree is still a valid AVL tree.
fn do_avl_ops(ops: &[Op<i8, i8>]) -> avl::Tree<i8, i8> {
    let mut tree = avl::Tree::new();
    let mut map = BTreeMap::new();
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                tree.insert(*k, *v);
                map.insert(*k, *v);
            }
            Op::Remove(k) => {
                assert_eq!(tree.remove(k), map.remove(k));
            }
            Op::Iter => {
                assert!(tree.iter().eq(map.iter()));
            }
        }
        tree.assert_invariants();
        assert_eq!(tree.len(), map.len());
    }
    assert!(tree.iter().eq(map.iter()));
    tree
}

quickcheck::quickcheck! {
    fn avl_matches_btree_map(ops: Vec<Op<i8, i8>>) -> bool {
        let tree = do_avl_ops(&ops);
        tree.is_balanced()
    }

    fn bst_matches_btree_map(ops: Vec<Op<i8, i8>>) -> bool {
        let mut tree = bst::Tree::new();
        let mut map = BTreeMap::new();
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
                Op::Iter => {
                    if !tree.iter().eq(map.iter()) {
                        return false;
                    }
                }
            }
        }
        tree.iter().eq(map.iter()) && tree.len() == map.len()
    }

    fn iteration_is_strictly_ascending(xs: Vec<i16>) -> bool {
        let tree: avl::Tree<_, _> = xs.iter().map(|&x| (x, ())).collect();
        let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
        keys.windows(2).all(|pair| pair[0] < pair[1])
    }

    fn height_is_logarithmic(xs: Vec<i16>) -> bool {
        let tree: avl::Tree<_, _> = xs.iter().map(|&x| (x, ())).collect();
        let bound = (1.44 * ((tree.len() + 2) as f64).log2()).ceil() as usize;
        tree.height() <= bound
    }

    fn insert_then_remove_round_trips(xs: Vec<i8>, extra: i8) -> bool {
        let mut tree: avl::Tree<_, _> = xs.iter().map(|&x| (x, x)).collect();
        if tree.contains_key(&extra) {
            return true;
        }
        let before: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();

        tree.insert(extra, extra);
        tree.remove(&extra);
        tree.assert_invariants();

        tree.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>() == before
    }
}

#[test]
fn quickcheck_found_invalid_height_after_deletion() {
    use Op::*;

    let ops = [
        Insert(77, -58),
        Insert(-22, -58),
        Insert(0, -37),
        Insert(-127, 79),
        Insert(5, 127),
        Insert(109, -83),
        Insert(-58, 91),
        Insert(-105, -46),
        Insert(-65, 8),
        Insert(-86, -51),
        Insert(45, -112),
        Insert(-11, 3),
        Insert(-39, 27),
        Remove(0),
        Remove(-122),
    ];
    do_avl_ops(&ops);
}

#[test]
fn quickcheck_found_invalid_height_after_deletion2() {
    use Op::*;

    let ops = [
        Insert(-49, -110),
        Insert(-107, 80),
        Insert(127, 59),
        Insert(-22, 71),
        Insert(-77, 0),
        Insert(-128, 0),
        Insert(-119, 17),
        Insert(-69, -11),
        Insert(-122, 29),
        Insert(109, -80),
        Insert(115, 40),
        Insert(-118, 53),
        Remove(-49),
        Remove(-77),
    ];
    do_avl_ops(&ops);
}
