//! Property tests checking `SkipList` against `BTreeMap` as a model, and the
//! structural invariants of every level after each operation.

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use probskip::{Deterministic, Geometric, LevelGenerator, NaiveGeometric, SkipList, SkipNode};

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, u32),
    Delete(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0_u8..64, any::<u32>()).prop_map(|(key, value)| Op::Insert(key, value)),
        1 => (0_u8..64).prop_map(Op::Delete),
    ]
}

/// Every level runs from header to finish in strictly increasing key order,
/// holds exactly the nodes tall enough for it, and is non-empty.
fn check_structure<G>(list: &SkipList<u8, u32, G>) -> Result<(), TestCaseError> {
    prop_assert_eq!(list.header().level(), list.level());

    let entries: Vec<&SkipNode<u8, u32>> = list
        .traverse(0)
        .map(|(_, node)| node)
        .filter(|node| !node.is_sentinel())
        .collect();
    prop_assert_eq!(entries.len(), list.size());

    for level in 0..list.level() {
        let nodes: Vec<&SkipNode<u8, u32>> = list.traverse(level).map(|(_, node)| node).collect();
        prop_assert!(nodes.first().is_some_and(|node| node.node_key() == list.header().node_key()));
        prop_assert!(nodes.last().is_some_and(|node| node.node_key() == list.finish().node_key()));
        prop_assert!(nodes.windows(2).all(|pair| pair[0].node_key() < pair[1].node_key()));
        prop_assert!(nodes[1..nodes.len() - 1].iter().all(|node| node.level() > level));

        let expected = entries.iter().filter(|node| node.level() > level).count();
        prop_assert!(expected > 0, "level {} holds no entry", level);
        prop_assert_eq!(nodes.len() - 2, expected);
    }
    Ok(())
}

fn run<G: LevelGenerator>(list: &mut SkipList<u8, u32, G>, ops: &[Op]) -> Result<(), TestCaseError> {
    let mut model = BTreeMap::new();
    for op in ops {
        match *op {
            Op::Insert(key, value) => {
                prop_assert_eq!(*list.insert(key, value), value);
                model.insert(key, value);
            }
            Op::Delete(key) => {
                let removed = list.delete(&key).and_then(SkipNode::into_inner);
                prop_assert_eq!(removed, model.remove(&key).map(|value| (key, value)));
            }
        }
        prop_assert_eq!(list.size(), model.len());
        check_structure(list)?;
    }

    let entries: Vec<(u8, u32)> = list.iter().map(|(&k, &v)| (k, v)).collect();
    let expected: Vec<(u8, u32)> = model.iter().map(|(&k, &v)| (k, v)).collect();
    prop_assert_eq!(entries, expected);
    for key in 0..64 {
        prop_assert_eq!(list.get(&key), model.get(&key));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn geometric_matches_model(
        ops in prop::collection::vec(op(), 0..200),
        max_level in 0_usize..8,
        seed in any::<u64>(),
    ) {
        let generator = Geometric::with_seed(max_level, 0.5, seed).unwrap();
        let mut list = SkipList::with_level_generator(generator);
        run(&mut list, &ops)?;
        prop_assert!(list.level() <= max_level + 1);
    }

    #[test]
    fn naive_geometric_matches_model(
        ops in prop::collection::vec(op(), 0..200),
        p in 0.05_f64..0.95,
        seed in any::<u64>(),
    ) {
        let generator = NaiveGeometric::with_seed(6, p, seed).unwrap();
        let mut list = SkipList::with_level_generator(generator);
        run(&mut list, &ops)?;
        prop_assert!(list.level() <= 7);
    }

    /// Inserts record the update path only down to the levels they need, so
    /// any replayed shape must keep every level consistent.
    #[test]
    fn replayed_levels_keep_structure(
        ops in prop::collection::vec(op(), 0..200),
        levels in prop::collection::vec(0_usize..6, 1..16),
    ) {
        let generator = Deterministic::new(levels.into_iter().cycle());
        let mut list = SkipList::with_level_generator(generator);
        run(&mut list, &ops)?;
    }

    #[test]
    fn deleting_absent_keys_changes_nothing(
        keys in prop::collection::btree_set(0_u8..128, 0..64),
        absent in 128_u8..=255,
        seed in any::<u64>(),
    ) {
        let mut list = SkipList::with_level_generator(Geometric::with_seed(16, 0.5, seed).unwrap());
        list.extend(keys.iter().map(|&key| (key, u32::from(key))));

        let level = list.level();
        let before: Vec<u8> = list.iter().map(|(&k, _)| k).collect();
        prop_assert!(list.delete(&absent).is_none());
        prop_assert_eq!(list.size(), keys.len());
        prop_assert_eq!(list.level(), level);
        let after: Vec<u8> = list.iter().map(|(&k, _)| k).collect();
        prop_assert_eq!(before, after);
    }
}
