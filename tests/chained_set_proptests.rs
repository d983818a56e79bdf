// ChainedSet property tests over the public API.
//
// Property 1: membership and size track a std HashSet model.
//  - Operations: add, remove, contains, clear.
//  - Invariant: len() and contains() agree with the model after each step;
//               to_array() yields each live element exactly once.
//
// Property 2: snapshot fidelity after N distinct inserts.
//  - Invariant: exactly N references, pairwise distinct, all inserted.
//
// Property 3: release accounting.
//  - Invariant: every element accepted by the set reaches the release
//    callback exactly once by the time the set is dropped.
use chained_set::{ChainedSet, SetBuilder, SetConfig};
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Remove(String),
    Contains(String),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => "[a-e]{0,3}".prop_map(Op::Add),
        3 => "[a-e]{0,3}".prop_map(Op::Remove),
        3 => "[a-e]{0,3}".prop_map(Op::Contains),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_matches_model(
        capacity in 0usize..8,
        interval in 0usize..20,
        ops in proptest::collection::vec(arb_op(), 1..150),
    ) {
        let config = SetConfig::new(capacity, 0.75).with_check_interval(interval);
        let mut set: ChainedSet<String> = ChainedSet::with_config(config).unwrap();
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                Op::Add(k) => {
                    let expected = !model.contains(&k);
                    prop_assert_eq!(set.add(k.clone()), expected);
                    model.insert(k);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(set.remove(&k), model.remove(&k));
                }
                Op::Contains(k) => {
                    prop_assert_eq!(set.contains(&k), model.contains(&k));
                }
                Op::Clear => {
                    set.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(set.len(), model.len());
        }

        let exported = set.to_array().unwrap();
        prop_assert_eq!(exported.len(), model.len());
        let distinct: HashSet<&String> = exported.iter().copied().collect();
        prop_assert_eq!(distinct.len(), model.len());
        for k in &model {
            prop_assert!(set.contains(k));
        }
    }
}

proptest! {
    #[test]
    fn prop_snapshot_fidelity(keys in proptest::collection::hash_set(any::<u32>(), 0..500)) {
        let set: ChainedSet<u32> = keys.iter().copied().collect();
        let snap = set.snapshot().unwrap();
        prop_assert_eq!(snap.len(), keys.len());
        let seen: HashSet<u32> = snap.iter().copied().collect();
        prop_assert_eq!(seen, keys);
    }
}

proptest! {
    #[test]
    fn prop_release_once(
        keys in proptest::collection::vec(0u16..64, 0..200),
        removals in proptest::collection::vec(0u16..64, 0..50),
    ) {
        let counts: Rc<RefCell<BTreeMap<u16, usize>>> = Rc::new(RefCell::new(BTreeMap::new()));
        let sink = {
            let counts = counts.clone();
            move |k: u16| *counts.borrow_mut().entry(k).or_insert(0) += 1
        };
        let mut set = SetBuilder::new()
            .capacity(2)
            .check_interval(3)
            .release(sink)
            .build::<u16>()
            .unwrap();

        let mut accepted: HashSet<u16> = HashSet::new();
        for k in keys {
            if set.add(k) {
                accepted.insert(k);
            }
        }
        for k in removals {
            set.remove(&k);
        }
        drop(set);

        let counts = counts.borrow();
        prop_assert_eq!(counts.len(), accepted.len());
        for k in &accepted {
            prop_assert_eq!(counts.get(k).copied(), Some(1));
        }
    }
}
