#![cfg(test)]

// Property tests for ChainedSet kept inside the crate so they can reach the
// structural validator and the growth hook.

use crate::chained_set::{ChainedSet, Growth};
use crate::config::SetConfig;
use crate::error::InsertError;
use hashbrown::HashSet;
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

type Released = Rc<RefCell<Vec<u16>>>;
type Sink = Box<dyn FnMut(u16)>;
type Sut = ChainedSet<u16, fn(&u16, usize) -> usize, fn(&u16, &u16) -> bool, Sink>;

// Few distinct buckets on purpose: long chains exercise unlink in every position.
fn clumpy(x: &u16, n: usize) -> usize {
    (*x as usize / 3) % n
}

fn same(a: &u16, b: &u16) -> bool {
    a == b
}

fn sut(config: SetConfig) -> (Sut, Released) {
    let released: Released = Rc::new(RefCell::new(Vec::new()));
    let sink: Sink = {
        let released = released.clone();
        Box::new(move |x| released.borrow_mut().push(x))
    };
    let set = ChainedSet::create(
        config,
        clumpy as fn(&u16, usize) -> usize,
        same as fn(&u16, &u16) -> bool,
        sink,
    )
    .unwrap();
    (set, released)
}

#[derive(Clone, Debug)]
enum Op {
    Add(u16),
    Insert(u16),
    Remove(u16),
    Take(u16),
    Contains(u16),
    Grow,
    Clear,
    Snapshot,
}

fn arb_config() -> impl Strategy<Value = SetConfig> {
    (
        1usize..=4,
        prop_oneof![Just(0.5f64), Just(0.75), Just(2.0)],
        0usize..=4,
        prop_oneof![Just(4usize), Just(16), Just(0)],
    )
        .prop_map(|(cap, lf, interval, max)| {
            SetConfig::new(cap, lf)
                .with_check_interval(interval)
                .with_max_capacity(max)
        })
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = 0u16..48;
    proptest::collection::vec(
        prop_oneof![
            4 => key.clone().prop_map(Op::Add),
            2 => key.clone().prop_map(Op::Insert),
            2 => key.clone().prop_map(Op::Remove),
            1 => key.clone().prop_map(Op::Take),
            2 => key.prop_map(Op::Contains),
            1 => Just(Op::Grow),
            1 => Just(Op::Clear),
            1 => Just(Op::Snapshot),
        ],
        1..200,
    )
}

// Property: state-machine equivalence against hashbrown::HashSet.
// - add/insert succeed exactly when the model lacks the key; insert returns
//   the rejected element.
// - remove releases exactly the removed key; take never releases.
// - clear releases every stored key once.
// - after every step the chains validate: correct buckets, no duplicates,
//   len equals traversal count, incremental load matches len / capacity.
// - capacity never shrinks and never passes the configured ceiling.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(config in arb_config(), ops in arb_ops()) {
        let ceiling = config.normalized().max_capacity;
        let (mut set, released) = sut(config);
        let mut model: HashSet<u16> = HashSet::new();
        let mut expected_released: Vec<u16> = Vec::new();
        let mut capacity = set.capacity();

        for op in ops {
            match op {
                Op::Add(k) => {
                    prop_assert_eq!(set.add(k), model.insert(k));
                }
                Op::Insert(k) => {
                    match set.insert(k) {
                        Ok(()) => {
                            prop_assert!(model.insert(k));
                        }
                        Err(InsertError::Duplicate(back)) => {
                            prop_assert_eq!(back, k);
                            prop_assert!(model.contains(&k));
                        }
                        Err(InsertError::AllocationFailure(_)) => {
                            prop_assert!(false, "unexpected allocation failure");
                        }
                    }
                }
                Op::Remove(k) => {
                    let removed = set.remove(&k);
                    prop_assert_eq!(removed, model.remove(&k));
                    if removed {
                        expected_released.push(k);
                    }
                }
                Op::Take(k) => {
                    let taken = set.take(&k);
                    prop_assert_eq!(taken, model.take(&k));
                }
                Op::Contains(k) => {
                    prop_assert_eq!(set.contains(&k), model.contains(&k));
                }
                Op::Grow => {
                    match set.grow() {
                        Growth::Grown { from, to } => {
                            prop_assert_eq!(from, capacity);
                            prop_assert!(to > from && to <= ceiling);
                        }
                        Growth::AtMaximum => {
                            prop_assert_eq!(set.capacity(), ceiling);
                        }
                        Growth::AllocationFailed => {
                            prop_assert!(false, "unexpected allocation failure");
                        }
                    }
                }
                Op::Clear => {
                    expected_released.extend(model.drain());
                    set.clear();
                    prop_assert_eq!(set.capacity(), capacity);
                }
                Op::Snapshot => {
                    let snap = set.snapshot().unwrap();
                    prop_assert_eq!(snap.len(), model.len());
                    let seen: HashSet<u16> = snap.iter().copied().collect();
                    prop_assert_eq!(seen.len(), model.len());
                    prop_assert!(seen.iter().all(|k| model.contains(k)));
                }
            }

            set.validate();
            prop_assert_eq!(set.len(), model.len());
            prop_assert_eq!(set.is_empty(), model.is_empty());
            prop_assert!(set.capacity() >= capacity, "capacity shrank");
            prop_assert!(set.capacity() <= ceiling);
            capacity = set.capacity();

            let mut got = released.borrow().clone();
            let mut want = expected_released.clone();
            got.sort_unstable();
            want.sort_unstable();
            prop_assert_eq!(got, want);
        }

        // Dropping the set releases whatever is left.
        expected_released.extend(model.iter().copied());
        drop(set);
        let mut got = released.borrow().clone();
        got.sort_unstable();
        expected_released.sort_unstable();
        prop_assert_eq!(got, expected_released);
    }
}

// Property: growth keeps every member reachable, with or without throttling.
proptest! {
    #[test]
    fn prop_growth_preserves_members(
        keys in proptest::collection::hash_set(any::<u16>(), 1..400),
        interval in 0usize..=120,
    ) {
        let (mut set, released) = sut(SetConfig::new(1, 0.5).with_check_interval(interval));
        for &k in &keys {
            prop_assert!(set.add(k));
        }
        for &k in &keys {
            prop_assert!(set.contains(&k));
        }
        set.validate();
        if keys.len() > interval + 1 {
            prop_assert!(set.capacity() > 1, "no growth after {} inserts", keys.len());
        }
        prop_assert!(released.borrow().is_empty());
    }
}
