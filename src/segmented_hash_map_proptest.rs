#![cfg(test)]

// Property tests for SegmentedHashMap kept inside the crate so they do
// not require feature gates to access internal modules.

use crate::comparer::Comparer;
use crate::SegmentedHashMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    TryInsert(usize, i32),
    InsertIfAbsent(usize, i32),
    Remove(usize),
    RemoveEntry(usize),
    Get(usize),
    Mutate(usize, i32),
    Iterate,
    CursorDrain,
    EnsureCapacity(usize),
    Trim,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> String {
    pool[i].clone()
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryInsert(i, v)),
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::InsertIfAbsent(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::RemoveEntry),
            4 => idx.clone().prop_map(OpI::Get),
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            2 => Just(OpI::Iterate),
            2 => Just(OpI::CursorDrain),
            1 => (0usize..64).prop_map(OpI::EnsureCapacity),
            1 => Just(OpI::Trim),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_state_machine<C: Comparer<String>>(
    mut sut: SegmentedHashMap<String, i32, C>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(&pool, i);
                let previous = sut.insert(k.clone(), v);
                prop_assert_eq!(previous, model.insert(k, v));
            }
            OpI::TryInsert(i, v) => {
                let k = key_from(&pool, i);
                let already = model.contains_key(&k);
                match sut.try_insert(k.clone(), v) {
                    Ok(()) => {
                        prop_assert!(!already, "strict add must fail on duplicate");
                        model.insert(k, v);
                    }
                    Err(crate::InsertError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        // Rejection leaves the stored value alone.
                        prop_assert_eq!(sut.get(&k), model.get(&k));
                    }
                }
            }
            OpI::InsertIfAbsent(i, v) => {
                let k = key_from(&pool, i);
                let already = model.contains_key(&k);
                let added = sut.insert_if_absent(k.clone(), v);
                prop_assert_eq!(added, !already);
                if added {
                    model.insert(k, v);
                } else {
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                }
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
                prop_assert!(sut.get(&k).is_none());
            }
            OpI::RemoveEntry(i) => {
                let k = key_from(&pool, i);
                match (sut.remove_entry(&k), model.remove(&k)) {
                    (Some((rk, rv)), Some(mv)) => {
                        prop_assert_eq!(&rk, &k);
                        prop_assert_eq!(rv, mv);
                    }
                    (None, None) => {}
                    (sut_side, model_side) => {
                        return Err(TestCaseError::fail(format!(
                            "remove_entry diverged: {:?} vs {:?}",
                            sut_side, model_side
                        )));
                    }
                }
            }
            OpI::Get(i) => {
                let k = key_from(&pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                prop_assert_eq!(sut.get_key_value(&k).map(|(_, v)| *v), model.get(&k).copied());
            }
            OpI::Mutate(i, d) => {
                let k = key_from(&pool, i);
                match sut.get_mut(&k) {
                    Some(value) => {
                        *value = value.saturating_add(d);
                        let mv = model.get_mut(&k).expect("model must agree on presence");
                        *mv = mv.saturating_add(d);
                    }
                    None => prop_assert!(!model.contains_key(&k)),
                }
            }
            OpI::Iterate => {
                let sut_keys: BTreeSet<String> = sut.keys().cloned().collect();
                let model_keys: BTreeSet<String> = model.keys().cloned().collect();
                prop_assert_eq!(sut_keys, model_keys);
                let sut_sum: i64 = sut.values().map(|v| *v as i64).sum();
                let model_sum: i64 = model.values().map(|v| *v as i64).sum();
                prop_assert_eq!(sut_sum, model_sum);
            }
            OpI::CursorDrain => {
                let mut cursor = sut.cursor();
                let mut seen: BTreeSet<String> = BTreeSet::new();
                while cursor
                    .move_next(&sut)
                    .expect("no mutation happens during the drain")
                {
                    let (key, value) = cursor.current(&sut).unwrap();
                    prop_assert_eq!(model.get(key), Some(value));
                    prop_assert!(seen.insert(key.clone()), "cursor must not repeat a key");
                }
                prop_assert_eq!(seen.len(), model.len());
            }
            OpI::EnsureCapacity(n) => {
                let capacity = sut.ensure_capacity(n);
                prop_assert!(capacity >= n);
                prop_assert_eq!(sut.capacity(), capacity);
            }
            OpI::Trim => {
                sut.trim_excess();
                prop_assert!(sut.capacity() >= sut.len());
                for (k, v) in &model {
                    prop_assert_eq!(sut.get(k), Some(v));
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                prop_assert!(sut.is_empty());
            }
        }

        // Post-conditions after each op.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.iter().count(), model.len());
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap
// across random operation sequences, exercising all three insert modes,
// both remove flavors, in-place mutation, iteration, cursor drains,
// capacity reservation, trim, and clear.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(SegmentedHashMap::new(), pool, ops)?;
    }
}

// Comparer that sends every key to one bucket, to stress equality
// resolution and chain maintenance.
#[derive(Clone, Default)]
struct CollidingComparer;

impl Comparer<String> for CollidingComparer {
    fn hash(&self, _key: &String) -> u64 {
        0
    }
    fn equals(&self, a: &String, b: &String) -> bool {
        a == b
    }
}

// Property: same state-machine invariants under worst-case collisions;
// every operation degenerates to a single-chain walk.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(SegmentedHashMap::with_comparer(CollidingComparer), pool, ops)?;
    }
}

// Property: mass insert, random removal, then trim keeps every survivor
// retrievable and shrinks storage when most entries are gone.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_trim_after_churn(
        total in 64usize..512,
        keep_every in 2usize..16,
    ) {
        let mut sut: SegmentedHashMap<u64, u64> = SegmentedHashMap::new();
        for key in 0..total as u64 {
            sut.insert(key, key * 7);
        }
        let grown = sut.capacity();
        prop_assert!(grown >= total);
        for key in 0..total as u64 {
            if key % keep_every as u64 != 0 {
                sut.remove(&key);
            }
        }
        sut.trim_excess();
        prop_assert!(sut.capacity() <= grown);
        prop_assert!(sut.capacity() >= sut.len());
        for key in 0..total as u64 {
            let expected = (key % keep_every as u64 == 0).then_some(key * 7);
            prop_assert_eq!(sut.get(&key).copied(), expected);
        }
    }
}
