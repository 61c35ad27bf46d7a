#![cfg(test)]

// Property tests for ChainedTable kept inside the crate so they can inspect
// the bucket array and chain links directly.

use crate::chain_table::ChainedTable;
use crate::config::TableConfig;
use crate::error::CursorError;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
    Walk,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            1 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Walk),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Every chained entry sits in its home bucket and no key appears twice.
fn check_layout<S: BuildHasher>(t: &ChainedTable<i32, S>) -> Result<(), TestCaseError> {
    let mut seen = BTreeSet::new();
    for (b, head) in t.buckets().iter().enumerate() {
        let mut cur = *head;
        while let Some(k) = cur {
            let e = t.entry(k).expect("chain link points at live entry");
            prop_assert_eq!(t.bucket_index(&e.key), b);
            prop_assert!(seen.insert(e.key.to_string()), "key chained twice");
            cur = e.next;
        }
    }
    prop_assert_eq!(seen.len(), t.len());
    Ok(())
}

fn run_state_machine<S: BuildHasher>(
    mut sut: ChainedTable<i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let prev = sut.insert(k, v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(!sut.contains(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.get_mut(k) {
                    *v = v.saturating_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Iterate => {
                let got: Vec<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                let keys: BTreeSet<&String> = got.iter().map(|(k, _)| k).collect();
                prop_assert_eq!(keys.len(), got.len(), "iteration repeated a key");
                let as_map: HashMap<String, i32> = got.into_iter().collect();
                prop_assert_eq!(&as_map, &model);
            }
            OpI::Walk => {
                let expected: Vec<(&str, &i32)> = sut.iter().collect();
                let mut c = sut.cursor();
                let mut got = Vec::new();
                while c.has_next() {
                    got.push(c.next(&sut).expect("unmodified table"));
                }
                prop_assert_eq!(got, expected);
                prop_assert_eq!(c.next(&sut), Err(CursorError::Exhausted));
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        check_layout(&sut)?;
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the previous value exactly when the key was present.
// - get/contains/remove agree with the model; absent removes are no-ops.
// - iter and the cursor yield each live entry exactly once, in the same order.
// - every entry is chained in bucket hash(key) % capacity, once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedTable::new(), pool, ops)?;
    }
}

// Property: Same invariants with a single starting bucket and a tiny
// threshold, so nearly every insert crosses the growth point.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_growth((pool, ops) in arb_scenario()) {
        let cfg = TableConfig::new()
            .with_initial_capacity(1)
            .with_load_factor_threshold(0.5);
        let sut = ChainedTable::with_config(cfg).expect("valid config");
        run_state_machine(sut, pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain splicing.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same invariants under worst-case collisions: every key shares
// one chain, so removal exercises head, middle and tail splices.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedTable::with_hasher(ConstBuildHasher), pool, ops)?;
    }
}
