#![cfg(test)]

// Property tests for ProbeMap kept inside the crate so they can check
// internal invariants (the offset permutation) alongside the public
// behavior.

use crate::probe_map::{InsertError, ProbeMap};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::BuildHasherDefault;

type DetState = BuildHasherDefault<DefaultHasher>;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i64),
    Remove(usize),
    Get(usize),
    Mutate(usize, i64),
    GetOrInsert(usize, i64),
}

const POOL: usize = 8;

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..POOL, any::<i64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        (0..POOL).prop_map(Op::Remove),
        (0..POOL).prop_map(Op::Get),
        (0..POOL, any::<i64>()).prop_map(|(k, v)| Op::Mutate(k, v)),
        (0..POOL, any::<i64>()).prop_map(|(k, v)| Op::GetOrInsert(k, v)),
    ]
}

fn key(i: usize) -> String {
    format!("k{}", i)
}

// Structural invariants that must hold at every operation boundary:
// cached len matches a scan, the load factor is exactly len/capacity, and
// the offset permutation covers 1..capacity.
fn check_invariants(m: &ProbeMap<DetState>) {
    assert_eq!(m.len(), m.keys().count());
    assert_eq!(m.load_factor(), m.len() as f64 / m.capacity() as f64);
    assert!(m.len() <= m.capacity());
    let got: BTreeSet<usize> = m.probe_offsets().iter().copied().collect();
    let want: BTreeSet<usize> = (1..m.capacity()).collect();
    assert_eq!(got, want, "offsets must remain a permutation");
}

proptest! {
    // Model-based parity with std's HashMap under random op sequences,
    // with the structural invariants re-checked after every step.
    #[test]
    fn prop_matches_hashmap_model(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        let mut m: ProbeMap<DetState> = ProbeMap::with_hasher(DetState::default());
        let mut model: HashMap<String, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(i, v) => {
                    let k = key(i);
                    let expect_dup = model.contains_key(&k);
                    match m.insert(k.clone(), v) {
                        Ok(()) => {
                            prop_assert!(!expect_dup);
                            model.insert(k, v);
                        }
                        Err(InsertError::DuplicateKey) => prop_assert!(expect_dup),
                    }
                }
                Op::Remove(i) => {
                    let k = key(i);
                    prop_assert_eq!(m.remove(&k), model.remove(&k));
                }
                Op::Get(i) => {
                    let k = key(i);
                    prop_assert_eq!(m.get(&k), model.get(&k).copied());
                    prop_assert_eq!(m.contains(&k), model.contains_key(&k));
                }
                Op::Mutate(i, v) => {
                    let k = key(i);
                    match (m.get_mut(&k), model.get_mut(&k)) {
                        (Some(slot), Some(ms)) => { *slot = v; *ms = v; }
                        (None, None) => {}
                        _ => prop_assert!(false, "get_mut presence diverged"),
                    }
                }
                Op::GetOrInsert(i, v) => {
                    let k = key(i);
                    let got = *m.get_or_insert(k.clone(), v);
                    let want = *model.entry(k).or_insert(v);
                    prop_assert_eq!(got, want);
                }
            }

            prop_assert_eq!(m.len(), model.len());
            check_invariants(&m);
        }

        // Final parity sweep over the whole pool.
        for i in 0..POOL {
            let k = key(i);
            prop_assert_eq!(m.get(&k), model.get(&k).copied());
        }
        let mine: BTreeSet<String> = m.keys().map(str::to_string).collect();
        let theirs: BTreeSet<String> = model.keys().cloned().collect();
        prop_assert_eq!(mine, theirs);
    }

    // Resize preserves the pair set exactly and strictly doubles capacity.
    #[test]
    fn prop_resize_preserves_pairs(n in 5usize..60) {
        let mut m: ProbeMap<DetState> = ProbeMap::with_hasher(DetState::default());
        let mut caps = vec![m.capacity()];
        for i in 0..n {
            let snapshot: BTreeSet<(String, i64)> =
                m.iter().map(|(k, v)| (k.to_string(), v)).collect();
            let cap = m.capacity();
            m.insert(key(i), i as i64).unwrap();

            if m.capacity() != cap {
                prop_assert!(m.capacity() > cap, "capacity strictly increases");
                caps.push(m.capacity());
                let after: BTreeSet<(String, i64)> = m
                    .iter()
                    .filter(|(k, _)| *k != key(i))
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                prop_assert_eq!(snapshot, after, "resize must preserve the pair set");
            }
            check_invariants(&m);
        }
        for i in 0..n {
            prop_assert_eq!(m.get(&key(i)), Some(i as i64));
        }
        for w in caps.windows(2) {
            prop_assert_eq!(w[1], w[0] * 2);
        }
    }
}
