use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug, Arbitrary)]
enum TableOp {
    #[proptest(weight = 4)]
    Add(#[proptest(strategy = "0u16..128")] u16, u32),
    #[proptest(weight = 3)]
    Set(#[proptest(strategy = "0u16..128")] u16, u32),
    #[proptest(weight = 3)]
    Remove(#[proptest(strategy = "0u16..128")] u16),
    #[proptest(weight = 3)]
    Get(#[proptest(strategy = "0u16..128")] u16),
    #[proptest(weight = 1)]
    Clear,
}

#[derive(Clone, Debug, Arbitrary)]
enum HeapOp {
    #[proptest(weight = 5)]
    Add(#[proptest(strategy = "-50i16..50")] i16),
    #[proptest(weight = 2)]
    Poll,
    #[proptest(weight = 2)]
    Remove(#[proptest(strategy = "-50i16..50")] i16),
    #[proptest(weight = 1)]
    Peek,
}

fn sequence_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A four-symbol alphabet keeps shared prefixes and removals frequent.
    prop::collection::vec(0u8..4, 0..=8)
}

#[derive(Clone, Debug, Arbitrary)]
enum TrieOp {
    #[proptest(weight = 5)]
    Add(#[proptest(strategy = "sequence_strategy()")] Vec<u8>),
    #[proptest(weight = 4)]
    Remove(#[proptest(strategy = "sequence_strategy()")] Vec<u8>),
    #[proptest(weight = 2)]
    Contains(#[proptest(strategy = "sequence_strategy()")] Vec<u8>),
}

/// Smallest element of a multiset model.
fn model_min(model: &[i16]) -> Option<i16> {
    model.iter().copied().min()
}

fn model_remove(model: &mut Vec<i16>, item: i16) -> bool {
    match model.iter().position(|&x| x == item) {
        Some(pos) => {
            model.swap_remove(pos);
            true
        }
        None => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_hash_table_equivalence(ops in prop::collection::vec(any::<TableOp>(), 0..=600)) {
        let mut t: HashTable<u16, u32> = HashTable::new();
        let mut m: HashMap<u16, u32> = HashMap::new();

        for op in ops {
            match op {
                TableOp::Add(k, v) => {
                    let res = t.add(k, v);
                    if m.contains_key(&k) {
                        prop_assert_eq!(res, Err(CollectionError::DuplicateKey));
                    } else {
                        prop_assert_eq!(res, Ok(()));
                        m.insert(k, v);
                    }
                }
                TableOp::Set(k, v) => {
                    prop_assert_eq!(t.set(k, v), m.insert(k, v));
                }
                TableOp::Remove(k) => {
                    prop_assert_eq!(t.remove(&k), m.remove(&k).is_some());
                }
                TableOp::Get(k) => {
                    prop_assert_eq!(t.try_get(&k), m.get(&k));
                    prop_assert_eq!(t.get(&k).is_err(), !m.contains_key(&k));
                }
                TableOp::Clear => {
                    t.clear();
                    m.clear();
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        t.validate();
        let mut got: Vec<(u16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let mut expected: Vec<(u16, u32)> = m.into_iter().collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_heap_equivalence(ops in prop::collection::vec(any::<HeapOp>(), 0..=600)) {
        let mut h: BinaryHeap<i16> = BinaryHeap::new();
        let mut model: Vec<i16> = Vec::new();

        for op in ops {
            match op {
                HeapOp::Add(x) => {
                    h.add(x);
                    model.push(x);
                }
                HeapOp::Poll => {
                    let expected = model_min(&model);
                    if let Some(min) = expected {
                        model_remove(&mut model, min);
                    }
                    prop_assert_eq!(h.poll().ok(), expected);
                }
                HeapOp::Remove(x) => {
                    prop_assert_eq!(h.remove(&x), model_remove(&mut model, x));
                }
                HeapOp::Peek => {
                    prop_assert_eq!(h.peek().ok().copied(), model_min(&model));
                }
            }
            h.validate();
            prop_assert_eq!(h.len(), model.len());
        }

        model.sort_unstable();
        prop_assert_eq!(h.into_sorted_vec(), model);
    }

    #[test]
    fn prop_max_heap_polls_non_increasing(items in prop::collection::vec(any::<i32>(), 0..=300)) {
        let mut h = BinaryHeap::with_comparer(Reverse::natural());
        h.extend(items.iter().copied());
        h.validate();

        let mut expected = items;
        expected.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(h.into_sorted_vec(), expected);
    }

    #[test]
    fn prop_prefix_tree_equivalence(ops in prop::collection::vec(any::<TrieOp>(), 0..=400)) {
        let mut t = PrefixTree::<u8, Vec<u8>>::new();
        let mut m: BTreeSet<Vec<u8>> = BTreeSet::new();

        for op in ops {
            match op {
                TrieOp::Add(seq) => {
                    prop_assert_eq!(t.add(&seq), m.insert(seq));
                }
                TrieOp::Remove(seq) => {
                    prop_assert_eq!(t.remove(&seq), m.remove(&seq));
                }
                TrieOp::Contains(seq) => {
                    prop_assert_eq!(t.contains(&seq), m.contains(&seq));
                }
            }
            prop_assert_eq!(t.len(), m.len());
        }

        t.validate();
        let listed: Vec<Vec<u8>> = t.iter().collect();
        let got: BTreeSet<Vec<u8>> = listed.iter().cloned().collect();
        prop_assert_eq!(listed.len(), got.len(), "enumeration yielded duplicates");
        prop_assert_eq!(got, m);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_heap_remove_order() {
    let items = [4, 1, 3, 1, 5, 2, 6];

    let mut base: BinaryHeap<i32> = BinaryHeap::new();
    base.extend(items);

    for_each_permutation(&items, |perm| {
        let mut h = base.clone();
        let mut left = items.len();
        for x in perm {
            assert!(h.remove(&x), "missing {x}");
            left -= 1;
            assert_eq!(h.len(), left);
            h.validate();
        }
        assert!(h.is_empty());
    });
}

#[test]
fn exhaustive_trie_insert_order() {
    let words = ["a", "ab", "abc", "b", "ba", ""];

    for_each_permutation(&words, |perm| {
        let mut t = StringTrie::new();
        for w in perm {
            assert!(t.add(w));
        }
        t.validate();
        let mut got: Vec<String> = t.iter().collect();
        got.sort();
        let mut expected: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        expected.sort();
        assert_eq!(got, expected);
    });
}

#[test]
fn exhaustive_trie_remove_order() {
    let words = ["a", "ab", "abc", "b", "ba", ""];

    let base: StringTrie = words.into_iter().collect();
    let base_nodes = base.node_count();

    for_each_permutation(&words, |perm| {
        let mut t = base.clone();
        for w in &perm {
            assert!(t.remove(*w));
            assert!(!t.contains(*w));
            t.validate();
        }
        assert_eq!(t.len(), 0);
        assert_eq!(t.node_count(), 1, "only the root may survive");

        // Re-adding rebuilds exactly one branch.
        t.add(perm[0]);
        t.validate();
        assert_eq!(t.node_count(), perm[0].chars().count() + 1);
    });

    assert_eq!(base_nodes, 6);
}
