#![cfg(test)]

// Property tests for SafeMap kept inside the crate alongside the
// implementation, model-checked against std's HashMap.
//
// Property: after any sequence of insert/remove/get/contains_key/len, every
// observation matches the model — get(k) returns the value of the most
// recent insert(k, v) not followed by a remove(k), and None otherwise
// (single-threaded linearization of the locked operations).

use crate::safe_map::SafeMap;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u8, i32),
    Remove(u8),
    Get(u8),
    Contains(u8),
    Len,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<u8>(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => any::<u8>().prop_map(Op::Remove),
        3 => any::<u8>().prop_map(Op::Get),
        2 => any::<u8>().prop_map(Op::Contains),
        1 => Just(Op::Len),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn prop_safe_map_matches_model(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        let map: SafeMap<u8, i32> = SafeMap::new();
        let mut model: HashMap<u8, i32> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    map.insert(k, v);
                    model.insert(k, v);
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                Op::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k).copied());
                }
                Op::Contains(k) => {
                    prop_assert_eq!(map.contains_key(&k), model.contains_key(&k));
                }
                Op::Len => {
                    prop_assert_eq!(map.len(), model.len());
                    prop_assert_eq!(map.is_empty(), model.is_empty());
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }
        }

        prop_assert_eq!(map.len(), model.len());
    }
}
