// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use futures::{channel::oneshot, executor::block_on};
use projmap::ProjectedMap;
use projmap_test_utils::{
    HashBuilder, make_map,
    naive_map::NaiveMap,
    test_key::{CompoundKey, compound_projection, panicky_projection},
    unwind::catch_panic,
};
use proptest::prelude::*;
use std::cell::{Cell, RefCell};
use test_strategy::{Arbitrary, proptest};

type CompoundMap<V> =
    ProjectedMap<CompoundKey, V, fn(&CompoundKey) -> String, HashBuilder>;

fn compound_map<V>() -> CompoundMap<V> {
    make_map(compound_projection as fn(&CompoundKey) -> String)
}

#[test]
fn empty_map() {
    let map = compound_map::<u32>();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert_eq!(map.keys().count(), 0);
    assert_eq!(map.values().count(), 0);
    assert_eq!(map.iter().count(), 0);
    map.validate().expect("map should be valid");
}

#[test]
fn shared_surrogate_collapses_entries() {
    let mut map = compound_map::<u32>();
    let k1 = CompoundKey::new("key", 1);
    let k2 = CompoundKey::new("key", 1).with_tag(true);
    assert_ne!(k1, k2, "keys are distinct values");

    map.set(k1.clone(), 55).set(k2.clone(), 66);

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&k1), Some(&66));
    assert_eq!(map.get(&k2), Some(&66));

    // The stored key is the one from the latest write.
    let (stored, _) = map.get_key_value(&k1).expect("key is present");
    assert_eq!(stored, &k2);
    map.validate().expect("map should be valid");
}

#[test]
fn compound_keys_by_string_identity() {
    let mut map = compound_map::<u32>();
    map.set(CompoundKey::new("key", 1), 55)
        .set(CompoundKey::new("key", 2), 22);

    assert_eq!(map.get(&CompoundKey::new("key", 1)), Some(&55));
    assert!(map.contains_surrogate("key#2"));
    assert!(!map.contains_surrogate("key#3"));
    assert_eq!(
        map.get_by_surrogate("key#2").map(|(key, value)| (key.id, *value)),
        Some((2, 22)),
    );

    map.set(CompoundKey::new("key", 1), 66);
    assert_eq!(map.len(), 2);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [66, 22]);
}

#[test]
fn stored_none_is_not_absent() {
    let mut map = compound_map::<Option<u32>>();
    let key = CompoundKey::new("key", 1);
    map.set(key.clone(), None);

    assert!(map.contains_key(&key));
    assert_eq!(map.get(&key), Some(&None));
    assert_eq!(map.get(&CompoundKey::new("key", 2)), None);
    assert!(!map.contains_key(&CompoundKey::new("key", 2)));
}

#[test]
fn delete_known_and_unknown() {
    let mut map = compound_map::<u32>();
    map.set(CompoundKey::new("a", 0), 0).set(CompoundKey::new("b", 0), 1);

    assert!(!map.delete(&CompoundKey::new("c", 0)));
    assert_eq!(map.len(), 2);

    assert!(map.delete(&CompoundKey::new("a", 0).with_tag(true)));
    assert_eq!(map.len(), 1);
    assert!(!map.contains_key(&CompoundKey::new("a", 0)));
    map.validate().expect("map should be valid");
}

#[test]
fn clear_is_idempotent() {
    let mut map = compound_map::<u32>();
    map.set(CompoundKey::new("a", 0), 0).set(CompoundKey::new("b", 0), 1);

    map.clear();
    assert_eq!(map.len(), 0);
    map.clear();
    assert_eq!(map.len(), 0);
    map.validate().expect("map should be valid");
}

#[test]
fn overwrite_keeps_position() {
    let mut map = compound_map::<u32>();
    for (ix, name) in ["a", "b", "c"].into_iter().enumerate() {
        map.set(CompoundKey::new(name, 0), ix as u32);
    }
    map.set(CompoundKey::new("a", 0), 10);
    map.delete(&CompoundKey::new("b", 0));
    map.set(CompoundKey::new("b", 0), 11);

    let names: Vec<_> = map.keys().map(|key| key.name.as_str()).collect();
    assert_eq!(names, ["a", "c", "b"]);
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [10, 2, 11]);
}

#[test]
fn insert_returns_replaced_entry() {
    let mut map = compound_map::<u32>();
    assert_eq!(map.insert(CompoundKey::new("a", 0), 1), None);

    let replaced = map.insert(CompoundKey::new("a", 0).with_tag(true), 2);
    assert_eq!(replaced, Some((CompoundKey::new("a", 0), 1)));
}

#[test]
fn insert_unique_rejects_present_surrogate() {
    let mut map = compound_map::<u32>();
    map.insert_unique(CompoundKey::new("a", 0), 1)
        .expect("surrogate is absent");

    let err = map
        .insert_unique(CompoundKey::new("a", 0).with_tag(true), 2)
        .unwrap_err();
    assert_eq!(err.new_item(), &(CompoundKey::new("a", 0).with_tag(true), 2));
    assert_eq!(*err.existing(), &(CompoundKey::new("a", 0), 1));

    let owned = err.into_owned();
    assert_eq!(owned.existing(), &(CompoundKey::new("a", 0), 1));

    // The map is unchanged.
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&CompoundKey::new("a", 0)), Some(&1));
    assert!(!map.get_key_value(&CompoundKey::new("a", 0)).unwrap().0.tag);
}

#[test]
fn get_or_leaves_map_unchanged() {
    let mut map = compound_map::<u32>();
    map.set(CompoundKey::new("a", 0), 1);

    assert_eq!(*map.get_or(&CompoundKey::new("a", 0), &99), 1);
    assert_eq!(*map.get_or(&CompoundKey::new("b", 0), &99), 99);
    assert_eq!(map.len(), 1);
}

#[test]
fn get_or_compute_calls_factory_once() {
    let mut map = compound_map::<String>();
    let calls = Cell::new(0);

    let value = map.get_or_compute(CompoundKey::new("a", 1), |key, map| {
        calls.set(calls.get() + 1);
        format!("{} with {} before", key.hash_value(), map.len())
    });
    assert_eq!(value, "a#1 with 0 before");

    let value = map
        .get_or_compute(CompoundKey::new("a", 1).with_tag(true), |_, _| {
            calls.set(calls.get() + 1);
            "recomputed".to_owned()
        });
    assert_eq!(value, "a#1 with 0 before");
    value.push_str(", edited");

    assert_eq!(calls.get(), 1);
    assert_eq!(
        map.get(&CompoundKey::new("a", 1)).map(String::as_str),
        Some("a#1 with 0 before, edited"),
    );
    // A hit doesn't replace the stored key.
    assert!(!map.get_key_value(&CompoundKey::new("a", 1)).unwrap().0.tag);
}

#[test]
fn try_get_or_compute_error_stores_nothing() {
    let mut map = compound_map::<u32>();

    let res: Result<&mut u32, &str> =
        map.try_get_or_compute(CompoundKey::new("a", 0), |_, _| Err("nope"));
    assert_eq!(res, Err("nope"));
    assert!(map.is_empty());

    let res: Result<&mut u32, &str> =
        map.try_get_or_compute(CompoundKey::new("a", 0), |_, _| Ok(7));
    assert_eq!(res.copied(), Ok(7));
    assert_eq!(map.get(&CompoundKey::new("a", 0)), Some(&7));
}

#[test]
fn get_or_compute_async_stores_result() {
    let mut map = compound_map::<String>();

    let value = block_on(map.get_or_compute_async(
        CompoundKey::new("a", 0),
        |key, map| {
            let rendered = format!("{}/{}", key.hash_value(), map.len());
            async move { rendered }
        },
    ))
    .clone();
    assert_eq!(value, "a#0/0");

    let value = block_on(map.get_or_compute_async(
        CompoundKey::new("a", 0),
        |_, _| async { unreachable!("surrogate is present") },
    ))
    .clone();
    assert_eq!(value, "a#0/0");
    assert_eq!(map.len(), 1);
}

#[test]
fn get_or_compute_shared_hit_skips_factory() {
    let map = RefCell::new(compound_map::<u32>());
    map.borrow_mut().set(CompoundKey::new("a", 0), 5);

    let value = block_on(ProjectedMap::get_or_compute_shared(
        &map,
        CompoundKey::new("a", 0),
        |_, _| async { unreachable!("surrogate is present") },
    ));
    assert_eq!(value, 5);
}

#[test]
fn get_or_compute_shared_overlapping_calls() {
    let map = RefCell::new(compound_map::<u32>());
    let calls = Cell::new(0);
    let (tx1, rx1) = oneshot::channel::<u32>();
    let (tx2, rx2) = oneshot::channel::<u32>();

    let first = ProjectedMap::get_or_compute_shared(
        &map,
        CompoundKey::new("a", 0),
        |_, _| {
            calls.set(calls.get() + 1);
            async move { rx1.await.expect("sender is alive") }
        },
    );
    let second = ProjectedMap::get_or_compute_shared(
        &map,
        CompoundKey::new("a", 0).with_tag(true),
        |_, _| {
            calls.set(calls.get() + 1);
            async move { rx2.await.expect("sender is alive") }
        },
    );
    // Both factories are pending before either value arrives. The second one
    // completes first, the first one completes last.
    let resolve = async {
        tx2.send(2).expect("receiver is alive");
        futures::pending!();
        tx1.send(1).expect("receiver is alive");
    };

    let (first, second, ()) =
        block_on(async { futures::join!(first, second, resolve) });

    assert_eq!(calls.get(), 2, "in-flight computations are not shared");
    assert_eq!(first, 1);
    assert_eq!(second, 2);

    let map = map.into_inner();
    assert_eq!(map.len(), 1);
    let (stored, value) =
        map.get_key_value(&CompoundKey::new("a", 0)).expect("key is present");
    assert_eq!(*value, 1, "last completion wins");
    assert!(!stored.tag);
    map.validate().expect("map should be valid");
}

#[test]
fn panicking_projection_leaves_map_valid() {
    let mut map = make_map(panicky_projection as fn(&CompoundKey) -> String);
    map.set(CompoundKey::new("a", 0), 1);

    assert!(catch_panic(|| {
        map.set(CompoundKey::new("boom", 0), 2);
    })
    .is_none());
    assert!(catch_panic(|| map.contains_key(&CompoundKey::new("boom", 0)))
        .is_none());

    assert_eq!(map.len(), 1);
    map.validate().expect("map should be valid");
}

#[test]
fn panicking_factory_stores_nothing() {
    let mut map = compound_map::<u32>();

    assert!(catch_panic(|| {
        map.get_or_compute(CompoundKey::new("a", 0), |_, _| {
            panic!("factory failed")
        });
    })
    .is_none());

    assert!(map.is_empty());
    map.validate().expect("map should be valid");
}

#[test]
fn debug_impl() {
    let mut map = make_map(|key: &&str| key.len());
    map.set("one", 1).set("three", 3).set("two", 2);

    // "two" has the same length as "one".
    assert_eq!(format!("{map:?}"), r#"{"two": 2, "three": 3}"#);
}

#[test]
fn extend_and_iterate() {
    let mut map = compound_map::<u32>();
    map.extend([
        (CompoundKey::new("a", 0), 1),
        (CompoundKey::new("b", 0), 2),
        (CompoundKey::new("a", 0), 3),
    ]);

    let entries: Vec<_> =
        map.iter().map(|(key, value)| (key.name.as_str(), *value)).collect();
    assert_eq!(entries, [("a", 3), ("b", 2)]);

    for value in map.values_mut() {
        *value *= 10;
    }
    let owned: Vec<_> = map.into_iter().map(|(_, value)| value).collect();
    assert_eq!(owned, [30, 20]);
}

#[cfg(feature = "default-hasher")]
#[test]
fn identity_constructors() {
    let map = ProjectedMap::<u32, &str>::with_capacity(1024);
    assert!(map.capacity() >= 1024);

    let map: ProjectedMap<u32, &str> =
        [(1, "one"), (2, "two"), (1, "uno")].into_iter().collect();
    assert_eq!(map.get(&1), Some(&"uno"));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2]);

    let map = ProjectedMap::from_entries_with(
        |key: &String| key.to_lowercase(),
        [("Key".to_owned(), 1), ("KEY".to_owned(), 2)],
    );
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&"key".to_owned()), Some(&2));
}

#[derive(Debug, Arbitrary)]
enum Operation {
    // Make writes a bit more common to try and fill up the map, and clears
    // rare.
    #[weight(6)]
    Set(CompoundKey, u32),
    #[weight(3)]
    InsertUnique(CompoundKey, u32),
    #[weight(2)]
    Get(CompoundKey),
    #[weight(2)]
    GetOrCompute(CompoundKey, u32),
    #[weight(3)]
    Delete(CompoundKey),
    Clear,
}

// Miri is quite slow, so run fewer operations.
#[cfg(miri)]
const OP_LEN: usize = 64;
#[cfg(not(miri))]
const OP_LEN: usize = 512;

#[proptest(cases = 32)]
fn proptest_ops(
    #[strategy(prop::collection::vec(any::<Operation>(), 0..OP_LEN))] ops: Vec<
        Operation,
    >,
) {
    let mut map = compound_map::<u32>();
    let mut naive_map = NaiveMap::new(compound_projection);

    for op in ops {
        match op {
            Operation::Set(key, value) => {
                let map_res = map.insert(key.clone(), value);
                let naive_res = naive_map.insert(key, value);
                assert_eq!(map_res, naive_res);
            }
            Operation::InsertUnique(key, value) => {
                let map_res = map.insert_unique(key.clone(), value);
                let naive_res = naive_map.insert_unique(key, value);
                assert_eq!(map_res.is_ok(), naive_res);
            }
            Operation::Get(key) => {
                assert_eq!(map.get(&key), naive_map.get(&key));
                assert_eq!(
                    map.contains_key(&key),
                    naive_map.get(&key).is_some()
                );
            }
            Operation::GetOrCompute(key, value) => {
                let expected =
                    naive_map.get(&key).copied().unwrap_or(value);
                if naive_map.get(&key).is_none() {
                    naive_map.insert(key.clone(), value);
                }
                let map_res = *map.get_or_compute(key, |_, _| value);
                assert_eq!(map_res, expected);
            }
            Operation::Delete(key) => {
                let map_res = map.remove(&key);
                let naive_res = naive_map.remove(&key);
                assert_eq!(map_res, naive_res);
            }
            Operation::Clear => {
                map.clear();
                naive_map.clear();
            }
        }

        map.validate().expect("map should be valid");
        assert_eq!(map.len(), naive_map.len());
        assert!(map.iter().eq(naive_map.iter()), "iteration order matches");
    }
}
