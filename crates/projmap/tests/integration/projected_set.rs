// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use projmap::{ProjectedSet, Stringify};
use projmap_test_utils::{
    HashBuilder, make_set,
    naive_map::NaiveMap,
    test_key::{CompoundKey, compound_projection},
};
use proptest::prelude::*;
use std::fmt;
use test_strategy::{Arbitrary, proptest};

/// A number that remembers how it was written.
#[derive(Clone, Debug, PartialEq)]
enum Spelled {
    Number(u32),
    Text(&'static str),
}

impl fmt::Display for Spelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spelled::Number(n) => write!(f, "{n}"),
            Spelled::Text(s) => f.write_str(s),
        }
    }
}

fn stringify_set<K: fmt::Display>() -> ProjectedSet<K, Stringify, HashBuilder>
{
    make_set(Stringify)
}

#[test]
fn default_projection_dedupes_by_string_form() {
    let mut set = stringify_set();
    set.add(Spelled::Number(1))
        .add(Spelled::Text("2"))
        .add(Spelled::Text("1"));

    assert_eq!(set.len(), 2);
    assert!(set.contains(&Spelled::Text("2")));
    assert!(set.contains(&Spelled::Number(2)));

    // The later key replaced the earlier one, in place.
    assert_eq!(
        set.iter().cloned().collect::<Vec<_>>(),
        [Spelled::Text("1"), Spelled::Text("2")],
    );
    assert_eq!(set.get(&Spelled::Number(1)), Some(&Spelled::Text("1")));
    set.validate().expect("set should be valid");
}

#[test]
fn empty_set() {
    let set = stringify_set::<u32>();
    assert!(set.is_empty());
    assert_eq!(set.keys().count(), 0);
    assert_eq!(set.values().count(), 0);
    assert_eq!(set.entries().count(), 0);
}

#[test]
fn delete_and_clear() {
    let mut set = stringify_set();
    set.add(1).add(2).add(3);

    assert!(!set.delete(&4));
    assert_eq!(set.len(), 3);
    assert!(set.delete(&2));
    assert_eq!(set.len(), 2);
    assert_eq!(set.remove(&3), Some(3));
    assert_eq!(set.remove(&3), None);

    set.clear();
    assert_eq!(set.len(), 0);
    set.clear();
    assert_eq!(set.len(), 0);
    set.validate().expect("set should be valid");
}

#[test]
fn insert_and_insert_unique() {
    let mut set = make_set(compound_projection as fn(&CompoundKey) -> String);
    assert_eq!(set.insert(CompoundKey::new("a", 0)), None);
    assert_eq!(
        set.insert(CompoundKey::new("a", 0).with_tag(true)),
        Some(CompoundKey::new("a", 0)),
    );

    let err = set.insert_unique(CompoundKey::new("a", 0)).unwrap_err();
    assert_eq!(err.new_item(), &CompoundKey::new("a", 0));
    assert_eq!(*err.existing(), &CompoundKey::new("a", 0).with_tag(true));

    set.insert_unique(CompoundKey::new("b", 0)).expect("surrogate is absent");
    assert_eq!(set.len(), 2);
    assert!(set.contains_surrogate("b#0"));
    set.validate().expect("set should be valid");
}

#[test]
fn entries_pair_each_key_with_itself() {
    let mut set = stringify_set();
    set.extend(["x", "y"]);

    let entries: Vec<_> = set.entries().collect();
    assert_eq!(entries, [(&"x", &"x"), (&"y", &"y")]);
    assert_eq!(set.into_iter().collect::<Vec<_>>(), ["x", "y"]);
}

#[test]
fn debug_impl() {
    let mut set = stringify_set();
    set.add(Spelled::Number(7)).add(Spelled::Text("7"));
    assert_eq!(format!("{set:?}"), r#"{Text("7")}"#);
}

#[cfg(feature = "default-hasher")]
#[test]
fn default_hasher_constructors() {
    let set: ProjectedSet<u8> = [1, 2, 1].into_iter().collect();
    assert_eq!(set.len(), 2);

    let set = ProjectedSet::from_keys_with(
        |word: &&str| word.len(),
        ["one", "two", "three"],
    );
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["two", "three"]);
}

#[derive(Debug, Arbitrary)]
enum Operation {
    #[weight(4)]
    Add(CompoundKey),
    #[weight(2)]
    InsertUnique(CompoundKey),
    #[weight(2)]
    Contains(CompoundKey),
    #[weight(2)]
    Remove(CompoundKey),
    Clear,
}

#[proptest(cases = 32)]
fn proptest_ops(
    #[strategy(prop::collection::vec(any::<Operation>(), 0..256))] ops: Vec<
        Operation,
    >,
) {
    let mut set = make_set(compound_projection as fn(&CompoundKey) -> String);
    let mut naive_set = NaiveMap::new(compound_projection);

    for op in ops {
        match op {
            Operation::Add(key) => {
                let set_res = set.insert(key.clone());
                let naive_res = naive_set.insert(key, ()).map(|(key, ())| key);
                assert_eq!(set_res, naive_res);
            }
            Operation::InsertUnique(key) => {
                let set_res = set.insert_unique(key.clone());
                let naive_res = naive_set.insert_unique(key, ());
                assert_eq!(set_res.is_ok(), naive_res);
            }
            Operation::Contains(key) => {
                assert_eq!(set.contains(&key), naive_set.get(&key).is_some());
                assert_eq!(set.get(&key), naive_set.get_key(&key));
            }
            Operation::Remove(key) => {
                let set_res = set.remove(&key);
                let naive_res = naive_set.remove(&key).map(|(key, ())| key);
                assert_eq!(set_res, naive_res);
            }
            Operation::Clear => {
                set.clear();
                naive_set.clear();
            }
        }

        set.validate().expect("set should be valid");
        assert!(
            set.iter().eq(naive_set.iter().map(|(key, ())| key)),
            "iteration order matches"
        );
    }
}
