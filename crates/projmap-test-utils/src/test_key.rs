// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use proptest::prelude::*;
use test_strategy::Arbitrary;

/// A key whose identity is `name` plus `id`.
///
/// `tag` is carried along but isn't part of the identity: two keys that
/// differ only in `tag` project to the same surrogate under
/// [`compound_projection`], but are distinct under the derived `Hash` and
/// `Eq`.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Arbitrary)]
pub struct CompoundKey {
    #[strategy(name_strategy())]
    pub name: String,
    #[strategy(0..4u8)]
    pub id: u8,
    pub tag: bool,
}

impl CompoundKey {
    pub fn new(name: impl Into<String>, id: u8) -> Self {
        Self { name: name.into(), id, tag: false }
    }

    pub fn with_tag(self, tag: bool) -> Self {
        Self { tag, ..self }
    }

    /// The string identity of this key, `name#id`.
    pub fn hash_value(&self) -> String {
        format!("{}#{}", self.name, self.id)
    }
}

/// Projects a [`CompoundKey`] to its string identity.
pub fn compound_projection(key: &CompoundKey) -> String {
    key.hash_value()
}

/// A projection that panics for keys named `"boom"`.
pub fn panicky_projection(key: &CompoundKey) -> String {
    if key.name == "boom" {
        panic!("refusing to project {key:?}");
    }
    key.hash_value()
}

// A small alphabet, so that generated operations collide often.
const NAMES: &[&str] = &["a", "b", "c"];

fn name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(String::from)
}
