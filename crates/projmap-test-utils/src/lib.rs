// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod naive_map;
pub mod test_key;
pub mod unwind;

use projmap::{GroupedLookup, ProjectedMap, ProjectedSet, Projection};

#[cfg(feature = "default-hasher")]
pub type HashBuilder = projmap::DefaultHashBuilder;

#[cfg(not(feature = "default-hasher"))]
pub type HashBuilder = std::hash::RandomState;

/// Creates an empty map with the given projection and the test hasher.
pub fn make_map<K, V, P>(projection: P) -> ProjectedMap<K, V, P, HashBuilder>
where
    P: Projection<K>,
{
    ProjectedMap::with_projection_and_hasher(projection, HashBuilder::default())
}

/// Creates an empty set with the given projection and the test hasher.
pub fn make_set<K, P>(projection: P) -> ProjectedSet<K, P, HashBuilder>
where
    P: Projection<K>,
{
    ProjectedSet::with_projection_and_hasher(projection, HashBuilder::default())
}

/// Creates an empty lookup with the given projection and the test hasher.
pub fn make_lookup<K, V, P>(
    projection: P,
) -> GroupedLookup<K, V, P, HashBuilder>
where
    P: Projection<K>,
{
    GroupedLookup::with_projection_and_hasher(
        projection,
        HashBuilder::default(),
    )
}
