// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Entries, IntoIter, Iter};
use crate::{
    errors::DuplicateKey,
    internal::ValidationError,
    support::surrogate_table::SurrogateTable,
    DefaultHashBuilder, Projection, Stringify,
};
use alloc::format;
use core::{
    fmt,
    hash::{BuildHasher, Hash},
};
use equivalent::Equivalent;
use tracing::trace;

/// A set keyed by a projection of its items.
///
/// This is the degenerate case of [`ProjectedMap`] where the value is the key:
/// one key is stored per surrogate, and adding a key whose surrogate is present
/// replaces the stored key in place.
///
/// The default projection is [`Stringify`], *not* [`Identity`]: keys added
/// without an explicit projection are deduplicated by their string form.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use projmap::ProjectedSet;
/// use std::fmt;
///
/// #[derive(Debug)]
/// enum Id {
///     Numeric(u32),
///     Text(&'static str),
/// }
///
/// impl fmt::Display for Id {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         match self {
///             Id::Numeric(n) => write!(f, "{n}"),
///             Id::Text(s) => f.write_str(s),
///         }
///     }
/// }
///
/// let mut set = ProjectedSet::new();
/// set.add(Id::Numeric(1)).add(Id::Text("2")).add(Id::Text("1"));
///
/// // Id::Numeric(1) and Id::Text("1") have the same string form, so the
/// // later one replaced the earlier one, in place.
/// assert_eq!(set.len(), 2);
/// assert!(matches!(set.iter().next(), Some(Id::Text("1"))));
/// assert!(set.contains(&Id::Numeric(2)));
/// # }
/// ```
///
/// [`ProjectedMap`]: crate::ProjectedMap
/// [`Identity`]: crate::Identity
pub struct ProjectedSet<K, P = Stringify, H = DefaultHashBuilder>
where
    P: Projection<K>,
{
    projection: P,
    table: SurrogateTable<P::Surrogate, K, H>,
}

impl<K, P, H> Clone for ProjectedSet<K, P, H>
where
    K: Clone,
    P: Projection<K> + Clone,
    P::Surrogate: Clone,
    H: Clone,
{
    fn clone(&self) -> Self {
        Self { projection: self.projection.clone(), table: self.table.clone() }
    }
}

impl<K, P, H> Default for ProjectedSet<K, P, H>
where
    P: Projection<K> + Default,
    H: Default,
{
    fn default() -> Self {
        Self { projection: P::default(), table: SurrogateTable::default() }
    }
}

#[cfg(feature = "default-hasher")]
impl<K: fmt::Display> ProjectedSet<K> {
    /// Creates a new, empty `ProjectedSet` that deduplicates keys by their
    /// string form.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    #[inline]
    pub fn new() -> Self {
        Self::with_projection(Stringify)
    }
}

#[cfg(feature = "default-hasher")]
impl<K, P: Projection<K>> ProjectedSet<K, P> {
    /// Creates a new, empty `ProjectedSet` using the given projection.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    pub fn with_projection(projection: P) -> Self {
        Self::with_projection_and_hasher(
            projection,
            DefaultHashBuilder::default(),
        )
    }

    /// Creates a `ProjectedSet` using the given projection, seeded with
    /// `keys`.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    pub fn from_keys_with<I>(projection: P, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut set = Self::with_projection(projection);
        set.extend(keys);
        set
    }
}

impl<K, P: Projection<K>, H> ProjectedSet<K, P, H> {
    /// Creates a new, empty `ProjectedSet` with the given projection and
    /// hasher.
    pub fn with_projection_and_hasher(projection: P, hasher: H) -> Self {
        Self {
            projection,
            table: SurrogateTable::with_capacity_and_hasher(0, hasher),
        }
    }

    /// Returns the set's projection.
    #[inline]
    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Returns true if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of distinct surrogates in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Iterates over the stored keys, in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.table.items())
    }

    /// Same as [`iter`](Self::iter).
    #[inline]
    pub fn keys(&self) -> Iter<'_, K> {
        self.iter()
    }

    /// Same as [`iter`](Self::iter).
    #[inline]
    pub fn values(&self) -> Iter<'_, K> {
        self.iter()
    }

    /// Iterates over `(key, key)` pairs, in insertion order.
    #[inline]
    pub fn entries(&self) -> Entries<'_, K> {
        Entries::new(self.table.items())
    }

    /// Removes all keys from the set.
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing projected set");
        self.table.clear();
    }
}

impl<K, P: Projection<K>, H: BuildHasher> ProjectedSet<K, P, H> {
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError>
    where
        K: fmt::Debug,
    {
        self.table
            .validate()
            .map_err(|error| ValidationError::Table { name: "keys", error })?;

        for (ix, key) in self.table.items().iter().enumerate() {
            if self.table.surrogate_at(ix) != Some(&self.projection.project(key))
            {
                return Err(ValidationError::general(format!(
                    "key {key:?} at index {ix} no longer projects to its \
                     stored surrogate"
                )));
            }
        }

        Ok(())
    }

    /// Returns true if the set contains a key with the same surrogate.
    pub fn contains(&self, key: &K) -> bool {
        let surrogate = self.projection.project(key);
        self.table.find_index(&surrogate).is_some()
    }

    /// Returns true if the set contains the given surrogate.
    pub fn contains_surrogate<Q>(&self, surrogate: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<P::Surrogate>,
    {
        self.table.find_index(surrogate).is_some()
    }

    /// Returns the stored key with the same surrogate as `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        let surrogate = self.projection.project(key);
        self.table.get(&surrogate)
    }

    /// Adds a key, replacing any stored key with the same surrogate.
    ///
    /// Returns the set to allow chaining.
    pub fn add(&mut self, key: K) -> &mut Self {
        self.insert(key);
        self
    }

    /// Adds a key, returning the stored key it replaced, if any.
    ///
    /// A replaced key keeps its position in iteration order.
    pub fn insert(&mut self, key: K) -> Option<K> {
        let surrogate = self.projection.project(&key);
        self.table.upsert(surrogate, key)
    }

    /// Adds a key, returning an error if a key with the same surrogate is
    /// already present.
    pub fn insert_unique(&mut self, key: K) -> Result<(), DuplicateKey<K, &K>> {
        let surrogate = self.projection.project(&key);
        if let Some(index) = self.table.find_index(&surrogate) {
            return Err(DuplicateKey::__internal_new(key, &self.table[index]));
        }
        self.table.insert_absent(surrogate, key);
        Ok(())
    }

    /// Removes the key with the same surrogate as `key`, returning it.
    pub fn remove(&mut self, key: &K) -> Option<K> {
        let surrogate = self.projection.project(key);
        self.table.shift_remove(&surrogate).map(|(_, key)| key)
    }

    /// Removes the key with the same surrogate as `key`, returning whether a
    /// key was removed.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }
}

impl<K: fmt::Debug, P: Projection<K>, H> fmt::Debug for ProjectedSet<K, P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, P: Projection<K>, H: BuildHasher> Extend<K> for ProjectedSet<K, P, H> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, P, H> FromIterator<K> for ProjectedSet<K, P, H>
where
    P: Projection<K> + Default,
    H: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<'a, K, P: Projection<K>, H> IntoIterator for &'a ProjectedSet<K, P, H> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, P: Projection<K>, H> IntoIterator for ProjectedSet<K, P, H> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.table.into_items())
    }
}
