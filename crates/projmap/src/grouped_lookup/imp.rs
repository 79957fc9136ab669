// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{GroupIter, IntoIter, Iter, Keys, Values};
use crate::{
    internal::ValidationError, DefaultHashBuilder, Identity, ProjectedMap,
    Projection,
};
use alloc::{format, vec::Vec};
use core::{fmt, hash::BuildHasher};
use tracing::trace;

/// An ordered one-to-many map keyed by a projection of the key.
///
/// Each distinct surrogate owns a *group*: a non-empty list of values in the
/// order they were added, duplicates included. Groups are iterated in the
/// order they were created. A group that becomes empty is removed along with
/// its key.
///
/// The default projection is [`Identity`], so without an explicit projection
/// keys are grouped by their own `Hash` and `Eq` implementations.
///
/// # Item count
///
/// [`item_size`](Self::item_size) is a running counter, not a derived value.
/// Each call to [`add`](Self::add) increments it by one however many values
/// it adds, while [`delete`](Self::delete) decrements it by the size of the
/// removed group, so it can go negative: adding three values in one call and
/// then deleting their group leaves it at `-2`. To count stored values, use
/// `lookup.values().count()`.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use projmap::GroupedLookup;
///
/// let mut by_team = GroupedLookup::new();
/// by_team.add("infra", ["ada", "grace"]).add("web", ["linus"]);
/// by_team.push("infra", "ken");
///
/// assert_eq!(by_team.len(), 2);
/// assert_eq!(by_team.get(&"infra").collect::<Vec<_>>(), [&"ada", &"grace", &"ken"]);
/// assert_eq!(by_team.first(&"web"), Some(&"linus"));
///
/// by_team.delete_value(&"web", &"linus");
/// assert!(!by_team.contains_key(&"web"));
/// # }
/// ```
pub struct GroupedLookup<K, V, P = Identity, H = DefaultHashBuilder>
where
    P: Projection<K>,
{
    groups: ProjectedMap<K, Vec<V>, P, H>,
    item_size: isize,
}

impl<K, V, P, H> Clone for GroupedLookup<K, V, P, H>
where
    K: Clone,
    V: Clone,
    P: Projection<K> + Clone,
    P::Surrogate: Clone,
    H: Clone,
{
    fn clone(&self) -> Self {
        Self { groups: self.groups.clone(), item_size: self.item_size }
    }
}

impl<K, V, P, H> Default for GroupedLookup<K, V, P, H>
where
    P: Projection<K> + Default,
    H: Default,
{
    fn default() -> Self {
        Self { groups: ProjectedMap::default(), item_size: 0 }
    }
}

#[cfg(feature = "default-hasher")]
impl<K, V> GroupedLookup<K, V>
where
    Identity: Projection<K>,
{
    /// Creates a new, empty `GroupedLookup` that groups keys by their own
    /// equality.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    #[inline]
    pub fn new() -> Self {
        Self::with_projection(Identity)
    }

    /// Creates a `GroupedLookup` from `(key, value)` pairs, grouping keys by
    /// their own equality.
    ///
    /// Each pair is added with [`push`](Self::push).
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_pairs_with(Identity, pairs)
    }
}

#[cfg(feature = "default-hasher")]
impl<K, V, P: Projection<K>> GroupedLookup<K, V, P> {
    /// Creates a new, empty `GroupedLookup` using the given projection.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    pub fn with_projection(projection: P) -> Self {
        Self::with_projection_and_hasher(
            projection,
            DefaultHashBuilder::default(),
        )
    }

    /// Creates a `GroupedLookup` using the given projection, from
    /// `(key, value)` pairs.
    ///
    /// Each pair is added with [`push`](Self::push), so `item_size` ends up
    /// equal to the number of pairs.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    pub fn from_pairs_with<I>(projection: P, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut lookup = Self::with_projection(projection);
        lookup.extend(pairs);
        lookup
    }
}

impl<K, V, P: Projection<K>, H> GroupedLookup<K, V, P, H> {
    /// Creates a new, empty `GroupedLookup` with the given projection and
    /// hasher.
    pub fn with_projection_and_hasher(projection: P, hasher: H) -> Self {
        Self {
            groups: ProjectedMap::with_projection_and_hasher(projection, hasher),
            item_size: 0,
        }
    }

    /// Returns the lookup's projection.
    #[inline]
    pub fn projection(&self) -> &P {
        self.groups.projection()
    }

    /// Returns true if the lookup has no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the number of groups, i.e. distinct surrogates.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns the item counter.
    ///
    /// See the [type-level documentation](Self#item-count) for how this is
    /// maintained.
    #[inline]
    pub fn item_size(&self) -> isize {
        self.item_size
    }

    /// Iterates over `(key, group)` pairs, in group creation order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.groups.iter())
    }

    /// Iterates over the key of each group, in group creation order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.groups.keys())
    }

    /// Iterates over every value in every group.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.groups.values())
    }

    /// Removes all groups and resets the item counter.
    pub fn clear(&mut self) {
        trace!(
            groups = self.len(),
            item_size = self.item_size,
            "clearing grouped lookup"
        );
        self.groups.clear();
        self.item_size = 0;
    }
}

impl<K, V, P: Projection<K>, H: BuildHasher> GroupedLookup<K, V, P, H> {
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError>
    where
        K: fmt::Debug,
    {
        self.groups.validate()?;

        // item_size tracks calls, not values, so it isn't checked against
        // the group sizes.
        for (key, group) in self.groups.iter() {
            if group.is_empty() {
                return Err(ValidationError::general(format!(
                    "group for key {key:?} is empty"
                )));
            }
        }

        Ok(())
    }

    /// Returns true if a group exists for the key's surrogate.
    pub fn contains_key(&self, key: &K) -> bool {
        self.groups.contains_key(key)
    }

    /// Returns true if the group for the key's surrogate contains `value`.
    pub fn contains_value(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.get_slice(key).is_some_and(|group| group.contains(value))
    }

    /// Returns true if any group contains `value`.
    ///
    /// This scans every stored value.
    pub fn includes(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.groups.values().any(|group| group.contains(value))
    }

    /// Iterates over the group for the key's surrogate, in insertion order.
    ///
    /// The iterator is empty if there is no such group.
    pub fn get(&self, key: &K) -> GroupIter<'_, V> {
        self.get_slice(key).map(GroupIter::new).unwrap_or_default()
    }

    /// Returns the group for the key's surrogate as a slice.
    pub fn get_slice(&self, key: &K) -> Option<&[V]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Returns the first value in the group for the key's surrogate.
    pub fn first(&self, key: &K) -> Option<&V> {
        self.get_slice(key)?.first()
    }

    /// Returns the last value in the group for the key's surrogate.
    pub fn last(&self, key: &K) -> Option<&V> {
        self.get_slice(key)?.last()
    }

    /// Appends `values` to the group for the key's surrogate, creating the
    /// group if needed.
    ///
    /// The item counter grows by one per call, however many values are
    /// passed. If `values` is empty, nothing happens. Returns the lookup to
    /// allow chaining.
    pub fn add<I>(&mut self, key: K, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return self;
        }

        self.groups.get_or_compute(key, |_, _| Vec::new()).extend(values);
        self.item_size += 1;
        self
    }

    /// Appends a single value to the group for the key's surrogate, creating
    /// the group if needed.
    pub fn push(&mut self, key: K, value: V) -> &mut Self {
        self.groups.get_or_compute(key, |_, _| Vec::new()).push(value);
        self.item_size += 1;
        self
    }

    /// Removes the group for the key's surrogate, returning its key and
    /// values.
    ///
    /// The item counter shrinks by the size of the group.
    pub fn remove(&mut self, key: &K) -> Option<(K, Vec<V>)> {
        let (key, group) = self.groups.remove(key)?;
        self.item_size -= group.len() as isize;
        Some((key, group))
    }

    /// Removes the group for the key's surrogate, returning whether a group
    /// was removed.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Removes the first value equal to `value` from the group for the key's
    /// surrogate, returning whether a value was removed.
    ///
    /// If the group becomes empty it is removed too.
    pub fn delete_value(&mut self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        let Some(group) = self.groups.get_mut(key) else {
            return false;
        };
        let Some(ix) = group.iter().position(|v| v == value) else {
            return false;
        };

        group.remove(ix);
        let emptied = group.is_empty();
        self.item_size -= 1;
        if emptied {
            trace!("group emptied, removing key");
            self.groups.remove(key);
        }
        true
    }
}

impl<K, V, P, H> fmt::Debug for GroupedLookup<K, V, P, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
    P: Projection<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P: Projection<K>, H: BuildHasher> Extend<(K, V)>
    for GroupedLookup<K, V, P, H>
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.push(key, value);
        }
    }
}

impl<K, V, P, H> FromIterator<(K, V)> for GroupedLookup<K, V, P, H>
where
    P: Projection<K> + Default,
    H: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut lookup = Self::default();
        lookup.extend(iter);
        lookup
    }
}

impl<'a, K, V, P: Projection<K>, H> IntoIterator
    for &'a GroupedLookup<K, V, P, H>
{
    type Item = (&'a K, &'a [V]);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, P: Projection<K>, H> IntoIterator for GroupedLookup<K, V, P, H> {
    type Item = (K, Vec<V>);
    type IntoIter = IntoIter<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.groups.into_iter())
    }
}
