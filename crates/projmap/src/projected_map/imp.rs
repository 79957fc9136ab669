// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{IntoIter, Iter, Keys, Values, ValuesMut};
use crate::{
    errors::DuplicateKey,
    internal::ValidationError,
    support::surrogate_table::SurrogateTable,
    DefaultHashBuilder, Identity, Projection,
};
use alloc::format;
use core::{
    cell::RefCell,
    fmt,
    future::Future,
    hash::{BuildHasher, Hash},
};
use equivalent::Equivalent;
use tracing::trace;

/// A map keyed by a projection of the key.
///
/// Every key is passed through the map's [`Projection`] to obtain a surrogate,
/// and the surrogate, not the key, is used for hashing and equality. The
/// original key is stored next to the value and returned on iteration.
///
/// Keys that project to the same surrogate are the same entry: a later
/// [`set`](Self::set) replaces both the value and the stored key, in place.
///
/// Entries are iterated in the order their surrogates were first inserted.
///
/// The default projection is [`Identity`], which makes this an
/// insertion-ordered hash map.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use projmap::ProjectedMap;
///
/// #[derive(Debug)]
/// struct CompoundKey {
///     name: &'static str,
///     id: u32,
/// }
///
/// let mut map = ProjectedMap::with_projection(|key: &CompoundKey| {
///     format!("{}#{}", key.name, key.id)
/// });
///
/// map.set(CompoundKey { name: "key", id: 1 }, 55)
///     .set(CompoundKey { name: "key", id: 2 }, 22);
///
/// // A distinct key with the same projection is the same entry.
/// map.set(CompoundKey { name: "key", id: 1 }, 66);
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&CompoundKey { name: "key", id: 1 }), Some(&66));
/// assert_eq!(map.values().copied().collect::<Vec<_>>(), [66, 22]);
/// # }
/// ```
pub struct ProjectedMap<K, V, P = Identity, H = DefaultHashBuilder>
where
    P: Projection<K>,
{
    projection: P,
    table: SurrogateTable<P::Surrogate, (K, V), H>,
}

impl<K, V, P, H> Clone for ProjectedMap<K, V, P, H>
where
    K: Clone,
    V: Clone,
    P: Projection<K> + Clone,
    P::Surrogate: Clone,
    H: Clone,
{
    fn clone(&self) -> Self {
        Self { projection: self.projection.clone(), table: self.table.clone() }
    }
}

impl<K, V, P, H> Default for ProjectedMap<K, V, P, H>
where
    P: Projection<K> + Default,
    H: Default,
{
    fn default() -> Self {
        Self { projection: P::default(), table: SurrogateTable::default() }
    }
}

#[cfg(feature = "default-hasher")]
impl<K, V> ProjectedMap<K, V>
where
    Identity: Projection<K>,
{
    /// Creates a new, empty `ProjectedMap` using the identity projection.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    #[inline]
    pub fn new() -> Self {
        Self::with_projection(Identity)
    }

    /// Creates a new `ProjectedMap` using the identity projection, with at
    /// least the given capacity.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_projection_and_hasher(
            capacity,
            Identity,
            DefaultHashBuilder::default(),
        )
    }
}

#[cfg(feature = "default-hasher")]
impl<K, V, P: Projection<K>> ProjectedMap<K, V, P> {
    /// Creates a new, empty `ProjectedMap` using the given projection.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    pub fn with_projection(projection: P) -> Self {
        Self::with_projection_and_hasher(
            projection,
            DefaultHashBuilder::default(),
        )
    }

    /// Creates a `ProjectedMap` using the given projection, seeded with
    /// `entries`.
    ///
    /// Entries are set in order, so if several of them share a surrogate, the
    /// last one wins.
    #[cfg_attr(doc_cfg, doc(cfg(feature = "default-hasher")))]
    pub fn from_entries_with<I>(projection: P, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_projection(projection);
        map.extend(entries);
        map
    }
}

impl<K, V, P: Projection<K>, H> ProjectedMap<K, V, P, H> {
    /// Creates a new, empty `ProjectedMap` with the given projection and
    /// hasher.
    pub fn with_projection_and_hasher(projection: P, hasher: H) -> Self {
        Self::with_capacity_projection_and_hasher(0, projection, hasher)
    }

    /// Creates a new `ProjectedMap` with the given capacity, projection and
    /// hasher.
    pub fn with_capacity_projection_and_hasher(
        capacity: usize,
        projection: P,
        hasher: H,
    ) -> Self {
        Self {
            projection,
            table: SurrogateTable::with_capacity_and_hasher(capacity, hasher),
        }
    }

    /// Returns the map's projection.
    #[inline]
    pub fn projection(&self) -> &P {
        &self.projection
    }

    /// Returns the hasher used for surrogates.
    #[inline]
    pub fn hasher(&self) -> &H {
        self.table.hasher()
    }

    /// Returns the currently allocated capacity of the map.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of distinct surrogates in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Iterates over the `(key, value)` entries in the map, in insertion
    /// order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.table.items())
    }

    /// Iterates over the original keys in the map, in insertion order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.table.items())
    }

    /// Iterates over the values in the map, in insertion order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.table.items())
    }

    /// Iterates over the values in the map by mutable reference, in insertion
    /// order.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.table.items_mut())
    }

    /// Removes all entries from the map.
    pub fn clear(&mut self) {
        trace!(len = self.len(), "clearing projected map");
        self.table.clear();
    }
}

impl<K, V, P: Projection<K>, H: BuildHasher> ProjectedMap<K, V, P, H> {
    /// Checks general invariants of the map.
    ///
    /// The code below always upholds these invariants, but it's useful to have
    /// an explicit check for tests.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError>
    where
        K: fmt::Debug,
    {
        self.table
            .validate()
            .map_err(|error| ValidationError::Table { name: "entries", error })?;

        // Each stored key must still project to the surrogate it was stored
        // under.
        for (ix, (key, _)) in self.table.items().iter().enumerate() {
            let stored = self.table.surrogate_at(ix).ok_or_else(|| {
                ValidationError::general(format!(
                    "entry at index {ix} has no surrogate"
                ))
            })?;
            if self.projection.project(key) != *stored {
                return Err(ValidationError::general(format!(
                    "key {key:?} at index {ix} no longer projects to its \
                     stored surrogate"
                )));
            }
        }

        Ok(())
    }

    /// Returns true if the map contains an entry for the key's surrogate.
    pub fn contains_key(&self, key: &K) -> bool {
        let surrogate = self.projection.project(key);
        self.table.find_index(&surrogate).is_some()
    }

    /// Returns true if the map contains an entry for the given surrogate.
    ///
    /// This doesn't require building a key.
    pub fn contains_surrogate<Q>(&self, surrogate: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<P::Surrogate>,
    {
        self.table.find_index(surrogate).is_some()
    }

    /// Gets a reference to the value stored for the key's surrogate.
    ///
    /// Returns `None` if the surrogate is absent. A stored value is always
    /// `Some`, even if the value itself represents emptiness (for example a
    /// `V` of `Option<T>` holding `None`).
    pub fn get(&self, key: &K) -> Option<&V> {
        let surrogate = self.projection.project(key);
        self.table.get(&surrogate).map(|(_, value)| value)
    }

    /// Gets the stored key and value for the key's surrogate.
    ///
    /// The stored key is the one passed to the most recent write, which may
    /// be a different instance than `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let surrogate = self.projection.project(key);
        self.table.get(&surrogate).map(|(key, value)| (key, value))
    }

    /// Gets a mutable reference to the value stored for the key's surrogate.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let surrogate = self.projection.project(key);
        self.table.get_mut(&surrogate).map(|(_, value)| value)
    }

    /// Gets the stored key and value for the given surrogate.
    pub fn get_by_surrogate<Q>(&self, surrogate: &Q) -> Option<(&K, &V)>
    where
        Q: ?Sized + Hash + Equivalent<P::Surrogate>,
    {
        self.table.get(surrogate).map(|(key, value)| (key, value))
    }

    /// Gets the value stored for the key's surrogate, or `fallback` if the
    /// surrogate is absent.
    ///
    /// The map is not modified.
    pub fn get_or<'a>(&'a self, key: &K, fallback: &'a V) -> &'a V {
        self.get(key).unwrap_or(fallback)
    }

    /// Gets the value stored for the key's surrogate, computing and storing it
    /// if the surrogate is absent.
    ///
    /// `factory` is only called if the surrogate is absent. It receives the
    /// key and the map as it is before the insert.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "default-hasher")] {
    /// use projmap::ProjectedMap;
    ///
    /// let mut lengths = ProjectedMap::with_projection(|s: &String| s.to_lowercase());
    /// let len = lengths.get_or_compute("Hello".to_owned(), |key, _| key.len());
    /// assert_eq!(*len, 5);
    ///
    /// // "HELLO" has the same surrogate, so the factory isn't called.
    /// let len = lengths.get_or_compute("HELLO".to_owned(), |_, _| unreachable!());
    /// assert_eq!(*len, 5);
    /// # }
    /// ```
    pub fn get_or_compute<F>(&mut self, key: K, factory: F) -> &mut V
    where
        F: FnOnce(&K, &Self) -> V,
    {
        let surrogate = self.projection.project(&key);
        let index = match self.table.find_index(&surrogate) {
            Some(index) => index,
            None => {
                trace!("surrogate absent, invoking factory");
                let value = factory(&key, &*self);
                self.table.insert_absent(surrogate, (key, value))
            }
        };
        &mut self.table[index].1
    }

    /// Like [`get_or_compute`](Self::get_or_compute), but with a fallible
    /// factory.
    ///
    /// If the factory fails, its error is returned unchanged and nothing is
    /// stored.
    pub fn try_get_or_compute<F, E>(
        &mut self,
        key: K,
        factory: F,
    ) -> Result<&mut V, E>
    where
        F: FnOnce(&K, &Self) -> Result<V, E>,
    {
        let surrogate = self.projection.project(&key);
        let index = match self.table.find_index(&surrogate) {
            Some(index) => index,
            None => {
                trace!("surrogate absent, invoking fallible factory");
                let value = factory(&key, &*self)?;
                self.table.insert_absent(surrogate, (key, value))
            }
        };
        Ok(&mut self.table[index].1)
    }

    /// Gets the value stored for the key's surrogate, computing it
    /// asynchronously if the surrogate is absent.
    ///
    /// The existence check and the call to `factory` happen before the first
    /// suspension point. The returned future then awaits the factory's future
    /// and stores its output under the surrogate computed up front.
    ///
    /// Dropping the returned future before it completes drops the factory's
    /// future and stores nothing.
    pub async fn get_or_compute_async<F, Fut>(
        &mut self,
        key: K,
        factory: F,
    ) -> &mut V
    where
        F: FnOnce(&K, &Self) -> Fut,
        Fut: Future<Output = V>,
    {
        let surrogate = self.projection.project(&key);
        let index = match self.table.find_index(&surrogate) {
            Some(index) => index,
            None => {
                trace!("surrogate absent, invoking async factory");
                let value = factory(&key, &*self).await;
                // The map is exclusively borrowed across the await, so the
                // surrogate is still absent.
                self.table.insert_absent(surrogate, (key, value))
            }
        };
        &mut self.table[index].1
    }

    /// Gets a clone of the value stored for the key's surrogate, computing it
    /// asynchronously if the surrogate is absent. For maps shared between
    /// cooperatively scheduled tasks.
    ///
    /// The map is only borrowed while checking for the surrogate and calling
    /// `factory`, and again while storing the result. It is not borrowed while
    /// the factory's future is pending.
    ///
    /// # Concurrent calls
    ///
    /// In-flight computations are not de-duplicated. If a second call for the
    /// same surrogate starts before the first one's factory future completes,
    /// it will not see the pending write and will call its own factory. Both
    /// results are stored as they complete, so the one that completes last
    /// wins, and each caller receives the value its own factory produced.
    ///
    /// Computations can't be cancelled through the map. Dropping the returned
    /// future drops the factory's future and stores nothing.
    ///
    /// # Panics
    ///
    /// Panics if the map is mutably borrowed when the check or the store
    /// happens.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "default-hasher")] {
    /// use projmap::ProjectedMap;
    /// use std::cell::RefCell;
    ///
    /// let map = RefCell::new(ProjectedMap::<u32, String>::new());
    /// let value = futures::executor::block_on(
    ///     ProjectedMap::get_or_compute_shared(&map, 7, |key, _| {
    ///         let rendered = format!("item {key}");
    ///         async move { rendered }
    ///     }),
    /// );
    /// assert_eq!(value, "item 7");
    /// assert_eq!(map.borrow().get(&7).map(String::as_str), Some("item 7"));
    /// # }
    /// ```
    pub async fn get_or_compute_shared<F, Fut>(
        map: &RefCell<Self>,
        key: K,
        factory: F,
    ) -> V
    where
        F: FnOnce(&K, &Self) -> Fut,
        Fut: Future<Output = V>,
        V: Clone,
    {
        let (surrogate, pending) = {
            let this = map.borrow();
            let surrogate = this.projection.project(&key);
            if let Some((_, value)) = this.table.get(&surrogate) {
                return value.clone();
            }
            trace!("surrogate absent, invoking shared async factory");
            let pending = factory(&key, &*this);
            (surrogate, pending)
        };

        let value = pending.await;
        map.borrow_mut().table.upsert(surrogate, (key, value.clone()));
        value
    }

    /// Stores `value` under the key's surrogate, replacing any existing value
    /// and stored key.
    ///
    /// If the surrogate is already present, the entry keeps its position in
    /// iteration order. Returns the map to allow chaining.
    pub fn set(&mut self, key: K, value: V) -> &mut Self {
        self.insert(key, value);
        self
    }

    /// Stores `value` under the key's surrogate, returning the entry it
    /// replaced, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        let surrogate = self.projection.project(&key);
        self.table.upsert(surrogate, (key, value))
    }

    /// Stores `value` under the key's surrogate, returning an error if the
    /// surrogate is already present.
    ///
    /// On error the map is unchanged.
    pub fn insert_unique(
        &mut self,
        key: K,
        value: V,
    ) -> Result<(), DuplicateKey<(K, V), &(K, V)>> {
        let surrogate = self.projection.project(&key);
        if let Some(index) = self.table.find_index(&surrogate) {
            return Err(DuplicateKey::__internal_new(
                (key, value),
                &self.table[index],
            ));
        }
        self.table.insert_absent(surrogate, (key, value));
        Ok(())
    }

    /// Removes the entry for the key's surrogate, returning the stored key and
    /// value.
    ///
    /// The order of the remaining entries is preserved.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let surrogate = self.projection.project(key);
        self.table.shift_remove(&surrogate).map(|(_, entry)| entry)
    }

    /// Removes the entry for the key's surrogate, returning whether an entry
    /// was removed.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }
}

impl<K, V, P, H> fmt::Debug for ProjectedMap<K, V, P, H>
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
    for ProjectedMap<K, V, P, H>
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, P, H> FromIterator<(K, V)> for ProjectedMap<K, V, P, H>
where
    P: Projection<K> + Default,
    H: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, P: Projection<K>, H> IntoIterator
    for &'a ProjectedMap<K, V, P, H>
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, P: Projection<K>, H> IntoIterator for ProjectedMap<K, V, P, H> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.table.into_items())
    }
}
