// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An insertion-ordered hash table keyed by surrogates.

use crate::internal::TableValidationError;
use alloc::{format, vec::Vec};
use core::{
    hash::{BuildHasher, Hash},
    mem,
    ops::{Index, IndexMut},
};
use equivalent::Equivalent;
use hashbrown::HashTable;

/// A surrogate along with its cached hash.
#[derive(Clone, Debug)]
struct Hashed<S> {
    hash: u64,
    surrogate: S,
}

/// Items stored by surrogate, in insertion order.
///
/// The storage mechanism is a pair of dense vectors (surrogates and items, at
/// matching positions) with a hash table of integer indexes into them.
/// Removal shifts later entries down by one, so iteration order is always the
/// order in which surrogates were first inserted.
#[derive(Clone, Debug)]
pub(crate) struct SurrogateTable<S, T, H> {
    state: H,
    indexes: HashTable<usize>,
    surrogates: Vec<Hashed<S>>,
    items: Vec<T>,
}

impl<S, T, H: Default> Default for SurrogateTable<S, T, H> {
    fn default() -> Self {
        Self::with_capacity_and_hasher(0, H::default())
    }
}

impl<S, T, H> SurrogateTable<S, T, H> {
    pub(crate) fn with_capacity_and_hasher(capacity: usize, state: H) -> Self {
        Self {
            state,
            indexes: HashTable::with_capacity(capacity),
            surrogates: Vec::with_capacity(capacity),
            items: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn hasher(&self) -> &H {
        &self.state
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        // The three collections grow together, but might theoretically
        // diverge: report the smallest.
        self.items
            .capacity()
            .min(self.surrogates.capacity())
            .min(self.indexes.capacity())
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub(crate) fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    #[inline]
    pub(crate) fn into_items(self) -> Vec<T> {
        self.items
    }

    #[inline]
    pub(crate) fn surrogate_at(&self, index: usize) -> Option<&S> {
        self.surrogates.get(index).map(|hashed| &hashed.surrogate)
    }

    pub(crate) fn clear(&mut self) {
        self.indexes.clear();
        self.surrogates.clear();
        self.items.clear();
    }
}

impl<S: Hash + Eq, T, H: BuildHasher> SurrogateTable<S, T, H> {
    /// Checks that the index table and the entry vectors agree.
    pub(crate) fn validate(&self) -> Result<(), TableValidationError> {
        if self.surrogates.len() != self.items.len() {
            return Err(TableValidationError::new(format!(
                "surrogate count {} does not match item count {}",
                self.surrogates.len(),
                self.items.len(),
            )));
        }

        if self.indexes.len() != self.items.len() {
            return Err(TableValidationError::new(format!(
                "expected {} indexes, found {}",
                self.items.len(),
                self.indexes.len(),
            )));
        }

        for (ix, hashed) in self.surrogates.iter().enumerate() {
            let hash = self.state.hash_one(&hashed.surrogate);
            if hash != hashed.hash {
                return Err(TableValidationError::new(format!(
                    "cached hash at index {ix} is stale"
                )));
            }

            match self.find_hashed(hash, &hashed.surrogate) {
                Some(found) if found == ix => {}
                Some(found) => {
                    return Err(TableValidationError::new(format!(
                        "surrogate at index {ix} resolves to index {found}"
                    )));
                }
                None => {
                    return Err(TableValidationError::new(format!(
                        "surrogate at index {ix} is missing from the index \
                         table"
                    )));
                }
            }
        }

        Ok(())
    }

    #[inline]
    pub(crate) fn find_index<Q>(&self, surrogate: &Q) -> Option<usize>
    where
        Q: ?Sized + Hash + Equivalent<S>,
    {
        let hash = self.state.hash_one(surrogate);
        self.find_hashed(hash, surrogate)
    }

    fn find_hashed<Q>(&self, hash: u64, surrogate: &Q) -> Option<usize>
    where
        Q: ?Sized + Equivalent<S>,
    {
        let surrogates = &self.surrogates;
        self.indexes
            .find(hash, |&ix| surrogate.equivalent(&surrogates[ix].surrogate))
            .copied()
    }

    #[inline]
    pub(crate) fn get<Q>(&self, surrogate: &Q) -> Option<&T>
    where
        Q: ?Sized + Hash + Equivalent<S>,
    {
        let index = self.find_index(surrogate)?;
        Some(&self.items[index])
    }

    #[inline]
    pub(crate) fn get_mut<Q>(&mut self, surrogate: &Q) -> Option<&mut T>
    where
        Q: ?Sized + Hash + Equivalent<S>,
    {
        let index = self.find_index(surrogate)?;
        Some(&mut self.items[index])
    }

    /// Appends an item whose surrogate is known to be absent, returning its
    /// index.
    pub(crate) fn insert_absent(&mut self, surrogate: S, item: T) -> usize {
        let hash = self.state.hash_one(&surrogate);
        self.push_hashed(hash, surrogate, item)
    }

    fn push_hashed(&mut self, hash: u64, surrogate: S, item: T) -> usize {
        let index = self.items.len();
        let surrogates = &self.surrogates;
        self.indexes.insert_unique(hash, index, |&ix| surrogates[ix].hash);
        self.surrogates.push(Hashed { hash, surrogate });
        self.items.push(item);
        index
    }

    /// Inserts an item, replacing any item stored under an equal surrogate.
    ///
    /// A replaced item keeps its position.
    pub(crate) fn upsert(&mut self, surrogate: S, item: T) -> Option<T> {
        let hash = self.state.hash_one(&surrogate);
        match self.find_hashed(hash, &surrogate) {
            Some(index) => {
                self.surrogates[index] = Hashed { hash, surrogate };
                Some(mem::replace(&mut self.items[index], item))
            }
            None => {
                self.push_hashed(hash, surrogate, item);
                None
            }
        }
    }

    /// Removes the item stored under an equal surrogate, preserving the order
    /// of the remaining items.
    pub(crate) fn shift_remove<Q>(&mut self, surrogate: &Q) -> Option<(S, T)>
    where
        Q: ?Sized + Hash + Equivalent<S>,
    {
        let hash = self.state.hash_one(surrogate);
        let surrogates = &self.surrogates;
        let entry = self
            .indexes
            .find_entry(hash, |&ix| {
                surrogate.equivalent(&surrogates[ix].surrogate)
            })
            .ok()?;
        let (index, _) = entry.remove();

        // Every entry after the removed one moves down a slot.
        for ix in self.indexes.iter_mut() {
            if *ix > index {
                *ix -= 1;
            }
        }

        let hashed = self.surrogates.remove(index);
        let item = self.items.remove(index);
        Some((hashed.surrogate, item))
    }
}

impl<S, T, H> Index<usize> for SurrogateTable<S, T, H> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.items.get(index).unwrap_or_else(|| {
            panic!("SurrogateTable index out of bounds: {index}")
        })
    }
}

impl<S, T, H> IndexMut<usize> for SurrogateTable<S, T, H> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.items.get_mut(index).unwrap_or_else(|| {
            panic!("SurrogateTable index out of bounds: {index}")
        })
    }
}
