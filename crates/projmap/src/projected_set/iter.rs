// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use alloc::vec::{self, Vec};
use core::{iter::FusedIterator, slice};

/// An iterator over the keys of a [`ProjectedSet`], in insertion order.
/// Created by [`ProjectedSet::iter`], [`ProjectedSet::keys`] and
/// [`ProjectedSet::values`].
///
/// [`ProjectedSet`]: crate::ProjectedSet
/// [`ProjectedSet::iter`]: crate::ProjectedSet::iter
/// [`ProjectedSet::keys`]: crate::ProjectedSet::keys
/// [`ProjectedSet::values`]: crate::ProjectedSet::values
#[derive(Clone, Debug)]
pub struct Iter<'a, K> {
    inner: slice::Iter<'a, K>,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(keys: &'a [K]) -> Self {
        Self { inner: keys.iter() }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

/// An iterator over `(key, key)` pairs of a [`ProjectedSet`], for consumers
/// that expect map-shaped entries. Created by [`ProjectedSet::entries`].
///
/// [`ProjectedSet`]: crate::ProjectedSet
/// [`ProjectedSet::entries`]: crate::ProjectedSet::entries
#[derive(Clone, Debug)]
pub struct Entries<'a, K> {
    inner: slice::Iter<'a, K>,
}

impl<'a, K> Entries<'a, K> {
    pub(crate) fn new(keys: &'a [K]) -> Self {
        Self { inner: keys.iter() }
    }
}

impl<'a, K> Iterator for Entries<'a, K> {
    type Item = (&'a K, &'a K);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|key| (key, key))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Entries<'_, K> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for Entries<'_, K> {}

/// An iterator over the keys of a [`ProjectedSet`] by ownership. Created by
/// [`ProjectedSet::into_iter`].
///
/// [`ProjectedSet`]: crate::ProjectedSet
/// [`ProjectedSet::into_iter`]: crate::ProjectedSet::into_iter
#[derive(Debug)]
pub struct IntoIter<K> {
    inner: vec::IntoIter<K>,
}

impl<K> IntoIter<K> {
    pub(crate) fn new(keys: Vec<K>) -> Self {
        Self { inner: keys.into_iter() }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}
