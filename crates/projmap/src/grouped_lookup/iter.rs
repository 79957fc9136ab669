// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::projected_map;
use alloc::vec::Vec;
use core::{iter::FusedIterator, slice};

/// An iterator over the values of one group of a [`GroupedLookup`], in
/// insertion order. Created by [`GroupedLookup::get`].
///
/// Empty if the key has no group.
///
/// [`GroupedLookup`]: crate::GroupedLookup
/// [`GroupedLookup::get`]: crate::GroupedLookup::get
#[derive(Clone, Debug)]
pub struct GroupIter<'a, V> {
    inner: slice::Iter<'a, V>,
}

impl<'a, V> GroupIter<'a, V> {
    pub(crate) fn new(values: &'a [V]) -> Self {
        Self { inner: values.iter() }
    }
}

impl<V> Default for GroupIter<'_, V> {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl<'a, V> Iterator for GroupIter<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for GroupIter<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for GroupIter<'_, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for GroupIter<'_, V> {}

/// An iterator over the groups of a [`GroupedLookup`], in group creation
/// order. Created by [`GroupedLookup::iter`].
///
/// [`GroupedLookup`]: crate::GroupedLookup
/// [`GroupedLookup::iter`]: crate::GroupedLookup::iter
#[derive(Clone, Debug)]
pub struct Iter<'a, K, V> {
    inner: projected_map::Iter<'a, K, Vec<V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(inner: projected_map::Iter<'a, K, Vec<V>>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a [V]);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, group)| (key, group.as_slice()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the distinct keys of a [`GroupedLookup`], in group
/// creation order. Created by [`GroupedLookup::keys`].
///
/// [`GroupedLookup`]: crate::GroupedLookup
/// [`GroupedLookup::keys`]: crate::GroupedLookup::keys
#[derive(Clone, Debug)]
pub struct Keys<'a, K, V> {
    inner: projected_map::Keys<'a, K, Vec<V>>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: projected_map::Keys<'a, K, Vec<V>>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
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

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over every value of a [`GroupedLookup`]. Created by
/// [`GroupedLookup::values`].
///
/// Groups are visited in creation order, and values within a group in
/// insertion order.
///
/// [`GroupedLookup`]: crate::GroupedLookup
/// [`GroupedLookup::values`]: crate::GroupedLookup::values
#[derive(Clone, Debug)]
pub struct Values<'a, K, V> {
    groups: projected_map::Values<'a, K, Vec<V>>,
    current: slice::Iter<'a, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(groups: projected_map::Values<'a, K, Vec<V>>) -> Self {
        Self { groups, current: Default::default() }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.current.next() {
                return Some(value);
            }
            self.current = self.groups.next()?.iter();
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every remaining group has at least one value.
        let (groups, _) = self.groups.size_hint();
        (self.current.len() + groups, None)
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An iterator over the groups of a [`GroupedLookup`] by ownership. Created
/// by [`GroupedLookup::into_iter`].
///
/// [`GroupedLookup`]: crate::GroupedLookup
/// [`GroupedLookup::into_iter`]: crate::GroupedLookup::into_iter
#[derive(Debug)]
pub struct IntoIter<K, V> {
    inner: projected_map::IntoIter<K, Vec<V>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(inner: projected_map::IntoIter<K, Vec<V>>) -> Self {
        Self { inner }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, Vec<V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}
