// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for this crate.
//!
//! Lookups never fail: an unknown key produces `None`, `false` or an empty
//! iterator. The only error is a rejected `insert_unique`.

use core::fmt;

/// A key's surrogate is already present in the container.
///
/// Returned by [`ProjectedMap::insert_unique`] and
/// [`ProjectedSet::insert_unique`].
///
/// [`ProjectedMap::insert_unique`]: crate::ProjectedMap::insert_unique
/// [`ProjectedSet::insert_unique`]: crate::ProjectedSet::insert_unique
#[derive(Debug)]
pub struct DuplicateKey<T, D = T> {
    new: T,
    existing: D,
}

impl<T, D> DuplicateKey<T, D> {
    /// Creates a new `DuplicateKey` error.
    #[doc(hidden)]
    pub fn __internal_new(new: T, existing: D) -> Self {
        DuplicateKey { new, existing }
    }

    /// Returns the entry that was rejected.
    #[inline]
    pub fn new_item(&self) -> &T {
        &self.new
    }

    /// Returns the entry already stored under the same surrogate.
    #[inline]
    pub fn existing(&self) -> &D {
        &self.existing
    }

    /// Converts self into its constituent parts.
    pub fn into_parts(self) -> (T, D) {
        (self.new, self.existing)
    }
}

impl<T: Clone> DuplicateKey<T, &T> {
    /// Converts self to an owned `DuplicateKey` by cloning the existing entry.
    ///
    /// If `T` is `'static`, the owned form is suitable for conversion to
    /// `Box<dyn std::error::Error>`, `anyhow::Error`, and so on.
    pub fn into_owned(self) -> DuplicateKey<T> {
        DuplicateKey { new: self.new, existing: self.existing.clone() }
    }
}

impl<T: fmt::Debug, D: fmt::Debug> fmt::Display for DuplicateKey<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "new entry: {:?} has the same surrogate as existing: {:?}",
            self.new, self.existing
        )
    }
}

impl<T: fmt::Debug, D: fmt::Debug> core::error::Error for DuplicateKey<T, D> {}
