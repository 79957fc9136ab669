// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use alloc::string::{String, ToString};
use core::{fmt, hash::Hash};

/// Maps a key to the surrogate that identifies it.
///
/// Two keys are treated as the same entry if and only if their surrogates
/// compare equal.
///
/// # Implementations
///
/// * Any `Fn(&K) -> S` closure or function, where `S: Hash + Eq`.
/// * [`Identity`], which uses a clone of the key itself.
/// * [`Stringify`], which uses the key's [`Display`](fmt::Display) output.
///
/// # Contract
///
/// A projection must be deterministic: projecting the same key twice must
/// produce equal surrogates. The containers don't check this, but a projection
/// that violates it makes entries unreachable.
///
/// If `project` panics, the panic propagates out of the container operation
/// that called it. Containers always project before mutating, so they are left
/// unchanged.
pub trait Projection<K: ?Sized> {
    /// The surrogate type used to index storage.
    type Surrogate: Hash + Eq;

    /// Projects a key to its surrogate.
    fn project(&self, key: &K) -> Self::Surrogate;
}

impl<K, S, F> Projection<K> for F
where
    K: ?Sized,
    S: Hash + Eq,
    F: Fn(&K) -> S,
{
    type Surrogate = S;

    #[inline]
    fn project(&self, key: &K) -> S {
        self(key)
    }
}

/// The identity projection: keys are their own surrogates.
///
/// This is the default projection for [`ProjectedMap`] and [`GroupedLookup`].
///
/// [`ProjectedMap`]: crate::ProjectedMap
/// [`GroupedLookup`]: crate::GroupedLookup
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Identity;

impl<K: Clone + Hash + Eq> Projection<K> for Identity {
    type Surrogate = K;

    #[inline]
    fn project(&self, key: &K) -> K {
        key.clone()
    }
}

/// Projects keys to their string form, via [`Display`](fmt::Display).
///
/// This is the default projection for [`ProjectedSet`]: keys inserted without
/// an explicit projection are deduplicated by their string form, even if they
/// are otherwise distinct.
///
/// [`ProjectedSet`]: crate::ProjectedSet
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stringify;

impl<K: ?Sized + fmt::Display> Projection<K> for Stringify {
    type Surrogate = String;

    #[inline]
    fn project(&self, key: &K) -> String {
        key.to_string()
    }
}
