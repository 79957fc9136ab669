// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single-valued map keyed by a projection of the key.
//!
//! For more information, see [`ProjectedMap`].

pub(crate) mod imp;
mod iter;

pub use imp::ProjectedMap;
pub use iter::{IntoIter, Iter, Keys, Values, ValuesMut};
