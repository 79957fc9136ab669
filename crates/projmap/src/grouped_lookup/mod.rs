// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An ordered one-to-many map, optionally keyed by a projection.
//!
//! For more information, see [`GroupedLookup`].

pub(crate) mod imp;
mod iter;

pub use imp::GroupedLookup;
pub use iter::{GroupIter, IntoIter, Iter, Keys, Values};
