// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A set keyed by a projection of its items.
//!
//! For more information, see [`ProjectedSet`].

pub(crate) mod imp;
mod iter;

pub use imp::ProjectedSet;
pub use iter::{Entries, IntoIter, Iter};
