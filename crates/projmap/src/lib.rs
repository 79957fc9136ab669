// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maps, sets and multimaps keyed by a projection of the key.
//!
//! # Motivation
//!
//! A [`HashMap`] keys on the `Hash` and `Eq` implementations of its key type.
//! That's what you want most of the time, but it breaks down when the key is a
//! compound value whose identity lives in derived data. Consider:
//!
//! ```
//! #[derive(Debug)]
//! struct Account {
//!     region: String,
//!     id: u32,
//!     // Loaded lazily, not part of the account's identity.
//!     display_name: Option<String>,
//! }
//! ```
//!
//! Two `Account` values with the same `region` and `id` refer to the same
//! account, even if one of them has its `display_name` filled in. Deriving
//! `Hash` and `Eq` would compare `display_name` too, and writing the impls by
//! hand forces one notion of identity on every user of the type.
//!
//! The containers in this crate take a *projection* instead: a function from
//! the key to a *surrogate* that is `Hash + Eq`. The surrogate drives storage
//! and lookup, while the original key is kept for iteration.
//!
//! ```
//! # #[cfg(feature = "default-hasher")] {
//! use projmap::ProjectedMap;
//!
//! # #[derive(Debug)]
//! # struct Account { region: String, id: u32, display_name: Option<String> }
//! let mut balances = ProjectedMap::with_projection(|account: &Account| {
//!     (account.region.clone(), account.id)
//! });
//!
//! balances.set(
//!     Account { region: "eu".to_owned(), id: 7, display_name: None },
//!     100,
//! );
//!
//! let loaded = Account {
//!     region: "eu".to_owned(),
//!     id: 7,
//!     display_name: Some("Ada".to_owned()),
//! };
//! assert_eq!(balances.get(&loaded), Some(&100));
//! # }
//! ```
//!
//! # Containers
//!
//! * [`ProjectedMap`]: one value per surrogate. Projection defaults to
//!   [`Identity`].
//! * [`ProjectedSet`]: one key per surrogate. Projection defaults to
//!   [`Stringify`], so keys without an explicit projection deduplicate by
//!   their string form.
//! * [`GroupedLookup`]: an ordered group of values per key, i.e. a multimap.
//!   Projection defaults to [`Identity`], i.e. the native equality of the key.
//!
//! All three iterate in insertion order. Overwriting an existing surrogate
//! updates the entry in place and keeps its position.
//!
//! If two distinct keys project to the same surrogate, they are the same
//! entry: the later write replaces both the value and the stored key.
//!
//! [`HashMap`]: https://doc.rust-lang.org/std/collections/struct.HashMap.html

#![no_std]
#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]

extern crate alloc;

pub mod errors;
pub mod grouped_lookup;
#[doc(hidden)]
pub mod internal;
pub mod projected_map;
pub mod projected_set;
mod projection;
mod support;

pub use grouped_lookup::imp::GroupedLookup;
pub use projected_map::imp::ProjectedMap;
pub use projected_set::imp::ProjectedSet;
pub use projection::{Identity, Projection, Stringify};
pub use support::hash_builder::DefaultHashBuilder;
