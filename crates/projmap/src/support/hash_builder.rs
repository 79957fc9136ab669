// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Default hasher for the containers in this crate.
///
/// This hashes surrogates, not the original keys.
#[cfg(feature = "default-hasher")]
pub type DefaultHashBuilder = foldhash::fast::RandomState;

#[cfg(not(feature = "default-hasher"))]
mod dummy {
    use core::hash::{BuildHasher, Hasher};

    /// Placeholder default hasher, used when the `default-hasher` feature is
    /// disabled. It cannot be constructed: pass a hasher explicitly with
    /// `with_projection_and_hasher` instead.
    #[derive(Clone, Copy, Debug)]
    pub enum DefaultHashBuilder {}

    impl BuildHasher for DefaultHashBuilder {
        type Hasher = Self;

        fn build_hasher(&self) -> Self::Hasher {
            match *self {}
        }
    }

    impl Hasher for DefaultHashBuilder {
        fn write(&mut self, _bytes: &[u8]) {}

        fn finish(&self) -> u64 {
            0
        }
    }
}

#[cfg(not(feature = "default-hasher"))]
pub use dummy::DefaultHashBuilder;
