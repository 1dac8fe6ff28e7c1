//! # Token Types and Hash Maps

use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, Unsigned};

/// An unsigned integer token id.
///
/// Every id in a vocabulary must fit in `T`; `u16` holds the 50257 GPT-2 ids.
pub trait TokenType:
    'static + PrimInt + Unsigned + FromPrimitive + Hash + Debug + Display + Send + Sync
{
}

impl<T> TokenType for T where
    T: 'static + PrimInt + Unsigned + FromPrimitive + Hash + Debug + Display + Send + Sync
{
}

/// An ordered pair of adjacent tokens.
pub type Pair<T> = (T, T);

/// Widen a token to `u64` for error reporting.
pub fn token_to_u64<T: TokenType>(token: T) -> u64 {
    token.to_u64().unwrap_or(u64::MAX)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// The crate's hash map.
        pub type BpeHashMap<K, V> = ahash::AHashMap<K, V>;

        /// An empty [`BpeHashMap`] with room for `capacity` entries.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> BpeHashMap<K, V> {
            BpeHashMap::with_capacity(capacity)
        }
    } else if #[cfg(feature = "foldhash")] {
        /// The crate's hash map.
        pub type BpeHashMap<K, V> = foldhash::HashMap<K, V>;

        /// An empty [`BpeHashMap`] with room for `capacity` entries.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> BpeHashMap<K, V> {
            foldhash::HashMapExt::with_capacity(capacity)
        }
    } else {
        /// The crate's hash map.
        pub type BpeHashMap<K, V> = std::collections::HashMap<K, V>;

        /// An empty [`BpeHashMap`] with room for `capacity` entries.
        pub fn hash_map_with_capacity<K, V>(capacity: usize) -> BpeHashMap<K, V> {
            BpeHashMap::with_capacity(capacity)
        }
    }
}
