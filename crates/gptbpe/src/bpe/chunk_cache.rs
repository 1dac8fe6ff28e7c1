//! # Chunk Cache
//!
//! Memoizes merge results per chunk string.

use core::{
    fmt::Debug,
    hash::{Hash, Hasher},
};
use std::{hash::DefaultHasher, num::NonZeroUsize, sync::Arc};

use lru::LruCache;
use parking_lot::Mutex;

use crate::{errors::BpeResult, types::TokenType};

type Shard<T> = Mutex<LruCache<String, Arc<[T]>>>;

/// A sharded, optionally bounded, chunk -> tokens cache.
///
/// Entries are never mutated once inserted. Computation runs outside the
/// shard lock, so concurrent misses on the same chunk may each compute it;
/// the results are identical and the last insert wins.
///
/// With a capacity, each shard evicts least-recently-used entries past its
/// share of the capacity.
pub struct ChunkCache<T: TokenType> {
    shards: Box<[Shard<T>]>,
    capacity: Option<NonZeroUsize>,
}

impl<T: TokenType> Debug for ChunkCache<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ChunkCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("shards", &self.shards.len())
            .finish()
    }
}

impl<T: TokenType> ChunkCache<T> {
    /// Create a cache.
    ///
    /// ## Arguments
    /// * `capacity` - the total entry bound; `None` is unbounded.
    /// * `shards` - the number of independently locked shards.
    pub fn new(
        capacity: Option<NonZeroUsize>,
        shards: NonZeroUsize,
    ) -> Self {
        let shard_count = match capacity {
            Some(cap) => shards.min(cap),
            None => shards,
        };

        let shards = (0..shard_count.get())
            .map(|_| {
                let cache = match capacity {
                    Some(cap) => {
                        let per_shard = cap.get().div_ceil(shard_count.get());
                        LruCache::new(NonZeroUsize::new(per_shard).unwrap_or(NonZeroUsize::MIN))
                    }
                    None => LruCache::unbounded(),
                };
                Mutex::new(cache)
            })
            .collect();

        log::debug!(
            "chunk cache: capacity={capacity:?}, shards={}",
            shard_count.get()
        );

        Self { shards, capacity }
    }

    fn shard(
        &self,
        chunk: &str,
    ) -> &Shard<T> {
        let mut hasher = DefaultHasher::new();
        chunk.hash(&mut hasher);
        let idx = (hasher.finish() as usize) % self.shards.len();
        &self.shards[idx]
    }

    /// The configured total capacity; `None` is unbounded.
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    /// The number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// The number of cached entries.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    /// Is this empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries.
    pub fn clear(&self) {
        for shard in self.shards.iter() {
            shard.lock().clear();
        }
    }

    /// Look up a chunk.
    pub fn get(
        &self,
        chunk: &str,
    ) -> Option<Arc<[T]>> {
        self.shard(chunk).lock().get(chunk).cloned()
    }

    /// Insert a chunk's tokens, replacing any previous entry.
    pub fn insert(
        &self,
        chunk: &str,
        tokens: Arc<[T]>,
    ) {
        self.shard(chunk).lock().put(chunk.to_string(), tokens);
    }

    /// Look up a chunk, computing and inserting it on a miss.
    pub fn get_or_compute<F>(
        &self,
        chunk: &str,
        compute: F,
    ) -> Arc<[T]>
    where
        F: FnOnce(&str) -> Arc<[T]>,
    {
        if let Some(tokens) = self.get(chunk) {
            return tokens;
        }
        let tokens = compute(chunk);
        self.insert(chunk, tokens.clone());
        tokens
    }

    /// Look up a chunk, computing and inserting it on a miss.
    ///
    /// A failed computation inserts nothing.
    pub fn try_get_or_compute<F>(
        &self,
        chunk: &str,
        compute: F,
    ) -> BpeResult<Arc<[T]>>
    where
        F: FnOnce(&str) -> BpeResult<Arc<[T]>>,
    {
        if let Some(tokens) = self.get(chunk) {
            return Ok(tokens);
        }
        let tokens = compute(chunk)?;
        self.insert(chunk, tokens.clone());
        Ok(tokens)
    }
}
