//! # Byte Pair Encoding
//!
//! * [`MergeEngine`] - the per-chunk merge loop.
//! * [`ChunkCache`] - memoized merge results.

pub mod chunk_cache;
pub mod merge_engine;

#[doc(inline)]
pub use chunk_cache::ChunkCache;
#[doc(inline)]
pub use merge_engine::MergeEngine;
