use std::num::NonZeroUsize;

use crate::{
    concurrency::threads::est_max_parallelism,
    errors::BpeResult,
    tokenizer::Tokenizer,
    types::TokenType,
    vocab::Gpt3Assets,
};

/// Options for configuring a [`Tokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Total chunk cache entry bound; `None` is unbounded.
    pub cache_capacity: Option<NonZeroUsize>,

    /// Chunk cache shard count; `None` derives it from the available parallelism.
    pub cache_shards: Option<NonZeroUsize>,

    /// Idle merge scratch buffers retained; `None` uses the available parallelism.
    pub scratch_pool: Option<NonZeroUsize>,

    /// Pretokenizer regex clones; `None` uses the available parallelism.
    pub regex_pool: Option<NonZeroUsize>,

    /// Run batch operations in parallel.
    ///
    /// Only has an effect with the ``rayon`` feature.
    pub parallel: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            cache_capacity: None,
            cache_shards: None,
            scratch_pool: None,
            regex_pool: None,
            parallel: cfg!(feature = "rayon"),
        }
    }
}

impl TokenizerOptions {
    /// Sets the chunk cache capacity.
    pub fn with_cache_capacity(
        mut self,
        cache_capacity: Option<NonZeroUsize>,
    ) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Sets the chunk cache shard count.
    pub fn with_cache_shards(
        mut self,
        cache_shards: Option<NonZeroUsize>,
    ) -> Self {
        self.cache_shards = cache_shards;
        self
    }

    /// Sets the scratch pool size.
    pub fn with_scratch_pool(
        mut self,
        scratch_pool: Option<NonZeroUsize>,
    ) -> Self {
        self.scratch_pool = scratch_pool;
        self
    }

    /// Sets the regex pool size.
    pub fn with_regex_pool(
        mut self,
        regex_pool: Option<NonZeroUsize>,
    ) -> Self {
        self.regex_pool = regex_pool;
        self
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded batch implementations.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.parallel = parallel;
        self
    }

    /// The effective chunk cache shard count.
    ///
    /// Defaults to four shards per available thread.
    pub fn resolved_cache_shards(&self) -> NonZeroUsize {
        self.cache_shards.unwrap_or_else(|| {
            NonZeroUsize::new(est_max_parallelism() * 4).unwrap_or(NonZeroUsize::MIN)
        })
    }

    /// The effective scratch pool size.
    pub fn resolved_scratch_pool(&self) -> usize {
        self.scratch_pool
            .map(NonZeroUsize::get)
            .unwrap_or_else(est_max_parallelism)
    }

    /// Build a [`Tokenizer`] for the given assets.
    pub fn build<T: TokenType>(
        &self,
        assets: Gpt3Assets<T>,
    ) -> BpeResult<Tokenizer<T>> {
        Tokenizer::new(assets, *self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        let options = TokenizerOptions::default();
        assert_eq!(options.cache_capacity, None);
        assert_eq!(options.parallel, cfg!(feature = "rayon"));
        assert!(options.resolved_cache_shards().get() >= 4);
        assert!(options.resolved_scratch_pool() >= 1);

        let options = options
            .with_cache_capacity(NonZeroUsize::new(1024))
            .with_cache_shards(NonZeroUsize::new(3))
            .with_scratch_pool(NonZeroUsize::new(2))
            .with_regex_pool(NonZeroUsize::new(5))
            .with_parallel(false);

        assert_eq!(options.cache_capacity, NonZeroUsize::new(1024));
        assert_eq!(options.resolved_cache_shards().get(), 3);
        assert_eq!(options.resolved_scratch_pool(), 2);
        assert_eq!(options.regex_pool, NonZeroUsize::new(5));
        assert!(!options.parallel);
    }
}
