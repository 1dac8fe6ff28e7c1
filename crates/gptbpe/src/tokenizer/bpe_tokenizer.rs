//! # GPT-2 / GPT-3 Tokenizer

use core::fmt::Debug;
use std::sync::Arc;

use crate::{
    bpe::{ChunkCache, MergeEngine},
    codec::{ByteUnicodeTable, string_from_utf8_lossy},
    concurrency::CheckoutPool,
    errors::{BpeError, BpeResult},
    pretokenize::Pretokenizer,
    tokenizer::{EncodeResult, TokenizerOptions},
    types::TokenType,
    vocab::{Gpt3Assets, VocabTable},
};

/// Byte-level BPE tokenizer.
///
/// The tables are immutable and shared across threads; a `Tokenizer` is
/// `Send + Sync`, and is meant to be held in an [`Arc`].
///
/// Per-chunk merge results are memoized in a [`ChunkCache`]; cache misses
/// run the merge loop in a scratch buffer checked out of a [`CheckoutPool`].
pub struct Tokenizer<T: TokenType> {
    engine: MergeEngine<T>,
    pretokenizer: Pretokenizer,
    cache: ChunkCache<T>,
    scratch_pool: CheckoutPool<Vec<T>>,
    options: TokenizerOptions,
}

impl<T: TokenType> Debug for Tokenizer<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("engine", &self.engine)
            .field("cache", &self.cache)
            .field("scratch_pool", &self.scratch_pool)
            .field("options", &self.options)
            .finish()
    }
}

impl<T: TokenType> Tokenizer<T> {
    /// Build a tokenizer.
    ///
    /// ## Returns
    /// The tokenizer; or [`BpeError::AssetInitialization`] if the assets are
    /// inconsistent.
    pub fn new(
        assets: Gpt3Assets<T>,
        options: TokenizerOptions,
    ) -> BpeResult<Self> {
        let (vocab, merges) = assets.into_parts();
        let engine = MergeEngine::new(Arc::new(vocab), &merges)?;

        let pretokenizer =
            Pretokenizer::gpt2(options.regex_pool).map_err(BpeError::into_asset_error)?;

        let cache = ChunkCache::new(options.cache_capacity, options.resolved_cache_shards());

        let scratch_pool = CheckoutPool::new(
            || Ok(Vec::with_capacity(64)),
            options.resolved_scratch_pool(),
        );

        Ok(Self {
            engine,
            pretokenizer,
            cache,
            scratch_pool,
            options,
        })
    }

    /// Build a tokenizer with default options.
    pub fn from_assets(assets: Gpt3Assets<T>) -> BpeResult<Self> {
        Self::new(assets, TokenizerOptions::default())
    }

    /// The options this was built with.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &VocabTable<T> {
        self.engine.vocab()
    }

    /// The merge engine.
    pub fn engine(&self) -> &MergeEngine<T> {
        &self.engine
    }

    /// The pretokenizer.
    pub fn pretokenizer(&self) -> &Pretokenizer {
        &self.pretokenizer
    }

    /// The chunk cache.
    pub fn cache(&self) -> &ChunkCache<T> {
        &self.cache
    }

    /// The tokens for one chunk, through the cache.
    fn chunk_tokens(
        &self,
        chunk: &str,
    ) -> BpeResult<Arc<[T]>> {
        self.cache.try_get_or_compute(chunk, |chunk| {
            let mut scratch = self.scratch_pool.checkout()?;
            scratch.clear();
            self.engine.encode_append(chunk.as_bytes(), &mut scratch);
            Ok(Arc::from(scratch.as_slice()))
        })
    }

    /// Encode text, appending token ids to a buffer.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    pub fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> BpeResult<()> {
        for chunk in self.pretokenizer.chunks(text) {
            tokens.extend_from_slice(&self.chunk_tokens(chunk?)?);
        }
        Ok(())
    }

    /// Encode text to token ids.
    pub fn try_encode_ids(
        &self,
        text: &str,
    ) -> BpeResult<Vec<T>> {
        let mut tokens = Vec::with_capacity(text.len() / 3);
        self.try_encode_append(text, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode text to token ids, and the text of each token.
    pub fn try_encode(
        &self,
        text: &str,
    ) -> BpeResult<EncodeResult<T>> {
        let ids = self.try_encode_ids(text)?;
        let subwords = ids
            .iter()
            .map(|&id| self.try_decode(&[id]))
            .collect::<BpeResult<Vec<_>>>()?;
        Ok(EncodeResult { ids, subwords })
    }

    /// Encode text to token ids, and the text of each token.
    ///
    /// ## Panics
    /// Panics if encoding fails.
    pub fn encode(
        &self,
        text: &str,
    ) -> EncodeResult<T> {
        self.try_encode(text).unwrap()
    }

    /// Count the tokens in text.
    ///
    /// Equal to the length of [`try_encode_ids`](Self::try_encode_ids).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn try_count(
        &self,
        text: &str,
    ) -> BpeResult<usize> {
        self.pretokenizer
            .chunks(text)
            .map(|chunk| self.chunk_tokens(chunk?).map(|t| t.len()))
            .sum()
    }

    /// Count the tokens in text.
    ///
    /// ## Panics
    /// Panics if encoding fails.
    pub fn count(
        &self,
        text: &str,
    ) -> usize {
        self.try_count(text).unwrap()
    }

    /// Decode token ids to their raw bytes.
    ///
    /// ## Returns
    /// The bytes; or [`BpeError::UnknownId`].
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, ids)))]
    pub fn try_decode_to_bytes(
        &self,
        ids: &[T],
    ) -> BpeResult<Vec<u8>> {
        let table = ByteUnicodeTable::shared();
        let vocab = self.vocab();

        let mut bytes = Vec::with_capacity(ids.len() * 4);
        for &id in ids {
            table.append_bytes(vocab.subword_of(id)?, &mut bytes)?;
        }
        Ok(bytes)
    }

    /// Decode token ids to text.
    ///
    /// All bytes are collected before the UTF-8 decode; invalid sequences
    /// read as U+FFFD.
    ///
    /// ## Returns
    /// The text; or [`BpeError::UnknownId`].
    pub fn try_decode(
        &self,
        ids: &[T],
    ) -> BpeResult<String> {
        self.try_decode_to_bytes(ids).map(string_from_utf8_lossy)
    }

    /// Decode token ids to text.
    ///
    /// ## Panics
    /// Panics on an unknown id.
    pub fn decode(
        &self,
        ids: &[T],
    ) -> String {
        self.try_decode(ids).unwrap()
    }

    /// Encode a batch of texts.
    ///
    /// Runs in parallel when built with ``rayon`` and
    /// [`TokenizerOptions::parallel`].
    pub fn try_encode_batch<S>(
        &self,
        batch: &[S],
    ) -> BpeResult<Vec<EncodeResult<T>>>
    where
        S: AsRef<str> + Sync,
    {
        #[cfg(feature = "rayon")]
        if self.options.parallel {
            use rayon::prelude::*;

            return batch
                .par_iter()
                .map(|text| self.try_encode(text.as_ref()))
                .collect();
        }

        batch
            .iter()
            .map(|text| self.try_encode(text.as_ref()))
            .collect()
    }

    /// Encode a batch of texts.
    ///
    /// ## Panics
    /// Panics if encoding fails.
    pub fn encode_batch<S>(
        &self,
        batch: &[S],
    ) -> Vec<EncodeResult<T>>
    where
        S: AsRef<str> + Sync,
    {
        self.try_encode_batch(batch).unwrap()
    }

    /// Decode a batch of token id sequences.
    ///
    /// Runs in parallel when built with ``rayon`` and
    /// [`TokenizerOptions::parallel`].
    pub fn try_decode_batch<S>(
        &self,
        batch: &[S],
    ) -> BpeResult<Vec<String>>
    where
        S: AsRef<[T]> + Sync,
    {
        #[cfg(feature = "rayon")]
        if self.options.parallel {
            use rayon::prelude::*;

            return batch
                .par_iter()
                .map(|ids| self.try_decode(ids.as_ref()))
                .collect();
        }

        batch
            .iter()
            .map(|ids| self.try_decode(ids.as_ref()))
            .collect()
    }

    /// Decode a batch of token id sequences.
    ///
    /// ## Panics
    /// Panics on an unknown id.
    pub fn decode_batch<S>(
        &self,
        batch: &[S],
    ) -> Vec<String>
    where
        S: AsRef<[T]> + Sync,
    {
        self.try_decode_batch(batch).unwrap()
    }
}
