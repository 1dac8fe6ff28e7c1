//! # Process-Wide Shared Tokenizer
//!
//! A lazily loaded [`Tokenizer`] over the public GPT-2 assets, fetched
//! through the [`GptbpeDiskCache`](crate::disk_cache::GptbpeDiskCache).
//!
//! Loading happens once. A load failure is kept, and every later call
//! returns the same error.
//!
//! ## Network Access
//!
//! The first call which touches the shared tokenizer resolves
//! `encoder.json` and `vocab.bpe` under the `openai/gpt2/` key:
//! 1. from the data directory (`$GPTBPE_DATA_DIR`, else the platform
//!    data dir), if pre-installed there;
//! 2. from the cache directory (`$GPTBPE_CACHE_DIR`, else the platform
//!    cache dir), if downloaded before;
//! 3. otherwise by **downloading** them from `openaipublic.blob.core.windows.net`
//!    into the cache directory.
//!
//! So the first use needs network access, unless the assets are already
//! on disk. On a host without network, pre-install the two files in the
//! data directory, or build a tokenizer directly with [`load_gpt3_tokenizer`]
//! and [`GptbpeDiskCacheOptions::with_offline`], which never downloads.

use std::sync::{Arc, OnceLock};

use crate::{
    disk_cache::{GptbpeDiskCache, GptbpeDiskCacheOptions},
    errors::{BpeError, BpeResult},
    tokenizer::{EncodeResult, Tokenizer, TokenizerOptions},
    vocab::Gpt3Assets,
};

static SHARED_TOKENIZER: OnceLock<BpeResult<Arc<Tokenizer<u32>>>> = OnceLock::new();

/// Load a GPT-3 tokenizer through a disk cache.
///
/// ## Arguments
/// * `cache_options` - disk cache location overrides.
/// * `options` - tokenizer options.
pub fn load_gpt3_tokenizer(
    cache_options: GptbpeDiskCacheOptions,
    options: TokenizerOptions,
) -> BpeResult<Tokenizer<u32>> {
    let mut disk_cache = GptbpeDiskCache::new(cache_options)
        .map_err(|e| BpeError::AssetInitialization(format!("{e:#}")))?;

    let assets = Gpt3Assets::load(&mut disk_cache)?;
    options.build(assets)
}

/// Get the tokenizer held by `cell`, running `load` if it is empty.
///
/// Only the first caller loads; its result, success or failure, is
/// what every caller sees.
fn get_or_load<F>(
    cell: &OnceLock<BpeResult<Arc<Tokenizer<u32>>>>,
    load: F,
) -> BpeResult<Arc<Tokenizer<u32>>>
where
    F: FnOnce() -> BpeResult<Tokenizer<u32>>,
{
    cell.get_or_init(|| {
        let result = load().map(Arc::new);
        if let Err(err) = &result {
            log::error!("shared gpt3 tokenizer failed to load: {err}");
        }
        result
    })
    .clone()
}

/// The shared tokenizer.
///
/// ## Returns
/// The tokenizer; or the error from its one load attempt.
pub fn try_shared_tokenizer() -> BpeResult<Arc<Tokenizer<u32>>> {
    get_or_load(&SHARED_TOKENIZER, || {
        log::info!("initializing shared gpt3 tokenizer");
        load_gpt3_tokenizer(Default::default(), Default::default())
    })
}

/// The shared tokenizer.
///
/// ## Panics
/// Panics if the tokenizer failed to load.
pub fn shared_tokenizer() -> Arc<Tokenizer<u32>> {
    try_shared_tokenizer().unwrap()
}

/// Count the tokens in text with the shared tokenizer.
pub fn try_count(text: &str) -> BpeResult<usize> {
    try_shared_tokenizer()?.try_count(text)
}

/// Count the tokens in text with the shared tokenizer.
///
/// ## Panics
/// Panics if the tokenizer failed to load.
pub fn count(text: &str) -> usize {
    try_count(text).unwrap()
}

/// Encode text with the shared tokenizer.
pub fn try_encode(text: &str) -> BpeResult<EncodeResult<u32>> {
    try_shared_tokenizer()?.try_encode(text)
}

/// Encode text with the shared tokenizer.
///
/// ## Panics
/// Panics if the tokenizer failed to load.
pub fn encode(text: &str) -> EncodeResult<u32> {
    try_encode(text).unwrap()
}

/// Decode token ids with the shared tokenizer.
///
/// ## Returns
/// The text; or [`BpeError::UnknownId`], or the load error.
pub fn try_decode(ids: &[u32]) -> BpeResult<String> {
    try_shared_tokenizer()?.try_decode(ids)
}

/// Decode token ids with the shared tokenizer.
///
/// ## Panics
/// Panics if the tokenizer failed to load, or on an unknown id.
pub fn decode(ids: &[u32]) -> String {
    try_decode(ids).unwrap()
}
