//! # `gptbpe` GPT-2 / GPT-3 Tokenizer
//!
//! A byte-level BPE tokenizer, producing the same token ids as the GPT-2 /
//! GPT-3 (`r50k`) tokenizer.
//!
//! See:
//! * [`tokenizer`] to count, encode, and decode.
//! * [`vocab`] to load the "encoder.json" / "vocab.bpe" assets.
//! * [`bpe`] for the merge engine and chunk cache.
//! * [`pretokenize`] for the text segmentation pattern.
//! * [`codec`] for the byte/unicode symbol table.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``download``
//! * ``rayon``
//!
//! #### feature: ``download``
//!
//! * ``gptbpe-disk-cache``
//!
//! The download feature enables fetching the public GPT-2 assets, and the
//! process-wide tokenizer in [`shared`].
//!
//! #### feature: ``ahash`` / ``foldhash``
//!
//! This swaps the HashMap implementation for ``ahash`` or ``foldhash``.
//!
//! This is done by the ``types::BpeHash{*}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! This enables parallel batch encode / decode.
//!
//! #### feature: ``serde``
//!
//! Derives ``serde`` traits on [`tokenizer::EncodeResult`].
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! #### feature: ``testing``
//!
//! Exposes the offline fixture vocabulary in ``testing``.
//!
//! ## Loading the Tokenizer
//!
//! ```rust,ignore
//! use gptbpe::disk_cache::GptbpeDiskCache;
//! use gptbpe::tokenizer::TokenizerOptions;
//! use gptbpe::vocab::Gpt3Assets;
//!
//! let mut disk_cache = GptbpeDiskCache::default();
//! let assets: Gpt3Assets<u32> = Gpt3Assets::load(&mut disk_cache)?;
//! let tokenizer = TokenizerOptions::default().build(assets)?;
//!
//! let result = tokenizer.encode("Hello World");
//! assert_eq!(result.ids, vec![15496, 2159]);
//! assert_eq!(tokenizer.decode(&result.ids), "Hello World");
//! ```
//!
//! Or, through the lazily loaded shared tokenizer:
//!
//! ```rust,ignore
//! assert_eq!(gptbpe::shared::count("Hello World"), 2);
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "download")]
#[doc(inline)]
pub use gptbpe_disk_cache as disk_cache;

pub mod bpe;
pub mod codec;
pub mod concurrency;
pub mod errors;
pub mod pretokenize;
pub mod tokenizer;
pub mod types;
pub mod vocab;

#[cfg(feature = "download")]
pub mod shared;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use errors::{BpeError, BpeResult};
#[doc(inline)]
pub use tokenizer::{EncodeResult, Tokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::TokenType;
