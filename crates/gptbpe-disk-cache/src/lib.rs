//! # gptbpe-disk-cache
//!
//! Locates, and on demand downloads, the tokenizer asset files.
//!
//! Files are looked up by a key path (for example `["openai", "gpt2"]`) and
//! the file name of their URL:
//! 1. `<data_dir>/<key..>/<file>` - pre-installed assets; never downloaded.
//! 2. `<cache_dir>/<key..>/<file>` - downloaded on first use.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod disk_cache;
pub mod path_resolver;

pub use disk_cache::{GptbpeDiskCache, GptbpeDiskCacheOptions};

/// Environment variable key to override the default cache directory.
pub const GPTBPE_CACHE_DIR: &str = "GPTBPE_CACHE_DIR";
/// Environment variable key to override the default data directory.
pub const GPTBPE_DATA_DIR: &str = "GPTBPE_DATA_DIR";

/// Default [`PathResolver`] for gptbpe.
pub const GPTBPE_CACHE_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.gptbpe",
    organization: "",
    application: "gptbpe",
    cache_env_vars: &[GPTBPE_CACHE_DIR],
    data_env_vars: &[GPTBPE_DATA_DIR],
};
