//! # gptbpe Disk Cache

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use downloader::{Download, Downloader};

use crate::{GPTBPE_CACHE_CONFIG, path_resolver::extend_path};

/// Options for [`GptbpeDiskCache`].
#[derive(Clone, Default, Debug)]
pub struct GptbpeDiskCacheOptions {
    /// Optional path to the cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Optional path to the data directory.
    pub data_dir: Option<PathBuf>,

    /// Disable downloads; only already present files resolve.
    pub offline: bool,

    /// Optional [`Downloader`] builder.
    pub downloader: Option<fn() -> anyhow::Result<Downloader>>,
}

impl GptbpeDiskCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(
        mut self,
        data_dir: Option<P>,
    ) -> Self {
        self.data_dir = data_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Disable downloads.
    pub fn with_offline(
        mut self,
        offline: bool,
    ) -> Self {
        self.offline = offline;
        self
    }

    /// Set the downloader builder.
    pub fn with_downloader(
        mut self,
        downloader: Option<fn() -> anyhow::Result<Downloader>>,
    ) -> Self {
        self.downloader = downloader;
        self
    }
}

/// Disk cache for the tokenizer asset files.
///
/// Leverages [`Downloader`] for downloading files,
/// and [`PathResolver`](crate::path_resolver::PathResolver) for resolving
/// cache and data paths, and any environment overrides.
pub struct GptbpeDiskCache {
    cache_dir: PathBuf,
    data_dir: PathBuf,
    offline: bool,

    /// Built on the first download.
    downloader: Option<Downloader>,
    downloader_builder: Option<fn() -> anyhow::Result<Downloader>>,
}

impl Default for GptbpeDiskCache {
    /// ## Panics
    /// Panics if no cache or data directory can be resolved.
    fn default() -> Self {
        Self::new(GptbpeDiskCacheOptions::default()).unwrap()
    }
}

impl GptbpeDiskCache {
    /// Construct a new [`GptbpeDiskCache`].
    pub fn new(options: GptbpeDiskCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = GPTBPE_CACHE_CONFIG
            .resolve_cache_dir(options.cache_dir)
            .context("failed to resolve cache directory")?;

        let data_dir = GPTBPE_CACHE_CONFIG
            .resolve_data_dir(options.data_dir)
            .context("failed to resolve data directory")?;

        log::debug!(
            "disk cache: cache_dir={}, data_dir={}",
            cache_dir.display(),
            data_dir.display()
        );

        Ok(Self {
            cache_dir,
            data_dir,
            offline: options.offline,
            downloader: None,
            downloader_builder: options.downloader,
        })
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Are downloads disabled?
    pub fn offline(&self) -> bool {
        self.offline
    }

    /// Get the cache path for a key and file name.
    ///
    /// Does not check that the path exists.
    pub fn cache_path<K, F>(
        &self,
        key: &[K],
        file: F,
    ) -> PathBuf
    where
        K: AsRef<Path>,
        F: AsRef<Path>,
    {
        extend_path(&self.cache_dir, key, file)
    }

    /// Get the data path for a key and file name.
    ///
    /// Does not check that the path exists.
    pub fn data_path<K, F>(
        &self,
        key: &[K],
        file: F,
    ) -> PathBuf
    where
        K: AsRef<Path>,
        F: AsRef<Path>,
    {
        extend_path(&self.data_dir, key, file)
    }

    fn downloader(&mut self) -> anyhow::Result<&mut Downloader> {
        if self.downloader.is_none() {
            let downloader = match self.downloader_builder {
                Some(builder) => builder()?,
                None => Downloader::builder().build()?,
            };
            self.downloader = Some(downloader);
        }
        self.downloader
            .as_mut()
            .context("downloader was not initialized")
    }

    /// Resolve a file, downloading it into the cache if needed.
    ///
    /// The file name is taken from the first URL.
    ///
    /// ## Arguments
    /// * `key` - path prefix dirs for the file.
    /// * `urls` - mirror URLs for the file.
    /// * `download` - permit a download, if the file is not present.
    ///
    /// ## Returns
    /// The data path, if the file is there; else the cache path, downloading
    /// the file if permitted.
    ///
    /// ## Errors
    /// * The file is not present, and downloads are not permitted.
    /// * The download fails.
    pub fn load_cached_path<K, S>(
        &mut self,
        key: &[K],
        urls: &[S],
        download: bool,
    ) -> anyhow::Result<PathBuf>
    where
        K: AsRef<Path>,
        S: AsRef<str>,
    {
        let urls: Vec<&str> = urls.iter().map(|s| s.as_ref()).collect();
        let file_name = urls
            .first()
            .and_then(|url| url.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .context("no file name in resource urls")?
            .to_string();

        let data_path = self.data_path(key, &file_name);
        if data_path.exists() {
            return Ok(data_path);
        }

        let path = self.cache_path(key, &file_name);
        if path.exists() {
            return Ok(path);
        }

        if !download || self.offline {
            anyhow::bail!("cached file not found: {}", path.display());
        }

        let parent = path
            .parent()
            .with_context(|| format!("no parent dir: {}", path.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        // Download beside the target, then rename; a failed download leaves
        // no partial file at `path`.
        let partial = path.with_extension("part");
        let mut dl = Download::new_mirrored(&urls);
        dl.file_name = partial.clone();

        log::info!("downloading {} to {}", urls[0], path.display());
        let results = self.downloader()?.download(&[dl])?;
        for result in results {
            if let Err(err) = result {
                let _ = fs::remove_file(&partial);
                anyhow::bail!("download of {} failed: {err}", urls[0]);
            }
        }

        fs::rename(&partial, &path)
            .with_context(|| format!("failed to move download to {}", path.display()))?;

        Ok(path)
    }
}
