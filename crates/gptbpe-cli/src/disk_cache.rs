use gptbpe::{
    Tokenizer,
    TokenizerOptions,
    disk_cache::GptbpeDiskCacheOptions,
    shared::load_gpt3_tokenizer,
};

/// Disk cache argument group.
#[derive(clap::Args, Debug)]
pub struct DiskCacheArgs {
    /// Cache directory; downloaded assets are stored here.
    #[arg(long)]
    pub cache_dir: Option<String>,

    /// Data directory; pre-installed assets are read from here.
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Never download; fail if the assets are not already present.
    #[arg(long)]
    pub offline: bool,
}

impl DiskCacheArgs {
    /// The disk cache options selected by these args.
    pub fn options(&self) -> GptbpeDiskCacheOptions {
        GptbpeDiskCacheOptions::default()
            .with_cache_dir(self.cache_dir.as_ref())
            .with_data_dir(self.data_dir.as_ref())
            .with_offline(self.offline)
    }

    /// Load the GPT-3 tokenizer through the disk cache.
    pub fn load_tokenizer(&self) -> Result<Tokenizer<u32>, Box<dyn std::error::Error>> {
        Ok(load_gpt3_tokenizer(
            self.options(),
            TokenizerOptions::default(),
        )?)
    }
}
