use crate::{disk_cache::DiskCacheArgs, input::TextArgs};

/// Args for the count command.
#[derive(clap::Args, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    text: TextArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,
}

impl CountArgs {
    /// Run the count command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let text = self.text.read_text()?;
        let tokenizer = self.disk_cache.load_tokenizer()?;

        println!("{}", tokenizer.try_count(&text)?);
        Ok(())
    }
}
