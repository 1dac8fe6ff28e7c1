use crate::{disk_cache::DiskCacheArgs, input::TextArgs};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    text: TextArgs,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let text = self.text.read_text()?;
        let tokenizer = self.disk_cache.load_tokenizer()?;

        let result = tokenizer.try_encode(&text)?;
        let json = if self.pretty {
            serde_json::to_string_pretty(&result)?
        } else {
            serde_json::to_string(&result)?
        };
        println!("{json}");
        Ok(())
    }
}
