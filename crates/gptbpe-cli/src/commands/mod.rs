use crate::commands::{count::CountArgs, decode::DecodeArgs, encode::EncodeArgs};

pub mod count;
pub mod decode;
pub mod encode;

/// Subcommands for gptbpe.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the number of tokens in the text.
    Count(CountArgs),

    /// Print the tokens of the text, as `{"bpe": [..], "text": [..]}` JSON.
    Encode(EncodeArgs),

    /// Print the text of a JSON array of token ids.
    Decode(DecodeArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Count(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
        }
    }
}
