//! # gptbpe
//!
//! Count, encode, and decode GPT-3 tokens from the command line.
//!
//! ```text
//! $ gptbpe count "Hello World"
//! 2
//! $ gptbpe encode "Hello World"
//! {"bpe":[15496,2159],"text":["Hello"," World"]}
//! $ gptbpe decode "[15496, 2159]"
//! Hello World
//! ```
mod commands;
mod disk_cache;
mod input;
mod logging;

use clap::Parser;
use commands::Commands;
use logging::LogArgs;

/// gptbpe tokenizer cli
#[derive(clap::Parser, Debug)]
#[command(name = "gptbpe")]
pub struct Args {
    #[command(flatten)]
    log: LogArgs,

    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.log.setup_logging(2)?;

    args.command.run()
}
