use crate::{disk_cache::DiskCacheArgs, input::TextArgs};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    tokens: TextArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,
}

/// Parse a JSON array of token ids.
pub fn parse_token_ids(json: &str) -> Result<Vec<u32>, serde_json::Error> {
    serde_json::from_str(json.trim())
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let ids = parse_token_ids(&self.tokens.read_text()?)?;
        let tokenizer = self.disk_cache.load_tokenizer()?;

        println!("{}", tokenizer.try_decode(&ids)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_ids() {
        assert_eq!(parse_token_ids("[15496, 2159]").unwrap(), vec![15496, 2159]);
        assert_eq!(parse_token_ids(" [] \n").unwrap(), Vec::<u32>::new());

        assert!(parse_token_ids("15496 2159").is_err());
        assert!(parse_token_ids("[-1]").is_err());
        assert!(parse_token_ids("[\"a\"]").is_err());
    }
}
