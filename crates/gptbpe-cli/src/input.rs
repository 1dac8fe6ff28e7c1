use std::{
    fs::File,
    io::{BufReader, Read},
};

/// Text input argument group.
#[derive(clap::Args, Debug)]
pub struct TextArgs {
    /// Text to process; if absent, read from `--input`.
    pub text: Option<String>,

    /// Input file, read whole; "-" or absent means stdin.
    #[clap(long, conflicts_with = "text")]
    pub input: Option<String>,
}

impl TextArgs {
    /// Read the selected text.
    pub fn read_text(&self) -> Result<String, Box<dyn std::error::Error>> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        let mut buf = String::new();
        match self.input.as_deref() {
            None | Some("-") => {
                std::io::stdin().lock().read_to_string(&mut buf)?;
            }
            Some(path) => {
                BufReader::new(File::open(path)?).read_to_string(&mut buf)?;
            }
        }
        Ok(buf)
    }
}
