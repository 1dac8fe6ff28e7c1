//! # GPT-2 / GPT-3 Asset Bundle

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    errors::{BpeError, BpeResult},
    types::TokenType,
    vocab::{
        GPT2_ENCODER_JSON_RESOURCE,
        GPT2_VOCAB_BPE_RESOURCE,
        MergeRanks,
        ResourceLoader,
        VocabTable,
        io::{read_datagym_encoder_json, read_datagym_vocab_bpe},
    },
};

/// The loaded "encoder.json" and "vocab.bpe" pair.
///
/// Consistency between the two tables is checked when a
/// [`MergeEngine`](crate::bpe::MergeEngine) is built from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Gpt3Assets<T: TokenType> {
    vocab: VocabTable<T>,
    merges: MergeRanks,
}

impl<T: TokenType> Gpt3Assets<T> {
    /// Bundle already-loaded tables.
    pub fn new(
        vocab: VocabTable<T>,
        merges: MergeRanks,
    ) -> Self {
        Self { vocab, merges }
    }

    /// Read the assets from readers.
    ///
    /// ## Returns
    /// The assets; or [`BpeError::AssetInitialization`].
    pub fn from_readers<ER, VR>(
        encoder_json: ER,
        vocab_bpe: VR,
    ) -> BpeResult<Self>
    where
        ER: BufRead,
        VR: BufRead,
    {
        let vocab = read_datagym_encoder_json(encoder_json)?;
        let merges = read_datagym_vocab_bpe(vocab_bpe)?;

        log::info!(
            "loaded gpt2 assets: {} vocab entries, {} merges",
            vocab.len(),
            merges.len()
        );

        Ok(Self::new(vocab, merges))
    }

    /// Read the assets from local files.
    ///
    /// ## Returns
    /// The assets; or [`BpeError::AssetInitialization`], including when
    /// either file cannot be opened.
    pub fn from_paths<EP, VP>(
        encoder_json_path: EP,
        vocab_bpe_path: VP,
    ) -> BpeResult<Self>
    where
        EP: AsRef<Path>,
        VP: AsRef<Path>,
    {
        let open = |path: &Path| {
            log::debug!("reading {}", path.display());
            File::open(path).map(BufReader::new).map_err(|e| {
                BpeError::AssetInitialization(format!("{}: {e}", path.display()))
            })
        };

        Self::from_readers(
            open(encoder_json_path.as_ref())?,
            open(vocab_bpe_path.as_ref())?,
        )
    }

    /// Resolve the public GPT-2 assets through a loader, then read them.
    pub fn load(loader: &mut dyn ResourceLoader) -> BpeResult<Self> {
        let encoder_json_path = loader
            .load_resource_path(&GPT2_ENCODER_JSON_RESOURCE)
            .map_err(BpeError::into_asset_error)?;
        let vocab_bpe_path = loader
            .load_resource_path(&GPT2_VOCAB_BPE_RESOURCE)
            .map_err(BpeError::into_asset_error)?;

        Self::from_paths(encoder_json_path, vocab_bpe_path)
    }

    /// The subword/id table.
    pub fn vocab(&self) -> &VocabTable<T> {
        &self.vocab
    }

    /// The merge rank table.
    pub fn merges(&self) -> &MergeRanks {
        &self.merges
    }

    /// Split into `(vocab, merges)`.
    pub fn into_parts(self) -> (VocabTable<T>, MergeRanks) {
        (self.vocab, self.merges)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Cursor, Write},
        path::PathBuf,
    };

    use tempdir::TempDir;

    use super::*;
    use crate::vocab::ConstKeyedResource;

    const ENCODER_JSON: &str = r#"{"a": 64, "b": 65, "ab": 300}"#;
    const VOCAB_BPE: &str = "#version: 0.2\na b\n";

    fn write_assets(dir: &Path) -> (PathBuf, PathBuf) {
        let encoder_path = dir.join("encoder.json");
        let vocab_path = dir.join("vocab.bpe");
        File::create(&encoder_path)
            .unwrap()
            .write_all(ENCODER_JSON.as_bytes())
            .unwrap();
        File::create(&vocab_path)
            .unwrap()
            .write_all(VOCAB_BPE.as_bytes())
            .unwrap();
        (encoder_path, vocab_path)
    }

    /// Serves files from a directory, by file name.
    struct DirLoader(PathBuf);

    impl ResourceLoader for DirLoader {
        fn load_resource_path(
            &mut self,
            resource: &ConstKeyedResource,
        ) -> BpeResult<PathBuf> {
            let name = resource.resource.urls[0].rsplit('/').next().unwrap();
            let path = self.0.join(name);
            if path.exists() {
                Ok(path)
            } else {
                Err(BpeError::External(format!("missing {name}")))
            }
        }
    }

    #[test]
    fn test_from_readers() {
        let assets: Gpt3Assets<u32> =
            Gpt3Assets::from_readers(Cursor::new(ENCODER_JSON), Cursor::new(VOCAB_BPE)).unwrap();
        assert_eq!(assets.vocab().len(), 3);
        assert_eq!(assets.merges().len(), 1);

        let (vocab, merges) = assets.into_parts();
        assert_eq!(vocab.id_of("ab"), Ok(300));
        assert_eq!(merges.rank("a", "b"), Some(0));
    }

    #[test]
    fn test_from_paths() {
        let dir = TempDir::new("gptbpe_assets").unwrap();
        let (encoder_path, vocab_path) = write_assets(dir.path());

        let assets: Gpt3Assets<u32> = Gpt3Assets::from_paths(&encoder_path, &vocab_path).unwrap();
        assert_eq!(assets.vocab().id_of("a"), Ok(64));
    }

    #[test]
    fn test_missing_path() {
        let dir = TempDir::new("gptbpe_assets").unwrap();
        let err = Gpt3Assets::<u32>::from_paths(
            dir.path().join("nope.json"),
            dir.path().join("nope.bpe"),
        )
        .unwrap_err();
        assert!(matches!(err, BpeError::AssetInitialization(_)));
    }

    #[test]
    fn test_load() {
        let dir = TempDir::new("gptbpe_assets").unwrap();
        write_assets(dir.path());

        let mut loader = DirLoader(dir.path().to_path_buf());
        let assets: Gpt3Assets<u32> = Gpt3Assets::load(&mut loader).unwrap();
        assert_eq!(assets.vocab().len(), 3);

        let mut loader = DirLoader(dir.path().join("empty"));
        assert_eq!(
            Gpt3Assets::<u32>::load(&mut loader).unwrap_err(),
            BpeError::AssetInitialization("missing encoder.json".to_string())
        );
    }
}
