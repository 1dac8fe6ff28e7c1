//! # Error Types

/// Errors from gptbpe operations.
///
/// This is `Clone` so that a captured startup failure can be handed,
/// unchanged, to every later caller of a shared tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BpeError {
    /// The vocabulary or merge assets are missing, malformed, or inconsistent.
    ///
    /// This is fatal; no tokenizer is built from such assets.
    #[error("asset initialization failed: {0}")]
    AssetInitialization(String),

    /// A token id which is not in the vocabulary.
    #[error("unknown token id: {id}")]
    UnknownId {
        /// The offending id.
        id: u64,
    },

    /// A subword which is not in the vocabulary.
    #[error("unknown subword: {0:?}")]
    UnknownSubword(String),

    /// A unicode scalar outside the byte/unicode table.
    #[error("invalid byte symbol: {0:?}")]
    InvalidSymbol(char),

    /// I/O error.
    ///
    /// Held as text, as [`std::io::Error`] is not `Clone`.
    #[error("io error: {0}")]
    Io(String),

    /// Parse error (json, integer, regex, etc.)
    #[error("parse error: {0}")]
    Parse(String),

    /// Error from an external component.
    #[error("{0}")]
    External(String),
}

impl From<std::io::Error> for BpeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl BpeError {
    /// Re-label an error raised while loading assets as [`BpeError::AssetInitialization`].
    pub fn into_asset_error(self) -> Self {
        match self {
            Self::AssetInitialization(_) => self,
            other => Self::AssetInitialization(other.to_string()),
        }
    }
}

/// Result type for gptbpe operations.
pub type BpeResult<T> = core::result::Result<T, BpeError>;
