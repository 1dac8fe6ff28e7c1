/// Token ids and their subword texts, index-aligned.
///
/// With the ``serde`` feature this serializes as
/// `{"bpe": [...], "text": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodeResult<T> {
    /// Token ids.
    #[cfg_attr(feature = "serde", serde(rename = "bpe"))]
    pub ids: Vec<T>,

    /// The text of each token.
    ///
    /// A token holding part of a multibyte character reads as U+FFFD.
    #[cfg_attr(feature = "serde", serde(rename = "text"))]
    pub subwords: Vec<String>,
}

impl<T> EncodeResult<T> {
    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Is this empty?
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over `(id, subword)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &str)> + '_ {
        self.ids
            .iter()
            .zip(self.subwords.iter().map(String::as_str))
    }

    /// Split into `(ids, subwords)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<String>) {
        (self.ids, self.subwords)
    }
}
