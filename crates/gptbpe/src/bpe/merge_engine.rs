//! # BPE Merge Engine

use core::fmt::Debug;
use std::sync::Arc;

use crate::{
    codec::ByteUnicodeTable,
    errors::{BpeError, BpeResult},
    types::{BpeHashMap, Pair, TokenType, hash_map_with_capacity},
    vocab::{MergeRanks, VocabTable},
};

/// A ``(T, T) -> (rank, T)`` pair-merge engine.
///
/// Built from string-keyed [`MergeRanks`] and a [`VocabTable`]; the merge loop
/// runs entirely on token ids.
///
/// Construction checks that the byte symbols, every merge operand, and every
/// merge result are in the vocabulary; so every id the engine emits has a
/// subword.
#[derive(Clone)]
pub struct MergeEngine<T: TokenType> {
    vocab: Arc<VocabTable<T>>,

    /// Single-byte token for each byte ordinal.
    byte_tokens: [T; 256],

    pair_merges: BpeHashMap<Pair<T>, (u32, T)>,
}

impl<T: TokenType> Debug for MergeEngine<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("MergeEngine")
            .field("vocab", &self.vocab)
            .field("merges", &self.pair_merges.len())
            .finish()
    }
}

impl<T: TokenType> MergeEngine<T> {
    /// Compile an engine.
    ///
    /// ## Returns
    /// The engine; or [`BpeError::AssetInitialization`] if the tables are
    /// inconsistent.
    pub fn new(
        vocab: Arc<VocabTable<T>>,
        merges: &MergeRanks,
    ) -> BpeResult<Self> {
        let table = ByteUnicodeTable::shared();

        for (subword, _) in vocab.iter() {
            table
                .decode_symbols(subword)
                .map_err(BpeError::into_asset_error)?;
        }

        let mut byte_tokens = [T::zero(); 256];
        for byte in 0..=255_u8 {
            let symbol = table.byte_to_symbol(byte).to_string();
            byte_tokens[byte as usize] = vocab.get_id(&symbol).ok_or_else(|| {
                BpeError::AssetInitialization(format!(
                    "vocab is missing the symbol {symbol:?} for byte 0x{byte:02x}"
                ))
            })?;
        }

        let lookup = |subword: &str| {
            vocab.get_id(subword).ok_or_else(|| {
                BpeError::AssetInitialization(format!(
                    "merge subword {subword:?} is not in the vocab"
                ))
            })
        };

        let mut pair_merges: BpeHashMap<Pair<T>, (u32, T)> = hash_map_with_capacity(merges.len());
        let mut merged = String::new();
        for (left, right, rank) in merges.iter() {
            merged.clear();
            merged.push_str(left);
            merged.push_str(right);

            let pair = (lookup(left)?, lookup(right)?);
            let token = lookup(&merged)?;

            pair_merges.insert(pair, (rank, token));
        }

        log::debug!(
            "compiled merge engine: {} vocab entries, {} merges",
            vocab.len(),
            pair_merges.len()
        );

        Ok(Self {
            vocab,
            byte_tokens,
            pair_merges,
        })
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Arc<VocabTable<T>> {
        &self.vocab
    }

    /// The single-byte token for a byte.
    #[inline(always)]
    pub fn byte_token(
        &self,
        byte: u8,
    ) -> T {
        self.byte_tokens[byte as usize]
    }

    /// Look up the merge for a token pair.
    ///
    /// ## Returns
    /// `(rank, merged token)`, if the pair merges.
    #[inline(always)]
    pub fn lookup_pair(
        &self,
        pair: &Pair<T>,
    ) -> Option<(u32, T)> {
        self.pair_merges.get(pair).copied()
    }

    /// Look up the merge rank of a subword pair.
    pub fn pair_rank(
        &self,
        left: &str,
        right: &str,
    ) -> Option<u32> {
        let pair = (self.vocab.get_id(left)?, self.vocab.get_id(right)?);
        self.lookup_pair(&pair).map(|(rank, _)| rank)
    }

    /// Merge the bytes of one chunk, appending the result tokens.
    ///
    /// Each round takes the lowest-ranked adjacent pair present, and merges
    /// every non-overlapping occurrence of it, left to right; until no pair
    /// merges, or one token remains.
    ///
    /// ## Arguments
    /// * `chunk` - the chunk bytes.
    /// * `tokens` - the target buffer; existing contents are untouched.
    pub fn encode_append(
        &self,
        chunk: &[u8],
        tokens: &mut Vec<T>,
    ) {
        // The output buffer is the working memory: ``tokens[start..]``.
        let start = tokens.len();
        tokens.extend(chunk.iter().map(|&b| self.byte_token(b)));

        while tokens.len() - start >= 2 {
            let Some((_, left, right, merged)) = tokens[start..]
                .windows(2)
                .filter_map(|w| {
                    self.lookup_pair(&(w[0], w[1]))
                        .map(|(rank, merged)| (rank, w[0], w[1], merged))
                })
                .min_by_key(|&(rank, ..)| rank)
            else {
                break;
            };

            // In-place compaction; `write` never passes `read`.
            let end = tokens.len();
            let mut read = start;
            let mut write = start;
            while read < end {
                if read + 1 < end && tokens[read] == left && tokens[read + 1] == right {
                    tokens[write] = merged;
                    read += 2;
                } else {
                    tokens[write] = tokens[read];
                    read += 1;
                }
                write += 1;
            }
            tokens.truncate(write);
        }
    }

    /// Merge the bytes of one chunk.
    pub fn bpe_tokens(
        &self,
        chunk: &[u8],
    ) -> Vec<T> {
        let mut tokens = Vec::with_capacity(chunk.len());
        self.encode_append(chunk, &mut tokens);
        tokens
    }

    /// Merge one chunk, returning the subword strings.
    pub fn bpe(
        &self,
        chunk: &str,
    ) -> BpeResult<Vec<String>> {
        self.bpe_tokens(chunk.as_bytes())
            .into_iter()
            .map(|t| self.vocab.subword_of(t).map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_assets;

    fn fixture_engine() -> MergeEngine<u32> {
        let (vocab, merges) = fixture_assets::<u32>().into_parts();
        MergeEngine::new(Arc::new(vocab), &merges).unwrap()
    }

    /// A vocab of the 256 byte symbols at their GPT-2 ids, plus `extra`.
    fn byte_vocab(extra: &[(&str, u32)]) -> VocabTable<u32> {
        let table = ByteUnicodeTable::shared();
        let entries = table
            .rank_order()
            .iter()
            .zip(0_u32..)
            .map(|(&b, id)| (table.byte_to_symbol(b).to_string(), id))
            .chain(extra.iter().map(|&(s, id)| (s.to_string(), id)));
        VocabTable::from_entries(entries).unwrap()
    }

    #[test]
    fn test_byte_tokens() {
        let engine = fixture_engine();
        assert_eq!(engine.byte_token(b'!'), 0);
        assert_eq!(engine.byte_token(b' '), 220);
        assert_eq!(engine.byte_token(0x00), 188);
        assert_eq!(engine.byte_token(0xA0), 254);
        assert_eq!(engine.byte_token(0xAD), 255);
    }

    #[test]
    fn test_bpe() {
        let engine = fixture_engine();

        assert_eq!(engine.bpe("Hello").unwrap(), vec!["Hello"]);
        assert_eq!(engine.bpe(" World").unwrap(), vec!["\u{120}World"]);
        assert_eq!(engine.bpe_tokens(b"Hello"), vec![15496]);
        assert_eq!(engine.bpe_tokens(" World".as_bytes()), vec![2159]);

        assert_eq!(engine.pair_rank("H", "e"), Some(0));
        assert_eq!(engine.pair_rank("e", "H"), None);
        assert_eq!(engine.pair_rank("zz", "H"), None);

        assert!(engine.bpe("").unwrap().is_empty());
        assert_eq!(engine.bpe("x").unwrap(), vec!["x"]);
    }

    #[test]
    fn test_multibyte_chunks() {
        let engine = fixture_engine();

        assert_eq!(
            engine.bpe_tokens("\u{4f60}\u{597d}".as_bytes()),
            vec![19526, 254, 25001, 121]
        );
        // No merge applies to this chunk.
        assert_eq!(engine.bpe_tokens("\u{ff0c}".as_bytes()), vec![171, 120, 234]);
    }

    #[test]
    fn test_appends() {
        let engine = fixture_engine();
        let mut tokens = vec![7_u32];
        engine.encode_append(b"Hello", &mut tokens);
        engine.encode_append(b"ab", &mut tokens);
        assert_eq!(tokens, vec![7, 15496, 64, 65]);
    }

    #[test]
    fn test_merges_all_occurrences() {
        // "a" = 64.
        let vocab = byte_vocab(&[("aa", 300)]);
        let merges = MergeRanks::from_pairs([("a", "a")]).unwrap();
        let engine = MergeEngine::new(Arc::new(vocab), &merges).unwrap();

        // Left to right, non-overlapping.
        assert_eq!(engine.bpe("aaa").unwrap(), vec!["aa", "a"]);
        assert_eq!(engine.bpe_tokens(b"aaa"), vec![300, 64]);
        assert_eq!(engine.bpe("aaaa").unwrap(), vec!["aa", "aa"]);
    }

    #[test]
    fn test_lowest_rank_first() {
        let vocab = byte_vocab(&[("ab", 300), ("bc", 301)]);
        let merges = MergeRanks::from_pairs([("b", "c"), ("a", "b")]).unwrap();
        let engine = MergeEngine::new(Arc::new(vocab), &merges).unwrap();

        assert_eq!(engine.bpe("abc").unwrap(), vec!["a", "bc"]);
    }

    #[test]
    fn test_inconsistent_assets() {
        // Missing merge result.
        let vocab = byte_vocab(&[]);
        let merges = MergeRanks::from_pairs([("a", "b")]).unwrap();
        assert!(matches!(
            MergeEngine::new(Arc::new(vocab), &merges),
            Err(BpeError::AssetInitialization(_))
        ));

        // Missing merge operand.
        let vocab = byte_vocab(&[("abc", 300)]);
        let merges = MergeRanks::from_pairs([("ab", "c")]).unwrap();
        assert!(matches!(
            MergeEngine::new(Arc::new(vocab), &merges),
            Err(BpeError::AssetInitialization(_))
        ));

        // Missing byte symbol.
        let vocab = VocabTable::from_entries([("a", 64_u32)]).unwrap();
        let merges = MergeRanks::from_pairs(Vec::<(String, String)>::new()).unwrap();
        assert!(matches!(
            MergeEngine::new(Arc::new(vocab), &merges),
            Err(BpeError::AssetInitialization(_))
        ));

        // A subword which is not a byte symbol string.
        let vocab = byte_vocab(&[("a b", 300)]);
        let merges = MergeRanks::from_pairs(Vec::<(String, String)>::new()).unwrap();
        assert!(matches!(
            MergeEngine::new(Arc::new(vocab), &merges),
            Err(BpeError::AssetInitialization(_))
        ));
    }
}
