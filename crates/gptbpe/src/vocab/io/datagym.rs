//! # `DataGym` Asset Readers
//!
//! GPT-2 was published as a pair of "`DataGym`" files:
//! * "encoder.json" - a json object from subword symbol string to token id.
//! * "vocab.bpe" - a `#version` header line, then one `left right` merge
//!   pair per line, in rank order.
//!
//! Subwords in both files are written with the
//! [`ByteUnicodeTable`](crate::codec::ByteUnicodeTable) symbols.

use std::io::BufRead;

use serde_json::Value;

use crate::{
    codec::ByteUnicodeTable,
    errors::{BpeError, BpeResult},
    types::TokenType,
    vocab::{MergeRanks, VocabTable},
};

/// Read a `DataGym` "encoder.json" file.
///
/// ## Returns
/// The table; or [`BpeError::AssetInitialization`] if the file is not a json
/// object of symbol strings to non-negative ids representable as `T`.
pub fn read_datagym_encoder_json<T, R>(reader: R) -> BpeResult<VocabTable<T>>
where
    T: TokenType,
    R: BufRead,
{
    let table = ByteUnicodeTable::shared();

    let value: Value = serde_json::from_reader(reader).map_err(|e| {
        BpeError::AssetInitialization(format!("encoder json is not valid json: {e}"))
    })?;

    let Value::Object(map) = value else {
        return Err(BpeError::AssetInitialization(
            "encoder json is not an object".to_string(),
        ));
    };

    let mut entries: Vec<(String, T)> = Vec::with_capacity(map.len());
    for (subword, id) in map {
        for symbol in subword.chars() {
            table
                .symbol_to_byte(symbol)
                .map_err(BpeError::into_asset_error)?;
        }

        let id = id
            .as_u64()
            .and_then(T::from_u64)
            .ok_or_else(|| {
                BpeError::AssetInitialization(format!(
                    "encoder json id for {subword:?} is not a valid token id: {id}"
                ))
            })?;

        entries.push((subword, id));
    }

    VocabTable::from_entries(entries)
}

/// Read a `DataGym` "vocab.bpe" file.
///
/// A leading `#version` line and blank lines are skipped.
///
/// ## Returns
/// The table; or [`BpeError::AssetInitialization`] on a malformed line.
pub fn read_datagym_vocab_bpe<R>(reader: R) -> BpeResult<MergeRanks>
where
    R: BufRead,
{
    let mut pairs: Vec<(String, String)> = vec![];

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| BpeError::from(e).into_asset_error())?;

        if idx == 0 && line.starts_with("#version") {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        match line.split_once(' ') {
            Some((left, right)) if !left.is_empty() && !right.is_empty() && !right.contains(' ') => {
                pairs.push((left.to_string(), right.to_string()))
            }
            _ => {
                return Err(BpeError::AssetInitialization(format!(
                    "vocab.bpe line {} is not a merge pair: {line:?}",
                    idx + 1
                )));
            }
        }
    }

    MergeRanks::from_pairs(pairs)
}
