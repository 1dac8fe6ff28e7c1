//! # Subword/Id Vocabulary Table

use core::fmt::Debug;

use crate::{
    errors::{BpeError, BpeResult},
    types::{BpeHashMap, TokenType, hash_map_with_capacity, token_to_u64},
};

/// Bijection between subword strings and token ids.
///
/// Subwords are written in byte/unicode symbols, as in GPT-2's "encoder.json".
#[derive(Clone, PartialEq)]
pub struct VocabTable<T: TokenType> {
    subword_ids: BpeHashMap<String, T>,
    id_subwords: BpeHashMap<T, String>,
}

impl<T: TokenType> Debug for VocabTable<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("VocabTable")
            .field("len", &self.len())
            .field("max_id", &self.max_id())
            .finish()
    }
}

impl<T: TokenType> VocabTable<T> {
    /// Build a table from `(subword, id)` entries.
    ///
    /// ## Returns
    /// The table; or [`BpeError::AssetInitialization`] if a subword or
    /// an id appears more than once.
    pub fn from_entries<I, S>(entries: I) -> BpeResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let entries = entries.into_iter();
        let (lower, _) = entries.size_hint();
        let mut subword_ids: BpeHashMap<String, T> = hash_map_with_capacity(lower);
        let mut id_subwords: BpeHashMap<T, String> = hash_map_with_capacity(lower);

        for (subword, id) in entries {
            let subword = subword.into();
            if let Some(prev) = id_subwords.get(&id) {
                return Err(BpeError::AssetInitialization(format!(
                    "token id {id} is assigned to both {prev:?} and {subword:?}"
                )));
            }
            if subword_ids.contains_key(&subword) {
                return Err(BpeError::AssetInitialization(format!(
                    "subword {subword:?} is assigned more than one id"
                )));
            }
            subword_ids.insert(subword.clone(), id);
            id_subwords.insert(id, subword);
        }

        subword_ids.shrink_to_fit();
        id_subwords.shrink_to_fit();

        Ok(Self {
            subword_ids,
            id_subwords,
        })
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.subword_ids.len()
    }

    /// Is this empty?
    pub fn is_empty(&self) -> bool {
        self.subword_ids.is_empty()
    }

    /// The largest id, if any.
    pub fn max_id(&self) -> Option<T> {
        self.id_subwords.keys().copied().max()
    }

    /// Look up the id of a subword.
    pub fn get_id(
        &self,
        subword: &str,
    ) -> Option<T> {
        self.subword_ids.get(subword).copied()
    }

    /// Look up the id of a subword.
    ///
    /// ## Returns
    /// The id; or [`BpeError::UnknownSubword`].
    pub fn id_of(
        &self,
        subword: &str,
    ) -> BpeResult<T> {
        self.get_id(subword)
            .ok_or_else(|| BpeError::UnknownSubword(subword.to_string()))
    }

    /// Look up the subword for an id.
    pub fn get_subword(
        &self,
        id: T,
    ) -> Option<&str> {
        self.id_subwords.get(&id).map(String::as_str)
    }

    /// Look up the subword for an id.
    ///
    /// ## Returns
    /// The subword; or [`BpeError::UnknownId`].
    pub fn subword_of(
        &self,
        id: T,
    ) -> BpeResult<&str> {
        self.get_subword(id).ok_or(BpeError::UnknownId {
            id: token_to_u64(id),
        })
    }

    /// Iterate over `(subword, id)` entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.subword_ids.iter().map(|(s, &id)| (s.as_str(), id))
    }
}
