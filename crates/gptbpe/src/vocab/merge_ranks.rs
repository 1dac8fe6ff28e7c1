//! # Merge Rank Table

use core::fmt::Debug;

use crate::{
    errors::{BpeError, BpeResult},
    types::{BpeHashMap, hash_map_with_capacity},
};

/// Ordered subword pairs; a pair's rank is its position.
///
/// Lower ranks merge earlier.
#[derive(Clone, PartialEq)]
pub struct MergeRanks {
    /// Pairs in rank order.
    pairs: Vec<(String, String)>,

    ranks: BpeHashMap<(String, String), u32>,
}

impl Debug for MergeRanks {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("MergeRanks")
            .field("len", &self.len())
            .finish()
    }
}

impl MergeRanks {
    /// Build from pairs in rank order.
    ///
    /// ## Returns
    /// The table; or [`BpeError::AssetInitialization`] on a repeated pair.
    pub fn from_pairs<I, L, R>(pairs: I) -> BpeResult<Self>
    where
        I: IntoIterator<Item = (L, R)>,
        L: Into<String>,
        R: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(l, r)| (l.into(), r.into()))
            .collect();

        let mut ranks = hash_map_with_capacity(pairs.len());
        for (rank, pair) in pairs.iter().enumerate() {
            let rank = u32::try_from(rank).map_err(|_| {
                BpeError::AssetInitialization("too many merges for u32 ranks".to_string())
            })?;
            if ranks.insert(pair.clone(), rank).is_some() {
                return Err(BpeError::AssetInitialization(format!(
                    "merge pair {:?} {:?} is listed more than once",
                    pair.0, pair.1
                )));
            }
        }

        Ok(Self { pairs, ranks })
    }

    /// The number of merges.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Is this empty?
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the rank of a pair.
    ///
    /// This allocates a key; the merge loop uses the id-keyed table built by
    /// [`MergeEngine`](crate::bpe::MergeEngine) instead.
    pub fn rank(
        &self,
        left: &str,
        right: &str,
    ) -> Option<u32> {
        self.ranks
            .get(&(left.to_string(), right.to_string()))
            .copied()
    }

    /// Iterate over `(left, right, rank)` in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u32)> + '_ {
        self.pairs
            .iter()
            .zip(0_u32..)
            .map(|((l, r), rank)| (l.as_str(), r.as_str(), rank))
    }
}
