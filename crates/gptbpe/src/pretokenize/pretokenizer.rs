//! # Pretokenizer
//!
//! Splits text into chunks; each chunk is merged independently.

use core::ops::Range;
use std::num::NonZeroUsize;

use crate::{
    concurrency::ThreadHashedPool,
    errors::BpeResult,
    pretokenize::{
        GPT2_SPLIT_PATTERN,
        segment_regex::{RegexPattern, SegmentRegex},
    },
};

/// Regex-driven text segmentation.
///
/// Compiled regex carry internal scratch buffers which contend under
/// concurrent use; the pretokenizer holds a [`ThreadHashedPool`] of clones.
#[derive(Debug, Clone)]
pub struct Pretokenizer {
    regex_pool: ThreadHashedPool<SegmentRegex>,
    trailing_space_split: bool,
}

impl Pretokenizer {
    /// Build a pretokenizer for a pattern.
    ///
    /// ## Arguments
    /// * `pattern` - the segmentation pattern.
    /// * `max_pool` - override the number of regex clones, see
    ///   [`resolve_pool_size`](crate::concurrency::threads::resolve_pool_size).
    pub fn new<P>(
        pattern: P,
        max_pool: Option<NonZeroUsize>,
    ) -> BpeResult<Self>
    where
        P: Into<RegexPattern>,
    {
        let regex = pattern.into().compile()?;
        Ok(Self {
            regex_pool: ThreadHashedPool::new(regex, max_pool),
            trailing_space_split: false,
        })
    }

    /// Build the GPT-2 pretokenizer.
    ///
    /// Runs [`GPT2_SPLIT_PATTERN`] with the trailing space split; this
    /// segments as [`GPT2_PATTERN`](crate::pretokenize::GPT2_PATTERN) does,
    /// in linear time and without a backtrack limit.
    pub fn gpt2(max_pool: Option<NonZeroUsize>) -> BpeResult<Self> {
        Ok(Self::new(GPT2_SPLIT_PATTERN, max_pool)?.with_trailing_space_split(true))
    }

    /// Set the trailing space split.
    ///
    /// When set, an all-whitespace match of two or more characters which
    /// is followed by more text ends one character early; the pattern is
    /// matched again from that character. This stands in for a trailing
    /// `\s+(?!\S)` alternative, in a pattern ending in `\s+`.
    pub fn with_trailing_space_split(
        mut self,
        trailing_space_split: bool,
    ) -> Self {
        self.trailing_space_split = trailing_space_split;
        self
    }

    /// The segmentation pattern.
    pub fn pattern(&self) -> &str {
        self.regex_pool.as_str()
    }

    /// Is the trailing space split set?
    pub fn trailing_space_split(&self) -> bool {
        self.trailing_space_split
    }

    /// Lazily iterate over the chunks of `text`.
    ///
    /// A regex runtime error (a [`fancy_regex`] backtrack limit) is yielded
    /// once, and ends the iteration.
    pub fn chunks<'p, 'h>(
        &'p self,
        text: &'h str,
    ) -> Chunks<'p, 'h> {
        Chunks {
            regex: self.regex_pool.get(),
            trailing_space_split: self.trailing_space_split,
            text,
            pos: 0,
            search: 0,
            pending: None,
        }
    }

    /// Split `text` into its ordered chunks.
    ///
    /// Concatenating the chunks reproduces `text`.
    ///
    /// ## Returns
    /// The chunks; or [`BpeError::Parse`](crate::errors::BpeError::Parse) on a
    /// regex runtime error.
    pub fn try_segment<'h>(
        &self,
        text: &'h str,
    ) -> BpeResult<Vec<&'h str>> {
        self.chunks(text).collect()
    }

    /// Split `text` into its ordered chunks.
    ///
    /// ## Panics
    /// Panics on a regex runtime error.
    pub fn segment<'h>(
        &self,
        text: &'h str,
    ) -> Vec<&'h str> {
        self.try_segment(text).unwrap()
    }
}

/// Give back the last character of a whitespace run followed by more text.
fn split_trailing_space(
    text: &str,
    range: Range<usize>,
) -> Range<usize> {
    if range.end == text.len() {
        return range;
    }
    let run = &text[range.clone()];
    if !run.chars().all(char::is_whitespace) {
        return range;
    }
    match run.char_indices().next_back() {
        Some((last, _)) if last > 0 => range.start..range.start + last,
        _ => range,
    }
}

/// Iterator over the chunks of a text.
///
/// Text between matches is yielded as its own chunk, so no input is dropped.
pub struct Chunks<'p, 'h> {
    regex: &'p SegmentRegex,
    trailing_space_split: bool,
    text: &'h str,

    /// End of the last yielded chunk.
    pos: usize,

    /// Where the next regex search starts; at or past `pos`.
    search: usize,

    pending: Option<Range<usize>>,
}

impl<'h> Iterator for Chunks<'_, 'h> {
    type Item = BpeResult<&'h str>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(range) = self.pending.take() {
            self.pos = range.end;
            return Some(Ok(&self.text[range]));
        }

        let len = self.text.len();
        while self.search < len {
            let range = match self.regex.find_at(self.text, self.search) {
                Ok(Some(range)) => range,
                Ok(None) => break,
                Err(err) => {
                    self.pos = len;
                    self.search = len;
                    return Some(Err(err.into()));
                }
            };

            if range.is_empty() {
                // Step over one character; it joins the next gap.
                let step = self.text[range.start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.search = range.start + step;
                continue;
            }

            let range = if self.trailing_space_split {
                split_trailing_space(self.text, range)
            } else {
                range
            };
            self.search = range.end;

            if range.start > self.pos {
                let gap = self.pos..range.start;
                self.pending = Some(range);
                self.pos = gap.end;
                return Some(Ok(&self.text[gap]));
            }
            self.pos = range.end;
            return Some(Ok(&self.text[range]));
        }
        self.search = len;

        if self.pos < len {
            let tail = self.pos..len;
            self.pos = len;
            return Some(Ok(&self.text[tail]));
        }
        None
    }
}
