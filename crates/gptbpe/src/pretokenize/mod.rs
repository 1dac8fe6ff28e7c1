//! # Pretokenization
//!
//! The GPT-2 split pattern is written with a negative lookahead, which only
//! [`fancy_regex`] provides. [`Pretokenizer::gpt2`] instead runs
//! [`GPT2_SPLIT_PATTERN`] on [`regex`], splitting trailing whitespace itself.
//!
//! * Patterns - [`RegexPattern`], and the fixed [`GPT2_PATTERN`] / [`GPT2_SPLIT_PATTERN`]
//! * Compiled Regex - [`SegmentRegex`]
//! * Splitting Text - [`Pretokenizer`]

pub mod patterns;
pub mod pretokenizer;
pub mod segment_regex;

#[doc(inline)]
pub use patterns::{GPT2_PATTERN, GPT2_SPLIT_PATTERN};
#[doc(inline)]
pub use pretokenizer::{Chunks, Pretokenizer};
#[doc(inline)]
pub use segment_regex::{RegexEngine, RegexError, RegexPattern, SegmentRegex};
