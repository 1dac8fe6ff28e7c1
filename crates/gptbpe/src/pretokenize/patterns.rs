//! # Pretokenization Patterns

use crate::pretokenize::segment_regex::RegexPattern;

/// A macro to concatenate multiple string literals with a specified separator.
///
/// ```rust
/// use gptbpe::join_strs;
///
/// assert_eq!(join_strs!(",", ("Hello", "World")), "Hello,World");
/// assert_eq!(join_strs!(";", ("OnlyOne")), "OnlyOne");
/// ```
#[macro_export]
macro_rules! join_strs {
    ($sep:literal, ($first:literal $(, $rest:literal)* $(,)?)) => {
        concat!($first $(, $sep, $rest)*)
    };
}

/// An extension of [`join_strs!()`] which uses "|" as the separator.
#[macro_export]
macro_rules! join_patterns {
    ($($e:tt),* $(,)?) => { $crate::join_strs!("|", ($($e),*)) };
}

/// The GPT-2 / GPT-3 word split pattern.
///
/// Alternatives are tried in order at each position:
/// contraction suffixes, then letter / digit / other runs with at most one
/// leading space, then whitespace. `\s+(?!\S)` leaves the last whitespace
/// character of a run for the following word.
///
/// The lookahead needs [`fancy_regex`], whose backtrack limit is exceeded by
/// whitespace runs of about a million characters. [`Pretokenizer::gpt2`]
/// runs [`GPT2_SPLIT_PATTERN`] instead.
///
/// [`Pretokenizer::gpt2`]: crate::pretokenize::Pretokenizer::gpt2
pub const GPT2_PATTERN: RegexPattern = RegexPattern::fancy(join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+(?!\S)",
    r"\s+",
));

/// [`GPT2_PATTERN`] without the `\s+(?!\S)` lookahead alternative.
///
/// Compiles with [`regex`]; segmentation matches [`GPT2_PATTERN`] when each
/// whitespace match followed by more text gives back its last character,
/// see [`Pretokenizer::with_trailing_space_split`].
///
/// [`Pretokenizer::with_trailing_space_split`]: crate::pretokenize::Pretokenizer::with_trailing_space_split
pub const GPT2_SPLIT_PATTERN: RegexPattern = RegexPattern::basic(join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+",
));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_patterns() {
        assert_eq!(join_patterns!("a", "b", "c"), "a|b|c");
        assert_eq!(join_strs!("+", ("a", "b", "c")), "a+b+c");
    }

    #[test]
    fn test_gpt2_patterns() {
        assert_eq!(
            GPT2_PATTERN.as_str(),
            r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+"
        );
        assert!(GPT2_PATTERN.compile().unwrap().is_fancy());

        assert_eq!(
            GPT2_SPLIT_PATTERN.as_str(),
            r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+"
        );
        assert!(!GPT2_SPLIT_PATTERN.compile().unwrap().is_fancy());
    }
}
