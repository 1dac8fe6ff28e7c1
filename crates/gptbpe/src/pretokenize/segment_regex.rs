//! # Segmentation Regex
//!
//! Patterns are compiled by [`regex`] when they can be, and by
//! [`fancy_regex`] when they need lookaround.

use std::{borrow::Cow, ops::Range};

use crate::errors::BpeError;

/// Which regex engine compiles a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegexEngine {
    /// [`regex`]; no lookaround or backreferences.
    Basic,

    /// [`fancy_regex`].
    Fancy,

    /// Try [`regex`], then fall back to [`fancy_regex`].
    Auto,
}

/// A regex compile or match failure.
#[derive(Debug, thiserror::Error)]
pub enum RegexError {
    /// [`regex`] rejected the pattern.
    #[error(transparent)]
    Basic(Box<regex::Error>),

    /// [`fancy_regex`] rejected the pattern, or failed a match.
    #[error(transparent)]
    Fancy(Box<fancy_regex::Error>),
}

impl From<RegexError> for BpeError {
    fn from(err: RegexError) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A pattern source, and the engine to compile it with.
///
/// `const` constructible through [`RegexPattern::basic`] and
/// [`RegexPattern::fancy`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegexPattern {
    source: Cow<'static, str>,
    engine: RegexEngine,
}

impl RegexPattern {
    /// A static pattern for [`regex`].
    pub const fn basic(source: &'static str) -> Self {
        Self {
            source: Cow::Borrowed(source),
            engine: RegexEngine::Basic,
        }
    }

    /// A static pattern for [`fancy_regex`].
    pub const fn fancy(source: &'static str) -> Self {
        Self {
            source: Cow::Borrowed(source),
            engine: RegexEngine::Fancy,
        }
    }

    /// A pattern of unknown requirements.
    pub fn auto<S: Into<String>>(source: S) -> Self {
        Self {
            source: Cow::Owned(source.into()),
            engine: RegexEngine::Auto,
        }
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The requested engine.
    pub fn engine(&self) -> RegexEngine {
        self.engine
    }

    /// Compile the pattern.
    pub fn compile(&self) -> Result<SegmentRegex, RegexError> {
        let fancy = || {
            fancy_regex::Regex::new(&self.source)
                .map(SegmentRegex::Fancy)
                .map_err(|e| RegexError::Fancy(Box::new(e)))
        };

        match self.engine {
            RegexEngine::Basic => regex::Regex::new(&self.source)
                .map(SegmentRegex::Basic)
                .map_err(|e| RegexError::Basic(Box::new(e))),
            RegexEngine::Fancy => fancy(),
            RegexEngine::Auto => regex::Regex::new(&self.source)
                .map(SegmentRegex::Basic)
                .or_else(|_| fancy()),
        }
    }
}

impl From<&str> for RegexPattern {
    fn from(source: &str) -> Self {
        Self::auto(source)
    }
}

impl From<String> for RegexPattern {
    fn from(source: String) -> Self {
        Self::auto(source)
    }
}

/// A compiled segmentation regex.
#[derive(Debug, Clone)]
pub enum SegmentRegex {
    /// Compiled by [`regex`].
    Basic(regex::Regex),

    /// Compiled by [`fancy_regex`].
    Fancy(fancy_regex::Regex),
}

impl PartialEq for SegmentRegex {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.is_fancy() == other.is_fancy() && self.as_str() == other.as_str()
    }
}

impl SegmentRegex {
    /// Was this compiled by [`fancy_regex`]?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(re) => re.as_str(),
            Self::Fancy(re) => re.as_str(),
        }
    }

    /// Find the leftmost match starting at or after byte `start`.
    ///
    /// The whole haystack is the match context, so anchors and lookaround
    /// see the text before `start`.
    ///
    /// ## Returns
    /// The match byte range, if any; or a [`fancy_regex`] runtime error,
    /// such as an exceeded backtrack limit.
    pub fn find_at(
        &self,
        haystack: &str,
        start: usize,
    ) -> Result<Option<Range<usize>>, RegexError> {
        match self {
            Self::Basic(re) => Ok(re.find_at(haystack, start).map(|m| m.range())),
            Self::Fancy(re) => re
                .find_from_pos(haystack, start)
                .map(|m| m.map(|m| m.range()))
                .map_err(|e| RegexError::Fancy(Box::new(e))),
        }
    }
}
