//! Error types for roam-cloze-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Recoverable failure of a parser at a given byte offset.
///
/// Combinators such as `choose`, `optional` and `zero_or_more` catch this to
/// backtrack. It is an expected outcome, never a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input does not match at offset {offset}")]
    Mismatch { offset: usize },

    #[error("unexpected end of input at offset {offset}")]
    EndOfInput { offset: usize },

    #[error("delimiter at offset {offset} is part of a repeated run")]
    RepeatedDelimiter { offset: usize },

    #[error("no alternative matched at offset {offset}")]
    NoAlternative { offset: usize },

    #[error("delimited text opened at offset {offset} is never closed")]
    Unterminated { offset: usize },

    #[error("parsed {consumed} of {length} bytes")]
    Incomplete { consumed: usize, length: usize },
}

impl ParseError {
    /// Offset at which the failure was detected.
    pub fn offset(&self) -> usize {
        match *self {
            Self::Mismatch { offset }
            | Self::EndOfInput { offset }
            | Self::RepeatedDelimiter { offset }
            | Self::NoAlternative { offset }
            | Self::Unterminated { offset } => offset,
            Self::Incomplete { consumed, .. } => consumed,
        }
    }
}

/// Errors from parsing a time zone setting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeZoneError {
    #[error("invalid time zone {value:?}: expected \"local\", \"utc\" or an offset like +02:00")]
    Invalid { value: String },

    #[error("time zone offset {value:?} is out of range")]
    OutOfRange { value: String },
}
