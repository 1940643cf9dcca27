//! Error type of the WKT reader.

use thiserror::Error;

/// Error returned by the WKT reader.
///
/// Positions are byte offsets into the input text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WktError {
    /// A character that cannot start any token, or a malformed number.
    #[error("unexpected character {character:?} at position {position}")]
    Lex {
        /// Offending character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// Wrong token at a grammar position.
    #[error("expected {expected}, found {found} at position {position}")]
    Syntax {
        /// Description of the tokens that were valid at this position.
        expected: String,
        /// Description of the token that was found instead.
        found: String,
        /// Byte offset of the found token, or the input length if the input ended.
        position: usize,
    },

    /// The geometry keyword is not one of the seven supported types.
    #[error("unsupported geometry type {keyword:?} at position {position}")]
    UnsupportedGeometryType {
        /// Keyword as written in the input.
        keyword: String,
        /// Byte offset of the keyword.
        position: usize,
    },

    /// Input nesting exceeds the configured maximum depth.
    #[error("geometry nesting is deeper than {max_depth} levels")]
    NestingTooDeep {
        /// Maximum depth the reader was configured with.
        max_depth: usize,
    },
}
