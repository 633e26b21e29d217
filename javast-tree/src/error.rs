//! Error types for javast-tree
//!
//! Syntax errors in the parsed source are never reported here: the engine
//! recovers from them and they surface as `ERROR` nodes in the tree. These
//! variants cover the cases where no faithful tree can be produced.

use thiserror::Error;

/// Errors from parsing and serialization
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// A leaf's byte range does not decode as UTF-8
    #[error("Encoding error in `{kind}` leaf at bytes {start_byte}..{end_byte}: {source}")]
    Encoding {
        kind: String,
        start_byte: usize,
        end_byte: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The engine reported a byte range outside the source buffer
    #[error("`{kind}` node spans bytes {start_byte}..{end_byte} but the source is {len} bytes long")]
    InvalidRange {
        kind: String,
        start_byte: usize,
        end_byte: usize,
        len: usize,
    },

    /// The engine produced no tree at all
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Tree-sitter specific error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),
}

impl AstError {
    /// Create a parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        AstError::ParseError(message.into())
    }

    /// Whether this error comes from the source bytes rather than the engine
    pub fn is_encoding(&self) -> bool {
        matches!(self, AstError::Encoding { .. })
    }
}

/// Result type alias for AstError
pub type Result<T> = std::result::Result<T, AstError>;
