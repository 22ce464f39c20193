//! Error types for the circuit description parsers.

/// Errors that can occur while reading the `.block`/`.nets` descriptions.
///
/// Malformed input is rejected here, before the engine ever sees it.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// An I/O error occurred while reading an input file.
    #[error("failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    /// A keyword or value did not match the expected grammar.
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken {
        /// What the grammar required at this point.
        expected: String,
        /// The token actually present.
        found: String,
    },

    /// The input ended before the description was complete.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// What the grammar required at this point.
        expected: String,
    },

    /// A token that should have been an unsigned number was not.
    #[error("invalid number '{token}' for {what}")]
    InvalidNumber {
        /// The offending token.
        token: String,
        /// The field being parsed.
        what: String,
    },

    /// A net references a block or terminal name that was never declared.
    #[error("net references unknown block or terminal '{0}'")]
    UnknownEndpoint(String),
}
