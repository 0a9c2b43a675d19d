//! Error types for slim-client.

use thiserror::Error;

/// Failure raised by the decoder when wire bytes do not follow the grammar.
///
/// Offsets are byte positions into the input handed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// Fewer than 6 bytes remain, or the length field is not all digits.
    #[error("bad length field at offset {offset}")]
    BadLength { offset: usize },

    /// Expected a `:` delimiter after a length field.
    #[error("expected ':' at offset {offset}")]
    MalformedDelimiter { offset: usize },

    /// List structure is broken (count field, element delimiter or `]`).
    #[error("malformed list at offset {offset}: {reason}")]
    MalformedList { offset: usize, reason: &'static str },

    /// Declared length disagrees with the bytes actually consumed.
    #[error("length mismatch at offset {offset}: declared {declared}, consumed {actual}")]
    LengthMismatch {
        offset: usize,
        declared: usize,
        actual: usize,
    },

    /// Scalar body is shorter than its declared length.
    #[error("truncated scalar at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Scalar body is not valid UTF-8.
    #[error("scalar at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    /// Nesting exceeds the configured depth guard.
    #[error("nesting deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },

    /// Bytes remain after the top-level value.
    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },
}

/// Main error type for all slim-client operations.
#[derive(Debug, Error)]
pub enum SlimError {
    /// I/O error on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while loading configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response bytes could not be decoded.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseFailure),

    /// A value is too long for the 6-digit length field.
    #[error("Encoded length {length} exceeds the 6-digit length field")]
    EncodingOverflow { length: usize },

    /// An instruction has no answer in the response batch.
    #[error("No answer for instruction id '{id}'")]
    CorrelationMiss { id: String },

    /// Protocol error (bad answer batch shape, oversized response, etc.).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Connection closed before a complete response arrived.
    #[error("Connection closed")]
    ConnectionClosed,
}

/// Result type alias using SlimError.
pub type Result<T> = std::result::Result<T, SlimError>;
