//! # Error Types
//!
//! Errors shared across crates.

use thiserror::Error;

/// Errors from encoding or decoding spell arguments.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Arguments could not be serialized.
    #[error("failed to encode arguments: {0}")]
    Encode(String),

    /// Arguments did not match the expected layout.
    #[error("failed to decode arguments: {0}")]
    Decode(String),
}

/// Errors from parsing textual primitives (hex addresses, hashes).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded bytes had the wrong length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
