//! Error types for message encoding and decoding.

use std::fmt;

use bitstream::BitError;
use compress::CompressError;
use thiserror::Error;

/// Result type for wire decoding.
pub type WireResult<T> = Result<T, DecodeError>;

/// Result type for wire encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Fatal errors while decoding a buffer of messages.
///
/// None of these are recoverable for the rest of the buffer: there is no
/// resync marker between messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Malformed primitive (varint, truncated field, bad UTF-8, bad boolean).
    #[error("malformed field: {0}")]
    Bitstream(#[from] BitError),

    /// A compressed array failed to inflate or parse.
    #[error("compressed array: {0}")]
    Compress(#[from] CompressError),

    /// The leading tag byte names no known message.
    #[error("unknown message tag {tag} at byte offset {offset}")]
    UnknownMessageTag { tag: u8, offset: usize },

    /// A decode limit was exceeded.
    #[error("{kind} limit exceeded: {actual} > {limit}")]
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific decode limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    BufferBytes,
    MessageCount,
    IndicesCount,
    EntryCount,
    StringBytes,
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BufferBytes => "buffer bytes",
            Self::MessageCount => "message count",
            Self::IndicesCount => "indices count",
            Self::EntryCount => "entry count",
            Self::StringBytes => "string bytes",
        };
        write!(f, "{name}")
    }
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// The compressor failed.
    #[error("compression failed: {0}")]
    Compress(#[from] CompressError),

    /// An array's length disagrees with the message's `indices_count`.
    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_unknown_tag() {
        let err = DecodeError::UnknownMessageTag { tag: 99, offset: 7 };
        let msg = err.to_string();
        assert!(msg.contains("99"));
        assert!(msg.contains("offset 7"));
    }

    #[test]
    fn decode_error_display_limits_exceeded() {
        let err = DecodeError::LimitsExceeded {
            kind: LimitKind::IndicesCount,
            limit: 4,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("indices count"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn decode_error_from_bit_error() {
        let err: DecodeError = BitError::InvalidVarint { offset: 0 }.into();
        assert!(matches!(err, DecodeError::Bitstream(_)));
    }

    #[test]
    fn encode_error_display() {
        let err = EncodeError::LengthMismatch {
            field: "component values",
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("component values"));
        assert!(msg.contains("expected 3"));
    }
}
