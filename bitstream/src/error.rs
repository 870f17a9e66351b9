//! Error types for byte buffer operations.

use thiserror::Error;

/// Result type for byte buffer operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors that can occur while reading primitives from a byte buffer.
///
/// Writing never fails: the writer grows on demand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitError {
    /// Attempted to read past the end of the buffer.
    #[error("attempted to read {requested} bytes but only {available} bytes available")]
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// A varint ran past 10 bytes or carried bits beyond the 64-bit range.
    #[error("invalid varint at byte offset {offset}")]
    InvalidVarint {
        /// Byte offset where the varint started.
        offset: usize,
    },

    /// A decoded integer does not fit the requested width.
    #[error("value {value} does not fit in {bits} bits")]
    ValueOutOfRange {
        /// The decoded value.
        value: u64,
        /// Width of the target type in bits.
        bits: u8,
    },

    /// A length prefix does not fit in `usize` on this platform.
    #[error("length prefix {value} is too large")]
    LengthOverflow {
        /// The decoded length.
        value: u64,
    },

    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid utf-8 in string at byte offset {offset}")]
    InvalidUtf8 {
        /// Byte offset where the string payload started.
        offset: usize,
    },

    /// A boolean byte was neither 0 nor 1.
    #[error("invalid boolean byte {value:#04x} at byte offset {offset}")]
    InvalidBool {
        /// The byte found.
        value: u8,
        /// Byte offset of the boolean.
        offset: usize,
    },
}
