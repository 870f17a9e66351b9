//! Error types for replica and publisher operations.

use thiserror::Error;
use wire::{DecodeError, EncodeError};

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while maintaining delta-delta state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Decoding the incoming buffer failed.
    #[error("decode failed: {0}")]
    Wire(#[from] DecodeError),

    /// Encoding the outgoing message failed.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// A tick arrived before any initial checkout.
    #[error("tick received before initial checkout")]
    NoCheckout,

    /// An array's length disagrees with `indices_count`.
    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A removed or updated index lies outside the current slots.
    #[error("index {index} out of range for {count} slots")]
    IndexOutOfRange { index: u32, count: usize },
}
