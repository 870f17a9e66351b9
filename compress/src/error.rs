//! Error types for compression operations.

use thiserror::Error;

use crate::backend::CompressionBackend;

/// Result type for compression operations.
pub type CompressResult<T> = Result<T, CompressError>;

/// Errors raised by the compressor.
///
/// Configuration errors surface from [`Compressor::new`](crate::Compressor::new);
/// everything else is a data error from decompressing untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressError {
    /// The requested backend is not compiled into this build.
    #[error("compression backend {backend:?} is not available in this build")]
    BackendUnavailable { backend: CompressionBackend },

    /// Compression level outside `0..=9`.
    #[error("invalid compression level {level}, maximum is 9")]
    InvalidLevel { level: u8 },

    /// The DEFLATE encoder reported a failure.
    #[error("deflate failed: {reason}")]
    Deflate { reason: String },

    /// The input is not a valid DEFLATE stream.
    #[error("inflate failed: {reason}")]
    Inflate { reason: String },

    /// The inflated payload exceeded the configured bound.
    #[error("inflated payload exceeds {limit} bytes")]
    InflatedTooLarge { limit: usize },

    /// The inflated payload could not be parsed back into entries.
    #[error("malformed inflated payload: {0}")]
    Payload(#[from] bitstream::BitError),

    /// Bytes were left over after reading the expected number of entries.
    #[error("{remaining} trailing bytes after {entries} entries")]
    TrailingData { entries: usize, remaining: usize },
}
