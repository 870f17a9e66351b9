//! DEFLATE compression of integer and blob arrays for the ticksync codec.
//!
//! Two payload shapes are supported, both ending in a raw RFC 1951 stream:
//!
//! - **Integer arrays** - each `i64` is written as a zigzag varint, then the
//!   scratch buffer is deflated.
//! - **Blob arrays** - each optional blob is written as `[varint length][bytes]`
//!   (absent blobs as length zero), then the scratch buffer is deflated.
//!
//! The element count is not part of the compressed payload; the caller carries
//! it alongside and passes it back on decompression.
//!
//! # Backends
//!
//! [`CompressionBackend`] picks the DEFLATE implementation. Every real backend
//! produces standard streams, so a payload compressed by one inflates with any
//! other.
//!
//! # Example
//!
//! ```
//! use compress::{CompressionBackend, Compressor};
//!
//! let compressor = Compressor::with_backend(CompressionBackend::Miniz).unwrap();
//! let packed = compressor.compress_i64s(&[0, 0, 3, -2]).unwrap();
//! assert_eq!(compressor.decompress_i64s(&packed, 4).unwrap(), vec![0, 0, 3, -2]);
//! ```

mod backend;
mod compressor;
mod deflate;
mod error;

pub use backend::{CompressionBackend, CompressionConfig};
pub use compressor::Compressor;
pub use error::{CompressError, CompressResult};
