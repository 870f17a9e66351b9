//! Byte-level wire primitives for the ticksync codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] plus the varint and
//! zigzag helpers they are built on. It is designed for bounded, panic-free
//! operation with explicit error handling.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about messages, components, or ticks.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_vari64(-42);
//! writer.write_string("hello");
//! writer.write_bool_array(&[true, false, true]);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_vari64().unwrap(), -42);
//! assert_eq!(reader.read_string().unwrap(), "hello");
//! assert_eq!(reader.read_bool_array().unwrap(), vec![true, false, true]);
//! ```

mod error;
mod reader;
mod varint;
mod writer;

pub use error::{BitError, BitResult};
pub use reader::ByteReader;
pub use varint::{
    decode_varint, encode_varint, varint_len, zigzag_decode, zigzag_encode, MAX_VARINT_BYTES,
};
pub use writer::ByteWriter;
