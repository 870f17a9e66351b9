//! Growable byte writer for encoding wire primitives.

use crate::varint::{encode_varint, zigzag_encode};

/// A byte writer for encoding varints, strings and packed arrays.
///
/// Writes are accumulated in an internal `Vec` that grows geometrically.
/// Call [`finish`](Self::finish) to get the final byte buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Clears the buffer, keeping its allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Writes a boolean as one byte, `0` or `1`.
    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    /// Writes raw bytes with no prefix.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes an unsigned varint.
    pub fn write_varu64(&mut self, value: u64) {
        encode_varint(value, &mut self.bytes);
    }

    /// Writes a zigzag-encoded signed varint.
    pub fn write_vari64(&mut self, value: i64) {
        encode_varint(zigzag_encode(value), &mut self.bytes);
    }

    /// Writes an unsigned varint from a `u32`.
    pub fn write_varu32(&mut self, value: u32) {
        self.write_varu64(u64::from(value));
    }

    /// Writes a length as an unsigned varint.
    pub fn write_len(&mut self, len: usize) {
        self.write_varu64(len as u64);
    }

    /// Writes `[varint length][bytes]`.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_len(bytes.len());
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes `[varint length][utf-8 bytes]`.
    pub fn write_string(&mut self, value: &str) {
        self.write_bytes(value.as_bytes());
    }

    /// Writes a string whose signed length prefix also carries `flag`.
    ///
    /// The prefix is the zigzag varint of `len` when `flag` is clear and of
    /// `-len - 1` when it is set.
    pub fn write_string_flagged(&mut self, value: &str, flag: bool) {
        let len = value.len() as i64;
        let prefix = if flag { -len - 1 } else { len };
        self.write_vari64(prefix);
        self.bytes.extend_from_slice(value.as_bytes());
    }

    /// Writes `[bit count varint][ceil(count / 8) bytes]`, LSB-first within each byte.
    pub fn write_bool_array(&mut self, bits: &[bool]) {
        self.write_len(bits.len());
        for chunk in bits.chunks(8) {
            let byte = chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (idx, &bit)| acc | (u8::from(bit) << idx));
            self.bytes.push(byte);
        }
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}
