//! Byte reader with bounded operations.

use crate::error::{BitError, BitResult};
use crate::varint::{decode_varint, zigzag_decode};

/// A cursor over a byte slice for decoding wire primitives.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> BitResult<u8> {
        let byte = *self.data.get(self.pos).ok_or(BitError::UnexpectedEof {
            requested: 1,
            available: 0,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a boolean byte; only `0` and `1` are accepted.
    pub fn read_bool(&mut self) -> BitResult<bool> {
        let offset = self.pos;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(BitError::InvalidBool { value, offset }),
        }
    }

    /// Reads `len` raw bytes, borrowing them from the underlying buffer.
    pub fn read_raw(&mut self, len: usize) -> BitResult<&'a [u8]> {
        self.ensure_bytes(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Reads an unsigned varint.
    pub fn read_varu64(&mut self) -> BitResult<u64> {
        let (value, consumed) = decode_varint(&self.data[self.pos..], self.pos)?;
        self.pos += consumed;
        Ok(value)
    }

    /// Reads a zigzag-encoded signed varint.
    pub fn read_vari64(&mut self) -> BitResult<i64> {
        self.read_varu64().map(zigzag_decode)
    }

    /// Reads an unsigned varint that must fit in a `u32`.
    pub fn read_varu32(&mut self) -> BitResult<u32> {
        let value = self.read_varu64()?;
        u32::try_from(value).map_err(|_| BitError::ValueOutOfRange { value, bits: 32 })
    }

    /// Reads a varint length prefix.
    ///
    /// The length is not checked against the remaining input; callers reading
    /// element counts must bound them before allocating.
    pub fn read_len(&mut self) -> BitResult<usize> {
        let value = self.read_varu64()?;
        usize::try_from(value).map_err(|_| BitError::LengthOverflow { value })
    }

    /// Reads `[varint length][bytes]`.
    pub fn read_bytes(&mut self) -> BitResult<&'a [u8]> {
        let len = self.read_len()?;
        self.read_raw(len)
    }

    /// Reads `[varint length][utf-8 bytes]`.
    pub fn read_string(&mut self) -> BitResult<String> {
        let len = self.read_len()?;
        self.read_utf8(len)
    }

    /// Reads a string written by `ByteWriter::write_string_flagged`.
    pub fn read_string_flagged(&mut self) -> BitResult<(String, bool)> {
        let prefix = self.read_vari64()?;
        let (len, flag) = if prefix < 0 {
            ((-(prefix + 1)).unsigned_abs(), true)
        } else {
            (prefix.unsigned_abs(), false)
        };
        let len = usize::try_from(len).map_err(|_| BitError::LengthOverflow { value: len })?;
        Ok((self.read_utf8(len)?, flag))
    }

    /// Reads `[bit count varint][ceil(count / 8) bytes]`, LSB-first within each byte.
    pub fn read_bool_array(&mut self) -> BitResult<Vec<bool>> {
        let count = self.read_len()?;
        let packed = self.read_raw(count.div_ceil(8))?;
        let bits = (0..count)
            .map(|idx| (packed[idx / 8] >> (idx % 8)) & 1 == 1)
            .collect();
        Ok(bits)
    }

    fn read_utf8(&mut self, len: usize) -> BitResult<String> {
        let offset = self.pos;
        let bytes = self.read_raw(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| BitError::InvalidUtf8 { offset })
    }

    const fn ensure_bytes(&self, bytes: usize) -> BitResult<()> {
        let available = self.remaining();
        if bytes > available {
            return Err(BitError::UnexpectedEof {
                requested: bytes,
                available,
            });
        }
        Ok(())
    }
}
