//! LEB128-style varints and zigzag mapping.
//!
//! Each byte carries 7 payload bits in its low bits; bit 7 set means another
//! byte follows. Groups are little-endian. Signed values are zigzag-mapped
//! first so small magnitudes stay short on the wire.

use crate::error::{BitError, BitResult};

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_BYTES: usize = 10;

/// Maps a signed integer onto an unsigned one: `0, -1, 1, -2, ...` become `0, 1, 2, 3, ...`.
#[must_use]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[must_use]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Returns the number of bytes `value` occupies as a varint.
#[must_use]
pub const fn varint_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

/// Appends `value` as a varint to `out`.
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Decodes a varint from the start of `buf`.
///
/// Returns the value and the number of bytes consumed. `base_offset` is only
/// used to report where a bad varint started.
pub fn decode_varint(buf: &[u8], base_offset: usize) -> BitResult<(u64, usize)> {
    let mut value = 0u64;
    for (idx, &byte) in buf.iter().take(MAX_VARINT_BYTES).enumerate() {
        let payload = u64::from(byte & 0x7F);
        let shift = idx * 7;
        // The 10th byte only has room for bit 63.
        if idx == MAX_VARINT_BYTES - 1 && byte > 1 {
            return Err(BitError::InvalidVarint {
                offset: base_offset,
            });
        }
        value |= payload << shift;
        if byte & 0x80 == 0 {
            return Ok((value, idx + 1));
        }
    }
    Err(BitError::UnexpectedEof {
        requested: buf.len() + 1,
        available: buf.len(),
    })
}
