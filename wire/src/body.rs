//! Shared field codecs for message bodies.

use bitstream::{ByteReader, ByteWriter};

use crate::envelope::MessageCodec;
use crate::error::{EncodeResult, LimitKind, WireResult};
use crate::message::{ComponentEntry, StateEntry};
use crate::types::{ComponentId, StateId};

/// Encoding and decoding of one message body (everything after the tag byte).
pub(crate) trait MessageBody: Sized {
    fn encode_body(&self, writer: &mut ByteWriter, codec: &MessageCodec) -> EncodeResult<()>;

    fn decode_body(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<Self>;
}

/// Reads an element count and bounds it by `kind`'s limit.
pub(crate) fn read_count(
    reader: &mut ByteReader<'_>,
    codec: &MessageCodec,
    kind: LimitKind,
) -> WireResult<usize> {
    let count = reader.read_len()?;
    codec.limits().check(kind, count)?;
    Ok(count)
}

/// Capacity to reserve for `count` elements of at least one byte each.
pub(crate) fn capacity_hint(reader: &ByteReader<'_>, count: usize) -> usize {
    count.min(reader.remaining())
}

pub(crate) fn read_string(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<String> {
    let value = reader.read_string()?;
    codec.limits().check(LimitKind::StringBytes, value.len())?;
    Ok(value)
}

pub(crate) fn read_string_flagged(
    reader: &mut ByteReader<'_>,
    codec: &MessageCodec,
) -> WireResult<(String, bool)> {
    let (value, flag) = reader.read_string_flagged()?;
    codec.limits().check(LimitKind::StringBytes, value.len())?;
    Ok((value, flag))
}

pub(crate) fn write_component_entries(writer: &mut ByteWriter, entries: &[ComponentEntry]) {
    writer.write_len(entries.len());
    for entry in entries {
        writer.write_varu32(entry.id.raw());
        writer.write_vari64(entry.value);
    }
}

pub(crate) fn read_component_entries(
    reader: &mut ByteReader<'_>,
    codec: &MessageCodec,
) -> WireResult<Vec<ComponentEntry>> {
    let count = read_count(reader, codec, LimitKind::EntryCount)?;
    let mut entries = Vec::with_capacity(capacity_hint(reader, count));
    for _ in 0..count {
        let id = ComponentId::new(reader.read_varu32()?);
        let value = reader.read_vari64()?;
        entries.push(ComponentEntry { id, value });
    }
    Ok(entries)
}

pub(crate) fn write_state_entries(writer: &mut ByteWriter, entries: &[StateEntry]) {
    writer.write_len(entries.len());
    for entry in entries {
        writer.write_varu32(entry.id.raw());
        writer.write_bytes(&entry.value);
    }
}

pub(crate) fn read_state_entries(
    reader: &mut ByteReader<'_>,
    codec: &MessageCodec,
) -> WireResult<Vec<StateEntry>> {
    let count = read_count(reader, codec, LimitKind::EntryCount)?;
    let mut entries = Vec::with_capacity(capacity_hint(reader, count));
    for _ in 0..count {
        let id = StateId::new(reader.read_varu32()?);
        let value = reader.read_bytes()?.to_vec();
        entries.push(StateEntry { id, value });
    }
    Ok(entries)
}
