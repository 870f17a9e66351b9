//! Bodies of server-to-client messages.
//!
//! `InitialCheckout` and `Tick` carry their per-index arrays as
//! length-prefixed compressed byte strings; the element count is implied by
//! `indices_count` (or the state update count) and is not repeated.

use bitstream::{BitError, ByteReader, ByteWriter};

use crate::body::{capacity_hint, read_count, read_string, read_string_flagged, MessageBody};
use crate::envelope::MessageCodec;
use crate::error::{EncodeError, EncodeResult, LimitKind, WireResult};
use crate::message::{
    CheckoutComponent, CheckoutState, ErrorMessage, InitialCheckout, StateUpdate, Tick,
    TickComponent, TickState, Warning,
};
use crate::types::{ComponentId, StateId};

impl MessageBody for InitialCheckout {
    fn encode_body(&self, writer: &mut ByteWriter, codec: &MessageCodec) -> EncodeResult<()> {
        let indices = self.indices_count as usize;
        writer.write_varu64(self.server_time);
        writer.write_varu32(self.indices_count);

        writer.write_len(self.components.len());
        for component in &self.components {
            expect_len("checkout component values", indices, component.values.len())?;
            expect_len("checkout component deltas", indices, component.deltas.len())?;
            writer.write_varu32(component.id.raw());
            writer.write_bytes(&codec.compressor().compress_i64s(&component.values)?);
            writer.write_bytes(&codec.compressor().compress_i64s(&component.deltas)?);
        }

        writer.write_len(self.states.len());
        for state in &self.states {
            expect_len("checkout state values", indices, state.values.len())?;
            writer.write_varu32(state.id.raw());
            writer.write_bytes(&codec.compressor().compress_blobs(&state.values)?);
        }
        Ok(())
    }

    fn decode_body(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<Self> {
        let server_time = reader.read_varu64()?;
        let indices_count = reader.read_varu32()?;
        let indices = indices_count as usize;
        codec.limits().check(LimitKind::IndicesCount, indices)?;

        let component_count = read_count(reader, codec, LimitKind::EntryCount)?;
        let mut components = Vec::with_capacity(capacity_hint(reader, component_count));
        for _ in 0..component_count {
            let id = ComponentId::new(reader.read_varu32()?);
            let values = codec
                .compressor()
                .decompress_i64s(reader.read_bytes()?, indices)?;
            let deltas = codec
                .compressor()
                .decompress_i64s(reader.read_bytes()?, indices)?;
            components.push(CheckoutComponent { id, values, deltas });
        }

        let state_count = read_count(reader, codec, LimitKind::EntryCount)?;
        let mut states = Vec::with_capacity(capacity_hint(reader, state_count));
        for _ in 0..state_count {
            let id = StateId::new(reader.read_varu32()?);
            let values = codec
                .compressor()
                .decompress_blobs(reader.read_bytes()?, indices)?
                .into_iter()
                .map(non_empty)
                .collect();
            states.push(CheckoutState { id, values });
        }

        Ok(Self {
            server_time,
            indices_count,
            components,
            states,
        })
    }
}

impl MessageBody for Tick {
    fn encode_body(&self, writer: &mut ByteWriter, codec: &MessageCodec) -> EncodeResult<()> {
        let indices = self.indices_count as usize;
        writer.write_varu64(self.server_time);
        writer.write_len(self.removed_indices.len());
        for &index in &self.removed_indices {
            writer.write_varu32(index);
        }
        writer.write_varu32(self.indices_count);

        writer.write_len(self.components.len());
        for component in &self.components {
            expect_len("tick delta-deltas", indices, component.delta_deltas.len())?;
            writer.write_varu32(component.id.raw());
            writer.write_bytes(&codec.compressor().compress_i64s(&component.delta_deltas)?);
        }

        writer.write_len(self.states.len());
        for state in &self.states {
            let update_indices: Vec<i64> = state
                .updates
                .iter()
                .map(|update| i64::from(update.index))
                .collect();
            let values: Vec<Option<&[u8]>> = state
                .updates
                .iter()
                .map(|update| update.value.as_deref())
                .collect();
            writer.write_varu32(state.id.raw());
            writer.write_len(state.updates.len());
            writer.write_bytes(&codec.compressor().compress_i64s(&update_indices)?);
            writer.write_bytes(&codec.compressor().compress_blobs(&values)?);
        }
        Ok(())
    }

    fn decode_body(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<Self> {
        let server_time = reader.read_varu64()?;

        let removed_count = read_count(reader, codec, LimitKind::IndicesCount)?;
        let mut removed_indices = Vec::with_capacity(capacity_hint(reader, removed_count));
        for _ in 0..removed_count {
            removed_indices.push(reader.read_varu32()?);
        }

        let indices_count = reader.read_varu32()?;
        let indices = indices_count as usize;
        codec.limits().check(LimitKind::IndicesCount, indices)?;

        let component_count = read_count(reader, codec, LimitKind::EntryCount)?;
        let mut components = Vec::with_capacity(capacity_hint(reader, component_count));
        for _ in 0..component_count {
            let id = ComponentId::new(reader.read_varu32()?);
            let delta_deltas = codec
                .compressor()
                .decompress_i64s(reader.read_bytes()?, indices)?;
            components.push(TickComponent { id, delta_deltas });
        }

        let state_count = read_count(reader, codec, LimitKind::EntryCount)?;
        let mut states = Vec::with_capacity(capacity_hint(reader, state_count));
        for _ in 0..state_count {
            let id = StateId::new(reader.read_varu32()?);
            let update_count = read_count(reader, codec, LimitKind::IndicesCount)?;
            let raw_indices = codec
                .compressor()
                .decompress_i64s(reader.read_bytes()?, update_count)?;
            let values = codec
                .compressor()
                .decompress_blobs(reader.read_bytes()?, update_count)?;
            let mut updates = Vec::with_capacity(update_count);
            for (index, value) in raw_indices.into_iter().zip(values) {
                let index = u32::try_from(index).map_err(|_| BitError::ValueOutOfRange {
                    value: index.unsigned_abs(),
                    bits: 32,
                })?;
                updates.push(StateUpdate {
                    index,
                    value: non_empty(value),
                });
            }
            states.push(TickState { id, updates });
        }

        Ok(Self {
            server_time,
            removed_indices,
            indices_count,
            components,
            states,
        })
    }
}

impl MessageBody for Warning {
    fn encode_body(&self, writer: &mut ByteWriter, _codec: &MessageCodec) -> EncodeResult<()> {
        writer.write_string(&self.message);
        Ok(())
    }

    fn decode_body(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<Self> {
        let message = read_string(reader, codec)?;
        Ok(Self { message })
    }
}

// The retryable flag rides in the sign of the string length.
impl MessageBody for ErrorMessage {
    fn encode_body(&self, writer: &mut ByteWriter, _codec: &MessageCodec) -> EncodeResult<()> {
        writer.write_string_flagged(&self.message, self.retryable);
        Ok(())
    }

    fn decode_body(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<Self> {
        let (message, retryable) = read_string_flagged(reader, codec)?;
        Ok(Self { message, retryable })
    }
}

const fn expect_len(field: &'static str, expected: usize, actual: usize) -> EncodeResult<()> {
    if expected != actual {
        return Err(EncodeError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

fn non_empty(blob: Vec<u8>) -> Option<Vec<u8>> {
    if blob.is_empty() {
        None
    } else {
        Some(blob)
    }
}
