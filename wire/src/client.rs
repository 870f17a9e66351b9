//! Bodies of client-to-server messages.

use bitstream::{ByteReader, ByteWriter};

use crate::body::{
    read_component_entries, read_state_entries, read_string, write_component_entries,
    write_state_entries, MessageBody,
};
use crate::envelope::MessageCodec;
use crate::error::{EncodeResult, WireResult};
use crate::message::{ConnectUser, CustomMessage, SetUserComponents};

// [token][observer][components][states]
impl MessageBody for ConnectUser {
    fn encode_body(&self, writer: &mut ByteWriter, _codec: &MessageCodec) -> EncodeResult<()> {
        writer.write_string(&self.token);
        writer.write_bool(self.observer);
        write_component_entries(writer, &self.components);
        write_state_entries(writer, &self.states);
        Ok(())
    }

    fn decode_body(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<Self> {
        let token = read_string(reader, codec)?;
        let observer = reader.read_bool()?;
        let components = read_component_entries(reader, codec)?;
        let states = read_state_entries(reader, codec)?;
        Ok(Self {
            token,
            observer,
            components,
            states,
        })
    }
}

impl MessageBody for SetUserComponents {
    fn encode_body(&self, writer: &mut ByteWriter, _codec: &MessageCodec) -> EncodeResult<()> {
        write_component_entries(writer, &self.components);
        write_state_entries(writer, &self.states);
        Ok(())
    }

    fn decode_body(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<Self> {
        let components = read_component_entries(reader, codec)?;
        let states = read_state_entries(reader, codec)?;
        Ok(Self { components, states })
    }
}

// Shared by clientCustom, serverCustom and serverBroadcast.
impl MessageBody for CustomMessage {
    fn encode_body(&self, writer: &mut ByteWriter, _codec: &MessageCodec) -> EncodeResult<()> {
        writer.write_varu32(self.kind);
        writer.write_string(&self.payload);
        Ok(())
    }

    fn decode_body(reader: &mut ByteReader<'_>, codec: &MessageCodec) -> WireResult<Self> {
        let kind = reader.read_varu32()?;
        let payload = read_string(reader, codec)?;
        Ok(Self { kind, payload })
    }
}
