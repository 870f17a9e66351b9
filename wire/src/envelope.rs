//! Tag-byte envelope and buffer-level encode/decode.

use std::ops::Range;

use bitstream::{ByteReader, ByteWriter};
use compress::{CompressResult, CompressionConfig, Compressor};
use log::{trace, warn};

use crate::body::MessageBody;
use crate::error::{DecodeError, EncodeResult, LimitKind, WireResult};
use crate::limits::Limits;
use crate::message::{
    ConnectUser, CustomMessage, ErrorMessage, InitialCheckout, Message, SetUserComponents, Tick,
    Warning,
};
use crate::tag::MessageTag;

/// A message decoded together with its position in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    /// Byte range of the message, tag byte included.
    pub span: Range<usize>,
    pub message: Message,
}

/// Encoder/decoder for buffers of messages.
///
/// Holds the compressor used for checkout and tick arrays and the decode
/// limits. It carries no per-connection state, so one instance can serve
/// every connection.
#[derive(Debug, Clone, Default)]
pub struct MessageCodec {
    compressor: Compressor,
    limits: Limits,
}

impl MessageCodec {
    /// Creates a codec from an already configured compressor.
    #[must_use]
    pub const fn new(compressor: Compressor, limits: Limits) -> Self {
        Self { compressor, limits }
    }

    /// Creates a codec, resolving the compression backend eagerly.
    pub fn from_config(config: &CompressionConfig, limits: Limits) -> CompressResult<Self> {
        Ok(Self::new(Compressor::new(config)?, limits))
    }

    /// Returns the compressor.
    #[must_use]
    pub const fn compressor(&self) -> &Compressor {
        &self.compressor
    }

    /// Returns the decode limits.
    #[must_use]
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Encodes one message, tag byte first.
    pub fn encode(&self, message: &Message) -> EncodeResult<Vec<u8>> {
        let mut writer = ByteWriter::new();
        self.encode_into(message, &mut writer)?;
        Ok(writer.finish())
    }

    /// Encodes several messages back to back into one buffer.
    pub fn encode_many<'a, I>(&self, messages: I) -> EncodeResult<Vec<u8>>
    where
        I: IntoIterator<Item = &'a Message>,
    {
        let mut writer = ByteWriter::new();
        for message in messages {
            self.encode_into(message, &mut writer)?;
        }
        Ok(writer.finish())
    }

    /// Appends one message to `writer`.
    pub fn encode_into(&self, message: &Message, writer: &mut ByteWriter) -> EncodeResult<()> {
        writer.write_u8(message.tag().raw());
        match message {
            Message::ConnectUser(body) => body.encode_body(writer, self),
            Message::SetUserComponents(body) => body.encode_body(writer, self),
            Message::ClientCustom(body)
            | Message::ServerCustom(body)
            | Message::ServerBroadcast(body) => body.encode_body(writer, self),
            Message::InitialCheckout(body) => body.encode_body(writer, self),
            Message::Tick(body) => body.encode_body(writer, self),
            Message::Warning(body) => body.encode_body(writer, self),
            Message::Error(body) => body.encode_body(writer, self),
            Message::Pong { sequence } | Message::Ping { sequence } => {
                writer.write_varu64(*sequence);
                Ok(())
            }
            Message::UserIndex { index } => {
                writer.write_varu32(*index);
                Ok(())
            }
        }
    }

    /// Decodes every message in `bytes`.
    ///
    /// Any malformed message aborts the whole buffer.
    pub fn decode_many(&self, bytes: &[u8]) -> WireResult<Vec<Message>> {
        self.decode_spans(bytes)
            .map(|decoded| decoded.into_iter().map(|item| item.message).collect())
    }

    /// Decodes every message in `bytes`, keeping each message's byte range.
    pub fn decode_spans(&self, bytes: &[u8]) -> WireResult<Vec<DecodedMessage>> {
        self.limits.check(LimitKind::BufferBytes, bytes.len())?;

        let mut reader = ByteReader::new(bytes);
        let mut messages = Vec::new();
        while !reader.is_empty() {
            self.limits
                .check(LimitKind::MessageCount, messages.len() + 1)?;
            let start = reader.position();
            let message = self.decode_one(&mut reader)?;
            trace!(
                "decoded {:?} at {start}..{}",
                message.tag(),
                reader.position()
            );
            messages.push(DecodedMessage {
                span: start..reader.position(),
                message,
            });
        }
        Ok(messages)
    }

    fn decode_one(&self, reader: &mut ByteReader<'_>) -> WireResult<Message> {
        let offset = reader.position();
        let raw = reader.read_u8()?;
        let Some(tag) = MessageTag::parse(raw) else {
            warn!("rejecting buffer: unknown message tag {raw} at byte offset {offset}");
            return Err(DecodeError::UnknownMessageTag { tag: raw, offset });
        };
        let message = match tag {
            MessageTag::ConnectUser => Message::ConnectUser(ConnectUser::decode_body(reader, self)?),
            MessageTag::SetUserComponents => {
                Message::SetUserComponents(SetUserComponents::decode_body(reader, self)?)
            }
            MessageTag::Pong => Message::Pong {
                sequence: reader.read_varu64()?,
            },
            MessageTag::ClientCustom => {
                Message::ClientCustom(CustomMessage::decode_body(reader, self)?)
            }
            MessageTag::InitialCheckout => {
                Message::InitialCheckout(InitialCheckout::decode_body(reader, self)?)
            }
            MessageTag::UserIndex => Message::UserIndex {
                index: reader.read_varu32()?,
            },
            MessageTag::Tick => Message::Tick(Tick::decode_body(reader, self)?),
            MessageTag::Ping => Message::Ping {
                sequence: reader.read_varu64()?,
            },
            MessageTag::Warning => Message::Warning(Warning::decode_body(reader, self)?),
            MessageTag::Error => Message::Error(ErrorMessage::decode_body(reader, self)?),
            MessageTag::ServerCustom => {
                Message::ServerCustom(CustomMessage::decode_body(reader, self)?)
            }
            MessageTag::ServerBroadcast => {
                Message::ServerBroadcast(CustomMessage::decode_body(reader, self)?)
            }
        };
        Ok(message)
    }
}

/// Encodes one message with the default codec.
pub fn encode(message: &Message) -> EncodeResult<Vec<u8>> {
    MessageCodec::default().encode(message)
}

/// Decodes a buffer of messages with the default codec.
pub fn decode_many(bytes: &[u8]) -> WireResult<Vec<Message>> {
    MessageCodec::default().decode_many(bytes)
}
