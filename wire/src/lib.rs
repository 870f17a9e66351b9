//! Message framing for the ticksync protocol.
//!
//! Every message is a single tag byte followed by a body whose layout is
//! fixed per tag. Messages are concatenated without separators, so a buffer
//! holds any number of them and one malformed message aborts the rest.
//!
//! Checkout and tick arrays are DEFLATE-compressed through the
//! [`compress`] crate; everything else is varint-coded by [`bitstream`].
//!
//! # Design Principles
//!
//! - **Fixed tags** - Tag values never change; retired values stay unassigned.
//! - **Bounded decoding** - Every count read from the wire is checked against [`Limits`].
//! - **Stateless codec** - [`MessageCodec`] holds configuration only, never session state.

mod body;
mod client;
mod envelope;
mod error;
mod limits;
mod message;
mod server;
mod tag;
mod types;

pub use envelope::{decode_many, encode, DecodedMessage, MessageCodec};
pub use error::{DecodeError, EncodeError, EncodeResult, LimitKind, WireResult};
pub use limits::Limits;
pub use message::{
    CheckoutComponent, CheckoutState, ComponentEntry, ConnectUser, CustomMessage, ErrorMessage,
    InitialCheckout, Message, SetUserComponents, StateEntry, StateUpdate, Tick, TickComponent,
    TickState, Warning,
};
pub use tag::{Direction, MessageTag, RESERVED_SET_USER_STATE_TAG};
pub use types::{ComponentId, StateId};
