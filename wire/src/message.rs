//! Decoded message types.

use crate::tag::{Direction, MessageTag};
use crate::types::{ComponentId, StateId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A component value reported by a client about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentEntry {
    pub id: ComponentId,
    pub value: i64,
}

/// A state blob reported by a client about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateEntry {
    pub id: StateId,
    pub value: Vec<u8>,
}

/// First message of a client session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectUser {
    pub token: String,
    /// Observers receive ticks but occupy no user index.
    pub observer: bool,
    pub components: Vec<ComponentEntry>,
    pub states: Vec<StateEntry>,
}

/// Client update of its own components and states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetUserComponents {
    pub components: Vec<ComponentEntry>,
    pub states: Vec<StateEntry>,
}

/// Application-defined payload, used by `clientCustom`, `serverCustom` and `serverBroadcast`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CustomMessage {
    pub kind: u32,
    pub payload: String,
}

/// Full values and deltas of one component for every user index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckoutComponent {
    pub id: ComponentId,
    /// One entry per user index.
    pub values: Vec<i64>,
    /// Change of each value over the previous tick, one entry per user index.
    pub deltas: Vec<i64>,
}

/// Blobs of one state for every user index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckoutState {
    pub id: StateId,
    /// One entry per user index. Empty blobs decode as `None`.
    pub values: Vec<Option<Vec<u8>>>,
}

/// Snapshot establishing a peer's baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InitialCheckout {
    pub server_time: u64,
    pub indices_count: u32,
    pub components: Vec<CheckoutComponent>,
    pub states: Vec<CheckoutState>,
}

/// Second-order deltas of one component for every user index.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickComponent {
    pub id: ComponentId,
    pub delta_deltas: Vec<i64>,
}

/// One replaced state blob.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateUpdate {
    pub index: u32,
    /// New blob; `None` clears the state. Empty blobs decode as `None`.
    pub value: Option<Vec<u8>>,
}

/// Sparse replacements of one state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TickState {
    pub id: StateId,
    pub updates: Vec<StateUpdate>,
}

/// Periodic incremental update.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tick {
    pub server_time: u64,
    /// Indices whose participant left since the previous tick.
    pub removed_indices: Vec<u32>,
    pub indices_count: u32,
    pub components: Vec<TickComponent>,
    pub states: Vec<TickState>,
}

/// Server notice that the receiving peer should surface but keep running.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Warning {
    pub message: String,
}

/// Server notice that the session is over.
///
/// On the wire the text is a flagged string: the zigzag length prefix is
/// `len` when `retryable` is clear and `-len - 1` when it is set, so an empty
/// message still carries the flag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorMessage {
    pub message: String,
    /// Advisory: whether the peer should try to reconnect.
    pub retryable: bool,
}

/// Every message of the protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Message {
    ConnectUser(ConnectUser),
    SetUserComponents(SetUserComponents),
    Pong { sequence: u64 },
    ClientCustom(CustomMessage),
    InitialCheckout(InitialCheckout),
    UserIndex { index: u32 },
    Tick(Tick),
    Ping { sequence: u64 },
    Warning(Warning),
    Error(ErrorMessage),
    ServerCustom(CustomMessage),
    ServerBroadcast(CustomMessage),
}

impl Message {
    /// Returns the wire tag for this message.
    #[must_use]
    pub const fn tag(&self) -> MessageTag {
        match self {
            Self::ConnectUser(_) => MessageTag::ConnectUser,
            Self::SetUserComponents(_) => MessageTag::SetUserComponents,
            Self::Pong { .. } => MessageTag::Pong,
            Self::ClientCustom(_) => MessageTag::ClientCustom,
            Self::InitialCheckout(_) => MessageTag::InitialCheckout,
            Self::UserIndex { .. } => MessageTag::UserIndex,
            Self::Tick(_) => MessageTag::Tick,
            Self::Ping { .. } => MessageTag::Ping,
            Self::Warning(_) => MessageTag::Warning,
            Self::Error(_) => MessageTag::Error,
            Self::ServerCustom(_) => MessageTag::ServerCustom,
            Self::ServerBroadcast(_) => MessageTag::ServerBroadcast,
        }
    }

    /// Returns the direction this message travels.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.tag().direction()
    }
}
