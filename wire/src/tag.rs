//! Message type tags.

/// Tag reserved for a per-user state update that no codec emits.
pub const RESERVED_SET_USER_STATE_TAG: u8 = 13;

/// Which way a message travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    ClientToServer,
    ServerToClient,
}

/// The leading byte of every message.
///
/// Values are fixed by the protocol and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MessageTag {
    InitialCheckout = 1,
    ServerCustom = 2,
    UserIndex = 4,
    Tick = 6,
    Ping = 8,
    Warning = 9,
    Error = 10,
    ConnectUser = 11,
    SetUserComponents = 12,
    Pong = 14,
    ClientCustom = 15,
    ServerBroadcast = 16,
}

impl MessageTag {
    /// All tags in wire order.
    pub const ALL: [Self; 12] = [
        Self::InitialCheckout,
        Self::ServerCustom,
        Self::UserIndex,
        Self::Tick,
        Self::Ping,
        Self::Warning,
        Self::Error,
        Self::ConnectUser,
        Self::SetUserComponents,
        Self::Pong,
        Self::ClientCustom,
        Self::ServerBroadcast,
    ];

    /// Parses a tag from a raw byte.
    ///
    /// Returns `None` for unassigned values and for the reserved
    /// [`RESERVED_SET_USER_STATE_TAG`].
    #[must_use]
    pub const fn parse(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::InitialCheckout),
            2 => Some(Self::ServerCustom),
            4 => Some(Self::UserIndex),
            6 => Some(Self::Tick),
            8 => Some(Self::Ping),
            9 => Some(Self::Warning),
            10 => Some(Self::Error),
            11 => Some(Self::ConnectUser),
            12 => Some(Self::SetUserComponents),
            14 => Some(Self::Pong),
            15 => Some(Self::ClientCustom),
            16 => Some(Self::ServerBroadcast),
            _ => None,
        }
    }

    /// Returns the raw tag byte.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Returns the direction messages with this tag travel.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::ConnectUser | Self::SetUserComponents | Self::Pong | Self::ClientCustom => {
                Direction::ClientToServer
            }
            Self::InitialCheckout
            | Self::ServerCustom
            | Self::UserIndex
            | Self::Tick
            | Self::Ping
            | Self::Warning
            | Self::Error
            | Self::ServerBroadcast => Direction::ServerToClient,
        }
    }
}
