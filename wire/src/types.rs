//! Identifier types carried on the wire.

/// Identifies a numeric component (position axis, rotation, animation flags...).
///
/// Ids are assigned by the application layer; the codec attaches no meaning to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ComponentId(u32);

impl ComponentId {
    /// Creates a new component id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ComponentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<ComponentId> for u32 {
    fn from(id: ComponentId) -> Self {
        id.0
    }
}

/// Identifies a binary state (username, avatar descriptor...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StateId(u32);

impl StateId {
    /// Creates a new state id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for StateId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<StateId> for u32 {
    fn from(id: StateId) -> Self {
        id.0
    }
}
