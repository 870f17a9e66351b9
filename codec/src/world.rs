//! Authoritative component and state arrays handed to publishers.

use std::collections::BTreeMap;

use wire::{ComponentId, StateId};

use crate::error::CodecResult;
use crate::track::{check_len, slot, ComponentTrack};

/// Blobs of one state, one entry per user index.
pub type StateSlots = Vec<Option<Vec<u8>>>;

/// The current value of everything a server synchronizes.
///
/// Every component and state holds exactly `indices_count` slots. Component
/// deltas follow value updates, so a checkout built from the world carries
/// each participant's current rate of change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct World {
    indices_count: u32,
    components: BTreeMap<ComponentId, ComponentTrack>,
    states: BTreeMap<StateId, StateSlots>,
}

impl World {
    #[must_use]
    pub const fn new(indices_count: u32) -> Self {
        Self {
            indices_count,
            components: BTreeMap::new(),
            states: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn indices_count(&self) -> u32 {
        self.indices_count
    }

    fn slots(&self) -> usize {
        self.indices_count as usize
    }

    /// Grows or shrinks every array; new slots start at rest at zero.
    pub fn set_indices_count(&mut self, indices_count: u32) {
        self.indices_count = indices_count;
        let len = self.slots();
        for track in self.components.values_mut() {
            track.resize(len);
        }
        for slots in self.states.values_mut() {
            slots.resize(len, None);
        }
    }

    /// Replaces a component's values; deltas become the change from the
    /// previous values.
    pub fn set_component(&mut self, id: ComponentId, values: &[i64]) -> CodecResult<()> {
        check_len("component values", self.slots(), values.len())?;
        let len = self.slots();
        self.components
            .entry(id)
            .or_insert_with(|| ComponentTrack::zeroed(len))
            .advance_to(values)?;
        Ok(())
    }

    /// Replaces one state blob. Empty blobs are stored as absent.
    pub fn set_state(&mut self, id: StateId, index: u32, value: Option<Vec<u8>>) -> CodecResult<()> {
        let position = slot(index, self.slots())?;
        let len = self.slots();
        let slots = self.states.entry(id).or_insert_with(|| vec![None; len]);
        slots[position] = value.filter(|blob| !blob.is_empty());
        Ok(())
    }

    /// Clears a departed participant's slot in every array.
    pub fn clear_index(&mut self, index: u32) -> CodecResult<()> {
        let position = slot(index, self.slots())?;
        for track in self.components.values_mut() {
            track.reset(position);
        }
        for slots in self.states.values_mut() {
            slots[position] = None;
        }
        Ok(())
    }

    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&ComponentTrack> {
        self.components.get(&id)
    }

    #[must_use]
    pub fn state(&self, id: StateId) -> Option<&[Option<Vec<u8>>]> {
        self.states.get(&id).map(Vec::as_slice)
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &ComponentTrack)> {
        self.components.iter().map(|(&id, track)| (id, track))
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &[Option<Vec<u8>>])> {
        self.states.iter().map(|(&id, slots)| (id, slots.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn set_component_tracks_deltas() {
        let mut world = World::new(2);
        let id = ComponentId::new(1);
        world.set_component(id, &[10, 20]).unwrap();
        world.set_component(id, &[13, 20]).unwrap();
        let track = world.component(id).unwrap();
        assert_eq!(track.values(), &[13, 20]);
        assert_eq!(track.deltas(), &[3, 0]);
    }

    #[test]
    fn set_component_rejects_wrong_length() {
        let mut world = World::new(2);
        let err = world.set_component(ComponentId::new(1), &[1]).unwrap_err();
        assert!(matches!(err, CodecError::LengthMismatch { .. }));
    }

    #[test]
    fn empty_state_blob_is_absent() {
        let mut world = World::new(1);
        world
            .set_state(StateId::new(1), 0, Some(Vec::new()))
            .unwrap();
        assert_eq!(world.state(StateId::new(1)).unwrap(), &[None]);
    }

    #[test]
    fn growth_and_clear() {
        let mut world = World::new(1);
        world.set_component(ComponentId::new(1), &[7]).unwrap();
        world
            .set_state(StateId::new(2), 0, Some(b"dave".to_vec()))
            .unwrap();
        world.set_indices_count(2);
        assert_eq!(world.component(ComponentId::new(1)).unwrap().values(), &[7, 0]);
        world.clear_index(0).unwrap();
        assert_eq!(world.component(ComponentId::new(1)).unwrap().values(), &[0, 0]);
        assert_eq!(world.state(StateId::new(2)).unwrap(), &[None, None]);
        assert!(world.clear_index(2).is_err());
    }
}
