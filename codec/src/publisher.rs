//! Sender side of the delta-delta protocol.

use std::collections::BTreeMap;

use log::debug;
use wire::{
    CheckoutComponent, CheckoutState, ComponentId, InitialCheckout, StateId, StateUpdate, Tick,
    TickComponent, TickState,
};

use crate::error::{CodecError, CodecResult};
use crate::track::{slot, ComponentTrack};
use crate::world::{StateSlots, World};

/// What one peer has been sent so far.
///
/// Each peer gets its own publisher. After [`Publisher::initial_checkout`]
/// it mirrors exactly the state the peer's [`crate::Replica`] reconstructs,
/// and [`Publisher::tick`] emits the difference between that mirror and the
/// current [`World`].
#[derive(Debug, Clone, Default)]
pub struct Publisher {
    checked_out: bool,
    indices_count: u32,
    components: BTreeMap<ComponentId, ComponentTrack>,
    states: BTreeMap<StateId, StateSlots>,
}

impl Publisher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a checkout has been produced.
    #[must_use]
    pub const fn is_checked_out(&self) -> bool {
        self.checked_out
    }

    /// Builds the full snapshot of `world` and makes it the baseline.
    ///
    /// Calling this again restarts the peer from scratch.
    pub fn initial_checkout(&mut self, server_time: u64, world: &World) -> InitialCheckout {
        self.indices_count = world.indices_count();
        self.components = world
            .components()
            .map(|(id, track)| (id, track.clone()))
            .collect();
        self.states = world
            .states()
            .map(|(id, slots)| (id, slots.to_vec()))
            .collect();
        self.checked_out = true;
        debug!(
            "checkout at {server_time}: {} indices, {} components, {} states",
            self.indices_count,
            self.components.len(),
            self.states.len()
        );

        InitialCheckout {
            server_time,
            indices_count: self.indices_count,
            components: self
                .components
                .iter()
                .map(|(&id, track)| CheckoutComponent {
                    id,
                    values: track.values().to_vec(),
                    deltas: track.deltas().to_vec(),
                })
                .collect(),
            states: self
                .states
                .iter()
                .map(|(&id, slots)| CheckoutState {
                    id,
                    values: slots.clone(),
                })
                .collect(),
        }
    }

    /// Builds the next tick towards `world`.
    ///
    /// `removed` lists indices whose participant left since the previous
    /// tick; they are reset to zero before the world is diffed, as the
    /// replica does. Every known component is sent; states only carry the
    /// slots whose blob changed.
    pub fn tick(&mut self, server_time: u64, removed: &[u32], world: &World) -> CodecResult<Tick> {
        if !self.checked_out {
            return Err(CodecError::NoCheckout);
        }
        let previous = self.indices_count as usize;
        for &index in removed {
            slot(index, previous)?;
        }

        for &index in removed {
            let position = index as usize;
            for track in self.components.values_mut() {
                track.reset(position);
            }
            for slots in self.states.values_mut() {
                slots[position] = None;
            }
        }

        self.indices_count = world.indices_count();
        let len = self.indices_count as usize;
        for track in self.components.values_mut() {
            track.resize(len);
        }
        for slots in self.states.values_mut() {
            slots.resize(len, None);
        }

        let mut components = Vec::with_capacity(self.components.len());
        for (id, current) in world.components() {
            let sent = self
                .components
                .entry(id)
                .or_insert_with(|| ComponentTrack::zeroed(len));
            let delta_deltas = sent.advance_to(current.values())?;
            components.push(TickComponent { id, delta_deltas });
        }

        let mut states = Vec::new();
        for (id, current) in world.states() {
            let sent = self.states.entry(id).or_insert_with(|| vec![None; len]);
            let mut updates = Vec::new();
            for (index, (sent_value, value)) in sent.iter_mut().zip(current).enumerate() {
                if sent_value != value {
                    sent_value.clone_from(value);
                    updates.push(StateUpdate {
                        index: index as u32,
                        value: value.clone(),
                    });
                }
            }
            if !updates.is_empty() {
                states.push(TickState { id, updates });
            }
        }

        Ok(Tick {
            server_time,
            removed_indices: removed.to_vec(),
            indices_count: self.indices_count,
            components,
            states,
        })
    }
}
