//! Receiver side of the delta-delta protocol.

use std::collections::BTreeMap;

use log::trace;
use wire::{ComponentId, InitialCheckout, Message, MessageCodec, StateId, Tick};

use crate::error::{CodecError, CodecResult};
use crate::track::{check_len, slot, ComponentTrack};
use crate::world::StateSlots;

/// A peer's reconstruction of the server's arrays.
///
/// Starts empty. An [`InitialCheckout`] installs the baseline; each [`Tick`]
/// then integrates delta-deltas and applies sparse state replacements.
/// Messages are validated in full before anything is mutated, so a rejected
/// message leaves the replica untouched.
#[derive(Debug, Clone, Default)]
pub struct Replica {
    server_time: Option<u64>,
    indices_count: u32,
    components: BTreeMap<ComponentId, ComponentTrack>,
    states: BTreeMap<StateId, StateSlots>,
}

impl Replica {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Server time of the last applied checkout or tick.
    #[must_use]
    pub const fn server_time(&self) -> Option<u64> {
        self.server_time
    }

    #[must_use]
    pub const fn indices_count(&self) -> u32 {
        self.indices_count
    }

    #[must_use]
    pub fn value(&self, component: ComponentId, index: u32) -> Option<i64> {
        self.components
            .get(&component)?
            .values()
            .get(index as usize)
            .copied()
    }

    #[must_use]
    pub fn delta(&self, component: ComponentId, index: u32) -> Option<i64> {
        self.components
            .get(&component)?
            .deltas()
            .get(index as usize)
            .copied()
    }

    #[must_use]
    pub fn state(&self, state: StateId, index: u32) -> Option<&[u8]> {
        self.states.get(&state)?.get(index as usize)?.as_deref()
    }

    #[must_use]
    pub fn component(&self, component: ComponentId) -> Option<&ComponentTrack> {
        self.components.get(&component)
    }

    /// Applies a checkout or tick. Other messages are ignored and reported
    /// as `false`.
    pub fn apply(&mut self, message: &Message) -> CodecResult<bool> {
        match message {
            Message::InitialCheckout(checkout) => self.apply_initial_checkout(checkout)?,
            Message::Tick(tick) => self.apply_tick(tick)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Decodes a received buffer and applies it in order.
    ///
    /// Returns the messages the replica does not consume.
    pub fn receive(&mut self, codec: &MessageCodec, bytes: &[u8]) -> CodecResult<Vec<Message>> {
        let mut rest = Vec::new();
        for message in codec.decode_many(bytes)? {
            if !self.apply(&message)? {
                rest.push(message);
            }
        }
        Ok(rest)
    }

    /// Replaces everything with the checkout's arrays.
    pub fn apply_initial_checkout(&mut self, checkout: &InitialCheckout) -> CodecResult<()> {
        let len = checkout.indices_count as usize;
        for component in &checkout.components {
            check_len("checkout component values", len, component.values.len())?;
            check_len("checkout component deltas", len, component.deltas.len())?;
        }
        for state in &checkout.states {
            check_len("checkout state values", len, state.values.len())?;
        }

        self.components = checkout
            .components
            .iter()
            .map(|component| {
                let track = ComponentTrack::from_checkout(
                    component.values.clone(),
                    component.deltas.clone(),
                )?;
                Ok((component.id, track))
            })
            .collect::<CodecResult<_>>()?;
        self.states = checkout
            .states
            .iter()
            .map(|state| {
                let slots = state
                    .values
                    .iter()
                    .map(|value| value.clone().filter(|blob| !blob.is_empty()))
                    .collect();
                (state.id, slots)
            })
            .collect();
        self.indices_count = checkout.indices_count;
        self.server_time = Some(checkout.server_time);
        trace!(
            "checkout applied at {}: {} indices",
            checkout.server_time,
            self.indices_count
        );
        Ok(())
    }

    /// Integrates one tick.
    pub fn apply_tick(&mut self, tick: &Tick) -> CodecResult<()> {
        if self.server_time.is_none() {
            return Err(CodecError::NoCheckout);
        }
        let previous = self.indices_count as usize;
        let len = tick.indices_count as usize;
        for &index in &tick.removed_indices {
            slot(index, previous)?;
        }
        for component in &tick.components {
            check_len("tick delta-deltas", len, component.delta_deltas.len())?;
        }
        for state in &tick.states {
            for update in &state.updates {
                slot(update.index, len)?;
            }
        }

        for &index in &tick.removed_indices {
            let position = index as usize;
            for track in self.components.values_mut() {
                track.reset(position);
            }
            for slots in self.states.values_mut() {
                slots[position] = None;
            }
        }
        for track in self.components.values_mut() {
            track.resize(len);
        }
        for slots in self.states.values_mut() {
            slots.resize(len, None);
        }

        for component in &tick.components {
            self.components
                .entry(component.id)
                .or_insert_with(|| ComponentTrack::zeroed(len))
                .integrate(&component.delta_deltas)?;
        }
        for state in &tick.states {
            let slots = self
                .states
                .entry(state.id)
                .or_insert_with(|| vec![None; len]);
            for update in &state.updates {
                slots[update.index as usize] =
                    update.value.clone().filter(|blob| !blob.is_empty());
            }
        }

        self.indices_count = tick.indices_count;
        self.server_time = Some(tick.server_time);
        Ok(())
    }
}
