//! Per-component slot arrays shared by the publisher and the replica.

use crate::error::{CodecError, CodecResult};
use crate::integrate::{difference_step, integrate_step};

/// Values and first-order deltas of one component, one entry per user index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentTrack {
    values: Vec<i64>,
    deltas: Vec<i64>,
}

impl ComponentTrack {
    /// Creates a track of `len` slots at rest at zero.
    #[must_use]
    pub fn zeroed(len: usize) -> Self {
        Self {
            values: vec![0; len],
            deltas: vec![0; len],
        }
    }

    /// Creates a track from checkout arrays.
    pub fn from_checkout(values: Vec<i64>, deltas: Vec<i64>) -> CodecResult<Self> {
        check_len("component deltas", values.len(), deltas.len())?;
        Ok(Self { values, deltas })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[must_use]
    pub fn deltas(&self) -> &[i64] {
        &self.deltas
    }

    /// Grows with zeroed slots or truncates to `len`.
    pub fn resize(&mut self, len: usize) {
        self.values.resize(len, 0);
        self.deltas.resize(len, 0);
    }

    /// Returns slot `index` to rest at zero.
    pub(crate) fn reset(&mut self, index: usize) {
        self.values[index] = 0;
        self.deltas[index] = 0;
    }

    /// Applies one delta-delta per slot.
    pub fn integrate(&mut self, delta_deltas: &[i64]) -> CodecResult<()> {
        check_len("tick delta-deltas", self.len(), delta_deltas.len())?;
        for ((value, delta), &delta_delta) in self
            .values
            .iter_mut()
            .zip(self.deltas.iter_mut())
            .zip(delta_deltas)
        {
            (*value, *delta) = integrate_step(*value, *delta, delta_delta);
        }
        Ok(())
    }

    /// Moves every slot to `next` and returns the delta-deltas a receiver
    /// needs to follow.
    pub fn advance_to(&mut self, next: &[i64]) -> CodecResult<Vec<i64>> {
        check_len("component values", self.len(), next.len())?;
        let mut delta_deltas = Vec::with_capacity(next.len());
        for ((value, delta), &next_value) in self
            .values
            .iter_mut()
            .zip(self.deltas.iter_mut())
            .zip(next)
        {
            let (next_delta, delta_delta) = difference_step(*value, *delta, next_value);
            *value = next_value;
            *delta = next_delta;
            delta_deltas.push(delta_delta);
        }
        Ok(delta_deltas)
    }
}

pub(crate) const fn check_len(field: &'static str, expected: usize, actual: usize) -> CodecResult<()> {
    if expected != actual {
        return Err(CodecError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Converts a wire index to a slot position below `count`.
pub(crate) fn slot(index: u32, count: usize) -> CodecResult<usize> {
    let position = index as usize;
    if position >= count {
        return Err(CodecError::IndexOutOfRange { index, count });
    }
    Ok(position)
}
