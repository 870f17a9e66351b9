//! Two-stage integration of component values.
//!
//! A receiver holds `value` and `delta` per slot. Each tick carries a
//! delta-delta, applied as `delta += dd` then `value += delta`. All
//! arithmetic wraps, so reconstruction is exact for every `i64` input.

/// Applies one delta-delta, returning the new `(value, delta)`.
#[must_use]
pub const fn integrate_step(value: i64, delta: i64, delta_delta: i64) -> (i64, i64) {
    let delta = delta.wrapping_add(delta_delta);
    (value.wrapping_add(delta), delta)
}

/// Inverse of [`integrate_step`]: the `(delta, delta_delta)` that takes a
/// slot holding `(value, delta)` to `next_value`.
#[must_use]
pub const fn difference_step(value: i64, delta: i64, next_value: i64) -> (i64, i64) {
    let next_delta = next_value.wrapping_sub(value);
    (next_delta, next_delta.wrapping_sub(delta))
}

/// Second differences of a value series that starts at rest.
///
/// `series[0]` is the checkout value (with a zero delta); the result has one
/// delta-delta per following sample.
#[must_use]
pub fn second_differences(series: &[i64]) -> Vec<i64> {
    let Some((&first, rest)) = series.split_first() else {
        return Vec::new();
    };
    let mut value = first;
    let mut delta = 0;
    rest.iter()
        .map(|&next| {
            let (next_delta, delta_delta) = difference_step(value, delta, next);
            value = next;
            delta = next_delta;
            delta_delta
        })
        .collect()
}

/// Rebuilds the series produced by [`second_differences`].
#[must_use]
pub fn integrate(first: i64, delta_deltas: &[i64]) -> Vec<i64> {
    let mut series = Vec::with_capacity(delta_deltas.len() + 1);
    series.push(first);
    let mut value = first;
    let mut delta = 0;
    for &delta_delta in delta_deltas {
        (value, delta) = integrate_step(value, delta, delta_delta);
        series.push(value);
    }
    series
}
