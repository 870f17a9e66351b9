//! Configurable limits for bounded decoding.

use crate::error::{DecodeError, LimitKind, WireResult};

/// Wire-level limits for message decoding.
///
/// These limits are enforced during decoding to prevent resource exhaustion
/// and ensure bounded memory usage. Every count read from the wire is checked
/// before anything is allocated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Maximum size of one received buffer in bytes.
    pub max_buffer_bytes: usize,

    /// Maximum number of messages in one buffer.
    pub max_messages: usize,

    /// Maximum `indices_count`, removed-index count or state-update count.
    pub max_indices: usize,

    /// Maximum number of component or state entries in one message.
    pub max_entries: usize,

    /// Maximum length of a string field in bytes.
    pub max_string_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // A full checkout of a busy room stays well below this.
            max_buffer_bytes: 1024 * 1024,
            max_messages: 1024,
            max_indices: 16 * 1024,
            max_entries: 256,
            max_string_bytes: 64 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_buffer_bytes: 4096,
            max_messages: 16,
            max_indices: 64,
            max_entries: 16,
            max_string_bytes: 256,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_buffer_bytes: usize::MAX,
            max_messages: usize::MAX,
            max_indices: usize::MAX,
            max_entries: usize::MAX,
            max_string_bytes: usize::MAX,
        }
    }

    pub(crate) fn check(&self, kind: LimitKind, actual: usize) -> WireResult<()> {
        let limit = match kind {
            LimitKind::BufferBytes => self.max_buffer_bytes,
            LimitKind::MessageCount => self.max_messages,
            LimitKind::IndicesCount => self.max_indices,
            LimitKind::EntryCount => self.max_entries,
            LimitKind::StringBytes => self.max_string_bytes,
        };
        if actual > limit {
            return Err(DecodeError::LimitsExceeded {
                kind,
                limit,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = Limits::default();
        assert!(limits.max_buffer_bytes >= 64 * 1024);
        assert!(limits.max_indices >= 1024);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = Limits::for_testing();
        let default_limits = Limits::default();

        assert!(test_limits.max_buffer_bytes < default_limits.max_buffer_bytes);
        assert!(test_limits.max_messages < default_limits.max_messages);
        assert!(test_limits.max_indices < default_limits.max_indices);
        assert!(test_limits.max_entries < default_limits.max_entries);
        assert!(test_limits.max_string_bytes < default_limits.max_string_bytes);
    }

    #[test]
    fn unlimited_limits() {
        let limits = Limits::unlimited();
        assert_eq!(limits.max_buffer_bytes, usize::MAX);
        assert_eq!(limits.max_indices, usize::MAX);
    }

    #[test]
    fn check_reports_kind_and_values() {
        let limits = Limits::for_testing();
        assert!(limits.check(LimitKind::EntryCount, 16).is_ok());
        let err = limits.check(LimitKind::EntryCount, 17).unwrap_err();
        assert_eq!(
            err,
            DecodeError::LimitsExceeded {
                kind: LimitKind::EntryCount,
                limit: 16,
                actual: 17,
            }
        );
    }

    #[test]
    fn limits_const_constructible() {
        const LIMITS: Limits = Limits::for_testing();
        assert_eq!(LIMITS.max_buffer_bytes, 4096);
    }
}
