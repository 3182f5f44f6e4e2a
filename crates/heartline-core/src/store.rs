//! Key/value persistence abstraction.
//!
//! Two stores are in play during a page's life: a durable one that survives
//! navigation and process restarts, and a volatile one that only lives as
//! long as the browsing session.

use crate::error::DomainError;

/// The fixed set of keys the scene engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Whether background music is muted (`"1"` / `"0"`).
    Muted,
    /// Last recorded playback offset in seconds.
    PositionSeconds,
    /// Wall-clock time (epoch ms) at which the offset was recorded.
    PositionTimestampMs,
    /// Whether audio was playing when the offset was recorded.
    WasPlaying,
    /// Present once the current browsing session has loaded a page.
    SessionMarker,
}

impl StoreKey {
    /// Keys that hold position data and are cleared on a cold start.
    pub const POSITION_KEYS: [StoreKey; 3] = [
        StoreKey::PositionSeconds,
        StoreKey::PositionTimestampMs,
        StoreKey::WasPlaying,
    ];

    /// Returns the string key used by the backing store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Muted => "heartline_music_muted",
            Self::PositionSeconds => "heartline_music_time",
            Self::PositionTimestampMs => "heartline_music_stamp",
            Self::WasPlaying => "heartline_music_playing",
            Self::SessionMarker => "heartline_music_session",
        }
    }

    /// Returns `true` for keys that belong in the durable store.
    #[must_use]
    pub fn is_durable(self) -> bool {
        !matches!(self, Self::SessionMarker)
    }
}

/// Synchronous string key/value store.
///
/// Only single-key atomicity is expected. Writers from different pages are
/// not coordinated; the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` if the backing medium cannot be read.
    fn get(&self, key: StoreKey) -> Result<Option<String>, DomainError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` if the backing medium cannot be written.
    fn set(&self, key: StoreKey, value: &str) -> Result<(), DomainError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` if the backing medium cannot be written.
    fn remove(&self, key: StoreKey) -> Result<(), DomainError>;
}

/// The pair of stores a page works against.
#[derive(Clone, Copy)]
pub struct Stores<'a> {
    /// Survives navigation and restarts.
    pub durable: &'a dyn KeyValueStore,
    /// Cleared when the browsing session ends.
    pub session: &'a dyn KeyValueStore,
}

impl std::fmt::Debug for Stores<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_session_marker_is_volatile() {
        assert!(StoreKey::Muted.is_durable());
        assert!(StoreKey::PositionSeconds.is_durable());
        assert!(StoreKey::PositionTimestampMs.is_durable());
        assert!(StoreKey::WasPlaying.is_durable());
        assert!(!StoreKey::SessionMarker.is_durable());
    }

    #[test]
    fn test_position_keys_do_not_include_mute_flag() {
        assert!(!StoreKey::POSITION_KEYS.contains(&StoreKey::Muted));
        assert_eq!(StoreKey::POSITION_KEYS.len(), 3);
    }
}
