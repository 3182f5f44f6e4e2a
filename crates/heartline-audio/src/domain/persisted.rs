//! Persisted audio state and its string encoding.

use heartline_core::error::DomainError;
use heartline_core::store::{KeyValueStore, StoreKey};

/// Audio state as read back from the durable store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersistedAudioState {
    /// Whether music is muted. Defaults to `true` on a first-ever visit.
    pub muted: bool,
    /// Last recorded playback offset in seconds, `>= 0`.
    pub position_seconds: f64,
    /// Epoch milliseconds at which the offset was recorded; `0` is unknown.
    pub position_timestamp_ms: i64,
    /// Whether audio was playing when the offset was recorded.
    pub was_playing: bool,
}

impl Default for PersistedAudioState {
    fn default() -> Self {
        Self {
            muted: true,
            position_seconds: 0.0,
            position_timestamp_ms: 0,
            was_playing: false,
        }
    }
}

impl PersistedAudioState {
    /// Decodes raw store values. Values that are missing, non-numeric or out
    /// of range decode to their defaults.
    #[must_use]
    pub fn decode(
        muted: Option<&str>,
        position: Option<&str>,
        timestamp: Option<&str>,
        playing: Option<&str>,
    ) -> Self {
        Self {
            muted: muted.is_none_or(|raw| raw == "1"),
            position_seconds: parse_position(position),
            position_timestamp_ms: parse_timestamp(timestamp),
            was_playing: playing == Some("1"),
        }
    }

    /// Reads the state from `store`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` if any key cannot be read.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, DomainError> {
        let muted = store.get(StoreKey::Muted)?;
        let position = store.get(StoreKey::PositionSeconds)?;
        let timestamp = store.get(StoreKey::PositionTimestampMs)?;
        let playing = store.get(StoreKey::WasPlaying)?;
        Ok(Self::decode(
            muted.as_deref(),
            position.as_deref(),
            timestamp.as_deref(),
            playing.as_deref(),
        ))
    }
}

/// A position sample about to be written to the durable store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSnapshot {
    pub position_seconds: f64,
    pub timestamp_ms: i64,
    pub playing: bool,
}

impl PositionSnapshot {
    /// Writes all three position keys.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Store` on the first failed write.
    pub fn write(&self, store: &dyn KeyValueStore) -> Result<(), DomainError> {
        let position = if self.position_seconds.is_finite() {
            self.position_seconds
        } else {
            0.0
        };
        store.set(StoreKey::PositionSeconds, &position.to_string())?;
        store.set(StoreKey::PositionTimestampMs, &self.timestamp_ms.to_string())?;
        store.set(StoreKey::WasPlaying, encode_flag(self.playing))
    }
}

/// Encodes a boolean the way every flag key stores it.
#[must_use]
pub fn encode_flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_position(raw: Option<&str>) -> f64 {
    parse_number(raw).filter(|v| *v >= 0.0).unwrap_or(0.0)
}

#[allow(clippy::cast_possible_truncation)]
fn parse_timestamp(raw: Option<&str>) -> i64 {
    parse_number(raw)
        .filter(|v| *v > 0.0 && *v < 9.0e15)
        .map_or(0, |v| v as i64)
}
