//! Domain events for the audio session context.

use heartline_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event payload variants for the audio session context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioEventKind {
    /// The session was initialized for a page.
    SessionStarted {
        cold_start: bool,
        muted: bool,
        desired_start_seconds: f64,
    },
    /// The one-time start seek was applied.
    SeekApplied { seconds: f64 },
    /// The host refused to start playback.
    PlaybackRejected { reason: String },
    /// The user flipped the mute toggle.
    MuteToggled { muted: bool },
    /// The audio asset failed to load; playback is unavailable for this page.
    AssetUnavailable { asset_path: String },
}

/// Domain event envelope for the audio session context.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: AudioEventKind,
}

impl AudioEvent {
    pub(crate) fn type_name(kind: &AudioEventKind) -> &'static str {
        match kind {
            AudioEventKind::SessionStarted { .. } => "audio.session_started",
            AudioEventKind::SeekApplied { .. } => "audio.seek_applied",
            AudioEventKind::PlaybackRejected { .. } => "audio.playback_rejected",
            AudioEventKind::MuteToggled { .. } => "audio.mute_toggled",
            AudioEventKind::AssetUnavailable { .. } => "audio.asset_unavailable",
        }
    }
}

impl DomainEvent for AudioEvent {
    fn event_type(&self) -> &'static str {
        Self::type_name(&self.kind)
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
