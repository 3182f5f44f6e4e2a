//! Domain events for the narrative context.

use heartline_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::scene::Scene;

/// Event payload variants for the narrative context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationEventKind {
    /// The page started fading in from opaque.
    RevealStarted,
    /// Audio state was flushed and the fade-out began.
    TransitionStarted { target: Scene },
    /// The page handed off to `target`.
    LocationChanged { target: Scene },
}

/// Domain event envelope for the narrative context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: NavigationEventKind,
}

impl NavigationEvent {
    pub(crate) fn type_name(kind: &NavigationEventKind) -> &'static str {
        match kind {
            NavigationEventKind::RevealStarted => "narrative.reveal_started",
            NavigationEventKind::TransitionStarted { .. } => "narrative.transition_started",
            NavigationEventKind::LocationChanged { .. } => "narrative.location_changed",
        }
    }
}

impl DomainEvent for NavigationEvent {
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
