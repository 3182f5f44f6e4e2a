//! Domain event abstractions.
//!
//! Engines never call collaborators directly. They record events, and the
//! page layer drains and applies them to the surface and effects.

use serde::{Deserialize, Serialize};

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Type name for logging and routing.
    pub event_type: String,
    /// Monotonically increasing position within the producing engine.
    pub sequence_number: u64,
    /// Engine-local time (milliseconds since the engine started) at which
    /// the event was produced.
    pub page_time_ms: u64,
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;
}
