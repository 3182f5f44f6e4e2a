//! Domain events for the interactions context.

use heartline_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

/// Event payload variants for the interactions context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractionEventKind {
    /// A typewriter line finished revealing.
    LineCompleted { line_index: usize },
    /// The continue control may be shown.
    ContinueEnabled,
    /// A non-destiny target was activated.
    TargetMissed { index: usize, wrong_attempts: u32 },
    /// The transient "wrong" flag on a target expired.
    WrongFlagCleared { index: usize },
    /// A transient hint should be displayed.
    HintShown { message: String },
    /// The target game resolved; `forced` when the attempt limit was hit.
    GameResolved { forced: bool },
    /// The hold gesture began.
    HoldStarted,
    /// The auxiliary hold text should be visible.
    AuxTextRevealed,
    /// The hold was released early and the meter reset.
    HoldReset,
    /// The hold reached full progress.
    HoldCompleted,
    /// The engine asks the page to continue to the next scene.
    ContinueRequested,
    /// The final question was accepted.
    Accepted,
    /// One of the staggered confetti bursts after acceptance is due.
    StaggeredBurstDue { index: u32 },
    /// The hidden note was unlocked.
    HiddenNoteRevealed,
    /// A heart-rain burst is due.
    HeartRainDue,
    /// A failed memory image was swapped for the placeholder.
    ImageFallbackApplied { index: usize },
}

/// Domain event envelope for the interactions context.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: InteractionEventKind,
}

fn type_name(kind: &InteractionEventKind) -> &'static str {
    match kind {
        InteractionEventKind::LineCompleted { .. } => "interaction.line_completed",
        InteractionEventKind::ContinueEnabled => "interaction.continue_enabled",
        InteractionEventKind::TargetMissed { .. } => "interaction.target_missed",
        InteractionEventKind::WrongFlagCleared { .. } => "interaction.wrong_flag_cleared",
        InteractionEventKind::HintShown { .. } => "interaction.hint_shown",
        InteractionEventKind::GameResolved { .. } => "interaction.game_resolved",
        InteractionEventKind::HoldStarted => "interaction.hold_started",
        InteractionEventKind::AuxTextRevealed => "interaction.aux_text_revealed",
        InteractionEventKind::HoldReset => "interaction.hold_reset",
        InteractionEventKind::HoldCompleted => "interaction.hold_completed",
        InteractionEventKind::ContinueRequested => "interaction.continue_requested",
        InteractionEventKind::Accepted => "interaction.accepted",
        InteractionEventKind::StaggeredBurstDue { .. } => "interaction.staggered_burst_due",
        InteractionEventKind::HiddenNoteRevealed => "interaction.hidden_note_revealed",
        InteractionEventKind::HeartRainDue => "interaction.heart_rain_due",
        InteractionEventKind::ImageFallbackApplied { .. } => "interaction.image_fallback_applied",
    }
}

impl DomainEvent for InteractionEvent {
    fn event_type(&self) -> &'static str {
        type_name(&self.kind)
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

/// Stamps and buffers events for one engine.
#[derive(Debug)]
pub(crate) struct EventRecorder {
    next_sequence: u64,
    page_time_ms: u64,
    events: Vec<InteractionEvent>,
}

impl EventRecorder {
    pub(crate) fn new() -> Self {
        Self {
            next_sequence: 1,
            page_time_ms: 0,
            events: Vec::new(),
        }
    }

    pub(crate) fn tick(&mut self, elapsed_ms: u64) {
        self.page_time_ms += elapsed_ms;
    }

    pub(crate) fn page_time_ms(&self) -> u64 {
        self.page_time_ms
    }

    pub(crate) fn record(&mut self, kind: InteractionEventKind) {
        tracing::debug!(
            event_type = type_name(&kind),
            page_time_ms = self.page_time_ms,
            "interaction event"
        );
        self.events.push(InteractionEvent {
            metadata: EventMetadata {
                event_type: type_name(&kind).to_owned(),
                sequence_number: self.next_sequence,
                page_time_ms: self.page_time_ms,
            },
            kind,
        });
        self.next_sequence += 1;
    }

    pub(crate) fn events(&self) -> &[InteractionEvent] {
        &self.events
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
pub(crate) fn kinds(events: &[InteractionEvent]) -> Vec<InteractionEventKind> {
    events.iter().map(|e| e.kind.clone()).collect()
}
