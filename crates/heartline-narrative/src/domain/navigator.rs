//! Scene navigator.
//!
//! Hands the page off to the next scene. The audio flush always runs before
//! the location changes; with a transition surface the change waits for the
//! fade-out to finish.

use heartline_core::engine::InteractionEngine;
use heartline_core::event::EventMetadata;

use super::events::{NavigationEvent, NavigationEventKind};
use super::scene::Scene;

/// Duration of the fade-to-opaque before leaving a page.
pub const FADE_OUT_MS: u64 = 800;

/// Duration of the fade-in when a page loads.
pub const REVEAL_IN_MS: u64 = 900;

/// Where the navigator is in its hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    FadingOut { target: Scene, elapsed_ms: u64 },
    Departed { target: Scene },
}

/// Page-level navigation state.
#[derive(Debug)]
pub struct SceneNavigator {
    has_transition_surface: bool,
    phase: NavigationPhase,
    reveal_elapsed_ms: Option<u64>,
    page_time_ms: u64,
    next_sequence: u64,
    uncommitted_events: Vec<NavigationEvent>,
}

impl SceneNavigator {
    /// Creates the navigator for a freshly loaded page. With a transition
    /// surface the page starts opaque and fades in.
    #[must_use]
    pub fn new(has_transition_surface: bool) -> Self {
        let mut navigator = Self {
            has_transition_surface,
            phase: NavigationPhase::Idle,
            reveal_elapsed_ms: None,
            page_time_ms: 0,
            next_sequence: 1,
            uncommitted_events: Vec::new(),
        };
        if has_transition_surface {
            navigator.reveal_elapsed_ms = Some(0);
            navigator.record(NavigationEventKind::RevealStarted);
        }
        navigator
    }

    /// Starts the hand-off to `target`, calling `flush` first.
    ///
    /// Returns `false` without calling `flush` if a hand-off is already under
    /// way.
    pub fn navigate<F>(&mut self, target: Scene, flush: F) -> bool
    where
        F: FnOnce(),
    {
        if self.phase != NavigationPhase::Idle {
            tracing::debug!(%target, "navigation already in progress");
            return false;
        }

        flush();

        if self.has_transition_surface {
            self.phase = NavigationPhase::FadingOut {
                target,
                elapsed_ms: 0,
            };
            self.record(NavigationEventKind::TransitionStarted { target });
        } else {
            self.depart(target);
        }
        true
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> NavigationPhase {
        self.phase
    }

    /// Returns the scene the page handed off to, if it has.
    #[must_use]
    pub fn departed_to(&self) -> Option<Scene> {
        match self.phase {
            NavigationPhase::Departed { target } => Some(target),
            _ => None,
        }
    }

    /// Opacity of the transition overlay in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn overlay_opacity(&self) -> f64 {
        match self.phase {
            NavigationPhase::FadingOut { elapsed_ms, .. } => {
                (elapsed_ms as f64 / FADE_OUT_MS as f64).min(1.0)
            }
            NavigationPhase::Departed { .. } => 1.0,
            NavigationPhase::Idle => self.reveal_elapsed_ms.map_or(0.0, |elapsed| {
                1.0 - (elapsed as f64 / REVEAL_IN_MS as f64).min(1.0)
            }),
        }
    }

    fn depart(&mut self, target: Scene) {
        self.phase = NavigationPhase::Departed { target };
        tracing::info!(%target, page = target.page(), "location changed");
        self.record(NavigationEventKind::LocationChanged { target });
    }

    fn record(&mut self, kind: NavigationEventKind) {
        let event = NavigationEvent {
            metadata: EventMetadata {
                event_type: NavigationEvent::type_name(&kind).to_owned(),
                sequence_number: self.next_sequence,
                page_time_ms: self.page_time_ms,
            },
            kind,
        };
        self.next_sequence += 1;
        self.uncommitted_events.push(event);
    }
}

impl InteractionEngine for SceneNavigator {
    type Event = NavigationEvent;

    fn engine_name(&self) -> &'static str {
        "navigator"
    }

    fn advance(&mut self, elapsed_ms: u64) {
        self.page_time_ms += elapsed_ms;

        if let Some(reveal) = self.reveal_elapsed_ms.as_mut() {
            *reveal = (*reveal + elapsed_ms).min(REVEAL_IN_MS);
        }

        if let NavigationPhase::FadingOut { target, elapsed_ms: fade } = self.phase {
            let fade = fade + elapsed_ms;
            if fade >= FADE_OUT_MS {
                self.depart(target);
            } else {
                self.phase = NavigationPhase::FadingOut {
                    target,
                    elapsed_ms: fade,
                };
            }
        }
    }

    fn is_settled(&self) -> bool {
        let revealed = self.reveal_elapsed_ms.is_none_or(|e| e >= REVEAL_IN_MS);
        revealed && !matches!(self.phase, NavigationPhase::FadingOut { .. })
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
