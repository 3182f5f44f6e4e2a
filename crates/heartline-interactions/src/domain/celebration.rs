//! Finale celebration.
//!
//! Tracks what happens after the closing lines: accepting the final question,
//! the hidden note behind repeated background clicks, and the continuous
//! heart rain. Burst geometry lives here; the page picks random origins.

use heartline_core::effects::{ConfettiBurst, Origin};
use heartline_core::engine::InteractionEngine;

use super::events::{EventRecorder, InteractionEvent, InteractionEventKind};

/// Closing lines typed out on the finale.
pub const FINALE_LINES: [&str; 4] = [
    "You are my favorite chapter.",
    "My safest place.",
    "My greatest adventure.",
    "Will you be my Valentine forever?",
];

/// Background clicks that unlock the hidden note.
pub const HIDDEN_NOTE_CLICKS: u32 = 5;

/// Follow-up bursts fired after acceptance.
pub const STAGGERED_BURSTS: u32 = 5;

/// Spacing between follow-up bursts.
pub const STAGGER_MS: u64 = 220;

/// Interval between heart-rain bursts.
pub const HEART_RAIN_INTERVAL_MS: u64 = 260;

const HEART_RAIN_COLORS: [&str; 3] = ["#ff6f91", "#ffd8e6", "#f6c90e"];

/// Finale celebration state.
#[derive(Debug)]
pub struct Celebration {
    accepted_count: u32,
    background_clicks: u32,
    hidden_note_revealed: bool,
    pending_bursts: Vec<(u32, u64)>,
    rain_active: bool,
    rain_elapsed_ms: u64,
    recorder: EventRecorder,
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

impl Celebration {
    /// Creates the celebration with heart rain running.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accepted_count: 0,
            background_clicks: 0,
            hidden_note_revealed: false,
            pending_bursts: Vec::new(),
            rain_active: true,
            rain_elapsed_ms: 0,
            recorder: EventRecorder::new(),
        }
    }

    /// One of the "yes" buttons was pressed. Every press celebrates again.
    pub fn accept(&mut self) {
        self.accepted_count += 1;
        tracing::info!(accepted_count = self.accepted_count, "final question accepted");
        self.recorder.record(InteractionEventKind::Accepted);

        let now = self.recorder.page_time_ms();
        self.pending_bursts
            .extend((0..STAGGERED_BURSTS).map(|i| (i, now + u64::from(i) * STAGGER_MS)));
        self.fire_due_bursts();
    }

    /// A click on the background, outside any button.
    pub fn background_click(&mut self) {
        self.background_clicks += 1;
        if self.background_clicks == HIDDEN_NOTE_CLICKS {
            self.hidden_note_revealed = true;
            self.recorder.record(InteractionEventKind::HiddenNoteRevealed);
        }
    }

    /// Stops the heart rain; called on page teardown.
    pub fn stop_rain(&mut self) {
        self.rain_active = false;
    }

    #[must_use]
    pub fn accepted_count(&self) -> u32 {
        self.accepted_count
    }

    #[must_use]
    pub fn hidden_note_revealed(&self) -> bool {
        self.hidden_note_revealed
    }

    fn fire_due_bursts(&mut self) {
        let now = self.recorder.page_time_ms();
        let mut due: Vec<u32> = Vec::new();
        self.pending_bursts.retain(|(index, at)| {
            if *at <= now {
                due.push(*index);
                false
            } else {
                true
            }
        });
        for index in due {
            self.recorder
                .record(InteractionEventKind::StaggeredBurstDue { index });
        }
    }
}

/// The large burst fired the moment the question is accepted.
#[must_use]
pub fn acceptance_burst() -> ConfettiBurst {
    ConfettiBurst::new(250, 120.0, Origin { x: None, y: 0.62 })
}

/// Follow-up burst `index` from the top edge at `origin_x`.
#[must_use]
pub fn staggered_burst(index: u32, origin_x: f64) -> ConfettiBurst {
    let mut burst = ConfettiBurst::new(
        55,
        70.0,
        Origin {
            x: Some(origin_x),
            y: 0.0,
        },
    );
    burst.angle = Some(60.0 + 15.0 * f64::from(index));
    burst
}

/// A small heart-rain burst just above the top edge at `origin_x`.
#[must_use]
pub fn heart_rain_burst(origin_x: f64) -> ConfettiBurst {
    let mut burst = ConfettiBurst::new(
        2,
        34.0,
        Origin {
            x: Some(origin_x),
            y: -0.1,
        },
    );
    burst.start_velocity = Some(12.0);
    burst.ticks = Some(300);
    burst.colors = HEART_RAIN_COLORS.to_vec();
    burst
}

impl InteractionEngine for Celebration {
    type Event = InteractionEvent;

    fn engine_name(&self) -> &'static str {
        "celebration"
    }

    fn advance(&mut self, elapsed_ms: u64) {
        self.recorder.tick(elapsed_ms);
        self.fire_due_bursts();

        if self.rain_active {
            self.rain_elapsed_ms += elapsed_ms;
            while self.rain_elapsed_ms >= HEART_RAIN_INTERVAL_MS {
                self.rain_elapsed_ms -= HEART_RAIN_INTERVAL_MS;
                self.recorder.record(InteractionEventKind::HeartRainDue);
            }
        }
    }

    fn is_settled(&self) -> bool {
        !self.rain_active && self.pending_bursts.is_empty()
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        self.recorder.events()
    }

    fn clear_uncommitted_events(&mut self) {
        self.recorder.clear();
    }
}
