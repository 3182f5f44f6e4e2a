//! Hold-to-confirm engine.

use heartline_core::engine::InteractionEngine;

use super::events::{EventRecorder, InteractionEvent, InteractionEventKind};

/// Continuous hold required to confirm.
pub const HOLD_DURATION_MS: u64 = 3000;

/// Progress past which the auxiliary text appears.
pub const AUX_TEXT_THRESHOLD: f64 = 0.12;

/// Dimming delay between completion and continuing.
pub const DIM_DELAY_MS: u64 = 550;

/// Duration of the meter's animation back to zero after a release.
pub const METER_RESET_MS: u64 = 450;

/// Where the gesture stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldPhase {
    Idle,
    Holding { elapsed_ms: u64 },
    /// Full progress reached; the page is dimming.
    Completed { dim_elapsed_ms: u64 },
    /// Continue has been requested. Terminal.
    Confirmed,
}

/// Hold-to-confirm state.
#[derive(Debug)]
pub struct HoldToConfirm {
    phase: HoldPhase,
    progress: f64,
    aux_revealed: bool,
    recorder: EventRecorder,
}

impl Default for HoldToConfirm {
    fn default() -> Self {
        Self::new()
    }
}

impl HoldToConfirm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: HoldPhase::Idle,
            progress: 0.0,
            aux_revealed: false,
            recorder: EventRecorder::new(),
        }
    }

    /// Pointer-down: starts (or restarts) the hold from zero.
    pub fn press(&mut self) {
        match self.phase {
            HoldPhase::Idle | HoldPhase::Holding { .. } => {
                self.phase = HoldPhase::Holding { elapsed_ms: 0 };
                self.progress = 0.0;
                self.recorder.record(InteractionEventKind::HoldStarted);
            }
            HoldPhase::Completed { .. } | HoldPhase::Confirmed => {}
        }
    }

    /// Pointer-up, leave or cancel: an unfinished hold resets completely.
    pub fn release(&mut self) {
        if let HoldPhase::Holding { .. } = self.phase {
            self.phase = HoldPhase::Idle;
            self.progress = 0.0;
            tracing::debug!("hold released early");
            self.recorder.record(InteractionEventKind::HoldReset);
        }
    }

    #[must_use]
    pub fn phase(&self) -> HoldPhase {
        self.phase
    }

    /// Progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Meter width in percent.
    #[must_use]
    pub fn meter_percent(&self) -> f64 {
        self.progress * 100.0
    }

    #[must_use]
    pub fn aux_text_revealed(&self) -> bool {
        self.aux_revealed
    }

    /// Returns whether per-frame updates are needed.
    #[must_use]
    pub fn wants_frames(&self) -> bool {
        matches!(self.phase, HoldPhase::Holding { .. })
    }
}

impl InteractionEngine for HoldToConfirm {
    type Event = InteractionEvent;

    fn engine_name(&self) -> &'static str {
        "hold_to_confirm"
    }

    #[allow(clippy::cast_precision_loss)]
    fn advance(&mut self, elapsed_ms: u64) {
        self.recorder.tick(elapsed_ms);
        match self.phase {
            HoldPhase::Holding { elapsed_ms: held } => {
                let held = held + elapsed_ms;
                self.progress = (held as f64 / HOLD_DURATION_MS as f64).clamp(0.0, 1.0);

                if self.progress > AUX_TEXT_THRESHOLD && !self.aux_revealed {
                    self.aux_revealed = true;
                    self.recorder.record(InteractionEventKind::AuxTextRevealed);
                }

                if self.progress >= 1.0 {
                    self.phase = HoldPhase::Completed { dim_elapsed_ms: 0 };
                    tracing::info!("hold completed");
                    self.recorder.record(InteractionEventKind::HoldCompleted);
                } else {
                    self.phase = HoldPhase::Holding { elapsed_ms: held };
                }
            }
            HoldPhase::Completed { dim_elapsed_ms } => {
                let dimmed = dim_elapsed_ms + elapsed_ms;
                if dimmed >= DIM_DELAY_MS {
                    self.phase = HoldPhase::Confirmed;
                    self.recorder.record(InteractionEventKind::ContinueRequested);
                } else {
                    self.phase = HoldPhase::Completed {
                        dim_elapsed_ms: dimmed,
                    };
                }
            }
            HoldPhase::Idle | HoldPhase::Confirmed => {}
        }
    }

    fn is_settled(&self) -> bool {
        matches!(self.phase, HoldPhase::Idle | HoldPhase::Confirmed)
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        self.recorder.events()
    }

    fn clear_uncommitted_events(&mut self) {
        self.recorder.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(hold: &HoldToConfirm, kind: &InteractionEventKind) -> usize {
        hold.uncommitted_events()
            .iter()
            .filter(|e| &e.kind == kind)
            .count()
    }

    /// Feeds `total_ms` in 16 ms frames, as the driver would.
    fn hold_for(hold: &mut HoldToConfirm, total_ms: u64) {
        let mut fed = 0;
        while fed < total_ms {
            let frame = 16.min(total_ms - fed);
            hold.advance(frame);
            fed += frame;
        }
    }

    #[test]
    fn test_early_release_resets_meter_and_never_continues() {
        // Arrange
        let mut hold = HoldToConfirm::new();
        hold.press();

        // Act
        hold_for(&mut hold, 2_900);
        hold.release();
        hold_for(&mut hold, 5_000);

        // Assert
        assert_eq!(hold.phase(), HoldPhase::Idle);
        assert!(hold.meter_percent().abs() < f64::EPSILON);
        assert_eq!(count(&hold, &InteractionEventKind::ContinueRequested), 0);
        assert_eq!(count(&hold, &InteractionEventKind::HoldReset), 1);
        assert!(!hold.wants_frames());
    }

    #[test]
    fn test_repeated_partial_holds_earn_no_credit() {
        let mut hold = HoldToConfirm::new();

        for _ in 0..3 {
            hold.press();
            hold_for(&mut hold, 2_000);
            hold.release();
        }
        hold.press();
        hold_for(&mut hold, 1_500);

        assert!((hold.progress() - 0.5).abs() < 1e-9);
        assert_eq!(count(&hold, &InteractionEventKind::HoldCompleted), 0);
    }

    #[test]
    fn test_full_hold_continues_exactly_once_after_dim_delay() {
        // Arrange
        let mut hold = HoldToConfirm::new();
        hold.press();

        // Act
        hold_for(&mut hold, HOLD_DURATION_MS);

        // Assert
        assert_eq!(hold.phase(), HoldPhase::Completed { dim_elapsed_ms: 0 });
        assert!((hold.meter_percent() - 100.0).abs() < f64::EPSILON);
        assert_eq!(count(&hold, &InteractionEventKind::ContinueRequested), 0);

        // Act
        hold.release();
        hold.press();
        hold_for(&mut hold, DIM_DELAY_MS + 10_000);

        // Assert
        assert_eq!(hold.phase(), HoldPhase::Confirmed);
        assert_eq!(count(&hold, &InteractionEventKind::HoldCompleted), 1);
        assert_eq!(count(&hold, &InteractionEventKind::ContinueRequested), 1);
        assert_eq!(count(&hold, &InteractionEventKind::HoldStarted), 1);
        assert!(hold.is_settled());
    }

    #[test]
    fn test_progress_never_exceeds_one() {
        let mut hold = HoldToConfirm::new();
        hold.press();

        hold.advance(HOLD_DURATION_MS * 10);

        assert!(hold.progress() <= 1.0);
        assert!((hold.progress() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_aux_text_revealed_once_past_threshold() {
        // Arrange
        let mut hold = HoldToConfirm::new();
        hold.press();

        // Act: 12% of 3000 ms is exactly the threshold, which is not enough.
        hold.advance(360);

        // Assert
        assert!(!hold.aux_text_revealed());

        // Act
        hold.advance(1);
        hold.release();
        hold.press();
        hold_for(&mut hold, 1_000);

        // Assert
        assert!(hold.aux_text_revealed());
        assert_eq!(count(&hold, &InteractionEventKind::AuxTextRevealed), 1);
    }

    #[test]
    fn test_release_when_idle_is_a_no_op() {
        let mut hold = HoldToConfirm::new();

        hold.release();

        assert!(hold.uncommitted_events().is_empty());
        assert!(hold.is_settled());
    }
}
