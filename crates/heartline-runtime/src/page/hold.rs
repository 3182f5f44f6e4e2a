//! Hold-to-confirm scene.

use heartline_core::engine::InteractionEngine;
use heartline_interactions::domain::events::InteractionEventKind;
use heartline_interactions::domain::hold::HoldToConfirm;

use super::{PageContext, PageInput, trace_events};
use crate::surface::Element;

/// Controller for the hold page.
#[derive(Debug)]
pub struct HoldScene {
    hold: HoldToConfirm,
}

impl HoldScene {
    pub(super) fn init(ctx: &mut PageContext<'_>) -> Option<Self> {
        let required = [Element::HoldButton, Element::HoldMeter, Element::HoldText];
        if !required.into_iter().all(|element| ctx.surface.has(element)) {
            return None;
        }
        ctx.surface.set_meter(0.0);
        Some(Self {
            hold: HoldToConfirm::new(),
        })
    }

    pub(super) fn handle(&mut self, input: PageInput, ctx: &mut PageContext<'_>) -> bool {
        match input {
            PageInput::PointerDown => self.hold.press(),
            PageInput::PointerUp | PageInput::PointerLeave | PageInput::PointerCancel => {
                self.hold.release();
            }
            _ => return false,
        }
        self.apply_events(ctx)
    }

    /// Returns `true` once the dimming after a full hold has finished.
    pub(super) fn advance(&mut self, elapsed_ms: u64, ctx: &mut PageContext<'_>) -> bool {
        let was_holding = self.hold.wants_frames();
        self.hold.advance(elapsed_ms);
        if was_holding {
            ctx.surface.set_meter(self.hold.meter_percent());
        }
        self.apply_events(ctx)
    }

    #[must_use]
    pub fn hold(&self) -> &HoldToConfirm {
        &self.hold
    }

    fn apply_events(&mut self, ctx: &mut PageContext<'_>) -> bool {
        let mut continue_requested = false;
        for event in self.hold.uncommitted_events() {
            match event.kind {
                InteractionEventKind::HoldStarted => tracing::debug!("hold started"),
                InteractionEventKind::AuxTextRevealed => ctx.surface.show(Element::HoldText),
                InteractionEventKind::HoldReset => ctx.surface.set_meter(0.0),
                InteractionEventKind::HoldCompleted => ctx.effects.play_sparkle(),
                InteractionEventKind::ContinueRequested => continue_requested = true,
                _ => {}
            }
        }
        trace_events(&self.hold);
        self.hold.clear_uncommitted_events();
        continue_requested
    }
}
