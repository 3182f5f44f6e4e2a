//! Finale scene: typed lines, the acceptance celebration, the hidden note
//! and the heart rain.

use heartline_core::engine::InteractionEngine;
use heartline_interactions::domain::celebration::{
    Celebration, FINALE_LINES, acceptance_burst, heart_rain_burst, staggered_burst,
};
use heartline_interactions::domain::events::InteractionEventKind;
use heartline_interactions::domain::typewriter::{Typewriter, TypewriterConfig};

use super::{PageContext, PageInput, trace_events};
use crate::surface::Element;

/// Controller for the final page.
#[derive(Debug)]
pub struct FinaleScene {
    typewriter: Typewriter,
    celebration: Celebration,
}

impl FinaleScene {
    pub(super) fn init(ctx: &mut PageContext<'_>) -> Option<Self> {
        let required = [
            Element::FinalLines,
            Element::FinalYesButtons,
            Element::FinalMessage,
            Element::HiddenNote,
            Element::FinalBackground,
        ];
        if !required.into_iter().all(|element| ctx.surface.has(element)) {
            return None;
        }
        let lines = FINALE_LINES.iter().map(|line| (*line).to_owned()).collect();
        let mut scene = Self {
            typewriter: Typewriter::new(lines, TypewriterConfig::multi_line()),
            celebration: Celebration::new(),
        };
        scene.render(ctx);
        Some(scene)
    }

    pub(super) fn handle(&mut self, input: PageInput, ctx: &mut PageContext<'_>) {
        match input {
            PageInput::Accept => self.celebration.accept(),
            PageInput::BackgroundClick => self.celebration.background_click(),
            _ => return,
        }
        self.apply_events(ctx);
    }

    pub(super) fn advance(&mut self, elapsed_ms: u64, ctx: &mut PageContext<'_>) {
        self.typewriter.advance(elapsed_ms);
        self.render(ctx);
        self.celebration.advance(elapsed_ms);
        self.apply_events(ctx);
    }

    /// Stops the heart rain.
    pub(super) fn unload(&mut self) {
        self.celebration.stop_rain();
    }

    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    #[must_use]
    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    fn render(&mut self, ctx: &mut PageContext<'_>) {
        ctx.surface
            .set_text(Element::FinalLines, self.typewriter.rendered());
        trace_events(&self.typewriter);
        self.typewriter.clear_uncommitted_events();
    }

    fn apply_events(&mut self, ctx: &mut PageContext<'_>) {
        for event in self.celebration.uncommitted_events() {
            match event.kind {
                InteractionEventKind::Accepted => {
                    ctx.effects.play_sparkle();
                    ctx.effects.play_final_chime();
                    ctx.surface.show(Element::FinalMessage);
                    ctx.effects.confetti(&acceptance_burst());
                }
                InteractionEventKind::StaggeredBurstDue { index } => {
                    let origin_x = ctx.rng.next_f64();
                    ctx.effects.confetti(&staggered_burst(index, origin_x));
                }
                InteractionEventKind::HiddenNoteRevealed => ctx.surface.show(Element::HiddenNote),
                InteractionEventKind::HeartRainDue => {
                    let origin_x = ctx.rng.next_f64();
                    ctx.effects.confetti(&heart_rain_burst(origin_x));
                }
                _ => {}
            }
        }
        trace_events(&self.celebration);
        self.celebration.clear_uncommitted_events();
    }
}
