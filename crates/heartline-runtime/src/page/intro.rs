//! Opening scene: types the first line, then offers the begin button.

use heartline_core::engine::InteractionEngine;
use heartline_interactions::domain::events::InteractionEventKind;
use heartline_interactions::domain::typewriter::Typewriter;

use super::{PageContext, PageInput, trace_events};
use crate::surface::Element;

/// The line typed on the opening page.
pub const INTRO_LINE: &str = "Every great love story begins with a moment...";

/// Controller for the opening page.
#[derive(Debug)]
pub struct IntroScene {
    typewriter: Typewriter,
}

impl IntroScene {
    pub(super) fn init(ctx: &mut PageContext<'_>) -> Option<Self> {
        if !(ctx.surface.has(Element::Typewriter) && ctx.surface.has(Element::BeginButton)) {
            return None;
        }
        let mut scene = Self {
            typewriter: Typewriter::single_line(INTRO_LINE),
        };
        scene.render(ctx);
        Some(scene)
    }

    pub(super) fn handle(&self, input: PageInput) -> bool {
        input == PageInput::Continue && self.typewriter.continue_enabled()
    }

    pub(super) fn advance(&mut self, elapsed_ms: u64, ctx: &mut PageContext<'_>) {
        self.typewriter.advance(elapsed_ms);
        self.render(ctx);
    }

    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    fn render(&mut self, ctx: &mut PageContext<'_>) {
        ctx.surface
            .set_text(Element::Typewriter, self.typewriter.rendered());
        for event in self.typewriter.uncommitted_events() {
            if event.kind == InteractionEventKind::ContinueEnabled {
                ctx.surface.show(Element::BeginButton);
            }
        }
        trace_events(&self.typewriter);
        self.typewriter.clear_uncommitted_events();
    }
}
