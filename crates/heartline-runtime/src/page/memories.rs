//! Memories gallery scene.

use heartline_core::engine::InteractionEngine;
use heartline_interactions::domain::gallery::MemoryGallery;

use super::{PageContext, PageInput, trace_events};
use crate::surface::Element;

/// Controller for the memories page. Always initializes; the next button
/// is optional.
#[derive(Debug)]
pub struct MemoriesScene {
    gallery: MemoryGallery,
    has_next: bool,
}

impl MemoriesScene {
    pub(super) fn init(ctx: &mut PageContext<'_>) -> Self {
        Self {
            gallery: MemoryGallery::new(ctx.surface.image_count()),
            has_next: ctx.surface.has(Element::ToHoldButton),
        }
    }

    pub(super) fn handle(&mut self, input: PageInput, ctx: &mut PageContext<'_>) -> bool {
        match input {
            PageInput::ImageFailed(index) => {
                if self.gallery.image_failed(index) {
                    ctx.effects.image_fallback(index);
                }
                trace_events(&self.gallery);
        self.gallery.clear_uncommitted_events();
                false
            }
            PageInput::Continue => self.has_next,
            _ => false,
        }
    }

    pub(super) fn advance(&mut self, elapsed_ms: u64) {
        self.gallery.advance(elapsed_ms);
    }

    #[must_use]
    pub fn gallery(&self) -> &MemoryGallery {
        &self.gallery
    }
}
