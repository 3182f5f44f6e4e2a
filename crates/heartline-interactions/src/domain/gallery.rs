//! Memories gallery.

use heartline_core::engine::InteractionEngine;

use super::events::{EventRecorder, InteractionEvent, InteractionEventKind};

/// Caption drawn on the placeholder that replaces a missing photo.
pub const PLACEHOLDER_CAPTION: &str = "Add your photo here";

/// Photo slots of the memories scene. A slot whose image fails to load is
/// swapped for the placeholder once; later failures of the same slot are
/// ignored.
#[derive(Debug)]
pub struct MemoryGallery {
    fallback_applied: Vec<bool>,
    recorder: EventRecorder,
}

impl MemoryGallery {
    #[must_use]
    pub fn new(image_count: usize) -> Self {
        Self {
            fallback_applied: vec![false; image_count],
            recorder: EventRecorder::new(),
        }
    }

    /// Records a load failure for image `index`. Returns `true` if the
    /// placeholder should be applied now.
    pub fn image_failed(&mut self, index: usize) -> bool {
        match self.fallback_applied.get_mut(index) {
            Some(applied) if !*applied => {
                *applied = true;
                tracing::debug!(index, "memory image replaced by placeholder");
                self.recorder
                    .record(InteractionEventKind::ImageFallbackApplied { index });
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.fallback_applied.len()
    }
}

impl InteractionEngine for MemoryGallery {
    type Event = InteractionEvent;

    fn engine_name(&self) -> &'static str {
        "memory_gallery"
    }

    fn advance(&mut self, elapsed_ms: u64) {
        self.recorder.tick(elapsed_ms);
    }

    fn is_settled(&self) -> bool {
        true
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        self.recorder.events()
    }

    fn clear_uncommitted_events(&mut self) {
        self.recorder.clear();
    }
}
