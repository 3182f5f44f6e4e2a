//! Shared helpers for runtime integration tests.
#![allow(dead_code)]

use heartline_core::store::Stores;
use heartline_interactions::domain::celebration::Celebration;
use heartline_interactions::domain::hold::HoldToConfirm;
use heartline_interactions::domain::target_game::TargetGame;
use heartline_narrative::domain::scene::Scene;
use heartline_runtime::page::{Page, PageConfig, PageContext, SceneController};
use heartline_runtime::surface::HeadlessSurface;
use heartline_store::MemoryStore;
use heartline_test_support::{FakeAudio, ManualClock, RecordingEffects, SequenceRng, fixed_now};

/// Frame length used when feeding time to a page.
pub const FRAME_MS: u64 = 16;

/// What outlives a page load: both stores and the wall clock.
pub struct Browser {
    pub durable: MemoryStore,
    pub session: MemoryStore,
    pub clock: ManualClock,
}

impl Browser {
    pub fn new() -> Self {
        Self::with_durable(MemoryStore::new())
    }

    pub fn with_durable(durable: MemoryStore) -> Self {
        Self {
            durable,
            session: MemoryStore::new(),
            clock: ManualClock::new(fixed_now()),
        }
    }

    /// Closes the tab and opens a new one: only durable state survives.
    pub fn new_session(&mut self) {
        self.session = MemoryStore::new();
    }

    pub fn stores(&self) -> Stores<'_> {
        Stores {
            durable: &self.durable,
            session: &self.session,
        }
    }
}

/// Per-page collaborators, inspected after the page is gone.
pub struct PageRig {
    pub rng: SequenceRng,
    pub audio: FakeAudio,
    pub effects: RecordingEffects,
    pub surface: HeadlessSurface,
}

impl PageRig {
    /// A rig carrying the full page for `scene`.
    pub fn for_scene(scene: Scene) -> Self {
        Self::with_surface(HeadlessSurface::for_scene(scene))
    }

    pub fn with_surface(surface: HeadlessSurface) -> Self {
        Self {
            rng: SequenceRng::new(vec![0]),
            audio: FakeAudio::default(),
            effects: RecordingEffects::default(),
            surface,
        }
    }

    /// Pins the destiny target of the game.
    pub fn with_destiny(mut self, index: u32) -> Self {
        self.rng = SequenceRng::new(vec![index]);
        self
    }
}

/// Loads `scene` against `browser` with the collaborators in `rig`.
pub fn load<'a>(browser: &'a Browser, rig: &'a mut PageRig, scene: Scene) -> Page<'a> {
    Page::load(
        scene,
        PageContext {
            stores: browser.stores(),
            clock: &browser.clock,
            rng: &mut rig.rng,
            audio: &mut rig.audio,
            effects: &mut rig.effects,
            surface: &mut rig.surface,
        },
        &PageConfig::default(),
    )
}

/// Feeds `total_ms` to `page` in frames, moving the wall clock along.
pub fn run_for(page: &mut Page<'_>, clock: &ManualClock, total_ms: u64) {
    let mut fed = 0;
    while fed < total_ms {
        let frame = FRAME_MS.min(total_ms - fed);
        clock.advance_ms(i64::try_from(frame).unwrap());
        page.advance(frame);
        fed += frame;
    }
}

pub fn game<'p>(page: &'p Page<'_>) -> &'p TargetGame {
    match page.controller() {
        SceneController::HeartGame(scene) => scene.game(),
        other => panic!("expected heart game controller, got {other:?}"),
    }
}

pub fn hold<'p>(page: &'p Page<'_>) -> &'p HoldToConfirm {
    match page.controller() {
        SceneController::Hold(scene) => scene.hold(),
        other => panic!("expected hold controller, got {other:?}"),
    }
}

pub fn celebration<'p>(page: &'p Page<'_>) -> &'p Celebration {
    match page.controller() {
        SceneController::Finale(scene) => scene.celebration(),
        other => panic!("expected finale controller, got {other:?}"),
    }
}
