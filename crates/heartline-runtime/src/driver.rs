//! Single-threaded page driver.
//!
//! Runs one page at a time on a tokio interval: each frame delivers the
//! inputs that are due, then feeds the measured elapsed time to the page.
//! A page ends when it hands off to the next scene or when the input
//! source has nothing more to say.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use heartline_core::clock::Clock;
use heartline_core::rng::DeterministicRng;
use heartline_core::store::Stores;
use heartline_narrative::domain::scene::Scene;
use tokio::time::{Instant, MissedTickBehavior};

use crate::audio::{SimulatedAudio, TRACK_SECONDS};
use crate::effects::TracingEffects;
use crate::page::{Page, PageConfig, PageContext, PageInput};
use crate::surface::HeadlessSurface;

/// Supplies user and resource input to a running page.
pub trait InputSource {
    /// Inputs due on `scene` at `page_time_ms`. `None` ends the page without
    /// a hand-off.
    fn poll(&mut self, scene: Scene, page_time_ms: u64) -> Option<Vec<PageInput>>;
}

/// Clock that follows tokio time from a wall-clock origin, so paused test
/// time and persisted timestamps agree.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin_utc: DateTime<Utc>,
    origin: Instant,
}

impl TokioClock {
    /// A clock reading `origin_utc` now.
    #[must_use]
    pub fn starting_at(origin_utc: DateTime<Utc>) -> Self {
        Self {
            origin_utc,
            origin: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = chrono::Duration::from_std(self.origin.elapsed())
            .unwrap_or_else(|_| chrono::Duration::zero());
        self.origin_utc + elapsed
    }
}

/// Drives `page` frame by frame. Returns the scene it handed off to, or
/// `None` if the input source ended it first.
pub async fn run_page(
    page: &mut Page<'_>,
    frame: Duration,
    inputs: &mut dyn InputSource,
) -> Option<Scene> {
    let mut interval = tokio::time::interval(frame);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;
    let mut last = Instant::now();

    loop {
        let Some(batch) = inputs.poll(page.scene(), page.page_time_ms()) else {
            tracing::info!(scene = %page.scene(), "input source finished");
            return None;
        };
        for input in batch {
            page.handle(input);
        }
        if let Some(next) = page.departed_to() {
            return Some(next);
        }

        interval.tick().await;
        let elapsed_ms = u64::try_from(last.elapsed().as_millis()).unwrap_or(u64::MAX);
        last += Duration::from_millis(elapsed_ms);
        page.advance(elapsed_ms);

        if let Some(next) = page.departed_to() {
            return Some(next);
        }
    }
}

/// Shared collaborators that outlive every page of a journey.
pub struct Journey<'a> {
    pub stores: Stores<'a>,
    pub clock: Arc<dyn Clock>,
    pub rng: &'a mut dyn DeterministicRng,
    pub page_config: PageConfig,
    pub frame: Duration,
}

impl std::fmt::Debug for Journey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journey")
            .field("stores", &self.stores)
            .field("page_config", &self.page_config)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Journey<'_> {
    /// Loads `start` and follows every hand-off until a page ends without
    /// one. Each page gets a fresh audio resource, effects and surface, as
    /// a real page load would. Returns the scenes visited, in order.
    pub async fn run(&mut self, start: Scene, inputs: &mut dyn InputSource) -> Vec<Scene> {
        let mut visited = Vec::new();
        let mut scene = start;

        loop {
            visited.push(scene);
            let mut audio = SimulatedAudio::new(Arc::clone(&self.clock), Some(TRACK_SECONDS));
            let mut effects = TracingEffects::new();
            let mut surface = HeadlessSurface::for_scene(scene);

            let ctx = PageContext {
                stores: self.stores,
                clock: self.clock.as_ref(),
                rng: &mut *self.rng,
                audio: &mut audio,
                effects: &mut effects,
                surface: &mut surface,
            };
            let mut page = Page::load(scene, ctx, &self.page_config);
            let next = run_page(&mut page, self.frame, inputs).await;
            page.unload();

            match next {
                Some(target) => scene = target,
                None => return visited,
            }
        }
    }
}
