//! Scripted visitor for headless runs.
//!
//! Plays through every scene the way a person might: waits for the
//! typewriter, clicks hearts in a random order until the game resolves,
//! lets one hold go early before holding for real, then accepts the final
//! question and clicks the background until the hidden note shows.

use std::collections::VecDeque;

use heartline_core::audio::AudioResourceEvent;
use heartline_core::rng::{DeterministicRng, StdRngSource};
use heartline_interactions::domain::target_game::{MAX_WRONG_ATTEMPTS, TARGET_COUNT};
use heartline_narrative::domain::scene::Scene;

use crate::driver::InputSource;
use crate::page::PageInput;

/// Time the autopilot stays on the finale before ending the run.
pub const FINALE_DWELL_MS: u64 = 14_000;

/// Time a page may stay unresolved after its script ran out.
pub const STALL_TIMEOUT_MS: u64 = 20_000;

const RETRY_EVERY_MS: u64 = 500;
const RETRIES: u64 = 8;
const CLICK_EVERY_MS: u64 = 700;

/// Input source that follows a fixed script per scene.
#[derive(Debug)]
pub struct Autopilot {
    rng: StdRngSource,
    current: Option<Scene>,
    script: VecDeque<(u64, PageInput)>,
    last_step_ms: u64,
}

impl Autopilot {
    #[must_use]
    pub fn new(rng: StdRngSource) -> Self {
        Self {
            rng,
            current: None,
            script: VecDeque::new(),
            last_step_ms: 0,
        }
    }

    /// Builds the script for one page load of `scene`.
    #[must_use]
    pub fn script_for(&mut self, scene: Scene) -> Vec<(u64, PageInput)> {
        let mut steps = vec![
            (0, PageInput::Audio(AudioResourceEvent::MetadataLoaded)),
            (0, PageInput::Audio(AudioResourceEvent::CanPlay)),
        ];

        match scene {
            Scene::Intro => {
                steps.push((1_000, PageInput::ToggleMute));
                steps.extend(retries(2_600, PageInput::Continue));
            }
            Scene::HeartGame => {
                let order = self.shuffled_targets();
                let clicks = usize::try_from(MAX_WRONG_ATTEMPTS + 1).unwrap_or(TARGET_COUNT);
                let mut at = 1_200;
                for index in order.into_iter().take(clicks) {
                    steps.push((at, PageInput::ActivateTarget(index)));
                    at += CLICK_EVERY_MS;
                }
                steps.extend(retries(at + 600, PageInput::Continue));
            }
            Scene::Memories => {
                steps.push((400, PageInput::ImageFailed(1)));
                steps.extend(retries(2_000, PageInput::Continue));
            }
            Scene::Hold => {
                steps.push((800, PageInput::PointerDown));
                steps.push((2_000, PageInput::PointerUp));
                steps.push((2_600, PageInput::PointerDown));
            }
            Scene::Finale => {
                steps.push((9_000, PageInput::Accept));
                for click in 0..5 {
                    steps.push((10_500 + click * 200, PageInput::BackgroundClick));
                }
            }
        }
        steps
    }

    #[allow(clippy::cast_possible_truncation)]
    fn shuffled_targets(&mut self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..TARGET_COUNT).collect();
        for i in (1..order.len()).rev() {
            let j = self.rng.next_u32_range(0, i as u32) as usize;
            order.swap(i, j.min(i));
        }
        order
    }
}

fn retries(start_ms: u64, input: PageInput) -> impl Iterator<Item = (u64, PageInput)> {
    (0..RETRIES).map(move |n| (start_ms + n * RETRY_EVERY_MS, input))
}

impl InputSource for Autopilot {
    fn poll(&mut self, scene: Scene, page_time_ms: u64) -> Option<Vec<PageInput>> {
        if self.current != Some(scene) || page_time_ms == 0 {
            self.current = Some(scene);
            let script = self.script_for(scene);
            self.last_step_ms = script.iter().map(|(at, _)| *at).max().unwrap_or(0);
            self.script = script.into();
            tracing::debug!(%scene, steps = self.script.len(), "autopilot script loaded");
        }

        if scene == Scene::Finale && page_time_ms >= FINALE_DWELL_MS {
            return None;
        }
        if self.script.is_empty() && page_time_ms >= self.last_step_ms + STALL_TIMEOUT_MS {
            tracing::warn!(%scene, page_time_ms, "page stalled; autopilot giving up");
            return None;
        }

        let mut due = Vec::new();
        while let Some(&(at, input)) = self.script.front() {
            if at > page_time_ms {
                break;
            }
            due.push(input);
            self.script.pop_front();
        }
        Some(due)
    }
}
