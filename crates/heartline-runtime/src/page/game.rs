//! Heart-target game scene.

use heartline_core::engine::InteractionEngine;
use heartline_interactions::domain::events::InteractionEventKind;
use heartline_interactions::domain::target_game::{TargetGame, completion_bursts};

use super::{PageContext, PageInput, trace_events};
use crate::surface::{Element, HINT_DURATION_MS};

/// Controller for the game page.
#[derive(Debug)]
pub struct HeartGameScene {
    game: TargetGame,
}

impl HeartGameScene {
    pub(super) fn init(ctx: &mut PageContext<'_>) -> Option<Self> {
        let required = [
            Element::HeartGame,
            Element::GameResult,
            Element::ToMemoriesButton,
        ];
        if !required.into_iter().all(|element| ctx.surface.has(element)) {
            return None;
        }
        let game = TargetGame::new(ctx.rng);
        ctx.surface.place_targets(game.targets());
        Some(Self { game })
    }

    pub(super) fn handle(&mut self, input: PageInput, ctx: &mut PageContext<'_>) -> bool {
        match input {
            PageInput::ActivateTarget(index) => {
                if let Err(e) = self.game.activate(index) {
                    tracing::debug!(error = %e, "target activation ignored");
                }
                self.apply_events(ctx);
                false
            }
            PageInput::Continue => self.game.is_resolved(),
            _ => false,
        }
    }

    pub(super) fn advance(&mut self, elapsed_ms: u64, ctx: &mut PageContext<'_>) {
        self.game.advance(elapsed_ms);
        self.apply_events(ctx);
    }

    #[must_use]
    pub fn game(&self) -> &TargetGame {
        &self.game
    }

    fn apply_events(&mut self, ctx: &mut PageContext<'_>) {
        for event in self.game.uncommitted_events() {
            match &event.kind {
                InteractionEventKind::TargetMissed { index, .. } => {
                    ctx.surface.set_target_flag(*index, true);
                }
                InteractionEventKind::WrongFlagCleared { index } => {
                    ctx.surface.set_target_flag(*index, false);
                }
                InteractionEventKind::HintShown { message } => {
                    ctx.surface.show_hint(message, HINT_DURATION_MS);
                }
                InteractionEventKind::GameResolved { .. } => {
                    ctx.effects.play_sparkle();
                    for burst in completion_bursts() {
                        ctx.effects.confetti(&burst);
                    }
                }
                InteractionEventKind::ContinueEnabled => ctx.surface.show(Element::GameResult),
                _ => {}
            }
        }
        trace_events(&self.game);
        self.game.clear_uncommitted_events();
    }
}
