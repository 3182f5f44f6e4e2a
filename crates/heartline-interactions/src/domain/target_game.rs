//! Find-the-heart target game.
//!
//! Twelve targets are scattered over the play area and exactly one of them is
//! the destiny target. Finding it resolves the game; so does running out of
//! wrong guesses, which guarantees the game always ends within
//! `MAX_WRONG_ATTEMPTS + 1` activations.

use heartline_core::effects::{ConfettiBurst, Origin};
use heartline_core::engine::InteractionEngine;
use heartline_core::error::DomainError;
use heartline_core::rng::DeterministicRng;

use super::events::{EventRecorder, InteractionEvent, InteractionEventKind};

/// Number of targets placed on the board.
pub const TARGET_COUNT: usize = 12;

/// Wrong activations after which the game resolves on its own.
pub const MAX_WRONG_ATTEMPTS: u32 = 6;

/// How long a missed target shows its "wrong" flag.
pub const WRONG_FLAG_MS: u64 = 450;

/// Hint shown after an ordinary miss.
pub const RETRY_HINT: &str = "Not this one... try another heart.";

/// Hint shown when the attempt limit resolves the game.
pub const FORCED_HINT: &str = "Destiny chooses you anyway \u{1f498}";

/// Horizontal placement range, in percent of the play area.
pub const X_RANGE_PERCENT: (f64, f64) = (3.0, 91.0);

/// Vertical placement range, in percent of the play area.
pub const Y_RANGE_PERCENT: (f64, f64) = (6.0, 88.0);

/// Cosmetic looping drift applied to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub x_px: f64,
    pub y_px: f64,
    pub rotation_deg: f64,
    pub period_seconds: f64,
}

/// One clickable target.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub index: usize,
    pub is_destiny: bool,
    pub x_percent: f64,
    pub y_percent: f64,
    pub oscillation: Oscillation,
}

/// Result of activating a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The game was already resolved.
    Ignored,
    /// The destiny target was found.
    Destiny,
    /// A wrong target; the game goes on.
    Missed { wrong_attempts: u32 },
    /// A wrong target that exhausted the attempt limit.
    ForcedResolution,
}

/// Target game state for one page.
#[derive(Debug)]
pub struct TargetGame {
    targets: Vec<Target>,
    destiny_index: usize,
    wrong_attempts: u32,
    resolved: bool,
    wrong_flags: Vec<(usize, u64)>,
    recorder: EventRecorder,
}

fn between(rng: &mut dyn DeterministicRng, min: f64, max: f64) -> f64 {
    min + rng.next_f64() * (max - min)
}

impl TargetGame {
    /// Lays out the board and picks the destiny target.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rng: &mut dyn DeterministicRng) -> Self {
        let last = (TARGET_COUNT - 1) as u32;
        let destiny_index = (rng.next_u32_range(0, last) as usize).min(TARGET_COUNT - 1);

        let targets = (0..TARGET_COUNT)
            .map(|index| {
                let x_percent = between(rng, X_RANGE_PERCENT.0, X_RANGE_PERCENT.1);
                let y_percent = between(rng, Y_RANGE_PERCENT.0, Y_RANGE_PERCENT.1);
                let oscillation = Oscillation {
                    x_px: between(rng, -18.0, 18.0),
                    y_px: between(rng, -22.0, 22.0),
                    rotation_deg: between(rng, -15.0, 15.0),
                    period_seconds: between(rng, 2.4, 4.4),
                };
                Target {
                    index,
                    is_destiny: index == destiny_index,
                    x_percent,
                    y_percent,
                    oscillation,
                }
            })
            .collect();

        tracing::debug!(destiny_index, "target game laid out");
        Self {
            targets,
            destiny_index,
            wrong_attempts: 0,
            resolved: false,
            wrong_flags: Vec::new(),
            recorder: EventRecorder::new(),
        }
    }

    /// Handles a click or tap on target `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `index` is not on the board.
    pub fn activate(&mut self, index: usize) -> Result<Activation, DomainError> {
        if index >= self.targets.len() {
            return Err(DomainError::Validation(format!(
                "target index {index} out of range"
            )));
        }
        if self.resolved {
            return Ok(Activation::Ignored);
        }

        if index == self.destiny_index {
            self.resolve(false);
            return Ok(Activation::Destiny);
        }

        self.wrong_attempts += 1;
        self.wrong_flags.retain(|(flagged, _)| *flagged != index);
        self.wrong_flags.push((index, WRONG_FLAG_MS));
        self.recorder.record(InteractionEventKind::TargetMissed {
            index,
            wrong_attempts: self.wrong_attempts,
        });

        if self.wrong_attempts >= MAX_WRONG_ATTEMPTS {
            self.recorder.record(InteractionEventKind::HintShown {
                message: FORCED_HINT.to_owned(),
            });
            self.resolve(true);
            Ok(Activation::ForcedResolution)
        } else {
            self.recorder.record(InteractionEventKind::HintShown {
                message: RETRY_HINT.to_owned(),
            });
            Ok(Activation::Missed {
                wrong_attempts: self.wrong_attempts,
            })
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    #[must_use]
    pub fn destiny_index(&self) -> usize {
        self.destiny_index
    }

    #[must_use]
    pub fn wrong_attempts(&self) -> u32 {
        self.wrong_attempts
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Returns whether target `index` currently shows the "wrong" flag.
    #[must_use]
    pub fn is_flagged(&self, index: usize) -> bool {
        self.wrong_flags.iter().any(|(flagged, _)| *flagged == index)
    }

    fn resolve(&mut self, forced: bool) {
        if self.resolved {
            return;
        }
        self.resolved = true;
        tracing::info!(forced, wrong_attempts = self.wrong_attempts, "target game resolved");
        self.recorder
            .record(InteractionEventKind::GameResolved { forced });
        self.recorder.record(InteractionEventKind::ContinueEnabled);
    }
}

/// The three bursts fired when the game resolves.
#[must_use]
pub fn completion_bursts() -> Vec<ConfettiBurst> {
    vec![
        ConfettiBurst::new(160, 90.0, Origin { x: None, y: 0.62 }),
        ConfettiBurst::new(140, 76.0, Origin { x: Some(0.2), y: 0.62 }),
        ConfettiBurst::new(140, 76.0, Origin { x: Some(0.8), y: 0.62 }),
    ]
}

impl InteractionEngine for TargetGame {
    type Event = InteractionEvent;

    fn engine_name(&self) -> &'static str {
        "target_game"
    }

    fn advance(&mut self, elapsed_ms: u64) {
        self.recorder.tick(elapsed_ms);
        let mut cleared = Vec::new();
        self.wrong_flags.retain_mut(|(index, remaining)| {
            *remaining = remaining.saturating_sub(elapsed_ms);
            if *remaining == 0 {
                cleared.push(*index);
                false
            } else {
                true
            }
        });
        for index in cleared {
            self.recorder
                .record(InteractionEventKind::WrongFlagCleared { index });
        }
    }

    fn is_settled(&self) -> bool {
        self.wrong_flags.is_empty()
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
    use heartline_test_support::{MockRng, SequenceRng};

    fn game_with_destiny(destiny: u32) -> TargetGame {
        TargetGame::new(&mut SequenceRng::new(vec![destiny]))
    }

    fn hint_count(game: &TargetGame, message: &str) -> usize {
        game.uncommitted_events()
            .iter()
            .filter(|e| {
                matches!(&e.kind, InteractionEventKind::HintShown { message: m } if m == message)
            })
            .count()
    }

    fn resolved_count(game: &TargetGame) -> usize {
        game.uncommitted_events()
            .iter()
            .filter(|e| matches!(e.kind, InteractionEventKind::GameResolved { .. }))
            .count()
    }

    #[test]
    fn test_layout_has_exactly_one_destiny_within_bounds() {
        // Arrange
        let floats: Vec<f64> = (0..TARGET_COUNT * 6).map(|i| (i % 10) as f64 / 10.0).collect();
        let mut rng = SequenceRng::new(vec![4]).with_floats(floats);

        // Act
        let game = TargetGame::new(&mut rng);

        // Assert
        assert_eq!(game.targets().len(), TARGET_COUNT);
        let destinies: Vec<_> = game.targets().iter().filter(|t| t.is_destiny).collect();
        assert_eq!(destinies.len(), 1);
        assert_eq!(destinies[0].index, 4);
        for target in game.targets() {
            assert!((X_RANGE_PERCENT.0..=X_RANGE_PERCENT.1).contains(&target.x_percent));
            assert!((Y_RANGE_PERCENT.0..=Y_RANGE_PERCENT.1).contains(&target.y_percent));
            assert!((2.4..=4.4).contains(&target.oscillation.period_seconds));
        }
    }

    #[test]
    fn test_destiny_scenario_resolves_on_sixth_click() {
        // Arrange
        let mut game = game_with_destiny(7);

        // Act
        let mut outcomes = Vec::new();
        for index in [2, 5, 9, 1, 3] {
            outcomes.push(game.activate(index).unwrap());
        }

        // Assert
        assert_eq!(game.wrong_attempts(), 5);
        assert!(!game.is_resolved());
        assert_eq!(
            outcomes.last(),
            Some(&Activation::Missed { wrong_attempts: 5 })
        );

        // Act
        let last = game.activate(7).unwrap();

        // Assert
        assert_eq!(last, Activation::Destiny);
        assert!(game.is_resolved());
        assert_eq!(hint_count(&game, RETRY_HINT), 5);
        assert_eq!(hint_count(&game, FORCED_HINT), 0);
        assert_eq!(resolved_count(&game), 1);
    }

    #[test]
    fn test_six_misses_force_resolution_exactly_once() {
        // Arrange
        let mut game = game_with_destiny(0);

        // Act
        for index in 1..=5 {
            assert!(matches!(game.activate(index).unwrap(), Activation::Missed { .. }));
        }
        let sixth = game.activate(6).unwrap();
        let after = game.activate(0).unwrap();

        // Assert
        assert_eq!(sixth, Activation::ForcedResolution);
        assert_eq!(after, Activation::Ignored);
        assert_eq!(game.wrong_attempts(), 6);
        assert_eq!(hint_count(&game, FORCED_HINT), 1);
        assert_eq!(hint_count(&game, RETRY_HINT), 5);
        assert_eq!(resolved_count(&game), 1);
        assert!(game.uncommitted_events().iter().any(|e| e.kind
            == InteractionEventKind::GameResolved { forced: true }));
    }

    #[test]
    fn test_repeated_misses_on_same_target_count() {
        let mut game = game_with_destiny(11);

        for _ in 0..MAX_WRONG_ATTEMPTS {
            game.activate(3).unwrap();
        }

        assert!(game.is_resolved());
        assert_eq!(game.wrong_attempts(), MAX_WRONG_ATTEMPTS);
    }

    #[test]
    fn test_resolved_game_ignores_every_activation() {
        let mut game = game_with_destiny(2);
        game.activate(2).unwrap();
        game.clear_uncommitted_events();

        for index in 0..TARGET_COUNT {
            assert_eq!(game.activate(index).unwrap(), Activation::Ignored);
        }

        assert_eq!(game.wrong_attempts(), 0);
        assert!(game.uncommitted_events().is_empty());
    }

    #[test]
    fn test_wrong_flag_clears_after_interval() {
        // Arrange
        let mut game = game_with_destiny(0);
        game.activate(5).unwrap();

        // Act
        game.advance(WRONG_FLAG_MS - 1);

        // Assert
        assert!(game.is_flagged(5));
        assert!(!game.is_settled());

        // Act
        game.advance(1);

        // Assert
        assert!(!game.is_flagged(5));
        assert!(game.is_settled());
        assert!(game
            .uncommitted_events()
            .iter()
            .any(|e| e.kind == InteractionEventKind::WrongFlagCleared { index: 5 }));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut game = TargetGame::new(&mut MockRng);

        assert!(matches!(
            game.activate(TARGET_COUNT),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(game.wrong_attempts(), 0);
    }

    #[test]
    fn test_completion_bursts_match_layout() {
        let bursts = completion_bursts();

        assert_eq!(bursts.len(), 3);
        assert_eq!(bursts[0].particle_count, 160);
        assert_eq!(bursts[1].origin.x, Some(0.2));
        assert_eq!(bursts[2].origin.x, Some(0.8));
    }
}
