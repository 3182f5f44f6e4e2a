//! Recording effects collaborator.

use heartline_core::effects::{ConfettiBurst, Effects, ParticleConfig};

/// One recorded call on `RecordingEffects`.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectCall {
    Particles(ParticleConfig),
    Confetti(ConfettiBurst),
    ImageFallback(usize),
    Sparkle,
    FinalChime,
}

/// An `Effects` implementation that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    pub calls: Vec<EffectCall>,
}

impl RecordingEffects {
    /// Number of confetti bursts fired so far.
    #[must_use]
    pub fn confetti_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EffectCall::Confetti(_)))
            .count()
    }

    /// Number of sparkle sounds played so far.
    #[must_use]
    pub fn sparkle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, EffectCall::Sparkle))
            .count()
    }
}

impl Effects for RecordingEffects {
    fn init_particles(&mut self, config: &ParticleConfig) {
        self.calls.push(EffectCall::Particles(config.clone()));
    }

    fn confetti(&mut self, burst: &ConfettiBurst) {
        self.calls.push(EffectCall::Confetti(burst.clone()));
    }

    fn image_fallback(&mut self, image_index: usize) {
        self.calls.push(EffectCall::ImageFallback(image_index));
    }

    fn play_sparkle(&mut self) {
        self.calls.push(EffectCall::Sparkle);
    }

    fn play_final_chime(&mut self) {
        self.calls.push(EffectCall::FinalChime);
    }
}
