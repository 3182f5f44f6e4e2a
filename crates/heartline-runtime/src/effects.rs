//! Effects collaborator that reports every decoration to the log.

use heartline_core::effects::{ConfettiBurst, Effects, ParticleConfig};

/// Logs decorative effects instead of rendering them.
#[derive(Debug, Default)]
pub struct TracingEffects {
    bursts: u64,
}

impl TracingEffects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Confetti bursts fired so far.
    #[must_use]
    pub fn bursts(&self) -> u64 {
        self.bursts
    }
}

impl Effects for TracingEffects {
    fn init_particles(&mut self, config: &ParticleConfig) {
        tracing::debug!(count = config.count, "particles initialized");
    }

    fn confetti(&mut self, burst: &ConfettiBurst) {
        self.bursts += 1;
        tracing::info!(
            particles = burst.particle_count,
            spread = burst.spread,
            origin_x = ?burst.origin.x,
            origin_y = burst.origin.y,
            "confetti"
        );
    }

    fn image_fallback(&mut self, image_index: usize) {
        tracing::info!(image_index, "image placeholder applied");
    }

    fn play_sparkle(&mut self) {
        tracing::debug!("sparkle");
    }

    fn play_final_chime(&mut self) {
        tracing::debug!("final chime");
    }
}
