//! Decorative effects collaborator.
//!
//! Every call is fire-and-forget: nothing returned here feeds back into
//! scene state.

/// Normalized origin of a confetti burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    /// Horizontal position in `[0, 1]`; `None` means centered.
    pub x: Option<f64>,
    /// Vertical position; may be slightly negative to start off-screen.
    pub y: f64,
}

/// Parameters for one confetti burst.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: u32,
    pub spread: f64,
    pub origin: Origin,
    pub angle: Option<f64>,
    pub start_velocity: Option<f64>,
    pub ticks: Option<u32>,
    pub colors: Vec<&'static str>,
}

impl ConfettiBurst {
    /// A burst with default angle, velocity, lifetime and palette.
    #[must_use]
    pub fn new(particle_count: u32, spread: f64, origin: Origin) -> Self {
        Self {
            particle_count,
            spread,
            origin,
            angle: None,
            start_velocity: None,
            ticks: None,
            colors: Vec::new(),
        }
    }
}

/// Fixed configuration for the ambient particle background.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleConfig {
    pub count: u32,
    pub colors: Vec<&'static str>,
    pub opacity: (f64, f64),
    pub size: (f64, f64),
    pub speed: (f64, f64),
    pub drift: f64,
}

/// Decorative side effects invoked at fixed points of a scene.
pub trait Effects: Send {
    /// Starts the ambient particle layer.
    fn init_particles(&mut self, config: &ParticleConfig);

    /// Fires one confetti burst.
    fn confetti(&mut self, burst: &ConfettiBurst);

    /// Replaces a failed image with an inline placeholder graphic.
    fn image_fallback(&mut self, image_index: usize);

    /// Plays the short sparkle sound; failures are ignored.
    fn play_sparkle(&mut self);

    /// Plays the finale chime; failures are ignored.
    fn play_final_chime(&mut self);
}
