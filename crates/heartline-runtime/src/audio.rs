//! Simulated background-music resource for headless runs.
//!
//! Position advances with the injected clock while unpaused and loops at
//! the track duration.

use std::sync::Arc;

use heartline_core::audio::AudioOutput;
use heartline_core::clock::Clock;
use heartline_core::error::DomainError;

/// Length of the simulated track.
pub const TRACK_SECONDS: f64 = 184.0;

/// Clock-driven stand-in for the music element.
pub struct SimulatedAudio {
    clock: Arc<dyn Clock>,
    duration: Option<f64>,
    volume: f64,
    muted: bool,
    /// Position at the moment playback last started or was seeked.
    anchor_seconds: f64,
    /// Clock reading at that moment, while playing.
    playing_since_ms: Option<i64>,
}

impl std::fmt::Debug for SimulatedAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedAudio")
            .field("duration", &self.duration)
            .field("volume", &self.volume)
            .field("muted", &self.muted)
            .field("anchor_seconds", &self.anchor_seconds)
            .field("playing_since_ms", &self.playing_since_ms)
            .finish_non_exhaustive()
    }
}

impl SimulatedAudio {
    /// A paused, unmuted resource at position zero.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, duration: Option<f64>) -> Self {
        Self {
            clock,
            duration,
            volume: 1.0,
            muted: false,
            anchor_seconds: 0.0,
            playing_since_ms: None,
        }
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    fn wrap(&self, seconds: f64) -> f64 {
        match self.duration {
            Some(duration) if duration > 0.0 => seconds.rem_euclid(duration),
            _ => seconds.max(0.0),
        }
    }
}

impl AudioOutput for SimulatedAudio {
    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn is_paused(&self) -> bool {
        self.playing_since_ms.is_none()
    }

    #[allow(clippy::cast_precision_loss)]
    fn current_time(&self) -> f64 {
        match self.playing_since_ms {
            Some(since) => {
                let played = (self.clock.now_millis() - since).max(0) as f64 / 1000.0;
                self.wrap(self.anchor_seconds + played)
            }
            None => self.anchor_seconds,
        }
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn seek(&mut self, seconds: f64) -> Result<(), DomainError> {
        if !seconds.is_finite() {
            return Err(DomainError::Audio(format!("cannot seek to {seconds}")));
        }
        self.anchor_seconds = self.wrap(seconds);
        if self.playing_since_ms.is_some() {
            self.playing_since_ms = Some(self.clock.now_millis());
        }
        tracing::debug!(seconds = self.anchor_seconds, "simulated audio seeked");
        Ok(())
    }

    fn play(&mut self) -> Result<(), DomainError> {
        if self.playing_since_ms.is_none() {
            self.playing_since_ms = Some(self.clock.now_millis());
            tracing::debug!(position = self.anchor_seconds, "simulated audio playing");
        }
        Ok(())
    }
}
