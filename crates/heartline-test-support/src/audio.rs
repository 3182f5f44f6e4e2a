//! Fake audio resource.

use heartline_core::audio::AudioOutput;
use heartline_core::error::DomainError;

/// An `AudioOutput` whose state is plain public fields.
///
/// `play` succeeds by unpausing unless `reject_play` is set; `seek` records
/// the target and moves `current_time` unless `reject_seek` is set.
#[derive(Debug, Clone)]
pub struct FakeAudio {
    pub muted: bool,
    pub paused: bool,
    pub volume: f64,
    pub current_time: f64,
    pub duration: Option<f64>,
    pub reject_play: bool,
    pub reject_seek: bool,
    pub seeks: Vec<f64>,
    pub play_calls: u32,
}

impl FakeAudio {
    /// A paused resource with the given duration.
    #[must_use]
    pub fn with_duration(duration: Option<f64>) -> Self {
        Self {
            muted: false,
            paused: true,
            volume: 1.0,
            current_time: 0.0,
            duration,
            reject_play: false,
            reject_seek: false,
            seeks: Vec::new(),
            play_calls: 0,
        }
    }
}

impl Default for FakeAudio {
    fn default() -> Self {
        Self::with_duration(Some(180.0))
    }
}

impl AudioOutput for FakeAudio {
    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn seek(&mut self, seconds: f64) -> Result<(), DomainError> {
        if self.reject_seek {
            return Err(DomainError::Audio("not seekable yet".into()));
        }
        self.seeks.push(seconds);
        self.current_time = seconds;
        Ok(())
    }

    fn play(&mut self) -> Result<(), DomainError> {
        self.play_calls += 1;
        if self.reject_play {
            return Err(DomainError::Audio("autoplay blocked".into()));
        }
        self.paused = false;
        Ok(())
    }
}
