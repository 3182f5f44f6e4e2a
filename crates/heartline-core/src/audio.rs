//! Audio resource abstraction.
//!
//! Decoding and output are out of scope; the scene engine only drives the
//! lifecycle of a single resource through this port.

use crate::error::DomainError;

/// Notifications raised by the audio resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioResourceEvent {
    /// Duration and other metadata became available.
    MetadataLoaded,
    /// Enough data is buffered to start playback.
    CanPlay,
    /// Playback started.
    Playing,
    /// Playback paused.
    Paused,
    /// The resource failed to load.
    Failed,
}

/// The single background-music resource of a page.
pub trait AudioOutput: Send {
    /// Sets the output volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f64);

    /// Mutes or unmutes output without affecting playback position.
    fn set_muted(&mut self, muted: bool);

    /// Returns whether output is muted.
    fn is_muted(&self) -> bool;

    /// Returns whether playback is paused.
    fn is_paused(&self) -> bool;

    /// Returns the playback position in seconds.
    fn current_time(&self) -> f64;

    /// Returns the resource duration, or `None` while unknown.
    fn duration(&self) -> Option<f64>;

    /// Moves the playback position.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Audio` if the resource cannot seek yet.
    fn seek(&mut self, seconds: f64) -> Result<(), DomainError>;

    /// Requests playback.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Audio` if the host refuses to start playback.
    fn play(&mut self) -> Result<(), DomainError>;
}
