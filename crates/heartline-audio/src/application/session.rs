//! Audio session controller.
//!
//! One `AudioSession` exists per page. It owns no resources itself: the
//! audio output, the stores and the clock are passed into every call, the
//! same way command handlers receive their repository.

use heartline_core::audio::{AudioOutput, AudioResourceEvent};
use heartline_core::clock::Clock;
use heartline_core::event::EventMetadata;
use heartline_core::store::{StoreKey, Stores};

use crate::domain::estimator::{desired_start_seconds, seek_target};
use crate::domain::events::{AudioEvent, AudioEventKind};
use crate::domain::persisted::{PersistedAudioState, PositionSnapshot, encode_flag};

/// Interval between periodic position snapshots.
pub const PERSIST_INTERVAL_MS: u64 = 700;

/// How long the missing-asset advisory stays on screen.
pub const ASSET_ADVISORY_MS: u64 = 3200;

/// Lifecycle of the page's audio resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPhase {
    /// No seek has been applied yet.
    Unstarted,
    /// The start seek was applied; waiting for the resource to report play or pause.
    Seeking,
    Playing,
    Paused,
    /// The resource failed to load. Terminal for this page.
    Errored,
}

/// Per-page settings for an audio session.
#[derive(Debug, Clone)]
pub struct AudioSessionConfig {
    /// Output volume for this scene.
    pub volume: f64,
    /// Asset path named in the advisory when loading fails.
    pub asset_path: String,
}

/// Controller for the single background-music resource of a page.
#[derive(Debug)]
pub struct AudioSession {
    config: AudioSessionConfig,
    phase: AudioPhase,
    cold_start: bool,
    desired_start_seconds: f64,
    has_seeked: bool,
    metadata_handled: bool,
    can_play_handled: bool,
    toggle_enabled: bool,
    since_persist_ms: u64,
    page_time_ms: u64,
    next_sequence: u64,
    uncommitted_events: Vec<AudioEvent>,
}

impl AudioSession {
    /// Initializes the session for a freshly loaded page.
    ///
    /// On the first page of a browsing session the stored position keys are
    /// cleared before anything is estimated, and the session marker is
    /// written. The mute flag always survives. Store failures are logged and
    /// fall back to a cold start with defaults.
    pub fn start(
        config: AudioSessionConfig,
        audio: &mut dyn AudioOutput,
        stores: Stores<'_>,
        clock: &dyn Clock,
    ) -> Self {
        let cold_start = match stores.session.get(StoreKey::SessionMarker) {
            Ok(marker) => marker.is_none(),
            Err(e) => {
                tracing::warn!(error = %e, "session marker unreadable; treating page as a cold start");
                true
            }
        };

        if cold_start {
            if let Err(e) = stores.session.set(StoreKey::SessionMarker, "1") {
                tracing::warn!(error = %e, "failed to write session marker");
            }
            for key in StoreKey::POSITION_KEYS {
                if let Err(e) = stores.durable.remove(key) {
                    tracing::warn!(key = key.as_str(), error = %e, "failed to clear stale position");
                }
            }
        }

        let persisted = PersistedAudioState::load(stores.durable).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "persisted audio state unreadable; using defaults");
            PersistedAudioState::default()
        });
        let desired = desired_start_seconds(&persisted, clock.now_millis());

        audio.set_volume(config.volume);
        audio.set_muted(persisted.muted);

        let mut session = Self {
            config,
            phase: AudioPhase::Unstarted,
            cold_start,
            desired_start_seconds: desired,
            has_seeked: false,
            metadata_handled: false,
            can_play_handled: false,
            toggle_enabled: true,
            since_persist_ms: 0,
            page_time_ms: 0,
            next_sequence: 1,
            uncommitted_events: Vec::new(),
        };

        tracing::info!(
            cold_start,
            muted = persisted.muted,
            desired_start_seconds = desired,
            "audio session started"
        );
        session.record(AudioEventKind::SessionStarted {
            cold_start,
            muted: persisted.muted,
            desired_start_seconds: desired,
        });

        if !persisted.muted {
            session.attempt_play(audio);
        }
        session
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> AudioPhase {
        self.phase
    }

    /// Returns `true` if this page started a new browsing session.
    #[must_use]
    pub fn is_cold_start(&self) -> bool {
        self.cold_start
    }

    /// Returns the offset playback should resume at, before clamping.
    #[must_use]
    pub fn desired_start_seconds(&self) -> f64 {
        self.desired_start_seconds
    }

    /// Returns whether the mute toggle accepts input.
    #[must_use]
    pub fn toggle_enabled(&self) -> bool {
        self.toggle_enabled
    }

    /// Label for the mute toggle, reflecting intended rather than actual
    /// playback state.
    #[must_use]
    pub fn toggle_label(&self, audio: &dyn AudioOutput) -> &'static str {
        if self.phase == AudioPhase::Errored {
            "\u{26a0} No Music"
        } else if audio.is_muted() {
            "\u{1f507} Music"
        } else {
            "\u{1f50a} Music"
        }
    }

    /// Message shown when the asset cannot be loaded.
    #[must_use]
    pub fn asset_advisory(&self) -> String {
        format!(
            "Music file missing/invalid. Replace {}",
            self.config.asset_path
        )
    }

    /// Reacts to a notification from the audio resource.
    pub fn handle_resource_event(
        &mut self,
        event: AudioResourceEvent,
        audio: &mut dyn AudioOutput,
        stores: Stores<'_>,
        clock: &dyn Clock,
    ) {
        if self.phase == AudioPhase::Errored {
            return;
        }

        match event {
            AudioResourceEvent::MetadataLoaded => {
                if !self.metadata_handled {
                    self.metadata_handled = true;
                    self.apply_start_time(audio);
                }
            }
            AudioResourceEvent::CanPlay => {
                if !self.can_play_handled {
                    self.can_play_handled = true;
                    self.apply_start_time(audio);
                    if !audio.is_muted() {
                        self.attempt_play(audio);
                    }
                }
            }
            AudioResourceEvent::Playing => {
                self.phase = AudioPhase::Playing;
                self.persist(audio, stores, clock);
            }
            AudioResourceEvent::Paused => {
                self.phase = AudioPhase::Paused;
                self.persist(audio, stores, clock);
            }
            AudioResourceEvent::Failed => {
                self.phase = AudioPhase::Errored;
                self.toggle_enabled = false;
                tracing::warn!(asset = %self.config.asset_path, "audio asset failed to load");
                self.record(AudioEventKind::AssetUnavailable {
                    asset_path: self.config.asset_path.clone(),
                });
            }
        }
    }

    /// Flips the mute flag, persists it, and tries to play when unmuting.
    /// Does nothing once the toggle has been disabled.
    pub fn toggle_mute(
        &mut self,
        audio: &mut dyn AudioOutput,
        stores: Stores<'_>,
        clock: &dyn Clock,
    ) {
        if !self.toggle_enabled {
            return;
        }

        let muted = !audio.is_muted();
        audio.set_muted(muted);
        if let Err(e) = stores.durable.set(StoreKey::Muted, encode_flag(muted)) {
            tracing::warn!(error = %e, "failed to persist mute flag");
        }
        if !muted {
            self.attempt_play(audio);
        }
        tracing::info!(muted, "mute toggled");
        self.record(AudioEventKind::MuteToggled { muted });
        self.persist(audio, stores, clock);
    }

    /// Writes the current position snapshot to the durable store.
    pub fn persist(&self, audio: &dyn AudioOutput, stores: Stores<'_>, clock: &dyn Clock) {
        let snapshot = PositionSnapshot {
            position_seconds: audio.current_time(),
            timestamp_ms: clock.now_millis(),
            playing: !audio.is_paused(),
        };
        match snapshot.write(stores.durable) {
            Ok(()) => tracing::trace!(
                position_seconds = snapshot.position_seconds,
                playing = snapshot.playing,
                "audio position persisted"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to persist audio position"),
        }
    }

    /// Feeds elapsed time; persists once whenever the periodic interval
    /// has passed.
    pub fn advance(
        &mut self,
        elapsed_ms: u64,
        audio: &dyn AudioOutput,
        stores: Stores<'_>,
        clock: &dyn Clock,
    ) {
        self.page_time_ms += elapsed_ms;
        self.since_persist_ms += elapsed_ms;
        if self.since_persist_ms >= PERSIST_INTERVAL_MS {
            self.since_persist_ms %= PERSIST_INTERVAL_MS;
            self.persist(audio, stores, clock);
        }
    }

    /// Returns events produced since the last clear.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[AudioEvent] {
        &self.uncommitted_events
    }

    /// Clears uncommitted events after they have been applied.
    pub fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }

    fn apply_start_time(&mut self, audio: &mut dyn AudioOutput) {
        if self.has_seeked {
            return;
        }
        let target = seek_target(self.desired_start_seconds, audio.duration());
        match audio.seek(target) {
            Ok(()) => {
                self.has_seeked = true;
                if self.phase == AudioPhase::Unstarted {
                    self.phase = AudioPhase::Seeking;
                }
                tracing::debug!(seconds = target, "start seek applied");
                self.record(AudioEventKind::SeekApplied { seconds: target });
            }
            Err(e) => tracing::debug!(error = %e, "start seek deferred"),
        }
    }

    fn attempt_play(&mut self, audio: &mut dyn AudioOutput) {
        self.apply_start_time(audio);
        if let Err(e) = audio.play() {
            tracing::debug!(error = %e, "playback rejected by host");
            self.record(AudioEventKind::PlaybackRejected {
                reason: e.to_string(),
            });
        }
    }

    fn record(&mut self, kind: AudioEventKind) {
        let event = AudioEvent {
            metadata: EventMetadata {
                event_type: AudioEvent::type_name(&kind).to_owned(),
                sequence_number: self.next_sequence,
                page_time_ms: self.page_time_ms,
            },
            kind,
        };
        self.next_sequence += 1;
        self.uncommitted_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartline_core::store::KeyValueStore;
    use heartline_store::MemoryStore;
    use heartline_test_support::{FailingStore, FakeAudio, FixedClock, ManualClock, fixed_now};

    fn config() -> AudioSessionConfig {
        AudioSessionConfig {
            volume: 0.3,
            asset_path: "assets/music/ambient-love.mp3".to_owned(),
        }
    }

    fn stores<'a>(durable: &'a MemoryStore, session: &'a MemoryStore) -> Stores<'a> {
        Stores { durable, session }
    }

    #[test]
    fn test_first_visit_defaults_to_muted_and_does_not_autoplay() {
        // Arrange
        let durable = MemoryStore::new();
        let session = MemoryStore::new();
        let mut audio = FakeAudio::default();
        let clock = FixedClock(fixed_now());

        // Act
        let audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Assert
        assert!(audio.muted);
        assert_eq!(audio.play_calls, 0);
        assert!((audio.volume - 0.3).abs() < f64::EPSILON);
        assert!(audio_session.is_cold_start());
        assert_eq!(audio_session.phase(), AudioPhase::Unstarted);
        assert_eq!(session.get(StoreKey::SessionMarker).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_cold_start_clears_position_but_keeps_mute_flag() {
        // Arrange
        let now_ms = fixed_now().timestamp_millis();
        let durable = MemoryStore::with_entries([
            (StoreKey::Muted, "0".to_owned()),
            (StoreKey::PositionSeconds, "40".to_owned()),
            (StoreKey::PositionTimestampMs, (now_ms - 5_000).to_string()),
            (StoreKey::WasPlaying, "1".to_owned()),
        ]);
        let session = MemoryStore::new();
        let mut audio = FakeAudio::default();
        let clock = FixedClock(fixed_now());

        // Act
        let audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Assert
        assert!(audio_session.desired_start_seconds().abs() < f64::EPSILON);
        for key in StoreKey::POSITION_KEYS {
            assert_eq!(durable.get(key).unwrap(), None);
        }
        assert_eq!(durable.get(StoreKey::Muted).unwrap().as_deref(), Some("0"));
        assert!(!audio.muted);
    }

    #[test]
    fn test_warm_page_resumes_where_previous_page_left_off() {
        // Arrange
        let now_ms = fixed_now().timestamp_millis();
        let durable = MemoryStore::with_entries([
            (StoreKey::Muted, "0".to_owned()),
            (StoreKey::PositionSeconds, "40".to_owned()),
            (StoreKey::PositionTimestampMs, (now_ms - 5_000).to_string()),
            (StoreKey::WasPlaying, "1".to_owned()),
        ]);
        let session = MemoryStore::with_entries([(StoreKey::SessionMarker, "1")]);
        let mut audio = FakeAudio::default();
        let clock = FixedClock(fixed_now());

        // Act
        let audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Assert
        assert!(!audio_session.is_cold_start());
        assert!((audio_session.desired_start_seconds() - 45.0).abs() < 1e-9);
        assert_eq!(audio.seeks, vec![45.0]);
        assert_eq!(audio.play_calls, 1);
        assert_eq!(audio_session.phase(), AudioPhase::Seeking);
    }

    #[test]
    fn test_seek_happens_only_once_across_metadata_and_can_play() {
        // Arrange
        let durable = MemoryStore::with_entries([(StoreKey::PositionSeconds, "30")]);
        let session = MemoryStore::with_entries([(StoreKey::SessionMarker, "1")]);
        let mut audio = FakeAudio::with_duration(Some(20.0));
        let clock = FixedClock(fixed_now());
        let mut audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Act
        for event in [
            AudioResourceEvent::MetadataLoaded,
            AudioResourceEvent::CanPlay,
            AudioResourceEvent::MetadataLoaded,
            AudioResourceEvent::CanPlay,
        ] {
            audio_session.handle_resource_event(
                event,
                &mut audio,
                stores(&durable, &session),
                &clock,
            );
        }

        // Assert
        assert_eq!(audio.seeks, vec![19.75]);
        assert_eq!(audio.play_calls, 0, "muted sessions never autoplay");
    }

    #[test]
    fn test_failed_seek_is_retried_on_next_opportunity() {
        // Arrange
        let durable = MemoryStore::with_entries([(StoreKey::PositionSeconds, "30")]);
        let session = MemoryStore::with_entries([(StoreKey::SessionMarker, "1")]);
        let mut audio = FakeAudio::default();
        audio.reject_seek = true;
        let clock = FixedClock(fixed_now());
        let mut audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Act
        audio_session.handle_resource_event(
            AudioResourceEvent::MetadataLoaded,
            &mut audio,
            stores(&durable, &session),
            &clock,
        );
        audio.reject_seek = false;
        audio_session.handle_resource_event(
            AudioResourceEvent::CanPlay,
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Assert
        assert_eq!(audio.seeks, vec![30.0]);
    }

    #[test]
    fn test_rejected_autoplay_is_swallowed_and_toggle_keeps_intended_state() {
        // Arrange
        let durable = MemoryStore::with_entries([(StoreKey::Muted, "0")]);
        let session = MemoryStore::new();
        let mut audio = FakeAudio::default();
        audio.reject_play = true;
        let clock = FixedClock(fixed_now());

        // Act
        let audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Assert
        assert_eq!(audio.play_calls, 1);
        assert!(audio.paused);
        assert_eq!(audio_session.toggle_label(&audio), "\u{1f50a} Music");
        assert!(audio_session.uncommitted_events().iter().any(|e| matches!(
            e.kind,
            AudioEventKind::PlaybackRejected { .. }
        )));
    }

    #[test]
    fn test_toggle_persists_flag_and_plays_when_unmuting() {
        // Arrange
        let durable = MemoryStore::new();
        let session = MemoryStore::new();
        let mut audio = FakeAudio::default();
        let clock = FixedClock(fixed_now());
        let mut audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Act
        audio_session.toggle_mute(&mut audio, stores(&durable, &session), &clock);

        // Assert
        assert!(!audio.muted);
        assert_eq!(audio.play_calls, 1);
        assert_eq!(durable.get(StoreKey::Muted).unwrap().as_deref(), Some("0"));
        assert_eq!(durable.get(StoreKey::WasPlaying).unwrap().as_deref(), Some("1"));

        // Act
        audio_session.toggle_mute(&mut audio, stores(&durable, &session), &clock);

        // Assert
        assert!(audio.muted);
        assert_eq!(audio.play_calls, 1);
        assert_eq!(durable.get(StoreKey::Muted).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_asset_failure_disables_toggle_and_reports_path() {
        // Arrange
        let durable = MemoryStore::new();
        let session = MemoryStore::new();
        let mut audio = FakeAudio::default();
        let clock = FixedClock(fixed_now());
        let mut audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Act
        audio_session.handle_resource_event(
            AudioResourceEvent::Failed,
            &mut audio,
            stores(&durable, &session),
            &clock,
        );
        audio_session.toggle_mute(&mut audio, stores(&durable, &session), &clock);
        audio_session.handle_resource_event(
            AudioResourceEvent::Playing,
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Assert
        assert_eq!(audio_session.phase(), AudioPhase::Errored);
        assert!(!audio_session.toggle_enabled());
        assert!(audio.muted, "disabled toggle ignores clicks");
        assert_eq!(audio_session.toggle_label(&audio), "\u{26a0} No Music");
        assert!(audio_session
            .asset_advisory()
            .contains("assets/music/ambient-love.mp3"));
        let unavailable = audio_session
            .uncommitted_events()
            .iter()
            .filter(|e| matches!(e.kind, AudioEventKind::AssetUnavailable { .. }))
            .count();
        assert_eq!(unavailable, 1);
    }

    #[test]
    fn test_periodic_persistence_every_interval() {
        // Arrange
        let durable = MemoryStore::new();
        let session = MemoryStore::new();
        let mut audio = FakeAudio::default();
        let clock = ManualClock::new(fixed_now());
        let mut audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );
        audio.current_time = 3.5;
        audio.paused = false;

        // Act
        audio_session.advance(699, &audio, stores(&durable, &session), &clock);

        // Assert
        assert_eq!(durable.get(StoreKey::PositionSeconds).unwrap(), None);

        // Act
        clock.advance_ms(1);
        audio_session.advance(1, &audio, stores(&durable, &session), &clock);

        // Assert
        assert_eq!(
            durable.get(StoreKey::PositionSeconds).unwrap().as_deref(),
            Some("3.5")
        );
        assert_eq!(
            durable.get(StoreKey::PositionTimestampMs).unwrap(),
            Some(clock.now_millis().to_string())
        );
        assert_eq!(durable.get(StoreKey::WasPlaying).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_play_and_pause_events_update_phase_and_persist() {
        // Arrange
        let durable = MemoryStore::new();
        let session = MemoryStore::new();
        let mut audio = FakeAudio::default();
        let clock = FixedClock(fixed_now());
        let mut audio_session = AudioSession::start(
            config(),
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Act
        audio.paused = false;
        audio_session.handle_resource_event(
            AudioResourceEvent::Playing,
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Assert
        assert_eq!(audio_session.phase(), AudioPhase::Playing);
        assert_eq!(durable.get(StoreKey::WasPlaying).unwrap().as_deref(), Some("1"));

        // Act
        audio.paused = true;
        audio_session.handle_resource_event(
            AudioResourceEvent::Paused,
            &mut audio,
            stores(&durable, &session),
            &clock,
        );

        // Assert
        assert_eq!(audio_session.phase(), AudioPhase::Paused);
        assert_eq!(durable.get(StoreKey::WasPlaying).unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn test_store_failures_never_propagate() {
        // Arrange
        let mut audio = FakeAudio::default();
        let clock = FixedClock(fixed_now());
        let failing = Stores {
            durable: &FailingStore,
            session: &FailingStore,
        };

        // Act
        let mut audio_session = AudioSession::start(config(), &mut audio, failing, &clock);
        audio_session.toggle_mute(&mut audio, failing, &clock);
        audio_session.persist(&audio, failing, &clock);

        // Assert
        assert!(audio_session.is_cold_start());
        assert!(!audio.muted);
    }
}
