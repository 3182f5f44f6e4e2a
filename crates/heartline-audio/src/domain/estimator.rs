//! Playback position estimation.
//!
//! Music is treated as if it kept playing while the user was between pages,
//! so the resume point is the stored offset plus the wall-clock time since
//! it was recorded.

use super::persisted::PersistedAudioState;

/// Offset used when there is no usable stored position.
pub const MUSIC_START_SECONDS: f64 = 0.0;

/// Distance kept from the end of the track when seeking.
pub const SEEK_TAIL_MARGIN_SECONDS: f64 = 0.25;

/// Computes where playback should resume.
///
/// Elapsed time is only added when the track was playing and the stored
/// timestamp is known; a timestamp in the future contributes nothing.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn desired_start_seconds(state: &PersistedAudioState, now_ms: i64) -> f64 {
    let resume_offset = if state.was_playing && state.position_timestamp_ms > 0 {
        (now_ms.saturating_sub(state.position_timestamp_ms) as f64 / 1000.0).max(0.0)
    } else {
        0.0
    };

    if state.position_seconds > 0.0 {
        state.position_seconds + resume_offset
    } else {
        MUSIC_START_SECONDS
    }
}

/// Clamps `desired` so the seek never lands in the last
/// `SEEK_TAIL_MARGIN_SECONDS` of the track.
///
/// An unknown or zero duration falls back to `desired` itself as the length
/// estimate, so the only adjustment is the tail margin.
#[must_use]
pub fn seek_target(desired: f64, duration: Option<f64>) -> f64 {
    let length = duration
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(desired);
    let max_time = (length - SEEK_TAIL_MARGIN_SECONDS).max(0.0);
    desired.min(max_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW_MS: i64 = 1_771_063_200_000;

    fn state(position: f64, stamp: i64, playing: bool) -> PersistedAudioState {
        PersistedAudioState {
            muted: false,
            position_seconds: position,
            position_timestamp_ms: stamp,
            was_playing: playing,
        }
    }

    #[test]
    fn test_playing_state_resumes_with_elapsed_time() {
        let desired = desired_start_seconds(&state(40.0, NOW_MS - 5_000, true), NOW_MS);

        assert!((desired - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_paused_state_ignores_timestamp_age() {
        for age_ms in [0, 5_000, 3_600_000] {
            let desired = desired_start_seconds(&state(40.0, NOW_MS - age_ms, false), NOW_MS);
            assert!((desired - 40.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_timestamp_adds_nothing() {
        let desired = desired_start_seconds(&state(12.0, 0, true), NOW_MS);

        assert!((desired - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_future_timestamp_never_goes_backwards() {
        let desired = desired_start_seconds(&state(12.0, NOW_MS + 60_000, true), NOW_MS);

        assert!((desired - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_position_starts_from_the_beginning() {
        let desired = desired_start_seconds(&state(0.0, NOW_MS - 5_000, true), NOW_MS);

        assert!((desired - MUSIC_START_SECONDS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_desired_start_is_never_negative() {
        for (position, stamp, playing) in [
            (0.0, 0, false),
            (0.5, NOW_MS - 1, true),
            (300.0, NOW_MS + 1, true),
            (7.0, 1, true),
        ] {
            assert!(desired_start_seconds(&state(position, stamp, playing), NOW_MS) >= 0.0);
        }
    }

    #[test]
    fn test_seek_target_respects_known_duration() {
        assert!((seek_target(500.0, Some(180.0)) - 179.75).abs() < 1e-9);
        assert!((seek_target(45.0, Some(180.0)) - 45.0).abs() < 1e-9);
        for desired in [0.0, 10.0, 179.9, 1_000.0] {
            assert!(seek_target(desired, Some(180.0)) <= 180.0 - SEEK_TAIL_MARGIN_SECONDS);
        }
    }

    #[test]
    fn test_seek_target_with_unknown_duration_only_applies_margin() {
        assert!((seek_target(45.0, None) - 44.75).abs() < 1e-9);
        assert!((seek_target(45.0, Some(f64::NAN)) - 44.75).abs() < 1e-9);
        assert!(seek_target(0.1, None).abs() < f64::EPSILON);
        assert!(seek_target(0.0, Some(0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seek_target_for_very_short_track_is_zero() {
        assert!(seek_target(10.0, Some(0.2)).abs() < f64::EPSILON);
    }
}
