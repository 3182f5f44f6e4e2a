//! Shared test fakes and utilities for the Heartline scene engine.

mod audio;
mod clock;
mod effects;
mod rng;
mod store;

pub use audio::FakeAudio;
pub use clock::{FixedClock, ManualClock, fixed_now};
pub use effects::{EffectCall, RecordingEffects};
pub use rng::{MockRng, SequenceRng};
pub use store::FailingStore;
