//! Domain layer for the audio session context.

pub mod estimator;
pub mod events;
pub mod persisted;
