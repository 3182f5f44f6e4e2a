//! Heartline Core: shared abstractions.
//!
//! This crate defines the ports every scene context depends on: time,
//! randomness, key/value persistence, the audio resource and the decorative
//! effects collaborator. It contains no infrastructure code.

pub mod audio;
pub mod clock;
pub mod effects;
pub mod engine;
pub mod error;
pub mod event;
pub mod rng;
pub mod store;
