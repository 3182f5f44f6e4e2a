//! Heartline: background audio session bounded context.
//!
//! Responsible for carrying one music track across independent page loads:
//! estimating where playback should resume, seeking exactly once, honouring
//! the persisted mute flag, and writing position snapshots back to the
//! durable store.

pub mod application;
pub mod domain;
