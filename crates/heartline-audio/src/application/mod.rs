//! Application layer for the audio session context.

pub mod session;
