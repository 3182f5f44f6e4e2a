//! Domain layer for the interactions context.

pub mod celebration;
pub mod events;
pub mod gallery;
pub mod hold;
pub mod target_game;
pub mod typewriter;
