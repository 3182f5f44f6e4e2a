//! Domain layer for the narrative context.

pub mod events;
pub mod navigator;
pub mod scene;
