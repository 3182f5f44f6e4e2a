//! Heartline: headless page runtime.
//!
//! Wires the bounded contexts into pages: one page load initializes the
//! audio session, the navigator and exactly one scene controller, then a
//! single-threaded driver feeds it time and input until it hands off.

pub mod audio;
pub mod autopilot;
pub mod config;
pub mod driver;
pub mod effects;
pub mod error;
pub mod page;
pub mod surface;
