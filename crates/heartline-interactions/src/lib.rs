//! Heartline: timed interaction engines.
//!
//! Each engine is an explicit state value advanced by elapsed time and fed
//! user input. Engines record events; they never touch the page or the
//! effects collaborator directly.

pub mod domain;
