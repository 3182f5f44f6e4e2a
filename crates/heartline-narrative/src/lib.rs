//! Heartline: scene progression and navigation bounded context.
//!
//! Responsible for the fixed scene order, the page each scene lives on, and
//! the hand-off from one page to the next.

pub mod domain;
