//! Timed interaction engine abstraction.

use crate::event::DomainEvent;

/// Trait for the explicit-state engines that gate scene progression.
///
/// An engine is advanced by a driver feeding it elapsed wall-clock time; it
/// never schedules real timers itself. Input handlers live on the concrete
/// types because each engine accepts different input.
pub trait InteractionEngine {
    /// The event type this engine produces.
    type Event: DomainEvent;

    /// Short name used in log output.
    fn engine_name(&self) -> &'static str;

    /// Feeds `elapsed_ms` of wall-clock time into the engine.
    fn advance(&mut self, elapsed_ms: u64);

    /// Returns `true` once the engine will not react to further time.
    fn is_settled(&self) -> bool;

    /// Returns events produced since the last clear.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears uncommitted events after they have been applied.
    fn clear_uncommitted_events(&mut self);
}
