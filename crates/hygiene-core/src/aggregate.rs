//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for in-memory aggregate roots that record the events they apply.
///
/// Unlike a persisted aggregate, events are applied the moment they are
/// produced; the pending list only exists so callers can observe what changed.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the number of events applied so far.
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Events produced since the last drain.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Drains and returns the events produced since the last drain.
    fn take_uncommitted_events(&mut self) -> Vec<Self::Event>;
}
