//! Aggregate root for a merge session: the resolution state store.

use std::sync::Arc;

use hygiene_content::Catalog;
use hygiene_core::aggregate::AggregateRoot;
use hygiene_core::error::DomainError;
use hygiene_core::event::EventMetadata;
use hygiene_core::id::SectionId;
use hygiene_core::time::Clock;
use uuid::Uuid;

use super::events::{MergeEvent, MergeEventKind, SectionResolved, SessionReset, SessionStarted};
use super::metrics::{self, DerivedMetrics};
use super::status::{Choice, ResolutionState, ResolutionStatus};

/// The aggregate root owning one session's resolution state.
#[derive(Debug)]
pub struct MergeSession {
    /// Aggregate identifier.
    pub id: Uuid,
    /// The catalog this session resolves.
    catalog: Arc<Catalog>,
    /// Current status of every section.
    state: ResolutionState,
    /// Number of events applied.
    version: i64,
    /// Number of resets applied.
    epoch: u64,
    /// Events produced since the caller last drained them.
    uncommitted_events: Vec<MergeEvent>,
}

impl MergeSession {
    /// Initializes a session with every catalog section `Unresolved`,
    /// producing a `SessionStarted` event.
    #[must_use]
    pub fn start(
        id: Uuid,
        catalog: Arc<Catalog>,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let mut session = Self {
            id,
            catalog,
            state: ResolutionState::default(),
            version: 0,
            epoch: 0,
            uncommitted_events: Vec::new(),
        };

        let kind = MergeEventKind::SessionStarted(SessionStarted {
            section_ids: session.live_section_ids(),
            catalog_hash: session.catalog.version_hash(),
        });
        session.record(kind, correlation_id, clock);
        session
    }

    /// The all-`Unresolved` state for `catalog`.
    #[must_use]
    pub fn initial_state(catalog: &Catalog) -> ResolutionState {
        ResolutionState::unresolved(catalog.ids())
    }

    /// Commits `choice` for `section_id`, overwriting any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSection` if the id is not in the catalog;
    /// the state is left untouched.
    pub fn resolve(
        &mut self,
        section_id: &SectionId,
        choice: Choice,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<MergeEvent, DomainError> {
        let Some(previous) = self.state.get(section_id.as_str()) else {
            return Err(DomainError::UnknownSection(section_id.clone()));
        };

        let kind = MergeEventKind::SectionResolved(SectionResolved {
            section_id: section_id.clone(),
            choice,
            previous,
        });
        Ok(self.record(kind, correlation_id, clock))
    }

    /// Returns every section to `Unresolved`, re-deriving the key set from
    /// the catalog. Never fails.
    pub fn reset(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> MergeEvent {
        let kind = MergeEventKind::SessionReset(SessionReset {
            section_ids: self.live_section_ids(),
            epoch: self.epoch + 1,
        });
        self.record(kind, correlation_id, clock)
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Status of one section.
    #[must_use]
    pub fn status(&self, section_id: &str) -> Option<ResolutionStatus> {
        self.state.get(section_id)
    }

    /// The catalog this session resolves.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Number of resets applied so far.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Metrics recomputed from the current state.
    #[must_use]
    pub fn metrics(&self) -> DerivedMetrics {
        metrics::compute(self.catalog.len(), &self.state)
    }

    fn live_section_ids(&self) -> Vec<SectionId> {
        self.catalog.ids().cloned().collect()
    }

    /// Returns the next sequence number for a new event.
    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    fn record(
        &mut self,
        kind: MergeEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> MergeEvent {
        let event = MergeEvent {
            metadata: EventMetadata::stamp(
                kind.event_type(),
                self.id,
                self.next_sequence_number(),
                correlation_id,
                clock,
            ),
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event.clone());
        event
    }
}

impl AggregateRoot for MergeSession {
    type Event = MergeEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            MergeEventKind::SessionStarted(payload) => {
                self.state = ResolutionState::unresolved(&payload.section_ids);
            }
            MergeEventKind::SectionResolved(payload) => {
                self.state.replace(&payload.section_id, payload.choice.status());
            }
            MergeEventKind::SessionReset(payload) => {
                self.state = ResolutionState::unresolved(&payload.section_ids);
                self.epoch = payload.epoch;
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
