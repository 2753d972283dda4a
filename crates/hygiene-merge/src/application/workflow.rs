//! Delayed commit workflow for section resolutions.
//!
//! Each section moves `Idle -> Pending(choice) -> Committed -> Idle`. The
//! pending phase lasts for one injected [`CommitDelay`]; afterwards the choice
//! is written to the [`MergeSession`]. Pending commits are tracked per section
//! with a ticket, and a reset drops every ticket so a commit that wakes up
//! after the reset finds nothing to write.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hygiene_content::{Catalog, Variant};
use hygiene_core::aggregate::AggregateRoot;
use hygiene_core::command::Command;
use hygiene_core::config::MergeConfig;
use hygiene_core::error::DomainError;
use hygiene_core::event::DomainEvent;
use hygiene_core::id::SectionId;
use hygiene_core::time::{Clock, CommitDelay, SystemClock};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::query_handlers::{self, MergeSessionView, MergeSummary};
use crate::domain::aggregates::MergeSession;
use crate::domain::commands::{ResetAll, ResolveSection};
use crate::domain::events::MergeEvent;
use crate::domain::metrics::DerivedMetrics;
use crate::domain::resolved;
use crate::domain::status::{Choice, ResolutionState, ResolutionStatus};

/// Where a section stands in the commit workflow.
///
/// `Committed` is transient: it is reported once through
/// [`CommitOutcome::Committed`] and the section is `Idle` again afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "choice", rename_all = "snake_case")]
pub enum CommitPhase {
    /// No commit in flight.
    Idle,
    /// A commit for this choice is waiting out the delay.
    Pending(Choice),
}

/// State, metrics and the events produced by one change.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeSnapshot {
    /// Every section's status after the change.
    pub state: ResolutionState,
    /// Metrics recomputed from `state`.
    pub metrics: DerivedMetrics,
    /// Events the change produced, in order.
    pub events: Vec<MergeEvent>,
}

impl MergeSnapshot {
    /// The events as JSON payloads, in order, for a presentation layer.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a payload cannot be represented.
    pub fn event_payloads(&self) -> Result<Vec<serde_json::Value>, serde_json::Error> {
        self.events.iter().map(MergeEvent::to_payload).collect()
    }
}

/// Result of a resolve request that was accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// The choice was written.
    Committed(MergeSnapshot),
    /// A reset happened while the commit was pending; nothing was written.
    Superseded,
}

#[derive(Debug)]
struct PendingCommit {
    ticket: u64,
    choice: Choice,
}

#[derive(Debug)]
struct Desk {
    session: MergeSession,
    pending: HashMap<SectionId, PendingCommit>,
    next_ticket: u64,
}

impl Desk {
    fn phase(&self, section_id: &str) -> CommitPhase {
        self.pending
            .get(section_id)
            .map_or(CommitPhase::Idle, |p| CommitPhase::Pending(p.choice))
    }

    fn snapshot(&mut self) -> MergeSnapshot {
        MergeSnapshot {
            events: self.session.take_uncommitted_events(),
            state: self.session.state().clone(),
            metrics: self.session.metrics(),
        }
    }
}

/// Orchestrates resolve and reset requests against one merge session.
pub struct ResolutionWorkflow {
    desk: Mutex<Desk>,
    clock: Arc<dyn Clock>,
    delay: Arc<dyn CommitDelay>,
}

impl std::fmt::Debug for ResolutionWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionWorkflow")
            .field("desk", &self.desk)
            .finish_non_exhaustive()
    }
}

impl ResolutionWorkflow {
    /// Starts a session over `catalog` with every section `Unresolved`.
    #[must_use]
    pub fn new(
        catalog: Arc<Catalog>,
        clock: Arc<dyn Clock>,
        delay: Arc<dyn CommitDelay>,
    ) -> Self {
        let mut session =
            MergeSession::start(Uuid::new_v4(), catalog, Uuid::new_v4(), clock.as_ref());
        session.take_uncommitted_events();
        info!(
            session_id = %session.aggregate_id(),
            sections = session.catalog().len(),
            "merge session started"
        );

        Self {
            desk: Mutex::new(Desk {
                session,
                pending: HashMap::new(),
                next_ticket: 0,
            }),
            clock,
            delay,
        }
    }

    /// Starts a session using the system clock and the configured delay.
    #[must_use]
    pub fn from_config(catalog: Arc<Catalog>, config: &MergeConfig) -> Self {
        Self::new(catalog, Arc::new(SystemClock), Arc::new(config.sleep_delay()))
    }

    fn desk(&self) -> MutexGuard<'_, Desk> {
        self.desk.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves one section after the commit delay.
    ///
    /// Other sections stay resolvable while this one is pending.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownSection` if the id is not in the catalog,
    /// or `DomainError::ConcurrentResolution` if the section already has a
    /// commit in flight. Neither changes any state.
    #[instrument(
        skip(self, command),
        fields(
            section_id = %command.section_id,
            choice = ?command.choice,
            correlation_id = %command.correlation_id,
        )
    )]
    pub async fn resolve_section(
        &self,
        command: &ResolveSection,
    ) -> Result<CommitOutcome, DomainError> {
        let ticket = self.begin(command)?;
        let _guard = PendingGuard {
            workflow: self,
            section_id: &command.section_id,
            ticket,
        };

        self.delay.wait().await;

        self.commit(command, ticket)
    }

    fn begin(&self, command: &ResolveSection) -> Result<u64, DomainError> {
        let mut desk = self.desk();
        let section_id = &command.section_id;

        if !desk.session.state().contains(section_id.as_str()) {
            warn!("resolve rejected: unknown section");
            return Err(DomainError::UnknownSection(section_id.clone()));
        }
        if desk.pending.contains_key(section_id) {
            warn!("resolve rejected: commit already pending");
            return Err(DomainError::ConcurrentResolution(section_id.clone()));
        }

        desk.next_ticket += 1;
        let ticket = desk.next_ticket;
        desk.pending.insert(
            section_id.clone(),
            PendingCommit {
                ticket,
                choice: command.choice,
            },
        );
        info!(ticket, "resolution pending");
        Ok(ticket)
    }

    fn commit(
        &self,
        command: &ResolveSection,
        ticket: u64,
    ) -> Result<CommitOutcome, DomainError> {
        let mut desk = self.desk();
        let section_id = &command.section_id;

        let pending = match desk.pending.entry(section_id.clone()) {
            Entry::Occupied(entry) if entry.get().ticket == ticket => entry.remove(),
            _ => {
                warn!(ticket, "pending commit superseded by reset, discarding");
                return Ok(CommitOutcome::Superseded);
            }
        };

        desk.session.resolve(
            section_id,
            pending.choice,
            command.correlation_id,
            self.clock.as_ref(),
        )?;
        let snapshot = desk.snapshot();
        info!(
            progress = snapshot.metrics.progress,
            score = snapshot.metrics.score,
            complete = snapshot.metrics.complete,
            "resolution committed"
        );
        Ok(CommitOutcome::Committed(snapshot))
    }

    /// Returns every section to `Unresolved` and discards pending commits.
    pub fn reset_all(&self, command: &ResetAll) -> MergeSnapshot {
        let _span = command.span().entered();
        let mut desk = self.desk();

        let discarded = desk.pending.len();
        desk.pending.clear();
        desk.session.reset(command.correlation_id, self.clock.as_ref());

        if discarded > 0 {
            warn!(discarded, "reset superseded pending commits");
        }
        info!(epoch = desk.session.epoch(), "merge session reset");
        desk.snapshot()
    }

    /// Current state and metrics, without draining events.
    #[must_use]
    pub fn snapshot(&self) -> MergeSnapshot {
        let desk = self.desk();
        MergeSnapshot {
            state: desk.session.state().clone(),
            metrics: desk.session.metrics(),
            events: Vec::new(),
        }
    }

    /// Current status of one section.
    #[must_use]
    pub fn status(&self, section_id: &str) -> Option<ResolutionStatus> {
        self.desk().session.status(section_id)
    }

    /// Current workflow phase of one section. Unknown ids are `Idle`.
    #[must_use]
    pub fn phase(&self, section_id: &str) -> CommitPhase {
        self.desk().phase(section_id)
    }

    /// Readable content for a section under its current status.
    #[must_use]
    pub fn resolved_content(&self, section_id: &str) -> Option<Variant> {
        let desk = self.desk();
        let section = desk.session.catalog().get(section_id)?;
        let status = desk.session.status(section_id)?;
        resolved::resolved_content(section, status)
    }

    /// Metrics plus the closing statements, for the summary screen.
    #[must_use]
    pub fn request_summary(&self) -> MergeSummary {
        query_handlers::get_summary(&self.desk().session)
    }

    /// Everything a presentation layer needs to render the session.
    #[must_use]
    pub fn view(&self) -> MergeSessionView {
        let desk = self.desk();
        query_handlers::get_session_view(&desk.session, |id| desk.phase(id.as_str()))
    }
}

/// Clears a pending ticket if the resolve future is dropped mid-delay.
struct PendingGuard<'a> {
    workflow: &'a ResolutionWorkflow,
    section_id: &'a SectionId,
    ticket: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut desk = self.workflow.desk();
        if desk
            .pending
            .get(self.section_id)
            .is_some_and(|p| p.ticket == self.ticket)
        {
            desk.pending.remove(self.section_id);
        }
    }
}
