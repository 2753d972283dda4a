//! Domain events for the merge session.

use hygiene_core::event::{DomainEvent, EventMetadata};
use hygiene_core::id::SectionId;
use serde::{Deserialize, Serialize};

use super::status::{Choice, ResolutionStatus};

/// Event type for [`SessionStarted`].
pub const SESSION_STARTED_EVENT_TYPE: &str = "merge.session_started";
/// Event type for [`SectionResolved`].
pub const SECTION_RESOLVED_EVENT_TYPE: &str = "merge.section_resolved";
/// Event type for [`SessionReset`].
pub const SESSION_RESET_EVENT_TYPE: &str = "merge.session_reset";

/// Emitted once when a session is initialized from a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    /// Every catalog section, in catalog order.
    pub section_ids: Vec<SectionId>,
    /// Hash of the catalog the session runs against.
    pub catalog_hash: String,
}

/// Emitted when a commit lands on a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionResolved {
    /// The section that was resolved.
    pub section_id: SectionId,
    /// The committed choice.
    pub choice: Choice,
    /// Status before the commit.
    pub previous: ResolutionStatus,
}

/// Emitted when the user resets every section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReset {
    /// Every catalog section at the time of the reset.
    pub section_ids: Vec<SectionId>,
    /// How many resets the session has seen, including this one.
    pub epoch: u64,
}

/// Event payload variants for the merge session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergeEventKind {
    /// The session was initialized.
    SessionStarted(SessionStarted),
    /// A section's status changed.
    SectionResolved(SectionResolved),
    /// All sections were returned to `Unresolved`.
    SessionReset(SessionReset),
}

/// Domain event envelope for the merge session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: MergeEventKind,
}

impl MergeEventKind {
    /// The type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => SESSION_STARTED_EVENT_TYPE,
            Self::SectionResolved(_) => SECTION_RESOLVED_EVENT_TYPE,
            Self::SessionReset(_) => SESSION_RESET_EVENT_TYPE,
        }
    }
}

impl DomainEvent for MergeEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.kind)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
