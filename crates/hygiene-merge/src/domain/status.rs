//! Resolution statuses and the per-section state map.

use std::collections::BTreeMap;

use hygiene_core::id::SectionId;
use serde::{Deserialize, Serialize};

/// What the user picked for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    /// Keep the first (fragile) variant.
    Left,
    /// Keep the second (hygienic) variant.
    Right,
    /// Keep a synthesized merge of both.
    Both,
}

impl Choice {
    /// The status a committed choice produces.
    #[must_use]
    pub fn status(self) -> ResolutionStatus {
        match self {
            Self::Left => ResolutionStatus::ResolvedLeft,
            Self::Right => ResolutionStatus::ResolvedRight,
            Self::Both => ResolutionStatus::ResolvedBoth,
        }
    }
}

/// Resolution status of a single section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// No choice committed yet.
    #[default]
    Unresolved,
    /// First variant chosen.
    ResolvedLeft,
    /// Second variant chosen.
    ResolvedRight,
    /// Hybrid of both variants chosen.
    ResolvedBoth,
}

impl ResolutionStatus {
    /// Returns `true` for any status other than `Unresolved`.
    #[must_use]
    pub fn is_resolved(self) -> bool {
        self != Self::Unresolved
    }
}

/// Snapshot of every section's status, keyed by section id.
///
/// The key set always equals the catalog's id set; only the merge session
/// can change entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionState(BTreeMap<SectionId, ResolutionStatus>);

impl ResolutionState {
    /// Every id mapped to `Unresolved`.
    pub(crate) fn unresolved<'a>(ids: impl IntoIterator<Item = &'a SectionId>) -> Self {
        Self(
            ids.into_iter()
                .map(|id| (id.clone(), ResolutionStatus::Unresolved))
                .collect(),
        )
    }

    /// Overwrites an existing entry. Returns the previous status, or `None`
    /// (and changes nothing) if `id` is not a key.
    pub(crate) fn replace(
        &mut self,
        id: &SectionId,
        status: ResolutionStatus,
    ) -> Option<ResolutionStatus> {
        self.0
            .get_mut(id)
            .map(|slot| std::mem::replace(slot, status))
    }

    /// Status of one section.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ResolutionStatus> {
        self.0.get(id).copied()
    }

    /// Returns `true` if `id` is a key.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries ordered by section id.
    pub fn iter(&self) -> impl Iterator<Item = (&SectionId, ResolutionStatus)> {
        self.0.iter().map(|(id, status)| (id, *status))
    }

    /// Number of entries with exactly `status`.
    #[must_use]
    pub fn count(&self, status: ResolutionStatus) -> usize {
        self.0.values().filter(|s| **s == status).count()
    }

    /// Number of entries that are not `Unresolved`.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.0.values().filter(|s| s.is_resolved()).count()
    }
}
