//! Commands for the merge session.

use hygiene_core::command::Command;
use hygiene_core::id::SectionId;
use uuid::Uuid;

use super::status::Choice;

/// Command to resolve one section with a choice.
#[derive(Debug, Clone)]
pub struct ResolveSection {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The section to resolve.
    pub section_id: SectionId,
    /// The side (or both) to keep.
    pub choice: Choice,
}

impl ResolveSection {
    /// Builds the command with a fresh correlation ID.
    #[must_use]
    pub fn new(section_id: impl Into<SectionId>, choice: Choice) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            section_id: section_id.into(),
            choice,
        }
    }
}

impl Command for ResolveSection {
    fn command_type(&self) -> &'static str {
        "merge.resolve_section"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to return every section to `Unresolved`.
#[derive(Debug, Clone)]
pub struct ResetAll {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl ResetAll {
    /// Builds the command with a fresh correlation ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
        }
    }
}

impl Default for ResetAll {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ResetAll {
    fn command_type(&self) -> &'static str {
        "merge.reset_all"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
