//! Domain error types.

use thiserror::Error;

use crate::id::SectionId;

/// Errors reported to the caller of a resolve request.
///
/// Both variants leave the resolution state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The section identifier is not part of the catalog.
    #[error("unknown section: {0}")]
    UnknownSection(SectionId),

    /// A commit for this section is already in flight.
    #[error("section {0} already has a resolution pending")]
    ConcurrentResolution(SectionId),
}

impl DomainError {
    /// Machine-readable error code for the presentation layer.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownSection(_) => "unknown_section",
            Self::ConcurrentResolution(_) => "concurrent_resolution",
        }
    }

    /// The section the failed request targeted.
    #[must_use]
    pub fn section_id(&self) -> &SectionId {
        match self {
            Self::UnknownSection(id) | Self::ConcurrentResolution(id) => id,
        }
    }
}
