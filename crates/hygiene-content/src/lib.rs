//! Code Hygiene merge narrative — content catalog.
//!
//! The catalog is the ordered, read-only list of conflict sections a merge
//! session walks through. It is authored elsewhere and only loaded here.

pub mod domain;

pub use domain::catalog::{Catalog, CatalogError};
pub use domain::section::{HYBRID_LABEL, HYBRID_SEPARATOR, HYBRID_TAG, Section, Variant};
pub use domain::segments::BodySegment;
pub use hygiene_core::id::SectionId;
