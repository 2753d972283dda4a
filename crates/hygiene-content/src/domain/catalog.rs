//! The ordered, immutable catalog of conflict sections.

use std::collections::HashSet;

use hygiene_core::id::SectionId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::section::{Section, Variant};

/// The "Code Hygiene Is Not Optional" dataset shipped with the crate.
const BUNDLED_YAML: &str = include_str!("../../content/code_hygiene.yaml");

/// Errors raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The source document could not be parsed.
    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Two sections share an identifier.
    #[error("duplicate section id: {0}")]
    DuplicateSection(SectionId),

    /// A section has an empty identifier.
    #[error("section at position {index} has an empty id")]
    EmptySectionId {
        /// Zero-based position in the catalog.
        index: usize,
    },
}

/// Authored document layout.
#[derive(Debug, Deserialize)]
struct CatalogSource {
    sections: Vec<Section>,
    #[serde(default)]
    conclusions: Vec<String>,
}

/// Ordered list of sections plus the closing statements shown in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    sections: Vec<Section>,
    conclusions: Vec<String>,
}

impl Catalog {
    /// Builds a catalog, checking that ids are present and unique.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptySectionId` or `CatalogError::DuplicateSection`.
    pub fn new(sections: Vec<Section>, conclusions: Vec<String>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(sections.len());
        for (index, section) in sections.iter().enumerate() {
            if section.id.is_blank() {
                return Err(CatalogError::EmptySectionId { index });
            }
            if !seen.insert(section.id.as_str()) {
                return Err(CatalogError::DuplicateSection(section.id.clone()));
            }
        }

        Ok(Self {
            sections,
            conclusions,
        })
    }

    /// Parses an authored YAML document with `sections` and `conclusions`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed YAML, or a validation error
    /// from [`Catalog::new`].
    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let parsed: CatalogSource = serde_yaml::from_str(source)?;
        let catalog = Self::new(parsed.sections, parsed.conclusions)?;
        tracing::debug!(
            sections = catalog.len(),
            version_hash = %catalog.version_hash(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The bundled "Code Hygiene Is Not Optional" narrative.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled document itself is broken.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml(BUNDLED_YAML)
    }

    /// Sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Closing statements, opaque to the merge flow.
    #[must_use]
    pub fn conclusions(&self) -> &[String] {
        &self.conclusions
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the catalog has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Looks up a section by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id.as_str() == id)
    }

    /// Returns `true` if `id` names a section in this catalog.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Section ids in display order.
    pub fn ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|s| &s.id)
    }

    /// Hex SHA-256 over every field of every section and conclusion, in order.
    #[must_use]
    pub fn version_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.sections.len() as u64).to_le_bytes());
        for section in &self.sections {
            hash_str(&mut hasher, section.id.as_str());
            hash_str(&mut hasher, &section.chapter_title);
            hash_str(&mut hasher, &section.context);
            hash_variant(&mut hasher, &section.left);
            hash_variant(&mut hasher, &section.right);
        }
        hasher.update((self.conclusions.len() as u64).to_le_bytes());
        for conclusion in &self.conclusions {
            hash_str(&mut hasher, conclusion);
        }

        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

// Length-prefixed so adjacent fields cannot run together.
fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_variant(hasher: &mut Sha256, variant: &Variant) {
    hash_str(hasher, &variant.label);
    hash_str(hasher, &variant.text);
    hasher.update((variant.tags.len() as u64).to_le_bytes());
    for tag in &variant.tags {
        hash_str(hasher, tag);
    }
}
