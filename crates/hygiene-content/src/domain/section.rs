//! Conflict sections and their content variants.

use hygiene_core::id::SectionId;
use serde::{Deserialize, Serialize};

use super::segments::{self, BodySegment};

/// Label given to the synthesized content of a `both` resolution.
pub const HYBRID_LABEL: &str = "Hybrid Merge";

/// The single tag carried by synthesized hybrid content.
pub const HYBRID_TAG: &str = "Manual Merge";

/// Marker placed between the left and right text of a hybrid merge.
pub const HYBRID_SEPARATOR: &str = "\n\n-----------------------------------\n      MERGED MANIFESTO\n-----------------------------------\n\n";

/// One side of a conflict: a labeled body of text with descriptive tags.
///
/// Tags keep their authored order; they are displayed, never looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Short heading, e.g. "The Fragile Glue".
    pub label: String,
    /// Prose with optional fenced code blocks.
    pub text: String,
    /// Descriptive tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Variant {
    /// Synthesizes the compromise content shown when both sides are kept:
    /// left text, separator, right text, under a fixed label and tag.
    #[must_use]
    pub fn hybrid(left: &Variant, right: &Variant) -> Variant {
        let mut text =
            String::with_capacity(left.text.len() + HYBRID_SEPARATOR.len() + right.text.len());
        text.push_str(&left.text);
        text.push_str(HYBRID_SEPARATOR);
        text.push_str(&right.text);

        Variant {
            label: HYBRID_LABEL.to_owned(),
            text,
            tags: vec![HYBRID_TAG.to_owned()],
        }
    }

    /// Splits the body into prose and fenced code segments.
    #[must_use]
    pub fn segments(&self) -> Vec<BodySegment> {
        segments::split(&self.text)
    }
}

/// A narrative unit presenting two variants to be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier, unique within a catalog.
    pub id: SectionId,
    /// Chapter heading.
    pub chapter_title: String,
    /// Framing paragraph shown above the conflict.
    pub context: String,
    /// The first ("fragile") variant.
    pub left: Variant,
    /// The second ("hygienic") variant.
    pub right: Variant,
}

impl Section {
    /// Commit-hash style badge: the first seven characters of the id.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        let id = self.id.as_str();
        match id.char_indices().nth(7) {
            Some((end, _)) => &id[..end],
            None => id,
        }
    }

    /// The hybrid of this section's two variants.
    #[must_use]
    pub fn hybrid(&self) -> Variant {
        Variant::hybrid(&self.left, &self.right)
    }
}
