//! Catalog fixtures.

use std::sync::Arc;

use hygiene_content::{Catalog, Section, SectionId, Variant};

/// A section whose variant texts are derived from its id.
#[must_use]
pub fn section(id: &str) -> Section {
    Section {
        id: SectionId::from(id),
        chapter_title: format!("Chapter {id}"),
        context: format!("Context for {id}"),
        left: Variant {
            label: "Fragile".to_owned(),
            text: format!("{id} fragile text"),
            tags: vec!["Risk".to_owned()],
        },
        right: Variant {
            label: "Hygienic".to_owned(),
            text: format!("{id} hygienic text"),
            tags: vec!["Safety".to_owned()],
        },
    }
}

/// A catalog with one generated section per id and two conclusions.
///
/// # Panics
///
/// Panics if `ids` contains duplicates or blanks.
#[must_use]
pub fn catalog_of(ids: &[&str]) -> Arc<Catalog> {
    let sections = ids.iter().map(|id| section(id)).collect();
    let conclusions = vec![
        "Testing is hygiene, not heroism.".to_owned(),
        "Good code is boring.".to_owned(),
    ];
    Arc::new(Catalog::new(sections, conclusions).expect("fixture ids must be unique"))
}

/// The four-section `[A, B, C, D]` catalog.
#[must_use]
pub fn abcd_catalog() -> Arc<Catalog> {
    catalog_of(&["A", "B", "C", "D"])
}
