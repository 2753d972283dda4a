//! Shared helpers for the merge integration tests.

use std::sync::Arc;

use hygiene_content::Catalog;
use hygiene_merge::application::workflow::{CommitOutcome, MergeSnapshot, ResolutionWorkflow};
use hygiene_merge::domain::commands::ResolveSection;
use hygiene_merge::domain::status::Choice;
use hygiene_test_support::{FixedClock, InstantDelay};

/// The bundled catalog in authored order.
pub const BUNDLED_IDS: [&str; 4] = ["ch1_infection", "ch2_testing", "ch3_trust", "ch4_culture"];

/// A workflow over the bundled catalog that commits without waiting.
pub fn bundled_workflow() -> ResolutionWorkflow {
    let catalog = Catalog::bundled().expect("bundled catalog must parse");
    ResolutionWorkflow::new(
        Arc::new(catalog),
        Arc::new(FixedClock::standard()),
        Arc::new(InstantDelay),
    )
}

/// Resolves `id` and returns the committed snapshot.
pub async fn resolve(workflow: &ResolutionWorkflow, id: &str, choice: Choice) -> MergeSnapshot {
    match workflow
        .resolve_section(&ResolveSection::new(id, choice))
        .await
        .expect("resolve must be accepted")
    {
        CommitOutcome::Committed(snapshot) => snapshot,
        CommitOutcome::Superseded => panic!("commit for {id} was superseded"),
    }
}
