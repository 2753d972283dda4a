//! Query handlers for the merge session.
//!
//! These read the current aggregate and return read-only view DTOs for a
//! presentation layer. Nothing here mutates the session.

use hygiene_content::{BodySegment, Variant};
use hygiene_core::id::SectionId;
use serde::Serialize;
use uuid::Uuid;

use crate::application::workflow::CommitPhase;
use crate::domain::aggregates::MergeSession;
use crate::domain::metrics::DerivedMetrics;
use crate::domain::resolved;
use crate::domain::status::ResolutionStatus;

const STERILE_HEADLINE: &str = "Hygiene Check Passed: 100% Sterile";

const FRAGILE_ADVISORY: &str = "Warning: You merged some fragile code. In a real hospital, this would be an infection risk. Review the diffs again.";

/// Outcome of the hygiene check shown on the summary screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Every section took the hygienic variant.
    Sterile,
    /// Some sections kept fragile code.
    Warning {
        /// The score, as a percentage.
        integrity: u8,
    },
}

impl Verdict {
    /// Classifies a score. Only a perfect score is sterile.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score >= 100 {
            Self::Sterile
        } else {
            Self::Warning { integrity: score }
        }
    }

    /// Headline line for the summary.
    #[must_use]
    pub fn headline(self) -> String {
        match self {
            Self::Sterile => STERILE_HEADLINE.to_owned(),
            Self::Warning { integrity } => {
                format!("Hygiene Check Warning: {integrity}% Integrity")
            }
        }
    }

    /// Advisory shown under a warning.
    #[must_use]
    pub fn advisory(self) -> Option<&'static str> {
        match self {
            Self::Sterile => None,
            Self::Warning { .. } => Some(FRAGILE_ADVISORY),
        }
    }
}

/// Aggregated results plus the closing statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSummary {
    /// Metrics at the time of the request.
    pub metrics: DerivedMetrics,
    /// Sterile or warning.
    pub verdict: Verdict,
    /// Rendered headline for `verdict`.
    pub headline: String,
    /// Advisory line, present only on a warning.
    pub advisory: Option<String>,
    /// Whether every section is resolved and the pipeline may run.
    pub pipeline_ready: bool,
    /// Closing statements from the catalog, in authored order.
    pub conclusions: Vec<String>,
}

/// One row of the session view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    /// Section identifier.
    pub id: SectionId,
    /// First seven characters of the id, shown like a commit hash.
    pub short_sha: String,
    /// Chapter heading.
    pub chapter_title: String,
    /// Narrative context for the conflict.
    pub context: String,
    /// Committed status.
    pub status: ResolutionStatus,
    /// Whether a commit is in flight.
    pub phase: CommitPhase,
    /// Content under the committed status, if resolved.
    pub resolved: Option<Variant>,
    /// `resolved` split into prose and code blocks.
    pub segments: Vec<BodySegment>,
}

/// Everything a presentation layer needs to render a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSessionView {
    /// Session identifier.
    pub session_id: Uuid,
    /// Version hash of the catalog being resolved.
    pub catalog_hash: String,
    /// Number of resets so far.
    pub epoch: u64,
    /// Rows in catalog order.
    pub sections: Vec<SectionView>,
    /// Current metrics.
    pub metrics: DerivedMetrics,
}

/// Builds the summary for `session`.
///
/// Available at any time; `pipeline_ready` reports whether the merge is done.
#[must_use]
pub fn get_summary(session: &MergeSession) -> MergeSummary {
    let metrics = session.metrics();
    let verdict = Verdict::from_score(metrics.score);
    MergeSummary {
        metrics,
        verdict,
        headline: verdict.headline(),
        advisory: verdict.advisory().map(str::to_owned),
        pipeline_ready: metrics.complete,
        conclusions: session.catalog().conclusions().to_vec(),
    }
}

/// Builds the session view, asking `phase_of` for each section's commit phase.
#[must_use]
pub fn get_session_view<F>(session: &MergeSession, phase_of: F) -> MergeSessionView
where
    F: Fn(&SectionId) -> CommitPhase,
{
    let catalog = session.catalog();
    let sections = catalog
        .sections()
        .iter()
        .map(|section| {
            let status = session.status(section.id.as_str()).unwrap_or_default();
            let resolved = resolved::resolved_content(section, status);
            let segments = resolved.as_ref().map(Variant::segments).unwrap_or_default();
            SectionView {
                id: section.id.clone(),
                short_sha: section.short_sha().to_owned(),
                chapter_title: section.chapter_title.clone(),
                context: section.context.clone(),
                status,
                phase: phase_of(&section.id),
                resolved,
                segments,
            }
        })
        .collect();

    MergeSessionView {
        session_id: session.id,
        catalog_hash: catalog.version_hash(),
        epoch: session.epoch(),
        sections,
        metrics: session.metrics(),
    }
}

#[cfg(test)]
mod tests {
    use hygiene_test_support::{FixedClock, catalog_of};

    use super::*;
    use crate::domain::status::Choice;

    fn session(ids: &[&str], choices: &[(&str, Choice)]) -> MergeSession {
        let clock = FixedClock::standard();
        let mut session =
            MergeSession::start(Uuid::new_v4(), catalog_of(ids), Uuid::new_v4(), &clock);
        for (id, choice) in choices {
            session
                .resolve(&SectionId::from(*id), *choice, Uuid::new_v4(), &clock)
                .unwrap();
        }
        session
    }

    #[test]
    fn test_verdict_from_score() {
        assert_eq!(Verdict::from_score(100), Verdict::Sterile);
        assert_eq!(Verdict::from_score(99), Verdict::Warning { integrity: 99 });
        assert_eq!(Verdict::from_score(0), Verdict::Warning { integrity: 0 });
    }

    #[test]
    fn test_verdict_headlines() {
        assert_eq!(Verdict::Sterile.headline(), "Hygiene Check Passed: 100% Sterile");
        assert_eq!(
            Verdict::Warning { integrity: 75 }.headline(),
            "Hygiene Check Warning: 75% Integrity"
        );
        assert!(Verdict::Sterile.advisory().is_none());
        assert!(
            Verdict::Warning { integrity: 75 }
                .advisory()
                .unwrap()
                .contains("fragile code")
        );
    }

    #[test]
    fn test_get_summary_all_right_is_sterile_and_ready() {
        // Arrange
        let session = session(&["a", "b"], &[("a", Choice::Right), ("b", Choice::Right)]);

        // Act
        let summary = get_summary(&session);

        // Assert
        assert_eq!(summary.verdict, Verdict::Sterile);
        assert_eq!(summary.metrics.score, 100);
        assert!(summary.pipeline_ready);
        assert!(summary.advisory.is_none());
        assert_eq!(summary.conclusions.len(), 2);
    }

    #[test]
    fn test_get_summary_both_choice_earns_no_score() {
        // Arrange
        let session = session(
            &["a", "b", "c", "d"],
            &[
                ("a", Choice::Right),
                ("b", Choice::Right),
                ("c", Choice::Right),
                ("d", Choice::Both),
            ],
        );

        // Act
        let summary = get_summary(&session);

        // Assert
        assert_eq!(summary.verdict, Verdict::Warning { integrity: 75 });
        assert_eq!(summary.headline, "Hygiene Check Warning: 75% Integrity");
        assert!(summary.advisory.is_some());
        assert!(summary.pipeline_ready);
    }

    #[test]
    fn test_get_summary_before_completion_is_not_ready() {
        let session = session(&["a", "b"], &[("a", Choice::Right)]);

        let summary = get_summary(&session);

        assert!(!summary.pipeline_ready);
        assert_eq!(summary.metrics.score, 50);
    }

    #[test]
    fn test_get_session_view_rows_follow_catalog_order() {
        // Arrange
        let session = session(&["zeta", "alpha"], &[("alpha", Choice::Left)]);
        let pending = SectionId::from("zeta");

        // Act
        let view = get_session_view(&session, |id| {
            if *id == pending {
                CommitPhase::Pending(Choice::Right)
            } else {
                CommitPhase::Idle
            }
        });

        // Assert
        let ids: Vec<&str> = view.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(view.session_id, session.id);
        assert_eq!(view.catalog_hash, session.catalog().version_hash());

        let zeta = &view.sections[0];
        assert_eq!(zeta.status, ResolutionStatus::Unresolved);
        assert_eq!(zeta.phase, CommitPhase::Pending(Choice::Right));
        assert!(zeta.resolved.is_none());
        assert!(zeta.segments.is_empty());

        let alpha = &view.sections[1];
        assert_eq!(alpha.status, ResolutionStatus::ResolvedLeft);
        assert_eq!(alpha.phase, CommitPhase::Idle);
        assert_eq!(alpha.resolved.as_ref().unwrap().text, "alpha fragile text");
        assert!(!alpha.segments.is_empty());
        assert_eq!(view.metrics.resolved, 1);
    }

    #[test]
    fn test_session_view_serializes_phase_and_status() {
        let session = session(&["a"], &[]);

        let view = get_session_view(&session, |_| CommitPhase::Pending(Choice::Both));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["sections"][0]["status"], "unresolved");
        assert_eq!(json["sections"][0]["phase"]["phase"], "pending");
        assert_eq!(json["sections"][0]["phase"]["choice"], "both");
    }
}
