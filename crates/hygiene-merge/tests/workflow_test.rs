//! End-to-end merge sessions over the bundled catalog.

mod common;

use hygiene_content::BodySegment;
use hygiene_merge::application::query_handlers::Verdict;
use hygiene_merge::application::workflow::CommitPhase;
use hygiene_merge::domain::commands::ResetAll;
use hygiene_merge::domain::status::{Choice, ResolutionStatus};

use common::{BUNDLED_IDS, bundled_workflow, resolve};

#[tokio::test]
async fn test_hygienic_merge_is_sterile() {
    let workflow = bundled_workflow();

    for id in BUNDLED_IDS {
        resolve(&workflow, id, Choice::Right).await;
    }

    let summary = workflow.request_summary();
    assert_eq!(summary.verdict, Verdict::Sterile);
    assert_eq!(summary.headline, "Hygiene Check Passed: 100% Sterile");
    assert!(summary.advisory.is_none());
    assert!(summary.pipeline_ready);
    assert_eq!(summary.conclusions.len(), 5);
    assert_eq!(
        summary.conclusions[1],
        "Testing is hygiene, not heroism."
    );
}

#[tokio::test]
async fn test_fragile_merge_warns_with_integrity() {
    let workflow = bundled_workflow();

    resolve(&workflow, "ch1_infection", Choice::Left).await;
    resolve(&workflow, "ch2_testing", Choice::Right).await;
    resolve(&workflow, "ch3_trust", Choice::Both).await;
    let last = resolve(&workflow, "ch4_culture", Choice::Right).await;

    assert!(last.metrics.complete);
    assert_eq!(last.metrics.score, 50);
    let summary = workflow.request_summary();
    assert_eq!(summary.verdict, Verdict::Warning { integrity: 50 });
    assert_eq!(summary.headline, "Hygiene Check Warning: 50% Integrity");
    assert_eq!(
        summary.advisory.as_deref(),
        Some(
            "Warning: You merged some fragile code. In a real hospital, this would be an infection risk. Review the diffs again."
        )
    );
}

#[tokio::test]
async fn test_progress_label_tracks_each_commit() {
    let workflow = bundled_workflow();
    let mut labels = Vec::new();

    for id in BUNDLED_IDS {
        labels.push(resolve(&workflow, id, Choice::Left).await.metrics.progress_label());
    }

    assert_eq!(labels, vec!["25% Merged", "50% Merged", "75% Merged", "100% Merged"]);
}

#[tokio::test]
async fn test_reset_restarts_the_narrative() {
    let workflow = bundled_workflow();
    for id in BUNDLED_IDS {
        resolve(&workflow, id, Choice::Right).await;
    }

    let snapshot = workflow.reset_all(&ResetAll::new());

    assert_eq!(snapshot.state.resolved_count(), 0);
    assert!(!snapshot.metrics.complete);
    assert_eq!(snapshot.metrics.score, 0);
    assert!(!workflow.request_summary().pipeline_ready);
    assert!(
        BUNDLED_IDS
            .iter()
            .all(|id| workflow.status(id) == Some(ResolutionStatus::Unresolved))
    );
}

#[tokio::test]
async fn test_view_renders_resolved_code_blocks() {
    let workflow = bundled_workflow();
    resolve(&workflow, "ch2_testing", Choice::Right).await;
    resolve(&workflow, "ch4_culture", Choice::Both).await;

    let view = workflow.view();

    assert_eq!(view.sections.len(), 4);
    let ids: Vec<&str> = view.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, BUNDLED_IDS);

    let testing = &view.sections[1];
    assert_eq!(testing.short_sha, "ch2_tes");
    assert_eq!(testing.phase, CommitPhase::Idle);
    assert!(testing.segments.iter().any(|segment| matches!(
        segment,
        BodySegment::Code { language: Some(lang), .. } if lang == "typescript"
    )));

    let culture = &view.sections[3];
    assert_eq!(culture.status, ResolutionStatus::ResolvedBoth);
    let languages: Vec<&str> = culture
        .segments
        .iter()
        .filter_map(|segment| match segment {
            BodySegment::Code { language, .. } => language.as_deref(),
            BodySegment::Prose { .. } => None,
        })
        .collect();
    assert_eq!(languages, vec!["bash", "yaml"]);

    assert!(view.sections[0].resolved.is_none());
    assert!(view.sections[0].segments.is_empty());
}

#[tokio::test]
async fn test_view_serializes_for_presentation() {
    let workflow = bundled_workflow();
    resolve(&workflow, "ch1_infection", Choice::Left).await;

    let json = serde_json::to_value(workflow.view()).unwrap();

    assert_eq!(json["sections"][0]["status"], "resolved_left");
    assert_eq!(json["sections"][0]["phase"]["phase"], "idle");
    assert_eq!(json["sections"][0]["resolved"]["label"], "The Fragile Glue");
    assert_eq!(json["metrics"]["resolved"], 1);
    assert_eq!(json["metrics"]["total"], 4);
}
