//! Progress, completion and score, derived from a state snapshot.
//!
//! Nothing here is cached; callers recompute after every change.

use serde::Serialize;

use super::status::{ResolutionState, ResolutionStatus};

/// Metrics derived from a resolution state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Percentage of sections that are not `Unresolved`, unrounded.
    pub progress: f64,
    /// `true` when progress is 100.
    pub complete: bool,
    /// Percentage of sections resolved as `ResolvedRight`, rounded half up.
    pub score: u8,
    /// Number of resolved sections.
    pub resolved: usize,
    /// Number of sections in the catalog.
    pub total: usize,
}

impl DerivedMetrics {
    /// Progress rounded for display (e.g. "75% Merged").
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn progress_label(&self) -> String {
        format!("{}% Merged", self.progress.round() as u32)
    }
}

/// Computes metrics for a catalog of `total` sections.
///
/// An empty catalog yields progress 0, score 0 and `complete == false`.
/// Only `ResolvedRight` counts toward the score; `ResolvedBoth` earns nothing.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute(total: usize, state: &ResolutionState) -> DerivedMetrics {
    let resolved = state.resolved_count();
    let right = state.count(ResolutionStatus::ResolvedRight);

    if total == 0 {
        return DerivedMetrics {
            progress: 0.0,
            complete: false,
            score: 0,
            resolved,
            total,
        };
    }

    DerivedMetrics {
        progress: resolved as f64 * 100.0 / total as f64,
        complete: resolved >= total,
        score: percent_half_up(right, total),
        resolved,
        total,
    }
}

/// `round(part / total * 100)` with halves rounded up, in integer arithmetic.
fn percent_half_up(part: usize, total: usize) -> u8 {
    let part = part.min(total) as u128;
    let total = total as u128;
    let rounded = (200 * part + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use hygiene_core::id::SectionId;

    use super::*;

    fn state_with(statuses: &[ResolutionStatus]) -> ResolutionState {
        let ids: Vec<SectionId> = (0..statuses.len())
            .map(|i| SectionId::new(format!("s{i}")))
            .collect();
        let mut state = ResolutionState::unresolved(&ids);
        for (id, status) in ids.iter().zip(statuses) {
            state.replace(id, *status);
        }
        state
    }

    #[test]
    fn test_fresh_state_has_zero_progress() {
        let state = state_with(&[ResolutionStatus::Unresolved; 4]);

        let metrics = compute(4, &state);

        assert!(metrics.progress.abs() < f64::EPSILON);
        assert!(!metrics.complete);
        assert_eq!(metrics.score, 0);
    }

    #[test]
    fn test_empty_catalog_is_neutral_not_a_division_by_zero() {
        let metrics = compute(0, &ResolutionState::default());

        assert!(metrics.progress.abs() < f64::EPSILON);
        assert_eq!(metrics.score, 0);
        assert!(!metrics.complete);
        assert_eq!(metrics.total, 0);
    }

    #[test]
    fn test_both_counts_for_progress_but_not_score() {
        // Arrange
        use ResolutionStatus::{ResolvedBoth, ResolvedLeft, ResolvedRight, Unresolved};
        let state = state_with(&[ResolvedRight, ResolvedLeft, ResolvedBoth, Unresolved]);

        // Act
        let metrics = compute(4, &state);

        // Assert
        assert!((metrics.progress - 75.0).abs() < f64::EPSILON);
        assert!(!metrics.complete);
        assert_eq!(metrics.score, 25);
        assert_eq!(metrics.resolved, 3);
    }

    #[test]
    fn test_all_resolved_is_complete() {
        use ResolutionStatus::{ResolvedBoth, ResolvedLeft};
        let state = state_with(&[ResolvedBoth, ResolvedLeft, ResolvedBoth]);

        let metrics = compute(3, &state);

        assert!((metrics.progress - 100.0).abs() < f64::EPSILON);
        assert!(metrics.complete);
        assert_eq!(metrics.score, 0);
    }

    #[test]
    fn test_score_rounds_half_up() {
        // 1/8 = 12.5% -> 13, 3/8 = 37.5% -> 38, 1/3 = 33.3% -> 33, 2/3 = 66.7% -> 67
        assert_eq!(percent_half_up(1, 8), 13);
        assert_eq!(percent_half_up(3, 8), 38);
        assert_eq!(percent_half_up(1, 3), 33);
        assert_eq!(percent_half_up(2, 3), 67);
        assert_eq!(percent_half_up(1, 200), 1);
        assert_eq!(percent_half_up(0, 5), 0);
        assert_eq!(percent_half_up(5, 5), 100);
    }

    #[test]
    fn test_progress_label_rounds_for_display() {
        use ResolutionStatus::{ResolvedLeft, Unresolved};
        let state = state_with(&[ResolvedLeft, Unresolved, Unresolved]);

        let metrics = compute(3, &state);

        assert_eq!(metrics.progress_label(), "33% Merged");
    }
}
