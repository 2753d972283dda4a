//! Content shown for a section once it has been resolved.

use hygiene_content::{Section, Variant};

use super::status::ResolutionStatus;

/// The readable content for `section` under `status`: the chosen variant, the
/// synthesized hybrid for `ResolvedBoth`, or `None` while unresolved.
#[must_use]
pub fn resolved_content(section: &Section, status: ResolutionStatus) -> Option<Variant> {
    match status {
        ResolutionStatus::Unresolved => None,
        ResolutionStatus::ResolvedLeft => Some(section.left.clone()),
        ResolutionStatus::ResolvedRight => Some(section.right.clone()),
        ResolutionStatus::ResolvedBoth => Some(section.hybrid()),
    }
}

#[cfg(test)]
mod tests {
    use hygiene_content::{HYBRID_SEPARATOR, SectionId};

    use super::*;

    fn section() -> Section {
        Section {
            id: SectionId::from("ch2_testing"),
            chapter_title: "Chapter 2".to_owned(),
            context: "Testing is the soap.".to_owned(),
            left: Variant {
                label: "Manual Confidence".to_owned(),
                text: "It works on my machine.".to_owned(),
                tags: vec!["Risk".to_owned()],
            },
            right: Variant {
                label: "Codified Hygiene".to_owned(),
                text: "The tests prove it.".to_owned(),
                tags: vec!["Proof".to_owned()],
            },
        }
    }

    #[test]
    fn test_unresolved_has_no_content() {
        assert_eq!(resolved_content(&section(), ResolutionStatus::Unresolved), None);
    }

    #[test]
    fn test_left_and_right_return_original_variants() {
        let s = section();

        assert_eq!(
            resolved_content(&s, ResolutionStatus::ResolvedLeft),
            Some(s.left.clone())
        );
        assert_eq!(
            resolved_content(&s, ResolutionStatus::ResolvedRight),
            Some(s.right.clone())
        );
    }

    #[test]
    fn test_both_returns_hybrid() {
        let s = section();

        let content = resolved_content(&s, ResolutionStatus::ResolvedBoth).unwrap();

        assert_eq!(content.label, "Hybrid Merge");
        assert_eq!(content.tags, vec!["Manual Merge".to_owned()]);
        assert_eq!(
            content.text,
            format!("It works on my machine.{HYBRID_SEPARATOR}The tests prove it.")
        );
    }
}
