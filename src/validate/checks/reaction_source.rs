//! Reaction source-page consistency check

use crate::story::Story;
use crate::validate::StructuralError;
use crate::validate::check::{CheckResult, StoryCheck};

/// Scans for reactions whose declared source page disagrees with the page
/// that owns them
pub fn violations(story: &Story) -> Vec<StructuralError> {
    let mut mismatched = Vec::new();

    for page in &story.pages {
        for link in &page.links {
            for reaction in &link.reactions {
                if reaction.src_page_index != page.index {
                    mismatched.push(StructuralError::ReactionSourceMismatch {
                        page: page.index,
                        declared: reaction.src_page_index,
                    });
                }
            }
        }
    }

    mismatched
}

/// Checks that every reaction's source page matches its owning page
pub struct ReactionSourceCheck;

impl ReactionSourceCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReactionSourceCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryCheck for ReactionSourceCheck {
    fn name(&self) -> &'static str {
        "Reaction sources"
    }

    fn description(&self) -> Option<&'static str> {
        Some("srcPageIndex is a consistency invariant, not a free field")
    }

    fn check(&self, story: &Story) -> CheckResult {
        let violations = violations(story);
        if violations.is_empty() {
            CheckResult::pass("all reactions agree with their owning page")
        } else {
            let details = violations
                .iter()
                .map(|v| format!("  ✗ {v}"))
                .collect::<Vec<_>>()
                .join("\n");
            CheckResult::fail(format!("{} mismatched reaction source(s)", violations.len()))
                .with_details(details)
        }
    }
}
