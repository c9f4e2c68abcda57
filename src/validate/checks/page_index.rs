//! Page index contiguity check

use crate::story::Story;
use crate::validate::StructuralError;
use crate::validate::check::{CheckResult, StoryCheck};

/// Scans for pages whose declared index disagrees with their list position.
///
/// Contiguity and uniqueness both follow from every page's index matching
/// its position in the list.
pub fn violations(story: &Story) -> Vec<StructuralError> {
    story
        .pages
        .iter()
        .enumerate()
        .filter(|(position, page)| *position != page.index)
        .map(|(position, page)| StructuralError::PageIndexMismatch {
            position,
            index: page.index,
        })
        .collect()
}

/// Checks that page indices are unique and contiguous
pub struct PageIndexCheck;

impl PageIndexCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PageIndexCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryCheck for PageIndexCheck {
    fn name(&self) -> &'static str {
        "Page indices"
    }

    fn description(&self) -> Option<&'static str> {
        Some("page indices must be unique and contiguous from zero")
    }

    fn check(&self, story: &Story) -> CheckResult {
        let violations = violations(story);
        if violations.is_empty() {
            CheckResult::pass(format!("{} pages indexed contiguously", story.page_count()))
        } else {
            let details = violations
                .iter()
                .map(|v| format!("  ✗ {v}"))
                .collect::<Vec<_>>()
                .join("\n");
            CheckResult::fail(format!("{} page(s) misindexed", violations.len()))
                .with_details(details)
        }
    }
}
