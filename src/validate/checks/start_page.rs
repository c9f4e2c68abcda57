//! Start page range check

use crate::story::Story;
use crate::validate::StructuralError;
use crate::validate::check::{CheckResult, StoryCheck};

/// Scans for an out-of-range start page index
pub fn violations(story: &Story) -> Vec<StructuralError> {
    if story.start_page().is_none() {
        vec![StructuralError::StartPageOutOfRange {
            index: story.start_page_index,
            page_count: story.page_count(),
        }]
    } else {
        Vec::new()
    }
}

/// Checks that the start page index resolves to an existing page
pub struct StartPageCheck;

impl StartPageCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StartPageCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryCheck for StartPageCheck {
    fn name(&self) -> &'static str {
        "Start page"
    }

    fn description(&self) -> Option<&'static str> {
        Some("startPageIndex must resolve to an existing page")
    }

    fn check(&self, story: &Story) -> CheckResult {
        let violations = violations(story);
        if violations.is_empty() {
            CheckResult::pass(format!(
                "start page {} of {} pages",
                story.start_page_index,
                story.page_count()
            ))
        } else {
            let details = violations
                .iter()
                .map(|v| format!("  ✗ {v}"))
                .collect::<Vec<_>>()
                .join("\n");
            CheckResult::fail("start page index is out of range").with_details(details)
        }
    }
}
