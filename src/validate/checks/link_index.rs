//! Hotspot global index uniqueness check

use std::collections::HashSet;

use crate::story::Story;
use crate::validate::StructuralError;
use crate::validate::check::{CheckResult, StoryCheck};

/// Scans for hotspot indices declared by more than one link
pub fn violations(story: &Story) -> Vec<StructuralError> {
    let mut seen = HashSet::new();
    let mut duplicated = Vec::new();

    for page in &story.pages {
        for link in &page.links {
            if !seen.insert(link.index) {
                duplicated.push(StructuralError::DuplicateLinkIndex { index: link.index });
            }
        }
    }

    duplicated
}

/// Checks that hotspot indices are unique across the whole story
pub struct LinkIndexCheck;

impl LinkIndexCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinkIndexCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryCheck for LinkIndexCheck {
    fn name(&self) -> &'static str {
        "Hotspot indices"
    }

    fn description(&self) -> Option<&'static str> {
        Some("hotspot indices are story-wide identifiers and must be unique")
    }

    fn check(&self, story: &Story) -> CheckResult {
        let violations = violations(story);
        if violations.is_empty() {
            CheckResult::pass(format!("{} hotspots, all unique", story.link_count()))
        } else {
            let details = violations
                .iter()
                .map(|v| format!("  ✗ {v}"))
                .collect::<Vec<_>>()
                .join("\n");
            CheckResult::fail(format!("{} duplicated hotspot index(es)", violations.len()))
                .with_details(details)
        }
    }
}
