//! Hotspot rectangle sanity check

use crate::story::Story;
use crate::validate::StructuralError;
use crate::validate::check::{CheckResult, StoryCheck};

/// Scans for hotspots with negative width or height
pub fn violations(story: &Story) -> Vec<StructuralError> {
    let mut degenerate = Vec::new();

    for page in &story.pages {
        for link in &page.links {
            if link.rect.width < 0.0 || link.rect.height < 0.0 {
                degenerate.push(StructuralError::NegativeHotspotRect {
                    page: page.index,
                    link: link.index,
                });
            }
        }
    }

    degenerate
}

/// Checks that hotspot rectangles have non-negative dimensions
pub struct LinkRectCheck;

impl LinkRectCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinkRectCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryCheck for LinkRectCheck {
    fn name(&self) -> &'static str {
        "Hotspot rectangles"
    }

    fn check(&self, story: &Story) -> CheckResult {
        let violations = violations(story);
        if violations.is_empty() {
            CheckResult::pass("all hotspot rectangles are well-formed")
        } else {
            let details = violations
                .iter()
                .map(|v| format!("  ✗ {v}"))
                .collect::<Vec<_>>()
                .join("\n");
            CheckResult::fail(format!(
                "{} hotspot(s) with negative dimensions",
                violations.len()
            ))
            .with_details(details)
        }
    }
}
