//! Reaction target resolvability check
//!
//! An unresolvable destination is recoverable at runtime (the interaction
//! becomes a no-op), so this check warns instead of failing. Strict
//! validation mode promotes warnings to a rejection.

use crate::story::{ActionKind, Story};
use crate::validate::check::{CheckResult, StoryCheck};

/// Scans for navigate/overlay reactions whose destination page is missing.
/// Returns `(page, link, target)` triples.
pub fn findings(story: &Story) -> Vec<(usize, usize, usize)> {
    let mut broken = Vec::new();

    for page in &story.pages {
        for link in &page.links {
            for reaction in &link.reactions {
                if reaction.is_inert() {
                    continue;
                }
                let navigates = matches!(
                    reaction.action,
                    Some(ActionKind::Frame) | Some(ActionKind::Overlay)
                );
                if navigates && story.page_at(reaction.frame_index).is_none() {
                    broken.push((page.index, link.index, reaction.frame_index));
                }
            }
        }
    }

    broken
}

/// Checks that every navigation reaction targets an existing page
pub struct ReactionTargetCheck;

impl ReactionTargetCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReactionTargetCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryCheck for ReactionTargetCheck {
    fn name(&self) -> &'static str {
        "Reaction targets"
    }

    fn description(&self) -> Option<&'static str> {
        Some("navigation destinations should resolve to existing pages")
    }

    fn check(&self, story: &Story) -> CheckResult {
        let broken = findings(story);
        if broken.is_empty() {
            CheckResult::pass("all navigation targets resolve")
        } else {
            let details = broken
                .iter()
                .map(|(page, link, target)| {
                    format!(
                        "  ⚠ page {page}, hotspot {link}: target {target} does not exist ({} pages)",
                        story.page_count()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            CheckResult::warn(format!(
                "{} unresolvable navigation target(s) - interactions will no-op",
                broken.len()
            ))
            .with_details(details)
        }
    }
}
