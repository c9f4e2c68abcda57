//! Transition duration encoding check
//!
//! Exports carry durations in seconds, but some records hold a raw
//! millisecond count (e.g. `300` next to `0.3`). The scheduler normalizes
//! these defensively; this check surfaces them so the data can be confirmed
//! against the authoring tool.

use crate::engine::normalize_duration;
use crate::story::Story;
use crate::validate::check::{CheckResult, StoryCheck};

/// Scans for durations that look millisecond-encoded.
/// Returns `(page, link, raw_duration)` triples.
pub fn findings(story: &Story) -> Vec<(usize, usize, f32)> {
    let mut suspect = Vec::new();

    for page in &story.pages {
        for link in &page.links {
            for reaction in &link.reactions {
                if !reaction.is_inert() && reaction.duration != normalize_duration(reaction.duration)
                {
                    suspect.push((page.index, link.index, reaction.duration));
                }
            }
        }
    }

    suspect
}

/// Checks that transition durations are plausibly encoded in seconds
pub struct DurationCheck;

impl DurationCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DurationCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl StoryCheck for DurationCheck {
    fn name(&self) -> &'static str {
        "Transition durations"
    }

    fn check(&self, story: &Story) -> CheckResult {
        let suspect = findings(story);
        if suspect.is_empty() {
            CheckResult::pass("all durations encoded in seconds")
        } else {
            let details = suspect
                .iter()
                .map(|(page, link, raw)| {
                    format!(
                        "  ⚠ page {page}, hotspot {link}: duration {raw} normalized to {}s",
                        normalize_duration(*raw)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            CheckResult::warn(format!(
                "{} duration(s) look millisecond-encoded",
                suspect.len()
            ))
            .with_details(details)
        }
    }
}
