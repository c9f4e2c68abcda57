//! Structural validation of loaded stories
//!
//! The export format is duck-typed with no schema enforcement, so the
//! invariants of the graph model are imposed here explicitly before a
//! navigation session may start. Each invariant is a [`StoryCheck`]; the
//! runner collects results into a [`ValidationReport`] and the reporter
//! renders it as a table.
//!
//! # Example
//!
//! ```no_run
//! use storyplay::validate;
//! # let story: storyplay::story::Story = todo!();
//!
//! let report = validate::run_all_checks(&story);
//! if !report.is_valid() {
//!     eprintln!("{}", validate::format_report(&report));
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, StoryCheck};
pub use reporter::{format_report, print_report};
pub use runner::{ValidationReport, ValidationRunner};

use thiserror::Error;
use tracing::warn;

use crate::story::Story;

/// Load-time structural invariant violation. Any of these is fatal to
/// session start; none can occur once a session is running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("start page index {index} is out of range ({page_count} pages)")]
    StartPageOutOfRange { index: usize, page_count: usize },

    #[error("page at position {position} declares index {index}")]
    PageIndexMismatch { position: usize, index: usize },

    #[error("hotspot index {index} is declared by more than one link")]
    DuplicateLinkIndex { index: usize },

    #[error("reaction on page {page} declares source page {declared}")]
    ReactionSourceMismatch { page: usize, declared: usize },

    #[error("hotspot {link} on page {page} has negative dimensions")]
    NegativeHotspotRect { page: usize, link: usize },

    #[error("strict validation: {findings} warning-level finding(s) in checks: {checks}")]
    StrictRejection { findings: usize, checks: String },
}

/// Runs all built-in checks and returns a report
pub fn run_all_checks(story: &Story) -> ValidationReport {
    ValidationRunner::new()
        .add_check(checks::StartPageCheck::new())
        .add_check(checks::PageIndexCheck::new())
        .add_check(checks::LinkIndexCheck::new())
        .add_check(checks::ReactionSourceCheck::new())
        .add_check(checks::LinkRectCheck::new())
        .add_check(checks::ReactionTargetCheck::new())
        .add_check(checks::DurationCheck::new())
        .run(story)
}

/// Gate for session start: returns the first structural violation found,
/// logging every one. With `strict` set, warning-level findings
/// (unresolvable targets, millisecond-encoded durations) also reject the
/// story.
pub fn ensure_valid(story: &Story, strict: bool) -> Result<(), StructuralError> {
    let mut violations = Vec::new();
    violations.extend(checks::start_page::violations(story));
    violations.extend(checks::page_index::violations(story));
    violations.extend(checks::link_index::violations(story));
    violations.extend(checks::reaction_source::violations(story));
    violations.extend(checks::link_rect::violations(story));

    for violation in &violations {
        warn!(%violation, "structural invariant violated");
    }
    if let Some(first) = violations.into_iter().next() {
        return Err(first);
    }

    if strict {
        let mut suspect_checks = Vec::new();
        let broken = checks::reaction_target::findings(story);
        if !broken.is_empty() {
            suspect_checks.push("reaction targets");
        }
        let durations = checks::duration::findings(story);
        if !durations.is_empty() {
            suspect_checks.push("transition durations");
        }
        if !suspect_checks.is_empty() {
            return Err(StructuralError::StrictRejection {
                findings: broken.len() + durations.len(),
                checks: suspect_checks.join(", "),
            });
        }
    }

    Ok(())
}
