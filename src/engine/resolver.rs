//! Reaction resolution
//!
//! Maps a struck hotspot and a trigger kind to at most one strongly-typed
//! [`Action`], validating destination references against the story. Broken
//! references are reported, never fatal: the caller treats them as no-ops.

use thiserror::Error;

use crate::story::{ActionKind, Link, Reaction, Story, TransitionKind, Trigger};

/// Strongly-typed effect of a resolved reaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Navigate to another page
    Navigate {
        target: usize,
        animation: TransitionKind,
        /// Raw export duration; the scheduler normalizes it
        duration: f32,
        /// Suppress auto-scroll on arrival
        suppress_scroll: bool,
        /// Destination opens as a modal
        modal: bool,
    },
    /// Open a page as a modal overlay
    Overlay {
        target: usize,
        animation: TransitionKind,
        duration: f32,
    },
    /// Scroll within the current page - not handled by navigation
    Scroll,
    /// Navigate back to the previous page
    Back,
    /// Explicit no-op
    None,
}

/// Recoverable runtime navigation error. None of these end the session;
/// the engine reports them and stays on the current page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("hotspot {link_index} targets missing page {target} ({page_count} pages)")]
    BrokenReference {
        link_index: usize,
        target: usize,
        page_count: usize,
    },

    #[error("hotspot {link_index} carries an action this engine does not support")]
    UnsupportedAction { link_index: usize },

    #[error("a transition is in progress, interaction dropped")]
    ConcurrentTransitionRejected,
}

/// Resolves a hotspot against a trigger kind.
///
/// Reactions are filtered to the trigger; the first declaration-order match
/// wins. Inert reactions (missing trigger or action) never match. Returns
/// `Ok(None)` when nothing matches, `Err` for broken references and unknown
/// action kinds.
pub fn resolve(
    story: &Story,
    link: &Link,
    trigger: Trigger,
) -> Result<Option<Action>, NavigationError> {
    let matched = link
        .reactions
        .iter()
        .find(|r| !r.is_inert() && r.trigger == Some(trigger));

    let Some(reaction) = matched else {
        return Ok(None);
    };
    let Some(kind) = reaction.action else {
        return Ok(None);
    };

    match kind {
        ActionKind::Frame => {
            let target = resolve_target(story, link, reaction)?;
            Ok(Some(Action::Navigate {
                target,
                animation: reaction.anim,
                duration: reaction.duration,
                suppress_scroll: reaction.disable_auto_scroll,
                modal: reaction.dest_modal,
            }))
        }
        ActionKind::Overlay => {
            let target = resolve_target(story, link, reaction)?;
            Ok(Some(Action::Overlay {
                target,
                animation: reaction.anim,
                duration: reaction.duration,
            }))
        }
        ActionKind::Scroll => Ok(Some(Action::Scroll)),
        ActionKind::Back => Ok(Some(Action::Back)),
        ActionKind::None => Ok(Some(Action::None)),
        ActionKind::Unsupported => Err(NavigationError::UnsupportedAction {
            link_index: link.index,
        }),
    }
}

fn resolve_target(
    story: &Story,
    link: &Link,
    reaction: &Reaction,
) -> Result<usize, NavigationError> {
    if story.page_at(reaction.frame_index).is_some() {
        Ok(reaction.frame_index)
    } else {
        Err(NavigationError::BrokenReference {
            link_index: link.index,
            target: reaction.frame_index,
            page_count: story.page_count(),
        })
    }
}
