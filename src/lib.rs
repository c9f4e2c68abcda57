//! Storyplay
//!
//! A navigation engine for fixed-page prototype exports: it loads a story
//! graph of pages and clickable hotspots, resolves pointer input to
//! navigation actions, and drives timed page transitions.

/// Navigation engine - sessions, hit testing, reactions, and transitions
pub mod engine;

/// Story graph model - pages, hotspots, reactions, and groups
pub mod story;

/// Structural validation of loaded stories
pub mod validate;
