//! Navigation session state machine
//!
//! One [`NavigationSession`] per running prototype: it owns the only
//! mutable state in the crate (current page, history stack, pointer press
//! tracking, stats) and composes the hit tester, reaction resolver, and
//! transition scheduler. Commands run synchronously to completion; the only
//! asynchronous element is the animation clock driven through
//! [`NavigationSession::tick`].

use std::sync::Arc;

use enum_map::EnumMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::story::{Page, Story, Trigger};
use crate::validate::{self, StructuralError};

use super::config::{ActivationPolicy, PlayerConfig};
use super::events::{SessionEvent, SessionObserver};
use super::hit;
use super::resolver::{self, Action, NavigationError};
use super::transition::{Begun, TransitionScheduler};

/// Per-session interaction counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    /// Committed navigations per trigger kind
    navigations: EnumMap<Trigger, u32>,
    /// Interactions dropped while a transition was animating
    rejected: u32,
    /// Reactions that targeted a missing page
    broken_references: u32,
}

impl SessionStats {
    /// Committed navigations fired by the given trigger
    pub fn navigations(&self, trigger: Trigger) -> u32 {
        self.navigations[trigger]
    }

    /// Committed navigations across all triggers
    pub fn total_navigations(&self) -> u32 {
        self.navigations.values().sum()
    }

    /// Interactions dropped under the reject policy
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Broken-reference no-ops observed
    pub fn broken_references(&self) -> u32 {
        self.broken_references
    }
}

/// Top-level navigation state machine for one prototype session
pub struct NavigationSession {
    story: Arc<Story>,
    config: PlayerConfig,
    current: usize,
    history: Vec<usize>,
    scheduler: TransitionScheduler,
    observers: Vec<Box<dyn SessionObserver>>,
    /// Hotspot captured at pointer-down; a click requires release on the same one
    pressed_link: Option<usize>,
    stats: SessionStats,
}

impl NavigationSession {
    /// Validates the story and opens a session on its start page.
    ///
    /// Structural invariant violations refuse the session; the story is
    /// immutable and shared from here on.
    pub fn new(story: Arc<Story>, config: PlayerConfig) -> Result<Self, StructuralError> {
        validate::ensure_valid(&story, config.session.strict_validation)?;

        let current = story.start_page_index;
        info!(
            title = %story.title,
            pages = story.page_count(),
            hotspots = story.link_count(),
            start = current,
            "navigation session ready"
        );

        Ok(Self {
            story,
            config,
            current,
            history: Vec::new(),
            scheduler: TransitionScheduler::new(),
            observers: Vec::new(),
            pressed_link: None,
            stats: SessionStats::default(),
        })
    }

    /// The story this session navigates
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Index of the logically current page
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The logically current page, for drawing
    pub fn current_page(&self) -> &Page {
        // Validation guarantees contiguous indices, so position == index
        &self.story.pages[self.current]
    }

    /// Depth of the back-navigation history
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True while a transition animation is running
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_animating()
    }

    /// Interaction counters for this session
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Registers an observer for session events
    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Resolves a click at `point` on the current page
    pub fn activate(&mut self, point: [f32; 2]) {
        self.activate_with(point, Trigger::OnClick);
    }

    /// Resolves an interaction at `point` for an arbitrary trigger kind
    pub fn activate_with(&mut self, point: [f32; 2], trigger: Trigger) {
        if !self.gate_animation() {
            return;
        }

        let hit = hit::hit_test(&self.story, self.current_page(), point).map(|l| l.index);
        let Some(link_index) = hit else {
            debug!(x = point[0], y = point[1], "no hotspot under pointer");
            return;
        };

        self.activate_link(link_index, trigger);
    }

    /// Pointer pressed at `(x, y)` - remembers the hotspot under it
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pressed_link =
            hit::hit_test(&self.story, self.current_page(), [x, y]).map(|l| l.index);
    }

    /// Pointer released at `(x, y)` - a click fires only when press and
    /// release land on the same hotspot
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        let pressed = self.pressed_link.take();
        let released = hit::hit_test(&self.story, self.current_page(), [x, y]).map(|l| l.index);

        match (pressed, released) {
            (Some(down), Some(up)) if down == up => {
                if self.gate_animation() {
                    self.activate_link(down, Trigger::OnClick);
                }
            }
            (Some(_), _) => {
                debug!("press and release did not land on the same hotspot");
            }
            _ => {}
        }
    }

    /// Navigates back to the previous page. Silent no-op on empty history -
    /// never underflows, never an error. Any running animation is cancelled
    /// (its page change stays committed).
    pub fn back(&mut self) {
        self.cancel_animation();

        let Some(target) = self.history.pop() else {
            debug!("back requested with empty history");
            return;
        };

        let prev = self.current;
        self.current = target;
        info!(prev, next = target, "navigated back");
        self.emit(SessionEvent::PageChanged { prev, next: target });
    }

    /// Resets the session to the story's start page and clears history
    pub fn restart(&mut self) {
        self.cancel_animation();
        self.pressed_link = None;
        self.history.clear();

        let prev = self.current;
        self.current = self.story.start_page_index;
        info!(prev, next = self.current, "session restarted");
        if prev != self.current {
            self.emit(SessionEvent::PageChanged {
                prev,
                next: self.current,
            });
        }
    }

    /// Advances the animation clock by `dt` seconds. Emits progress while a
    /// transition is animating and the finished event when it completes.
    pub fn tick(&mut self, dt: f32) {
        let Some(progress) = self.scheduler.tick(dt) else {
            return;
        };

        self.emit(SessionEvent::TransitionProgress {
            fraction: progress.fraction,
            kind: progress.kind,
        });
        if progress.finished {
            self.emit(SessionEvent::TransitionFinished);
        }
    }

    /// Applies the activation policy when a transition is animating.
    /// Returns true when the interaction may proceed.
    fn gate_animation(&mut self) -> bool {
        if !self.scheduler.is_animating() {
            return true;
        }

        match self.config.session.activation_policy {
            ActivationPolicy::Reject => {
                self.stats.rejected += 1;
                let error = NavigationError::ConcurrentTransitionRejected;
                warn!(%error, "interaction dropped");
                self.emit(SessionEvent::NavigationFailed(error));
                false
            }
            ActivationPolicy::CancelPrior => {
                self.cancel_animation();
                true
            }
        }
    }

    fn cancel_animation(&mut self) {
        if self.scheduler.cancel().is_some() {
            self.emit(SessionEvent::TransitionFinished);
        }
    }

    fn activate_link(&mut self, link_index: usize, trigger: Trigger) {
        let story = Arc::clone(&self.story);
        let Some(link) = story.link_by_global_index(link_index) else {
            return;
        };

        match resolver::resolve(&story, link, trigger) {
            Err(error) => {
                if matches!(error, NavigationError::BrokenReference { .. }) {
                    self.stats.broken_references += 1;
                }
                warn!(%error, link = %link.name, "navigation failed");
                self.emit(SessionEvent::NavigationFailed(error));
            }
            Ok(None) => {
                debug!(link = %link.name, ?trigger, "no reaction for trigger");
            }
            Ok(Some(action)) => match action {
                Action::Navigate {
                    target,
                    animation,
                    duration,
                    suppress_scroll,
                    modal,
                } => {
                    self.commit_navigation(target, animation, duration, trigger, modal, suppress_scroll);
                }
                Action::Overlay {
                    target,
                    animation,
                    duration,
                } => {
                    self.commit_navigation(target, animation, duration, trigger, true, false);
                }
                Action::Back => self.back(),
                Action::Scroll => {
                    debug!(link = %link.name, "scroll actions are not handled by navigation");
                }
                Action::None => {}
            },
        }
    }

    /// Commits the logical page change, then starts the animation.
    /// `page_changed` fires first; the renderer may start drawing the new
    /// page while the animation resolves visually.
    fn commit_navigation(
        &mut self,
        target: usize,
        animation: crate::story::TransitionKind,
        duration: f32,
        trigger: Trigger,
        modal: bool,
        suppress_scroll: bool,
    ) {
        let prev = self.current;
        self.history.push(prev);
        self.current = target;
        self.stats.navigations[trigger] += 1;

        info!(prev, next = target, modal, suppress_scroll, "page changed");
        self.emit(SessionEvent::PageChanged { prev, next: target });

        match self.scheduler.begin(prev, target, animation, duration) {
            Ok(Begun::Animating) => {
                let duration = self.scheduler.active().map(|t| t.duration).unwrap_or(0.0);
                self.emit(SessionEvent::TransitionStarted {
                    from: prev,
                    to: target,
                    kind: animation,
                    duration,
                });
            }
            Ok(Begun::Instant) => {
                self.emit(SessionEvent::TransitionStarted {
                    from: prev,
                    to: target,
                    kind: animation,
                    duration: 0.0,
                });
                self.emit(SessionEvent::TransitionFinished);
            }
            Err(error) => {
                // Unreachable after gate_animation, but never panic over it
                warn!(%error, "scheduler refused transition");
            }
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            match &event {
                SessionEvent::PageChanged { prev, next } => {
                    observer.on_page_changed(*prev, *next);
                }
                SessionEvent::TransitionStarted {
                    from,
                    to,
                    kind,
                    duration,
                } => {
                    observer.on_transition_started(*from, *to, *kind, *duration);
                }
                SessionEvent::TransitionProgress { fraction, kind } => {
                    observer.on_transition_progress(*fraction, *kind);
                }
                SessionEvent::TransitionFinished => {
                    observer.on_transition_finished();
                }
                SessionEvent::NavigationFailed(error) => {
                    observer.on_navigation_error(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::events::EventLog;
    use crate::story::{ActionKind, DocMeta, Link, Reaction, Rect, TransitionKind};

    fn nav_link(index: usize, rect: Rect, src: usize, target: usize, duration: f32) -> Link {
        Link {
            name: format!("hotspot-{index}"),
            rect,
            index,
            reactions: vec![Reaction {
                trigger: Some(Trigger::OnClick),
                action: Some(ActionKind::Frame),
                src_page_index: src,
                frame_index: target,
                disable_auto_scroll: true,
                anim: TransitionKind::Dissolve,
                duration,
                dest_modal: false,
            }],
        }
    }

    fn page(index: usize, links: Vec<Link>) -> Page {
        Page {
            id: format!("1:{index}"),
            group_index: 0,
            title: format!("Page {index}"),
            image: String::new(),
            index,
            width: 320.0,
            height: 172.0,
            x: 0.0,
            y: 0.0,
            proto_overflow_v: false,
            proto_overflow_h: false,
            links,
        }
    }

    fn fixture_story() -> Arc<Story> {
        Arc::new(Story {
            title: "fixture".to_string(),
            doc: DocMeta::default(),
            disable_interactions: false,
            highlight_hotspot: false,
            highlight_all_hotspots: false,
            pages: vec![
                page(0, vec![nav_link(0, Rect::new(61.0, 114.0, 198.0, 46.0), 0, 1, 0.3)]),
                page(1, vec![nav_link(1, Rect::new(0.0, 0.0, 24.0, 24.0), 1, 0, 0.0)]),
            ],
            groups: vec![],
            start_page_index: 0,
        })
    }

    fn session_with_log(story: Arc<Story>) -> (NavigationSession, crate::engine::events::EventLogHandle) {
        let mut session =
            NavigationSession::new(story, PlayerConfig::default()).expect("fixture is valid");
        let log = EventLog::new();
        let handle = log.handle();
        session.subscribe(Box::new(log));
        (session, handle)
    }

    #[test]
    fn test_activate_commits_target_page() {
        let (mut session, log) = session_with_log(fixture_story());

        session.activate([100.0, 130.0]);

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.history_len(), 1);
        assert!(session.is_animating());

        let events = log.take();
        assert_eq!(events[0], SessionEvent::PageChanged { prev: 0, next: 1 });
        assert!(matches!(
            events[1],
            SessionEvent::TransitionStarted { from: 0, to: 1, .. }
        ));
    }

    #[test]
    fn test_activate_outside_hotspot_is_noop() {
        let (mut session, log) = session_with_log(fixture_story());

        session.activate([0.0, 0.0]);

        assert_eq!(session.current_index(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_back_restores_prior_page() {
        let (mut session, log) = session_with_log(fixture_story());

        session.activate([100.0, 130.0]);
        session.tick(0.5); // finish the animation
        log.take();

        session.back();
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.history_len(), 0);
        assert_eq!(
            log.take(),
            vec![SessionEvent::PageChanged { prev: 1, next: 0 }]
        );
    }

    #[test]
    fn test_back_on_empty_history_is_silent() {
        let (mut session, log) = session_with_log(fixture_story());

        session.back();

        assert_eq!(session.current_index(), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_instant_transition_resolves_in_same_turn() {
        let (mut session, log) = session_with_log(fixture_story());

        session.activate([100.0, 130.0]);
        session.tick(0.5);
        log.take();

        // Page 1's hotspot navigates back to 0 with duration 0
        session.activate([10.0, 10.0]);

        assert_eq!(session.current_index(), 0);
        assert!(!session.is_animating());
        let events = log.take();
        assert_eq!(events[0], SessionEvent::PageChanged { prev: 1, next: 0 });
        assert!(matches!(
            events[1],
            SessionEvent::TransitionStarted { duration, .. } if duration == 0.0
        ));
        assert_eq!(events[2], SessionEvent::TransitionFinished);
    }

    #[test]
    fn test_second_activation_rejected_while_animating() {
        let (mut session, log) = session_with_log(fixture_story());

        session.activate([100.0, 130.0]);
        log.take();

        session.activate([10.0, 10.0]);

        assert_eq!(session.current_index(), 1);
        assert_eq!(session.stats().rejected(), 1);
        assert_eq!(
            log.take(),
            vec![SessionEvent::NavigationFailed(
                NavigationError::ConcurrentTransitionRejected
            )]
        );

        // First transition completes unaffected
        session.tick(0.3);
        let events = log.take();
        assert!(events.contains(&SessionEvent::TransitionFinished));
    }

    #[test]
    fn test_cancel_prior_policy_interrupts_animation() {
        let mut config = PlayerConfig::default();
        config.session.activation_policy = ActivationPolicy::CancelPrior;
        let mut session =
            NavigationSession::new(fixture_story(), config).expect("fixture is valid");
        let log = EventLog::new();
        let handle = log.handle();
        session.subscribe(Box::new(log));

        session.activate([100.0, 130.0]);
        handle.take();

        // Page 1's hotspot: the running animation is cancelled, then the
        // new navigation commits
        session.activate([10.0, 10.0]);

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.stats().rejected(), 0);
        let events = handle.take();
        assert_eq!(events[0], SessionEvent::TransitionFinished); // cancelled
        assert_eq!(events[1], SessionEvent::PageChanged { prev: 1, next: 0 });
    }

    #[test]
    fn test_restart_clears_history() {
        let (mut session, log) = session_with_log(fixture_story());

        session.activate([100.0, 130.0]);
        session.tick(0.5);
        log.take();

        session.restart();

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.history_len(), 0);
        assert_eq!(
            log.take(),
            vec![SessionEvent::PageChanged { prev: 1, next: 0 }]
        );

        // Restart on the start page emits nothing further
        session.restart();
        assert!(log.is_empty());
    }

    #[test]
    fn test_pointer_click_requires_same_hotspot() {
        let (mut session, log) = session_with_log(fixture_story());

        // Press inside, release outside: no click
        session.pointer_down(100.0, 130.0);
        session.pointer_up(0.0, 0.0);
        assert_eq!(session.current_index(), 0);
        assert!(log.is_empty());

        // Press and release inside the same hotspot: click
        session.pointer_down(100.0, 130.0);
        session.pointer_up(110.0, 140.0);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_structural_error_refuses_session() {
        let mut story = (*fixture_story()).clone();
        story.start_page_index = 99;

        let result = NavigationSession::new(Arc::new(story), PlayerConfig::default());
        assert_eq!(
            result.err(),
            Some(StructuralError::StartPageOutOfRange {
                index: 99,
                page_count: 2,
            })
        );
    }

    #[test]
    fn test_stats_count_navigations_per_trigger() {
        let (mut session, _log) = session_with_log(fixture_story());

        session.activate([100.0, 130.0]);
        session.tick(0.5);
        session.activate([10.0, 10.0]);

        assert_eq!(session.stats().navigations(Trigger::OnClick), 2);
        assert_eq!(session.stats().total_navigations(), 2);
        assert_eq!(session.stats().navigations(Trigger::OnHover), 0);
    }
}
