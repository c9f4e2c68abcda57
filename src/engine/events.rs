//! Session events and observer subscriptions
//!
//! The renderer (and anything else at the output boundary) observes a
//! session through [`SessionObserver`]. Events fire synchronously, in
//! order, from inside the session's command processing; observers must not
//! call back into the session.

use std::cell::RefCell;
use std::rc::Rc;

use crate::story::TransitionKind;

use super::resolver::NavigationError;

/// Everything a session reports to its observers
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The logical current page changed. Fires after the change commits;
    /// a transition animation may still be running.
    PageChanged { prev: usize, next: usize },
    /// A transition animation began (duration already normalized to
    /// seconds; zero for instant transitions)
    TransitionStarted {
        from: usize,
        to: usize,
        kind: TransitionKind,
        duration: f32,
    },
    /// Animation progress for the renderer, eased fraction in `0..=1`
    TransitionProgress { fraction: f32, kind: TransitionKind },
    /// The scheduler returned to idle
    TransitionFinished,
    /// A recoverable navigation error; the session stays on its page
    NavigationFailed(NavigationError),
}

/// Trait for subsystems observing a navigation session
///
/// All methods default to no-ops so observers implement only what they
/// care about.
pub trait SessionObserver {
    /// Name of this observer for debugging
    fn name(&self) -> &str;

    /// The logical current page changed
    fn on_page_changed(&mut self, _prev: usize, _next: usize) {}

    /// A transition animation began
    fn on_transition_started(
        &mut self,
        _from: usize,
        _to: usize,
        _kind: TransitionKind,
        _duration: f32,
    ) {
    }

    /// Animation progress; `fraction` is eased, in `0..=1`
    fn on_transition_progress(&mut self, _fraction: f32, _kind: TransitionKind) {}

    /// The transition animation completed or was cancelled
    fn on_transition_finished(&mut self) {}

    /// A recoverable navigation error occurred
    fn on_navigation_error(&mut self, _error: &NavigationError) {}
}

/// Shared view into an [`EventLog`]'s recorded events
#[derive(Debug, Clone, Default)]
pub struct EventLogHandle {
    events: Rc<RefCell<Vec<SessionEvent>>>,
}

impl EventLogHandle {
    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.borrow().clone()
    }

    /// Drains and returns the recorded events
    pub fn take(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

/// Observer that records every event - for tests and debug overlays
#[derive(Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<SessionEvent>>>,
}

impl EventLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that stays readable after the log is handed to a session
    pub fn handle(&self) -> EventLogHandle {
        EventLogHandle {
            events: Rc::clone(&self.events),
        }
    }

    fn record(&mut self, event: SessionEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl SessionObserver for EventLog {
    fn name(&self) -> &str {
        "event-log"
    }

    fn on_page_changed(&mut self, prev: usize, next: usize) {
        self.record(SessionEvent::PageChanged { prev, next });
    }

    fn on_transition_started(&mut self, from: usize, to: usize, kind: TransitionKind, duration: f32) {
        self.record(SessionEvent::TransitionStarted {
            from,
            to,
            kind,
            duration,
        });
    }

    fn on_transition_progress(&mut self, fraction: f32, kind: TransitionKind) {
        self.record(SessionEvent::TransitionProgress { fraction, kind });
    }

    fn on_transition_finished(&mut self) {
        self.record(SessionEvent::TransitionFinished);
    }

    fn on_navigation_error(&mut self, error: &NavigationError) {
        self.record(SessionEvent::NavigationFailed(error.clone()));
    }
}
