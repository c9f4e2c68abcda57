//! Transition scheduling and animation timing
//!
//! The scheduler owns the one-and-only animation slot of the engine: it is
//! either `Idle` or `Animating` exactly one transition. Progress is driven
//! cooperatively by an external clock through [`TransitionScheduler::tick`];
//! nothing here blocks.

use keyframe::{
    ease,
    functions::{EaseInOut, EaseOutCubic, Linear},
};
use thiserror::Error;

use crate::story::TransitionKind;

/// Durations above this are assumed to be raw millisecond counts.
/// The export mixes both encodings (`0.3` and `300` both mean 300ms).
const MS_ENCODING_THRESHOLD: f32 = 10.0;

/// Normalizes a raw export duration to seconds.
///
/// Values above [`MS_ENCODING_THRESHOLD`] are divided by 1000; negative or
/// non-finite values collapse to zero (instant).
pub fn normalize_duration(raw: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        0.0
    } else if raw > MS_ENCODING_THRESHOLD {
        raw / 1000.0
    } else {
        raw
    }
}

/// A transition currently animating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Page the animation leaves
    pub from: usize,
    /// Page the animation reveals - already the logically current page
    pub to: usize,
    /// Animation class
    pub kind: TransitionKind,
    /// Normalized duration in seconds, always positive
    pub duration: f32,
    elapsed: f32,
}

/// How a requested transition started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Begun {
    /// Zero/degenerate duration: resolved synchronously, scheduler stays idle
    Instant,
    /// Animation is running; drive it with `tick`
    Animating,
}

/// Scheduler-level failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("a transition is already animating")]
    AlreadyAnimating,
}

/// Progress snapshot produced by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Eased animation fraction in `0..=1`
    pub fraction: f32,
    /// Animation class of the active transition
    pub kind: TransitionKind,
    /// True exactly once, on the tick that completes the transition
    pub finished: bool,
}

/// Owns the single animation slot of the engine
#[derive(Debug, Default)]
pub struct TransitionScheduler {
    active: Option<Transition>,
}

impl TransitionScheduler {
    /// Creates an idle scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a transition is animating
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// The transition currently animating, if any
    pub fn active(&self) -> Option<&Transition> {
        self.active.as_ref()
    }

    /// Starts a transition. Fails fast when one is already animating -
    /// callers either wait for idle or cancel explicitly, never queue.
    ///
    /// A normalized duration of zero resolves synchronously: the call
    /// returns [`Begun::Instant`] and the scheduler remains idle.
    pub fn begin(
        &mut self,
        from: usize,
        to: usize,
        kind: TransitionKind,
        raw_duration: f32,
    ) -> Result<Begun, TransitionError> {
        if self.active.is_some() {
            return Err(TransitionError::AlreadyAnimating);
        }

        let duration = normalize_duration(raw_duration);
        if duration <= 0.0 {
            return Ok(Begun::Instant);
        }

        self.active = Some(Transition {
            from,
            to,
            kind,
            duration,
            elapsed: 0.0,
        });
        Ok(Begun::Animating)
    }

    /// Forces the scheduler back to idle, truncating the animation.
    /// The logical page change is never rolled back; only the visual
    /// animation stops. Returns the cancelled transition, if any.
    pub fn cancel(&mut self) -> Option<Transition> {
        self.active.take()
    }

    /// Advances the active transition by `dt` seconds. Returns `None` while
    /// idle; otherwise an eased progress snapshot, with `finished` set on
    /// the tick that reaches the declared duration.
    pub fn tick(&mut self, dt: f32) -> Option<Progress> {
        let transition = self.active.as_mut()?;
        transition.elapsed += dt.max(0.0);

        let finished = transition.elapsed >= transition.duration;
        let t = (transition.elapsed / transition.duration).clamp(0.0, 1.0);
        let progress = Progress {
            fraction: eased_fraction(transition.kind, t),
            kind: transition.kind,
            finished,
        };

        if finished {
            self.active = None;
        }
        Some(progress)
    }
}

/// Maps linear elapsed time to the eased fraction the renderer draws
fn eased_fraction(kind: TransitionKind, t: f32) -> f32 {
    match kind {
        TransitionKind::Dissolve => ease(Linear, 0.0_f32, 1.0, t),
        TransitionKind::SmartAnimate => ease(EaseInOut, 0.0_f32, 1.0, t),
        TransitionKind::Push | TransitionKind::SlideIn | TransitionKind::SlideOut => {
            ease(EaseOutCubic, 0.0_f32, 1.0, t)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_duration() {
        assert_eq!(normalize_duration(0.3), 0.3);
        assert_eq!(normalize_duration(300.0), 0.3);
        assert_eq!(normalize_duration(0.0), 0.0);
        assert_eq!(normalize_duration(-1.0), 0.0);
        assert_eq!(normalize_duration(f32::NAN), 0.0);
        // 10 seconds is still a plausible (if slow) transition
        assert_eq!(normalize_duration(10.0), 10.0);
    }

    #[test]
    fn test_zero_duration_resolves_synchronously() {
        let mut scheduler = TransitionScheduler::new();
        let begun = scheduler.begin(0, 1, TransitionKind::Dissolve, 0.0);
        assert_eq!(begun, Ok(Begun::Instant));
        assert!(!scheduler.is_animating());
        assert!(scheduler.tick(0.1).is_none());
    }

    #[test]
    fn test_begin_rejects_while_animating() {
        let mut scheduler = TransitionScheduler::new();
        assert_eq!(
            scheduler.begin(0, 1, TransitionKind::Dissolve, 0.3),
            Ok(Begun::Animating)
        );
        assert_eq!(
            scheduler.begin(1, 2, TransitionKind::Dissolve, 0.3),
            Err(TransitionError::AlreadyAnimating)
        );
        // The original transition is unaffected
        assert_eq!(scheduler.active().map(|t| (t.from, t.to)), Some((0, 1)));
    }

    #[test]
    fn test_tick_runs_to_completion() {
        let mut scheduler = TransitionScheduler::new();
        scheduler
            .begin(0, 1, TransitionKind::Dissolve, 0.3)
            .expect("idle scheduler accepts");

        let p1 = scheduler.tick(0.1).expect("animating");
        assert!(!p1.finished);
        assert!((p1.fraction - 1.0 / 3.0).abs() < 1e-3); // dissolve eases linearly

        let p2 = scheduler.tick(0.1).expect("animating");
        assert!(!p2.finished);

        let p3 = scheduler.tick(0.1).expect("animating");
        assert!(p3.finished);
        assert_eq!(p3.fraction, 1.0);
        assert!(!scheduler.is_animating());
        assert!(scheduler.tick(0.1).is_none());
    }

    #[test]
    fn test_millisecond_duration_normalized_at_begin() {
        let mut scheduler = TransitionScheduler::new();
        scheduler
            .begin(0, 1, TransitionKind::Dissolve, 300.0)
            .expect("idle scheduler accepts");
        assert_eq!(scheduler.active().map(|t| t.duration), Some(0.3));
    }

    #[test]
    fn test_cancel_truncates_animation() {
        let mut scheduler = TransitionScheduler::new();
        scheduler
            .begin(2, 5, TransitionKind::Push, 1.0)
            .expect("idle scheduler accepts");
        scheduler.tick(0.2);

        let cancelled = scheduler.cancel().expect("had an active transition");
        assert_eq!((cancelled.from, cancelled.to), (2, 5));
        assert!(!scheduler.is_animating());
        assert!(scheduler.cancel().is_none());
    }

    #[test]
    fn test_eased_fraction_stays_in_range() {
        for kind in [
            TransitionKind::Dissolve,
            TransitionKind::SmartAnimate,
            TransitionKind::Push,
            TransitionKind::SlideIn,
            TransitionKind::SlideOut,
        ] {
            for step in 0..=10 {
                let t = step as f32 / 10.0;
                let f = eased_fraction(kind, t);
                assert!((0.0..=1.0 + 1e-4).contains(&f), "{kind:?} at {t}: {f}");
            }
            assert!(eased_fraction(kind, 0.0).abs() < 1e-4);
            assert!((eased_fraction(kind, 1.0) - 1.0).abs() < 1e-4);
        }
    }
}
