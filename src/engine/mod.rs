//! Prototype navigation engine
//!
//! Composes the story graph into a running prototype: hit testing, reaction
//! resolution, transition scheduling, and the per-session navigation state
//! machine.
//!
//! # Architecture
//!
//! ```text
//! Raw input (winit) → PointerCollector → SessionCommand
//!                                            ↓
//!                                    NavigationSession
//!                              (hit test → resolve → commit)
//!                                            ↓
//!                                   TransitionScheduler
//!                                    (ticked externally)
//!                                            ↓
//!                                    SessionObservers
//!                                    (render boundary)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut session = NavigationSession::new(story, PlayerConfig::default())?;
//! session.subscribe(Box::new(renderer_bridge));
//!
//! // From the input layer
//! session.pointer_down(x, y);
//! session.pointer_up(x, y);
//!
//! // Each frame
//! session.tick(delta_time);
//! ```

pub mod config;
mod events;
mod hit;
mod input;
mod resolver;
mod session;
mod transition;

// Re-export public API
pub use config::{ActivationPolicy, PlayerConfig, SessionConfig};
pub use events::{EventLog, EventLogHandle, SessionEvent, SessionObserver};
pub use hit::hit_test;
pub use input::{PointerCollector, SessionCommand};
pub use resolver::{Action, NavigationError, resolve};
pub use session::{NavigationSession, SessionStats};
pub use transition::{
    Begun, Progress, Transition, TransitionError, TransitionScheduler, normalize_duration,
};
