//! Raw pointer input collection from winit events
//!
//! Translates window events into session commands: cursor tracking in
//! DPI-scaled logical coordinates, left-button press/release as pointer
//! down/up, and keyboard shortcuts for back/restart. Pure translation - no
//! engine state lives here.

use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::session::NavigationSession;

/// A command for the navigation session, produced from raw input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    PointerDown([f32; 2]),
    PointerUp([f32; 2]),
    Back,
    Restart,
}

impl SessionCommand {
    /// Dispatches this command onto a session
    pub fn apply(self, session: &mut NavigationSession) {
        match self {
            SessionCommand::PointerDown(pos) => session.pointer_down(pos[0], pos[1]),
            SessionCommand::PointerUp(pos) => session.pointer_up(pos[0], pos[1]),
            SessionCommand::Back => session.back(),
            SessionCommand::Restart => session.restart(),
        }
    }
}

/// Collects raw pointer input from winit events
pub struct PointerCollector {
    cursor: Option<[f32; 2]>,
    scale_factor: f32,
}

impl PointerCollector {
    /// Creates a new collector
    pub fn new() -> Self {
        Self {
            cursor: None,
            scale_factor: 1.0,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Last known cursor position in logical coordinates
    pub fn cursor(&self) -> Option<[f32; 2]> {
        self.cursor
    }

    /// Handle a winit window event; returns the session command it maps to,
    /// if any
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<SessionCommand> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some([
                    position.x as f32 / self.scale_factor,
                    position.y as f32 / self.scale_factor,
                ]);
                None
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor as f32;
                None
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                // Presses with no known cursor position are ignored
                let pos = self.cursor?;
                Some(match state {
                    ElementState::Pressed => SessionCommand::PointerDown(pos),
                    ElementState::Released => SessionCommand::PointerUp(pos),
                })
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) | PhysicalKey::Code(KeyCode::Backspace) => {
                        Some(SessionCommand::Back)
                    }
                    PhysicalKey::Code(KeyCode::Home) => Some(SessionCommand::Restart),
                    _ => None,
                }
            }

            _ => None,
        }
    }
}

impl Default for PointerCollector {
    fn default() -> Self {
        Self::new()
    }
}
