//! Story value types
//!
//! Immutable value structs mirroring the design-tool export. Pages reference
//! each other by integer index rather than by pointer, which keeps the types
//! cheap to copy and straightforward to serialize in tests.

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Rectangular region in page-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, pos: [f32; 2]) -> bool {
        pos[0] >= self.x
            && pos[0] <= self.x + self.width
            && pos[1] >= self.y
            && pos[1] <= self.y + self.height
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }
}

/// Input event kind that can fire a reaction
///
/// Only `ON_CLICK` appears in observed exports; the remaining kinds complete
/// the closed set the export format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trigger {
    OnClick,
    OnPress,
    OnHover,
    OnDrag,
}

/// Raw action kind carried by a reaction
///
/// The export encodes this as a flat string field; unknown strings collapse
/// into [`ActionKind::Unsupported`] and are handled like broken references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// Navigate to another page (`"FRAME"` in the export)
    Frame,
    /// Open the destination as a modal overlay
    Overlay,
    /// Scroll within the current page
    Scroll,
    /// Navigate back to the previous page
    Back,
    /// Explicit no-op
    None,
    /// Any action string this engine does not know
    #[serde(other)]
    Unsupported,
}

/// Transition animation class
///
/// The export encodes this as a small integer; `0` (dissolve) is the only
/// value observed. Unknown values fall back to dissolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TransitionKind {
    Dissolve,
    SmartAnimate,
    Push,
    SlideIn,
    SlideOut,
}

impl Default for TransitionKind {
    fn default() -> Self {
        TransitionKind::Dissolve
    }
}

impl From<u8> for TransitionKind {
    fn from(value: u8) -> Self {
        match value {
            1 => TransitionKind::SmartAnimate,
            2 => TransitionKind::Push,
            3 => TransitionKind::SlideIn,
            4 => TransitionKind::SlideOut,
            _ => TransitionKind::Dissolve,
        }
    }
}

impl From<TransitionKind> for u8 {
    fn from(kind: TransitionKind) -> Self {
        match kind {
            TransitionKind::Dissolve => 0,
            TransitionKind::SmartAnimate => 1,
            TransitionKind::Push => 2,
            TransitionKind::SlideIn => 3,
            TransitionKind::SlideOut => 4,
        }
    }
}

/// A trigger-to-action binding attached to a hotspot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    /// Input kind that fires this reaction; a reaction without one is inert
    #[serde(default)]
    pub trigger: Option<Trigger>,
    /// Effect of the reaction; a reaction without one is inert
    #[serde(default)]
    pub action: Option<ActionKind>,
    /// Index of the owning page - must match, enforced at validation time
    pub src_page_index: usize,
    /// Destination page index for navigate/overlay actions
    pub frame_index: usize,
    /// Suppress auto-scroll on arrival at the destination
    #[serde(default)]
    pub disable_auto_scroll: bool,
    /// Transition animation class
    #[serde(default, rename = "transAnimType")]
    pub anim: TransitionKind,
    /// Transition duration. Usually seconds, but some exports encode raw
    /// milliseconds; the scheduler normalizes before use.
    #[serde(default, rename = "transAnimDuration")]
    pub duration: f32,
    /// Destination opens as a modal
    #[serde(default, rename = "tmpDestModal")]
    pub dest_modal: bool,
}

impl Reaction {
    /// A reaction lacking a trigger or an action never matches anything
    pub fn is_inert(&self) -> bool {
        self.trigger.is_none() || self.action.is_none()
    }
}

/// A clickable hotspot on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Display/debug label
    #[serde(default)]
    pub name: String,
    /// Hit region in page-local coordinates
    pub rect: Rect,
    /// Story-wide hotspot identifier, unique across all pages
    pub index: usize,
    /// Reactions in declaration order; first trigger match wins
    #[serde(default)]
    pub reactions: Vec<Reaction>,
}

/// One navigable screen of the prototype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Stable identifier from the design document
    pub id: String,
    /// Index of the group this page belongs to
    #[serde(default)]
    pub group_index: usize,
    /// Human title/path, e.g. `MainMenu/Color_picker`
    pub title: String,
    /// Rendered image asset name
    #[serde(default)]
    pub image: String,
    /// Position in the story's page list
    pub index: usize,
    pub width: f32,
    pub height: f32,
    /// Canvas placement - document layout only, irrelevant to navigation
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Content scrolls vertically; preserved for the renderer
    #[serde(default)]
    pub proto_overflow_v: bool,
    /// Content scrolls horizontally; preserved for the renderer
    #[serde(default)]
    pub proto_overflow_h: bool,
    /// Hotspots in declaration order; later entries sit on top
    #[serde(default)]
    pub links: Vec<Link>,
}

/// A named visual grouping of pages - presentational only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub index: usize,
    pub name: String,
    #[serde(default)]
    pub back_color: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Section within a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub name: String,
}

/// Document metadata carried through opaquely
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocMeta {
    #[serde(default)]
    pub doc_name: String,
    #[serde(default)]
    pub doc_path: String,
    #[serde(default)]
    pub doc_version: u64,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub owner_email: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub file_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(61.0, 114.0, 198.0, 46.0);
        assert!(rect.contains([100.0, 130.0]));
        assert!(rect.contains([61.0, 114.0])); // edges are inclusive
        assert!(rect.contains([259.0, 160.0]));
        assert!(!rect.contains([0.0, 0.0]));
        assert!(!rect.contains([60.9, 130.0]));
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect.center(), [30.0, 50.0]);
    }

    #[test]
    fn test_transition_kind_from_u8() {
        assert_eq!(TransitionKind::from(0), TransitionKind::Dissolve);
        assert_eq!(TransitionKind::from(2), TransitionKind::Push);
        // Unknown animation codes fall back to dissolve
        assert_eq!(TransitionKind::from(99), TransitionKind::Dissolve);
        assert_eq!(u8::from(TransitionKind::SlideOut), 4);
    }

    #[test]
    fn test_inert_reaction() {
        let mut reaction = Reaction {
            trigger: Some(Trigger::OnClick),
            action: Some(ActionKind::Frame),
            src_page_index: 0,
            frame_index: 1,
            disable_auto_scroll: true,
            anim: TransitionKind::Dissolve,
            duration: 0.3,
            dest_modal: false,
        };
        assert!(!reaction.is_inert());

        reaction.action = None;
        assert!(reaction.is_inert());

        reaction.action = Some(ActionKind::Frame);
        reaction.trigger = None;
        assert!(reaction.is_inert());
    }
}
