//! Pointer event model
//!
//! The controller only needs the primary button state and the pointer's
//! position in screen and scene (window-relative) coordinates. Hosts
//! translate their native mouse messages into [`PointerEvent`]s.

use serde::{Deserialize, Serialize};

use crate::domain::core::{Point, Rect};
use crate::domain::direction::Direction;

/// Button that triggered a press, release or click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Primary,
    Secondary,
    Middle,
    None,
}

/// Stage of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Pressed,
    Dragged,
    Released,
    Clicked,
}

/// Identifier of a UI element inside the host window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// The element whose pointer events move the window (usually a title bar)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveSurface {
    pub id: SurfaceId,
    /// Preferred height of the element; dragging a snapped window further
    /// than this below its top edge pulls it off the snap.
    pub preferred_height: f64,
}

/// Where an event was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// A surface that may be the designated move control
    Surface(SurfaceId),
    /// One of the eight invisible resize hit regions
    ResizeHandle(Direction),
}

/// A single mouse event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position in screen coordinates
    pub screen: Point,
    /// Position relative to the window's origin
    pub scene: Point,
    /// Button that triggered this event
    pub button: MouseButton,
    /// Whether the primary button is held while this event fires
    pub primary_down: bool,
    /// Number of consecutive clicks (for `Clicked` events)
    pub click_count: u32,
}

impl PointerEvent {
    /// Primary-button event at `screen`, with the scene position derived
    /// from the window bounds.
    pub fn primary(screen: Point, window: &Rect) -> Self {
        Self {
            screen,
            scene: Point::new(screen.x - window.x, screen.y - window.y),
            button: MouseButton::Primary,
            primary_down: true,
            click_count: 1,
        }
    }

    /// Same event with the primary button no longer held
    pub fn released(mut self) -> Self {
        self.primary_down = false;
        self
    }

    pub fn with_clicks(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self.primary_down = button == MouseButton::Primary;
        self
    }

    /// True for a primary-button double (or more) click
    pub fn is_primary_double_click(&self) -> bool {
        self.button == MouseButton::Primary && self.click_count >= 2
    }
}
