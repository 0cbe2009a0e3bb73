//! Last free-form window geometry
//!
//! The snapshot is what maximize, snap and their reversals restore to. It
//! starts out "unset" (negative infinity in every field) until the window is
//! first laid out, and reading an unset field falls back to the live value.

use crate::domain::core::{Point, Rect, Size};

/// Last known free-form size and position of a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    size: Size,
    position: Point,
}

impl Default for GeometrySnapshot {
    fn default() -> Self {
        Self::unset()
    }
}

impl GeometrySnapshot {
    /// Snapshot holding the unset sentinel
    pub fn unset() -> Self {
        Self {
            size: Size::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            position: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Returns true once every field has been written at least once
    pub fn is_set(&self) -> bool {
        [
            self.size.width,
            self.size.height,
            self.position.x,
            self.position.y,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Records the full geometry of `bounds`
    pub fn record(&mut self, bounds: Rect) {
        self.size = bounds.size();
        self.position = bounds.origin();
    }

    /// Records only the vertical extent, used by vertical-handle snaps
    pub fn record_vertical(&mut self, y: f64, height: f64) {
        self.position.y = y;
        self.size.height = height;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Snapshot size, with unset fields replaced by `current`
    pub fn size_or(&self, current: Size) -> Size {
        Size::new(
            set_or(self.size.width, current.width),
            set_or(self.size.height, current.height),
        )
    }

    /// Snapshot position, with unset fields replaced by `current`
    pub fn position_or(&self, current: Point) -> Point {
        Point::new(
            set_or(self.position.x, current.x),
            set_or(self.position.y, current.y),
        )
    }

    /// Full restore target, falling back to `current` where unset
    pub fn bounds_or(&self, current: Rect) -> Rect {
        Rect::from_parts(
            self.position_or(current.origin()),
            self.size_or(current.size()),
        )
    }
}

fn set_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
