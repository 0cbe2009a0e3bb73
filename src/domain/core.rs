//! Core domain types and operations
//!
//! This module defines pure geometry types in screen units. They carry no
//! knowledge of Win32, monitors or pointer devices.

use serde::{Deserialize, Serialize};

/// Clamps `value` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics when `lo > hi`; the upper bound
/// wins, which mirrors how window size limits behave when a monitor is
/// smaller than the window's minimum size.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// A point in screen (or scene) coordinates.
///
/// Also used as a drag offset, in which case it is the pointer's position
/// relative to the window origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Rectangle in screen coordinates
///
/// This is the fundamental building block for all geometric calculations:
/// window bounds, monitor bounds and overlay bounds all use it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle from an origin and a size
    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// 1x1 probe rectangle used to sample the monitor under a point
    pub fn probe(point: Point) -> Self {
        Self::new(point.x, point.y, 1.0, 1.0)
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// Top-left quadrant, used to pick the monitor a window "mostly" sits on
    pub fn top_left_quadrant(&self) -> Rect {
        Rect::new(self.x, self.y, self.w / 2.0, self.h / 2.0)
    }

    /// Returns true if the two rectangles share any area.
    ///
    /// Touching edges do not count as an intersection.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.right() <= self.x
            || other.bottom() <= self.y
            || other.x >= self.right()
            || other.y >= self.bottom())
    }
}
